//! Module d'accès au catalogue Spotify (recherche, utilisateur courant)

use super::SpotifyApi;
use crate::error::Result;
use crate::models::{SearchResponse, Track, User};
use tracing::debug;

impl SpotifyApi {
    /// Retourne l'utilisateur authentifié
    pub async fn current_user(&self) -> Result<User> {
        self.get("/me", &[]).await
    }

    /// Recherche des pistes, dans l'ordre de classement du catalogue
    ///
    /// # Arguments
    ///
    /// * `query` - Texte libre (ex: `"Foo Bar"`)
    /// * `limit` - Nombre maximal de résultats
    pub async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        let limit = limit.to_string();
        let params = [("q", query), ("type", "track"), ("limit", limit.as_str())];

        let response: SearchResponse = self.get("/search", &params).await?;
        let tracks = response.into_tracks();
        debug!("Search '{}' returned {} track(s)", query, tracks.len());
        Ok(tracks)
    }
}
