//! Module de gestion des playlists (création, ajout de pistes, couverture)

use super::{SpotifyApi, MAX_ITEMS_PER_REQUEST};
use crate::error::{Result, SpotifyError};
use crate::models::{track_uri, Playlist, SnapshotResponse};
use serde_json::json;
use tracing::debug;

impl SpotifyApi {
    /// Crée une playlist pour un utilisateur
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist> {
        let body = json!({
            "name": name,
            "public": public,
            "description": description,
        });
        let playlist: Playlist = self
            .post_json(&format!("/users/{}/playlists", user_id), &body)
            .await?;
        debug!("Created playlist {} ({})", playlist.name, playlist.id);
        Ok(playlist)
    }

    /// Ajoute des pistes en fin de playlist, dans l'ordre donné
    ///
    /// Les identifiants peuvent être des IDs nus ou des URIs `spotify:track:`.
    ///
    /// # Errors
    ///
    /// * `SpotifyError::InvalidRequest` - plus de 100 pistes dans un seul appel
    pub async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<String> {
        if track_ids.len() > MAX_ITEMS_PER_REQUEST {
            return Err(SpotifyError::InvalidRequest(format!(
                "{} tracks in one call, the limit is {}",
                track_ids.len(),
                MAX_ITEMS_PER_REQUEST
            )));
        }

        let uris: Vec<String> = track_ids.iter().map(|id| track_uri(id)).collect();
        let body = json!({ "uris": uris });
        let response: SnapshotResponse = self
            .post_json(&format!("/playlists/{}/tracks", playlist_id), &body)
            .await?;
        Ok(response.snapshot_id)
    }

    /// Remplace l'image de couverture d'une playlist
    ///
    /// # Arguments
    ///
    /// * `image_base64` - JPEG encodé en base64
    pub async fn upload_cover_image(&self, playlist_id: &str, image_base64: &str) -> Result<()> {
        self.put_raw(
            &format!("/playlists/{}/images", playlist_id),
            "image/jpeg",
            image_base64.to_string(),
        )
        .await
    }
}
