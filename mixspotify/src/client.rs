//! Client principal pour interagir avec l'API Spotify
//!
//! Ce module fournit un client haut-niveau déjà authentifié.

use crate::api::auth::AccessToken;
use crate::api::{SpotifySettings, SpotifyApi};
use crate::error::{Result, SpotifyError};
use crate::models::{Playlist, Track, User};
use mixconfig::{Config, SpotifyCredentials};
use tracing::info;

/// Client Spotify haut-niveau
pub struct SpotifyClient {
    /// API bas-niveau
    api: SpotifyApi,
    /// Jeton obtenu au démarrage, absent si fourni directement
    token: Option<AccessToken>,
}

impl SpotifyClient {
    /// Crée un client à partir de la configuration MonthlyMix
    ///
    /// Lit la section `spotify` et les identifiants, puis échange le refresh
    /// token contre un jeton d'accès.
    ///
    /// # Exemple
    ///
    /// ```rust,no_run
    /// use mixconfig::Config;
    /// use mixspotify::SpotifyClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let config = Config::load(None)?;
    ///     let client = SpotifyClient::from_config(&config).await?;
    ///     let me = client.current_user().await?;
    ///     println!("Logged in as {}", me.id);
    ///     Ok(())
    /// }
    /// ```
    pub async fn from_config(config: &Config) -> Result<Self> {
        let settings: SpotifySettings = config.section(&["spotify"])?;
        let credentials = config.credentials()?;
        Self::connect(&settings, &credentials).await
    }

    /// Crée un client et l'authentifie avec le refresh token
    ///
    /// # Errors
    ///
    /// * `SpotifyError::Configuration` - aucun refresh token configuré
    /// * `SpotifyError::Unauthorized` - refresh token refusé
    pub async fn connect(
        settings: &SpotifySettings,
        credentials: &SpotifyCredentials,
    ) -> Result<Self> {
        let refresh_token = credentials.refresh_token.as_deref().ok_or_else(|| {
            SpotifyError::Configuration(
                "SPOTIPY_REFRESH_TOKEN is not set, authorize the application first".to_string(),
            )
        })?;

        let mut api = SpotifyApi::new(settings)?;
        let token = api
            .refresh_access_token(
                &credentials.client_id,
                &credentials.client_secret,
                refresh_token,
            )
            .await?;
        info!("Spotify client authenticated");

        Ok(Self {
            api,
            token: Some(token),
        })
    }

    /// Crée un client avec un jeton d'accès déjà obtenu
    pub fn with_access_token(settings: &SpotifySettings, token: impl Into<String>) -> Result<Self> {
        let mut api = SpotifyApi::new(settings)?;
        api.set_access_token(token);
        Ok(Self { api, token: None })
    }

    /// Jeton obtenu lors de la connexion
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Accès à l'API bas-niveau
    pub fn api(&self) -> &SpotifyApi {
        &self.api
    }

    /// Utilisateur authentifié
    pub async fn current_user(&self) -> Result<User> {
        self.api.current_user().await
    }

    /// Recherche de pistes
    pub async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        self.api.search_tracks(query, limit).await
    }

    /// Création d'une playlist
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist> {
        info!("Creating playlist for user {}", user_id);
        self.api
            .create_playlist(user_id, name, description, public)
            .await
    }

    /// Ajout d'au plus 100 pistes
    pub async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<String> {
        self.api.add_tracks(playlist_id, track_ids).await
    }

    /// Envoi d'une couverture JPEG encodée en base64
    pub async fn upload_cover_image(&self, playlist_id: &str, image_base64: &str) -> Result<()> {
        self.api.upload_cover_image(playlist_id, image_base64).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_requires_refresh_token() {
        let credentials = SpotifyCredentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
            redirect_uri: "http://localhost".into(),
            refresh_token: None,
        };
        let result = SpotifyClient::connect(&SpotifySettings::default(), &credentials).await;
        assert!(matches!(result, Err(SpotifyError::Configuration(_))));
    }

    #[test]
    fn test_with_access_token() {
        let client = SpotifyClient::with_access_token(&SpotifySettings::default(), "t").unwrap();
        assert!(client.api().is_authenticated());
        assert!(client.token().is_none());
    }
}
