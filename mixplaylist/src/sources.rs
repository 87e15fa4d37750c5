//! Collaborateurs externes de l'assemblage
//!
//! Chaque service distant est vu à travers un trait, implémenté par le
//! client réel et, dans les tests, par des doublures en mémoire.

use crate::playlist::PlaylistSpec;
use async_trait::async_trait;
use mixconfig::SpotifyCredentials;
use mixcovers::ImageFetcher;
use mixfeed::{FeedClient, RawPost, TimeWindow};
use mixspotify::{Playlist, SpotifyClient, SpotifySettings, Track};
use tokio::sync::OnceCell;
use tracing::debug;

/// Source de posts "top" d'une communauté
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn top_posts(
        &self,
        community: &str,
        window: TimeWindow,
        limit: u32,
    ) -> mixfeed::Result<Vec<RawPost>>;
}

/// Téléchargement d'une image par URL
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_image(&self, url: &str) -> mixcovers::Result<Vec<u8>>;
}

/// Catalogue musical où la playlist est créée
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Identifiant de l'utilisateur authentifié, propriétaire de la playlist
    async fn current_user_id(&self) -> mixspotify::Result<String>;

    /// Meilleur candidat pour une requête, s'il existe
    async fn search_track(&self, query: &str) -> mixspotify::Result<Option<Track>>;

    async fn create_playlist(
        &self,
        owner_id: &str,
        spec: &PlaylistSpec,
    ) -> mixspotify::Result<Playlist>;

    /// Ajoute au plus 100 pistes, dans l'ordre donné
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> mixspotify::Result<()>;

    /// Remplace la couverture (JPEG encodé en base64)
    async fn upload_cover(&self, playlist_id: &str, image_base64: &str) -> mixspotify::Result<()>;
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn top_posts(
        &self,
        community: &str,
        window: TimeWindow,
        limit: u32,
    ) -> mixfeed::Result<Vec<RawPost>> {
        FeedClient::top_posts(self, community, window, limit).await
    }
}

#[async_trait]
impl ImageSource for ImageFetcher {
    async fn fetch_image(&self, url: &str) -> mixcovers::Result<Vec<u8>> {
        self.fetch(url).await
    }
}

#[async_trait]
impl CatalogService for SpotifyClient {
    async fn current_user_id(&self) -> mixspotify::Result<String> {
        Ok(self.current_user().await?.id)
    }

    async fn search_track(&self, query: &str) -> mixspotify::Result<Option<Track>> {
        Ok(self.search_tracks(query, 1).await?.into_iter().next())
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        spec: &PlaylistSpec,
    ) -> mixspotify::Result<Playlist> {
        SpotifyClient::create_playlist(self, owner_id, &spec.name, &spec.description, spec.is_public)
            .await
    }

    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> mixspotify::Result<()> {
        SpotifyClient::add_tracks(self, playlist_id, track_ids).await?;
        Ok(())
    }

    async fn upload_cover(&self, playlist_id: &str, image_base64: &str) -> mixspotify::Result<()> {
        self.upload_cover_image(playlist_id, image_base64).await
    }
}

/// Catalogue Spotify authentifié au premier appel
///
/// Le refresh token n'est échangé que lorsqu'une exécution a réellement
/// besoin du catalogue, puis le client est réutilisé.
pub struct SpotifyCatalog {
    settings: SpotifySettings,
    credentials: SpotifyCredentials,
    client: OnceCell<SpotifyClient>,
}

impl SpotifyCatalog {
    pub fn new(settings: SpotifySettings, credentials: SpotifyCredentials) -> Self {
        Self {
            settings,
            credentials,
            client: OnceCell::new(),
        }
    }

    /// Vrai une fois l'authentification effectuée
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> mixspotify::Result<&SpotifyClient> {
        self.client
            .get_or_try_init(|| async {
                debug!("Connecting to Spotify");
                SpotifyClient::connect(&self.settings, &self.credentials).await
            })
            .await
    }
}

#[async_trait]
impl CatalogService for SpotifyCatalog {
    async fn current_user_id(&self) -> mixspotify::Result<String> {
        self.client().await?.current_user_id().await
    }

    async fn search_track(&self, query: &str) -> mixspotify::Result<Option<Track>> {
        self.client().await?.search_track(query).await
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        spec: &PlaylistSpec,
    ) -> mixspotify::Result<Playlist> {
        CatalogService::create_playlist(self.client().await?, owner_id, spec).await
    }

    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> mixspotify::Result<()> {
        CatalogService::add_tracks(self.client().await?, playlist_id, track_ids).await
    }

    async fn upload_cover(&self, playlist_id: &str, image_base64: &str) -> mixspotify::Result<()> {
        self.client().await?.upload_cover(playlist_id, image_base64).await
    }
}
