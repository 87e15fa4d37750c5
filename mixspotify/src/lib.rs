//! # mixspotify - Client Spotify pour MonthlyMix
//!
//! Cette crate fournit le strict nécessaire de l'API Web Spotify pour
//! construire une playlist mensuelle :
//! - Authentification par refresh token (grant OAuth `refresh_token`)
//! - Recherche de pistes
//! - Création de playlist et ajout de pistes par lots de 100 au plus
//! - Envoi de l'image de couverture (JPEG en base64)
//!
//! ## Structure des modules
//!
//! ```text
//! mixspotify/
//! ├── src/
//! │   ├── lib.rs              # Module principal (ce fichier)
//! │   ├── client.rs           # Client haut-niveau authentifié
//! │   ├── models.rs           # Structures de données
//! │   ├── api/
//! │   │   ├── mod.rs          # Client HTTP bas-niveau
//! │   │   ├── auth.rs         # Rafraîchissement du jeton
//! │   │   ├── catalog.rs      # Recherche, utilisateur courant
//! │   │   └── playlist.rs     # Playlists et couvertures
//! │   └── error.rs            # Gestion des erreurs
//! ```
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use mixspotify::{SpotifyClient, SpotifySettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpotifyClient::with_access_token(&SpotifySettings::default(), "token")?;
//!
//!     let me = client.current_user().await?;
//!     let playlist = client
//!         .create_playlist(&me.id, "r/listentothis 3/2025", "Top tracks", true)
//!         .await?;
//!
//!     if let Some(track) = client.search_tracks("Foo Bar", 1).await?.first() {
//!         client.add_tracks(&playlist.id, &[track.id.clone()]).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Gestion des erreurs
//!
//! Les statuts HTTP sont convertis en [`SpotifyError`] typées
//! (401/403 → `Unauthorized`, 404 → `NotFound`, 429 → `RateLimitExceeded`).

pub mod api;
pub mod client;
pub mod error;
pub mod models;

pub use api::{SpotifyApi, SpotifySettings, MAX_ITEMS_PER_REQUEST};
pub use client::SpotifyClient;
pub use error::{Result, SpotifyError};
pub use models::{Playlist, Track, User};
