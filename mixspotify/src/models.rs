//! Structures de données pour représenter les objets Spotify

use serde::{Deserialize, Serialize};

/// Utilisateur authentifié (`GET /me`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Identifiant Spotify de l'utilisateur
    pub id: String,
    /// Nom affiché
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Artiste tel que référencé par une piste
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Piste du catalogue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Identifiant catalogue de la piste
    pub id: String,
    /// Titre de la piste
    pub name: String,
    /// Artistes crédités, dans l'ordre du catalogue
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    /// URI `spotify:track:{id}`
    #[serde(default)]
    pub uri: Option<String>,
}

impl Track {
    /// Premier artiste crédité
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }
}

/// Construit l'URI d'une piste à partir de son identifiant
pub fn track_uri(id: &str) -> String {
    if id.starts_with("spotify:") {
        id.to_string()
    } else {
        format!("spotify:track:{}", id)
    }
}

/// Liens externes d'un objet Spotify
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Playlist créée ou lue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// Page de résultats
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Option<T>>,
}

/// Réponse de l'endpoint /search
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Paging<Track>>,
}

impl SearchResponse {
    /// Pistes dans l'ordre du classement, sans les entrées nulles
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
            .map(|page| page.items.into_iter().flatten().collect())
            .unwrap_or_default()
    }
}

/// Réponse des endpoints modifiant le contenu d'une playlist
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SnapshotResponse {
    pub snapshot_id: String,
}
