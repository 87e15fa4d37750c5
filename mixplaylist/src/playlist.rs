//! Nom, description et découpage en lots de la playlist mensuelle

use chrono::Datelike;
use mixspotify::MAX_ITEMS_PER_REQUEST;

/// Paramètres de création de la playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSpec {
    pub name: String,
    pub description: String,
    pub is_public: bool,
}

impl PlaylistSpec {
    /// Playlist publique `r/{community} {mois}/{année}`
    pub fn for_month(community: &str, month: u32, year: i32) -> Self {
        Self {
            name: format!("r/{} {}/{}", community, month, year),
            description: format!("Top tracks from r/{} for {}/{}.", community, month, year),
            is_public: true,
        }
    }

    pub fn for_date(community: &str, date: &impl Datelike) -> Self {
        Self::for_month(community, date.month(), date.year())
    }
}

/// Découpe `items` en lots consécutifs d'au plus `size` éléments
///
/// La taille est ramenée dans `1..=100`, la limite d'un ajout de pistes.
pub fn batches<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.clamp(1, MAX_ITEMS_PER_REQUEST))
}
