//! Résolution des requêtes en pistes du catalogue

use crate::parser::SongQuery;
use crate::sources::CatalogService;
use tracing::info;

/// Piste trouvée pour une requête
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub catalog_id: String,
    pub matched_artist: String,
    pub matched_title: String,
}

/// Résultat d'une recherche
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedTrack),
    NotFound(SongQuery),
}

/// Partition ordonnée des requêtes résolues
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolutions {
    pub found: Vec<ResolvedTrack>,
    pub not_found: Vec<SongQuery>,
}

impl Resolutions {
    /// Identifiants catalogue, dans l'ordre des requêtes
    pub fn track_ids(&self) -> Vec<String> {
        self.found.iter().map(|t| t.catalog_id.clone()).collect()
    }
}

/// Cherche une requête et garde le premier candidat
///
/// Aucun seuil de similarité : le premier résultat est accepté tel quel.
pub async fn resolve<C>(catalog: &C, query: &SongQuery) -> mixspotify::Result<Resolution>
where
    C: CatalogService + ?Sized,
{
    info!("Searching for: {}", query.search_query);

    match catalog.search_track(&query.search_query).await? {
        Some(track) => {
            let resolved = ResolvedTrack {
                matched_artist: track.primary_artist().unwrap_or_default().to_string(),
                matched_title: track.name,
                catalog_id: track.id,
            };
            info!(
                "Found: {} - {}",
                resolved.matched_artist, resolved.matched_title
            );
            Ok(Resolution::Found(resolved))
        }
        None => {
            info!("Not found: {}", query);
            Ok(Resolution::NotFound(query.clone()))
        }
    }
}

/// Résout les requêtes une par une, en conservant leur ordre
pub async fn resolve_all<C>(catalog: &C, queries: &[SongQuery]) -> mixspotify::Result<Resolutions>
where
    C: CatalogService + ?Sized,
{
    let mut resolutions = Resolutions::default();
    for query in queries {
        match resolve(catalog, query).await? {
            Resolution::Found(track) => resolutions.found.push(track),
            Resolution::NotFound(query) => resolutions.not_found.push(query),
        }
    }
    Ok(resolutions)
}
