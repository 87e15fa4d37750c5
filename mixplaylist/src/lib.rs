//! # mixplaylist - Assemblage de la playlist mensuelle
//!
//! Relie le flux communautaire, le catalogue et le pipeline de couverture :
//!
//! 1. lecture des meilleurs posts du mois ;
//! 2. extraction "Artiste - Titre" ([`parse_title`]) ;
//! 3. création d'une playlist publique `r/{communauté} {mois}/{année}` ;
//! 4. recherche de chaque chanson, ajout par lots de 100 au plus ;
//! 5. fabrication et envoi de la couverture ;
//! 6. bilan des chansons introuvables.
//!
//! Les services distants sont abstraits par [`FeedSource`], [`ImageSource`]
//! et [`CatalogService`]. [`SpotifyCatalog`] ne s'authentifie qu'au premier
//! appel : un flux vide ne touche jamais au catalogue. Les appels sont
//! strictement séquentiels.

pub mod assembly;
pub mod error;
pub mod parser;
pub mod playlist;
pub mod report;
pub mod resolver;
pub mod sources;

pub use assembly::{AssemblySettings, CoverStatus, PlaylistAssembler, RunOutcome, RunSummary};
pub use error::{AssemblyError, Result};
pub use parser::{parse_posts, parse_title, SongQuery};
pub use playlist::{batches, PlaylistSpec};
pub use resolver::{resolve, resolve_all, Resolution, ResolvedTrack, Resolutions};
pub use sources::{CatalogService, FeedSource, ImageSource, SpotifyCatalog};
