//! # mixcovers - Couverture de playlist mensuelle
//!
//! Transforme une photo quelconque en couverture de playlist :
//!
//! 1. réduction pour que le plus grand côté tienne dans 500 px ;
//! 2. recadrage carré au centre ;
//! 3. nom du mois en bas à droite, avec ombre portée (police système, ou
//!    à défaut DejaVu Sans Bold embarquée) ;
//! 4. encodage JPEG sous un budget de taille (200 Ko visés, 256 Ko max).
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use mixcovers::{CoverPipeline, CoverSettings, ImageFetcher};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = ImageFetcher::new("Monthly Playlist Creator v1.0", Duration::from_secs(30))?;
//!     let data = fetcher.fetch("https://i.redd.it/example.jpg").await?;
//!
//!     let pipeline = CoverPipeline::new(CoverSettings::default())?;
//!     let cover = pipeline.render(data, "October".to_string()).await?;
//!     println!("{}x{} ({} bytes)", cover.width, cover.height, cover.len());
//!     Ok(())
//! }
//! ```
//!
//! Le traitement d'image est synchrone ; [`CoverPipeline::render`] le déporte
//! sur un thread bloquant de tokio.

pub mod error;
pub mod fetch;
pub mod jpeg;
pub mod label;
pub mod pipeline;
pub mod transform;

pub use error::{CoverError, Result};
pub use fetch::ImageFetcher;
pub use label::{bundled_font, month_name};
pub use pipeline::{CoverImage, CoverPipeline, CoverSettings};
