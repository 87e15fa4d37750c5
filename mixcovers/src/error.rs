//! Erreurs du pipeline de couverture

use thiserror::Error;

/// Type Result personnalisé pour mixcovers
pub type Result<T> = std::result::Result<T, CoverError>;

/// Erreurs possibles lors de la fabrication d'une couverture
#[derive(Error, Debug)]
pub enum CoverError {
    /// Erreur HTTP lors du téléchargement
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Téléchargement refusé par le serveur
    #[error("Error downloading image: status {status} for {url}")]
    Status { status: u16, url: String },

    /// Le post source ne pointe vers aucune image
    #[error("Cover post has no image URL")]
    MissingUrl,

    /// Image source illisible
    #[error("Image decode error: {0}")]
    Decode(#[source] image::ImageError),

    /// Échec de l'encodage JPEG
    #[error("JPEG encode error: {0}")]
    Encode(#[source] image::ImageError),

    /// Police inutilisable
    #[error("Font error: {0}")]
    Font(String),

    /// Tâche de traitement interrompue
    #[error("Cover processing task failed: {0}")]
    Task(String),
}
