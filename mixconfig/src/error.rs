//! Erreurs de chargement et de lecture de la configuration

use thiserror::Error;

/// Type Result personnalisé pour mixconfig
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Erreurs possibles lors du chargement ou de la lecture de la configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Fichier de configuration illisible
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Document YAML invalide
    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Chemin absent de l'arbre de configuration
    #[error("Path {0} does not exist")]
    PathNotFound(String),

    /// Section présente mais de forme inattendue
    #[error("Invalid configuration section {path}: {message}")]
    InvalidSection { path: String, message: String },

    /// Identifiants Spotify manquants
    #[error("Missing required settings: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),
}

impl ConfigError {
    /// Vrai si l'erreur signale des réglages obligatoires absents
    pub fn is_missing_settings(&self) -> bool {
        matches!(self, ConfigError::MissingCredentials(_))
    }
}
