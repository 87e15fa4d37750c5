//! Gestion des erreurs pour le client Spotify

use thiserror::Error;

/// Type Result personnalisé pour mixspotify
pub type Result<T> = std::result::Result<T, SpotifyError>;

/// Erreurs possibles lors de l'utilisation du client Spotify
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Erreur d'authentification (jeton invalide ou expiré)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Ressource non trouvée (playlist, utilisateur, etc.)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Erreur HTTP
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Erreur de parsing JSON
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Erreur de lecture de la configuration
    #[error("Configuration error: {0}")]
    Config(#[from] mixconfig::ConfigError),

    /// Configuration Spotify incomplète (refresh token, etc.)
    #[error("Spotify configuration error: {0}")]
    Configuration(String),

    /// Requête refusée avant envoi (trop d'éléments, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Erreur de l'API Spotify
    #[error("Spotify API error (code {code}): {message}")]
    ApiError { code: u16, message: String },

    /// Quota dépassé (rate limiting)
    #[error("Rate limit exceeded, please try again later")]
    RateLimitExceeded,
}

impl SpotifyError {
    /// Crée une erreur API depuis un code de statut HTTP et un message
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            401 | 403 => Self::Unauthorized(message.into()),
            404 => Self::NotFound(message.into()),
            429 => Self::RateLimitExceeded,
            _ => Self::ApiError {
                code,
                message: message.into(),
            },
        }
    }

    /// Vérifie si l'erreur est une erreur d'authentification
    pub fn is_auth_error(&self) -> bool {
        matches!(self, SpotifyError::Unauthorized(_))
    }

    /// Vérifie si l'erreur est une erreur de rate limiting
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, SpotifyError::RateLimitExceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_code() {
        assert!(SpotifyError::from_status_code(401, "expired").is_auth_error());
        assert!(SpotifyError::from_status_code(403, "scope").is_auth_error());
        assert!(matches!(
            SpotifyError::from_status_code(404, "x"),
            SpotifyError::NotFound(_)
        ));
        assert!(SpotifyError::from_status_code(429, "slow down").is_rate_limit());
        assert!(matches!(
            SpotifyError::from_status_code(500, "boom"),
            SpotifyError::ApiError { code: 500, .. }
        ));
    }
}
