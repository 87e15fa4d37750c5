//! Erreurs fatales de l'assemblage d'une playlist

use mixspotify::SpotifyError;
use thiserror::Error;

/// Type Result personnalisé pour mixplaylist
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Erreurs qui interrompent une exécution
///
/// Les échecs du flux et de la couverture sont journalisés et absorbés ;
/// seules les erreurs du catalogue remontent jusqu'à l'appelant.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// Échec d'un appel au catalogue (réseau, authentification, API)
    #[error("Catalog error: {0}")]
    Catalog(#[from] SpotifyError),
}

impl AssemblyError {
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Catalog(e) => e.is_auth_error(),
        }
    }
}
