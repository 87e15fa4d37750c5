//! Téléchargement de l'image source

use crate::error::{CoverError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout par défaut des téléchargements
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Client de téléchargement d'images
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Construit un fetcher autour d'un client HTTP existant
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Télécharge `url` et retourne les octets bruts
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        info!("Using image from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CoverError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
