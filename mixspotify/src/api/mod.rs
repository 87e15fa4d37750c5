//! Couche d'accès à l'API REST Spotify
//!
//! Ce module fournit une interface bas-niveau pour communiquer avec l'API
//! Web de Spotify et son serveur d'autorisation.

pub mod auth;
pub mod catalog;
pub mod playlist;

use crate::error::{Result, SpotifyError};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// URL de base de l'API Web Spotify
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// URL de base du serveur d'autorisation
pub const DEFAULT_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";

/// Timeout par défaut des requêtes
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Nombre maximal d'éléments par appel d'ajout à une playlist
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

/// Réglages de la section `spotify` de la configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifySettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_accounts_base")]
    pub accounts_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}
fn default_accounts_base() -> String {
    DEFAULT_ACCOUNTS_BASE.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SpotifySettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            accounts_base: default_accounts_base(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Corps d'erreur de l'API Web : `{"error": {"status": 401, "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Client API bas-niveau pour communiquer avec Spotify
pub struct SpotifyApi {
    /// Client HTTP
    client: Client,
    /// URL de base de l'API Web
    api_base: String,
    /// URL de base du serveur d'autorisation
    accounts_base: String,
    /// Jeton d'accès OAuth
    access_token: Option<String>,
}

impl SpotifyApi {
    /// Crée une nouvelle instance de l'API
    pub fn new(settings: &SpotifySettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            accounts_base: settings.accounts_base.trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    /// Définit le jeton d'accès
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    /// Retourne le jeton d'accès si disponible
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Vérifie si le client dispose d'un jeton d'accès
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub(crate) fn accounts_base(&self) -> &str {
        &self.accounts_base
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base, endpoint)
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match self.access_token {
            Some(ref token) => Ok(request.bearer_auth(token)),
            None => Err(SpotifyError::Unauthorized(
                "no access token, authenticate first".to_string(),
            )),
        }
    }

    /// Effectue une requête GET à l'API
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!("GET {} with {} params", url, params.len());

        let request = self.authorize(self.client.get(&url))?.query(params);
        let response = request.send().await?;
        let text = Self::check_response(response).await?;
        Self::parse(&text)
    }

    /// Effectue une requête POST avec un corps JSON
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!("POST {}", url);

        let request = self.authorize(self.client.post(&url))?.json(body);
        let response = request.send().await?;
        let text = Self::check_response(response).await?;
        Self::parse(&text)
    }

    /// Effectue une requête PUT avec un corps brut
    ///
    /// La réponse (souvent vide) est ignorée.
    pub(crate) async fn put_raw(
        &self,
        endpoint: &str,
        content_type: &str,
        body: String,
    ) -> Result<()> {
        let url = self.url(endpoint);
        debug!("PUT {} ({} bytes, {})", url, body.len(), content_type);

        let request = self
            .authorize(self.client.put(&url))?
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body);
        let response = request.send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Vérifie le statut HTTP et retourne le corps de la réponse
    async fn check_response(response: Response) -> Result<String> {
        let status = response.status();
        let status_code = status.as_u16();

        debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or(error_text);
            warn!("API error ({}): {}", status_code, message);
            return Err(SpotifyError::from_status_code(status_code, message));
        }

        Ok(response.text().await?)
    }

    fn parse<T: DeserializeOwned>(text: &str) -> Result<T> {
        serde_json::from_str(text).map_err(|e| {
            warn!("Failed to parse response: {}", e);
            SpotifyError::JsonParse(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_creation() {
        let api = SpotifyApi::new(&SpotifySettings::default()).unwrap();
        assert!(!api.is_authenticated());
        assert_eq!(api.url("/me"), "https://api.spotify.com/v1/me");
    }

    #[test]
    fn test_set_access_token() {
        let mut api = SpotifyApi::new(&SpotifySettings::default()).unwrap();
        api.set_access_token("token");
        assert_eq!(api.access_token(), Some("token"));
        assert!(api.is_authenticated());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let settings = SpotifySettings {
            api_base: "http://localhost:1234/v1/".into(),
            ..SpotifySettings::default()
        };
        let api = SpotifyApi::new(&settings).unwrap();
        assert_eq!(api.url("/search"), "http://localhost:1234/v1/search");
    }
}
