//! Module d'authentification OAuth (grant `refresh_token`)

use super::SpotifyApi;
use crate::error::{Result, SpotifyError};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Réponse de l'endpoint /api/token
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
}

/// Corps d'erreur du serveur d'autorisation
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Jeton obtenu auprès du serveur d'autorisation
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    /// Durée de validité en secondes
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

impl SpotifyApi {
    /// Échange un refresh token contre un jeton d'accès et le mémorise
    ///
    /// # Errors
    ///
    /// * `SpotifyError::Unauthorized` - refresh token révoqué ou identifiants invalides
    pub async fn refresh_access_token(
        &mut self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<AccessToken> {
        let url = format!("{}/api/token", self.accounts_base());
        info!("Refreshing Spotify access token");
        debug!("POST {}", url);

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .http()
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(body) => match body.error_description {
                    Some(desc) => format!("{}: {}", body.error, desc),
                    None => body.error,
                },
                Err(_) => text,
            };
            warn!("Token refresh failed ({}): {}", status.as_u16(), message);
            return Err(match status.as_u16() {
                400 | 401 | 403 => SpotifyError::Unauthorized(message),
                code => SpotifyError::from_status_code(code, message),
            });
        }

        let token: TokenResponse = serde_json::from_str(&text)?;
        debug!(
            "Token refreshed - type: {:?}, expires in: {:?}s",
            token.token_type, token.expires_in
        );

        self.set_access_token(token.access_token.clone());

        Ok(AccessToken {
            token: token.access_token,
            expires_in: token.expires_in,
            scope: token.scope,
        })
    }
}
