use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRequest<'a> {
    auth_code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Token pair issued for an authorization code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Replacement access token issued for a refresh token. The backend does not
/// rotate the refresh token, so none is returned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshGrant {
    pub access_token: String,
    pub expires_in: i64,
}

/// Client for the token backend that performs the actual exchange against
/// the identity provider on our behalf.
#[derive(Debug, Clone)]
pub struct TokenBackend {
    base_url: String,
}

impl TokenBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::backend_api_url())
    }

    /// Exchanges a one-time authorization code for a token pair.
    ///
    /// The code is single-use against the backend; a failed exchange burns
    /// it and the user has to go through the login redirect again.
    pub async fn exchange_code(&self, auth_code: &str) -> Result<AccessGrant, reqwest::Error> {
        let client = Client::new();
        let res = client
            .post(format!("{}/getAccess", self.base_url))
            .json(&ExchangeRequest { auth_code })
            .send()
            .await?
            .error_for_status()?;

        res.json::<AccessGrant>().await
    }

    /// Obtains a fresh access token for a stored refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshGrant, reqwest::Error> {
        let client = Client::new();
        let res = client
            .post(format!("{}/refresh", self.base_url))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?
            .error_for_status()?;

        res.json::<RefreshGrant>().await
    }
}
