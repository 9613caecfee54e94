//! Azure AD / Entra ID backend.
//!
//! Acquires an app-only token with the OAuth2 client credentials flow, then
//! lists groups through Microsoft Graph.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::graph::{GraphClient, USER_AGENT};
use super::pagination::fetch_all_groups;
use super::{DirectoryProvider, Group};
use crate::config::AzureSettings;
use crate::error::{SyncError, SyncResult};

/// Provider name in the config file.
pub const PROVIDER_NAME: &str = "azure";

/// OAuth2 token response from Azure AD.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Directory backend for Azure AD tenants.
#[derive(Debug)]
pub struct AzureProvider {
    settings: AzureSettings,
    max_pages: Option<usize>,
    http_client: reqwest::Client,
}

impl AzureProvider {
    /// Creates a provider from settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if credentials are missing, or an
    /// authentication error if the HTTP client cannot be built.
    pub fn from_settings(settings: &AzureSettings, max_pages: Option<usize>) -> SyncResult<Self> {
        settings.validate()?;

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SyncError::Auth(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            settings: settings.clone(),
            max_pages,
            http_client,
        })
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.settings.login_endpoint().trim_end_matches('/'),
            self.settings.tenant_id
        )
    }

    /// Acquires an access token and returns a Graph client that uses it.
    #[instrument(skip(self), fields(tenant_id = %self.settings.tenant_id))]
    pub async fn authenticate(&self) -> SyncResult<GraphClient> {
        let scope = format!(
            "{}/.default",
            self.settings.graph_endpoint().trim_end_matches('/')
        );
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("scope", scope.as_str()),
        ];

        let response = self
            .http_client
            .post(self.token_url())
            .form(&params)
            .send()
            .await
            .map_err(|e| SyncError::Auth(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SyncError::Auth(format!("Failed to parse token response: {e}")))?;

        debug!("Acquired access token");

        GraphClient::new(
            self.http_client.clone(),
            self.settings.graph_endpoint(),
            token.access_token,
        )
    }
}

#[async_trait]
impl DirectoryProvider for AzureProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch_all_groups(&self) -> SyncResult<Vec<Group>> {
        let client = self.authenticate().await?;
        fetch_all_groups(&client, self.max_pages).await
    }
}
