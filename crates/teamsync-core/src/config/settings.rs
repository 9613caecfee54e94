//! Settings file parsing and environment overrides

use crate::error::{SyncError, SyncResult};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Default directory backend
pub const DEFAULT_PROVIDER: &str = "azure";

/// Default Microsoft Graph endpoint (public cloud)
pub const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com";

/// Default Azure AD login endpoint (public cloud)
pub const DEFAULT_LOGIN_ENDPOINT: &str = "https://login.microsoftonline.com";

/// Prefix for environment variables that override file settings
pub const ENV_PREFIX: &str = "TEAMSYNC";

/// Top-level settings (config.yaml)
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Name of the directory backend to fetch groups from
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Log filter directive, e.g. "info" or "teamsync_core=debug"
    #[serde(default)]
    pub log_level: Option<String>,

    /// Fail the fetch if the server still has pages after this many
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Azure AD / Entra ID credentials
    #[serde(default)]
    pub azure: AzureSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            log_level: None,
            max_pages: None,
            azure: AzureSettings::default(),
        }
    }
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

/// Azure backend settings
#[derive(Clone, Default, Deserialize)]
pub struct AzureSettings {
    #[serde(default)]
    pub tenant_id: String,

    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    /// Override for sovereign clouds
    #[serde(default)]
    pub graph_endpoint: Option<String>,

    /// Override for sovereign clouds
    #[serde(default)]
    pub login_endpoint: Option<String>,
}

impl AzureSettings {
    pub fn graph_endpoint(&self) -> &str {
        self.graph_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GRAPH_ENDPOINT)
    }

    pub fn login_endpoint(&self) -> &str {
        self.login_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_LOGIN_ENDPOINT)
    }

    /// Check that all credential fields are present
    pub fn validate(&self) -> SyncResult<()> {
        let missing: Vec<&str> = [
            ("tenant_id", &self.tenant_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| *key)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SyncError::Config(format!(
                "missing azure settings: {}",
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for AzureSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureSettings")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("graph_endpoint", &self.graph_endpoint)
            .field("login_endpoint", &self.login_endpoint)
            .finish()
    }
}

impl Settings {
    /// Load settings from a YAML file, then apply environment overrides
    pub fn load(path: &Path) -> SyncResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!("failed to read config file {}: {}", path.display(), e))
        })?;
        let mut settings = Self::from_yaml(&content)?;
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> SyncResult<Self> {
        // An empty file is a valid, all-defaults config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}_{}", ENV_PREFIX, name));

        if let Some(provider) = var("PROVIDER") {
            self.provider = provider;
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = Some(level);
        }
        if let Some(tenant_id) = var("AZURE_TENANT_ID") {
            self.azure.tenant_id = tenant_id;
        }
        if let Some(client_id) = var("AZURE_CLIENT_ID") {
            self.azure.client_id = client_id;
        }
        if let Some(client_secret) = var("AZURE_CLIENT_SECRET") {
            self.azure.client_secret = client_secret;
        }
    }
}
