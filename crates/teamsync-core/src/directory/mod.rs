//! Directory groups and the backends that fetch them
//!
//! This module provides:
//! - The `Group` record shared by every backend
//! - The `DirectoryProvider` capability, one implementation per backend
//! - The continuation-link pagination loop (`pagination`)
//! - The Azure AD / Microsoft Graph backend (`azure`, `graph`)

pub mod azure;
pub mod graph;
pub mod pagination;

use crate::config::Settings;
use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;

pub use azure::AzureProvider;
pub use graph::GraphClient;
pub use pagination::{fetch_all_groups, PageSource};

/// A directory group: display name plus the directory-assigned object id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Display name (not unique, not syntax-safe)
    pub name: String,

    /// Stable directory key
    pub identifier: String,
}

impl Group {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
        }
    }
}

/// One batch of groups plus the link to the next batch, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPage {
    pub groups: Vec<Group>,
    pub next_link: Option<String>,
}

/// A directory backend that can list every group it knows about
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Provider name as written in the config file
    fn name(&self) -> &'static str;

    /// Fetch the complete group collection, in server order
    async fn fetch_all_groups(&self) -> SyncResult<Vec<Group>>;
}

/// Build the backend selected by `settings.provider`
pub fn provider_from_settings(settings: &Settings) -> SyncResult<Box<dyn DirectoryProvider>> {
    if settings.max_pages == Some(0) {
        return Err(SyncError::Config(
            "max_pages must be at least 1".to_string(),
        ));
    }

    match settings.provider.as_str() {
        azure::PROVIDER_NAME => Ok(Box::new(AzureProvider::from_settings(
            &settings.azure,
            settings.max_pages,
        )?)),
        other => Err(SyncError::UnsupportedProvider(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AzureSettings;

    fn azure_settings() -> AzureSettings {
        AzureSettings {
            tenant_id: "tenant".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_azure_provider_selected() {
        let settings = Settings {
            azure: azure_settings(),
            ..Default::default()
        };
        let provider = provider_from_settings(&settings).unwrap();
        assert_eq!(provider.name(), "azure");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let settings = Settings {
            provider: "ldap".to_string(),
            azure: azure_settings(),
            ..Default::default()
        };
        let err = provider_from_settings(&settings).err().unwrap();
        assert!(matches!(err, SyncError::UnsupportedProvider(ref p) if p == "ldap"));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let settings = Settings::default();
        let err = provider_from_settings(&settings).err().unwrap();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let settings = Settings {
            max_pages: Some(0),
            azure: azure_settings(),
            ..Default::default()
        };
        assert!(matches!(
            provider_from_settings(&settings).err().unwrap(),
            SyncError::Config(_)
        ));
    }
}
