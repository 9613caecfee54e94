//! Teamsync Core - directory group sync and Grafana Terraform generation
//!
//! Fetches every group from a directory backend (Azure AD via Microsoft
//! Graph today) and turns the list into Terraform that provisions a
//! matching Grafana team, external-group link and folder per group.
//!
//! # Architecture
//!
//! - **directory**: `Group`, the `DirectoryProvider` capability, and the
//!   continuation-link pagination loop shared by backends
//! - **cache**: `GroupCache`, so several commands in one run share a fetch
//! - **naming**: resource identifiers derived from display names
//! - **render**: flat, outputs and module-map Terraform renderers
//! - **scaffold**: the root + child module directory tree
//! - **config**: YAML settings with `TEAMSYNC_*` environment overrides
//!
//! # Example Usage
//!
//! ```ignore
//! use teamsync_core::{directory, render, GroupCache, RenderMode, Settings};
//!
//! let settings = Settings::load("config.yaml".as_ref())?;
//! let provider = directory::provider_from_settings(&settings)?;
//! let mut cache = GroupCache::new();
//!
//! let groups = cache.get_or_fetch(|| provider.fetch_all_groups()).await?;
//! render::write_rendered("grafana_teams.tf".as_ref(), groups, RenderMode::Flat)?;
//! ```

pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod naming;
pub mod render;
pub mod scaffold;

// Re-export main types for convenience
pub use cache::GroupCache;
pub use config::Settings;
pub use directory::{provider_from_settings, DirectoryProvider, Group, GroupPage};
pub use error::{SyncError, SyncResult};
pub use naming::normalize;
pub use render::RenderMode;
pub use scaffold::ScaffoldBuilder;
