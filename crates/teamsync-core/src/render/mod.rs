//! Terraform rendering from the group collection
//!
//! This module provides:
//! - `HclBuilder`, an indentation-aware line builder for HCL
//! - Three render modes: flat resources, an outputs block, and the
//!   `teams` map consumed by the teams/folders modules
//! - Static provider and module boilerplate (`templates`)
//!
//! Rendering is a pure function of the group list: output follows group
//! order and is byte-identical for identical input.

pub mod builder;
pub mod flat;
pub mod modules;
pub mod outputs;
pub mod templates;

use crate::directory::Group;
use crate::error::SyncResult;
use crate::naming::check_collisions;
use crate::scaffold::write_file;
use std::path::Path;
use tracing::info;

pub use builder::{quote, HclBuilder};

/// First line of every generated file
pub const GENERATED_HEADER: &str = "Generated by teamsync from directory groups. Manual edits are overwritten.";

/// Which shape of Terraform to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// `grafana_team` + `grafana_team_external_group` per group
    Flat,
    /// A single `team_ids` output over the flat resources
    Outputs,
    /// `locals.teams` map plus teams/folders module invocations
    Modules,
}

impl RenderMode {
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Flat => "flat",
            RenderMode::Outputs => "outputs",
            RenderMode::Modules => "modules",
        }
    }
}

/// Render `groups` in the given mode.
///
/// Fails if two groups normalize to the same resource identifier.
pub fn render(groups: &[Group], mode: RenderMode) -> SyncResult<String> {
    check_collisions(groups)?;

    Ok(match mode {
        RenderMode::Flat => flat::render(groups),
        RenderMode::Outputs => outputs::render(groups),
        RenderMode::Modules => modules::render(groups),
    })
}

/// Render `groups` and replace the contents of `path` with the result
pub fn write_rendered(path: &Path, groups: &[Group], mode: RenderMode) -> SyncResult<()> {
    let content = render(groups, mode)?;
    write_file(path, &content)?;
    info!(
        path = %path.display(),
        mode = mode.name(),
        groups = groups.len(),
        "Generated Terraform file"
    );
    Ok(())
}
