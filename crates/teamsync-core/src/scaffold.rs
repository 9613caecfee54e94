//! Terraform project scaffolding
//!
//! Lays out a root module plus one child module per kind:
//!
//! ```text
//! <base>/main.tf
//! <base>/terraform.tf
//! <base>/modules/teams/{main.tf,terraform.tf}
//! <base>/modules/folders/{main.tf,terraform.tf}
//! ```
//!
//! Every file is fully overwritten on each run; directories are created
//! if missing.

use crate::directory::Group;
use crate::error::{SyncError, SyncResult};
use crate::render::templates::{
    module_terraform, FOLDERS_MODULE_MAIN, ROOT_TERRAFORM, TEAMS_MODULE_MAIN,
};
use crate::render::{self, RenderMode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the directory holding child modules
pub const MODULES_DIR: &str = "modules";

/// A child module and the static `main.tf` it ships with
#[derive(Debug, Clone, Copy)]
pub struct ModuleTemplate {
    pub name: &'static str,
    pub main: &'static str,
}

/// Child modules created under `modules/`, in write order
pub const MODULES: &[ModuleTemplate] = &[
    ModuleTemplate {
        name: "teams",
        main: TEAMS_MODULE_MAIN,
    },
    ModuleTemplate {
        name: "folders",
        main: FOLDERS_MODULE_MAIN,
    },
];

/// Builds the Terraform tree under a base directory
#[derive(Debug, Clone)]
pub struct ScaffoldBuilder {
    base_dir: PathBuf,
}

impl ScaffoldBuilder {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.base_dir.join(MODULES_DIR).join(module)
    }

    /// Every file the scaffold writes, paired with its content
    pub fn files(&self, groups: &[Group]) -> SyncResult<Vec<(PathBuf, String)>> {
        let mut files = vec![
            (
                self.base_dir.join("main.tf"),
                render::render(groups, RenderMode::Modules)?,
            ),
            (self.base_dir.join("terraform.tf"), ROOT_TERRAFORM.to_string()),
        ];

        for module in MODULES {
            let dir = self.module_dir(module.name);
            files.push((dir.join("main.tf"), module.main.to_string()));
            files.push((dir.join("terraform.tf"), module_terraform(module.name)));
        }

        Ok(files)
    }

    /// Create the directory skeleton and write all files.
    ///
    /// Returns the written paths in write order. Rendering happens before
    /// anything touches the disk, so a render failure writes nothing.
    pub fn build(&self, groups: &[Group]) -> SyncResult<Vec<PathBuf>> {
        let files = self.files(groups)?;

        ensure_dir(&self.base_dir)?;
        ensure_dir(&self.base_dir.join(MODULES_DIR))?;
        for module in MODULES {
            ensure_dir(&self.module_dir(module.name))?;
        }

        let mut written = Vec::with_capacity(files.len());
        for (path, content) in files {
            write_file(&path, &content)?;
            written.push(path);
        }

        info!(
            base_dir = %self.base_dir.display(),
            files = written.len(),
            groups = groups.len(),
            "Terraform structure created/updated"
        );

        Ok(written)
    }
}

/// Create `dir` and its parents; an existing directory is fine
pub fn ensure_dir(dir: &Path) -> SyncResult<()> {
    fs::create_dir_all(dir).map_err(|source| SyncError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Replace the contents of `path` with `content`, creating it if needed
pub fn write_file(path: &Path, content: &str) -> SyncResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let existed = path.exists();
    fs::write(path, content).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        action = if existed { "updated" } else { "created" },
        "Wrote file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkdir::WalkDir;

    fn groups() -> Vec<Group> {
        vec![Group::new("Ops", "g1"), Group::new("Platform Engineering", "g2")]
    }

    fn relative_files(base: &Path) -> Vec<String> {
        let mut files: Vec<String> = WalkDir::new(base)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(base)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_build_creates_tree() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("grafana");

        let written = ScaffoldBuilder::new(&base).build(&groups()).unwrap();

        assert_eq!(written.len(), 6);
        assert_eq!(written[0], base.join("main.tf"));
        assert_eq!(
            relative_files(&base),
            vec![
                "main.tf",
                "modules/folders/main.tf",
                "modules/folders/terraform.tf",
                "modules/teams/main.tf",
                "modules/teams/terraform.tf",
                "terraform.tf",
            ]
        );

        let main = fs::read_to_string(base.join("main.tf")).unwrap();
        assert!(main.contains("\"platform_engineering\" = {"));
        assert_eq!(
            fs::read_to_string(base.join("modules/teams/main.tf")).unwrap(),
            TEAMS_MODULE_MAIN
        );
        assert!(fs::read_to_string(base.join("modules/folders/terraform.tf"))
            .unwrap()
            .contains("for folders module"));
    }

    #[test]
    fn test_build_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ScaffoldBuilder::new(dir.path());

        builder.build(&groups()).unwrap();
        fs::write(dir.path().join("main.tf"), "# edited by hand\n").unwrap();
        fs::write(builder.module_dir("teams").join("main.tf"), "junk").unwrap();

        builder.build(&[Group::new("Ops", "g1")]).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("main.tf")).unwrap(),
            render::render(&[Group::new("Ops", "g1")], RenderMode::Modules).unwrap()
        );
        assert_eq!(
            fs::read_to_string(builder.module_dir("teams").join("main.tf")).unwrap(),
            TEAMS_MODULE_MAIN
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ScaffoldBuilder::new(dir.path());

        builder.build(&groups()).unwrap();
        let first = fs::read_to_string(dir.path().join("main.tf")).unwrap();
        builder.build(&groups()).unwrap();
        let second = fs::read_to_string(dir.path().join("main.tf")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_with_no_groups() {
        let dir = tempfile::tempdir().unwrap();
        ScaffoldBuilder::new(dir.path()).build(&[]).unwrap();
        let main = fs::read_to_string(dir.path().join("main.tf")).unwrap();
        assert!(main.contains("teams = {}"));
    }

    #[test]
    fn test_render_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("grafana");
        let clashing = vec![Group::new("Ops", "g1"), Group::new("OPS", "g2")];

        assert!(ScaffoldBuilder::new(&base).build(&clashing).is_err());
        assert!(!base.exists());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.tf");
        write_file(&path, "x").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn test_write_file_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should go makes the write fail
        let path = dir.path().join("main.tf");
        fs::create_dir(&path).unwrap();

        let err = write_file(&path, "x").unwrap_err();
        assert!(matches!(err, SyncError::Write { .. }));
        assert!(err.to_string().contains("main.tf"));
    }
}
