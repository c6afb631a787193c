//! Projects that launch configurations belong to

use cargo_toml::Manifest;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A project as seen by the reconciler
pub trait ProjectHandle {
    fn name(&self) -> &str;

    fn exists(&self) -> bool;

    /// Whether the project is a Cargo project (has a readable manifest)
    fn is_cargo_project(&self) -> bool;

    fn is_usable(&self) -> bool {
        self.exists() && self.is_cargo_project()
    }
}

/// A project directory in the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoProject {
    name: String,
    root: PathBuf,
}

impl CargoProject {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("Cargo.toml")
    }
}

impl ProjectHandle for CargoProject {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self) -> bool {
        !self.root.as_os_str().is_empty() && self.root.is_dir()
    }

    fn is_cargo_project(&self) -> bool {
        if !self.exists() {
            return false;
        }

        let manifest_path = self.manifest_path();
        if !manifest_path.is_file() {
            return false;
        }

        match Manifest::from_path(&manifest_path) {
            Ok(_) => true,
            Err(e) => {
                debug!("Unreadable manifest {}: {}", manifest_path.display(), e);
                false
            }
        }
    }
}

/// Resolves project names to directories under a workspace root
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    workspace_root: PathBuf,
}

impl ProjectRegistry {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }

    /// The project called `name`; whether it is usable is up to the handle.
    ///
    /// Names that are not a single directory name never leave the workspace: the
    /// returned project has no root and is not usable.
    pub fn project(&self, name: &str) -> CargoProject {
        if !is_directory_name(name) {
            warn!("'{}' is not a project directory name", name);
            return CargoProject::new(name, PathBuf::new());
        }
        CargoProject::new(name, self.workspace_root.join(name))
    }

    /// Every usable Cargo project directly under the workspace root
    pub fn projects(&self) -> std::io::Result<Vec<CargoProject>> {
        let mut projects = Vec::new();
        for entry in std::fs::read_dir(&self.workspace_root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let project = self.project(&name);
            if project.is_usable() {
                projects.push(project);
            }
        }
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }
}

/// A single normal path component: no separators, `.`, `..` or roots
fn is_directory_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_package(root: &Path, name: &str) {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(
            dir.join("Cargo.toml"),
            format!("[package]\nname = \"{name}\"\nversion = \"0.1.0\"\nedition = \"2021\"\n"),
        )
        .unwrap();
        fs::write(dir.join("src").join("lib.rs"), "").unwrap();
    }

    #[test]
    fn test_cargo_project_is_usable() {
        let temp_dir = TempDir::new().unwrap();
        write_package(temp_dir.path(), "foo");

        let registry = ProjectRegistry::new(temp_dir.path());
        let project = registry.project("foo");
        assert!(project.exists());
        assert!(project.is_cargo_project());
        assert!(project.is_usable());
    }

    #[test]
    fn test_missing_project() {
        let temp_dir = TempDir::new().unwrap();
        let project = ProjectRegistry::new(temp_dir.path()).project("missing");
        assert!(!project.exists());
        assert!(!project.is_usable());
    }

    #[test]
    fn test_directory_without_manifest_is_not_a_cargo_project() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();

        let project = ProjectRegistry::new(temp_dir.path()).project("docs");
        assert!(project.exists());
        assert!(!project.is_cargo_project());
    }

    #[test]
    fn test_projects_lists_only_cargo_projects() {
        let temp_dir = TempDir::new().unwrap();
        write_package(temp_dir.path(), "beta");
        write_package(temp_dir.path(), "alpha");
        fs::create_dir(temp_dir.path().join("docs")).unwrap();
        fs::write(temp_dir.path().join("README.md"), "").unwrap();

        let names: Vec<String> = ProjectRegistry::new(temp_dir.path())
            .projects()
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn test_names_outside_the_workspace_are_not_projects() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = temp_dir.path().join("workspace");
        fs::create_dir(&workspace).unwrap();
        write_package(temp_dir.path(), "outside");
        write_package(&workspace, "inside");

        let registry = ProjectRegistry::new(&workspace);
        let absolute = temp_dir.path().join("outside");
        for name in ["../outside", absolute.to_str().unwrap(), "inside/src", "..", ".", ""] {
            assert!(!registry.project(name).is_usable(), "name: {name:?}");
        }
        assert!(registry.project("inside").is_usable());
    }
}
