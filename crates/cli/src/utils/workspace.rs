use anyhow::{Context, Result, bail};
use cargo_launch_core::{
    CargoProject, Config, JsonFileStore, LaunchConfigStore, MemoryStore, ProjectHandle,
    ProjectRegistry,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Workspace root, configuration and project registry for one invocation
pub struct WorkspaceContext {
    pub root: PathBuf,
    pub config: Config,
    pub registry: ProjectRegistry,
}

impl WorkspaceContext {
    pub fn load(workspace: Option<&Path>) -> Result<Self> {
        let root = match workspace {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let config = Config::discover(&root)
            .with_context(|| format!("Failed to load configuration for {}", root.display()))?;
        debug!("Workspace root: {}, config: {:?}", root.display(), config);

        Ok(Self {
            registry: ProjectRegistry::new(&root),
            root,
            config,
        })
    }

    /// The store file from the command line, else from the configuration
    pub fn store_path(&self, store: Option<&Path>) -> Option<PathBuf> {
        match store {
            Some(path) => Some(self.root.join(path)),
            None => self.config.store_path(&self.root),
        }
    }

    /// A persistent store when one is configured, otherwise an in-memory one
    pub fn open_store(&self, store: Option<&Path>) -> Box<dyn LaunchConfigStore> {
        match self.store_path(store) {
            Some(path) => {
                debug!("Using launch configuration file {}", path.display());
                Box::new(JsonFileStore::new(path))
            }
            None => {
                debug!("No store configured, launch configurations are not kept");
                Box::new(MemoryStore::new())
            }
        }
    }

    /// The named project, the configured default, or the only project in the workspace
    pub fn project(&self, name: Option<&str>) -> Result<CargoProject> {
        if let Some(name) = name.or(self.config.default_project.as_deref()) {
            return Ok(self.registry.project(name));
        }

        let mut projects = self
            .registry
            .projects()
            .with_context(|| format!("Failed to read workspace {}", self.root.display()))?;
        match projects.len() {
            1 => Ok(projects.remove(0)),
            0 => bail!("No Cargo projects found in {}", self.root.display()),
            _ => bail!(
                "Several projects in {}, choose one with --project: {}",
                self.root.display(),
                projects
                    .iter()
                    .map(|p| p.name().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}
