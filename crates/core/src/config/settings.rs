use crate::{
    command::RunCommand,
    error::{Error, Result},
    launch::LaunchKind,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File names searched for, nearest directory first
pub const CONFIG_FILE_NAMES: [&str; 2] = [".cargo-launch.json", "cargo-launch.json"];

/// `cargo` plus its platform executable name, e.g. `cargo.exe` on Windows
pub fn default_binaries() -> Vec<String> {
    let mut binaries = vec!["cargo".to_string()];
    let suffixed = format!("cargo{}", std::env::consts::EXE_SUFFIX);
    if !binaries.contains(&suffixed) {
        binaries.push(suffixed);
    }
    binaries
}

fn default_kinds() -> Vec<LaunchKind> {
    vec![LaunchKind::CargoTest]
}

fn default_program() -> String {
    "cargo".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Binary names accepted in run commands
    #[serde(default = "default_binaries")]
    pub binaries: Vec<String>,

    /// Launch kinds handled; commands for other subcommands are ignored
    #[serde(default = "default_kinds")]
    pub kinds: Vec<LaunchKind>,

    /// Executable spawned for launches
    #[serde(default = "default_program")]
    pub program: String,

    /// JSON file holding launch configurations, relative to the workspace root.
    /// Without it configurations only live for the current process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,

    /// User variables available as `${name}`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binaries: default_binaries(),
            kinds: default_kinds(),
            program: default_program(),
            store: None,
            variables: BTreeMap::new(),
            default_project: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// The nearest configuration above `start_path`, or the defaults
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Absolute path of the configured store file
    pub fn store_path(&self, workspace_root: &Path) -> Option<PathBuf> {
        self.store.as_ref().map(|store| workspace_root.join(store))
    }

    /// The launch kind for `run_command`, or `None` when the command is not ours:
    /// an unknown binary, or a subcommand without an enabled kind.
    pub fn launch_kind_for(&self, run_command: &RunCommand) -> Option<LaunchKind> {
        if !self.binaries.iter().any(|b| *b == run_command.binary) {
            return None;
        }

        LaunchKind::from_subcommand(run_command.subcommand()?)
            .filter(|kind| self.kinds.contains(kind))
    }
}
