//! Launch configuration stores
//!
//! The reconciler only ever enumerates and creates configurations; there is no
//! update or delete. Creation assigns a unique name.

use super::descriptor::{LaunchConfigDescriptor, LaunchKind, NewLaunchConfig};
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Storage for launch configurations
pub trait LaunchConfigStore: Send + Sync {
    /// All stored configurations of `kind`
    fn enumerate(&self, kind: LaunchKind) -> Result<Vec<LaunchConfigDescriptor>>;

    /// Persist a new configuration of `kind` and return it with its final name
    fn create(&self, kind: LaunchKind, config: NewLaunchConfig) -> Result<LaunchConfigDescriptor>;
}

/// `base` if no existing configuration uses it, otherwise `base (1)`, `base (2)`, ...
pub fn unique_name(base: &str, existing: &[LaunchConfigDescriptor]) -> String {
    let taken = |name: &str| existing.iter().any(|d| d.name == name);
    if !taken(base) {
        return base.to_string();
    }

    (1..)
        .map(|n| format!("{base} ({n})"))
        .find(|candidate| !taken(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}

/// Non-persistent store; configurations live as long as the store
#[derive(Debug, Default)]
pub struct MemoryStore {
    descriptors: Mutex<Vec<LaunchConfigDescriptor>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptors(descriptors: Vec<LaunchConfigDescriptor>) -> Self {
        Self {
            descriptors: Mutex::new(descriptors),
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LaunchConfigStore for MemoryStore {
    fn enumerate(&self, kind: LaunchKind) -> Result<Vec<LaunchConfigDescriptor>> {
        let descriptors = self
            .descriptors
            .lock()
            .map_err(|e| Error::Store(format!("Store lock poisoned: {e}")))?;
        Ok(descriptors.iter().filter(|d| d.kind == kind).cloned().collect())
    }

    fn create(&self, kind: LaunchKind, config: NewLaunchConfig) -> Result<LaunchConfigDescriptor> {
        let mut descriptors = self
            .descriptors
            .lock()
            .map_err(|e| Error::Store(format!("Store lock poisoned: {e}")))?;

        let name = unique_name(&config.base_name, &descriptors);
        let descriptor = config.into_descriptor(kind, name);
        descriptors.push(descriptor.clone());
        Ok(descriptor)
    }
}

/// Store backed by a single JSON file holding every configuration.
///
/// The file is re-read on each call, so several stores may point at the same path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Every stored configuration regardless of kind; a missing file is empty
    pub fn load_all(&self) -> Result<Vec<LaunchConfigDescriptor>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            Error::Store(format!(
                "Failed to parse launch configurations in {}: {e}",
                self.path.display()
            ))
        })
    }

    fn save_all(&self, descriptors: &[LaunchConfigDescriptor]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Replace the file in one step so readers never see a partial store
        let contents = serde_json::to_string_pretty(descriptors)?;
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        std::fs::write(&staging, contents)?;
        std::fs::rename(&staging, &self.path).inspect_err(|_| {
            let _ = std::fs::remove_file(&staging);
        })?;
        Ok(())
    }
}

impl LaunchConfigStore for JsonFileStore {
    fn enumerate(&self, kind: LaunchKind) -> Result<Vec<LaunchConfigDescriptor>> {
        let descriptors = self.load_all()?;
        Ok(descriptors.into_iter().filter(|d| d.kind == kind).collect())
    }

    fn create(&self, kind: LaunchKind, config: NewLaunchConfig) -> Result<LaunchConfigDescriptor> {
        let mut descriptors = self.load_all()?;

        let name = unique_name(&config.base_name, &descriptors);
        let descriptor = config.into_descriptor(kind, name);
        descriptors.push(descriptor.clone());
        self.save_all(&descriptors)?;

        debug!(
            "Saved launch configuration '{}' to {}",
            descriptor.name,
            self.path.display()
        );
        Ok(descriptor)
    }
}
