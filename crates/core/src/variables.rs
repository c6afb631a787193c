//! `${...}` variable substitution in launch configuration attributes
//!
//! Supported variables:
//! - `${workspace_loc}` and `${workspace_loc:/path}`
//! - `${project_loc:name}`
//! - `${env_var:NAME}`
//! - any user variable from the configuration, e.g. `${test_threads}`

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

/// Substitutes variables in strings
pub trait VariableResolver: Send + Sync {
    /// Replace every variable in `text`; fails if any variable cannot be resolved
    fn substitute(&self, text: &str) -> Result<String>;

    /// Like [`substitute`](Self::substitute), but leaves `text` untouched on failure
    fn resolve_or_keep(&self, text: &str) -> String {
        match self.substitute(text) {
            Ok(resolved) => resolved,
            Err(e) => {
                debug!("Leaving '{}' unresolved: {}", text, e);
                text.to_string()
            }
        }
    }
}

static VARIABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_.\-]*)(?::([^}]*))?\}")
        .expect("Failed to create VARIABLE_REGEX")
});

/// Resolves workspace, project, environment and user variables
#[derive(Debug, Clone, Default)]
pub struct DefaultVariableResolver {
    workspace_root: PathBuf,
    user_variables: BTreeMap<String, String>,
}

impl DefaultVariableResolver {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            user_variables: BTreeMap::new(),
        }
    }

    pub fn with_variables(mut self, variables: BTreeMap<String, String>) -> Self {
        self.user_variables.extend(variables);
        self
    }

    fn location(&self, relative: Option<&str>) -> String {
        match relative.map(|r| r.trim_start_matches(['/', '\\'])) {
            Some(relative) if !relative.is_empty() => {
                self.workspace_root.join(relative).display().to_string()
            }
            _ => self.workspace_root.display().to_string(),
        }
    }

    fn resolve(&self, name: &str, argument: Option<&str>) -> Result<String> {
        match (name, argument) {
            ("workspace_loc", argument) => Ok(self.location(argument)),
            ("project_loc", Some(project)) => Ok(self.location(Some(project))),
            ("env_var", Some(key)) => std::env::var(key)
                .map_err(|e| Error::Variable(format!("environment variable '{key}': {e}"))),
            (name, None) => self
                .user_variables
                .get(name)
                .cloned()
                .ok_or_else(|| Error::Variable(format!("undefined variable '{name}'"))),
            (name, Some(argument)) => Err(Error::Variable(format!(
                "undefined variable '{name}' with argument '{argument}'"
            ))),
        }
    }
}

impl VariableResolver for DefaultVariableResolver {
    fn substitute(&self, text: &str) -> Result<String> {
        let mut failure = None;
        let resolved = VARIABLE_REGEX.replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let argument = caps.get(2).map(|m| m.as_str());
            match self.resolve(name, argument) {
                Ok(value) => value,
                Err(e) => {
                    failure.get_or_insert(e);
                    caps[0].to_string()
                }
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(resolved.into_owned()),
        }
    }
}
