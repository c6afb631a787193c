use crate::command::{ParsedArguments, SEPARATOR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The type of a launch configuration, tied to the cargo subcommand it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchKind {
    CargoTest,
    CargoRun,
}

impl LaunchKind {
    pub const ALL: [LaunchKind; 2] = [LaunchKind::CargoTest, LaunchKind::CargoRun];

    pub fn subcommand(&self) -> &'static str {
        match self {
            LaunchKind::CargoTest => "test",
            LaunchKind::CargoRun => "run",
        }
    }

    pub fn from_subcommand(subcommand: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.subcommand() == subcommand)
    }

    pub fn id(&self) -> &'static str {
        match self {
            LaunchKind::CargoTest => "cargo-test",
            LaunchKind::CargoRun => "cargo-run",
        }
    }
}

impl fmt::Display for LaunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A stored launch configuration.
///
/// `options` and `arguments` are space-joined and may contain `${...}` variables.
/// Descriptors are never updated in place; equivalence is structural.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfigDescriptor {
    pub name: String,
    pub kind: LaunchKind,
    pub project_name: String,
    #[serde(default)]
    pub options: String,
    #[serde(default)]
    pub arguments: String,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default)]
    pub working_directory: String,
}

/// Attributes of a configuration that is about to be created.
///
/// `base_name` is a suggestion; the store turns it into a unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLaunchConfig {
    pub base_name: String,
    pub project_name: String,
    pub options: String,
    pub arguments: String,
    pub environment: BTreeMap<String, String>,
    pub working_directory: String,
}

impl NewLaunchConfig {
    pub fn into_descriptor(self, kind: LaunchKind, name: String) -> LaunchConfigDescriptor {
        LaunchConfigDescriptor {
            name,
            kind,
            project_name: self.project_name,
            options: self.options,
            arguments: self.arguments,
            environment: self.environment,
            working_directory: self.working_directory,
        }
    }
}

/// Human readable label: the project name followed by the command line,
/// e.g. `foo test --lib -- tests::it_works`. Empty parts are left out.
pub fn launch_label(project_name: &str, parsed: &ParsedArguments) -> String {
    let options = parsed.options_string();
    let arguments = parsed.arguments_string();

    let mut segments = vec![project_name, parsed.command.as_str(), options.as_str()];
    if !arguments.is_empty() {
        segments.push(SEPARATOR);
        segments.push(arguments.as_str());
    }

    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
