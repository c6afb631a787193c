//! Reconciliation of run commands with stored launch configurations
//!
//! A run command either matches an existing configuration, which is reused as is,
//! or a new configuration is created for it. Existing configurations are never
//! modified.
//!
//! Enumeration and creation are separate store calls, so two reconciliations of the
//! same new command running at the same time can both create a configuration.
//! Callers that need exactly one must not reconcile concurrently.
//!
//! Options and arguments are stored joined by spaces and split on whitespace when
//! compared, so a token that itself contains whitespace never matches its stored
//! form. Such commands get a new configuration every time.

use crate::{
    command::{ParsedArguments, RunCommand},
    error::{Error, Result},
    launch::{LaunchConfigDescriptor, LaunchConfigStore, LaunchKind, NewLaunchConfig, launch_label},
    project::ProjectHandle,
    variables::VariableResolver,
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub struct Reconciler<'a> {
    store: &'a dyn LaunchConfigStore,
    variables: &'a dyn VariableResolver,
}

impl<'a> Reconciler<'a> {
    pub fn new(store: &'a dyn LaunchConfigStore, variables: &'a dyn VariableResolver) -> Self {
        Self { store, variables }
    }

    /// Find or create the `kind` configuration for `run_command` in `project`
    pub fn reconcile(
        &self,
        kind: LaunchKind,
        run_command: &RunCommand,
        project: &dyn ProjectHandle,
    ) -> Result<LaunchConfigDescriptor> {
        if !project.is_usable() {
            return Err(Error::NoUsableProject(project.name().to_string()));
        }

        let parsed = ParsedArguments::classify(&run_command.args);
        debug!(
            "Reconciling {} for project '{}': options={:?} arguments={:?}",
            kind,
            project.name(),
            parsed.options,
            parsed.arguments
        );
        let spaced = parsed.tokens_with_whitespace();
        if !spaced.is_empty() {
            warn!(
                "Tokens containing whitespace are split when stored, this command will not be reused: {:?}",
                spaced
            );
        }

        if let Some(existing) = self.find_existing(kind, &parsed, &run_command.env, project.name())? {
            info!("Reusing launch configuration '{}'", existing.name);
            return Ok(existing);
        }

        let descriptor = self.store.create(kind, new_launch_config(&parsed, run_command, project))?;
        info!("Created launch configuration '{}'", descriptor.name);
        Ok(descriptor)
    }

    /// The first stored configuration equivalent to the parsed command
    pub fn find_existing(
        &self,
        kind: LaunchKind,
        parsed: &ParsedArguments,
        env: &BTreeMap<String, String>,
        project_name: &str,
    ) -> Result<Option<LaunchConfigDescriptor>> {
        let candidates = self.store.enumerate(kind)?;
        debug!("Checking {} existing {} configurations", candidates.len(), kind);

        Ok(candidates
            .into_iter()
            .find(|candidate| self.matches(candidate, parsed, env, project_name)))
    }

    /// Whether `descriptor` runs the same command: same project, same options and
    /// arguments after substitution, and every required environment entry present
    /// with an equal value. Extra environment entries are allowed.
    ///
    /// Stored options and arguments are split on whitespace, so `parsed` tokens
    /// containing whitespace never match.
    pub fn matches(
        &self,
        descriptor: &LaunchConfigDescriptor,
        parsed: &ParsedArguments,
        env: &BTreeMap<String, String>,
        project_name: &str,
    ) -> bool {
        descriptor.project_name == project_name
            && self.split(&descriptor.options) == parsed.options
            && self.split(&descriptor.arguments) == parsed.arguments
            && env.iter().all(|(key, value)| {
                descriptor
                    .environment
                    .get(key)
                    .is_some_and(|stored| self.variables.resolve_or_keep(stored) == *value)
            })
    }

    fn split(&self, text: &str) -> Vec<String> {
        self.variables
            .resolve_or_keep(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

fn new_launch_config(
    parsed: &ParsedArguments,
    run_command: &RunCommand,
    project: &dyn ProjectHandle,
) -> NewLaunchConfig {
    NewLaunchConfig {
        base_name: launch_label(project.name(), parsed),
        project_name: project.name().to_string(),
        options: parsed.options_string(),
        arguments: parsed.arguments_string(),
        environment: run_command.env.clone(),
        working_directory: project.name().to_string(),
    }
}
