//! The run command pipeline: decode, gate, reconcile, dispatch

use crate::{
    command::{CommandInvocation, RunCommand},
    config::Config,
    dispatch::{
        Dispatcher, LaunchReport, Launcher, NO_PROJECT_TITLE, Notifier, RunMode,
        STORE_FAILED_TITLE,
    },
    error::{Error, Result},
    launch::{LaunchConfigDescriptor, LaunchConfigStore, LaunchKind},
    project::ProjectHandle,
    reconcile::Reconciler,
    variables::VariableResolver,
};
use tracing::{debug, warn};

/// Why a command was not handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The payload is not a run command
    Undecodable,
    /// The binary or subcommand is not one this handler launches
    OutOfScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    Ignored(IgnoreReason),
    Launched {
        descriptor: LaunchConfigDescriptor,
        report: LaunchReport,
    },
}

/// Handles run commands coming from the language server.
///
/// Failures are reported to the notifier once and returned; nothing is launched
/// after a failure.
pub struct RunCommandHandler {
    config: Config,
    store: Box<dyn LaunchConfigStore>,
    variables: Box<dyn VariableResolver>,
    launcher: Box<dyn Launcher>,
    notifier: Box<dyn Notifier>,
}

impl RunCommandHandler {
    pub fn new(
        config: Config,
        store: Box<dyn LaunchConfigStore>,
        variables: Box<dyn VariableResolver>,
        launcher: Box<dyn Launcher>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            store,
            variables,
            launcher,
            notifier,
        }
    }

    pub fn store(&self) -> &dyn LaunchConfigStore {
        self.store.as_ref()
    }

    pub fn handle(
        &self,
        invocation: &CommandInvocation,
        project: &dyn ProjectHandle,
    ) -> Result<HandleOutcome> {
        let Some(run_command) = RunCommand::decode(invocation) else {
            return Ok(HandleOutcome::Ignored(IgnoreReason::Undecodable));
        };
        self.handle_run_command(&run_command, project)
    }

    pub fn handle_run_command(
        &self,
        run_command: &RunCommand,
        project: &dyn ProjectHandle,
    ) -> Result<HandleOutcome> {
        let Some(kind) = self.config.launch_kind_for(run_command) else {
            debug!(
                "Ignoring out of scope command: {} {:?}",
                run_command.binary, run_command.args
            );
            return Ok(HandleOutcome::Ignored(IgnoreReason::OutOfScope));
        };

        let descriptor = self.resolve(kind, run_command, project)?;

        let dispatcher = Dispatcher::new(self.launcher.as_ref(), self.notifier.as_ref());
        let report = dispatcher.run(&descriptor, RunMode::Run)?;
        if !report.success {
            warn!("'{}' exited with {:?}", descriptor.name, report.exit_code);
        }

        Ok(HandleOutcome::Launched { descriptor, report })
    }

    fn resolve(
        &self,
        kind: LaunchKind,
        run_command: &RunCommand,
        project: &dyn ProjectHandle,
    ) -> Result<LaunchConfigDescriptor> {
        Reconciler::new(self.store.as_ref(), self.variables.as_ref())
            .reconcile(kind, run_command, project)
            .inspect_err(|e| match e {
                Error::NoUsableProject(name) => self.notifier.notify(
                    NO_PROJECT_TITLE,
                    &format!("'{name}' is not a Cargo project in the workspace"),
                ),
                other => self.notifier.notify(
                    STORE_FAILED_TITLE,
                    &format!("Unable to create a launch configuration: {other}"),
                ),
            })
    }
}
