//! Handing resolved launch configurations to the process launcher

use crate::{
    command::{LaunchCommand, SEPARATOR},
    error::{Error, Result},
    launch::LaunchConfigDescriptor,
    variables::VariableResolver,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const LAUNCH_FAILED_TITLE: &str = "Unable to Launch";
pub const NO_PROJECT_TITLE: &str = "Cannot Find Project";
pub const STORE_FAILED_TITLE: &str = "Unable to Create Launch Configuration";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Run,
    Debug,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Run => f.write_str("run"),
            RunMode::Debug => f.write_str("debug"),
        }
    }
}

/// What a launcher did with a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub command_line: String,
    /// `None` when nothing was spawned or the process was killed by a signal
    pub exit_code: Option<i32>,
    /// False when the process exited with a non-zero code or was killed
    pub success: bool,
}

/// Runs launch configurations
pub trait Launcher: Send + Sync {
    fn launch(&self, descriptor: &LaunchConfigDescriptor, mode: RunMode) -> Result<LaunchReport>;
}

/// Receives user-facing, non-blocking error notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Reports notifications through the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
    }
}

/// Builds the process command line for a configuration
pub struct CommandFactory<'a> {
    program: &'a str,
    workspace_root: &'a Path,
    variables: &'a dyn VariableResolver,
}

impl<'a> CommandFactory<'a> {
    pub fn new(
        program: &'a str,
        workspace_root: &'a Path,
        variables: &'a dyn VariableResolver,
    ) -> Self {
        Self {
            program,
            workspace_root,
            variables,
        }
    }

    /// `<program> <subcommand> <options> [-- <arguments>]` with variables substituted
    /// and the working directory resolved against the workspace root.
    pub fn build(&self, descriptor: &LaunchConfigDescriptor) -> LaunchCommand {
        let mut args = vec![descriptor.kind.subcommand().to_string()];
        args.extend(self.split(&descriptor.options));

        let arguments = self.split(&descriptor.arguments);
        if !arguments.is_empty() {
            args.push(SEPARATOR.to_string());
            args.extend(arguments);
        }

        let mut command = LaunchCommand::new(self.program, args)
            .with_working_dir(self.working_dir(&descriptor.working_directory));
        for (key, value) in &descriptor.environment {
            command = command.with_env(key.clone(), self.variables.resolve_or_keep(value));
        }
        command
    }

    fn split(&self, text: &str) -> Vec<String> {
        self.variables
            .resolve_or_keep(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn working_dir(&self, working_directory: &str) -> PathBuf {
        let resolved = PathBuf::from(self.variables.resolve_or_keep(working_directory));
        if resolved.is_absolute() {
            resolved
        } else {
            self.workspace_root.join(resolved)
        }
    }
}

/// Spawns the configured program and waits for it
pub struct ProcessLauncher {
    program: String,
    workspace_root: PathBuf,
    variables: Box<dyn VariableResolver>,
}

impl ProcessLauncher {
    pub fn new(
        program: impl Into<String>,
        workspace_root: impl Into<PathBuf>,
        variables: Box<dyn VariableResolver>,
    ) -> Self {
        Self {
            program: program.into(),
            workspace_root: workspace_root.into(),
            variables,
        }
    }

    pub fn command_for(&self, descriptor: &LaunchConfigDescriptor) -> LaunchCommand {
        CommandFactory::new(&self.program, &self.workspace_root, self.variables.as_ref())
            .build(descriptor)
    }
}

fn ensure_supported(mode: RunMode) -> Result<()> {
    match mode {
        RunMode::Run => Ok(()),
        RunMode::Debug => Err(Error::UnsupportedMode(mode.to_string())),
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, descriptor: &LaunchConfigDescriptor, mode: RunMode) -> Result<LaunchReport> {
        ensure_supported(mode)?;

        let command = self.command_for(descriptor);
        let command_line = command.to_shell_command();
        info!("Running: {}", command_line);
        if let Some(ref dir) = command.working_dir {
            info!("Working directory: {}", dir.display());
        }

        let status = command
            .execute()
            .map_err(|e| Error::Launch(format!("Failed to execute '{command_line}': {e}")))?;

        Ok(LaunchReport {
            command_line,
            exit_code: status.code(),
            success: status.success(),
        })
    }
}

/// Renders the command line without spawning anything
pub struct DryRunLauncher {
    inner: ProcessLauncher,
}

impl DryRunLauncher {
    pub fn new(inner: ProcessLauncher) -> Self {
        Self { inner }
    }
}

impl Launcher for DryRunLauncher {
    fn launch(&self, descriptor: &LaunchConfigDescriptor, mode: RunMode) -> Result<LaunchReport> {
        ensure_supported(mode)?;

        Ok(LaunchReport {
            command_line: self.inner.command_for(descriptor).to_shell_command(),
            exit_code: None,
            success: true,
        })
    }
}

/// Passes configurations to a launcher and reports failures to the user
pub struct Dispatcher<'a> {
    launcher: &'a dyn Launcher,
    notifier: &'a dyn Notifier,
}

impl<'a> Dispatcher<'a> {
    pub fn new(launcher: &'a dyn Launcher, notifier: &'a dyn Notifier) -> Self {
        Self { launcher, notifier }
    }

    /// Launch once. A failure is notified and returned; it is not retried.
    pub fn run(&self, descriptor: &LaunchConfigDescriptor, mode: RunMode) -> Result<LaunchReport> {
        self.launcher.launch(descriptor, mode).inspect_err(|e| {
            self.notifier.notify(
                LAUNCH_FAILED_TITLE,
                &format!("Unable to launch '{}': {}", descriptor.name, e),
            );
        })
    }
}
