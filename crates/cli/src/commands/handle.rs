use anyhow::{Context, Result};
use cargo_launch_core::{
    CommandInvocation, DefaultVariableResolver, DryRunLauncher, HandleOutcome, IgnoreReason,
    Launcher, Notifier, ProcessLauncher, RunCommand, RunCommandHandler,
};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::utils::WorkspaceContext;

/// Prints notifications to stderr
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, title: &str, message: &str) {
        eprintln!("❌ {title}: {message}");
    }
}

pub fn handle_command(
    payload: &str,
    project: Option<&str>,
    workspace: Option<&Path>,
    store: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let invocation = read_invocation(payload)?;
    debug!("Handling command '{}'", invocation.command);

    let context = WorkspaceContext::load(workspace)?;

    // Ignored commands never need a project
    let Some(run_command) = RunCommand::decode(&invocation) else {
        print_ignored(&invocation, IgnoreReason::Undecodable);
        return Ok(());
    };
    if context.config.launch_kind_for(&run_command).is_none() {
        print_ignored(&invocation, IgnoreReason::OutOfScope);
        return Ok(());
    }

    let project = context.project(project)?;

    let variables = DefaultVariableResolver::new(&context.root)
        .with_variables(context.config.variables.clone());
    let process = ProcessLauncher::new(
        context.config.program.clone(),
        &context.root,
        Box::new(variables.clone()),
    );
    let launcher: Box<dyn Launcher> = if dry_run {
        Box::new(DryRunLauncher::new(process))
    } else {
        Box::new(process)
    };

    let handler = RunCommandHandler::new(
        context.config.clone(),
        context.open_store(store),
        Box::new(variables),
        launcher,
        Box::new(StderrNotifier),
    );

    // The notifier has already told the user what went wrong
    let outcome = match handler.handle_run_command(&run_command, &project) {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!("Handling failed: {e}");
            std::process::exit(1);
        }
    };

    match outcome {
        HandleOutcome::Ignored(reason) => print_ignored(&invocation, reason),
        HandleOutcome::Launched { descriptor, report } => {
            if dry_run {
                println!("{}", report.command_line);
                println!("Launch configuration: {}", descriptor.name);
                if !descriptor.environment.is_empty() {
                    println!("Environment variables:");
                    for (key, value) in &descriptor.environment {
                        println!("  {}={}", key, value);
                    }
                }
            } else {
                info!("'{}' finished with {:?}", descriptor.name, report.exit_code);
                if !report.success {
                    std::process::exit(report.exit_code.unwrap_or(1));
                }
            }
        }
    }

    Ok(())
}

fn print_ignored(invocation: &CommandInvocation, reason: IgnoreReason) {
    match reason {
        IgnoreReason::Undecodable => {
            println!("ℹ️  '{}' is not a run command, ignoring", invocation.command);
        }
        IgnoreReason::OutOfScope => {
            println!("ℹ️  Command is not handled by cargo-launch, ignoring");
        }
    }
}

fn read_invocation(payload: &str) -> Result<CommandInvocation> {
    let json = if payload == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read command from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(payload)
            .with_context(|| format!("Failed to read command from {payload}"))?
    };

    CommandInvocation::from_json(&json).context("Command is not a valid LSP command object")
}
