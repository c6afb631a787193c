//! cargo-launch - Turn language server run commands into reusable launch configurations
//!
//! This crate provides functionality to:
//! - Decode `rust-analyzer.runSingle` style command payloads into typed run commands
//! - Split cargo argument vectors into command, options and test binary arguments
//! - Find an equivalent stored launch configuration or create a new one
//! - Launch the configuration and report failures to the user
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod launch;
pub mod project;
pub mod reconcile;
pub mod variables;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use command::{CommandInvocation, LaunchCommand, ParsedArguments, RunCommand};
pub use config::Config;
pub use dispatch::{
    DryRunLauncher, Dispatcher, LaunchReport, Launcher, Notifier, ProcessLauncher, RunMode,
    TracingNotifier,
};
pub use handler::{HandleOutcome, IgnoreReason, RunCommandHandler};
pub use launch::{
    JsonFileStore, LaunchConfigDescriptor, LaunchConfigStore, LaunchKind, MemoryStore,
};
pub use project::{CargoProject, ProjectHandle, ProjectRegistry};
pub use reconcile::Reconciler;
pub use variables::{DefaultVariableResolver, VariableResolver};
