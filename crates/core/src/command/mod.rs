//! Run command decoding, argument classification and process command lines

pub mod args;
pub mod launch_command;
pub mod run_command;

// Re-export commonly used types
pub use args::{ParsedArguments, SEPARATOR};
pub use launch_command::LaunchCommand;
pub use run_command::{CommandInvocation, RUN_SINGLE_COMMAND, RunCommand};
