use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{classify_command, handle_command, list_command};

#[derive(Parser)]
#[command(bin_name = "cargo")]
#[command(version, propagate_version = true)]
pub struct Cargo {
    #[command(subcommand)]
    pub command: CargoCommand,
}

#[derive(Subcommand, Debug)]
pub enum CargoCommand {
    #[command(name = "launch")]
    #[command(about = "Launch run commands sent by rust-analyzer")]
    Launch(Launch),
}

#[derive(Parser, Debug)]
#[command(name = "cargo-launch")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Launch {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a language server run command to a launch configuration and run it
    #[command(visible_alias = "h")]
    Handle {
        /// JSON file with the LSP command, or `-` to read it from stdin
        payload: String,

        /// Project the command runs in (defaults to the configured or only project)
        #[arg(short, long)]
        project: Option<String>,

        /// Workspace directory containing the projects (defaults to the current directory)
        #[arg(short, long)]
        workspace: Option<PathBuf>,

        /// Launch configuration file, overriding the configured store
        #[arg(short, long)]
        store: Option<PathBuf>,

        /// Print the command without executing it
        #[arg(short, long)]
        dry_run: bool,
    },
    /// List stored launch configurations
    #[command(visible_alias = "ls")]
    List {
        /// Only show configurations of this project
        #[arg(short, long)]
        project: Option<String>,

        /// Workspace directory containing the projects (defaults to the current directory)
        #[arg(short, long)]
        workspace: Option<PathBuf>,

        /// Launch configuration file, overriding the configured store
        #[arg(short, long)]
        store: Option<PathBuf>,
    },
    /// Show how cargo arguments split into command, options and arguments
    Classify {
        /// Cargo arguments, e.g. `test --lib -- my_test`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Handle {
                payload,
                project,
                workspace,
                store,
                dry_run,
            } => handle_command(
                &payload,
                project.as_deref(),
                workspace.as_deref(),
                store.as_deref(),
                dry_run,
            ),
            Commands::List {
                project,
                workspace,
                store,
            } => list_command(project.as_deref(), workspace.as_deref(), store.as_deref()),
            Commands::Classify { tokens } => classify_command(&tokens),
        }
    }
}
