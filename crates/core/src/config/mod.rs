//! Configuration management for cargo-launch

mod settings;

// Re-export main types
pub use settings::{CONFIG_FILE_NAMES, Config, default_binaries};
