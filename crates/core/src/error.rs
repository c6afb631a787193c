use std::io;

/// Errors that can occur while resolving and launching run commands
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No usable project: '{0}' is not a Cargo project in the workspace")]
    NoUsableProject(String),

    #[error("Launch configuration store error: {0}")]
    Store(String),

    #[error("Launch error: {0}")]
    Launch(String),

    #[error("Run mode '{0}' is not supported")]
    UnsupportedMode(String),

    #[error("Variable substitution error: {0}")]
    Variable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for cargo-launch operations
pub type Result<T> = std::result::Result<T, Error>;
