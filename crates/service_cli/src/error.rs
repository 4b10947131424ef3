//! CLI error types.

use adapter_register::RegisterError;
use quant_core::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Convenience alias for CLI results.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by `riskq` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Risk register could not be loaded
    #[error("Register error: {0}")]
    Register(#[from] RegisterError),

    /// Simulation or statistics failure
    #[error("Quantification error: {0}")]
    Risk(#[from] RiskError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
