//! Register adapter error types.

use quant_core::RiskError;
use thiserror::Error;

/// Errors raised while loading a risk register.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The register file could not be opened or read.
    #[error("Failed to read risk register '{path}': {source}")]
    Io {
        /// Register path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A row could not be decoded.
    #[error("Malformed risk register: {0}")]
    Csv(#[from] csv::Error),

    /// The register content is invalid (missing column, unknown
    /// distribution, invalid parameter).
    #[error(transparent)]
    Risk(#[from] RiskError),
}

impl RegisterError {
    /// Returns the domain error, if this is one.
    pub fn as_risk_error(&self) -> Option<&RiskError> {
        match self {
            Self::Risk(e) => Some(e),
            _ => None,
        }
    }
}
