//! Error types for risk register quantification.
//!
//! This module provides structured error types for every layer of the
//! workspace using `thiserror` for derivation. Parameter and schema errors
//! are raised before any sampling starts and always name the offending
//! risk factor.

use thiserror::Error;

/// Convenience alias used across the quant_* crates.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur while loading, simulating or summarising a risk register.
///
/// # Examples
///
/// ```
/// use quant_core::RiskError;
///
/// let err = RiskError::unknown_distribution(7, "Weibull");
/// assert_eq!(
///     format!("{}", err),
///     "Unknown distribution 'Weibull' for risk factor 7"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// The register is missing a column the core requires.
    #[error("Risk register is missing required column '{0}'")]
    MissingRiskFactorColumn(String),

    /// Distribution kind string does not match a supported severity model.
    #[error("Unknown distribution '{kind}' for risk factor {risk_id}")]
    UnknownDistribution {
        /// Identifier of the offending risk factor.
        risk_id: u64,
        /// The requested distribution kind, as written in the register.
        kind: String,
    },

    /// A parameter is outside its valid domain.
    #[error("Invalid parameter '{name}' for {subject}: {reason}")]
    InvalidParameter {
        /// What the parameter belongs to (e.g. "risk factor 7", "simulation config").
        subject: String,
        /// Parameter name.
        name: &'static str,
        /// Description of the violation.
        reason: String,
    },

    /// Two matrices that must share a shape do not.
    #[error(
        "Dimension mismatch: expected {expected_periods}x{expected_scenarios}, \
         got {actual_periods}x{actual_scenarios}"
    )]
    DimensionMismatch {
        /// Expected number of periods (rows).
        expected_periods: usize,
        /// Expected number of scenarios (columns).
        expected_scenarios: usize,
        /// Actual number of periods (rows).
        actual_periods: usize,
        /// Actual number of scenarios (columns).
        actual_scenarios: usize,
    },

    /// Reading or persisting an external artefact failed.
    #[error("IO failure: {0}")]
    IoFailure(String),

    /// The run was cancelled cooperatively before completion.
    #[error("Simulation cancelled")]
    Cancelled,
}

impl RiskError {
    /// Create an unknown-distribution error for a risk factor.
    pub fn unknown_distribution(risk_id: u64, kind: impl Into<String>) -> Self {
        Self::UnknownDistribution {
            risk_id,
            kind: kind.into(),
        }
    }

    /// Create an invalid-parameter error.
    pub fn invalid_parameter(
        subject: impl Into<String>,
        name: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            subject: subject.into(),
            name,
            reason: reason.into(),
        }
    }

    /// Create an invalid-parameter error scoped to a risk factor.
    pub fn invalid_factor_parameter(
        risk_id: u64,
        name: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::invalid_parameter(format!("risk factor {}", risk_id), name, reason)
    }

    /// Create an IO failure error.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::IoFailure(msg.into())
    }

    /// Returns true if this error came from the persistence side channel.
    #[inline]
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Self::IoFailure(_))
    }
}

impl From<std::io::Error> for RiskError {
    fn from(err: std::io::Error) -> Self {
        Self::IoFailure(err.to_string())
    }
}
