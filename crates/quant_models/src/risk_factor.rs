//! Risk factor identification and definitions.
//!
//! A risk factor is one line of the risk register: a named source of
//! potential loss with a materialization likelihood and a severity model.
//! Definitions are validated on construction and immutable afterwards, so
//! every later stage can assume well-formed parameters.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quant_core::{RiskError, RiskResult};

use crate::distribution::SeverityModel;

/// Unique numeric identifier of a risk factor.
///
/// The numeric value participates in per-period seed derivation, so two
/// factors with different identifiers never share a generator at the same
/// period index.
///
/// # Examples
///
/// ```
/// use quant_models::RiskFactorId;
///
/// let id = RiskFactorId::new(12);
/// assert_eq!(id.value(), 12);
/// assert_eq!(format!("{}", id), "12");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiskFactorId(u64);

impl RiskFactorId {
    /// Creates a new risk factor ID.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric identifier.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RiskFactorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RiskFactorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One validated row of the risk register.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiskFactorDefinition {
    id: RiskFactorId,
    title: String,
    taxonomy: String,
    likelihood: f64,
    severity: SeverityModel,
}

impl RiskFactorDefinition {
    /// Creates a risk factor definition with validation.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] naming this factor if the
    /// likelihood is outside `[0, 1]` or the severity parameters are invalid
    /// (see [`SeverityModel::validate`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use quant_models::{RiskFactorDefinition, RiskFactorId, SeverityModel};
    ///
    /// let invalid = RiskFactorDefinition::new(
    ///     RiskFactorId::new(1),
    ///     "Cyber breach",
    ///     "Technology",
    ///     1.2,
    ///     SeverityModel::Normal { mean: 0.0, std_dev: 1.0 },
    /// );
    /// assert!(invalid.is_err());
    /// ```
    pub fn new(
        id: RiskFactorId,
        title: impl Into<String>,
        taxonomy: impl Into<String>,
        likelihood: f64,
        severity: SeverityModel,
    ) -> RiskResult<Self> {
        if !(0.0..=1.0).contains(&likelihood) {
            return Err(RiskError::invalid_factor_parameter(
                id.value(),
                "likelihood",
                format!("must be in [0, 1], got {}", likelihood),
            ));
        }
        severity.validate(id.value())?;

        Ok(Self {
            id,
            title: title.into(),
            taxonomy: taxonomy.into(),
            likelihood,
            severity,
        })
    }

    /// Risk factor identifier.
    #[inline]
    pub fn id(&self) -> RiskFactorId {
        self.id
    }

    /// Human-readable title.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Top-level taxonomy label.
    #[inline]
    pub fn taxonomy(&self) -> &str {
        &self.taxonomy
    }

    /// Per-period materialization probability in `[0, 1]`.
    #[inline]
    pub fn likelihood(&self) -> f64 {
        self.likelihood
    }

    /// Severity model.
    #[inline]
    pub fn severity(&self) -> &SeverityModel {
        &self.severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal() -> SeverityModel {
        SeverityModel::Normal {
            mean: 100.0,
            std_dev: 10.0,
        }
    }

    #[test]
    fn test_definition_accessors() {
        let def =
            RiskFactorDefinition::new(RiskFactorId::new(4), "Flood", "Physical", 0.25, normal())
                .unwrap();

        assert_eq!(def.id(), RiskFactorId::new(4));
        assert_eq!(def.title(), "Flood");
        assert_eq!(def.taxonomy(), "Physical");
        assert_eq!(def.likelihood(), 0.25);
        assert_eq!(def.severity(), &normal());
    }

    #[test]
    fn test_likelihood_bounds_inclusive() {
        for p in [0.0, 1.0] {
            assert!(
                RiskFactorDefinition::new(RiskFactorId::new(1), "t", "x", p, normal()).is_ok()
            );
        }
    }

    #[test]
    fn test_likelihood_out_of_range_names_factor() {
        let err = RiskFactorDefinition::new(RiskFactorId::new(9), "t", "x", -0.1, normal())
            .unwrap_err();

        match err {
            RiskError::InvalidParameter { subject, name, .. } => {
                assert_eq!(subject, "risk factor 9");
                assert_eq!(name, "likelihood");
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_likelihood_nan_rejected() {
        let result = RiskFactorDefinition::new(RiskFactorId::new(1), "t", "x", f64::NAN, normal());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_severity_propagates() {
        let severity = SeverityModel::LogNormal {
            lower_bound: 0.0,
            upper_bound: 100.0,
        };
        let err = RiskFactorDefinition::new(RiskFactorId::new(2), "t", "x", 0.5, severity)
            .unwrap_err();
        assert!(err.to_string().contains("risk factor 2"));
    }

    #[test]
    fn test_id_ordering() {
        let mut ids = vec![RiskFactorId::new(3), RiskFactorId::new(1), RiskFactorId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![RiskFactorId::new(1), RiskFactorId::new(2), RiskFactorId::new(3)]);
    }
}
