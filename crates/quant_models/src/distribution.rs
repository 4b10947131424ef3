//! Severity distributions for risk factor impacts.
//!
//! The register names a distribution kind per risk factor. The kind is
//! resolved exactly once, when the register is parsed, into the closed
//! [`SeverityModel`] enum carrying the parameters that kind needs. Unknown
//! kinds never reach the sampler.
//!
//! ## Log-normal from tail bounds
//!
//! Log-normal severities are configured by a lower and upper impact bound
//! rather than by their log-space moments:
//!
//! ```text
//! mu    = (ln(lower) + ln(upper)) / 2
//! sigma = (ln(upper) - ln(lower)) / 3.29
//! ```
//!
//! 3.29 = 2 × 1.645, so in log space the bounds sit roughly at the 5th and
//! 95th percentiles of the fitted distribution.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quant_core::{RiskError, RiskResult};

/// Denominator converting the log-space bound spread into sigma.
pub const LOGNORMAL_TAIL_SPREAD: f64 = 3.29;

/// Distribution kind as named in the register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DistributionKind {
    /// Normal severity (mean, standard deviation).
    Normal,
    /// Log-normal severity derived from lower/upper tail bounds.
    Lognormal,
    /// Uniform severity between min and max bounds.
    Uniform,
    /// Deterministic linear trend `mean * period`.
    DeterministicTrend,
}

impl DistributionKind {
    /// Parses a register distribution string.
    ///
    /// `Normal`, `Lognormal` and `Uniform` match case-insensitively;
    /// `Deterministic Trend` must match exactly. Surrounding whitespace is
    /// ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use quant_models::DistributionKind;
    ///
    /// assert_eq!(DistributionKind::parse("LOGNORMAL"), Some(DistributionKind::Lognormal));
    /// assert_eq!(
    ///     DistributionKind::parse("Deterministic Trend"),
    ///     Some(DistributionKind::DeterministicTrend)
    /// );
    /// assert_eq!(DistributionKind::parse("deterministic trend"), None);
    /// assert_eq!(DistributionKind::parse("Weibull"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed == "Deterministic Trend" {
            return Some(Self::DeterministicTrend);
        }
        match trimmed.to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "lognormal" => Some(Self::Lognormal),
            "uniform" => Some(Self::Uniform),
            _ => None,
        }
    }

    /// Canonical register spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Lognormal => "Lognormal",
            Self::Uniform => "Uniform",
            Self::DeterministicTrend => "Deterministic Trend",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log-space parameters of a log-normal severity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogNormalParams {
    /// Mean of the underlying normal (log-space location).
    pub mu: f64,
    /// Standard deviation of the underlying normal (log-space scale).
    pub sigma: f64,
}

impl LogNormalParams {
    /// Derives log-space parameters from lower and upper impact bounds.
    ///
    /// Bounds are assumed positive; use [`SeverityModel::validate`] first.
    ///
    /// # Examples
    ///
    /// ```
    /// use quant_models::LogNormalParams;
    ///
    /// let p = LogNormalParams::from_tail_bounds(1_000.0, 10_000.0);
    /// assert!((p.mu - 8.059).abs() < 1e-3);
    /// assert!((p.sigma - 0.700).abs() < 1e-3);
    /// ```
    pub fn from_tail_bounds(lower_bound: f64, upper_bound: f64) -> Self {
        let ln_lower = lower_bound.ln();
        let ln_upper = upper_bound.ln();
        Self {
            mu: (ln_lower + ln_upper) / 2.0,
            sigma: (ln_upper - ln_lower) / LOGNORMAL_TAIL_SPREAD,
        }
    }
}

/// Raw severity columns of one register row, before kind resolution.
///
/// Each kind reads only the fields it needs: normal uses `mean`/`std_dev`,
/// log-normal and uniform use `lower_impact`/`upper_impact`, deterministic
/// trend uses `mean`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeverityFields {
    /// `Mean` column.
    pub mean: Option<f64>,
    /// `Std` column.
    pub std_dev: Option<f64>,
    /// `Converted Lower Impact` column.
    pub lower_impact: Option<f64>,
    /// `Converted Max Impact` column.
    pub upper_impact: Option<f64>,
}

/// Severity model of a risk factor: one variant per supported kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeverityModel {
    /// Normal severity.
    Normal {
        /// Mean impact.
        mean: f64,
        /// Standard deviation of impact (non-negative).
        std_dev: f64,
    },
    /// Log-normal severity parameterised by tail bounds.
    LogNormal {
        /// Lower impact bound (positive).
        lower_bound: f64,
        /// Upper impact bound (positive, not below `lower_bound`).
        upper_bound: f64,
    },
    /// Uniform severity on `[min, max)`.
    Uniform {
        /// Minimum impact.
        min: f64,
        /// Maximum impact.
        max: f64,
    },
    /// Deterministic trend: impact `mean * period` in every scenario.
    DeterministicTrend {
        /// Per-period slope.
        mean: f64,
    },
}

impl SeverityModel {
    /// Resolves a register row's severity columns into a model.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] if a column the kind needs is
    /// empty, or if the resulting parameters fail [`validate`](Self::validate).
    pub fn from_fields(
        kind: DistributionKind,
        fields: &SeverityFields,
        risk_id: u64,
    ) -> RiskResult<Self> {
        let require = |value: Option<f64>, name: &'static str| {
            value.ok_or_else(|| {
                RiskError::invalid_factor_parameter(
                    risk_id,
                    name,
                    format!("is required for {} severity", kind),
                )
            })
        };

        let model = match kind {
            DistributionKind::Normal => Self::Normal {
                mean: require(fields.mean, "mean")?,
                std_dev: require(fields.std_dev, "std")?,
            },
            DistributionKind::Lognormal => Self::LogNormal {
                lower_bound: require(fields.lower_impact, "lower_impact")?,
                upper_bound: require(fields.upper_impact, "upper_impact")?,
            },
            DistributionKind::Uniform => Self::Uniform {
                min: require(fields.lower_impact, "lower_impact")?,
                max: require(fields.upper_impact, "upper_impact")?,
            },
            DistributionKind::DeterministicTrend => Self::DeterministicTrend {
                mean: require(fields.mean, "mean")?,
            },
        };

        model.validate(risk_id)?;
        Ok(model)
    }

    /// Returns the distribution kind of this model.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Normal { .. } => DistributionKind::Normal,
            Self::LogNormal { .. } => DistributionKind::Lognormal,
            Self::Uniform { .. } => DistributionKind::Uniform,
            Self::DeterministicTrend { .. } => DistributionKind::DeterministicTrend,
        }
    }

    /// Returns true for kinds that draw random severities (and are therefore
    /// subject to materialization masking and capping).
    #[inline]
    pub fn is_stochastic(&self) -> bool {
        !matches!(self, Self::DeterministicTrend { .. })
    }

    /// Log-space parameters, for log-normal models only.
    pub fn lognormal_params(&self) -> Option<LogNormalParams> {
        match *self {
            Self::LogNormal {
                lower_bound,
                upper_bound,
            } => Some(LogNormalParams::from_tail_bounds(lower_bound, upper_bound)),
            _ => None,
        }
    }

    /// Validates the parameters for this model.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] naming `risk_id` if:
    /// - any parameter is not finite
    /// - a normal standard deviation is negative
    /// - a log-normal bound is not strictly positive, or `lower > upper`
    /// - a uniform `min > max`
    pub fn validate(&self, risk_id: u64) -> RiskResult<()> {
        let finite = |value: f64, name: &'static str| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(RiskError::invalid_factor_parameter(
                    risk_id,
                    name,
                    format!("must be finite, got {}", value),
                ))
            }
        };

        match *self {
            Self::Normal { mean, std_dev } => {
                finite(mean, "mean")?;
                finite(std_dev, "std")?;
                if std_dev < 0.0 {
                    return Err(RiskError::invalid_factor_parameter(
                        risk_id,
                        "std",
                        format!("must be non-negative, got {}", std_dev),
                    ));
                }
            }
            Self::LogNormal {
                lower_bound,
                upper_bound,
            } => {
                finite(lower_bound, "lower_impact")?;
                finite(upper_bound, "upper_impact")?;
                if lower_bound <= 0.0 {
                    return Err(RiskError::invalid_factor_parameter(
                        risk_id,
                        "lower_impact",
                        format!("must be positive for a log-normal severity, got {}", lower_bound),
                    ));
                }
                if upper_bound <= 0.0 {
                    return Err(RiskError::invalid_factor_parameter(
                        risk_id,
                        "upper_impact",
                        format!("must be positive for a log-normal severity, got {}", upper_bound),
                    ));
                }
                if lower_bound > upper_bound {
                    return Err(RiskError::invalid_factor_parameter(
                        risk_id,
                        "upper_impact",
                        format!(
                            "must not be below lower_impact ({} < {})",
                            upper_bound, lower_bound
                        ),
                    ));
                }
            }
            Self::Uniform { min, max } => {
                finite(min, "lower_impact")?;
                finite(max, "upper_impact")?;
                if min > max {
                    return Err(RiskError::invalid_factor_parameter(
                        risk_id,
                        "upper_impact",
                        format!("must not be below lower_impact ({} < {})", max, min),
                    ));
                }
            }
            Self::DeterministicTrend { mean } => finite(mean, "mean")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_case_insensitive() {
        for raw in ["normal", "Normal", "NORMAL", " Normal "] {
            assert_eq!(DistributionKind::parse(raw), Some(DistributionKind::Normal));
        }
        assert_eq!(DistributionKind::parse("uniForm"), Some(DistributionKind::Uniform));
    }

    #[test]
    fn test_parse_trend_exact_only() {
        assert_eq!(DistributionKind::parse("Deterministic trend"), None);
        assert_eq!(DistributionKind::parse("DETERMINISTIC TREND"), None);
    }

    #[test]
    fn test_kind_round_trip_spelling() {
        for kind in [
            DistributionKind::Normal,
            DistributionKind::Lognormal,
            DistributionKind::Uniform,
            DistributionKind::DeterministicTrend,
        ] {
            assert_eq!(DistributionKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_lognormal_params_reference_bounds() {
        let p = LogNormalParams::from_tail_bounds(1_000.0, 10_000.0);
        let expected_mu = (1_000.0_f64.ln() + 10_000.0_f64.ln()) / 2.0;
        let expected_sigma = (10_000.0_f64.ln() - 1_000.0_f64.ln()) / 3.29;

        assert_relative_eq!(p.mu, expected_mu, epsilon = 1e-12);
        assert_relative_eq!(p.sigma, expected_sigma, epsilon = 1e-12);
        assert_relative_eq!(p.mu, 8.0590, epsilon = 1e-3);
        assert_relative_eq!(p.sigma, 0.6999, epsilon = 1e-3);
    }

    #[test]
    fn test_lognormal_equal_bounds_zero_sigma() {
        let p = LogNormalParams::from_tail_bounds(500.0, 500.0);
        assert_eq!(p.sigma, 0.0);
    }

    #[test]
    fn test_from_fields_normal() {
        let fields = SeverityFields {
            mean: Some(10.0),
            std_dev: Some(2.0),
            ..Default::default()
        };
        let model = SeverityModel::from_fields(DistributionKind::Normal, &fields, 1).unwrap();
        assert_eq!(
            model,
            SeverityModel::Normal {
                mean: 10.0,
                std_dev: 2.0
            }
        );
    }

    #[test]
    fn test_from_fields_uniform_uses_impact_bounds() {
        let fields = SeverityFields {
            lower_impact: Some(5.0),
            upper_impact: Some(50.0),
            mean: Some(999.0),
            ..Default::default()
        };
        let model = SeverityModel::from_fields(DistributionKind::Uniform, &fields, 1).unwrap();
        assert_eq!(model, SeverityModel::Uniform { min: 5.0, max: 50.0 });
    }

    #[test]
    fn test_from_fields_missing_column() {
        let fields = SeverityFields {
            lower_impact: Some(5.0),
            ..Default::default()
        };
        let err = SeverityModel::from_fields(DistributionKind::Lognormal, &fields, 8).unwrap_err();
        match err {
            RiskError::InvalidParameter { subject, name, .. } => {
                assert_eq!(subject, "risk factor 8");
                assert_eq!(name, "upper_impact");
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_lognormal_non_positive() {
        let model = SeverityModel::LogNormal {
            lower_bound: -1.0,
            upper_bound: 10.0,
        };
        assert!(model.validate(1).is_err());

        let model = SeverityModel::LogNormal {
            lower_bound: 1.0,
            upper_bound: 0.0,
        };
        assert!(model.validate(1).is_err());
    }

    #[test]
    fn test_validate_lognormal_inverted_bounds() {
        let model = SeverityModel::LogNormal {
            lower_bound: 100.0,
            upper_bound: 10.0,
        };
        assert!(model.validate(1).is_err());
    }

    #[test]
    fn test_validate_negative_std() {
        let model = SeverityModel::Normal {
            mean: 0.0,
            std_dev: -1.0,
        };
        assert!(model.validate(1).is_err());
    }

    #[test]
    fn test_validate_uniform_inverted() {
        let model = SeverityModel::Uniform { min: 2.0, max: 1.0 };
        assert!(model.validate(1).is_err());
        let model = SeverityModel::Uniform { min: 2.0, max: 2.0 };
        assert!(model.validate(1).is_ok());
    }

    #[test]
    fn test_validate_non_finite() {
        let model = SeverityModel::DeterministicTrend { mean: f64::INFINITY };
        assert!(model.validate(1).is_err());
    }

    #[test]
    fn test_is_stochastic() {
        assert!(SeverityModel::Uniform { min: 0.0, max: 1.0 }.is_stochastic());
        assert!(!SeverityModel::DeterministicTrend { mean: 1.0 }.is_stochastic());
    }
}
