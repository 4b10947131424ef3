//! Simulation run configuration.
//!
//! [`SimulationConfig`] is immutable once built; use
//! [`SimulationConfigBuilder`] to construct validated instances.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quant_core::{RiskError, RiskResult};

/// Maximum number of scenarios allowed.
pub const MAX_SCENARIOS: usize = 10_000_000;

/// Maximum number of periods allowed.
pub const MAX_PERIODS: usize = 10_000;

/// Default base seed.
pub const DEFAULT_SEED: u64 = 110;

/// Default per-factor impact cap.
pub const DEFAULT_CAP: f64 = 400_000_000.0;

/// Upper bound applied to each stochastic factor's impacts.
///
/// # Examples
///
/// ```rust
/// use quant_simulation::CapPolicy;
///
/// assert_eq!(CapPolicy::Enabled(10.0).apply(25.0), 10.0);
/// assert_eq!(CapPolicy::Disabled.apply(25.0), 25.0);
/// assert_eq!(CapPolicy::default().limit(), Some(400_000_000.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CapPolicy {
    /// No cap.
    Disabled,
    /// Impacts are replaced by `min(value, cap)`.
    Enabled(f64),
}

impl Default for CapPolicy {
    fn default() -> Self {
        Self::Enabled(DEFAULT_CAP)
    }
}

impl CapPolicy {
    /// Returns the cap value, if capping is enabled.
    #[inline]
    pub fn limit(&self) -> Option<f64> {
        match *self {
            Self::Disabled => None,
            Self::Enabled(cap) => Some(cap),
        }
    }

    /// Applies the policy to a single value.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Self::Disabled => value,
            Self::Enabled(cap) => value.min(cap),
        }
    }
}

/// Monte Carlo configuration for a register run.
///
/// # Examples
///
/// ```rust
/// use quant_simulation::{CapPolicy, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .n_scenarios(10_000)
///     .n_periods(5)
///     .seed(42)
///     .cap(CapPolicy::Disabled)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_scenarios(), 10_000);
/// assert!(config.independent_sampling());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    n_scenarios: usize,
    n_periods: usize,
    seed: u64,
    independent_sampling: bool,
    cap: CapPolicy,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of Monte Carlo scenarios (columns).
    #[inline]
    pub fn n_scenarios(&self) -> usize {
        self.n_scenarios
    }

    /// Number of periods (rows).
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// Base seed for per-period generator derivation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether the materialization mask multiplies the severities.
    #[inline]
    pub fn independent_sampling(&self) -> bool {
        self.independent_sampling
    }

    /// Cap policy for stochastic factors.
    #[inline]
    pub fn cap(&self) -> CapPolicy {
        self.cap
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] if:
    /// - `n_scenarios` is 0 or greater than 10,000,000
    /// - `n_periods` is 0 or greater than 10,000
    /// - the cap value is not finite
    pub fn validate(&self) -> RiskResult<()> {
        if self.n_scenarios == 0 || self.n_scenarios > MAX_SCENARIOS {
            return Err(RiskError::invalid_parameter(
                "simulation config",
                "n_scenarios",
                format!("must be in [1, {}], got {}", MAX_SCENARIOS, self.n_scenarios),
            ));
        }
        if self.n_periods == 0 || self.n_periods > MAX_PERIODS {
            return Err(RiskError::invalid_parameter(
                "simulation config",
                "n_periods",
                format!("must be in [1, {}], got {}", MAX_PERIODS, self.n_periods),
            ));
        }
        if let CapPolicy::Enabled(cap) = self.cap {
            if !cap.is_finite() {
                return Err(RiskError::invalid_parameter(
                    "simulation config",
                    "cap",
                    format!("must be finite, got {}", cap),
                ));
            }
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    n_scenarios: Option<usize>,
    n_periods: Option<usize>,
    seed: u64,
    independent_sampling: bool,
    cap: CapPolicy,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            n_scenarios: None,
            n_periods: None,
            seed: DEFAULT_SEED,
            independent_sampling: true,
            cap: CapPolicy::default(),
        }
    }
}

impl SimulationConfigBuilder {
    /// Sets the number of scenarios, in [1, 10_000_000].
    #[inline]
    pub fn n_scenarios(mut self, n_scenarios: usize) -> Self {
        self.n_scenarios = Some(n_scenarios);
        self
    }

    /// Sets the number of periods, in [1, 10_000].
    #[inline]
    pub fn n_periods(mut self, n_periods: usize) -> Self {
        self.n_periods = Some(n_periods);
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables application of the materialization mask.
    #[inline]
    pub fn independent_sampling(mut self, enabled: bool) -> Self {
        self.independent_sampling = enabled;
        self
    }

    /// Sets the cap policy.
    #[inline]
    pub fn cap(mut self, cap: CapPolicy) -> Self {
        self.cap = cap;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] if a count was not set or the
    /// result fails [`SimulationConfig::validate`].
    pub fn build(self) -> RiskResult<SimulationConfig> {
        let n_scenarios = self.n_scenarios.ok_or_else(|| {
            RiskError::invalid_parameter("simulation config", "n_scenarios", "must be set")
        })?;
        let n_periods = self.n_periods.ok_or_else(|| {
            RiskError::invalid_parameter("simulation config", "n_periods", "must be set")
        })?;

        let config = SimulationConfig {
            n_scenarios,
            n_periods,
            seed: self.seed,
            independent_sampling: self.independent_sampling,
            cap: self.cap,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SimulationConfig::builder()
            .n_scenarios(100)
            .n_periods(3)
            .build()
            .unwrap();

        assert_eq!(config.seed(), DEFAULT_SEED);
        assert!(config.independent_sampling());
        assert_eq!(config.cap(), CapPolicy::Enabled(DEFAULT_CAP));
    }

    #[test]
    fn test_builder_requires_counts() {
        assert!(SimulationConfig::builder().n_periods(3).build().is_err());
        assert!(SimulationConfig::builder().n_scenarios(3).build().is_err());
    }

    #[test]
    fn test_count_bounds() {
        let build = |s, p| SimulationConfig::builder().n_scenarios(s).n_periods(p).build();

        assert!(build(0, 1).is_err());
        assert!(build(1, 0).is_err());
        assert!(build(MAX_SCENARIOS + 1, 1).is_err());
        assert!(build(1, MAX_PERIODS + 1).is_err());
        assert!(build(MAX_SCENARIOS, MAX_PERIODS).is_ok());
    }

    #[test]
    fn test_non_finite_cap_rejected() {
        let result = SimulationConfig::builder()
            .n_scenarios(1)
            .n_periods(1)
            .cap(CapPolicy::Enabled(f64::NAN))
            .build();

        match result {
            Err(RiskError::InvalidParameter { name, .. }) => assert_eq!(name, "cap"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_cap_policy_apply() {
        let cap = CapPolicy::Enabled(5.0);
        assert_eq!(cap.apply(-10.0), -10.0);
        assert_eq!(cap.apply(5.0), 5.0);
        assert_eq!(cap.apply(7.5), 5.0);
        assert_eq!(CapPolicy::Disabled.limit(), None);
    }
}
