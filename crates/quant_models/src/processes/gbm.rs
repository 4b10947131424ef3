//! Exponential-drift (geometric Brownian motion) path generator.
//!
//! GBM is described by:
//! ```text
//! dS = mu * S * dt + sigma * S * dW
//! ```
//! and simulated with its exact log-space solution on the grid:
//! ```text
//! W(t_i) = sqrt(dt) * (Z_0 + ... + Z_i)
//! S(t_i) = S0 * exp((mu - 0.5*sigma^2) * t_i + sigma * W(t_i))
//! ```
//! where `Z` are independent standard normals drawn period by period.

use quant_core::{PathMatrix, RiskError, RiskResult, SimulationRng};

use super::{ProcessGrid, ProcessPaths, StochasticProcess};

/// GBM parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentialDriftParams {
    /// Drift (expected return), annualised.
    pub drift: f64,
    /// Volatility, annualised (non-negative).
    pub volatility: f64,
    /// Value at t = 0.
    pub initial_value: f64,
}

impl ExponentialDriftParams {
    /// Create new GBM parameters with validation.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] if any value is not finite or
    /// the volatility is negative.
    pub fn new(drift: f64, volatility: f64, initial_value: f64) -> RiskResult<Self> {
        for (name, value) in [
            ("drift", drift),
            ("volatility", volatility),
            ("initial_value", initial_value),
        ] {
            if !value.is_finite() {
                return Err(RiskError::invalid_parameter(
                    "exponential drift process",
                    name,
                    format!("must be finite, got {}", value),
                ));
            }
        }
        if volatility < 0.0 {
            return Err(RiskError::invalid_parameter(
                "exponential drift process",
                "volatility",
                format!("must be non-negative, got {}", volatility),
            ));
        }
        Ok(Self {
            drift,
            volatility,
            initial_value,
        })
    }
}

/// Geometric Brownian motion generator.
///
/// # Examples
///
/// ```
/// use quant_core::SimulationRng;
/// use quant_models::{ExponentialDriftParams, ExponentialDriftProcess, ProcessGrid, StochasticProcess};
///
/// let params = ExponentialDriftParams::new(0.05, 0.2, 100.0).unwrap();
/// let process = ExponentialDriftProcess::new(params);
/// let grid = ProcessGrid::new(1.0, 12, 500).unwrap();
///
/// let out = process.simulate(&grid, &mut SimulationRng::from_seed(42));
/// assert_eq!(out.time.len(), 12);
/// assert_eq!(out.paths.shape(), (12, 500));
/// assert!(out.paths.as_slice().iter().all(|&s| s > 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentialDriftProcess {
    params: ExponentialDriftParams,
}

impl ExponentialDriftProcess {
    /// Creates a generator for the given parameters.
    pub fn new(params: ExponentialDriftParams) -> Self {
        Self { params }
    }

    /// Returns the parameters.
    #[inline]
    pub fn params(&self) -> &ExponentialDriftParams {
        &self.params
    }
}

impl StochasticProcess for ExponentialDriftProcess {
    fn simulate(&self, grid: &ProcessGrid, rng: &mut SimulationRng) -> ProcessPaths {
        let ExponentialDriftParams {
            drift,
            volatility,
            initial_value,
        } = self.params;

        let time = grid.times();
        let sqrt_dt = grid.dt().sqrt();
        let drift_rate = drift - 0.5 * volatility * volatility;

        let mut paths = PathMatrix::zeros(grid.n_steps(), grid.n_scenarios());
        let mut cumulative_z = vec![0.0; grid.n_scenarios()];
        let mut z = vec![0.0; grid.n_scenarios()];

        for (step, &t) in time.iter().enumerate() {
            rng.fill_normal(&mut z);
            let row = paths.row_mut(step);
            for ((value, acc), &dz) in row.iter_mut().zip(cumulative_z.iter_mut()).zip(&z) {
                *acc += dz;
                let w = *acc * sqrt_dt;
                *value = initial_value * (drift_rate * t + volatility * w).exp();
            }
        }

        ProcessPaths { time, paths }
    }

    fn process_name(&self) -> &'static str {
        "gbm"
    }
}
