//! Mean-reverting (Vasicek) path generator.
//!
//! The Vasicek model describes:
//! ```text
//! dr = kappa * (theta - r) * dt + sigma * dW
//! ```
//!
//! discretised with Euler–Maruyama. The first period holds `r0`; each later
//! period steps from the previous one.

use quant_core::{PathMatrix, RiskError, RiskResult, SimulationRng};

use super::{ProcessGrid, ProcessPaths, StochasticProcess};

/// Vasicek parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeanRevertingParams {
    /// Long-run mean level (theta).
    pub long_run_mean: f64,
    /// Volatility (sigma), non-negative.
    pub volatility: f64,
    /// Speed of mean reversion (kappa), non-negative.
    pub reversion_rate: f64,
    /// Value at t = 0.
    pub initial_value: f64,
}

impl MeanRevertingParams {
    /// Create new Vasicek parameters with validation.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] if any value is not finite, or
    /// the volatility or reversion rate is negative.
    pub fn new(
        long_run_mean: f64,
        volatility: f64,
        reversion_rate: f64,
        initial_value: f64,
    ) -> RiskResult<Self> {
        let subject = "mean reverting process";
        for (name, value) in [
            ("long_run_mean", long_run_mean),
            ("volatility", volatility),
            ("reversion_rate", reversion_rate),
            ("initial_value", initial_value),
        ] {
            if !value.is_finite() {
                return Err(RiskError::invalid_parameter(
                    subject,
                    name,
                    format!("must be finite, got {}", value),
                ));
            }
        }
        if volatility < 0.0 {
            return Err(RiskError::invalid_parameter(
                subject,
                "volatility",
                format!("must be non-negative, got {}", volatility),
            ));
        }
        if reversion_rate < 0.0 {
            return Err(RiskError::invalid_parameter(
                subject,
                "reversion_rate",
                format!("must be non-negative, got {}", reversion_rate),
            ));
        }
        Ok(Self {
            long_run_mean,
            volatility,
            reversion_rate,
            initial_value,
        })
    }
}

/// Vasicek short-rate generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeanRevertingProcess {
    params: MeanRevertingParams,
}

impl MeanRevertingProcess {
    /// Creates a generator for the given parameters.
    pub fn new(params: MeanRevertingParams) -> Self {
        Self { params }
    }

    /// Returns the parameters.
    #[inline]
    pub fn params(&self) -> &MeanRevertingParams {
        &self.params
    }
}

impl StochasticProcess for MeanRevertingProcess {
    fn simulate(&self, grid: &ProcessGrid, rng: &mut SimulationRng) -> ProcessPaths {
        let MeanRevertingParams {
            long_run_mean,
            volatility,
            reversion_rate,
            initial_value,
        } = self.params;

        let dt = grid.dt();
        let diffusion = volatility * dt.sqrt();
        let n_scenarios = grid.n_scenarios();

        let mut paths = PathMatrix::zeros(grid.n_steps(), n_scenarios);
        paths.row_mut(0).fill(initial_value);

        let mut previous = vec![initial_value; n_scenarios];
        let mut z = vec![0.0; n_scenarios];

        for step in 1..grid.n_steps() {
            rng.fill_normal(&mut z);
            let row = paths.row_mut(step);
            for ((value, prev), &dz) in row.iter_mut().zip(previous.iter_mut()).zip(&z) {
                let next = *prev + reversion_rate * (long_run_mean - *prev) * dt + diffusion * dz;
                *value = next;
                *prev = next;
            }
        }

        ProcessPaths {
            time: grid.times(),
            paths,
        }
    }

    fn process_name(&self) -> &'static str {
        "vasicek"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn simulate(params: MeanRevertingParams, grid: ProcessGrid, seed: u64) -> ProcessPaths {
        MeanRevertingProcess::new(params).simulate(&grid, &mut SimulationRng::from_seed(seed))
    }

    #[test]
    fn test_params_validation() {
        assert!(MeanRevertingParams::new(0.03, -0.01, 0.5, 0.02).is_err());
        assert!(MeanRevertingParams::new(0.03, 0.01, -0.5, 0.02).is_err());
        assert!(MeanRevertingParams::new(f64::INFINITY, 0.01, 0.5, 0.02).is_err());
        assert!(MeanRevertingParams::new(0.03, 0.0, 0.0, 0.02).is_ok());
    }

    #[test]
    fn test_first_row_is_initial_value() {
        let params = MeanRevertingParams::new(0.05, 0.02, 0.3, 0.01).unwrap();
        let out = simulate(params, ProcessGrid::new(1.0, 10, 25).unwrap(), 5);

        assert!(out.paths.row(0).iter().all(|&r| r == 0.01));
        assert_eq!(out.time[0], 0.0);
    }

    #[test]
    fn test_zero_volatility_converges_to_long_run_mean() {
        let params = MeanRevertingParams::new(0.04, 0.0, 2.0, 0.10).unwrap();
        let out = simulate(params, ProcessGrid::new(10.0, 1_000, 3).unwrap(), 1);

        for &r in out.paths.last_row() {
            assert_relative_eq!(r, 0.04, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_zero_volatility_single_step_matches_euler() {
        let params = MeanRevertingParams::new(0.05, 0.0, 0.5, 0.01).unwrap();
        let grid = ProcessGrid::new(1.0, 4, 1).unwrap();
        let out = simulate(params, grid, 1);

        let dt = 0.25;
        let expected = 0.01 + 0.5 * (0.05 - 0.01) * dt;
        assert_relative_eq!(out.paths.row(1)[0], expected, epsilon = 1e-15);
    }

    #[test]
    fn test_cross_sectional_mean_reverts() {
        let params = MeanRevertingParams::new(0.05, 0.01, 1.5, 0.0).unwrap();
        let out = simulate(params, ProcessGrid::new(5.0, 500, 5_000).unwrap(), 11);

        let terminal = out.paths.last_row();
        let mean = terminal.iter().sum::<f64>() / terminal.len() as f64;
        assert!((mean - 0.05).abs() < 0.002, "terminal mean {}", mean);
    }

    #[test]
    fn test_reproducible_under_seed() {
        let params = MeanRevertingParams::new(0.05, 0.02, 0.3, 0.01).unwrap();
        let grid = ProcessGrid::new(1.0, 12, 40).unwrap();
        assert_eq!(simulate(params, grid, 8), simulate(params, grid, 8));
    }
}
