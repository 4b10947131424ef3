//! Continuous-time stochastic path generators.
//!
//! Two process families share a discretised grid
//! `t = linspace(0, horizon, n_steps)` with `dt = horizon / n_steps`:
//!
//! - [`ExponentialDriftProcess`]: geometric Brownian motion,
//!   `S(t) = S0 · exp((μ − σ²/2)·t + σ·W(t))`
//! - [`MeanRevertingProcess`]: Vasicek short-rate dynamics discretised with
//!   Euler–Maruyama, `r[i] = r[i−1] + κ(θ − r[i−1])dt + σ√dt·Z`
//!
//! Both return [`ProcessPaths`]: the time vector and a periods × scenarios
//! path matrix. Generators take an explicit [`SimulationRng`]; nothing reads
//! global random state.
//!
//! ## Static dispatch
//!
//! [`ProcessModel`] wraps both families in an enum so callers can select a
//! process at runtime without trait objects.

mod gbm;
mod vasicek;

pub use gbm::{ExponentialDriftParams, ExponentialDriftProcess};
pub use vasicek::{MeanRevertingParams, MeanRevertingProcess};

use quant_core::{linspace, PathMatrix, RiskError, RiskResult, SimulationRng};

/// Discretised simulation grid shared by the process generators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProcessGrid {
    horizon: f64,
    n_steps: usize,
    n_scenarios: usize,
}

impl ProcessGrid {
    /// Creates a grid with validation.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] if the horizon is not a
    /// positive finite number or either count is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use quant_models::ProcessGrid;
    ///
    /// let grid = ProcessGrid::new(1.0, 4, 100).unwrap();
    /// assert_eq!(grid.dt(), 0.25);
    /// assert_eq!(grid.times(), vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
    ///
    /// assert!(ProcessGrid::new(1.0, 0, 100).is_err());
    /// ```
    pub fn new(horizon: f64, n_steps: usize, n_scenarios: usize) -> RiskResult<Self> {
        if !(horizon.is_finite() && horizon > 0.0) {
            return Err(RiskError::invalid_parameter(
                "process grid",
                "horizon",
                format!("must be positive and finite, got {}", horizon),
            ));
        }
        if n_steps == 0 {
            return Err(RiskError::invalid_parameter(
                "process grid",
                "n_steps",
                "must be at least 1",
            ));
        }
        if n_scenarios == 0 {
            return Err(RiskError::invalid_parameter(
                "process grid",
                "n_scenarios",
                "must be at least 1",
            ));
        }
        Ok(Self {
            horizon,
            n_steps,
            n_scenarios,
        })
    }

    /// Simulation horizon in years.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Number of grid points (periods).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of simulated paths.
    #[inline]
    pub fn n_scenarios(&self) -> usize {
        self.n_scenarios
    }

    /// Time increment `horizon / n_steps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.horizon / self.n_steps as f64
    }

    /// Grid points `linspace(0, horizon, n_steps)`.
    pub fn times(&self) -> Vec<f64> {
        linspace(0.0, self.horizon, self.n_steps)
    }
}

/// Output of a process generator.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessPaths {
    /// Time of each period, length `n_steps`.
    pub time: Vec<f64>,
    /// Simulated values, `n_steps` × `n_scenarios`.
    pub paths: PathMatrix,
}

/// Common interface of the continuous-time generators.
pub trait StochasticProcess {
    /// Simulates all paths on `grid`, drawing normals from `rng`.
    fn simulate(&self, grid: &ProcessGrid, rng: &mut SimulationRng) -> ProcessPaths;

    /// Short process name, used for logging and artefact names.
    fn process_name(&self) -> &'static str;
}

/// Enum wrapper for runtime selection of a process family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProcessModel {
    /// Geometric Brownian motion.
    ExponentialDrift(ExponentialDriftProcess),
    /// Vasicek mean reversion.
    MeanReverting(MeanRevertingProcess),
}

impl StochasticProcess for ProcessModel {
    fn simulate(&self, grid: &ProcessGrid, rng: &mut SimulationRng) -> ProcessPaths {
        match self {
            Self::ExponentialDrift(p) => p.simulate(grid, rng),
            Self::MeanReverting(p) => p.simulate(grid, rng),
        }
    }

    fn process_name(&self) -> &'static str {
        match self {
            Self::ExponentialDrift(p) => p.process_name(),
            Self::MeanReverting(p) => p.process_name(),
        }
    }
}

impl From<ExponentialDriftProcess> for ProcessModel {
    fn from(process: ExponentialDriftProcess) -> Self {
        Self::ExponentialDrift(process)
    }
}

impl From<MeanRevertingProcess> for ProcessModel {
    fn from(process: MeanRevertingProcess) -> Self {
        Self::MeanReverting(process)
    }
}
