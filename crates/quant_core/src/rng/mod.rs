//! Explicitly seeded random streams.
//!
//! There is no process-wide generator. Each period of each risk factor gets
//! its own [`SimulationRng`] keyed by `(base_seed, risk_id, period)` through
//! [`derive_period_seed`]; the process generators take a caller-owned stream.
//! Batch methods write into caller-provided slices.
//!
//! ```rust
//! use quant_core::rng::SimulationRng;
//!
//! let mut rng = SimulationRng::for_period(110, 42, 4);
//! let mut increments = vec![0.0; 256];
//! rng.fill_normal(&mut increments);
//! ```

mod prng;

pub use prng::{derive_period_seed, SimulationRng};
