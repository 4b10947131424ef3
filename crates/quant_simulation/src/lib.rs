//! # quant_simulation: Register Monte Carlo Engine
//!
//! ## Layer 3 Role
//!
//! quant_simulation turns a validated register into simulated impact paths:
//!
//! - [`config`]: [`SimulationConfig`] and its validating builder, [`CapPolicy`]
//! - [`sampler`]: [`RiskFactorSampler`], one factor's impact and
//!   materialization paths under per-period seeds
//! - [`aggregator`]: [`SimulationAggregator`], parallel per-factor sampling
//!   with an ordered reduction into the aggregate impact path
//! - [`cancel`]: cooperative [`CancellationToken`]
//! - [`sink`]: the [`ArtifactSink`] persistence side channel
//!
//! ## Reproducibility
//!
//! Every period of every factor owns a generator seeded with
//! `base_seed + risk_id + period`. Outputs are bit-identical for identical
//! inputs, independent of the number of rayon worker threads.
//!
//! ## Example
//!
//! ```rust
//! use quant_models::{RiskFactorDefinition, RiskFactorId, SeverityModel};
//! use quant_simulation::{CapPolicy, SimulationAggregator, SimulationConfig};
//!
//! let register = vec![RiskFactorDefinition::new(
//!     RiskFactorId::new(3),
//!     "Regulatory fine",
//!     "Compliance",
//!     0.2,
//!     SeverityModel::LogNormal { lower_bound: 1_000.0, upper_bound: 10_000.0 },
//! )
//! .unwrap()];
//!
//! let config = SimulationConfig::builder()
//!     .n_scenarios(2_000)
//!     .n_periods(5)
//!     .cap(CapPolicy::Enabled(50_000.0))
//!     .build()
//!     .unwrap();
//!
//! let outcome = SimulationAggregator::new(config).run(&register).unwrap();
//! assert!(outcome.aggregate.last_row().iter().all(|&v| v <= 50_000.0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod aggregator;
pub mod cancel;
pub mod config;
pub mod sampler;
pub mod sink;

pub use aggregator::{SimulationAggregator, SimulationOutcome};
pub use cancel::CancellationToken;
pub use config::{
    CapPolicy, SimulationConfig, SimulationConfigBuilder, DEFAULT_CAP, DEFAULT_SEED,
    MAX_PERIODS, MAX_SCENARIOS,
};
pub use sampler::{FactorPaths, RiskFactorSampler};
pub use sink::ArtifactSink;
