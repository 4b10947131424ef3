//! # quant_risk: Horizon Risk Metrics
//!
//! ## Layer 4 Role
//!
//! quant_risk reads the outcome of a register simulation and reduces it to
//! the figures a risk committee looks at:
//!
//! - [`statistics`]: [`HorizonStatistics`] (percentiles, expected shortfall,
//!   mean, median, mode) of the aggregate impact at the horizon
//! - [`summary`]: [`PerFactorHorizonSummary`], each factor's horizon impacts
//!   annotated with taxonomy and title
//! - [`extractor`]: [`StatisticsExtractor`] producing both from a
//!   [`SimulationOutcome`](quant_simulation::SimulationOutcome)
//! - [`exceedance`]: the loss exceedance curve
//! - [`taxonomy`]: contribution of each taxonomy category
//!
//! ## Example
//!
//! ```rust
//! use quant_models::{RiskFactorDefinition, RiskFactorId, SeverityModel};
//! use quant_risk::StatisticsExtractor;
//! use quant_simulation::{SimulationAggregator, SimulationConfig};
//!
//! let register = vec![RiskFactorDefinition::new(
//!     RiskFactorId::new(1),
//!     "Litigation",
//!     "Legal",
//!     0.25,
//!     SeverityModel::Normal { mean: 1_000.0, std_dev: 200.0 },
//! )
//! .unwrap()];
//!
//! let config = SimulationConfig::builder().n_scenarios(5_000).n_periods(2).build().unwrap();
//! let outcome = SimulationAggregator::new(config).run(&register).unwrap();
//! let report = StatisticsExtractor::new().extract_outcome(&outcome, &register).unwrap();
//!
//! assert!(report.statistics.p90 <= report.statistics.p99);
//! assert_eq!(report.summary.len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation of report types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod exceedance;
pub mod extractor;
pub mod statistics;
pub mod summary;
pub mod taxonomy;

pub use exceedance::{loss_exceedance_curve, ExceedancePoint};
pub use extractor::{HorizonReport, StatisticsExtractor};
pub use statistics::{HorizonStatistics, HORIZON_PERCENTILES};
pub use summary::{HorizonSummaryRow, PerFactorHorizonSummary};
pub use taxonomy::{taxonomy_breakdown, TaxonomyContribution};
