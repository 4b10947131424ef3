//! # quant_models: Risk Factors and Stochastic Processes
//!
//! ## Layer 2 Role
//!
//! quant_models describes *what* is simulated, without running the
//! register-wide simulation itself:
//!
//! - [`risk_factor`]: [`RiskFactorId`] and validated [`RiskFactorDefinition`]s
//! - [`distribution`]: the closed set of severity models ([`SeverityModel`]) and
//!   the log-normal tail-bound transform ([`LogNormalParams`])
//! - [`processes`]: continuous-time path generators (exponential drift and
//!   mean reversion) sharing a discretised time grid
//!
//! ## Example
//!
//! ```
//! use quant_models::{RiskFactorDefinition, RiskFactorId, SeverityModel};
//!
//! let factor = RiskFactorDefinition::new(
//!     RiskFactorId::new(7),
//!     "Supplier insolvency",
//!     "Operational",
//!     0.05,
//!     SeverityModel::LogNormal { lower_bound: 1_000.0, upper_bound: 10_000.0 },
//! )
//! .unwrap();
//!
//! assert_eq!(factor.id().value(), 7);
//! assert_eq!(factor.severity().kind().as_str(), "Lognormal");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod distribution;
pub mod processes;
pub mod risk_factor;

pub use distribution::{DistributionKind, LogNormalParams, SeverityFields, SeverityModel};
pub use processes::{
    ExponentialDriftParams, ExponentialDriftProcess, MeanRevertingParams, MeanRevertingProcess,
    ProcessGrid, ProcessModel, ProcessPaths, StochasticProcess,
};
pub use risk_factor::{RiskFactorDefinition, RiskFactorId};
