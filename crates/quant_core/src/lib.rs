//! # quant_core: Foundation for Risk Register Quantification
//!
//! ## Layer 1 (Foundation) Role
//!
//! quant_core is the bottom layer of the quantification workspace, providing:
//! - The workspace error type: [`RiskError`] (`error`)
//! - Row-major period × scenario matrices: [`PathMatrix`], [`MaterializationMap`] (`matrix`)
//! - Explicitly seeded random number generation: [`SimulationRng`] (`rng`)
//! - Discretised time grids: [`linspace`] (`grid`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other quant_* crates, with minimal external dependencies:
//! - rand / rand_distr: seeded generators and sampling distributions
//! - thiserror: error derivation
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use quant_core::{PathMatrix, SimulationRng};
//!
//! let mut rng = SimulationRng::for_period(110, 7, 0);
//! let mut impacts = PathMatrix::zeros(3, 4);
//! rng.fill_normal(impacts.row_mut(0));
//!
//! assert_eq!(impacts.n_periods(), 3);
//! assert_eq!(impacts.last_row().len(), 4);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for matrices

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod grid;
pub mod matrix;
pub mod rng;

pub use error::{RiskError, RiskResult};
pub use grid::linspace;
pub use matrix::{MaterializationMap, Matrix, PathMatrix};
pub use rng::SimulationRng;
