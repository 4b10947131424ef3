//! # adapter_register: Risk Register Adapter
//!
//! Loads a risk register from CSV into validated
//! [`RiskFactorDefinition`](quant_models::RiskFactorDefinition)s.
//!
//! Required columns: `Risk`, `Risk Title`, `Taxonomy Level I`,
//! `Distribution`, `Converted Likelihood`, `Converted Lower Impact`,
//! `Converted Max Impact`, `Mean`, `Std`. Numeric cells a distribution does
//! not use may be left empty.

#![deny(missing_docs)]

pub mod error;
pub mod reader;
pub mod row;

pub use error::RegisterError;
pub use reader::RegisterReader;
pub use row::{RegisterRow, REQUIRED_COLUMNS};
