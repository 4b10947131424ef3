//! Period × scenario matrices.
//!
//! All simulation output is stored as dense row-major matrices where each
//! row is one period (step) and each column is one scenario:
//! `data[period * n_scenarios + scenario]`.
//!
//! Row-major layout keeps a whole period contiguous, which is the unit the
//! sampler produces and the unit the statistics extractor consumes (the
//! final row is the horizon).

use std::ops::AddAssign;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// Dense row-major matrix with one row per period and one column per scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix<T> {
    n_periods: usize,
    n_scenarios: usize,
    data: Vec<T>,
}

/// Impact matrix: sampled severity contribution per period and scenario.
pub type PathMatrix = Matrix<f64>;

/// Materialization matrix: 1 if the risk fired in that period and scenario, else 0.
pub type MaterializationMap = Matrix<u8>;

impl<T: Copy + Default> Matrix<T> {
    /// Creates a matrix filled with `T::default()` (zero for numeric types).
    pub fn zeros(n_periods: usize, n_scenarios: usize) -> Self {
        Self {
            n_periods,
            n_scenarios,
            data: vec![T::default(); n_periods * n_scenarios],
        }
    }

    /// Builds a matrix from equally sized rows.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::DimensionMismatch`] if any row length differs
    /// from the first row's length.
    ///
    /// # Examples
    ///
    /// ```
    /// use quant_core::PathMatrix;
    ///
    /// let m = PathMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.get(1, 0), 3.0);
    /// ```
    pub fn from_rows(rows: Vec<Vec<T>>) -> RiskResult<Self> {
        let n_periods = rows.len();
        let n_scenarios = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_periods * n_scenarios);

        for row in rows {
            if row.len() != n_scenarios {
                return Err(RiskError::DimensionMismatch {
                    expected_periods: n_periods,
                    expected_scenarios: n_scenarios,
                    actual_periods: n_periods,
                    actual_scenarios: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            n_periods,
            n_scenarios,
            data,
        })
    }
}

impl<T> Matrix<T> {
    /// Number of periods (rows).
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// Number of scenarios (columns).
    #[inline]
    pub fn n_scenarios(&self) -> usize {
        self.n_scenarios
    }

    /// Shape as `(n_periods, n_scenarios)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_periods, self.n_scenarios)
    }

    /// Returns the row for `period`.
    ///
    /// # Panics
    ///
    /// Panics if `period >= n_periods`.
    #[inline]
    pub fn row(&self, period: usize) -> &[T] {
        let start = period * self.n_scenarios;
        &self.data[start..start + self.n_scenarios]
    }

    /// Returns the mutable row for `period`.
    ///
    /// # Panics
    ///
    /// Panics if `period >= n_periods`.
    #[inline]
    pub fn row_mut(&mut self, period: usize) -> &mut [T] {
        let start = period * self.n_scenarios;
        &mut self.data[start..start + self.n_scenarios]
    }

    /// Iterates over rows in period order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact(0) panics; zero-scenario matrices yield no rows
        self.data
            .chunks_exact(self.n_scenarios.max(1))
            .take(self.n_periods)
    }

    /// Returns the horizon row (final period), or an empty slice for an empty matrix.
    #[inline]
    pub fn last_row(&self) -> &[T] {
        match self.n_periods {
            0 => &[],
            n => self.row(n - 1),
        }
    }

    /// Flat row-major view of all values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Verifies that `other` has the same shape as `self`.
    pub fn ensure_same_shape<U>(&self, other: &Matrix<U>) -> RiskResult<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(RiskError::DimensionMismatch {
                expected_periods: self.n_periods,
                expected_scenarios: self.n_scenarios,
                actual_periods: other.n_periods,
                actual_scenarios: other.n_scenarios,
            })
        }
    }
}

impl<T: Copy> Matrix<T> {
    /// Returns the value at `(period, scenario)`.
    #[inline]
    pub fn get(&self, period: usize, scenario: usize) -> T {
        self.data[period * self.n_scenarios + scenario]
    }
}

impl<T: Copy + AddAssign> Matrix<T> {
    /// Adds `other` elementwise into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::DimensionMismatch`] if the shapes differ; `self`
    /// is left untouched in that case.
    pub fn add_assign_checked(&mut self, other: &Self) -> RiskResult<()> {
        self.ensure_same_shape(other)?;
        for (acc, &value) in self.data.iter_mut().zip(other.data.iter()) {
            *acc += value;
        }
        Ok(())
    }
}
