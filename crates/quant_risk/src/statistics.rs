//! Horizon statistics of the aggregate impact distribution.
//!
//! Percentiles use linear interpolation between order statistics with
//! `rank = q · (n − 1)`. Expected shortfall at a percentile is the mean of
//! every sample at or above the percentile threshold.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quant_core::{RiskError, RiskResult};

/// Percentile levels reported at the horizon, in percent.
pub const HORIZON_PERCENTILES: [f64; 4] = [90.0, 95.0, 99.0, 99.999];

/// Percentile of pre-sorted samples by linear interpolation.
///
/// `q` is in percent and clamped to `[0, 100]`. Returns `NaN` for an empty
/// slice.
///
/// # Examples
///
/// ```rust
/// use quant_risk::statistics::percentile;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&sorted, 50.0), 2.5);
/// assert_eq!(percentile(&sorted, 100.0), 4.0);
/// ```
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let rank = (q.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi {
        return a;
    }
    // Rounding may push the interpolant past `b`; keep it inside the bracket.
    (a + (b - a) * (rank - lo as f64)).clamp(a, b)
}

/// Mean of the pre-sorted samples at or above `threshold`.
///
/// Returns `NaN` when no sample reaches the threshold.
pub fn expected_shortfall(sorted: &[f64], threshold: f64) -> f64 {
    let start = sorted.partition_point(|&v| v < threshold);
    let tail = &sorted[start..];
    if tail.is_empty() {
        return f64::NAN;
    }
    // Summing excesses keeps the result at or above the threshold under rounding.
    let excess = tail.iter().map(|&v| v - threshold).sum::<f64>() / tail.len() as f64;
    threshold + excess
}

/// Most frequent exact value of pre-sorted samples; ties go to the smallest.
///
/// Returns `NaN` for an empty slice.
pub fn mode(sorted: &[f64]) -> f64 {
    let mut best = f64::NAN;
    let mut best_count = 0;
    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let run = sorted[i..].iter().take_while(|&&v| v == value).count();
        if run > best_count {
            best = value;
            best_count = run;
        }
        i += run;
    }
    best
}

/// Tail and central statistics of the aggregate impact at the horizon.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HorizonStatistics {
    /// 90th percentile impact.
    pub p90: f64,
    /// 95th percentile impact.
    pub p95: f64,
    /// 99th percentile impact.
    pub p99: f64,
    /// 99.999th percentile impact.
    pub p99_999: f64,
    /// Expected shortfall beyond the 90th percentile.
    pub es90: f64,
    /// Expected shortfall beyond the 95th percentile.
    pub es95: f64,
    /// Expected shortfall beyond the 99th percentile.
    pub es99: f64,
    /// Expected shortfall beyond the 99.999th percentile.
    pub es99_999: f64,
    /// Expected impact.
    pub mean: f64,
    /// Median impact.
    pub median: f64,
    /// Most frequent impact.
    pub mode: f64,
}

impl HorizonStatistics {
    /// Computes the statistics of horizon samples (in any order).
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] if `samples` is empty or
    /// contains a NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quant_risk::HorizonStatistics;
    ///
    /// let samples: Vec<f64> = (1..=100).map(f64::from).collect();
    /// let stats = HorizonStatistics::from_samples(&samples).unwrap();
    ///
    /// assert!((stats.p90 - 90.1).abs() < 1e-12);
    /// assert_eq!(stats.median, 50.5);
    /// assert!(stats.es90 >= stats.p90);
    /// ```
    pub fn from_samples(samples: &[f64]) -> RiskResult<Self> {
        if samples.is_empty() {
            return Err(RiskError::invalid_parameter(
                "horizon statistics",
                "samples",
                "at least one scenario is required",
            ));
        }
        if samples.iter().any(|v| v.is_nan()) {
            return Err(RiskError::invalid_parameter(
                "horizon statistics",
                "samples",
                "must not contain NaN",
            ));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let [p90, p95, p99, p99_999] = HORIZON_PERCENTILES.map(|q| percentile(&sorted, q));

        Ok(Self {
            p90,
            p95,
            p99,
            p99_999,
            es90: expected_shortfall(&sorted, p90),
            es95: expected_shortfall(&sorted, p95),
            es99: expected_shortfall(&sorted, p99),
            es99_999: expected_shortfall(&sorted, p99_999),
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            median: percentile(&sorted, 50.0),
            mode: mode(&sorted),
        })
    }

    /// Labelled values in report order.
    pub fn labelled(&self) -> [(&'static str, f64); 11] {
        [
            ("90%-Percentile Impact", self.p90),
            ("95%-Percentile Impact", self.p95),
            ("99%-Percentile Impact", self.p99),
            ("99.999%-Percentile Impact", self.p99_999),
            ("90% ES", self.es90),
            ("95% ES", self.es95),
            ("99% ES", self.es99),
            ("99.999% ES", self.es99_999),
            ("Expected Impact", self.mean),
            ("Median Impact", self.median),
            ("Mode Impact", self.mode),
        ]
    }
}
