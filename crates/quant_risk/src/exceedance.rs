//! Loss exceedance curve.
//!
//! Horizon losses are sorted in descending order and the `k`-th largest
//! (1-based) is paired with the exceedance probability `k / n`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One point of the loss exceedance curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExceedancePoint {
    /// Simulated loss.
    pub loss: f64,
    /// Fraction of scenarios with a loss at or above this point's rank.
    pub probability: f64,
}

/// Builds the loss exceedance curve of horizon losses.
///
/// NaN losses sort after every number and therefore appear first.
///
/// # Examples
///
/// ```rust
/// use quant_risk::loss_exceedance_curve;
///
/// let curve = loss_exceedance_curve(&[10.0, 30.0, 20.0, 40.0]);
/// assert_eq!(curve[0].loss, 40.0);
/// assert_eq!(curve[0].probability, 0.25);
/// assert_eq!(curve[3].loss, 10.0);
/// assert_eq!(curve[3].probability, 1.0);
/// ```
pub fn loss_exceedance_curve(losses: &[f64]) -> Vec<ExceedancePoint> {
    let mut sorted = losses.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let n = sorted.len() as f64;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, loss)| ExceedancePoint {
            loss,
            probability: (i + 1) as f64 / n,
        })
        .collect()
}
