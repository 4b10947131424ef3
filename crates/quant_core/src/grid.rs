//! Discretised time grids.

/// Returns `n` evenly spaced points over the closed interval `[start, end]`.
///
/// Both endpoints are included when `n >= 2`; `n == 1` yields `[start]` and
/// `n == 0` yields an empty grid.
///
/// # Examples
///
/// ```
/// use quant_core::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(0.0, 2.0, 1), vec![0.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // pin the endpoint against accumulated rounding
            grid[n - 1] = end;
            grid
        }
    }
}
