//! Seeded generator used by the register sampler and process generators.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Bernoulli, Distribution, StandardNormal};

/// Derives the seed of one period's generator for one risk factor.
///
/// `seed = base_seed + risk_id + period` with wrapping arithmetic. The formula
/// is a reproducibility contract: registers quantified with the same base
/// seed always replay the same draws.
///
/// Streams are distinct for different factors at the same period, but not
/// across periods: `(risk_id, period + 1)` and `(risk_id + 1, period)` map
/// to the same seed. Two factors with consecutive ids and identical severity
/// models therefore replay the same draws shifted by one period.
///
/// # Examples
///
/// ```rust
/// use quant_core::rng::derive_period_seed;
///
/// assert_eq!(derive_period_seed(110, 7, 2), 119);
/// assert_eq!(derive_period_seed(u64::MAX, 1, 0), 0);
/// ```
#[inline]
pub fn derive_period_seed(base_seed: u64, risk_id: u64, period: usize) -> u64 {
    base_seed
        .wrapping_add(risk_id)
        .wrapping_add(period as u64)
}

/// Explicitly seeded pseudo-random stream.
///
/// A `SimulationRng` is an ordinary value. The sampler builds a fresh one for
/// every `(risk factor, period)` pair and drops it after the period is drawn,
/// so no generator is ever shared between concurrently sampled factors.
///
/// # Examples
///
/// ```rust
/// use quant_core::rng::SimulationRng;
/// use rand_distr::Bernoulli;
///
/// let mut rng = SimulationRng::for_period(110, 3, 0);
/// assert_eq!(rng.seed(), 113);
///
/// let mut mask = [0u8; 8];
/// rng.fill_bernoulli(&Bernoulli::new(0.5).unwrap(), &mut mask);
/// assert!(mask.iter().all(|&m| m <= 1));
/// ```
#[derive(Clone, Debug)]
pub struct SimulationRng {
    inner: StdRng,
    seed: u64,
}

impl SimulationRng {
    /// Generator seeded directly with `seed`.
    ///
    /// Two generators built from the same seed yield identical streams:
    ///
    /// ```rust
    /// use quant_core::rng::SimulationRng;
    ///
    /// let mut a = SimulationRng::from_seed(2024);
    /// let mut b = SimulationRng::from_seed(2024);
    /// assert_eq!(a.gen_normal(), b.gen_normal());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates the generator for one period of one risk factor.
    ///
    /// Equivalent to `from_seed(derive_period_seed(base_seed, risk_id, period))`.
    #[inline]
    pub fn for_period(base_seed: u64, risk_id: u64, period: usize) -> Self {
        Self::from_seed(derive_period_seed(base_seed, risk_id, period))
    }

    /// Seed this stream was built from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One standard normal draw.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Overwrites `buffer` with standard normal draws (Brownian increments
    /// before scaling by `sqrt(dt)`).
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        buffer
            .iter_mut()
            .for_each(|z| *z = StandardNormal.sample(&mut self.inner));
    }

    /// Overwrites `buffer` with severity draws from `distribution`.
    #[inline]
    pub fn fill_from<D: Distribution<f64>>(&mut self, distribution: &D, buffer: &mut [f64]) {
        buffer
            .iter_mut()
            .for_each(|x| *x = distribution.sample(&mut self.inner));
    }

    /// Overwrites `mask` with materialization outcomes, `1` when the risk fires.
    #[inline]
    pub fn fill_bernoulli(&mut self, distribution: &Bernoulli, mask: &mut [u8]) {
        mask.iter_mut()
            .for_each(|m| *m = u8::from(distribution.sample(&mut self.inner)));
    }
}
