//! Random-number capability consumed by [`crate::Network`].
//!
//! The network never samples directly; every draw goes through a
//! [`RandomSource`] so tests can substitute scripted sequences.

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use rand_distr::{Distribution, Normal, Poisson};

use crate::error::RandomSourceError;

/// Largest Poisson mean accepted by [`RngSource::poisson`].
///
/// `rand_distr` 0.4 never returns for means near `f64::MAX`; this is the
/// bound later `rand_distr` releases enforce themselves.
pub const MAX_POISSON_MEAN: f64 = 1.844e19;

/// Sampling primitives required to build and reset a network.
///
/// # Examples
/// ```
/// use nodenet_core::{RandomSource, RngSource};
///
/// let mut source = RngSource::from_seed(7);
/// let value = source.normal(0.0, 1.0)?;
/// assert!(value.is_finite());
///
/// let draws = source.uniform_int(4, 2, 5)?;
/// assert_eq!(draws.len(), 4);
/// assert!(draws.iter().all(|draw| (2..=5).contains(draw)));
///
/// let mut permutation = source.permutation(5);
/// permutation.sort_unstable();
/// assert_eq!(permutation, [0, 1, 2, 3, 4]);
/// # Ok::<(), nodenet_core::RandomSourceError>(())
/// ```
pub trait RandomSource {
    /// Draws one sample from a normal distribution.
    ///
    /// # Errors
    /// Returns [`RandomSourceError::InvalidParameter`] when `std_dev` is
    /// negative or either parameter is not finite.
    fn normal(&mut self, mean: f64, std_dev: f64) -> Result<f64, RandomSourceError>;

    /// Draws one sample from a Poisson distribution.
    ///
    /// A mean of zero always yields zero.
    ///
    /// # Errors
    /// Returns [`RandomSourceError::InvalidParameter`] when `mean` is negative,
    /// not finite, or above [`MAX_POISSON_MEAN`].
    fn poisson(&mut self, mean: f64) -> Result<u64, RandomSourceError>;

    /// Draws `count` integers uniformly from the inclusive range
    /// `low..=high`, with replacement.
    ///
    /// # Errors
    /// Returns [`RandomSourceError::InvalidParameter`] when `low > high`.
    fn uniform_int(
        &mut self,
        count: usize,
        low: usize,
        high: usize,
    ) -> Result<Vec<usize>, RandomSourceError>;

    /// Returns the indices `0..len` in uniformly random order.
    fn permutation(&mut self, len: usize) -> Vec<usize>;

    /// Draws a float uniformly from `[0, 1)`.
    fn unit_interval(&mut self) -> f64;
}

/// Default [`RandomSource`] backed by [`SmallRng`] and `rand_distr`.
#[derive(Clone, Debug)]
pub struct RngSource {
    rng: SmallRng,
}

impl RngSource {
    /// Creates a reproducible source from `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl RandomSource for RngSource {
    fn normal(&mut self, mean: f64, std_dev: f64) -> Result<f64, RandomSourceError> {
        if !mean.is_finite() || !std_dev.is_finite() {
            return Err(invalid(
                "normal",
                format!("parameters must be finite (got mean={mean}, std_dev={std_dev})"),
            ));
        }
        let distribution =
            Normal::new(mean, std_dev).map_err(|err| invalid("normal", err.to_string()))?;
        Ok(distribution.sample(&mut self.rng))
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Poisson draws are non-negative whole numbers"
    )]
    fn poisson(&mut self, mean: f64) -> Result<u64, RandomSourceError> {
        if !mean.is_finite() || mean < 0.0 {
            return Err(invalid(
                "poisson",
                format!("mean must be finite and non-negative (got {mean})"),
            ));
        }
        if mean > MAX_POISSON_MEAN {
            return Err(invalid(
                "poisson",
                format!("mean must not exceed {MAX_POISSON_MEAN:e} (got {mean:e})"),
            ));
        }
        if mean == 0.0 {
            return Ok(0);
        }
        let distribution =
            Poisson::new(mean).map_err(|err| invalid("poisson", err.to_string()))?;
        let draw: f64 = distribution.sample(&mut self.rng);
        Ok(draw as u64)
    }

    fn uniform_int(
        &mut self,
        count: usize,
        low: usize,
        high: usize,
    ) -> Result<Vec<usize>, RandomSourceError> {
        if low > high {
            return Err(invalid(
                "uniform_int",
                format!("low ({low}) must not exceed high ({high})"),
            ));
        }
        Ok((0..count).map(|_| self.rng.gen_range(low..=high)).collect())
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut self.rng);
        indices
    }

    fn unit_interval(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

fn invalid(distribution: &'static str, reason: String) -> RandomSourceError {
    RandomSourceError::InvalidParameter {
        distribution,
        reason,
    }
}
