use nodenet_core::{RandomSource, RandomSourceError};

/// Deterministic [`RandomSource`]: normal draws return the mean, every
/// Poisson draw returns `degree`, unit draws return `0.0`, and candidate
/// sequences run in reverse index order.
#[derive(Clone, Copy, Debug)]
pub struct FixedSource {
    degree: u64,
}

impl FixedSource {
    #[must_use]
    pub fn new(degree: u64) -> Self {
        Self { degree }
    }
}

impl RandomSource for FixedSource {
    fn normal(&mut self, mean: f64, _std_dev: f64) -> Result<f64, RandomSourceError> {
        Ok(mean)
    }

    fn poisson(&mut self, _mean: f64) -> Result<u64, RandomSourceError> {
        Ok(self.degree)
    }

    fn uniform_int(
        &mut self,
        count: usize,
        _low: usize,
        high: usize,
    ) -> Result<Vec<usize>, RandomSourceError> {
        Ok(vec![high; count])
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (0..len).rev().collect()
    }

    fn unit_interval(&mut self) -> f64 {
        0.0
    }
}
