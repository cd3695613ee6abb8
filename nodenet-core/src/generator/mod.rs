//! Poisson-degree random graph construction.
//!
//! The generator holds no graph state of its own. Each call clears the link
//! table and rebuilds it node by node from draws supplied by the caller's
//! [`RandomSource`].

use std::num::NonZeroUsize;

use tracing::{debug, info, trace};

use crate::{
    Result,
    builder::{CandidateSampling, DEFAULT_MAX_DEGREE_DRAWS},
    error::NetworkError,
    links::LinkTable,
    network::validate_link,
    random::{MAX_POISSON_MEAN, RandomSource},
};

mod truncated;

use truncated::truncated_poisson;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Generator {
    sampling: CandidateSampling,
    max_degree_draws: NonZeroUsize,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            sampling: CandidateSampling::default(),
            max_degree_draws: NonZeroUsize::new(DEFAULT_MAX_DEGREE_DRAWS)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Generator {
    pub(crate) const fn new(sampling: CandidateSampling, max_degree_draws: NonZeroUsize) -> Self {
        Self {
            sampling,
            max_degree_draws,
        }
    }

    pub(crate) const fn sampling(&self) -> CandidateSampling {
        self.sampling
    }

    /// Clears `links` and rebuilds them, returning the number of links
    /// created.
    pub(crate) fn connect<R: RandomSource>(
        &self,
        links: &mut LinkTable,
        source: &mut R,
        mean_degree: f64,
    ) -> Result<usize> {
        if !(0.0..=MAX_POISSON_MEAN).contains(&mean_degree) {
            return Err(NetworkError::InvalidMeanDegree { mean: mean_degree });
        }
        links.clear();
        let size = links.node_count();
        if mean_degree == 0.0 || size == 0 {
            info!(links = 0, "random connection completed");
            return Ok(0);
        }

        let mut created = 0;
        for node in 0..size {
            let target_degree = self.draw_degree(source, node, size, mean_degree)?;
            if target_degree == 0 {
                trace!(node, "node drew degree zero");
                continue;
            }
            let candidates = self.draw_candidates(source, size)?;
            let mut accepted = 0;
            for &candidate in candidates.iter().take(target_degree) {
                if validate_link(node, candidate, size).is_ok() {
                    links.insert(node, candidate);
                    accepted += 1;
                } else {
                    trace!(node, candidate, "candidate rejected");
                }
            }
            trace!(node, target_degree, accepted, "node connected");
            created += accepted;
        }

        info!(links = created, "random connection completed");
        Ok(created)
    }

    /// Draws a Poisson degree conditioned on falling in `0..size`.
    ///
    /// Rejection sampling runs first. Once the redraw cap is spent the
    /// degree comes from the truncated distribution directly, which is the
    /// distribution rejection converges to.
    fn draw_degree<R: RandomSource>(
        &self,
        source: &mut R,
        node: usize,
        size: usize,
        mean_degree: f64,
    ) -> Result<usize> {
        if size <= 1 {
            return Ok(0);
        }
        let attempts = self.max_degree_draws.get();
        for _ in 0..attempts {
            let draw = source.poisson(mean_degree)?;
            match usize::try_from(draw) {
                Ok(degree) if degree < size => return Ok(degree),
                _ => trace!(node, draw, size, "degree draw rejected"),
            }
        }
        debug!(node, attempts, size, "redraw cap reached; sampling truncated Poisson");
        Ok(truncated_poisson(source, mean_degree, size))
    }

    fn draw_candidates<R: RandomSource>(&self, source: &mut R, size: usize) -> Result<Vec<usize>> {
        let candidates = match self.sampling {
            CandidateSampling::WithoutReplacement => source.permutation(size),
            CandidateSampling::WithReplacement => {
                source.uniform_int(size, 0, size.saturating_sub(1))?
            }
        };
        Ok(candidates)
    }
}

#[cfg(test)]
mod property;
