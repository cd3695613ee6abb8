//! Shared test utilities for `nodenet-core`.

use std::collections::VecDeque;

use nodenet_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{error::RandomSourceError, random::RandomSource};

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// [`RandomSource`] replaying scripted draws and recording how often each
/// primitive was called.
///
/// Normal draws without a script return `1.0, 2.0, 3.0, …` so resampled
/// values are easy to tell apart. Poisson draws fall back to a fixed value,
/// unit draws fall back to `0.0` and candidate sequences fall back to the
/// identity ordering.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedSource {
    normals: VecDeque<f64>,
    fail_exhausted_normals: bool,
    poissons: VecDeque<u64>,
    poisson_fallback: u64,
    candidates: VecDeque<Vec<usize>>,
    units: VecDeque<f64>,
    pub(crate) normal_calls: usize,
    pub(crate) poisson_calls: usize,
    pub(crate) permutation_calls: usize,
    pub(crate) uniform_calls: usize,
    pub(crate) unit_calls: usize,
}

impl ScriptedSource {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn with_normals(mut self, normals: &[f64]) -> Self {
        self.normals.extend(normals);
        self
    }

    /// Makes normal draws fail once the scripted values run out.
    #[must_use]
    pub(crate) fn failing_after_normals(mut self) -> Self {
        self.fail_exhausted_normals = true;
        self
    }

    #[must_use]
    pub(crate) fn with_poissons(mut self, draws: &[u64]) -> Self {
        self.poissons.extend(draws);
        self
    }

    #[must_use]
    pub(crate) fn with_poisson_fallback(mut self, draw: u64) -> Self {
        self.poisson_fallback = draw;
        self
    }

    #[must_use]
    pub(crate) fn with_units(mut self, units: &[f64]) -> Self {
        self.units.extend(units);
        self
    }

    #[must_use]
    pub(crate) fn with_candidates(mut self, sequences: &[&[usize]]) -> Self {
        self.candidates
            .extend(sequences.iter().map(|sequence| sequence.to_vec()));
        self
    }
}

impl RandomSource for ScriptedSource {
    #[expect(
        clippy::cast_precision_loss,
        reason = "call counters stay far below f64 precision limits in tests"
    )]
    fn normal(&mut self, _mean: f64, _std_dev: f64) -> Result<f64, RandomSourceError> {
        self.normal_calls += 1;
        match self.normals.pop_front() {
            Some(value) => Ok(value),
            None if self.fail_exhausted_normals => Err(failure("normal")),
            None => Ok(self.normal_calls as f64),
        }
    }

    fn poisson(&mut self, _mean: f64) -> Result<u64, RandomSourceError> {
        self.poisson_calls += 1;
        Ok(self.poissons.pop_front().unwrap_or(self.poisson_fallback))
    }

    fn uniform_int(
        &mut self,
        count: usize,
        low: usize,
        _high: usize,
    ) -> Result<Vec<usize>, RandomSourceError> {
        self.uniform_calls += 1;
        Ok(self
            .candidates
            .pop_front()
            .unwrap_or_else(|| vec![low; count]))
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        self.permutation_calls += 1;
        self.candidates
            .pop_front()
            .unwrap_or_else(|| (0..len).collect())
    }

    fn unit_interval(&mut self) -> f64 {
        self.unit_calls += 1;
        self.units.pop_front().unwrap_or(0.0)
    }
}

/// [`RandomSource`] whose Poisson and uniform draws fail. Normal draws
/// succeed so networks can still be sized.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FailingSource;

impl RandomSource for FailingSource {
    fn normal(&mut self, mean: f64, _std_dev: f64) -> Result<f64, RandomSourceError> {
        Ok(mean)
    }

    fn poisson(&mut self, _mean: f64) -> Result<u64, RandomSourceError> {
        Err(failure("poisson"))
    }

    fn uniform_int(
        &mut self,
        _count: usize,
        _low: usize,
        _high: usize,
    ) -> Result<Vec<usize>, RandomSourceError> {
        Err(failure("uniform_int"))
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    fn unit_interval(&mut self) -> f64 {
        0.0
    }
}

fn failure(distribution: &'static str) -> RandomSourceError {
    RandomSourceError::InvalidParameter {
        distribution,
        reason: "scripted failure".to_owned(),
    }
}
