//! Benchmark parameter types, rendered as Criterion benchmark IDs.

use std::fmt;

use nodenet_core::CandidateSampling;

/// Parameters for a resize benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ResizeBenchParams {
    /// Node count before the resize.
    pub from: usize,
    /// Node count after the resize.
    pub to: usize,
}

impl fmt::Display for ResizeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Parameters for a random-connection benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ConnectBenchParams {
    /// Node count of the network being connected.
    pub nodes: usize,
    /// Requested mean degree.
    pub mean_degree: f64,
    /// Candidate sampling strategy.
    pub sampling: CandidateSampling,
}

impl fmt::Display for ConnectBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sampling = match self.sampling {
            CandidateSampling::WithoutReplacement => "perm",
            CandidateSampling::WithReplacement => "uniform",
        };
        write!(f, "n={},k={},{sampling}", self.nodes, self.mean_degree)
    }
}
