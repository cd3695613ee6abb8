//! Fallible network preparation so benchmarks can propagate setup errors.

use nodenet_core::{CandidateSampling, Network, NetworkBuilder, RngSource};

use crate::error::BenchSetupError;

/// Builds a seeded network with `nodes` nodes and no links.
///
/// # Errors
/// Returns [`BenchSetupError`] if the network cannot be built.
pub fn seeded_network(
    nodes: usize,
    seed: u64,
    sampling: CandidateSampling,
) -> Result<Network<RngSource>, BenchSetupError> {
    let network = NetworkBuilder::new()
        .with_nodes(nodes)
        .with_seed(seed)
        .with_candidate_sampling(sampling)
        .build()?;
    if network.size() != nodes {
        return Err(BenchSetupError::UnexpectedSize {
            expected: nodes,
            actual: network.size(),
        });
    }
    Ok(network)
}

/// Builds a seeded network and connects it once with `mean_degree`.
///
/// # Errors
/// Returns [`BenchSetupError`] if building or connecting fails.
pub fn connected_network(
    nodes: usize,
    mean_degree: f64,
    seed: u64,
) -> Result<Network<RngSource>, BenchSetupError> {
    let mut network = seeded_network(nodes, seed, CandidateSampling::default())?;
    network.random_connect(mean_degree)?;
    Ok(network)
}
