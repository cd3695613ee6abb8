//! Benchmark setup error type.

use nodenet_core::NetworkError;

/// Errors that may occur while preparing a benchmark input.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building, resizing or connecting the network failed.
    #[error("network setup failed: {0}")]
    Network(#[from] NetworkError),
    /// The prepared network did not have the requested shape.
    #[error("expected {expected} nodes after setup, found {actual}")]
    UnexpectedSize {
        /// Requested node count.
        expected: usize,
        /// Node count actually produced.
        actual: usize,
    },
}
