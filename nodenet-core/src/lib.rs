//! nodenet core library.
//!
//! An in-memory undirected multigraph whose nodes carry scalar values, for
//! simulation code that mutates topology and node state independently.
//! Randomness is injected through [`RandomSource`]; [`RngSource`] is the
//! default implementation.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod generator;
mod invariants;
mod links;
mod network;
mod nodes;
mod random;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{CandidateSampling, DEFAULT_MAX_DEGREE_DRAWS, NetworkBuilder, ResizePolicy},
    error::{NetworkError, NetworkErrorCode, RandomSourceError, RandomSourceErrorCode, Result},
    invariants::{LinkInvariant, LinkInvariantViolation},
    network::Network,
    random::{MAX_POISSON_MEAN, RandomSource, RngSource},
};
