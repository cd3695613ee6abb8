//! Structural invariant checks for the link table.
//!
//! Surfaced via [`crate::Network::check_invariants`] so property tests can
//! assert topology health after each mutation without reaching into the
//! adjacency storage.

mod bidirectional;
mod bounds;

use thiserror::Error;

use crate::links::LinkTable;

use self::{bidirectional::check_bidirectional, bounds::check_bounds};

/// Enumerates the structural invariants enforced on the link table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LinkInvariant {
    /// Every entry references nodes below the node count and never links a
    /// node to itself.
    Bounds,
    /// Every directed entry has a reverse entry with equal multiplicity.
    BidirectionalLinks,
}

impl LinkInvariant {
    /// Returns all invariants in the order they are evaluated.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Bounds, Self::BidirectionalLinks]
    }
}

/// Reports the first invariant violation found in the link table.
#[non_exhaustive]
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LinkInvariantViolation {
    /// The adjacency storage tracks a different node count than the values.
    #[error("link table tracks {actual} nodes but the network has {expected}")]
    NodeCountMismatch {
        /// Node count of the value store.
        expected: usize,
        /// Node count of the adjacency storage.
        actual: usize,
    },
    /// An entry references a node at or beyond the node count.
    #[error("link {origin} -> {target} references a node outside 0..{size}")]
    OutOfRange {
        /// Node owning the entry.
        origin: usize,
        /// Referenced node.
        target: usize,
        /// Node count of the network.
        size: usize,
    },
    /// An entry links a node to itself.
    #[error("node {node} links to itself")]
    SelfLoop {
        /// Offending node.
        node: usize,
    },
    /// The reverse entries do not match the forward entries.
    #[error("link {origin} -> {target} appears {forward} time(s) but its reverse {backward} time(s)")]
    MissingBacklink {
        /// Node owning the forward entries.
        origin: usize,
        /// Referenced node.
        target: usize,
        /// Multiplicity of `origin -> target`.
        forward: usize,
        /// Multiplicity of `target -> origin`.
        backward: usize,
    },
}

impl LinkInvariantViolation {
    /// Returns the invariant the violation belongs to.
    #[must_use]
    pub const fn invariant(&self) -> LinkInvariant {
        match self {
            Self::NodeCountMismatch { .. } | Self::OutOfRange { .. } | Self::SelfLoop { .. } => {
                LinkInvariant::Bounds
            }
            Self::MissingBacklink { .. } => LinkInvariant::BidirectionalLinks,
        }
    }
}

/// Runs every invariant against `links`, stopping at the first violation.
pub(crate) fn check_links(
    links: &LinkTable,
    node_count: usize,
) -> Result<(), LinkInvariantViolation> {
    for invariant in LinkInvariant::all() {
        match invariant {
            LinkInvariant::Bounds => check_bounds(links, node_count)?,
            LinkInvariant::BidirectionalLinks => check_bidirectional(links)?,
        }
    }
    Ok(())
}
