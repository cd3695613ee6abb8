//! Bidirectional link invariant.
//!
//! Every directed entry must be mirrored by a reverse entry with the same
//! multiplicity, so parallel links stay symmetric as well.
use tracing::{Level, debug, trace};

use super::LinkInvariantViolation;
use crate::links::LinkTable;

pub(super) fn check_bidirectional(links: &LinkTable) -> Result<(), LinkInvariantViolation> {
    if tracing::enabled!(Level::TRACE) {
        trace!(entries = links.entry_count(), "checking bidirectional links");
    }
    for (origin, target) in links.iter() {
        let forward = multiplicity(links, origin, target);
        let backward = multiplicity(links, target, origin);
        if forward != backward {
            debug!(origin, target, forward, backward, "missing backlink");
            return Err(LinkInvariantViolation::MissingBacklink {
                origin,
                target,
                forward,
                backward,
            });
        }
    }
    Ok(())
}

fn multiplicity(links: &LinkTable, origin: usize, target: usize) -> usize {
    links
        .neighbours(origin)
        .iter()
        .filter(|&&candidate| candidate == target)
        .count()
}
