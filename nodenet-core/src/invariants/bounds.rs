//! Range and self-loop invariant for the link table.
use tracing::debug;

use super::LinkInvariantViolation;
use crate::links::LinkTable;

pub(super) fn check_bounds(
    links: &LinkTable,
    node_count: usize,
) -> Result<(), LinkInvariantViolation> {
    if links.node_count() != node_count {
        return Err(LinkInvariantViolation::NodeCountMismatch {
            expected: node_count,
            actual: links.node_count(),
        });
    }
    for (origin, target) in links.iter() {
        if origin == target {
            debug!(node = origin, "self-loop in link table");
            return Err(LinkInvariantViolation::SelfLoop { node: origin });
        }
        if target >= node_count {
            debug!(origin, target, node_count, "dangling link in link table");
            return Err(LinkInvariantViolation::OutOfRange {
                origin,
                target,
                size: node_count,
            });
        }
    }
    Ok(())
}
