//! Path reconstruction from the shared predecessor map.

use crate::shared::PredecessorMap;
use crate::traits::NodeId;

/// Walk predecessors from `to` back to `from` and return `[from, ..., to]`.
///
/// Returns `None` if the chain hits a node without a predecessor before
/// reaching `from`, or runs longer than the map has nodes (a cycle).
pub fn path_from_to(
    predecessors: &PredecessorMap,
    from: NodeId,
    to: NodeId,
) -> Option<Vec<NodeId>> {
    let mut path = Vec::new();
    let mut current = to;
    while current != from {
        if path.len() >= predecessors.len() {
            return None;
        }
        path.push(current);
        current = predecessors.lookup(current)?;
    }
    path.push(from);
    path.reverse();
    Some(path)
}
