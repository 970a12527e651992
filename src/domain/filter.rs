//! Structural filtering of depth-encoded forests.
//!
//! A node is present in the filtered hierarchy iff its id passes the
//! predicate and all of its ancestors pass it as well.

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hierarchy::{ArrayHierarchy, Hierarchy, NodeId};

/// Keeps the nodes whose id and every ancestor's id satisfy `predicate`.
///
/// Surviving nodes keep their depth and relative order. Once a node is
/// rejected, its whole subtree span is skipped and the predicate is never
/// called for any of its descendants.
pub fn filter<H, P>(hierarchy: &H, mut predicate: P) -> DomainResult<ArrayHierarchy>
where
    H: Hierarchy + ?Sized,
    P: FnMut(NodeId) -> bool,
{
    try_filter(hierarchy, |id| Ok::<_, DomainError>(predicate(id)))
}

/// Fallible variant of [`filter`].
///
/// The first predicate error aborts the pass and is returned as is; no
/// partial result is produced.
#[instrument(level = "debug", skip_all, fields(size = hierarchy.size()))]
pub fn try_filter<H, P, E>(hierarchy: &H, mut predicate: P) -> Result<ArrayHierarchy, E>
where
    H: Hierarchy + ?Sized,
    P: FnMut(NodeId) -> Result<bool, E>,
    E: From<DomainError>,
{
    let size = hierarchy.size();
    let mut node_ids = Vec::with_capacity(size);
    let mut depths = Vec::with_capacity(size);

    let mut cursor = 0;
    while cursor < size {
        let node = hierarchy.node(cursor)?;
        if predicate(node.id)? {
            node_ids.push(node.id);
            depths.push(node.depth);
            cursor += 1;
        } else {
            let end = hierarchy.subtree_end(cursor)?;
            trace!(id = node.id, from = cursor, to = end, "pruned subtree");
            cursor = end;
        }
    }

    node_ids.shrink_to_fit();
    depths.shrink_to_fit();
    debug!(kept = node_ids.len(), removed = size - node_ids.len(), "filtered");
    Ok(ArrayHierarchy::new(node_ids, depths))
}
