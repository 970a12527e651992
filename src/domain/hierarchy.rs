//! Depth-encoded ordered forests.
//!
//! A forest is stored as the DFS pre-order sequence of its nodes, each node
//! carrying an identifier and its depth. Parent/child links are not stored:
//!
//! ```text
//! node_ids: 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11
//! depths:   0, 1, 2, 3, 1, 0, 1, 0, 1, 1,  2
//!
//! 1
//! - 2
//! - - 3
//! - - - 4
//! - 5
//! 6
//! - 7
//! 8
//! - 9
//! - 10
//! - - 11
//! ```
//!
//! The depth following a node at depth `D` is `D + 1` (first child), `D`
//! (sibling) or anything smaller (unrelated, shallower branch). A node's
//! descendants are the maximal run of following positions deeper than it.

use std::fmt;
use std::iter::FusedIterator;

use itertools::Itertools;
use tracing::warn;

use crate::domain::error::{DomainError, DomainResult, MalformedHierarchy};

/// Opaque node identifier. Identity is positional: equal ids at different
/// positions are different nodes.
pub type NodeId = i64;

/// Distance from a node to the root of its tree (roots have depth 0).
pub type Depth = usize;

/// One position of a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub id: NodeId,
    pub depth: Depth,
}

impl Node {
    pub fn new(id: NodeId, depth: Depth) -> Self {
        Self { id, depth }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.depth)
    }
}

/// Read-only access to an ordered forest in depth-encoded pre-order.
///
/// Implementors supply [`size`](Hierarchy::size) and [`get`](Hierarchy::get);
/// the checked accessors and traversal helpers are derived from them.
pub trait Hierarchy {
    /// The number of nodes in the hierarchy.
    fn size(&self) -> usize;

    /// The node at `index`, `None` outside `[0, size)`.
    fn get(&self, index: usize) -> Option<Node>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Identifier of the node at `index`.
    ///
    /// # Errors
    /// [`DomainError::OutOfRange`] unless `index < size()`.
    fn node_id(&self, index: usize) -> DomainResult<NodeId> {
        self.node(index).map(|node| node.id)
    }

    /// Depth of the node at `index`.
    ///
    /// # Errors
    /// [`DomainError::OutOfRange`] unless `index < size()`.
    fn depth(&self, index: usize) -> DomainResult<Depth> {
        self.node(index).map(|node| node.depth)
    }

    /// Checked variant of [`get`](Hierarchy::get).
    fn node(&self, index: usize) -> DomainResult<Node> {
        self.get(index).ok_or(DomainError::OutOfRange {
            index,
            size: self.size(),
        })
    }

    /// Position just past the subtree span of the node at `index`.
    ///
    /// The scan stops at the first following position whose depth is not
    /// strictly greater, so it is bounded by `size()` even for malformed input.
    fn subtree_end(&self, index: usize) -> DomainResult<usize> {
        let depth = self.depth(index)?;
        let size = self.size();
        let mut end = index + 1;
        while end < size && self.depth(end)? > depth {
            end += 1;
        }
        Ok(end)
    }

    /// Nodes in positional order.
    fn iter(&self) -> Nodes<'_, Self>
    where
        Self: Sized,
    {
        Nodes::new(self)
    }

    /// Renders `[id:depth, id:depth, ...]`, `[]` when empty.
    fn format_string(&self) -> String {
        format!("[{}]", Nodes::new(self).format(", "))
    }
}

/// Iterator over the nodes of a [`Hierarchy`].
pub struct Nodes<'a, H: ?Sized> {
    hierarchy: &'a H,
    front: usize,
    back: usize,
}

impl<'a, H: Hierarchy + ?Sized> Nodes<'a, H> {
    pub fn new(hierarchy: &'a H) -> Self {
        Self {
            hierarchy,
            front: 0,
            back: hierarchy.size(),
        }
    }
}

impl<H: Hierarchy + ?Sized> Iterator for Nodes<'_, H> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        if self.front >= self.back {
            return None;
        }
        let node = self.hierarchy.get(self.front);
        self.front += 1;
        node
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl<H: Hierarchy + ?Sized> DoubleEndedIterator for Nodes<'_, H> {
    fn next_back(&mut self) -> Option<Node> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.hierarchy.get(self.back)
    }
}

impl<H: Hierarchy + ?Sized> ExactSizeIterator for Nodes<'_, H> {}

impl<H: Hierarchy + ?Sized> FusedIterator for Nodes<'_, H> {}

/// Checks the depth encoding: the first node is a root and depth never rises
/// by more than one between consecutive positions.
pub fn validate<H: Hierarchy + ?Sized>(hierarchy: &H) -> DomainResult<()> {
    let mut previous: Option<Depth> = None;
    for (index, node) in Nodes::new(hierarchy).enumerate() {
        match previous {
            None if node.depth != 0 => {
                return Err(MalformedHierarchy::RootDepth { depth: node.depth }.into());
            }
            Some(previous) if node.depth > previous + 1 => {
                return Err(MalformedHierarchy::DepthJump {
                    index,
                    previous,
                    depth: node.depth,
                }
                .into());
            }
            _ => {}
        }
        previous = Some(node.depth);
    }
    Ok(())
}

/// Hierarchy backed by two parallel vectors.
///
/// Immutable once built; filtering produces a new instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayHierarchy {
    node_ids: Vec<NodeId>,
    depths: Vec<Depth>,
}

impl ArrayHierarchy {
    /// Builds a hierarchy from parallel sequences without validating them.
    ///
    /// Callers are responsible for a well-formed depth encoding. If the
    /// lengths differ, only the common prefix forms the hierarchy.
    pub fn new(mut node_ids: Vec<NodeId>, mut depths: Vec<Depth>) -> Self {
        if node_ids.len() != depths.len() {
            warn!(
                node_ids = node_ids.len(),
                depths = depths.len(),
                "length mismatch, truncating to common prefix"
            );
            let size = node_ids.len().min(depths.len());
            node_ids.truncate(size);
            depths.truncate(size);
        }
        Self { node_ids, depths }
    }

    /// Builds a hierarchy, rejecting malformed depth encodings.
    ///
    /// # Errors
    /// [`DomainError::Malformed`] on a length mismatch, a non-zero first
    /// depth, or a depth rise greater than one.
    pub fn try_new(node_ids: Vec<NodeId>, depths: Vec<Depth>) -> DomainResult<Self> {
        if node_ids.len() != depths.len() {
            return Err(MalformedHierarchy::LengthMismatch {
                node_ids: node_ids.len(),
                depths: depths.len(),
            }
            .into());
        }
        let hierarchy = Self { node_ids, depths };
        validate(&hierarchy)?;
        Ok(hierarchy)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn depths(&self) -> &[Depth] {
        &self.depths
    }
}

impl Hierarchy for ArrayHierarchy {
    fn size(&self) -> usize {
        self.depths.len()
    }

    fn get(&self, index: usize) -> Option<Node> {
        let id = *self.node_ids.get(index)?;
        let depth = *self.depths.get(index)?;
        Some(Node { id, depth })
    }
}

impl FromIterator<Node> for ArrayHierarchy {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let (node_ids, depths) = iter.into_iter().map(|n| (n.id, n.depth)).unzip();
        Self { node_ids, depths }
    }
}

impl fmt::Display for ArrayHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_string())
    }
}
