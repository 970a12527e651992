//! Positional adjacency index over a depth-encoded forest.

use std::ops::Range;

use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hierarchy::{Hierarchy, Nodes};

/// Parent links and subtree spans, computed once in a single pass.
///
/// Entries are keyed by position, never by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestIndex {
    parents: Vec<Option<usize>>,
    ends: Vec<usize>,
}

impl ForestIndex {
    #[instrument(level = "debug", skip_all, fields(size = hierarchy.size()))]
    pub fn build<H: Hierarchy + ?Sized>(hierarchy: &H) -> Self {
        let size = hierarchy.size();
        let mut parents = vec![None; size];
        let mut ends = vec![size; size];
        // open ancestors of the current position: (position, depth)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for (index, node) in Nodes::new(hierarchy).enumerate() {
            while let Some(&(open, depth)) = stack.last() {
                if depth < node.depth {
                    break;
                }
                ends[open] = index;
                stack.pop();
            }
            parents[index] = stack.last().map(|&(open, _)| open);
            stack.push((index, node.depth));
        }

        Self { parents, ends }
    }

    pub fn size(&self) -> usize {
        self.parents.len()
    }

    fn check(&self, index: usize) -> DomainResult<()> {
        if index < self.size() {
            Ok(())
        } else {
            Err(DomainError::OutOfRange {
                index,
                size: self.size(),
            })
        }
    }

    /// Position of the parent, `None` for roots.
    pub fn parent(&self, index: usize) -> DomainResult<Option<usize>> {
        self.check(index)?;
        Ok(self.parents[index])
    }

    /// The node itself followed by its descendants.
    pub fn subtree(&self, index: usize) -> DomainResult<Range<usize>> {
        self.check(index)?;
        Ok(index..self.ends[index])
    }

    /// Direct children in order.
    pub fn children(&self, index: usize) -> DomainResult<Vec<usize>> {
        let span = self.subtree(index)?;
        let mut children = Vec::new();
        let mut child = span.start + 1;
        while child < span.end {
            children.push(child);
            child = self.ends[child];
        }
        Ok(children)
    }

    /// Tree roots in order.
    pub fn roots(&self) -> Vec<usize> {
        let mut roots = Vec::new();
        let mut root = 0;
        while root < self.size() {
            roots.push(root);
            root = self.ends[root];
        }
        roots
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, index: usize) -> DomainResult<Vec<usize>> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(index)?;
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parents[parent];
        }
        Ok(ancestors)
    }
}
