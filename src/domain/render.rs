//! Human readable renderings of a hierarchy.

use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hierarchy::{Depth, Hierarchy, Nodes};

/// Deepest depth the box-drawing style accepts.
///
/// Tree output grows with the square of the depth, and nested `termtree`
/// values are dropped recursively.
pub const TREE_DEPTH_LIMIT: Depth = 1024;

/// One line per node, indented by `marker` repeated `depth` times.
///
/// ```text
/// 1
/// - 2
/// - - 3
/// ```
pub fn outline<H: Hierarchy + ?Sized>(hierarchy: &H, marker: &str) -> String {
    Nodes::new(hierarchy)
        .map(|node| format!("{}{}", format!("{marker} ").repeat(node.depth), node.id))
        .join("\n")
}

/// One `termtree` per root, labelled with node ids.
///
/// Built bottom-up: positions are walked in reverse and every finished
/// subtree waits on a stack until the node owning its span claims it.
#[instrument(level = "debug", skip_all, fields(size = hierarchy.size()))]
pub fn forest_trees<H: Hierarchy + ?Sized>(hierarchy: &H) -> DomainResult<Vec<Tree<String>>> {
    if let Some(node) = Nodes::new(hierarchy).find(|node| node.depth > TREE_DEPTH_LIMIT) {
        return Err(DomainError::TooDeep {
            depth: node.depth,
            limit: TREE_DEPTH_LIMIT,
        });
    }

    let mut pending: Vec<(Depth, Tree<String>)> = Vec::new();
    for position in (0..hierarchy.size()).rev() {
        let node = hierarchy.node(position)?;
        let mut leaves = Vec::new();
        while let Some((depth, _)) = pending.last() {
            if *depth <= node.depth {
                break;
            }
            if let Some((_, leaf)) = pending.pop() {
                leaves.push(leaf);
            }
        }
        pending.push((node.depth, Tree::new(node.id.to_string()).with_leaves(leaves)));
    }

    debug!("{} roots", pending.len());
    Ok(pending.into_iter().rev().map(|(_, tree)| tree).collect())
}

/// Box-drawing rendering of the whole forest.
pub fn tree_string<H: Hierarchy + ?Sized>(hierarchy: &H) -> DomainResult<String> {
    let trees = forest_trees(hierarchy)?;
    if trees.is_empty() {
        return Ok("Empty forest".to_string());
    }
    Ok(trees
        .iter()
        .map(|tree| tree.to_string().trim_end().to_string())
        .join("\n"))
}
