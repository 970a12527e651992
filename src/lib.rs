//! Compact depth-encoded ordered forests with structural subtree filtering.
//!
//! A forest is stored as two parallel sequences in DFS pre-order, node ids
//! and node depths; adjacency is derived from depth deltas. [`filter`]
//! removes every node failing a predicate together with its whole subtree.
//!
//! ```
//! use flatforest::{filter, ArrayHierarchy, Hierarchy};
//!
//! let forest = ArrayHierarchy::new(vec![1, 2, 3, 6, 7], vec![0, 1, 2, 0, 1]);
//! let pruned = filter(&forest, |id| id != 2).unwrap();
//! assert_eq!(pruned.format_string(), "[1:0, 6:0, 7:1]");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    filter, try_filter, validate, ArrayHierarchy, Depth, DomainError, DomainResult, ForestIndex,
    Hierarchy, MalformedHierarchy, Node, NodeId,
};
