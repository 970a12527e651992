//! Domain layer: the depth-encoded forest and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod index;
pub mod render;

pub use error::{DomainError, DomainResult, MalformedHierarchy};
pub use filter::{filter, try_filter};
pub use hierarchy::{validate, ArrayHierarchy, Depth, Hierarchy, Node, NodeId, Nodes};
pub use index::ForestIndex;
