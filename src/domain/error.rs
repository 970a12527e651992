//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Depth;

/// Domain errors represent contract violations on a hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("index {index} out of range for hierarchy of size {size}")]
    OutOfRange { index: usize, size: usize },

    #[error("malformed hierarchy: {0}")]
    Malformed(#[from] MalformedHierarchy),

    #[error("depth {depth} exceeds the tree rendering limit of {limit}; use the flat or outline style")]
    TooDeep { depth: Depth, limit: Depth },
}

/// Violations of the depth encoding, reported by eager validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedHierarchy {
    #[error("{node_ids} node ids but {depths} depths")]
    LengthMismatch { node_ids: usize, depths: usize },

    #[error("first node has depth {depth}, expected 0")]
    RootDepth { depth: Depth },

    #[error("depth rises from {previous} to {depth} at index {index}")]
    DepthJump {
        index: usize,
        previous: Depth,
        depth: Depth,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
