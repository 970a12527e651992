//! Application layer: services and use cases
//!
//! This layer applies configuration policy to domain operations.

pub mod error;
pub mod selection;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use selection::{Rule, Selection};
