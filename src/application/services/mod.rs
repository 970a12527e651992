//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod forest;

pub use forest::{FilterOutcome, ForestService};
