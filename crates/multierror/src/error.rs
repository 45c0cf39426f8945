//! Error types for building aggregate errors.

use thiserror::Error;

/// Errors that can occur when constructing an [`AggregateError`](crate::AggregateError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An aggregate was requested with no children.
    #[error("aggregate error requires at least one child")]
    Empty,
}
