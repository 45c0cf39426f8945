//! The failure value: a leaf error or an aggregate of failures.

use core::fmt;
use std::error::Error;

use crate::{
    aggregate::{AggregateError, Leaves},
    leaf::{LeafError, short_type_name},
};

/// A node of a failure tree.
///
/// Any `E: Error + Send + Sync + 'static` converts into a `Failure`. An
/// [`AggregateError`] or [`LeafError`] passed this way is recognized and kept
/// as is rather than wrapped in another leaf.
///
/// Like `anyhow::Error`, `Failure` does not itself implement
/// [`std::error::Error`]; convert it into a `Box<dyn Error + Send + Sync>`
/// where a standard error object is required.
///
/// ```
/// use multierror::Failure;
///
/// let failure = Failure::from(std::fmt::Error);
/// assert!(failure.as_leaf().is_some());
/// assert_eq!(failure.size(), 1);
/// assert_eq!(failure.repr(), "Error");
/// ```
#[derive(Clone)]
pub enum Failure {
    /// A single, non-aggregate error.
    Leaf(LeafError),
    /// A composite of further failures.
    Aggregate(AggregateError),
}

impl Failure {
    /// Converts an error into a failure, unwrapping aggregates and leaves.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let kind = short_type_name::<E>();
        Self::recognize(Box::new(error))
            .unwrap_or_else(|boxed| Self::Leaf(LeafError::from_boxed(kind, boxed)))
    }

    /// Converts an error into a failure, naming a new or existing leaf `kind`.
    ///
    /// An aggregate keeps its structure; only leaves carry a kind name.
    ///
    /// ```
    /// use multierror::Failure;
    ///
    /// let failure = Failure::named("Formatting", std::fmt::Error);
    /// assert_eq!(failure.repr(), "Formatting");
    /// assert!(failure.as_leaf().unwrap().is::<std::fmt::Error>());
    /// ```
    pub fn named<E>(kind: &'static str, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        match Self::recognize(Box::new(error)) {
            Ok(Self::Leaf(leaf)) => Self::Leaf(leaf.renamed(kind)),
            Ok(aggregate) => aggregate,
            Err(boxed) => Self::Leaf(LeafError::from_boxed(kind, boxed)),
        }
    }

    /// Unboxes an error that already is a failure node.
    fn recognize(
        boxed: Box<dyn Error + Send + Sync>,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let boxed = match boxed.downcast::<AggregateError>() {
            Ok(aggregate) => return Ok(Self::Aggregate(*aggregate)),
            Err(boxed) => boxed,
        };
        boxed.downcast::<LeafError>().map(|leaf| Self::Leaf(*leaf))
    }

    /// Returns the number of leaf errors in this failure; `1` for a leaf.
    pub fn size(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Aggregate(aggregate) => aggregate.size(),
        }
    }

    /// Returns the kind name of this node.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(leaf) => leaf.kind(),
            Self::Aggregate(_) => crate::aggregate::AGGREGATE_KIND,
        }
    }

    /// Returns the structural representation of this failure.
    pub fn repr(&self) -> String {
        format!("{self:?}")
    }

    /// Renders the failure as a box-drawing tree. A leaf renders as its
    /// kind name on a single line.
    pub fn tree(&self) -> String {
        match self {
            Self::Leaf(leaf) => format!("{}\n", leaf.kind()),
            Self::Aggregate(aggregate) => aggregate.tree(),
        }
    }

    /// Returns `true` if this failure is an aggregate.
    pub const fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(_))
    }

    /// Returns the leaf, if this failure is one.
    pub const fn as_leaf(&self) -> Option<&LeafError> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Aggregate(_) => None,
        }
    }

    /// Returns the aggregate, if this failure is one.
    pub const fn as_aggregate(&self) -> Option<&AggregateError> {
        match self {
            Self::Aggregate(aggregate) => Some(aggregate),
            Self::Leaf(_) => None,
        }
    }

    /// Iterates over all leaves, depth first, in collection order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(core::slice::from_ref(self))
    }
}

impl<E> From<E> for Failure
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl From<Failure> for Box<dyn Error + Send + Sync + 'static> {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Leaf(leaf) => Box::new(leaf),
            Failure::Aggregate(aggregate) => Box::new(aggregate),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => f.write_str(leaf.kind()),
            Self::Aggregate(aggregate) => fmt::Debug::fmt(aggregate, f),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => fmt::Display::fmt(leaf, f),
            Self::Aggregate(aggregate) => fmt::Display::fmt(aggregate, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        predicate::Predicate,
        testing::{Refused, Timeout, small_tree},
    };

    #[test]
    fn test_leaf_from_error() {
        let failure = Failure::from(Timeout::new("a"));
        assert_eq!(failure.kind(), "Timeout");
        assert_eq!(failure.size(), 1);
        assert!(!failure.is_aggregate());
        assert!(failure.as_leaf().is_some_and(|leaf| leaf.is::<Timeout>()));
    }

    #[test]
    fn test_aggregate_is_not_wrapped() {
        let failure = Failure::from(small_tree());
        assert!(failure.is_aggregate());
        assert_eq!(failure.kind(), "AggregateError");
        assert_eq!(failure.size(), 3);
    }

    #[test]
    fn test_leaf_is_not_wrapped() {
        let leaf = LeafError::new(Refused);
        let failure = Failure::from(leaf.clone());
        assert!(failure.as_leaf().is_some_and(|inner| inner.ptr_eq(&leaf)));
        assert_eq!(failure.kind(), "Refused");
    }

    #[test]
    fn test_named_aggregate_stays_aggregate() {
        let failure = Failure::named("Wrapped", small_tree());
        assert!(failure.is_aggregate());
        assert_eq!(failure.size(), 3);
        assert_eq!(
            failure.repr(),
            "AggregateError([Timeout, AggregateError([Timeout, Refused])])"
        );

        let (matched, rest) = failure.split(&Predicate::kind::<Timeout>()).into_parts();
        let matched = matched.unwrap();
        assert_eq!(matched.size(), 2);
        assert_eq!(
            matched.repr(),
            "AggregateError([Timeout, AggregateError([Timeout])])"
        );
        assert_eq!(
            rest.unwrap().repr(),
            "AggregateError([AggregateError([Refused])])"
        );
    }

    #[test]
    fn test_named_renames_leaf_without_wrapping() {
        let leaf = LeafError::new(Refused);
        let failure = Failure::named("Rejected", leaf.clone());
        let renamed = failure.as_leaf().unwrap();
        assert_eq!(renamed.kind(), "Rejected");
        assert!(renamed.ptr_eq(&leaf));
        assert!(renamed.is::<Refused>());

        let failure = Failure::named("Deadline", Timeout::new("a"));
        assert_eq!(failure.repr(), "Deadline");
        assert!(Predicate::kind::<Timeout>().matches(failure.as_leaf().unwrap()));
    }

    #[test]
    fn test_leaf_repr_and_tree() {
        let failure = Failure::from(Refused);
        assert_eq!(failure.repr(), "Refused");
        assert_eq!(failure.tree(), "Refused\n");
        assert_eq!(failure.to_string(), "connection refused");
    }

    #[test]
    fn test_leaves_of_leaf() {
        let failure = Failure::from(Refused);
        assert_eq!(failure.leaves().count(), 1);
    }

    #[test]
    fn test_into_boxed_error() {
        let boxed: Box<dyn Error + Send + Sync> = Failure::from(small_tree()).into();
        assert!(boxed.is::<AggregateError>());

        let boxed: Box<dyn Error + Send + Sync> = Failure::from(Refused).into();
        let leaf = boxed.downcast_ref::<LeafError>().unwrap();
        assert!(leaf.is::<Refused>());
    }

    #[test]
    fn test_question_mark_conversion() {
        fn parse(input: &str) -> Result<u32, Failure> {
            Ok(input.parse::<u32>()?)
        }
        let failure = parse("nope").unwrap_err();
        assert_eq!(failure.kind(), "ParseIntError");
    }
}
