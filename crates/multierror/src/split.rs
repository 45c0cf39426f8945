//! Partitioning failure trees by a predicate.
//!
//! Splitting walks the tree once and produces two sibling trees: one with the
//! leaves the predicate accepts, one with the rest. Aggregates that would end
//! up empty on one side are pruned from it, and every aggregate that survives
//! keeps the provenance of the node it was derived from. Leaf order within
//! each side follows the original order.

use crate::{aggregate::AggregateError, failure::Failure, predicate::Predicate};

/// The two halves of a split failure.
///
/// Both halves are never absent at once: aggregates cannot be empty, so every
/// failure holds at least one leaf.
#[derive(Debug, Clone)]
pub struct Split {
    /// The part of the failure the predicate accepted.
    pub matched: Option<Failure>,
    /// Everything else.
    pub rest: Option<Failure>,
}

impl Split {
    /// Returns the halves as a `(matched, rest)` pair.
    pub fn into_parts(self) -> (Option<Failure>, Option<Failure>) {
        (self.matched, self.rest)
    }

    /// Returns `true` if the predicate accepted the whole failure.
    pub const fn is_total(&self) -> bool {
        self.matched.is_some() && self.rest.is_none()
    }
}

/// Splits `failure` into the part accepted by `predicate` and the rest.
///
/// ```
/// use multierror::{AggregateError, Failure, Predicate, split};
///
/// let error = AggregateError::new([
///     Failure::from(std::fmt::Error),
///     Failure::from("x".parse::<u8>().unwrap_err()),
/// ])
/// .unwrap();
///
/// let (matched, rest) = split(Predicate::kind::<std::fmt::Error>(), error).into_parts();
/// assert_eq!(matched.unwrap().repr(), "AggregateError([Error])");
/// assert_eq!(rest.unwrap().repr(), "AggregateError([ParseIntError])");
/// ```
pub fn split(predicate: impl Into<Predicate>, failure: impl Into<Failure>) -> Split {
    failure.into().split(&predicate.into())
}

impl Failure {
    /// Splits this failure into the part accepted by `predicate` and the rest.
    ///
    /// A leaf lands whole on one side. An aggregate is split recursively.
    pub fn split(self, predicate: &Predicate) -> Split {
        match self {
            Self::Leaf(leaf) => {
                if predicate.matches(&leaf) {
                    Split {
                        matched: Some(Self::Leaf(leaf)),
                        rest: None,
                    }
                } else {
                    Split {
                        matched: None,
                        rest: Some(Self::Leaf(leaf)),
                    }
                }
            }
            Self::Aggregate(aggregate) => {
                let (matched, rest) = aggregate.split(predicate);
                Split {
                    matched: matched.map(Self::Aggregate),
                    rest: rest.map(Self::Aggregate),
                }
            }
        }
    }
}

impl AggregateError {
    /// Splits this aggregate into `(matched, rest)` aggregates.
    ///
    /// Either side is `None` when it would hold no leaves.
    pub fn split(self, predicate: &Predicate) -> (Option<Self>, Option<Self>) {
        let (children, provenance) = self.into_parts();

        let mut matched = Vec::new();
        let mut rest = Vec::new();
        for child in children {
            match child {
                Failure::Aggregate(aggregate) => {
                    let (yes, no) = aggregate.split(predicate);
                    matched.extend(yes.map(Failure::Aggregate));
                    rest.extend(no.map(Failure::Aggregate));
                }
                Failure::Leaf(leaf) => {
                    if predicate.matches(&leaf) {
                        matched.push(Failure::Leaf(leaf));
                    } else {
                        rest.push(Failure::Leaf(leaf));
                    }
                }
            }
        }

        let matched = (!matched.is_empty()).then(|| Self::from_parts(matched, provenance.clone()));
        let rest = (!rest.is_empty()).then(|| Self::from_parts(rest, provenance));
        (matched, rest)
    }
}
