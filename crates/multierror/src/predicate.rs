//! Predicates over leaf errors.
//!
//! Callers choose explicitly between matching on error kinds and supplying an
//! arbitrary test. Both forms reduce to [`Predicate::matches`].

use core::fmt;
use std::{error::Error, sync::Arc};

use crate::{kind::Kind, leaf::LeafError};

/// Decides which leaves of a failure tree a split or recovery scope selects.
#[derive(Clone)]
pub enum Predicate {
    /// Accept leaves belonging to any of these kinds.
    Kinds(Vec<Kind>),
    /// Accept leaves for which the function returns `true`.
    Test(Arc<dyn Fn(&LeafError) -> bool + Send + Sync>),
}

impl Predicate {
    /// Accept every error of type `E`.
    pub fn kind<E: Error + 'static>() -> Self {
        Self::Kinds(vec![Kind::of::<E>()])
    }

    /// Accept errors belonging to any of the given kinds.
    ///
    /// ```
    /// use multierror::{Failure, Kind, Predicate};
    ///
    /// let predicate = Predicate::kinds([Kind::of::<std::fmt::Error>(), Kind::of::<std::io::Error>()]);
    /// let failure = Failure::from(std::fmt::Error);
    /// assert!(predicate.matches(failure.as_leaf().unwrap()));
    /// ```
    pub fn kinds<I: IntoIterator<Item = Kind>>(kinds: I) -> Self {
        Self::Kinds(kinds.into_iter().collect())
    }

    /// Accept errors for which `test` returns `true`.
    pub fn test<F>(test: F) -> Self
    where
        F: Fn(&LeafError) -> bool + Send + Sync + 'static,
    {
        Self::Test(Arc::new(test))
    }

    /// Applies the predicate to a leaf.
    ///
    /// A test function that panics is not guarded against; the panic unwinds
    /// through the caller.
    pub fn matches(&self, leaf: &LeafError) -> bool {
        match self {
            Self::Kinds(kinds) => kinds.iter().any(|kind| kind.contains(leaf)),
            Self::Test(test) => test(leaf),
        }
    }

    /// Normalizes the predicate into a plain boolean test.
    pub fn into_test(self) -> impl Fn(&LeafError) -> bool + Send + Sync {
        move |leaf: &LeafError| self.matches(leaf)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kinds(kinds) => f.debug_tuple("Kinds").field(kinds).finish(),
            Self::Test(_) => f.write_str("Test(..)"),
        }
    }
}

impl From<Kind> for Predicate {
    fn from(kind: Kind) -> Self {
        Self::Kinds(vec![kind])
    }
}

impl From<Vec<Kind>> for Predicate {
    fn from(kinds: Vec<Kind>) -> Self {
        Self::Kinds(kinds)
    }
}

impl<const N: usize> From<[Kind; N]> for Predicate {
    fn from(kinds: [Kind; N]) -> Self {
        Self::kinds(kinds)
    }
}
