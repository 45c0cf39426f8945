//! Error-kind markers.
//!
//! A [`Kind`] identifies a class of leaf errors by the concrete Rust type they
//! were built from. Rust error types do not form a subtype hierarchy, so the
//! "more specific forms" of a kind are the variants of an error enum:
//! [`Kind::of`] on an enum matches every variant, while [`Kind::variant`]
//! narrows it down to the values accepted by a test.

use core::fmt;
use std::{error::Error, sync::Arc};

use crate::leaf::{LeafError, short_type_name};

type KindTest = Arc<dyn Fn(&LeafError) -> bool + Send + Sync>;

/// A marker identifying a class of errors.
#[derive(Clone)]
pub struct Kind {
    name: &'static str,
    test: KindTest,
}

impl Kind {
    /// The kind of every error of type `E`.
    ///
    /// ```
    /// use multierror::{Failure, Kind};
    ///
    /// let kind = Kind::of::<std::fmt::Error>();
    /// let failure = Failure::from(std::fmt::Error);
    /// assert!(kind.contains(failure.as_leaf().unwrap()));
    /// ```
    pub fn of<E: Error + 'static>() -> Self {
        Self {
            name: short_type_name::<E>(),
            test: Arc::new(|leaf: &LeafError| leaf.is::<E>()),
        }
    }

    /// A sub-kind of `E`: errors of type `E` for which `test` holds.
    pub fn variant<E, F>(name: &'static str, test: F) -> Self
    where
        E: Error + 'static,
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            test: Arc::new(move |leaf: &LeafError| leaf.downcast_ref::<E>().is_some_and(&test)),
        }
    }

    /// Returns the name of this kind.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the leaf belongs to this kind.
    pub fn contains(&self, leaf: &LeafError) -> bool {
        (self.test)(leaf)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Kind").field(&self.name).finish()
    }
}
