//! Leaf errors.
//!
//! A leaf is any failure in a tree that is not itself an aggregate. Leaves are
//! opaque to this crate beyond their kind: the concrete error type they were
//! built from, and that type's short name.

use core::{any::type_name, fmt};
use std::{error::Error, sync::Arc};

/// A single, non-aggregate error.
///
/// The wrapped error is shared behind an [`Arc`], so leaves move between the
/// trees produced by [`split`](crate::Failure::split) without copying the
/// underlying value. The kind name is taken from the concrete type at
/// construction.
///
/// Leaves are only built through [`Failure::from`](crate::Failure) or
/// [`Failure::named`](crate::Failure::named), which never wrap an aggregate.
///
/// ```
/// use multierror::Failure;
///
/// let failure = Failure::from(std::fmt::Error);
/// let leaf = failure.as_leaf().unwrap();
/// assert_eq!(leaf.kind(), "Error");
/// assert!(leaf.is::<std::fmt::Error>());
/// ```
#[derive(Clone)]
pub struct LeafError {
    kind: &'static str,
    inner: Arc<dyn Error + Send + Sync + 'static>,
}

impl LeafError {
    #[cfg(test)]
    pub(crate) fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::named(short_type_name::<E>(), error)
    }

    #[cfg(test)]
    pub(crate) fn named<E>(kind: &'static str, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            kind,
            inner: Arc::new(error),
        }
    }

    /// Wraps an already boxed error. The box must hold the concrete error, so
    /// that kind checks against it still succeed, and must not hold an
    /// aggregate.
    pub(crate) fn from_boxed(kind: &'static str, error: Box<dyn Error + Send + Sync>) -> Self {
        Self {
            kind,
            inner: Arc::from(error),
        }
    }

    pub(crate) const fn renamed(mut self, kind: &'static str) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the kind name of this leaf.
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns `true` if the wrapped error is of type `E`.
    pub fn is<E: Error + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    /// Returns a reference to the wrapped error if it is of type `E`.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// Returns the wrapped error.
    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    /// Returns `true` if both leaves share the same underlying error value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for LeafError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafError")
            .field("kind", &self.kind)
            .field("error", &self.inner)
            .finish()
    }
}

impl fmt::Display for LeafError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for LeafError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// Returns the last path segment of a type's name, without generic arguments.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
