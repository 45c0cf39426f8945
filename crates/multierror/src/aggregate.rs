//! The aggregate error node.
//!
//! An [`AggregateError`] owns an ordered, non-empty sequence of child failures,
//! each either a [`LeafError`] or another aggregate. Order is the order in
//! which the failures were collected and is preserved by every operation in
//! this crate.
//!
//! # Provenance
//!
//! Every aggregate carries a [`Provenance`] record: the error it was chained
//! from, the root cause that triggered it, and the backtrace captured when it
//! was first built. Aggregates derived from another one, by
//! [`split`](AggregateError::split) or [`with_children`](AggregateError::with_children),
//! share the source's record instead of capturing a new one.

use core::fmt;
use std::{backtrace::Backtrace, error::Error, slice, sync::Arc};

use crate::{error::BuildError, failure::Failure, leaf::LeafError, tree};

/// Kind name reported for aggregate nodes.
pub(crate) const AGGREGATE_KIND: &str = "AggregateError";

type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Causal-chain metadata of an aggregate error.
#[derive(Clone)]
pub struct Provenance {
    context: Option<SharedError>,
    cause: Option<SharedError>,
    backtrace: Arc<Backtrace>,
}

impl Provenance {
    /// Captures a fresh record with no context and no cause.
    ///
    /// Whether a backtrace is actually collected follows the standard
    /// `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE` environment variables.
    fn capture() -> Self {
        Self {
            context: None,
            cause: None,
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    /// The error this aggregate was raised while handling, if any.
    pub fn context(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.context.as_deref()
    }

    /// The root cause this aggregate was explicitly chained from, if any.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The backtrace captured when the originating aggregate was built.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Returns `true` if both records originate from the same aggregate.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.backtrace, &other.backtrace)
    }
}

impl fmt::Debug for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provenance")
            .field("context", &self.context.as_ref().map(ToString::to_string))
            .field("cause", &self.cause.as_ref().map(ToString::to_string))
            .field("backtrace", &self.backtrace.status())
            .finish()
    }
}

/// A composite error holding several independent failures.
///
/// ```
/// use multierror::AggregateError;
///
/// let error = AggregateError::new([std::fmt::Error, std::fmt::Error]).unwrap();
/// assert_eq!(error.size(), 2);
/// assert_eq!(error.repr(), "AggregateError([Error, Error])");
/// ```
#[derive(Clone)]
pub struct AggregateError {
    children: Vec<Failure>,
    provenance: Provenance,
}

impl AggregateError {
    /// Builds an aggregate from an ordered sequence of failures.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Empty`] if `children` yields nothing.
    pub fn new<I>(children: I) -> Result<Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Failure>,
    {
        let children: Vec<Failure> = children.into_iter().map(Into::into).collect();
        if children.is_empty() {
            return Err(BuildError::Empty);
        }
        Ok(Self::from_parts(children, Provenance::capture()))
    }

    /// Builds an aggregate from the given failures, or `None` if there are none.
    pub fn from_failures<I: IntoIterator<Item = Failure>>(failures: I) -> Option<Self> {
        Self::new(failures).ok()
    }

    /// Copies this aggregate with different children, keeping its provenance.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Empty`] if `children` yields nothing.
    pub fn with_children<I>(&self, children: I) -> Result<Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Failure>,
    {
        let children: Vec<Failure> = children.into_iter().map(Into::into).collect();
        if children.is_empty() {
            return Err(BuildError::Empty);
        }
        Ok(Self::from_parts(children, self.provenance.clone()))
    }

    /// Records the root cause this aggregate was chained from.
    #[must_use]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.provenance.cause = Some(Arc::new(cause));
        self
    }

    /// Records the error that was being handled when this aggregate was raised.
    #[must_use]
    pub fn with_context<E>(mut self, context: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.provenance.context = Some(Arc::new(context));
        self
    }

    /// Callers guarantee `children` is non-empty.
    pub(crate) const fn from_parts(children: Vec<Failure>, provenance: Provenance) -> Self {
        Self {
            children,
            provenance,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Failure>, Provenance) {
        (self.children, self.provenance)
    }

    /// Returns the direct children, in collection order.
    pub fn children(&self) -> &[Failure] {
        &self.children
    }

    /// Consumes the aggregate, returning its direct children.
    pub fn into_children(self) -> Vec<Failure> {
        self.children
    }

    /// Returns the causal-chain metadata of this aggregate.
    pub const fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Returns the number of leaf errors reachable from this aggregate.
    ///
    /// Nested aggregates contribute their own leaves but are not counted
    /// themselves.
    pub fn size(&self) -> usize {
        self.children.iter().map(Failure::size).sum()
    }

    /// Returns the structural representation of this aggregate, e.g.
    /// `AggregateError([Timeout, AggregateError([Refused])])`.
    pub fn repr(&self) -> String {
        format!("{self:?}")
    }

    /// Renders the aggregate as a multi-line box-drawing tree.
    pub fn tree(&self) -> String {
        self.to_string()
    }

    /// Iterates over all leaves, depth first, in collection order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(&self.children)
    }
}

impl TryFrom<Vec<Failure>> for AggregateError {
    type Error = BuildError;

    fn try_from(children: Vec<Failure>) -> Result<Self, Self::Error> {
        Self::new(children)
    }
}

impl fmt::Debug for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(AGGREGATE_KIND)?;
        f.write_str("([")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Debug::fmt(child, f)?;
        }
        f.write_str("])")
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        tree::write_aggregate(f, self, 0, 0)
    }
}

impl Error for AggregateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        let source: &(dyn Error + 'static) = self
            .provenance
            .cause
            .as_deref()
            .or(self.provenance.context.as_deref())?;
        Some(source)
    }
}

/// Depth-first iterator over the leaves of a failure tree.
///
/// Created by [`AggregateError::leaves`] and [`Failure::leaves`].
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    stack: Vec<slice::Iter<'a, Failure>>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(roots: &'a [Failure]) -> Self {
        Self {
            stack: vec![roots.iter()],
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a LeafError;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Failure::Leaf(leaf)) => return Some(leaf),
                Some(Failure::Aggregate(aggregate)) => self.stack.push(aggregate.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
