//! Join points: gathering the failures of independent operations.
//!
//! Every operation runs to completion; failures are kept in the order they
//! were observed and surface together as one [`AggregateError`]. The result is
//! always an aggregate, even for a single failure, so callers can split it
//! without checking its shape first.

use crate::{aggregate::AggregateError, failure::Failure};

/// Collects the values of `results`, or all of their failures.
///
/// # Errors
///
/// Returns an aggregate of every failure, in input order, if any result is
/// an error.
///
/// ```
/// use multierror::try_collect;
///
/// let parsed = try_collect(["1", "x", "3", "y"].iter().map(|s| s.parse::<u8>()));
/// assert_eq!(parsed.unwrap_err().repr(), "AggregateError([ParseIntError, ParseIntError])");
/// ```
pub fn try_collect<I, T, E>(results: I) -> Result<Vec<T>, Failure>
where
    I: IntoIterator<Item = Result<T, E>>,
    E: Into<Failure>,
{
    let mut collector = Collector::new();
    let values = results
        .into_iter()
        .filter_map(|result| collector.record(result))
        .collect();
    collector.finish()?;
    Ok(values)
}

/// Accumulates failures across a sequence of fallible steps.
///
/// ```
/// use multierror::Collector;
///
/// let mut collector = Collector::new();
/// for input in ["7", "seven"] {
///     if let Some(value) = collector.record(input.parse::<u8>()) {
///         assert_eq!(value, 7);
///     }
/// }
/// assert_eq!(collector.len(), 1);
/// assert!(collector.finish().is_err());
/// ```
#[derive(Debug, Default)]
pub struct Collector {
    failures: Vec<Failure>,
}

impl Collector {
    /// Creates an empty collector.
    pub const fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    /// Records a failure.
    pub fn push(&mut self, failure: impl Into<Failure>) {
        self.failures.push(failure.into());
    }

    /// Records the failure of `result`, if any, and returns its value.
    pub fn record<T, E: Into<Failure>>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    /// Returns the number of failures recorded so far.
    pub const fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns `true` if no failure was recorded.
    pub const fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Consumes the collector, returning the recorded failures as an aggregate.
    pub fn into_aggregate(self) -> Option<AggregateError> {
        AggregateError::from_failures(self.failures)
    }

    /// Consumes the collector.
    ///
    /// # Errors
    ///
    /// Returns an aggregate of the recorded failures, if there are any.
    pub fn finish(self) -> Result<(), Failure> {
        self.into_aggregate().map_or(Ok(()), |aggregate| Err(aggregate.into()))
    }
}

impl Extend<Failure> for Collector {
    fn extend<I: IntoIterator<Item = Failure>>(&mut self, failures: I) {
        self.failures.extend(failures);
    }
}
