//! Recovery scopes.
//!
//! A recovery scope runs a unit of work. If the work fails, the failure is
//! split by a predicate, the matched part is handed to a handler, and the
//! unmatched part, if any, is returned as the scope's error in place of the
//! original failure. A handler that fails itself replaces everything: its
//! error is returned untouched and the unmatched part is dropped.
//!
//! [`catch`] runs the handler synchronously. [`acatch`] awaits it, which is
//! the only point at which a scope suspends.
//!
//! ```
//! use multierror::{AggregateError, Failure, Predicate, catch};
//!
//! let mut handled = Vec::new();
//! let result = catch(
//!     Predicate::kind::<std::fmt::Error>(),
//!     || -> Result<(), Failure> {
//!         Err(AggregateError::new([
//!             Failure::from(std::fmt::Error),
//!             Failure::from("x".parse::<u8>().unwrap_err()),
//!         ])
//!         .unwrap()
//!         .into())
//!     },
//!     |matched| {
//!         handled.push(matched.repr());
//!         Ok(())
//!     },
//! );
//!
//! assert_eq!(handled, ["AggregateError([Error])"]);
//! assert_eq!(result.unwrap_err().repr(), "AggregateError([ParseIntError])");
//! ```

use core::future::Future;

use tracing::{debug, trace};

use crate::{failure::Failure, predicate::Predicate, split::Split};

/// How a recovery scope finished without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The work succeeded; the handler was not invoked.
    Completed(T),
    /// The work failed and every part of the failure was handled.
    Recovered,
}

impl<T> Outcome<T> {
    /// Returns the work's value, if it completed.
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Recovered => None,
        }
    }

    /// Returns `true` if the scope recovered from a failure.
    pub const fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered)
    }
}

/// Runs `work`, recovering from the part of its failure accepted by `predicate`.
///
/// # Errors
///
/// Returns the unmatched part of the failure, or the handler's own error if
/// the handler fails.
pub fn catch<T, E, W, H>(
    predicate: impl Into<Predicate>,
    work: W,
    handler: H,
) -> Result<Outcome<T>, Failure>
where
    W: FnOnce() -> Result<T, E>,
    E: Into<Failure>,
    H: FnOnce(Failure) -> Result<(), Failure>,
{
    work().catch(predicate, handler)
}

/// Awaits `work`, recovering from the part of its failure accepted by
/// `predicate` with an asynchronous handler.
///
/// # Errors
///
/// Returns the unmatched part of the failure, or the handler's own error if
/// the handler fails.
pub async fn acatch<T, E, W, H, F>(
    predicate: impl Into<Predicate>,
    work: W,
    handler: H,
) -> Result<Outcome<T>, Failure>
where
    W: Future<Output = Result<T, E>>,
    E: Into<Failure>,
    H: FnOnce(Failure) -> F,
    F: Future<Output = Result<(), Failure>>,
{
    let failure = match work.await {
        Ok(value) => return Ok(Outcome::Completed(value)),
        Err(error) => error.into(),
    };

    let Split { matched, rest } = failure.split(&predicate.into());
    if let Some(matched) = matched {
        log_recovery(&matched, rest.as_ref());
        handler(matched).await?;
    }
    reraise(rest)
}

/// Recovery on an already computed [`Result`].
pub trait CatchExt<T> {
    /// Recovers from the part of this result's failure accepted by `predicate`.
    ///
    /// # Errors
    ///
    /// Returns the unmatched part of the failure, or the handler's own error
    /// if the handler fails.
    fn catch<H>(self, predicate: impl Into<Predicate>, handler: H) -> Result<Outcome<T>, Failure>
    where
        H: FnOnce(Failure) -> Result<(), Failure>;
}

impl<T, E> CatchExt<T> for Result<T, E>
where
    E: Into<Failure>,
{
    fn catch<H>(self, predicate: impl Into<Predicate>, handler: H) -> Result<Outcome<T>, Failure>
    where
        H: FnOnce(Failure) -> Result<(), Failure>,
    {
        let failure = match self {
            Ok(value) => return Ok(Outcome::Completed(value)),
            Err(error) => error.into(),
        };

        let Split { matched, rest } = failure.split(&predicate.into());
        if let Some(matched) = matched {
            log_recovery(&matched, rest.as_ref());
            handler(matched)?;
        }
        reraise(rest)
    }
}

fn log_recovery(matched: &Failure, rest: Option<&Failure>) {
    debug!(
        matched = matched.size(),
        rest = rest.map_or(0, Failure::size),
        "recovering from matched failures"
    );
}

fn reraise<T>(rest: Option<Failure>) -> Result<Outcome<T>, Failure> {
    rest.map_or(Ok(Outcome::Recovered), |rest| {
        trace!(size = rest.size(), "re-raising unmatched failures");
        Err(rest)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AggregateError, LeafError,
        testing::{Io, Refused, Timeout, init_tracing, small_tree},
    };
    use std::{cell::RefCell, time::Duration};

    async fn unreachable_handler(_: Failure) -> Result<(), Failure> {
        panic!("handler must not run")
    }

    #[test]
    fn test_catch_matched_and_rest() {
        init_tracing();
        let calls = RefCell::new(Vec::new());
        let result = catch(
            Predicate::kind::<Timeout>(),
            || -> Result<(), AggregateError> { Err(small_tree()) },
            |matched| {
                calls.borrow_mut().push(matched.repr());
                Ok(())
            },
        );

        assert_eq!(
            calls.into_inner(),
            ["AggregateError([Timeout, AggregateError([Timeout])])"]
        );
        assert_eq!(
            result.unwrap_err().repr(),
            "AggregateError([AggregateError([Refused])])"
        );
    }

    #[test]
    fn test_catch_unmatched_leaf_propagates_unchanged() {
        let leaf = LeafError::new(Refused);
        let mut called = false;
        let result = catch(
            Predicate::kind::<Timeout>(),
            || -> Result<(), LeafError> { Err(leaf.clone()) },
            |_| {
                called = true;
                Ok(())
            },
        );

        assert!(!called);
        let failure = result.unwrap_err();
        assert!(failure.as_leaf().is_some_and(|inner| inner.ptr_eq(&leaf)));
    }

    #[test]
    fn test_catch_everything_recovers() {
        let mut calls = 0;
        let result = catch(
            Predicate::test(|_| true),
            || -> Result<u32, AggregateError> { Err(small_tree()) },
            |matched| {
                calls += 1;
                assert_eq!(matched.size(), 3);
                Ok(())
            },
        );
        assert_eq!(calls, 1);
        assert!(result.unwrap().is_recovered());
    }

    #[test]
    fn test_catch_success_skips_handler() {
        let mut called = false;
        let result = catch(
            Predicate::kind::<Timeout>(),
            || Ok::<_, Refused>(7),
            |_| {
                called = true;
                Ok(())
            },
        );
        assert!(!called);
        assert_eq!(result.unwrap().completed(), Some(7));
    }

    #[test]
    fn test_catch_handler_error_replaces_failure() {
        let result = catch(
            Predicate::kind::<Timeout>(),
            || -> Result<(), AggregateError> { Err(small_tree()) },
            |_| Err(Failure::from(Timeout::new("handler"))),
        );
        let failure = result.unwrap_err();
        assert_eq!(failure.repr(), "Timeout");
        assert_eq!(failure.to_string(), "timed out waiting for handler");
    }

    #[test]
    fn test_catch_leaf_matched() {
        let mut seen = None;
        let result = catch(
            Predicate::kind::<Timeout>(),
            || -> Result<(), Timeout> { Err(Timeout::new("a")) },
            |matched| {
                seen = Some(matched.repr());
                Ok(())
            },
        );
        assert_eq!(seen.as_deref(), Some("Timeout"));
        assert!(result.unwrap().is_recovered());
    }

    #[test]
    fn test_chained_catches_keep_unmatched() {
        let result = catch(
            Predicate::kind::<Refused>(),
            || {
                catch(
                    Predicate::kind::<Io>(),
                    || -> Result<(), AggregateError> { Err(small_tree()) },
                    |_| Ok(()),
                )
            },
            |_| Ok(()),
        );
        assert_eq!(
            result.unwrap_err().repr(),
            "AggregateError([Timeout, AggregateError([Timeout])])"
        );
    }

    #[test]
    fn test_catch_ext_on_result() {
        let result: Result<(), AggregateError> = Err(small_tree());
        let mut seen = None;
        let outcome = result.catch(Predicate::kind::<Refused>(), |matched| {
            seen = Some(matched.size());
            Ok(())
        });
        assert_eq!(seen, Some(1));
        assert_eq!(outcome.unwrap_err().size(), 2);
    }

    #[tokio::test]
    async fn test_acatch_matched_and_rest() {
        init_tracing();
        let result = acatch(
            Predicate::kind::<Timeout>(),
            async { Err::<(), _>(small_tree()) },
            |matched| async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                assert_eq!(
                    matched.repr(),
                    "AggregateError([Timeout, AggregateError([Timeout])])"
                );
                Ok(())
            },
        )
        .await;

        assert_eq!(
            result.unwrap_err().repr(),
            "AggregateError([AggregateError([Refused])])"
        );
    }

    #[tokio::test]
    async fn test_acatch_success() {
        let result = acatch(
            Predicate::kind::<Timeout>(),
            async { Ok::<_, Refused>("done") },
            unreachable_handler,
        )
        .await;
        assert_eq!(result.unwrap(), Outcome::Completed("done"));
    }

    #[tokio::test]
    async fn test_acatch_unmatched_leaf() {
        let result = acatch(
            Predicate::kind::<Timeout>(),
            async { Err::<(), _>(Refused) },
            unreachable_handler,
        )
        .await;
        assert_eq!(result.unwrap_err().repr(), "Refused");
    }

    #[tokio::test]
    async fn test_acatch_handler_error() {
        let result = acatch(
            Predicate::kind::<Refused>(),
            async { Err::<(), _>(small_tree()) },
            |_| async { Err(Failure::from(Timeout::new("cleanup"))) },
        )
        .await;
        assert_eq!(result.unwrap_err().to_string(), "timed out waiting for cleanup");
    }
}
