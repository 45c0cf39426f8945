//! Error fixtures shared by the unit tests.

use thiserror::Error;

use crate::{AggregateError, Failure};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timed out waiting for {target}")]
pub(crate) struct Timeout {
    pub(crate) target: String,
}

impl Timeout {
    pub(crate) fn new(target: &str) -> Self {
        Self {
            target: target.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("connection refused")]
pub(crate) struct Refused;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum Io {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied")]
    PermissionDenied,
}

pub(crate) fn aggregate<I>(children: I) -> AggregateError
where
    I: IntoIterator,
    I::Item: Into<Failure>,
{
    AggregateError::new(children).unwrap()
}

/// `[Timeout(a), [Timeout(b), Refused]]`
pub(crate) fn small_tree() -> AggregateError {
    aggregate([
        Failure::from(Timeout::new("a")),
        aggregate([Failure::from(Timeout::new("b")), Failure::from(Refused)]).into(),
    ])
}

/// `[[Timeout(a), [Timeout(b), Refused], Refused], Timeout(c), [Timeout(d), Refused, [Timeout(e), Refused]]]`
pub(crate) fn large_tree() -> AggregateError {
    aggregate([
        Failure::from(aggregate([
            Failure::from(Timeout::new("a")),
            aggregate([Failure::from(Timeout::new("b")), Failure::from(Refused)]).into(),
            Refused.into(),
        ])),
        Timeout::new("c").into(),
        aggregate([
            Failure::from(Timeout::new("d")),
            Refused.into(),
            aggregate([Failure::from(Timeout::new("e")), Failure::from(Refused)]).into(),
        ])
        .into(),
    ])
}

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
