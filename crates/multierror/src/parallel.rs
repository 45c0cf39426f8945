//! Parallel join points.
//!
//! [`try_par_map`] runs a fallible operation over every item on rayon's
//! global pool and gathers the outcome the same way [`try_collect`] does:
//! all values in input order, or every failure in input order.
//!
//! ```
//! use multierror::parallel::try_par_map;
//!
//! let inputs = vec!["4", "four", "2", "two"];
//! let failure = try_par_map(inputs, |s| s.parse::<u8>()).unwrap_err();
//! assert_eq!(failure.size(), 2);
//! ```

use rayon::prelude::*;

use crate::{collect::try_collect, failure::Failure};

/// Maps `items` in parallel, collecting every value or every failure.
///
/// # Errors
///
/// Returns an aggregate of all failures, in input order, if any item fails.
pub fn try_par_map<I, T, U, E, F>(items: I, f: F) -> Result<Vec<U>, Failure>
where
    I: IntoParallelIterator<Item = T>,
    I::Iter: IndexedParallelIterator,
    F: Fn(T) -> Result<U, E> + Sync + Send,
    U: Send,
    E: Into<Failure> + Send,
{
    let results: Vec<Result<U, E>> = items.into_par_iter().map(f).collect();
    try_collect(results)
}
