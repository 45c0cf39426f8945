//! Tree-shaped aggregate errors.
//!
//! When several independent operations fail, keeping only the last error
//! loses information. This crate gathers such failures into one
//! [`AggregateError`], a tree whose leaves are the individual errors and whose
//! inner nodes are nested aggregates, and lets callers recover from part of it
//! while passing the rest on.
//!
//! # Core Types
//!
//! - [`Failure`]: a node of a failure tree, either a [`LeafError`] or an [`AggregateError`]
//! - [`AggregateError`]: an ordered, non-empty composite of failures with its [`Provenance`]
//! - [`Predicate`]: selects leaves, by [`Kind`] or by an arbitrary test
//! - [`Split`]: the `(matched, rest)` halves produced by [`split`]
//!
//! # Recovery
//!
//! - [`catch`]: run fallible work and hand the matched part of its failure to a handler
//! - [`acatch`]: the same, awaiting an asynchronous handler
//! - [`CatchExt`]: recovery on an already computed [`Result`]
//!
//! # Join points
//!
//! - [`try_collect`] and [`Collector`]: gather the failures of sequential operations
//! - `parallel::try_par_map`: gather the failures of a rayon parallel map (requires `parallel`)
//!
//! # Features
//!
//! - `serde`: serialization of [`Shape`] snapshots
//! - `parallel`: parallel join points with rayon
//!
//! # Example
//!
//! ```
//! use multierror::{AggregateError, Failure, Predicate, split};
//!
//! let error = AggregateError::new([
//!     Failure::from(std::fmt::Error),
//!     AggregateError::new([
//!         Failure::from(std::fmt::Error),
//!         Failure::from("x".parse::<u8>().unwrap_err()),
//!     ])
//!     .unwrap()
//!     .into(),
//! ])
//! .unwrap();
//!
//! assert_eq!(error.size(), 3);
//! assert_eq!(
//!     error.repr(),
//!     "AggregateError([Error, AggregateError([Error, ParseIntError])])"
//! );
//!
//! let (matched, rest) = split(Predicate::kind::<std::fmt::Error>(), error).into_parts();
//! assert_eq!(matched.unwrap().repr(), "AggregateError([Error, AggregateError([Error])])");
//! assert_eq!(rest.unwrap().repr(), "AggregateError([AggregateError([ParseIntError])])");
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod aggregate;
mod catch;
mod collect;
mod error;
mod failure;
mod kind;
mod leaf;
mod predicate;
mod shape;
mod split;
mod tree;

// Parallel join points (requires rayon)
#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(test)]
mod testing;

// Core types
pub use aggregate::{AggregateError, Leaves, Provenance};
pub use error::BuildError;
pub use failure::Failure;
pub use kind::Kind;
pub use leaf::LeafError;
pub use predicate::Predicate;
pub use shape::Shape;
pub use split::{Split, split};

// Recovery
pub use catch::{CatchExt, Outcome, acatch, catch};

// Join points
pub use collect::{Collector, try_collect};
