//! Box-drawing rendering of failure trees.
//!
//! ```text
//! AggregateError |3|
//! ├── Timeout
//! └── AggregateError |2|
//!     ├── Timeout
//!     └── Refused
//! ```
//!
//! Two counters are threaded through the recursion: `closed` counts the
//! ancestor levels at which the path went through a last child, `opened` the
//! levels at which it did not. The indent of a child line is `closed` blank
//! blocks followed by `opened` vertical bars. The output is meant for people
//! and has no stable format.

use core::fmt::{self, Write};

use crate::{
    aggregate::{AGGREGATE_KIND, AggregateError},
    failure::Failure,
};

const BLANK: &str = "    ";
const BAR: &str = "│   ";
const TEE: &str = "├── ";
const ELBOW: &str = "└── ";

fn write_failure<W: Write>(
    out: &mut W,
    node: &Failure,
    closed: usize,
    opened: usize,
) -> fmt::Result {
    match node {
        Failure::Leaf(leaf) => writeln!(out, "{}", leaf.kind()),
        Failure::Aggregate(aggregate) => write_aggregate(out, aggregate, closed, opened),
    }
}

pub(crate) fn write_aggregate<W: Write>(
    out: &mut W,
    aggregate: &AggregateError,
    closed: usize,
    opened: usize,
) -> fmt::Result {
    writeln!(out, "{AGGREGATE_KIND} |{}|", aggregate.size())?;

    let n = aggregate.children().len();
    for (i, child) in aggregate.children().iter().enumerate() {
        let last = i + 1 == n;
        for _ in 0..closed {
            out.write_str(BLANK)?;
        }
        for _ in 0..opened {
            out.write_str(BAR)?;
        }
        out.write_str(if last { ELBOW } else { TEE })?;
        write_failure(
            out,
            child,
            closed + usize::from(last),
            opened + usize::from(!last),
        )?;
    }
    Ok(())
}
