//! Structural snapshots of failure trees.
//!
//! A [`Shape`] is a plain-data copy of a tree: kind names, messages and
//! nesting, without the error values themselves. With the `serde` feature it
//! can be serialized for diagnostic dumps.

use crate::failure::Failure;

/// A plain-data snapshot of a failure tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Shape {
    /// A leaf error.
    Leaf {
        /// Kind name of the leaf.
        kind: String,
        /// Display output of the leaf.
        message: String,
    },
    /// An aggregate of further shapes.
    Aggregate {
        /// Number of leaves below this node.
        size: usize,
        /// Snapshots of the direct children.
        children: Vec<Self>,
    },
}

impl Shape {
    /// Returns the number of leaves in this snapshot.
    pub const fn size(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Aggregate { size, .. } => *size,
        }
    }
}

impl Failure {
    /// Takes a structural snapshot of this failure.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Leaf(leaf) => Shape::Leaf {
                kind: leaf.kind().to_owned(),
                message: leaf.to_string(),
            },
            Self::Aggregate(aggregate) => Shape::Aggregate {
                size: aggregate.size(),
                children: aggregate.children().iter().map(Self::shape).collect(),
            },
        }
    }
}

impl From<&Failure> for Shape {
    fn from(failure: &Failure) -> Self {
        failure.shape()
    }
}
