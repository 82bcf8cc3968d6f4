//! # xlr8-shape
//!
//! **Tier 0 (Pure Metrics)**
//!
//! Shape metrics over nested records, used to size a tabular export before
//! records are flattened into rows.
//!
//! * **depth** counts nested *mapping* levels. Sequences and sets are
//!   transparent: descending into one does not add a level.
//! * **length** estimates the flattened row width. Mappings sum their values;
//!   sequences and sets take the widest element times the element count.
//!
//! Any tree type can be measured by implementing [`Nested`]. Implementations
//! ship for [`Node`], `serde_json::Value`, `toml::Value` and the std
//! containers and scalars.
//!
//! ## Preconditions
//! Input must be finite and acyclic. Owned trees cannot form cycles; a custom
//! [`Nested`] implementation that yields one will recurse without bound.
//!
//! ## What does NOT belong here
//! * Flattening records into rows
//! * Spreadsheet file layout

#![forbid(unsafe_code)]

mod nested;
mod node;

use serde::{Deserialize, Serialize};

pub use nested::{Nested, View};
pub use node::{Node, NodeSet, Scalar};

/// Number of nested mapping levels from `node` to its deepest point.
///
/// Empty containers and scalars are `0`.
#[must_use]
pub fn depth<T: Nested + ?Sized>(node: &T) -> usize {
    match node.view() {
        View::Mapping(values) => values.into_iter().map(|v| 1 + depth(v)).max().unwrap_or(0),
        View::Collection(items) => items.into_iter().map(depth).max().unwrap_or(0),
        View::Scalar => 0,
    }
}

/// Estimated flattened width of `node`.
///
/// Scalars are `1`. A collection is as wide as its widest element repeated
/// once per element, so heterogeneous elements are padded to a common width.
/// Saturates at `usize::MAX`.
#[must_use]
pub fn length<T: Nested + ?Sized>(node: &T) -> usize {
    match node.view() {
        View::Mapping(values) => values
            .into_iter()
            .map(length)
            .fold(0, usize::saturating_add),
        View::Collection(items) => {
            let count = items.len();
            let widest = items.into_iter().map(length).max().unwrap_or(0);
            widest.saturating_mul(count)
        }
        View::Scalar => 1,
    }
}

/// Both metrics for one value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub depth: usize,
    pub length: usize,
}

impl Shape {
    #[must_use]
    pub fn of<T: Nested + ?Sized>(node: &T) -> Self {
        Self {
            depth: depth(node),
            length: length(node),
        }
    }

    /// Grid dimensions for a batch of records, measured as one sequence.
    ///
    /// `depth` is the header height and `length` the total cell budget of
    /// the export.
    #[must_use]
    pub fn of_records<T: Nested>(records: &[T]) -> Self {
        Self::of(records)
    }
}
