use std::io;

use crate::graph::Weight;

/// Errors reported by graph operations.  None of these leave the graph in a
/// modified state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge named an endpoint outside the graph or a non-positive weight.
    #[error("Invalid edge: {from} {to} {weight}")]
    InvalidEdge {
        from: usize,
        to: usize,
        weight: Weight,
    },
    /// A node index outside `0..node_count`.
    #[error("Invalid node: {node} (graph has {node_count} nodes)")]
    InvalidNode { node: usize, node_count: usize },
    /// The recursive depth-first search went deeper than it is allowed to.
    #[error("Recursion limit of {depth} frames exceeded")]
    RecursionLimit { depth: usize },
}

/// Errors that can occur while loading a graph description.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input ended before a header line was found.
    #[error("Missing header line")]
    MissingHeader,
    /// A line did not have the number of fields its position requires.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A field could not be read as an integer.
    #[error("Line {line}: invalid integer {token:?}")]
    InvalidInteger { line: usize, token: String },
    /// The header declared a negative node or record count.
    #[error("Line {line}: negative count {value}")]
    NegativeCount { line: usize, value: i64 },
    /// The header declared more nodes than a description may hold.
    #[error("Line {line}: node count {value} exceeds the limit of {limit}")]
    TooManyNodes {
        line: usize,
        value: usize,
        limit: usize,
    },
    /// IO error while reading the description.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
