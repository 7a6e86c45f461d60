//! Weighted graphs stored as dense adjacency matrices.
//!
//! [`MatrixGraph`] holds a fixed set of nodes `0..n` and an `n * n` weight
//! matrix.  Beyond edge insertion and structural queries it offers
//! breadth-first and depth-first traversals ([`search`]), all-pairs shortest
//! paths ([`shortest_paths`]) and a plain-text description format
//! ([`description`]).
//!
//! ```
//! use densegraph::{Distance, MatrixGraph};
//!
//! let graph: MatrixGraph = "3 2\n0 1 4\n1 2 6\n".parse().unwrap();
//! assert_eq!(graph.bfs(0).unwrap(), vec![0, 1, 2]);
//! assert_eq!(
//!     graph.floyd_warshall().distance(0, 2),
//!     Some(Distance::Reachable(10))
//! );
//! ```
pub mod description;
pub mod error;
pub mod generate;
pub mod graph;
pub mod search;
pub mod shortest_paths;
pub mod square_matrix;
pub mod tracing_support;

#[cfg(test)]
mod graph_test_support;

pub use error::{GraphError, ParseError};
pub use graph::{MatrixGraph, Weight};
pub use shortest_paths::{Distance, ShortestPaths};
pub use square_matrix::SquareMatrix;
