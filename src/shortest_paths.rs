//! All-pairs shortest paths by the Floyd–Warshall algorithm.
//!
//! The result is an owned [`ShortestPaths`] value holding a distance matrix
//! and a predecessor matrix.  Unreachable pairs are represented by
//! [`Distance::Unreachable`] rather than a large finite sentinel, so no input
//! scale can make a real path look unreachable.
use std::{fmt, ops::Add};

use tracing::info_span;

use crate::{
    graph::{MatrixGraph, Weight},
    square_matrix::SquareMatrix,
};

/// Length of a shortest path.  Every `Reachable` value orders before
/// `Unreachable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Reachable(Weight),
    Unreachable,
}

impl Distance {
    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Reachable(_))
    }

    /// Gets the path length, or `None` if unreachable.
    pub fn value(self) -> Option<Weight> {
        match self {
            Distance::Reachable(w) => Some(w),
            Distance::Unreachable => None,
        }
    }
}

/// Sums two path lengths.  The sum is `Unreachable` if either side is, and
/// also if the finite sum would overflow.
impl Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        match (self, other) {
            (Distance::Reachable(a), Distance::Reachable(b)) => a
                .checked_add(b)
                .map_or(Distance::Unreachable, Distance::Reachable),
            _ => Distance::Unreachable,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Reachable(w) => write!(f, "{w}"),
            Distance::Unreachable => f.write_str("inf"),
        }
    }
}

/// Distances and predecessors for every ordered pair of nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPaths {
    dist: SquareMatrix<Distance>,
    pred: SquareMatrix<Option<usize>>,
}

impl ShortestPaths {
    /// Runs Floyd–Warshall over `graph`.
    ///
    /// Initially `dist` holds `0` on the diagonal and the edge weight wherever
    /// an edge exists; `pred[(i, j)]` is `i` wherever a direct edge `i -> j`
    /// exists off the diagonal.  A pair is only updated when routing through
    /// the intermediate node is strictly shorter.
    pub fn compute(graph: &MatrixGraph) -> Self {
        let _span = info_span!("floyd_warshall", nodes = graph.node_count()).entered();
        let n = graph.node_count();
        let mut dist = SquareMatrix::from_fn(n, |i, j| {
            if i == j {
                Distance::Reachable(0)
            } else {
                graph
                    .weight(i, j)
                    .map_or(Distance::Unreachable, Distance::Reachable)
            }
        });
        let mut pred =
            SquareMatrix::from_fn(n, |i, j| (i != j && graph.has_edge(i, j)).then_some(i));

        for k in 0..n {
            for i in 0..n {
                let to_k = dist[(i, k)];
                if !to_k.is_reachable() {
                    continue;
                }
                for j in 0..n {
                    let through_k = to_k + dist[(k, j)];
                    if through_k < dist[(i, j)] {
                        dist[(i, j)] = through_k;
                        pred[(i, j)] = pred[(k, j)];
                    }
                }
            }
        }

        Self { dist, pred }
    }

    /// Gets the shortest distance from `from` to `to`, or `None` if either
    /// node is out of range.
    pub fn distance(&self, from: usize, to: usize) -> Option<Distance> {
        self.dist.get(from, to).copied()
    }

    /// Gets the node immediately before `to` on the shortest path from
    /// `from`.  `None` on the diagonal, for unreachable pairs, and for
    /// out-of-range nodes.
    pub fn predecessor(&self, from: usize, to: usize) -> Option<usize> {
        self.pred.get(from, to).copied().flatten()
    }

    pub fn distances(&self) -> &SquareMatrix<Distance> {
        &self.dist
    }

    pub fn predecessors(&self) -> &SquareMatrix<Option<usize>> {
        &self.pred
    }

    /// Reconstructs the shortest path from `from` to `to` by walking the
    /// predecessor matrix backwards from `to`.
    ///
    /// Returns `Some(vec![from])` when `from == to` and `None` when `to` is
    /// unreachable or either node is out of range.
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        if !self.distance(from, to)?.is_reachable() {
            return None;
        }
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            current = self.predecessor(from, current)?;
            path.push(current);
            if path.len() > self.dist.size() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

/// Renders the distance matrix, a blank line, then the predecessor matrix.
/// Entries are followed by a single space; unreachable distances print as
/// `inf` and missing predecessors as `-1`.
impl fmt::Display for ShortestPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.dist.rows() {
            for d in row {
                write!(f, "{d} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        for row in self.pred.rows() {
            for p in row {
                match p {
                    Some(node) => write!(f, "{node} ")?,
                    None => f.write_str("-1 ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "pathfinding")]
impl MatrixGraph {
    /// Finds a single shortest path from `source` to `target` with
    /// Dijkstra's algorithm, returning the node sequence and its length.
    pub fn shortest_path(&self, source: usize, target: usize) -> Option<(Vec<usize>, Weight)> {
        if self.check_node(source).is_err() || self.check_node(target).is_err() {
            return None;
        }
        pathfinding::prelude::dijkstra(
            &source,
            move |&node| self.out_edges(node),
            |&node| node == target,
        )
    }
}
