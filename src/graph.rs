//! [`MatrixGraph`] is a weighted graph over a fixed set of nodes, stored as a
//! dense adjacency matrix.
//!
//! Nodes are the integers `0..node_count`.  The cell at `(source, sink)` holds
//! the weight of the edge from `source` to `sink`, or `0` when there is no such
//! edge, so every stored weight is strictly positive.  The node count is fixed
//! at construction; the only mutation afterwards is inserting edges.
//!
//! This module provides:
//!
//! - Construction by size (descriptions are handled in
//!   [`description`](crate::description))
//! - Edge insertion, directed and unoriented
//! - Structural queries: degree, density, orientation, complement
//! - Entry points for traversals ([`search`](crate::search)) and all-pairs
//!   shortest paths ([`shortest_paths`](crate::shortest_paths))
use std::fmt;

use tracing::{info_span, warn};

use crate::{
    error::GraphError,
    search::{self, BfsIterator, DfsIterator},
    shortest_paths::ShortestPaths,
    square_matrix::SquareMatrix,
};

/// Edge weight.  Stored weights are always positive; `0` means "no edge".
pub type Weight = i64;

/// A directed, weighted graph backed by an `n × n` weight matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixGraph {
    node_count: usize,
    /// Number of accepted insertions.  An unoriented insertion counts twice,
    /// and overwriting an existing cell still counts.
    edge_count: usize,
    weights: SquareMatrix<Weight>,
}

impl MatrixGraph {
    /// Creates a graph with `node_count` nodes and no edges.
    pub fn with_size(node_count: usize) -> Self {
        Self {
            node_count,
            edge_count: 0,
            weights: SquareMatrix::with_size(node_count, 0),
        }
    }

    /// Gets the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Gets the number of accepted edge insertions.
    ///
    /// This is a count of operations, not of edges present: re-inserting an
    /// existing edge increments it again.  Use
    /// [`distinct_edge_count`](Self::distinct_edge_count) for the number of
    /// edges actually stored.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Gets the number of nonzero cells in the weight matrix.
    pub fn distinct_edge_count(&self) -> usize {
        self.weights.iter().filter(|&(_, _, &w)| w != 0).count()
    }

    /// Gets the underlying weight matrix.
    pub fn weights(&self) -> &SquareMatrix<Weight> {
        &self.weights
    }

    /// Gets the weight of the edge from `source` to `sink`, if there is one.
    pub fn weight(&self, source: usize, sink: usize) -> Option<Weight> {
        self.weights
            .get(source, sink)
            .copied()
            .filter(|&w| w != 0)
    }

    /// Returns `true` if there is an edge from `source` to `sink`.
    pub fn has_edge(&self, source: usize, sink: usize) -> bool {
        self.weight(source, sink).is_some()
    }

    /// Iterates over the outgoing edges of `node` as `(sink, weight)` pairs,
    /// in ascending order of `sink`.  Yields nothing for an invalid node.
    pub fn out_edges(&self, node: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        (0..self.node_count).filter_map(move |sink| self.weight(node, sink).map(|w| (sink, w)))
    }

    /// Iterates over the nodes reachable from `node` by a single edge, in
    /// ascending order.
    pub fn successors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.out_edges(node).map(|(sink, _)| sink)
    }

    /// Returns an error unless `node` is a valid node index.
    pub fn check_node(&self, node: usize) -> Result<(), GraphError> {
        if node < self.node_count {
            Ok(())
        } else {
            Err(GraphError::InvalidNode {
                node,
                node_count: self.node_count,
            })
        }
    }

    pub(crate) fn is_valid_edge(&self, source: usize, sink: usize, weight: Weight) -> bool {
        source < self.node_count && sink < self.node_count && weight > 0
    }

    fn check_edge(&self, source: usize, sink: usize, weight: Weight) -> Result<(), GraphError> {
        if self.is_valid_edge(source, sink, weight) {
            Ok(())
        } else {
            warn!(source, sink, weight, "Invalid edge");
            Err(GraphError::InvalidEdge {
                from: source,
                to: sink,
                weight,
            })
        }
    }

    /// Inserts a directed edge from `source` to `sink`, replacing any weight
    /// already stored for that pair.
    ///
    /// Fails without modifying the graph if either endpoint is out of range
    /// or `weight` is not positive.
    pub fn add_edge(
        &mut self,
        source: usize,
        sink: usize,
        weight: Weight,
    ) -> Result<(), GraphError> {
        self.check_edge(source, sink, weight)?;
        self.insert_checked(source, sink, weight);
        Ok(())
    }

    /// Stores an edge already known to satisfy `is_valid_edge`.
    pub(crate) fn insert_checked(&mut self, source: usize, sink: usize, weight: Weight) {
        self.edge_count += 1;
        self.weights[(source, sink)] = weight;
    }

    /// Inserts an edge in both directions between `source` and `sink`.  This
    /// counts as two insertions.
    ///
    /// Fails without modifying the graph under the same conditions as
    /// [`add_edge`](Self::add_edge).
    pub fn add_edge_unoriented(
        &mut self,
        source: usize,
        sink: usize,
        weight: Weight,
    ) -> Result<(), GraphError> {
        self.check_edge(source, sink, weight)?;
        self.edge_count += 2;
        self.weights[(source, sink)] = weight;
        self.weights[(sink, source)] = weight;
        Ok(())
    }

    fn out_degree(&self, node: usize) -> usize {
        self.weights.row(node).iter().filter(|&&w| w != 0).count()
    }

    /// Gets the out-degree of `node`.  For a graph built only from unoriented
    /// insertions this is also its undirected degree.
    pub fn degree(&self, node: usize) -> Result<usize, GraphError> {
        self.check_node(node).inspect_err(|_| {
            warn!(node, node_count = self.node_count, "Invalid node");
        })?;
        Ok(self.out_degree(node))
    }

    /// Gets the largest out-degree of any node, or `0` for an empty graph.
    pub fn highest_degree(&self) -> usize {
        (0..self.node_count)
            .map(|node| self.out_degree(node))
            .max()
            .unwrap_or(0)
    }

    /// Gets the smallest out-degree of any node.  An empty graph reports its
    /// node count, `0`.
    pub fn lowest_degree(&self) -> usize {
        (0..self.node_count)
            .map(|node| self.out_degree(node))
            .fold(self.node_count, usize::min)
    }

    /// Builds the complement graph: same nodes, with a weight-1 edge `(i, j)`
    /// for every `i != j` that has no edge here.  The result never contains
    /// self-loops.
    pub fn complement(&self) -> MatrixGraph {
        let mut complement = MatrixGraph::with_size(self.node_count);
        for (i, j, &w) in self.weights.iter() {
            if i != j && w == 0 {
                complement.edge_count += 1;
                complement.weights[(i, j)] = 1;
            }
        }
        complement
    }

    /// Gets the ratio of edge insertions to the `n * (n - 1)` possible
    /// directed edges.  Graphs with fewer than two nodes have density `0.0`.
    pub fn density(&self) -> f64 {
        if self.node_count <= 1 {
            return 0.0;
        }
        let possible = self.node_count as f64 * (self.node_count - 1) as f64;
        self.edge_count as f64 / possible
    }

    /// Returns `true` if some cell differs from its mirror across the
    /// diagonal, i.e. the weight matrix is not symmetric.
    pub fn is_oriented(&self) -> bool {
        self.weights
            .iter()
            .any(|(i, j, &w)| i < j && w != self.weights[(j, i)])
    }

    /// Iterates over the nodes reachable from `start` in breadth-first order.
    pub fn bfs_iter(&self, start: usize) -> Result<BfsIterator<'_>, GraphError> {
        self.check_node(start)?;
        Ok(BfsIterator::new(self, start))
    }

    /// Iterates over the nodes reachable from `start` in depth-first order.
    pub fn dfs_iter(&self, start: usize) -> Result<DfsIterator<'_>, GraphError> {
        self.check_node(start)?;
        Ok(DfsIterator::new(self, start))
    }

    /// Lists the nodes reachable from `start` in breadth-first discovery
    /// order, breaking ties by ascending node index.
    pub fn bfs(&self, start: usize) -> Result<Vec<usize>, GraphError> {
        let _span = info_span!("bfs").entered();
        Ok(self.bfs_iter(start)?.collect())
    }

    /// Lists the nodes reachable from `start` in depth-first discovery order,
    /// always descending into the smallest undiscovered successor first.
    pub fn dfs(&self, start: usize) -> Result<Vec<usize>, GraphError> {
        let _span = info_span!("dfs").entered();
        Ok(self.dfs_iter(start)?.collect())
    }

    /// Recursive form of [`dfs`](Self::dfs).  Fails with
    /// [`GraphError::RecursionLimit`] instead of recursing deeper than
    /// [`search::MAX_RECURSION_DEPTH`] frames.
    pub fn dfs_recursive(&self, start: usize) -> Result<Vec<usize>, GraphError> {
        let _span = info_span!("dfs_recursive").entered();
        self.check_node(start)?;
        search::dfs_recursive(self, start)
    }

    /// Returns `true` if every node is reachable from node `0`.  The empty
    /// graph is connected.
    pub fn is_connected(&self) -> bool {
        match self.bfs_iter(0) {
            Ok(nodes) => nodes.count() == self.node_count,
            Err(_) => self.node_count == 0,
        }
    }

    /// Computes shortest paths between all pairs of nodes.
    pub fn floyd_warshall(&self) -> ShortestPaths {
        ShortestPaths::compute(self)
    }
}

/// Renders the weight matrix, one tab-terminated cell per entry and one row
/// per line.
impl fmt::Display for MatrixGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.weights.rows() {
            for w in row {
                write!(f, "{w}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_path_graph() -> MatrixGraph {
        let mut graph = MatrixGraph::with_size(4);
        graph.add_edge(0, 1, 3).unwrap();
        graph.add_edge(1, 2, 1).unwrap();
        graph.add_edge(2, 3, 2).unwrap();
        graph
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph = MatrixGraph::with_size(5);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.distinct_edge_count(), 0);
        assert!(graph.weights().iter().all(|(_, _, &w)| w == 0));
    }

    #[test]
    fn test_add_edge_sets_one_cell() {
        let mut graph = MatrixGraph::with_size(3);
        assert_eq!(graph.add_edge(0, 2, 4), Ok(()));
        assert_eq!(graph.weight(0, 2), Some(4));
        assert_eq!(graph.weight(2, 0), None);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_unoriented_sets_both_cells() {
        let mut graph = MatrixGraph::with_size(3);
        assert_eq!(graph.add_edge_unoriented(0, 2, 4), Ok(()));
        assert_eq!(graph.weight(0, 2), Some(4));
        assert_eq!(graph.weight(2, 0), Some(4));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_invalid_edges_are_rejected() {
        let mut graph = MatrixGraph::with_size(3);
        for (source, sink, weight) in [(3, 0, 1), (0, 3, 1), (0, 1, 0), (0, 1, -2)] {
            assert_eq!(
                graph.add_edge(source, sink, weight),
                Err(GraphError::InvalidEdge {
                    from: source,
                    to: sink,
                    weight
                })
            );
            assert!(graph.add_edge_unoriented(source, sink, weight).is_err());
        }
        assert_eq!(graph, MatrixGraph::with_size(3));
    }

    #[test]
    fn test_reinsert_overcounts_edges() {
        let mut graph = MatrixGraph::with_size(2);
        graph.add_edge(0, 1, 5).unwrap();
        graph.add_edge(0, 1, 9).unwrap();
        assert_eq!(graph.weight(0, 1), Some(9));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.distinct_edge_count(), 1);
    }

    #[test]
    fn test_self_loop_is_stored() {
        let mut graph = MatrixGraph::with_size(2);
        graph.add_edge(1, 1, 7).unwrap();
        assert_eq!(graph.weight(1, 1), Some(7));
        assert_eq!(graph.degree(1), Ok(1));
    }

    #[test]
    fn test_degree() {
        let mut graph = MatrixGraph::with_size(4);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(0, 2, 1).unwrap();
        graph.add_edge(3, 0, 1).unwrap();
        assert_eq!(graph.degree(0), Ok(2));
        assert_eq!(graph.degree(1), Ok(0));
        assert_eq!(graph.degree(3), Ok(1));
        assert_eq!(
            graph.degree(4),
            Err(GraphError::InvalidNode {
                node: 4,
                node_count: 4
            })
        );
    }

    #[test]
    fn test_highest_and_lowest_degree() {
        let mut graph = MatrixGraph::with_size(4);
        graph.add_edge_unoriented(0, 1, 1).unwrap();
        graph.add_edge_unoriented(0, 2, 1).unwrap();
        graph.add_edge_unoriented(0, 3, 1).unwrap();
        assert_eq!(graph.highest_degree(), 3);
        assert_eq!(graph.lowest_degree(), 1);
    }

    #[test]
    fn test_degree_extremes_of_edgeless_graph() {
        let graph = MatrixGraph::with_size(3);
        assert_eq!(graph.highest_degree(), 0);
        assert_eq!(graph.lowest_degree(), 0);
        let empty = MatrixGraph::with_size(0);
        assert_eq!(empty.highest_degree(), 0);
        assert_eq!(empty.lowest_degree(), 0);
    }

    #[test]
    fn test_complement() {
        let mut graph = create_path_graph();
        graph.add_edge(2, 2, 1).unwrap();
        let complement = graph.complement();
        assert_eq!(complement.node_count(), 4);
        for i in 0..4 {
            assert!(!complement.has_edge(i, i));
            for j in 0..4 {
                if i != j {
                    assert_eq!(complement.has_edge(i, j), !graph.has_edge(i, j));
                }
            }
        }
        assert!(complement.weights().iter().all(|(_, _, &w)| w == 0 || w == 1));
        assert_eq!(complement.edge_count(), 12 - 3);
    }

    #[test]
    fn test_density() {
        let mut graph = MatrixGraph::with_size(3);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(1, 2, 1).unwrap();
        assert!((graph.density() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_density_of_tiny_graphs_is_zero() {
        assert_eq!(MatrixGraph::with_size(0).density(), 0.0);
        let mut single = MatrixGraph::with_size(1);
        single.add_edge(0, 0, 1).unwrap();
        assert_eq!(single.density(), 0.0);
    }

    #[test]
    fn test_is_oriented() {
        let mut graph = MatrixGraph::with_size(3);
        assert!(!graph.is_oriented());
        graph.add_edge_unoriented(0, 1, 2).unwrap();
        assert!(!graph.is_oriented());
        graph.add_edge(1, 2, 2).unwrap();
        assert!(graph.is_oriented());
        graph.add_edge(2, 1, 3).unwrap();
        assert!(graph.is_oriented());
        graph.add_edge(2, 1, 2).unwrap();
        assert!(!graph.is_oriented());
    }

    #[test]
    fn test_successors_are_ascending() {
        let mut graph = MatrixGraph::with_size(4);
        graph.add_edge(1, 3, 1).unwrap();
        graph.add_edge(1, 0, 2).unwrap();
        graph.add_edge(1, 2, 3).unwrap();
        assert_eq!(graph.successors(1).collect::<Vec<_>>(), vec![0, 2, 3]);
        assert_eq!(
            graph.out_edges(1).collect::<Vec<_>>(),
            vec![(0, 2), (2, 3), (3, 1)]
        );
        assert_eq!(graph.successors(9).count(), 0);
    }

    #[test]
    fn test_is_connected() {
        assert!(MatrixGraph::with_size(0).is_connected());
        assert!(MatrixGraph::with_size(1).is_connected());
        assert!(!MatrixGraph::with_size(2).is_connected());
        assert!(create_path_graph().is_connected());

        // Reachability is directed: node 0 cannot be reached from the rest,
        // but the check only starts from node 0.
        let mut graph = MatrixGraph::with_size(3);
        graph.add_edge(1, 0, 1).unwrap();
        graph.add_edge(1, 2, 1).unwrap();
        assert!(!graph.is_connected());
    }

    #[test]
    fn test_display_dump() {
        let mut graph = MatrixGraph::with_size(2);
        graph.add_edge(0, 1, 5).unwrap();
        assert_eq!(graph.to_string(), "0\t5\t\n0\t0\t\n");
        assert_eq!(MatrixGraph::with_size(0).to_string(), "");
    }
}
