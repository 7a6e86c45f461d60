use std::collections::VecDeque;

use bitvec::vec::BitVec;

use crate::{error::GraphError, graph::MatrixGraph};

/// Maximum number of nested frames [`dfs_recursive`] will use.
pub const MAX_RECURSION_DEPTH: usize = 1024;

/// Breadth-first traversal over outgoing edges.  Nodes are yielded in the
/// order they are discovered; successors of a node are discovered in
/// ascending index order.
pub struct BfsIterator<'g> {
    graph: &'g MatrixGraph,
    discovered: BitVec,
    queue: VecDeque<usize>,
}

impl<'g> BfsIterator<'g> {
    /// Starts a traversal at `start`, which must be a valid node of `graph`.
    pub fn new(graph: &'g MatrixGraph, start: usize) -> Self {
        let mut discovered = BitVec::repeat(false, graph.node_count());
        discovered.set(start, true);
        Self {
            graph,
            discovered,
            queue: VecDeque::from([start]),
        }
    }
}

impl<'g> Iterator for BfsIterator<'g> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        for neighbor in self.graph.successors(node) {
            if !self.discovered[neighbor] {
                self.discovered.set(neighbor, true);
                self.queue.push_back(neighbor);
            }
        }
        Some(node)
    }
}

/// Depth-first traversal over outgoing edges, driven by an explicit stack.
///
/// The node on top of the stack descends into its smallest undiscovered
/// successor; once it has none left it is popped.  Each stack frame keeps
/// the column its scan stopped at, since discovered flags are never cleared.
pub struct DfsIterator<'g> {
    graph: &'g MatrixGraph,
    discovered: BitVec,
    stack: Vec<(usize, usize)>,
    start: Option<usize>,
}

impl<'g> DfsIterator<'g> {
    /// Starts a traversal at `start`, which must be a valid node of `graph`.
    pub fn new(graph: &'g MatrixGraph, start: usize) -> Self {
        let mut discovered = BitVec::repeat(false, graph.node_count());
        discovered.set(start, true);
        Self {
            graph,
            discovered,
            stack: vec![(start, 0)],
            start: Some(start),
        }
    }

    fn next_undiscovered(&self, node: usize, from: usize) -> Option<usize> {
        (from..self.graph.node_count())
            .find(|&sink| self.graph.has_edge(node, sink) && !self.discovered[sink])
    }
}

impl<'g> Iterator for DfsIterator<'g> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            return Some(start);
        }
        while let Some(&(node, cursor)) = self.stack.last() {
            match self.next_undiscovered(node, cursor) {
                Some(neighbor) => {
                    if let Some(top) = self.stack.last_mut() {
                        top.1 = neighbor + 1;
                    }
                    self.discovered.set(neighbor, true);
                    self.stack.push((neighbor, 0));
                    return Some(neighbor);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Pre-order depth-first search from `start` using native recursion.
///
/// Produces the same order as [`DfsIterator`].  Fails with
/// [`GraphError::RecursionLimit`] if a search path would need more than
/// [`MAX_RECURSION_DEPTH`] frames.
pub fn dfs_recursive(graph: &MatrixGraph, start: usize) -> Result<Vec<usize>, GraphError> {
    graph.check_node(start)?;
    let mut discovered = BitVec::repeat(false, graph.node_count());
    let mut order = Vec::new();
    visit(graph, start, 1, &mut discovered, &mut order)?;
    Ok(order)
}

fn visit(
    graph: &MatrixGraph,
    node: usize,
    depth: usize,
    discovered: &mut BitVec,
    order: &mut Vec<usize>,
) -> Result<(), GraphError> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(GraphError::RecursionLimit {
            depth: MAX_RECURSION_DEPTH,
        });
    }
    discovered.set(node, true);
    order.push(node);
    for neighbor in graph.successors(node) {
        if !discovered[neighbor] {
            visit(graph, neighbor, depth + 1, discovered, order)?;
        }
    }
    Ok(())
}
