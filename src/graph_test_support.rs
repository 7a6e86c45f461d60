use quickcheck::{Arbitrary, Gen};
use tracing::info_span;

use crate::{
    graph::{MatrixGraph, Weight},
    tracing_support::{TimingScope, init_tracing, set_timing_scope},
};

/// Upper bound on the number of nodes in generated graphs.
const MAX_NODES: usize = 12;

/// A random graph built from a mix of directed and unoriented insertions,
/// including repeated pairs and self loops.
#[derive(Debug, Clone)]
pub struct ArbGraph {
    pub graph: MatrixGraph,
}

impl Arbitrary for ArbGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_nodes = usize::arbitrary(g) % (MAX_NODES + 1);
        let num_edges = usize::arbitrary(g) % 40;
        let mut graph = MatrixGraph::with_size(num_nodes);
        if num_nodes == 0 {
            return ArbGraph { graph };
        }
        for _ in 0..num_edges {
            let source = usize::arbitrary(g) % num_nodes;
            let sink = usize::arbitrary(g) % num_nodes;
            let weight = arbitrary_weight(g);
            let result = if bool::arbitrary(g) {
                graph.add_edge(source, sink, weight)
            } else {
                graph.add_edge_unoriented(source, sink, weight)
            };
            assert!(result.is_ok());
        }
        ArbGraph { graph }
    }
}

/// A random graph built only from unoriented insertions.
#[derive(Debug, Clone)]
pub struct ArbUnorientedGraph {
    pub graph: MatrixGraph,
}

impl Arbitrary for ArbUnorientedGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_nodes = usize::arbitrary(g) % (MAX_NODES + 1);
        let num_edges = usize::arbitrary(g) % 30;
        let mut graph = MatrixGraph::with_size(num_nodes);
        if num_nodes == 0 {
            return ArbUnorientedGraph { graph };
        }
        for _ in 0..num_edges {
            let source = usize::arbitrary(g) % num_nodes;
            let sink = usize::arbitrary(g) % num_nodes;
            let weight = arbitrary_weight(g);
            assert!(graph.add_edge_unoriented(source, sink, weight).is_ok());
        }
        ArbUnorientedGraph { graph }
    }
}

fn arbitrary_weight(g: &mut Gen) -> Weight {
    Weight::from(u8::arbitrary(g) % 20) + 1
}

/// Checks the internal consistency of a graph.
pub fn check_graph_consistency(graph: &MatrixGraph) {
    let _scope = set_timing_scope(TimingScope::Test);
    init_tracing();
    let _span = info_span!("check_graph_consistency").entered();

    let n = graph.node_count();
    assert_eq!(graph.weights().size(), n);
    assert!(graph.weights().iter().all(|(_, _, &w)| w >= 0));
    assert!(graph.distinct_edge_count() <= graph.edge_count());

    let mut degree_sum = 0;
    for node in 0..n {
        let degree = graph.degree(node).unwrap();
        assert_eq!(degree, graph.successors(node).count());
        assert!(degree <= graph.highest_degree());
        assert!(degree >= graph.lowest_degree());
        degree_sum += degree;
    }
    assert_eq!(degree_sum, graph.distinct_edge_count());
}
