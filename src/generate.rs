use crate::{
    error::GraphError,
    graph::{MatrixGraph, Weight},
};

const CLUSTER1: usize = 50;
const CLUSTER2: usize = 80;
const CLUSTER3: usize = 150;
const HUBS: usize = 20;
const SCATTERED: usize = 100;
const BRIDGES: usize = 10;

/// Number of nodes in the graph built by [`generate_large_graph`].
pub const LARGE_GRAPH_NODES: usize = CLUSTER1 + CLUSTER2 + CLUSTER3 + HUBS + SCATTERED + BRIDGES;

/// Generates a large graph with an irregular structure, using a closure to
/// pick the weight of each inserted edge from its insertion index.
///
/// The node range is partitioned into:
/// - Cluster 1: dense cluster (50 nodes, ~60% connectivity)
/// - Cluster 2: medium cluster (80 nodes, ~30% connectivity)
/// - Cluster 3: large sparse cluster (150 nodes, ~8% connectivity)
/// - Hub nodes (20 nodes with edges to many earlier nodes)
/// - Scattered nodes (100 nodes with one to three edges each)
/// - Bridge nodes connecting the three clusters (10 nodes)
///
/// followed by long-range edges, reciprocal pairs and self loops.  The
/// structure is fully determined by index arithmetic, so every call builds
/// the same matrix.
///
/// Fails if `new_weight` returns a non-positive weight.
pub fn generate_large_graph<F>(mut new_weight: F) -> Result<MatrixGraph, GraphError>
where
    F: FnMut(usize) -> Weight,
{
    let mut graph = MatrixGraph::with_size(LARGE_GRAPH_NODES);
    let mut edge_counter = 0;
    let mut connect = |graph: &mut MatrixGraph, source: usize, sink: usize| {
        let weight = new_weight(edge_counter);
        edge_counter += 1;
        graph.add_edge(source, sink, weight)
    };

    let cluster1_start = 0;
    let cluster2_start = cluster1_start + CLUSTER1;
    let cluster3_start = cluster2_start + CLUSTER2;
    let hubs_start = cluster3_start + CLUSTER3;
    let scattered_start = hubs_start + HUBS;
    let bridges_start = scattered_start + SCATTERED;

    for i in cluster1_start..cluster2_start {
        for j in (i + 1)..cluster2_start {
            if (i * 7 + j * 11) % 10 < 6 {
                connect(&mut graph, i, j)?;
            }
        }
    }

    for i in cluster2_start..cluster3_start {
        for j in (i + 1)..cluster3_start {
            if (i * 13 + j * 17) % 10 < 3 {
                connect(&mut graph, i, j)?;
            }
        }
    }

    for i in cluster3_start..hubs_start {
        for j in (i + 1)..hubs_start {
            if (i * 19 + j * 23) % 100 < 8 {
                connect(&mut graph, i, j)?;
            }
        }
    }

    for hub in hubs_start..scattered_start {
        for i in 0..hub {
            if (hub * 29 + i * 31) % 7 < 4 {
                connect(&mut graph, hub, i)?;
            }
        }
    }

    for node in scattered_start..bridges_start {
        let num_connections = ((scattered_start + node + 1) % 3) + 1;
        for c in 0..num_connections {
            let target = (scattered_start * 37 + (node + 1) * 41 + c * 43) % node;
            connect(&mut graph, node, target)?;
        }
    }

    for (i, bridge) in (bridges_start..LARGE_GRAPH_NODES).enumerate() {
        connect(&mut graph, bridge, (i * 47) % CLUSTER1 + cluster1_start)?;
        connect(&mut graph, bridge, (i * 53) % CLUSTER2 + cluster2_start)?;
        connect(&mut graph, bridge, (i * 59) % CLUSTER3 + cluster3_start)?;
    }

    for i in 0..200 {
        let source = (i * 61) % LARGE_GRAPH_NODES;
        let sink = (i * 67 + 100) % LARGE_GRAPH_NODES;
        if source != sink {
            connect(&mut graph, source, sink)?;
        }
    }

    for i in 0..50 {
        let a = (i * 73 + 7) % LARGE_GRAPH_NODES;
        let b = (i * 79 + 11) % LARGE_GRAPH_NODES;
        if a == b {
            continue;
        }
        connect(&mut graph, a, b)?;
        connect(&mut graph, b, a)?;
    }

    for i in 0..50 {
        let node = (i * 71) % LARGE_GRAPH_NODES;
        connect(&mut graph, node, node)?;
    }

    Ok(graph)
}
