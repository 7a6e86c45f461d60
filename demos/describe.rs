//! Loads a graph description and prints a summary of it.
//!
//! Usage:
//!   cargo run --example describe -- path/to/graph.txt
//!   cat path/to/graph.txt | cargo run --example describe
//!   cargo run --example describe -- --generate --start 3

use std::io;
use std::process;

use clap::Parser;
use densegraph::{MatrixGraph, generate::generate_large_graph, tracing_support::init_tracing};

/// Read a graph description from a file or stdin and print its structure,
/// traversals and all-pairs shortest paths.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input description path (use '-' or omit to read from stdin)
    input: Option<String>,

    /// Use the built-in large generated graph instead of reading input
    #[arg(long, conflicts_with = "input")]
    generate: bool,

    /// Node to start traversals from
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Skip printing the weight matrix and shortest path report
    #[arg(long)]
    summary_only: bool,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let graph = if args.generate {
        generate_large_graph(|i| (i % 9 + 1) as i64).unwrap_or_else(|err| exit_with(err))
    } else {
        load_or_exit(args.input.as_deref())
    };

    if !args.summary_only {
        println!("{graph}");
    }
    print_summary(&graph, args.start);
    if !args.summary_only {
        println!();
        print!("{}", graph.floyd_warshall());
    }
}

fn load_or_exit(input: Option<&str>) -> MatrixGraph {
    let result = match input {
        Some("-") | None => MatrixGraph::from_reader(io::stdin().lock()),
        Some(path) => MatrixGraph::from_path(path),
    };
    result.unwrap_or_else(|err| exit_with(err))
}

fn exit_with(err: impl std::fmt::Display) -> ! {
    eprintln!("Invalid graph description: {err}");
    process::exit(1);
}

fn print_summary(graph: &MatrixGraph, start: usize) {
    println!("nodes: {}", graph.node_count());
    println!(
        "edges: {} insertions, {} distinct",
        graph.edge_count(),
        graph.distinct_edge_count()
    );
    println!("degree: highest {}, lowest {}", graph.highest_degree(), graph.lowest_degree());
    println!("density: {:.4}", graph.density());
    println!("oriented: {}", graph.is_oriented());
    println!("connected: {}", graph.is_connected());
    match (graph.bfs(start), graph.dfs(start)) {
        (Ok(bfs), Ok(dfs)) => {
            println!("bfs from {start}: {bfs:?}");
            println!("dfs from {start}: {dfs:?}");
        }
        (Err(err), _) | (_, Err(err)) => println!("traversal: {err}"),
    }
}
