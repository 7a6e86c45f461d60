//! Plain-text graph descriptions.
//!
//! The first line holds the node count and the number of edge records that
//! follow; each record is a `source sink weight` line.  All fields are
//! integers separated by whitespace:
//!
//! ```text
//! 4 3
//! 0 1 3
//! 1 2 1
//! 2 3 2
//! ```
//!
//! Records are inserted as directed edges under the rules of
//! [`MatrixGraph::add_edge`].  A well-formed record naming an invalid edge is
//! logged once and skipped.  Anything that is not well formed, or a header
//! declaring more than [`MAX_DESCRIPTION_NODES`] nodes, aborts the load.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use tracing::{debug, warn};

use crate::{error::ParseError, graph::MatrixGraph};

/// Largest node count a description may declare.  The weight matrix holds
/// `n * n` cells, so this caps a loaded graph at 2 GiB of weights.
pub const MAX_DESCRIPTION_NODES: usize = 1 << 14;

const HEADER_FIELDS: usize = 2;
const RECORD_FIELDS: usize = 3;

impl MatrixGraph {
    /// Loads a graph from a description held in memory.
    pub fn from_description(text: &str) -> Result<Self, ParseError> {
        Self::from_reader(text.as_bytes())
    }

    /// Loads a graph from a description file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading graph description");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads a graph from any buffered reader.
    ///
    /// Reading stops after the declared number of records or at end of
    /// input, whichever comes first; nothing after the last record is read.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ParseError> {
        let mut lines = reader.lines().enumerate().map(|(index, line)| (index + 1, line));

        let (header_line, header) = loop {
            match lines.next() {
                None => return Err(ParseError::MissingHeader),
                Some((number, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break (number, line);
                    }
                }
            }
        };
        let [node_count, record_count] = parse_fields::<HEADER_FIELDS>(&header, header_line)?;
        let node_count = count(node_count, header_line)?;
        if node_count > MAX_DESCRIPTION_NODES {
            return Err(ParseError::TooManyNodes {
                line: header_line,
                value: node_count,
                limit: MAX_DESCRIPTION_NODES,
            });
        }
        let record_count = count(record_count, header_line)?;

        let mut graph = MatrixGraph::with_size(node_count);
        for read in 0..record_count {
            let Some((number, line)) = lines.next() else {
                debug!(read, expected = record_count, "description ended early");
                break;
            };
            let [source, sink, weight] = parse_fields::<RECORD_FIELDS>(&line?, number)?;
            match (usize::try_from(source), usize::try_from(sink)) {
                (Ok(source), Ok(sink)) if graph.is_valid_edge(source, sink, weight) => {
                    graph.insert_checked(source, sink, weight)
                }
                _ => warn!(line = number, source, sink, weight, "Invalid edge"),
            }
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded graph description"
        );
        Ok(graph)
    }

    /// Renders the graph in the description format, one record per stored
    /// edge in row-major order.
    pub fn to_description(&self) -> String {
        let mut out = format!("{} {}\n", self.node_count(), self.distinct_edge_count());
        for (source, sink, &weight) in self.weights().iter() {
            if weight != 0 {
                out.push_str(&format!("{source} {sink} {weight}\n"));
            }
        }
        out
    }
}

impl FromStr for MatrixGraph {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_description(s)
    }
}

fn parse_fields<const N: usize>(line: &str, number: usize) -> Result<[i64; N], ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != N {
        return Err(ParseError::FieldCount {
            line: number,
            expected: N,
            found: tokens.len(),
        });
    }
    let mut fields = [0; N];
    for (field, token) in fields.iter_mut().zip(tokens) {
        *field = token.parse().map_err(|_| ParseError::InvalidInteger {
            line: number,
            token: token.to_string(),
        })?;
    }
    Ok(fields)
}

fn count(value: i64, number: usize) -> Result<usize, ParseError> {
    usize::try_from(value).map_err(|_| ParseError::NegativeCount {
        line: number,
        value,
    })
}
