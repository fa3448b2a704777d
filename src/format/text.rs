//! Human-readable text export.
//!
//! One record per node, in insertion order, separated by `|`:
//!
//! ```text
//! {Key:0,Neighbors:[1(4.0),2(6.5)]}|{Key:1,Neighbors:[0(4.0)]}|{Key:2,Neighbors:[0(6.5)]}
//! ```
//!
//! Neighbors are listed by ascending key. Every edge appears on both of its
//! endpoints.

use std::collections::HashSet;
use std::fmt::{self, Write as _};
use std::io;
use std::path::Path;

use log::{debug, info};

use crate::graph::WeightedGraph;
use crate::types::{GraphError, GraphResult, NodeKey};

const RECORD_PREFIX: &str = "{Key:";
const NEIGHBORS_TAG: &str = ",Neighbors:[";

/// Write the text export of `graph` into `out`.
pub fn write_graph(out: &mut impl fmt::Write, graph: &WeightedGraph) -> fmt::Result {
    for (i, node) in graph.nodes().enumerate() {
        if i > 0 {
            out.write_char('|')?;
        }
        write!(out, "{}{}{}", RECORD_PREFIX, node.key(), NEIGHBORS_TAG)?;
        for (j, (other, weight)) in node.sorted_neighbors().into_iter().enumerate() {
            if j > 0 {
                out.write_char(',')?;
            }
            // `{:?}` keeps the fractional part on whole numbers: 4.0, not 4.
            write!(out, "{}({:?})", other, weight)?;
        }
        out.write_str("]}")?;
    }
    Ok(())
}

/// The text export of `graph` as a string.
pub fn to_text(graph: &WeightedGraph) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_graph(&mut out, graph);
    out
}

/// Parse a text export back into a graph.
///
/// All nodes are created before any edge is connected. The whole input is
/// rejected on the first malformed record, on a neighbor that has no record
/// of its own, or on an edge that is missing from one of its endpoints or
/// listed there with a different weight.
pub fn parse_graph(input: &str) -> GraphResult<WeightedGraph> {
    let mut graph = WeightedGraph::new();
    let input = input.trim();
    if input.is_empty() {
        return Ok(graph);
    }

    let records = input
        .split('|')
        .map(|fragment| parse_record(fragment.trim()))
        .collect::<GraphResult<Vec<_>>>()?;

    let listed: HashSet<(NodeKey, NodeKey)> = records
        .iter()
        .flat_map(|r| r.neighbors.iter().map(move |&(other, _)| (r.key, other)))
        .collect();

    for record in &records {
        graph.add_node(record.key);
    }
    for record in &records {
        for &(other, weight) in &record.neighbors {
            if let Some(existing) = graph.edge_weight(record.key, other) {
                if existing != weight {
                    return Err(GraphError::parse(
                        &record.fragment,
                        format!("edge to {other} listed as {existing} on the other end"),
                    ));
                }
            }
            graph
                .connect(record.key, other, weight)
                .map_err(|e| GraphError::parse(&record.fragment, e.to_string()))?;
            if !listed.contains(&(other, record.key)) {
                return Err(GraphError::parse(
                    &record.fragment,
                    format!("edge to {other} is missing from node {other}'s list"),
                ));
            }
        }
    }

    debug!(
        "parsed text graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Write the text export, followed by a newline, into `writer`.
pub fn write_graph_to(graph: &WeightedGraph, writer: &mut impl io::Write) -> GraphResult<()> {
    let mut text = to_text(graph);
    text.push('\n');
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Write the text export to `path`, followed by a newline.
pub fn write_to_file(graph: &WeightedGraph, path: &Path) -> GraphResult<()> {
    let mut file = std::fs::File::create(path)?;
    write_graph_to(graph, &mut file)?;
    info!(
        "saved {} nodes, {} edges to {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(())
}

/// Read a text export from `path`.
pub fn read_from_file(path: &Path) -> GraphResult<WeightedGraph> {
    let text = std::fs::read_to_string(path)?;
    let graph = parse_graph(&text)?;
    info!(
        "loaded {} nodes, {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

/// One parsed `{Key:..,Neighbors:[..]}` record.
struct Record {
    fragment: String,
    key: NodeKey,
    neighbors: Vec<(NodeKey, f64)>,
}

fn parse_record(fragment: &str) -> GraphResult<Record> {
    let body = fragment
        .strip_prefix(RECORD_PREFIX)
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| GraphError::parse(fragment, "expected {Key:<k>,Neighbors:[...]}"))?;
    let (key_text, rest) = body
        .split_once(NEIGHBORS_TAG)
        .ok_or_else(|| GraphError::parse(fragment, "missing Neighbors list"))?;
    let list = rest
        .strip_suffix(']')
        .ok_or_else(|| GraphError::parse(fragment, "unterminated Neighbors list"))?;

    let key = key_text
        .trim()
        .parse::<NodeKey>()
        .map_err(|e| GraphError::parse(fragment, format!("bad key `{key_text}`: {e}")))?;

    let mut neighbors = Vec::new();
    if !list.trim().is_empty() {
        for item in list.split(',') {
            neighbors.push(parse_neighbor(fragment, item.trim())?);
        }
    }

    Ok(Record {
        fragment: fragment.to_string(),
        key,
        neighbors,
    })
}

/// Parse `key(weight)`.
fn parse_neighbor(fragment: &str, item: &str) -> GraphResult<(NodeKey, f64)> {
    let (key_text, weight_text) = item
        .strip_suffix(')')
        .and_then(|s| s.split_once('('))
        .ok_or_else(|| GraphError::parse(fragment, format!("bad neighbor `{item}`")))?;
    let key = key_text
        .trim()
        .parse::<NodeKey>()
        .map_err(|e| GraphError::parse(fragment, format!("bad neighbor key `{key_text}`: {e}")))?;
    let weight = weight_text
        .trim()
        .parse::<f64>()
        .map_err(|e| GraphError::parse(fragment, format!("bad weight `{weight_text}`: {e}")))?;
    Ok((key, weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_without_neighbors() {
        let record = parse_record("{Key:-4,Neighbors:[]}").unwrap();
        assert_eq!(record.key, -4);
        assert!(record.neighbors.is_empty());
    }

    #[test]
    fn neighbor_list_tolerates_spaces() {
        let record = parse_record("{Key:1,Neighbors:[2(0.5), 3( 1e-3 )]}").unwrap();
        assert_eq!(record.neighbors, vec![(2, 0.5), (3, 0.001)]);
    }

    #[test]
    fn weight_formatting_keeps_fraction() {
        let mut g = WeightedGraph::new();
        g.add_node(0);
        g.add_node(1);
        g.connect(0, 1, 4.0).unwrap();
        assert_eq!(
            to_text(&g),
            "{Key:0,Neighbors:[1(4.0)]}|{Key:1,Neighbors:[0(4.0)]}"
        );
    }
}
