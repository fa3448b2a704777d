//! CLI command implementations.
//!
//! Every command takes the graph file as its first argument. Files ending in
//! `.wgr` are binary snapshots; anything else is a text export. Mutating
//! commands write the graph back in the same format.

use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;

use crate::algo::{bfs_order, PathEngine};
use crate::format::{is_snapshot_path, text, SnapshotReader, SnapshotWriter};
use crate::graph::{GraphBuilder, WeightedGraph};
use crate::types::{FileHeader, GraphError, GraphResult, NodeKey};

/// Read a graph, choosing the format from the extension.
pub fn open_graph(path: &Path) -> GraphResult<WeightedGraph> {
    if is_snapshot_path(path) {
        SnapshotReader::read_from_file(path)
    } else {
        text::read_from_file(path)
    }
}

/// Write a graph, choosing the format from the extension.
///
/// The graph goes to a temporary file next to `path` that is renamed over it
/// once complete, so a failed write leaves the previous file intact.
pub fn store_graph(graph: &WeightedGraph, path: &Path, compress: bool) -> GraphResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        if is_snapshot_path(path) {
            SnapshotWriter::new()
                .with_compression(compress)
                .write_to(graph, &mut out)?;
        } else {
            text::write_graph_to(graph, &mut out)?;
        }
        out.flush()?;
    }
    tmp.persist(path).map_err(|e| GraphError::Io(e.error))?;
    info!(
        "stored {} nodes, {} edges in {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(())
}

/// Keep the compression flag of an existing snapshot when rewriting it.
fn was_compressed(path: &Path) -> bool {
    is_snapshot_path(path) && read_header(path).is_some_and(|h| h.is_compressed())
}

fn read_header(path: &Path) -> Option<FileHeader> {
    let mut file = std::fs::File::open(path).ok()?;
    FileHeader::read_from(&mut file).ok()
}

fn update_graph<T>(
    path: &Path,
    change: impl FnOnce(&mut WeightedGraph) -> GraphResult<T>,
) -> GraphResult<(WeightedGraph, T)> {
    let mut graph = open_graph(path)?;
    let compress = was_compressed(path);
    let out = change(&mut graph)?;
    store_graph(&graph, path, compress)?;
    Ok((graph, out))
}

/// The 11-node sample graph used by `demo`.
pub fn sample_graph() -> GraphResult<WeightedGraph> {
    GraphBuilder::new()
        .nodes(0..=10)
        .edge(0, 1, 4.0)
        .edge(0, 2, 6.5)
        .edge(0, 5, 2.6)
        .edge(0, 6, 1.0)
        .edge(1, 9, 17.8)
        .edge(2, 3, 2.0)
        .edge(2, 8, 2.0)
        .edge(3, 7, 2.0)
        .edge(3, 8, 2.0)
        .edge(4, 7, 3.7)
        .edge(4, 5, 2.5)
        .edge(4, 9, 6.0)
        .edge(5, 6, 1.5)
        .edge(7, 9, 1.8)
        .edge(7, 10, 0.5)
        .edge(9, 10, 1.2)
        .build()
}

/// Create a new empty graph file.
pub fn cmd_create(path: &Path, compress: bool) -> GraphResult<()> {
    let graph = WeightedGraph::new();
    store_graph(&graph, path, compress)?;
    println!("Created {}", path.display());
    Ok(())
}

/// Display information about a graph file.
pub fn cmd_info(path: &Path, json: bool) -> GraphResult<()> {
    let graph = open_graph(path)?;
    let file_size = std::fs::metadata(path)?.len();
    let header = if is_snapshot_path(path) {
        read_header(path)
    } else {
        None
    };
    let connected = PathEngine::new(&graph).is_connected();
    let max_degree = graph.nodes().map(|n| n.degree()).max().unwrap_or(0);

    if json {
        let format = if header.is_some() { "binary" } else { "text" };
        let compressed = header.is_some_and(|h| h.is_compressed());
        let saved_at = header.map(|h| h.saved_at);
        let info = serde_json::json!({
            "file": path.display().to_string(),
            "format": format,
            "compressed": compressed,
            "saved_at": saved_at,
            "nodes": graph.node_count(),
            "edges": graph.edge_count(),
            "modifications": graph.modification_count(),
            "max_degree": max_degree,
            "connected": connected,
            "file_size": file_size,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        println!("File: {}", path.display());
        match header {
            Some(h) => {
                println!(
                    "Format: binary{}",
                    if h.is_compressed() { " (lz4)" } else { "" }
                );
                println!("Saved: {}", format_timestamp(h.saved_at));
            }
            None => println!("Format: text"),
        }
        println!("Nodes: {}", graph.node_count());
        println!("Edges: {}", graph.edge_count());
        println!("Modifications: {}", graph.modification_count());
        println!("Max degree: {}", max_degree);
        println!("Connected: {}", connected);
        println!("File size: {}", format_size(file_size));
    }
    Ok(())
}

/// Add one or more nodes.
pub fn cmd_add_node(path: &Path, keys: &[NodeKey], json: bool) -> GraphResult<()> {
    let (graph, added) = update_graph(path, |graph| {
        let mut added = Vec::new();
        for &key in keys {
            if !graph.contains_node(key) {
                graph.add_node(key);
                added.push(key);
            }
        }
        Ok(added)
    })?;

    if json {
        println!(
            "{}",
            serde_json::json!({"added": added, "nodes": graph.node_count()})
        );
    } else {
        println!(
            "Added {} node(s) to {} ({} total)",
            added.len(),
            path.display(),
            graph.node_count()
        );
    }
    Ok(())
}

/// Remove a node and its edges.
pub fn cmd_remove_node(path: &Path, key: NodeKey, json: bool) -> GraphResult<()> {
    let (_, removed) = update_graph(path, |graph| {
        graph.remove_node(key).ok_or(GraphError::KeyNotFound(key))
    })?;

    if json {
        println!(
            "{}",
            serde_json::json!({"removed": key, "edges_removed": removed.degree()})
        );
    } else {
        println!("Removed node {} and {} edge(s)", key, removed.degree());
    }
    Ok(())
}

/// Connect two nodes, or change the weight of their edge.
pub fn cmd_connect(path: &Path, a: NodeKey, b: NodeKey, weight: f64, json: bool) -> GraphResult<()> {
    update_graph(path, |graph| graph.connect(a, b, weight))?;

    if json {
        println!("{}", serde_json::json!({"a": a, "b": b, "weight": weight}));
    } else {
        println!("Connected {} --{}-- {}", a, weight, b);
    }
    Ok(())
}

/// Remove the edge between two nodes.
pub fn cmd_disconnect(path: &Path, a: NodeKey, b: NodeKey, json: bool) -> GraphResult<()> {
    let (_, removed) = update_graph(path, |graph| Ok(graph.remove_edge(a, b)))?;

    if json {
        println!(
            "{}",
            serde_json::json!({"a": a, "b": b, "removed": removed.is_some()})
        );
    } else if removed.is_some() {
        println!("Disconnected {} and {}", a, b);
    } else {
        println!("No edge between {} and {}", a, b);
    }
    Ok(())
}

/// Print the weight of an edge.
pub fn cmd_edge(path: &Path, a: NodeKey, b: NodeKey, json: bool) -> GraphResult<()> {
    let graph = open_graph(path)?;
    // Surfaces KeyNotFound for absent keys.
    graph.get_edge(a, b)?;
    let weight = graph.edge_weight(a, b);

    if json {
        println!("{}", serde_json::json!({"a": a, "b": b, "weight": weight}));
    } else {
        match weight {
            Some(w) => println!("{} -- {}: {}", a, b, w),
            None => println!("{} -- {}: no edge", a, b),
        }
    }
    Ok(())
}

/// List the neighbors of a node.
pub fn cmd_neighbors(path: &Path, key: NodeKey, json: bool) -> GraphResult<()> {
    let graph = open_graph(path)?;
    let node = graph.get_node(key).ok_or(GraphError::KeyNotFound(key))?;
    let neighbors = node.sorted_neighbors();

    if json {
        let items: Vec<serde_json::Value> = neighbors
            .iter()
            .map(|&(k, w)| serde_json::json!({"key": k, "weight": w}))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&items).unwrap_or_default()
        );
    } else {
        println!("Node {} ({} neighbors)", key, neighbors.len());
        for (k, w) in neighbors {
            println!("  {} ({})", k, w);
        }
    }
    Ok(())
}

/// Report whether the graph is connected.
pub fn cmd_connected(path: &Path, json: bool) -> GraphResult<()> {
    let graph = open_graph(path)?;
    let connected = PathEngine::new(&graph).is_connected();
    let reached = match graph.lowest_key() {
        Some(start) => bfs_order(&graph, start)?.len(),
        None => 0,
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "connected": connected,
                "reached": reached,
                "nodes": graph.node_count(),
            })
        );
    } else if connected {
        println!("Connected ({} nodes)", graph.node_count());
    } else {
        println!(
            "Not connected: {} of {} nodes reachable from the lowest key",
            reached,
            graph.node_count()
        );
    }
    Ok(())
}

/// Shortest path between two nodes.
pub fn cmd_path(path: &Path, src: NodeKey, dest: NodeKey, json: bool) -> GraphResult<()> {
    let graph = open_graph(path)?;
    let result = PathEngine::new(&graph).dijkstra(src, dest)?;

    if json {
        let info = serde_json::json!({
            "src": src,
            "dest": dest,
            "shortest": result,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        match result {
            Some(p) => {
                println!("Distance: {}", p.distance);
                println!("Path: {}", format_path(&p.path));
            }
            None => println!("No path from {} to {}", src, dest),
        }
    }
    Ok(())
}

/// Print the text export.
pub fn cmd_export(path: &Path) -> GraphResult<()> {
    let graph = open_graph(path)?;
    println!("{}", graph);
    Ok(())
}

/// Re-save a graph in the format picked by the output extension.
pub fn cmd_convert(input: &Path, output: &Path, compress: bool) -> GraphResult<()> {
    let graph = open_graph(input)?;
    store_graph(&graph, output, compress)?;
    println!("Converted {} -> {}", input.display(), output.display());
    Ok(())
}

/// Build the sample graph, run every query on it, and optionally save it.
pub fn cmd_demo(save_to: Option<&Path>, json: bool) -> GraphResult<()> {
    let graph = sample_graph()?;
    let engine = PathEngine::new(&graph);
    let connected = engine.is_connected();
    let shortest = engine.dijkstra(0, 9)?;

    if json {
        let info = serde_json::json!({
            "nodes": graph.node_count(),
            "edges": graph.edge_count(),
            "connected": connected,
            "shortest_0_9": shortest,
            "text": graph.to_string(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        println!("Nodes: {}", graph.node_count());
        println!("Edges: {}", graph.edge_count());
        println!("Connected: {}", connected);
        if let Some(p) = &shortest {
            println!("Distance 0 -> 9: {:.1}", p.distance);
            println!("Path 0 -> 9: {}", format_path(&p.path));
        }
        println!("{}", graph);
    }

    if let Some(path) = save_to {
        store_graph(&graph, path, false)?;
        if !json {
            println!("Saved to {}", path.display());
        }
    }
    Ok(())
}

fn format_path(path: &[NodeKey]) -> String {
    path.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn format_timestamp(micros: u64) -> String {
    let secs = (micros / 1_000_000) as i64;
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{} us", micros),
    }
}
