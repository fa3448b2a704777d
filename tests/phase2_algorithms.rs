//! Phase 2 tests: connectivity and shortest paths.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wgraph::algo::{bfs_order, GraphAlgo, PathEngine};
use wgraph::graph::{GraphBuilder, WeightedGraph};
use wgraph::types::{GraphError, NO_PATH};

/// Nodes 0..=10 with the 16 weighted edges of the reference scenario.
fn sample_graph() -> wgraph::GraphResult<WeightedGraph> {
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

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn path_weight(graph: &WeightedGraph, path: &[i32]) -> f64 {
    path.windows(2)
        .map(|pair| graph.edge_weight(pair[0], pair[1]).unwrap())
        .sum()
}

// ==================== Connectivity ====================

#[test]
fn test_connectivity_small_graphs() {
    let mut graph = WeightedGraph::new();
    assert!(PathEngine::new(&graph).is_connected());

    graph.add_node(0);
    assert!(PathEngine::new(&graph).is_connected());

    graph.add_node(1);
    assert!(!PathEngine::new(&graph).is_connected());

    graph.connect(0, 1, 1.0).unwrap();
    assert!(PathEngine::new(&graph).is_connected());
}

#[test]
fn test_connectivity_after_removals() {
    let mut graph = GraphBuilder::new()
        .nodes(0..4)
        .edge(0, 1, 1.0)
        .edge(1, 2, 1.0)
        .edge(2, 3, 1.0)
        .build()
        .unwrap();
    assert!(PathEngine::new(&graph).is_connected());

    graph.remove_edge(1, 2);
    assert!(!PathEngine::new(&graph).is_connected());

    graph.connect(0, 3, 2.0).unwrap();
    assert!(PathEngine::new(&graph).is_connected());

    graph.remove_node(0);
    assert!(!PathEngine::new(&graph).is_connected());
}

#[test]
fn test_bfs_order_is_level_by_level() {
    let graph = GraphBuilder::new()
        .nodes(0..6)
        .edge(0, 2, 1.0)
        .edge(0, 1, 1.0)
        .edge(1, 3, 1.0)
        .edge(2, 4, 1.0)
        .build()
        .unwrap();
    assert_eq!(bfs_order(&graph, 0).unwrap(), vec![0, 1, 2, 3, 4]);
    assert_eq!(bfs_order(&graph, 5).unwrap(), vec![5]);
    assert!(matches!(bfs_order(&graph, 6), Err(GraphError::KeyNotFound(6))));
}

// ==================== Shortest paths ====================

#[test]
fn test_sample_graph_shortest_path() {
    init_logger();
    let graph = sample_graph().unwrap();
    let engine = PathEngine::new(&graph);

    let distance = engine.shortest_path_distance(0, 9).unwrap();
    assert!((distance - 10.4).abs() < 1e-6, "distance was {}", distance);
    assert_eq!(
        engine.shortest_path(0, 9).unwrap(),
        Some(vec![0, 6, 5, 4, 7, 10, 9])
    );

    // And back the other way.
    assert_eq!(
        engine.shortest_path(9, 0).unwrap(),
        Some(vec![9, 10, 7, 4, 5, 6, 0])
    );
}

#[test]
fn test_dijkstra_reports_both_results() {
    let graph = sample_graph().unwrap();
    let result = PathEngine::new(&graph).dijkstra(0, 8).unwrap().unwrap();
    assert_eq!(result.path.first(), Some(&0));
    assert_eq!(result.path.last(), Some(&8));
    assert!((result.distance - path_weight(&graph, &result.path)).abs() < 1e-9);
    assert!((result.distance - 8.5).abs() < 1e-9);
}

#[test]
fn test_same_source_and_destination() {
    let graph = sample_graph().unwrap();
    let engine = PathEngine::new(&graph);
    for key in graph.keys() {
        assert_eq!(engine.shortest_path_distance(key, key).unwrap(), 0.0);
        assert_eq!(engine.shortest_path(key, key).unwrap(), Some(vec![key]));
    }

    let mut lonely = WeightedGraph::new();
    lonely.add_node(3);
    assert_eq!(
        PathEngine::new(&lonely).shortest_path(3, 3).unwrap(),
        Some(vec![3])
    );
}

#[test]
fn test_unreachable_destination() {
    let graph = GraphBuilder::new()
        .nodes(0..4)
        .edge(0, 1, 1.0)
        .edge(2, 3, 1.0)
        .build()
        .unwrap();
    let engine = PathEngine::new(&graph);
    assert_eq!(engine.shortest_path_distance(0, 3).unwrap(), NO_PATH);
    assert_eq!(engine.distance(0, 3).unwrap(), None);
    assert_eq!(engine.shortest_path(0, 3).unwrap(), None);
}

#[test]
fn test_missing_keys() {
    let graph = sample_graph().unwrap();
    let engine = PathEngine::new(&graph);
    assert!(matches!(
        engine.shortest_path_distance(0, 99),
        Err(GraphError::KeyNotFound(99))
    ));
    assert!(matches!(
        engine.shortest_path(-1, 0),
        Err(GraphError::KeyNotFound(-1))
    ));
    assert!(matches!(
        engine.shortest_path(42, 42),
        Err(GraphError::KeyNotFound(42))
    ));
}

#[test]
fn test_zero_weight_edges() {
    let graph = GraphBuilder::new()
        .nodes(0..3)
        .edge(0, 1, 0.0)
        .edge(1, 2, 0.0)
        .edge(0, 2, 0.5)
        .build()
        .unwrap();
    let engine = PathEngine::new(&graph);
    assert_eq!(engine.shortest_path_distance(0, 2).unwrap(), 0.0);
    assert_eq!(engine.shortest_path(0, 2).unwrap(), Some(vec![0, 1, 2]));
}

#[test]
fn test_overflowing_path_length_is_still_a_path() {
    // Each weight is finite, the sum is not.
    let graph = GraphBuilder::new()
        .nodes(0..3)
        .edge(0, 1, f64::MAX)
        .edge(1, 2, f64::MAX)
        .build()
        .unwrap();
    let engine = PathEngine::new(&graph);
    assert!(engine.is_connected());

    let distance = engine.shortest_path_distance(0, 2).unwrap();
    assert_ne!(distance, NO_PATH);
    assert!(distance.is_infinite() && distance > 0.0);
    assert_eq!(engine.shortest_path(0, 2).unwrap(), Some(vec![0, 1, 2]));
    assert_eq!(engine.shortest_path(2, 0).unwrap(), Some(vec![2, 1, 0]));
}

#[test]
fn test_shortest_path_serializes_to_json() {
    let graph = sample_graph().unwrap();
    let result = PathEngine::new(&graph).dijkstra(0, 8).unwrap().unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["path"], serde_json::json!([0, 2, 8]));
    assert!((value["distance"].as_f64().unwrap() - 8.5).abs() < 1e-9);
}

#[test]
fn test_equal_length_paths_prefer_lower_keys() {
    // 0 -> 1 -> 3 and 0 -> 2 -> 3 both cost 2.
    let graph = GraphBuilder::new()
        .nodes(0..4)
        .edge(0, 2, 1.0)
        .edge(2, 3, 1.0)
        .edge(0, 1, 1.0)
        .edge(1, 3, 1.0)
        .build()
        .unwrap();
    let engine = PathEngine::new(&graph);
    for _ in 0..5 {
        assert_eq!(engine.shortest_path(0, 3).unwrap(), Some(vec![0, 1, 3]));
    }
}

#[test]
fn test_queries_leave_graph_untouched() {
    let graph = sample_graph().unwrap();
    let before = graph.clone();
    let mc = graph.modification_count();
    let engine = PathEngine::new(&graph);

    let first = (
        engine.is_connected(),
        engine.shortest_path_distance(0, 9).unwrap(),
        engine.shortest_path(0, 9).unwrap(),
        engine.shortest_path(1, 8).unwrap(),
    );
    let second = (
        engine.is_connected(),
        engine.shortest_path_distance(0, 9).unwrap(),
        engine.shortest_path(0, 9).unwrap(),
        engine.shortest_path(1, 8).unwrap(),
    );
    assert_eq!(first, second);
    assert_eq!(graph.modification_count(), mc);
    assert_eq!(graph, before);
}

#[test]
fn test_random_graphs_match_floyd_warshall() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..25 {
        let n: i32 = rng.gen_range(2..24);
        let mut graph = WeightedGraph::new();
        for key in 0..n {
            graph.add_node(key);
        }
        for a in 0..n {
            for b in (a + 1)..n {
                if rng.gen_bool(0.2) {
                    let w = f64::from(rng.gen_range(0..100u32)) / 4.0;
                    graph.connect(a, b, w).unwrap();
                }
            }
        }

        let size = n as usize;
        let mut dist = vec![vec![f64::INFINITY; size]; size];
        for i in 0..size {
            dist[i][i] = 0.0;
        }
        for (a, b, w) in graph.edges() {
            dist[a as usize][b as usize] = w;
            dist[b as usize][a as usize] = w;
        }
        for k in 0..size {
            for i in 0..size {
                for j in 0..size {
                    if dist[i][k] + dist[k][j] < dist[i][j] {
                        dist[i][j] = dist[i][k] + dist[k][j];
                    }
                }
            }
        }

        let engine = PathEngine::new(&graph);
        for src in 0..n {
            for dest in 0..n {
                let expected = dist[src as usize][dest as usize];
                match engine.dijkstra(src, dest).unwrap() {
                    Some(result) => {
                        assert!((result.distance - expected).abs() < 1e-9);
                        assert!((path_weight(&graph, &result.path) - expected).abs() < 1e-9);
                        assert_eq!(result.path.first(), Some(&src));
                        assert_eq!(result.path.last(), Some(&dest));
                    }
                    None => assert!(expected.is_infinite()),
                }
            }
        }

        let all_reachable = dist[0].iter().all(|d| d.is_finite());
        assert_eq!(engine.is_connected(), all_reachable);
    }
}

// ==================== Algorithm set ====================

#[test]
fn test_graph_algo_init_and_copy() {
    let mut algo = GraphAlgo::new();
    assert!(algo.is_connected());
    assert_eq!(algo.graph().node_count(), 0);

    algo.init(sample_graph().unwrap());
    assert_eq!(algo.graph().node_count(), 11);
    assert!(algo.is_connected());
    assert!((algo.shortest_path_distance(0, 9).unwrap() - 10.4).abs() < 1e-6);

    let mut copy = algo.copy();
    assert_eq!(&copy, algo.graph());
    copy.remove_node(7);
    assert_eq!(algo.graph().node_count(), 11);
    assert_eq!(
        algo.shortest_path(0, 9).unwrap(),
        Some(vec![0, 6, 5, 4, 7, 10, 9])
    );

    algo.graph_mut().remove_edge(1, 9);
    algo.graph_mut().remove_edge(4, 9);
    algo.graph_mut().remove_edge(7, 9);
    algo.graph_mut().remove_edge(9, 10);
    assert!(!algo.is_connected());
    assert_eq!(algo.shortest_path_distance(0, 9).unwrap(), NO_PATH);

    let graph = algo.into_graph();
    assert_eq!(graph.node_count(), 11);
    assert_eq!(graph.edge_count(), 12);
    assert!(!graph.has_edge(7, 9));
}
