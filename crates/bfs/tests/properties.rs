//! End-to-end tests for the four BFS kernels.
//!
//! Builds graphs with `dist_graph::GraphBuilder` and checks the aggregated
//! kernels against the single-locale reference kernels, which the
//! aggregated kernels are defined to agree with exactly.

use bfs::reference::{bfs_level_reference, bfs_parent_reference, parent_to_level};
use bfs::{bfs_level, bfs_parent, AggregatorConfig, EngineConfig};
use dist_graph::{Graph, GraphBuilder, VertexCentricGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_sparse_graph(seed: u64, vertex_count: i64, edge_count: usize, locales: usize) -> VertexCentricGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut src = Vec::with_capacity(edge_count);
    let mut dst = Vec::with_capacity(edge_count);
    for _ in 0..edge_count {
        src.push(rng.gen_range(0..vertex_count));
        dst.push(rng.gen_range(0..vertex_count));
    }
    let edge_centric = GraphBuilder::new()
        .locales(locales)
        .build(src, dst)
        .expect("construction failed");
    VertexCentricGraph::new(&edge_centric, locales)
}

/// Every reached non-source vertex has a parent that is an actual
/// neighbor one level closer to the source; `source` is its own parent;
/// every unreached vertex has no parent.
fn assert_parent_well_formed(graph: &VertexCentricGraph, source: usize, level: &[i64], parent: &[i64]) {
    assert_eq!(parent[source], source as i64);
    for v in 0..graph.node_count() {
        if v == source {
            continue;
        }
        if level[v] == -1 {
            assert_eq!(parent[v], -1, "unreached vertex {v} should have no parent");
            continue;
        }
        let p = parent[v];
        assert_ne!(p, -1, "reached vertex {v} should have a parent");
        let p = p as usize;
        assert!(
            graph.neighbors(v).contains(&p),
            "parent {p} of {v} is not adjacent to it"
        );
        assert_eq!(level[p], level[v] - 1, "parent of {v} is not one level closer");
    }
}

/// Across several random sparse graphs and several sources each, all four
/// kernels agree with one another: the aggregated level kernel matches
/// the reference level kernel, levels re-derived from either parent array
/// match the reference level array, and every parent array is
/// well-formed.
#[test]
fn random_graphs_agree_across_kernels() {
    let locales = 4;
    for (graph_seed, vertex_count, edge_count) in [(1u64, 40i64, 200usize), (2, 80, 800), (3, 16, 30)] {
        let graph = random_sparse_graph(graph_seed, vertex_count, edge_count, locales);
        if graph.node_count() == 0 {
            continue;
        }
        for source in 0..graph.node_count().min(5) {
            let reference_level = bfs_level_reference(&graph, source);
            let reference_parent = bfs_parent_reference(&graph, source);

            let aggregated_level = bfs_level(
                &graph,
                source,
                EngineConfig::new(locales),
                AggregatorConfig::new(4, 8),
            )
            .unwrap();
            assert_eq!(
                aggregated_level, reference_level,
                "aggregated and reference level kernels disagree for source {source}"
            );

            assert_eq!(
                parent_to_level(&reference_parent, source),
                reference_level,
                "level re-derived from the reference parent array disagrees with the reference level array, source {source}"
            );
            let aggregated_parent = bfs_parent(
                &graph,
                source,
                EngineConfig::new(locales),
                AggregatorConfig::new(4, 8),
            )
            .unwrap();
            assert_eq!(
                parent_to_level(&aggregated_parent, source),
                reference_level,
                "level re-derived from the aggregated parent array disagrees with the reference level array, source {source}"
            );

            assert_parent_well_formed(&graph, source, &reference_level, &reference_parent);
            assert_parent_well_formed(&graph, source, &reference_level, &aggregated_parent);
        }
    }
}

/// A 5-vertex path: levels and parents both walk straight back to the
/// source.
#[test]
fn path_graph_levels_and_parents() {
    let edge_centric = GraphBuilder::new()
        .locales(2)
        .build(vec![0, 1, 2, 3], vec![1, 2, 3, 4])
        .unwrap();
    let graph = VertexCentricGraph::new(&edge_centric, 2);
    let source = graph.internal_id(0).unwrap();

    let level = bfs_level(&graph, source, EngineConfig::new(2), AggregatorConfig::default()).unwrap();
    let mut by_external: Vec<(i64, i64)> = (0..graph.node_count())
        .map(|u| (graph.external_id(u), level[u]))
        .collect();
    by_external.sort_unstable();
    assert_eq!(by_external, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);

    let parent = bfs_parent(&graph, source, EngineConfig::new(2), AggregatorConfig::default()).unwrap();
    let mut by_external: Vec<(i64, i64)> = (0..graph.node_count())
        .map(|u| (graph.external_id(u), graph.external_id(parent[u] as usize)))
        .collect();
    by_external.sort_unstable();
    assert_eq!(by_external, vec![(0, 0), (1, 0), (2, 1), (3, 2), (4, 3)]);
}

/// A 6-vertex star: every leaf is one hop from the center and has the
/// center as its parent.
#[test]
fn star_graph_levels_and_parents() {
    let edge_centric = GraphBuilder::new()
        .locales(4)
        .build(vec![0, 0, 0, 0, 0], vec![1, 2, 3, 4, 5])
        .unwrap();
    let graph = VertexCentricGraph::new(&edge_centric, 4);
    let source = graph.internal_id(0).unwrap();

    let level = bfs_level(&graph, source, EngineConfig::new(4), AggregatorConfig::default()).unwrap();
    assert_eq!(level[source], 0);
    for v in 0..graph.node_count() {
        if v != source {
            assert_eq!(level[v], 1);
        }
    }

    let parent = bfs_parent(&graph, source, EngineConfig::new(4), AggregatorConfig::default()).unwrap();
    for v in 0..graph.node_count() {
        if v != source {
            assert_eq!(parent[v], source as i64);
        }
    }
}

/// Two disjoint edges: half the vertices stay unreached from either side.
#[test]
fn disconnected_graph_leaves_unreached_vertices_at_sentinel() {
    let edge_centric = GraphBuilder::new()
        .locales(2)
        .build(vec![0, 2], vec![1, 3])
        .unwrap();
    let graph = VertexCentricGraph::new(&edge_centric, 2);
    let source = graph.internal_id(0).unwrap();

    let level = bfs_level(&graph, source, EngineConfig::new(2), AggregatorConfig::default()).unwrap();
    let mut by_external: Vec<(i64, i64)> = (0..graph.node_count())
        .map(|u| (graph.external_id(u), level[u]))
        .collect();
    by_external.sort_unstable();
    assert_eq!(by_external, vec![(0, 0), (1, 1), (2, -1), (3, -1)]);
}

/// An empty graph (`V = 0`) is not an error per spec.md §7: every kernel,
/// aggregated or reference, returns an empty array for it.
#[test]
fn empty_graph_yields_an_empty_array_not_an_error() {
    let edge_centric = GraphBuilder::new().locales(2).build(vec![], vec![]).unwrap();
    let graph = VertexCentricGraph::new(&edge_centric, 2);
    assert_eq!(graph.node_count(), 0);

    let level = bfs_level(&graph, 0, EngineConfig::new(2), AggregatorConfig::default()).unwrap();
    let parent = bfs_parent(&graph, 0, EngineConfig::new(2), AggregatorConfig::default()).unwrap();
    assert_eq!(level, bfs_level_reference(&graph, 0));
    assert_eq!(parent, bfs_parent_reference(&graph, 0));
    assert!(level.is_empty());
    assert!(parent.is_empty());
}
