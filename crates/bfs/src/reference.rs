//! Single-threaded, non-aggregated breadth-first search.
//!
//! These kernels never touch a locale boundary: the whole adjacency list
//! lives in one process, one thread walks the frontier with a plain
//! `VecDeque`, and a `Vec<bool>` stands in for the distributed `visited`
//! array. They exist to define ground truth that the multi-locale
//! aggregated kernels in `crate::level`/`crate::parent` are checked
//! against: a plain iterative breadth-first traversal, generalized here
//! to also record each vertex's discovering parent alongside its level.

use std::collections::VecDeque;

use dist_graph::{Graph, VertexCentricGraph};

const UNREACHED: i64 = -1;

/// Breadth-first search from `source`, returning the level (hop distance)
/// of every vertex, with unreached vertices set to `-1`.
pub fn bfs_level_reference(graph: &VertexCentricGraph, source: usize) -> Vec<i64> {
    let (level, _parent) = run(graph, source);
    level
}

/// Breadth-first search from `source`, returning the discovering parent of
/// every vertex; `source`'s own parent is itself, unreached vertices are `-1`.
pub fn bfs_parent_reference(graph: &VertexCentricGraph, source: usize) -> Vec<i64> {
    let (_level, parent) = run(graph, source);
    parent
}

fn run(graph: &VertexCentricGraph, source: usize) -> (Vec<i64>, Vec<i64>) {
    let n = graph.node_count();
    let mut level = vec![UNREACHED; n];
    let mut parent = vec![UNREACHED; n];
    if source >= n {
        return (level, parent);
    }

    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();

    visited[source] = true;
    level[source] = 0;
    parent[source] = source as i64;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for &v in graph.neighbors(u) {
            if !visited[v] {
                visited[v] = true;
                level[v] = level[u] + 1;
                parent[v] = u as i64;
                queue.push_back(v);
            }
        }
    }

    (level, parent)
}

/// Re-derives the level array implied by a parent array, by walking parent
/// pointers back to `source` for every reached vertex. Used to cross-check
/// a `bfs_parent`/`bfs_parent_aggregated` result against an independently
/// computed `bfs_level` result without re-running a second full traversal.
pub fn parent_to_level(parent: &[i64], source: usize) -> Vec<i64> {
    let n = parent.len();
    let mut level = vec![UNREACHED; n];
    if source >= n {
        return level;
    }
    level[source] = 0;
    for v in 0..n {
        if level[v] != UNREACHED {
            continue;
        }
        // Walk parent pointers up to the first vertex whose level is
        // already known (or to an unreached ancestor, which stops the
        // walk at -1), then assign levels back down the chain in one pass.
        let mut chain = Vec::new();
        let mut cur = v as i64;
        while cur != UNREACHED && level[cur as usize] == UNREACHED {
            chain.push(cur as usize);
            cur = parent[cur as usize];
        }
        let mut base = if cur == UNREACHED { UNREACHED } else { level[cur as usize] };
        if base == UNREACHED {
            continue;
        }
        for &w in chain.iter().rev() {
            base += 1;
            level[w] = base;
        }
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use dist_graph::GraphBuilder;

    fn path_graph() -> VertexCentricGraph {
        // 0 - 1 - 2 - 3, presented as one direction only; the builder
        // symmetrizes it.
        let src = vec![0, 1, 2];
        let dst = vec![1, 2, 3];
        let edge_centric = GraphBuilder::new().locales(2).build(src, dst).unwrap();
        VertexCentricGraph::new(&edge_centric, 2)
    }

    #[test]
    fn path_graph_levels_increase_by_one_per_hop() {
        let graph = path_graph();
        let source = graph.internal_id(0).unwrap();
        let level = bfs_level_reference(&graph, source);
        let mut by_external: Vec<(i64, i64)> = (0..graph.node_count())
            .map(|u| (graph.external_id(u), level[u]))
            .collect();
        by_external.sort_unstable();
        assert_eq!(by_external, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn parent_array_is_consistent_with_level_array() {
        let graph = path_graph();
        let source = graph.internal_id(0).unwrap();
        let level = bfs_level_reference(&graph, source);
        let parent = bfs_parent_reference(&graph, source);
        assert_eq!(parent_to_level(&parent, source), level);
    }

    #[test]
    fn source_is_its_own_parent() {
        let graph = path_graph();
        let source = graph.internal_id(0).unwrap();
        let parent = bfs_parent_reference(&graph, source);
        assert_eq!(parent[source], source as i64);
    }

    #[test]
    fn source_out_of_range_yields_all_unreached() {
        let graph = path_graph();
        let level = bfs_level_reference(&graph, graph.node_count() + 5);
        assert!(level.iter().all(|&l| l == -1));
    }

    #[test]
    fn disconnected_vertex_stays_unreached() {
        // star centered on 0 plus an isolated pair (4,5) unreachable from 0.
        let src = vec![0, 0, 0, 4];
        let dst = vec![1, 2, 3, 5];
        let edge_centric = GraphBuilder::new().locales(2).build(src, dst).unwrap();
        let graph = VertexCentricGraph::new(&edge_centric, 2);
        let source = graph.internal_id(0).unwrap();
        let level = bfs_level_reference(&graph, source);
        let four = graph.internal_id(4).unwrap();
        let five = graph.internal_id(5).unwrap();
        assert_eq!(level[four], -1);
        assert_eq!(level[five], -1);
    }
}
