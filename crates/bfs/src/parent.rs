//! Level-synchronous, multi-locale parent-array breadth-first search.
//!
//! Structurally identical to [`crate::level::bfs_level_aggregated`] — same
//! worker-per-locale, barrier-synchronized send/drain loop — but each
//! aggregated message carries a `(child, discovering_parent)` pair instead
//! of a bare vertex id, and a successful claim stamps `parent` rather than
//! `level`. Call [`crate::reference::parent_to_level`] afterwards if hop
//! distances are also needed; re-deriving them from the parent array is
//! cheaper than threading a second payload field through every message.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Barrier;

use dist_graph::{Graph, VertexCentricGraph};
use rayon::prelude::*;

use crate::aggregator::Aggregator;
use crate::channels::{drain_available, make_locale_channels};
use crate::config::{AggregatorConfig, EngineConfig};
use crate::context::BfsContext;
use crate::error::BfsError;

const CHUNK_SIZE: usize = 256;

/// Computes the discovering parent of every vertex reachable from
/// `source`; `source` itself and any unreached vertex are `-1`. A graph
/// with no vertices yields an empty array rather than an error.
pub fn bfs_parent_aggregated(
    graph: &VertexCentricGraph,
    source: usize,
    engine: EngineConfig,
    aggregator: AggregatorConfig,
) -> Result<Vec<i64>, BfsError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }
    if source >= n {
        return Err(BfsError::ArgumentError(format!(
            "source {source} out of range for a graph with {n} vertices"
        )));
    }
    if engine.locales == 0 {
        return Err(BfsError::ArgumentError("locale count must be non-zero".into()));
    }

    let ctx = BfsContext::new(n);
    ctx.claim(source);
    ctx.set_parent(source, source);

    let locales = engine.locales;
    let (senders, receivers) = make_locale_channels::<(usize, usize)>(locales);

    let mut initial_frontier = vec![Vec::new(); locales];
    initial_frontier[graph.owner_of(source)].push(source);

    let barrier = Barrier::new(locales);
    let more_work = AtomicUsize::new(0);
    let continue_running = AtomicBool::new(true);

    std::thread::scope(|scope| {
        let handles: Vec<_> = receivers
            .into_iter()
            .enumerate()
            .map(|(n_locale, receiver)| {
                let ctx = &ctx;
                let barrier = &barrier;
                let more_work = &more_work;
                let continue_running = &continue_running;
                let senders = senders.clone();
                let mut local_frontier = std::mem::take(&mut initial_frontier[n_locale]);
                scope.spawn(move || {
                    let mut level_num: i64 = 1;
                    loop {
                        send_frontier(graph, &senders, &local_frontier, aggregator);

                        barrier.wait();

                        let mut next_frontier = Vec::new();
                        drain_available(&receiver, |(child, parent)| {
                            if ctx.claim(child) {
                                ctx.set_parent(child, parent);
                                next_frontier.push(child);
                            }
                        });
                        more_work.fetch_add(next_frontier.len(), Ordering::SeqCst);

                        let result = barrier.wait();
                        if result.is_leader() {
                            let total = more_work.swap(0, Ordering::SeqCst);
                            log::debug!("level {level_num} discovered {total} vertices");
                            continue_running.store(total > 0, Ordering::SeqCst);
                        }
                        barrier.wait();

                        if !continue_running.load(Ordering::SeqCst) {
                            log::info!("bfs_parent converged after {level_num} levels");
                            break;
                        }
                        local_frontier = next_frontier;
                        level_num += 1;
                    }
                })
            })
            .collect();
        drop(senders);
        for handle in handles {
            handle.join().expect("locale worker thread panicked");
        }
    });

    Ok(ctx.into_parent_vec())
}

fn send_frontier(
    graph: &VertexCentricGraph,
    senders: &[std::sync::mpsc::Sender<crate::aggregator::Batch<(usize, usize)>>],
    local_frontier: &[usize],
    config: AggregatorConfig,
) {
    let yield_every = config.yield_frequency.max(1);
    local_frontier.par_chunks(CHUNK_SIZE).for_each(|chunk| {
        let mut agg = Aggregator::new(senders.to_vec(), config);
        for (i, &u) in chunk.iter().enumerate() {
            if i % yield_every == 0 {
                std::thread::yield_now();
            }
            for &v in graph.neighbors(u) {
                agg.put(graph.owner_of(v), (v, u));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{bfs_parent_reference, parent_to_level};
    use dist_graph::GraphBuilder;

    fn path_graph() -> VertexCentricGraph {
        let src = vec![0, 1, 2, 3];
        let dst = vec![1, 2, 3, 4];
        let edge_centric = GraphBuilder::new().locales(2).build(src, dst).unwrap();
        VertexCentricGraph::new(&edge_centric, 2)
    }

    #[test]
    fn matches_reference_on_a_path_graph() {
        let graph = path_graph();
        let source = graph.internal_id(0).unwrap();
        let got = bfs_parent_aggregated(&graph, source, EngineConfig::new(2), AggregatorConfig::new(2, 4)).unwrap();
        let want = bfs_parent_reference(&graph, source);
        assert_eq!(parent_to_level(&got, source), parent_to_level(&want, source));
    }

    #[test]
    fn source_is_its_own_parent() {
        let graph = path_graph();
        let source = graph.internal_id(0).unwrap();
        let parent = bfs_parent_aggregated(&graph, source, EngineConfig::new(2), AggregatorConfig::default()).unwrap();
        assert_eq!(parent[source], source as i64);
    }

    #[test]
    fn every_non_source_reached_vertex_has_a_valid_parent_edge() {
        let graph = path_graph();
        let source = graph.internal_id(0).unwrap();
        let parent = bfs_parent_aggregated(&graph, source, EngineConfig::new(2), AggregatorConfig::default()).unwrap();
        for v in 0..graph.node_count() {
            if v == source || parent[v] == -1 {
                continue;
            }
            let p = parent[v] as usize;
            assert!(graph.neighbors(p).contains(&v), "parent {p} of {v} is not actually adjacent");
        }
    }

    #[test]
    fn empty_graph_yields_an_empty_array() {
        let edge_centric = GraphBuilder::new().locales(2).build(vec![], vec![]).unwrap();
        let graph = VertexCentricGraph::new(&edge_centric, 2);
        let got = bfs_parent_aggregated(&graph, 0, EngineConfig::new(2), AggregatorConfig::default()).unwrap();
        assert!(got.is_empty());
    }
}
