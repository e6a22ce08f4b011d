//! Level-synchronous, multi-locale breadth-first search.
//!
//! One worker thread per simulated locale, spawned once for the whole
//! call via `std::thread::scope`. Within a locale, the current level's
//! local frontier is split into chunks and expanded in parallel
//! `rayon::scope` tasks, each holding its own [`crate::aggregator::Aggregator`].
//! A `std::sync::Barrier` shared by all locale
//! workers marks the boundary between "everyone has finished sending this
//! level's discoveries" and "everyone may now drain what arrived", so a
//! receiver is only ever read once nothing more can be written to it for
//! that level — no message can arrive after a locale has moved on.
//!
//! A vertex's level is stamped the moment it is pulled off its owner's
//! inbox, which is also the single compare-and-swap that decides whether
//! this is the first locale to discover it (`BfsContext::claim`). A
//! vertex can arrive in the same level's inbox more than once (a graph
//! vertex can have several in-level neighbors); every arrival after the
//! first loses the CAS and is simply dropped.

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

/// Computes the hop distance from `source` to every vertex, `-1` for
/// vertices `source` cannot reach. A graph with no vertices yields an
/// empty array rather than an error.
pub fn bfs_level_aggregated(
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
    ctx.set_level(source, 0);

    let locales = engine.locales;
    let (senders, receivers) = make_locale_channels::<usize>(locales);

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
                        send_level(graph, &senders, &local_frontier, aggregator);

                        barrier.wait();

                        let mut next_frontier = Vec::new();
                        drain_available(&receiver, |v| {
                            if ctx.claim(v) {
                                ctx.set_level(v, level_num);
                                next_frontier.push(v);
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
                            log::info!("bfs_level converged after {level_num} levels");
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

    Ok(ctx.into_level_vec())
}

fn send_level(
    graph: &VertexCentricGraph,
    senders: &[std::sync::mpsc::Sender<crate::aggregator::Batch<usize>>],
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
                agg.put(graph.owner_of(v), v);
            }
        }
    });
}
