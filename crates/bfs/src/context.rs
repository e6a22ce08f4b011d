//! Per-run mutable state threaded through the aggregated BFS kernels.
//!
//! One value constructed fresh per `bfs_level`/`bfs_parent` call, rather
//! than per-node replicated module-scope globals — no `static` or
//! `thread_local` frontier/visited/parent state exists anywhere in this
//! crate. `visited` is the sole linearization point for "first discoverer
//! wins": both `bfs_level` and `bfs_parent` perform a single atomic
//! compare-and-set against it before ever writing `level`/`parent`, so
//! those two arrays never need their own synchronization beyond
//! `Atomic`'s own store visibility. The compare-and-set idiom mirrors a
//! union-find structure's `Box<[Atomic<NI>]>` backing store, adapted here
//! from union-by-CAS to visited-by-CAS.

use std::sync::atomic::Ordering;

use atomic::Atomic;

const LEVEL_UNREACHED: i64 = -1;
const PARENT_UNREACHED: i64 = -1;

/// Owns the `visited`/`level`/`parent` arrays shared by every locale
/// worker for the duration of one BFS call. Two BFS calls never share a
/// `BfsContext`.
pub struct BfsContext {
    visited: Box<[Atomic<bool>]>,
    level: Box<[Atomic<i64>]>,
    parent: Box<[Atomic<i64>]>,
}

impl BfsContext {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            visited: (0..vertex_count).map(|_| Atomic::new(false)).collect(),
            level: (0..vertex_count).map(|_| Atomic::new(LEVEL_UNREACHED)).collect(),
            parent: (0..vertex_count)
                .map(|_| Atomic::new(PARENT_UNREACHED))
                .collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.visited.len()
    }

    /// Atomically marks `v` visited, returning `true` iff this call is the
    /// one that transitioned it from unvisited to visited (the "first
    /// discoverer wins" linearization point).
    pub fn claim(&self, v: usize) -> bool {
        self.visited[v]
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn is_visited(&self, v: usize) -> bool {
        self.visited[v].load(Ordering::SeqCst)
    }

    pub fn set_level(&self, v: usize, level: i64) {
        self.level[v].store(level, Ordering::SeqCst);
    }

    pub fn set_parent(&self, v: usize, parent: usize) {
        self.parent[v].store(parent as i64, Ordering::SeqCst);
    }

    pub fn into_level_vec(self) -> Vec<i64> {
        self.level.iter().map(|a| a.load(Ordering::SeqCst)).collect()
    }

    pub fn into_parent_vec(self) -> Vec<i64> {
        self.parent.iter().map(|a| a.load(Ordering::SeqCst)).collect()
    }
}
