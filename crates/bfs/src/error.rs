//! Error taxonomy for the construction-adjacent parts of a BFS call.
//!
//! Mirrors `dist_graph::Error`'s shape (a `thiserror`-derived enum
//! distinguishing caller misuse from runtime faults), extended with the
//! one fault specific to running a traversal: a remote buffer allocation
//! failure is the one thing the aggregation layer can in principle hit
//! that a pure in-memory `Vec` push cannot. An empty graph (`V = 0`) is
//! not a member of this enum — per spec.md §7 it is not an error at all;
//! `bfs_level`/`bfs_parent` return `Ok(Vec::new())` for it instead (see
//! `crate::level`/`crate::parent`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BfsError {
    #[error("graph construction failed: {0}")]
    ConstructionError(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("failed to allocate a remote aggregation buffer: {0}")]
    RemoteBufferAllocFailure(String),

    #[error("invalid argument: {0}")]
    ArgumentError(String),

    #[error(transparent)]
    GraphError(#[from] dist_graph::Error),
}
