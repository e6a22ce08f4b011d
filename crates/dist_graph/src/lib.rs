//! Construction pipeline and partitioned graph views for a simulated
//! distributed-memory BFS engine.
//!
//! This crate ingests a raw, arbitrarily-labeled `(src, dst)` arc list and
//! produces a compact, vertex-renumbered, block-distributed representation
//! in two complementary shapes:
//!
//! * [`EdgeCentricGraph`] — a CSR view (`src`/`dst`/`seg` arrays,
//!   block-distributed by edge index) used when a worker needs to walk
//!   edges it already holds locally without knowing which vertex they
//!   belong to;
//! * [`VertexCentricGraph`] — an adjacency-list view, block-distributed by
//!   vertex, used when a worker needs a single vertex's complete neighbor
//!   list and a well-defined single owner to send updates to.
//!
//! Neither view is a general-purpose graph library type: both are built
//! once by [`GraphBuilder`] and read many times by the BFS kernels in the
//! sibling `bfs` crate (see that crate's `README`/module docs). Directed,
//! weighted and dynamically-updated graphs are out of scope; see
//! `DESIGN.md` for the full list of non-goals.
//!
//! ```
//! use dist_graph::prelude::*;
//!
//! let graph = GraphBuilder::new()
//!     .locales(2)
//!     .build(vec![0, 1, 2, 3], vec![1, 2, 3, 4])
//!     .expect("construction failed");
//!
//! assert_eq!(graph.node_count(), 5);
//! assert_eq!(graph.edge_count(), 8); // symmetrized: 4 undirected edges -> 8 arcs
//!
//! let vertex_centric = VertexCentricGraph::new(&graph, 2);
//! assert_eq!(vertex_centric.node_count(), graph.node_count());
//! ```

pub mod builder;
pub mod darray;
pub mod graph;
pub mod index;
pub mod input;
pub mod partition;
pub mod prelude;

pub use crate::builder::GraphBuilder;
pub use crate::graph::edge_centric::EdgeCentricGraph;
pub use crate::graph::vertex_centric::VertexCentricGraph;

use thiserror::Error;

/// Errors produced by graph construction and the partitioned graph views.
///
/// All variants are fatal: construction never retries or partially
/// recovers, it surfaces the error to the caller instead. `ConstructionError`/`IoError`
/// cover malformed input, `InvariantViolation` covers a builder bug caught
/// by an internal assertion, `ArgumentError` covers a bad caller-supplied
/// argument. An arc list with zero vertices (`V = 0`) is not an error
/// here: an empty source graph is only meaningful once a BFS call is
/// attempted on it (an empty graph yields an empty output array, handled
/// in the `bfs` crate), so construction of an empty [`EdgeCentricGraph`]
/// succeeds.
#[derive(Error, Debug)]
pub enum Error {
    #[error("error while loading graph")]
    IoError {
        #[from]
        source: std::io::Error,
    },
    /// A structural invariant of the construction pipeline was violated,
    /// e.g. the vertex mapper was not sorted, or `seg` was not monotonic.
    #[error("graph construction failed: {0}")]
    ConstructionError(String),
    /// A property the pipeline is supposed to guarantee did not hold at a
    /// runtime check, e.g. `seg[V] != E`.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// An argument passed to a constructor or input reader was invalid,
    /// e.g. zero locales, or a malformed input file.
    #[error("invalid argument: {0}")]
    ArgumentError(String),
}

/// A graph is a tuple `(N, E)`, where `N` is a set of nodes and `E` a set of
/// edges. Each edge connects exactly two nodes.
pub trait Graph<NI> {
    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> NI;

    /// Returns the number of edges in the graph.
    fn edge_count(&self) -> NI;
}
