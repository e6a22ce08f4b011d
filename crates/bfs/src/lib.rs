//! Distributed-memory breadth-first search over a [`dist_graph::VertexCentricGraph`].
//!
//! Four kernels share one result shape (`Vec<i64>` indexed by internal
//! vertex id, `-1` for anything `source` cannot reach):
//!
//! - [`bfs_level`] / [`bfs_parent`]: multi-locale, aggregated, the
//!   kernels this crate exists to provide.
//! - [`reference::bfs_level_reference`] / [`reference::bfs_parent_reference`]:
//!   single-threaded ground truth the aggregated kernels are checked
//!   against in this crate's own tests.
//!
//! [`reference::parent_to_level`] converts between the two result shapes
//! without a second traversal.
//!
//! ```
//! use bfs::{bfs_level, AggregatorConfig, EngineConfig};
//! use dist_graph::{GraphBuilder, VertexCentricGraph};
//!
//! let edge_centric = GraphBuilder::new()
//!     .locales(2)
//!     .build(vec![0, 1, 2], vec![1, 2, 3])
//!     .unwrap();
//! let graph = VertexCentricGraph::new(&edge_centric, 2);
//! let source = graph.internal_id(0).unwrap();
//!
//! let level = bfs_level(&graph, source, EngineConfig::default(), AggregatorConfig::default()).unwrap();
//! assert_eq!(level[source], 0);
//! ```

pub mod aggregator;
mod channels;
pub mod config;
pub mod context;
pub mod error;
mod level;
mod parent;
pub mod reference;

pub use aggregator::Aggregator;
pub use config::{AggregatorConfig, EngineConfig};
pub use context::BfsContext;
pub use error::BfsError;
pub use level::bfs_level_aggregated as bfs_level;
pub use parent::bfs_parent_aggregated as bfs_parent;
pub use reference::parent_to_level;
