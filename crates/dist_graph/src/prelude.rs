pub use crate::builder::GraphBuilder;

pub use crate::graph::edge_centric::EdgeCentricGraph;
pub use crate::graph::vertex_centric::VertexCentricGraph;

pub use crate::index::Idx;

pub use crate::input;

pub use crate::Error;
pub use crate::Graph;
