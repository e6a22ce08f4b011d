//! Adjacency-list ("vertex-centric") view, block-distributed by vertex.
//!
//! A `Vec<Vec<usize>>` of per-vertex sorted, deduplicated, self-loop-free
//! neighbor lists. Unlike the edge-centric view, a vertex's full neighbor
//! list lives on exactly one locale — its owner — which is what lets the
//! aggregated BFS kernels push one `(child, parent)` pair to a single
//! destination per arc.

use crate::graph::edge_centric::EdgeCentricGraph;
use crate::partition::Partition;
use crate::Graph;

/// Adjacency-list view: each vertex's neighbor list is resident entirely on
/// its owner locale.
#[derive(Clone, Debug)]
pub struct VertexCentricGraph {
    vertex_mapper: Vec<i64>,
    adjacencies: Vec<Vec<usize>>,
    vertex_partition: Partition,
    locales: usize,
}

impl VertexCentricGraph {
    /// Derives a vertex-centric view from an edge-centric one. The adjacency
    /// view holds an independent copy of the vertex mapper and does not
    /// reference the edge-centric graph afterwards — the edge-centric view
    /// used during construction can be dropped once adjacencies are built.
    pub fn new(graph: &EdgeCentricGraph, locales: usize) -> Self {
        let vertex_mapper = graph.vertex_mapper().to_vec();
        let v = vertex_mapper.len();
        let adjacencies = (0..v).map(|u| graph.neighbors(u).to_vec()).collect();
        Self {
            vertex_mapper,
            adjacencies,
            vertex_partition: Partition::new(v, locales),
            locales,
        }
    }

    pub fn locales(&self) -> usize {
        self.locales
    }

    pub fn vertex_mapper(&self) -> &[i64] {
        &self.vertex_mapper
    }

    pub fn external_id(&self, u: usize) -> i64 {
        self.vertex_mapper[u]
    }

    pub fn internal_id(&self, label: i64) -> Option<usize> {
        self.vertex_mapper.binary_search(&label).ok()
    }

    /// The locale owning `u`'s adjacency list; a pure arithmetic computation
    /// from the vertex-block distribution.
    pub fn owner_of(&self, u: usize) -> usize {
        self.vertex_partition.owner_of(u)
    }

    pub fn degree(&self, u: usize) -> usize {
        self.adjacencies[u].len()
    }

    pub fn neighbors(&self, u: usize) -> &[usize] {
        &self.adjacencies[u]
    }

    pub fn partition(&self) -> &Partition {
        &self.vertex_partition
    }
}

impl Graph<usize> for VertexCentricGraph {
    fn node_count(&self) -> usize {
        self.vertex_mapper.len()
    }

    fn edge_count(&self) -> usize {
        self.adjacencies.iter().map(Vec::len).sum()
    }
}
