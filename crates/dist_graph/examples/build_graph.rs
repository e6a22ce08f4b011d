//! Builds a small graph from an in-memory arc list and inspects the two
//! resulting views. Run with `RUST_LOG=info cargo run -p dist_graph
//! --example build_graph` to see the construction pipeline's stage
//! logging.

use dist_graph::prelude::*;

fn main() {
    env_logger::init();

    // A 6-cycle, submitted as a single directed pass; GraphBuilder
    // symmetrizes it into an undirected ring.
    let src = vec![0, 1, 2, 3, 4, 5];
    let dst = vec![1, 2, 3, 4, 5, 0];

    let edge_centric = GraphBuilder::new()
        .locales(4)
        .build(src, dst)
        .expect("construction failed");

    log::info!(
        "built a graph with {} vertices and {} arcs across {} locales",
        edge_centric.node_count(),
        edge_centric.edge_count(),
        edge_centric.locales()
    );

    let vertex_centric = VertexCentricGraph::new(&edge_centric, 4);
    for u in 0..vertex_centric.node_count() {
        log::info!(
            "vertex {} (external {}) owned by locale {}, degree {}",
            u,
            vertex_centric.external_id(u),
            vertex_centric.owner_of(u),
            vertex_centric.degree(u)
        );
    }
}
