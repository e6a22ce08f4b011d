//! CSR ("edge-centric") view over a symmetrized, deduplicated arc set.
//!
//! Three parallel arrays `src`/`dst`/`seg`, block-distributed by edge
//! index, plus a vertex mapper translating between external and internal
//! vertex ids. There is no edge-value generality here: the BFS kernels
//! never consult an edge weight, so the view only ever stores bare
//! neighbor ids (see `DESIGN.md`).

use crate::darray::DistributedArray;
use crate::{Error, Graph};
use std::ops::Range;

/// CSR view of a graph: neighbors grouped by source, block-distributed by
/// edge index across a fixed number of locales.
///
/// `src`/`dst` are [`DistributedArray`]s partitioned by edge index (the
/// component spec.md §4.1 describes); `seg` is a separate
/// [`DistributedArray`] partitioned by vertex index, since it is naturally
/// indexed by internal vertex id rather than edge position.
#[derive(Clone, Debug)]
pub struct EdgeCentricGraph {
    vertex_mapper: Vec<i64>,
    src: DistributedArray<usize>,
    dst: DistributedArray<usize>,
    seg: DistributedArray<usize>,
    edge_ranges_per_locale: Vec<(Option<usize>, usize, Option<usize>)>,
    locales: usize,
}

impl EdgeCentricGraph {
    /// Assembles a view from already symmetrized, sorted, deduplicated,
    /// renumbered arrays. Only [`crate::builder::GraphBuilder`] is expected
    /// to call this; it is the sole producer of arrays satisfying the CSR
    /// invariants that every arc has a reverse arc and the segment array is
    /// non-decreasing.
    pub(crate) fn from_parts(
        vertex_mapper: Vec<i64>,
        src: Vec<usize>,
        dst: Vec<usize>,
        seg: Vec<usize>,
        locales: usize,
    ) -> Result<Self, Error> {
        let v = vertex_mapper.len();
        if seg.len() != v + 1 {
            return Err(Error::InvariantViolation(format!(
                "seg length {} does not match vertex count {} + 1",
                seg.len(),
                v
            )));
        }
        if *seg.last().unwrap_or(&0) != dst.len() {
            return Err(Error::InvariantViolation(
                "seg[V] does not equal the number of arcs".into(),
            ));
        }
        let src = DistributedArray::from_vec(src, locales);
        let dst = DistributedArray::from_vec(dst, locales);
        let seg = DistributedArray::from_vec(seg, locales);

        let edge_ranges_per_locale = (0..locales)
            .map(|n| {
                let range = src.local_range(n);
                if range.is_empty() {
                    (None, n, None)
                } else {
                    (Some(src.at(range.start)), n, Some(src.at(range.end - 1)))
                }
            })
            .collect();

        Ok(Self {
            vertex_mapper,
            src,
            dst,
            seg,
            edge_ranges_per_locale,
            locales,
        })
    }

    pub fn locales(&self) -> usize {
        self.locales
    }

    /// The external label of internal vertex `u`.
    pub fn external_id(&self, u: usize) -> i64 {
        self.vertex_mapper[u]
    }

    /// The internal id of external label `label`, if it was present in the
    /// input arc set.
    pub fn internal_id(&self, label: i64) -> Option<usize> {
        self.vertex_mapper.binary_search(&label).ok()
    }

    pub fn vertex_mapper(&self) -> &[i64] {
        &self.vertex_mapper
    }

    /// Neighbors of internal vertex `u`, grouped by source.
    pub fn neighbors(&self, u: usize) -> &[usize] {
        &self.dst.as_slice()[self.seg.at(u)..self.seg.at(u + 1)]
    }

    /// Neighbors of `u`, clipped to the portion of `u`'s arc range resident
    /// on `locale`'s edge-index block. Used when a worker wants to process
    /// only the arcs it already holds locally without consulting
    /// [`EdgeCentricGraph::find_locs`] first.
    pub fn neighbors_ensure_local(&self, u: usize, locale: usize) -> &[usize] {
        let local = self.dst.local_range(locale);
        let full = self.seg.at(u)..self.seg.at(u + 1);
        let lo = full.start.max(local.start);
        let hi = full.end.min(local.end);
        if lo >= hi {
            &[]
        } else {
            &self.dst.as_slice()[lo..hi]
        }
    }

    /// The locales whose edge block holds any portion of `u`'s neighbor
    /// range, by scanning `edge_ranges_per_locale`. A vertex's arcs can span
    /// more than one locale when they straddle a block boundary.
    pub fn find_locs(&self, u: usize) -> Vec<usize> {
        self.edge_ranges_per_locale
            .iter()
            .filter_map(|&(lo, n, hi)| match (lo, hi) {
                (Some(lo), Some(hi)) if lo <= u && u <= hi => Some(n),
                _ => None,
            })
            .collect()
    }

    /// The `[lo, hi)` range of global edge indices resident on `locale`.
    pub fn local_edge_range(&self, locale: usize) -> Range<usize> {
        self.dst.local_range(locale)
    }

    pub fn seg(&self) -> &[usize] {
        self.seg.as_slice()
    }

    pub fn src(&self) -> &[usize] {
        self.src.as_slice()
    }

    pub fn dst(&self) -> &[usize] {
        self.dst.as_slice()
    }
}

impl Graph<usize> for EdgeCentricGraph {
    fn node_count(&self) -> usize {
        self.vertex_mapper.len()
    }

    fn edge_count(&self) -> usize {
        self.dst.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> EdgeCentricGraph {
        // external 0-1-2-3-4, symmetrized by hand: 0<->1, 1<->2, 2<->3, 3<->4
        let vertex_mapper = vec![0, 1, 2, 3, 4];
        let src = vec![0, 1, 1, 2, 2, 3, 3, 4];
        let dst = vec![1, 0, 2, 1, 3, 2, 4, 3];
        let seg = vec![0, 1, 3, 5, 7, 8];
        EdgeCentricGraph::from_parts(vertex_mapper, src, dst, seg, 2).unwrap()
    }

    #[test]
    fn neighbors_reads_the_seg_slice() {
        let g = path_graph();
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(2), &[1, 3]);
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 8);
    }

    #[test]
    fn external_and_internal_ids_round_trip() {
        let g = path_graph();
        for u in 0..5 {
            let ext = g.external_id(u);
            assert_eq!(g.internal_id(ext), Some(u));
        }
        assert_eq!(g.internal_id(99), None);
    }

    #[test]
    fn find_locs_covers_the_whole_neighbor_range() {
        let g = path_graph();
        for u in 0..5 {
            let locs = g.find_locs(u);
            assert!(!locs.is_empty());
            for &n in &locs {
                assert!(n < g.locales());
            }
        }
    }

    #[test]
    fn ensure_local_is_a_subset_of_neighbors() {
        let g = path_graph();
        for u in 0..5 {
            for n in 0..g.locales() {
                let clipped = g.neighbors_ensure_local(u, n);
                let full = g.neighbors(u);
                assert!(clipped.iter().all(|x| full.contains(x)));
            }
        }
    }

    #[test]
    fn rejects_malformed_seg() {
        let err =
            EdgeCentricGraph::from_parts(vec![0, 1], vec![0], vec![1], vec![0, 1], 1).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }
}
