//! The seven-stage construction pipeline: symmetrize, sort, remove
//! self-loops, dedupe, renumber, build `seg`, record per-locale edge ranges.
//!
//! There is a single input shape (a raw `(src, dst)` arc list, whatever
//! format it was read from) and a single output shape (`EdgeCentricGraph`),
//! so the builder is one struct holding a locale count plus a handful of
//! `build_from_*` entry points, one per supported input format.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use rayon::prelude::*;

use crate::darray::DistributedArray;
use crate::graph::edge_centric::EdgeCentricGraph;
use crate::input::{edgelist, graph500, matrix_market};
use crate::Error;

const DIGIT_BITS: u32 = 16;
const NUM_BUCKETS: usize = 1 << DIGIT_BITS;

/// Builds an [`EdgeCentricGraph`] from a raw arc list.
///
/// ```
/// use dist_graph::builder::GraphBuilder;
///
/// let graph = GraphBuilder::new()
///     .locales(2)
///     .build(vec![0, 1, 2, 3], vec![1, 2, 3, 4])
///     .expect("construction failed");
///
/// assert_eq!(graph.node_count(), 5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GraphBuilder {
    locales: usize,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a builder with a default locale count of `num_cpus::get()`,
    /// the same default a `rayon` thread pool would pick on its own.
    pub fn new() -> Self {
        Self {
            locales: num_cpus::get().max(1),
        }
    }

    /// Sets the number of simulated locales the resulting graph's views are
    /// partitioned across.
    pub fn locales(mut self, locales: usize) -> Self {
        self.locales = locales;
        self
    }

    /// Runs the full pipeline over a raw `(src, dst)` arc list.
    pub fn build(self, src: Vec<i64>, dst: Vec<i64>) -> Result<EdgeCentricGraph, Error> {
        if self.locales == 0 {
            return Err(Error::ArgumentError("locale count must be non-zero".into()));
        }
        if src.len() != dst.len() {
            return Err(Error::ConstructionError(format!(
                "src and dst length mismatch: {} vs {}",
                src.len(),
                dst.len()
            )));
        }

        debug!("symmetrizing {} input arcs", src.len());
        let (src, dst) = symmetrize(src, dst);

        debug!("sorting {} arcs", src.len());
        let order = sort_order(&src, &dst);

        debug!("removing self-loops");
        let order = remove_self_loops(&order, &src, &dst);

        debug!("deduplicating {} candidate arcs", order.len());
        let order = dedupe(&order, &src, &dst);

        debug!("renumbering {} arcs to dense internal ids", order.len());
        let (vertex_mapper, internal_src, internal_dst) = renumber(&order, &src, &dst);

        debug!("building seg for {} vertices", vertex_mapper.len());
        let seg = build_seg(&internal_src, vertex_mapper.len(), self.locales);

        EdgeCentricGraph::from_parts(vertex_mapper, internal_src, internal_dst, seg, self.locales)
    }

    /// Reads an edge-list text file (`source target` per line, `\n` or
    /// `\r\n` separated) and builds the graph from it.
    pub fn build_from_edgelist(self, path: impl AsRef<Path>) -> Result<EdgeCentricGraph, Error> {
        let (src, dst) = edgelist::read(path)?;
        self.build(src, dst)
    }

    /// Reads a packed Graph500 binary edge file and builds the graph from
    /// it.
    pub fn build_from_graph500(self, path: impl AsRef<Path>) -> Result<EdgeCentricGraph, Error> {
        let (src, dst) = graph500::read(path)?;
        self.build(src, dst)
    }

    /// Reads a Matrix Market coordinate file and builds the graph from it.
    pub fn build_from_matrix_market(
        self,
        path: impl AsRef<Path>,
    ) -> Result<EdgeCentricGraph, Error> {
        let (src, dst) = matrix_market::read(path)?;
        self.build(src, dst)
    }
}

/// Stage 1: `src' = src ++ dst`, `dst' = dst ++ src`.
fn symmetrize(src: Vec<i64>, dst: Vec<i64>) -> (Vec<i64>, Vec<i64>) {
    let mut src2 = src.clone();
    let mut dst2 = dst.clone();
    src2.extend(dst.iter().copied());
    dst2.extend(src.iter().copied());
    (src2, dst2)
}

/// Order-preserving transform: flips the sign bit so that unsigned
/// numeric order of the transformed key matches signed numeric order of
/// the original key.
fn to_sort_key(x: i64) -> u64 {
    (x as u64) ^ (1u64 << 63)
}

/// Stage 2: sort the parallel pair `(src, dst)` lexicographically (primary
/// `src`, secondary `dst`) with a distributed radix sort.
///
/// Implemented as a single LSD radix sort over a composite 128-bit key
/// (`src` in the high 64 bits, `dst` in the low 64 bits) built from
/// repeated 16-bit-digit counting-sort passes. The digit width is fixed at
/// 16 bits; the number of passes is derived from the combined bit-width
/// actually in use by `src`/`dst`, rather than always running the full 8
/// passes a 128-bit key could need.
fn sort_order(src: &[i64], dst: &[i64]) -> Vec<usize> {
    let n = src.len();
    let keys: Vec<u128> = (0..n)
        .into_par_iter()
        .map(|i| {
            let s = to_sort_key(src[i]) as u128;
            let d = to_sort_key(dst[i]) as u128;
            (s << 64) | d
        })
        .collect();

    let order: Vec<usize> = (0..n).collect();
    if n == 0 {
        return order;
    }

    let max_key = keys.par_iter().copied().max().unwrap_or(0);
    let bits = (128 - max_key.leading_zeros()).max(1);
    let passes = (bits + DIGIT_BITS - 1) / DIGIT_BITS;

    let mut order = order;
    for pass in 0..passes {
        let shift = pass * DIGIT_BITS;
        order = radix_pass(&order, &keys, shift);
    }
    order
}

/// One stable counting-sort pass over a 16-bit digit of `keys`, extracted
/// at bit offset `shift`. The histogram phase runs concurrently across
/// `order` (each bucket count is an independent atomic counter); the
/// scatter phase walks `order` sequentially so that ties within a bucket
/// keep the relative order established by earlier, less-significant
/// passes — required for LSD radix sort correctness.
fn radix_pass(order: &[usize], keys: &[u128], shift: u32) -> Vec<usize> {
    let mask = (NUM_BUCKETS - 1) as u128;
    let digit_of = |i: usize| ((keys[i] >> shift) & mask) as usize;

    let counts: Vec<AtomicUsize> = (0..NUM_BUCKETS).map(|_| AtomicUsize::new(0)).collect();
    order.par_iter().for_each(|&i| {
        counts[digit_of(i)].fetch_add(1, Ordering::Relaxed);
    });

    let mut offsets = vec![0usize; NUM_BUCKETS];
    let mut running = 0usize;
    for (bucket, offset) in offsets.iter_mut().enumerate() {
        *offset = running;
        running += counts[bucket].load(Ordering::Relaxed);
    }

    let mut out = vec![0usize; order.len()];
    for &i in order {
        let digit = digit_of(i);
        out[offsets[digit]] = i;
        offsets[digit] += 1;
    }
    out
}

/// Stage 3: drop arcs where `src[i] == dst[i]`.
fn remove_self_loops(order: &[usize], src: &[i64], dst: &[i64]) -> Vec<usize> {
    order
        .iter()
        .copied()
        .filter(|&i| src[i] != dst[i])
        .collect()
}

/// Stage 4: retain the first index of each run of equal `(src, dst)` tuples
/// in the sorted sequence.
fn dedupe(order: &[usize], src: &[i64], dst: &[i64]) -> Vec<usize> {
    let mut out = Vec::with_capacity(order.len());
    let mut prev: Option<(i64, i64)> = None;
    for &i in order {
        let cur = (src[i], dst[i]);
        if prev != Some(cur) {
            out.push(i);
            prev = Some(cur);
        }
    }
    out
}

/// Stage 5: build the sorted unique `vertex_mapper` and substitute every
/// `src`/`dst` entry with its index into it. `order` is already sorted by
/// `src` ascending, and `vertex_mapper` assigns ascending internal ids to
/// ascending external labels, so the substituted `src` array stays
/// non-decreasing without any extra bookkeeping.
fn renumber(order: &[usize], src: &[i64], dst: &[i64]) -> (Vec<i64>, Vec<usize>, Vec<usize>) {
    let mut vertex_mapper: Vec<i64> = order
        .iter()
        .flat_map(|&i| [src[i], dst[i]])
        .collect();
    vertex_mapper.sort_unstable();
    vertex_mapper.dedup();

    let internal_src = order
        .iter()
        .map(|&i| vertex_mapper.binary_search(&src[i]).expect("present by construction"))
        .collect();
    let internal_dst = order
        .iter()
        .map(|&i| vertex_mapper.binary_search(&dst[i]).expect("present by construction"))
        .collect();

    (vertex_mapper, internal_src, internal_dst)
}

/// Stage 6: `seg[0] = 0`; `seg[u+1] = seg[u] + (number of arcs with
/// source `u`)`. The degree histogram is built sequentially, then its
/// prefix sum is computed by [`DistributedArray::scan`] rather than a
/// hand-rolled loop, so the segment array is produced the same way any
/// other caller requesting a running total over a distributed array
/// would produce one.
fn build_seg(internal_src: &[usize], vertex_count: usize, locales: usize) -> Vec<usize> {
    let mut degrees = vec![0usize; vertex_count];
    for &u in internal_src {
        degrees[u] += 1;
    }

    let mut cumulative = DistributedArray::from_vec(degrees, locales);
    cumulative.scan();

    let mut seg = Vec::with_capacity(vertex_count + 1);
    seg.push(0);
    seg.extend_from_slice(cumulative.as_slice());
    seg
}
