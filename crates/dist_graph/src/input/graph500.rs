//! Graph500 packed binary edge format: a flat array of 12-byte records, each
//! packing a `(source, target)` pair of up to 48-bit vertex ids across three
//! `u32` words.
//!
//! The file is memory-mapped and split into `cpu_count` chunks realigned
//! to the fixed 12-byte record size, each parsed on its own `rayon` task.
//! Vertex ids are always decoded into plain `i64`.

use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::info;

use crate::Error;

/// Reads a packed Graph500 binary edge file, returning parallel `(src, dst)`
/// arrays of external vertex labels.
pub fn read(path: impl AsRef<Path>) -> Result<(Vec<i64>, Vec<i64>), Error> {
    let file = File::open(path.as_ref())?;
    let mmap = unsafe { memmap2::MmapOptions::new().populate().map(&file)? };
    parse(mmap.as_ref())
}

fn parse(map: &[u8]) -> Result<(Vec<i64>, Vec<i64>), Error> {
    let start = std::time::Instant::now();
    let file_size = map.len();
    let edge_size = std::mem::size_of::<PackedEdge>();

    if map.len() % edge_size != 0 {
        return Err(Error::ConstructionError(format!(
            "graph500 file size {} is not a multiple of the record size {}",
            map.len(),
            edge_size
        )));
    }

    let cpu_count = num_cpus::get_physical().max(1);
    let chunk_records = usize::max(1, (map.len() / edge_size) / cpu_count + 1);
    let chunk_size = chunk_records * edge_size;

    let edges: Arc<Mutex<Vec<(i64, i64)>>> = Arc::new(Mutex::new(Vec::new()));

    rayon::scope(|s| {
        for lo in (0..map.len()).step_by(chunk_size) {
            let edges = Arc::clone(&edges);
            s.spawn(move |_| {
                let hi = usize::min(lo + chunk_size, map.len());
                let slice = &map[lo..hi];
                let count = slice.len() / edge_size;
                let ptr = slice.as_ptr();
                assert_eq!(ptr as usize % std::mem::align_of::<PackedEdge>(), 0);
                let records =
                    unsafe { std::slice::from_raw_parts(ptr as *const PackedEdge, count) };
                let local: Vec<(i64, i64)> = records
                    .iter()
                    .map(|e| (e.source() as i64, e.target() as i64))
                    .collect();
                edges.lock().unwrap().extend(local);
            });
        }
    });

    let edges = Arc::try_unwrap(edges)
        .map_err(|_| Error::ConstructionError("graph500 parse threads did not join".into()))?
        .into_inner()
        .unwrap();
    let count = edges.len();
    let (src, dst): (Vec<i64>, Vec<i64>) = edges.into_iter().unzip();

    let elapsed = start.elapsed().as_millis() as f64 / 1000_f64;
    info!(
        "read {count} edges from graph500 file in {elapsed:.2}s ({:.2} MB/s)",
        ((file_size as f64) / elapsed.max(f64::EPSILON)) / (1024.0 * 1024.0)
    );

    Ok((src, dst))
}

// see https://github.com/graph500/graph500/blob/f89d643ce4aaae9a823d310c6ab2dd10e3d2982c/generator/graph_generator.h#L29-L33
#[derive(Default, Copy, Clone, Debug)]
#[repr(C)]
struct PackedEdge {
    v0_low: u32,
    v1_low: u32,
    high: u32,
}

impl PackedEdge {
    fn source(&self) -> u64 {
        self.v0_low as u64 | (self.high as u64 & 0xFFFF) << 32
    }

    fn target(&self) -> u64 {
        self.v1_low as u64 | (self.high as u64 >> 16) << 32
    }
}
