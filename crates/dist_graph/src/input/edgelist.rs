//! Plain-text edge list: one `source target` (optionally `source target
//! weight`, weight ignored) pair per line, `\n` or `\r\n` terminated.
//!
//! The file is memory-mapped, split into `cpu_count` roughly equal chunks
//! realigned to line boundaries, and each chunk is parsed on its own
//! scoped thread, merging into one shared buffer. Vertex labels are
//! always read as plain `i64`; a trailing weight column, if present, is
//! parsed and discarded.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use log::info;
use parking_lot::Mutex;

use crate::Error;

/// Reads an edge-list file, returning parallel `(src, dst)` arrays of
/// external vertex labels.
pub fn read(path: impl AsRef<Path>) -> Result<(Vec<i64>, Vec<i64>), Error> {
    let file = File::open(path.as_ref())?;
    let mmap = unsafe { memmap2::MmapOptions::new().populate().map(&file)? };
    parse(mmap.as_ref())
}

fn parse(bytes: &[u8]) -> Result<(Vec<i64>, Vec<i64>), Error> {
    let start = std::time::Instant::now();
    let cpu_count = num_cpus::get_physical().max(1);
    let page_size = page_size::get();
    // Rounded up to a page boundary rather than a plain `len / cpu_count`:
    // small inputs (test fixtures, small graphs) then land entirely in one
    // chunk instead of being split across threads whose completion order,
    // and therefore merge order into `edges`, is otherwise unspecified.
    let chunk_size = (usize::max(1, bytes.len() / cpu_count) + (page_size - 1)) & !(page_size - 1);

    let edges: Arc<Mutex<Vec<(i64, i64)>>> = Arc::new(Mutex::new(Vec::new()));

    std::thread::scope(|scope| {
        let mut lo = 0usize;
        while lo < bytes.len() {
            let mut hi = usize::min(lo + chunk_size, bytes.len());
            while hi < bytes.len() && bytes[hi - 1] != b'\n' {
                hi += 1;
            }
            let slice = &bytes[lo..hi];
            let edges = Arc::clone(&edges);
            scope.spawn(move || {
                let mut local = Vec::new();
                for line in slice.split(|&b| b == b'\n') {
                    if let Some(edge) = parse_line(trim_cr(line)) {
                        local.push(edge);
                    }
                }
                edges.lock().extend(local);
            });
            lo = hi;
        }
    });

    let edges = Arc::try_unwrap(edges)
        .unwrap_or_else(|arc| Mutex::new(arc.lock().clone()))
        .into_inner();
    let count = edges.len();
    let (src, dst): (Vec<i64>, Vec<i64>) = edges.into_iter().unzip();

    info!(
        "parsed {} edges from edge list in {:?}",
        count,
        start.elapsed()
    );

    Ok((src, dst))
}

fn trim_cr(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => line,
    }
}

fn parse_line(line: &[u8]) -> Option<(i64, i64)> {
    if line.is_empty() {
        return None;
    }
    let mut fields = line
        .split(|&b| b == b' ' || b == b'\t')
        .filter(|f| !f.is_empty());
    let source = parse_i64(fields.next()?)?;
    let target = parse_i64(fields.next()?)?;
    Some((source, target))
}

fn parse_i64(bytes: &[u8]) -> Option<i64> {
    let (value, len): (i64, usize) = atoi::FromRadix10Signed::from_radix_10_signed(bytes);
    (len > 0).then_some(value)
}
