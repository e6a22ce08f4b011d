//! Matrix Market coordinate format reader.
//!
//! ```text
//! %%MatrixMarket matrix coordinate pattern symmetric
//! % comment
//! 5 5 6
//! 2 1
//! 3 1
//! 3 2
//! 4 3
//! 5 3
//! 5 4
//! ```
//!
//! The header line is followed by any number of `%`-prefixed comment lines, a
//! single dimensions line `rows cols nnz`, and `nnz` coordinate lines `row
//! col` (1-indexed) or `row col weight` (weight parsed and discarded, since
//! the BFS kernels built on this input never consult edge values). Entries
//! are handed to [`crate::builder::GraphBuilder`] exactly as stored, one
//! arc per line, regardless of the `symmetric`/`general` keyword in the
//! header — [`crate::builder::GraphBuilder`]'s own symmetrize stage is the
//! single place this workspace adds the reverse arc, so a `symmetric` header
//! is read the same way as a `general` one. Parsing follows the same
//! text-parsing idiom as the plain edge list reader: `std::str::from_utf8`,
//! line-oriented `split_whitespace`, `thiserror`-backed parse errors.

use std::fs::File;
use std::path::Path;

use log::info;

use crate::Error;

/// Reads a Matrix Market coordinate file, returning parallel `(src, dst)`
/// arrays of external vertex labels (0-indexed).
pub fn read(path: impl AsRef<Path>) -> Result<(Vec<i64>, Vec<i64>), Error> {
    let file = File::open(path.as_ref())?;
    let mmap = unsafe { memmap2::MmapOptions::new().populate().map(&file)? };
    parse(mmap.as_ref())
}

fn parse(bytes: &[u8]) -> Result<(Vec<i64>, Vec<i64>), Error> {
    let start = std::time::Instant::now();
    let text = std::str::from_utf8(bytes)
        .map_err(|_| Error::ArgumentError("matrix market input is not valid utf-8".into()))?;

    let mut lines = text.lines();

    let header = lines
        .next()
        .ok_or_else(|| Error::ArgumentError("empty matrix market file".into()))?;
    if !header.starts_with("%%MatrixMarket") {
        return Err(Error::ArgumentError(
            "missing %%MatrixMarket header line".into(),
        ));
    }

    let mut lines = lines.filter(|line| !line.trim_start().starts_with('%'));

    let dims = lines
        .next()
        .ok_or_else(|| Error::ArgumentError("missing matrix market dimension line".into()))?;
    let mut dims = dims.split_whitespace();
    let _rows: i64 = parse_i64(dims.next())?;
    let _cols: i64 = parse_i64(dims.next())?;
    let nnz: usize = parse_i64(dims.next())?
        .try_into()
        .map_err(|_| Error::ArgumentError("negative matrix market entry count".into()))?;

    let mut src = Vec::with_capacity(nnz);
    let mut dst = Vec::with_capacity(nnz);

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let row = parse_i64(parts.next())?;
        let col = parse_i64(parts.next())?;
        if row == 0 || col == 0 {
            return Err(Error::ArgumentError(
                "matrix market indices are 1-based".into(),
            ));
        }
        // any trailing weight column is parsed but discarded; presence is
        // not validated beyond lexing, per the header's stated object type
        src.push(row - 1);
        dst.push(col - 1);
    }

    info!(
        "read {} matrix market entries in {:?}",
        src.len(),
        start.elapsed()
    );

    Ok((src, dst))
}

fn parse_i64(token: Option<&str>) -> Result<i64, Error> {
    token
        .ok_or_else(|| Error::ArgumentError("truncated matrix market line".into()))?
        .parse::<i64>()
        .map_err(|_| Error::ArgumentError("invalid integer in matrix market file".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symmetric_header_without_adding_reverse_arcs() {
        let text = b"%%MatrixMarket matrix coordinate pattern symmetric\n% a comment\n5 5 6\n2 1\n3 1\n3 2\n4 3\n5 3\n5 4\n";
        let (src, dst) = parse(text).unwrap();
        assert_eq!(src.len(), 6);
        assert_eq!(src, vec![1, 2, 2, 3, 4, 4]);
        assert_eq!(dst, vec![0, 0, 1, 2, 2, 3]);
    }

    #[test]
    fn parses_general_header() {
        let text = b"%%MatrixMarket matrix coordinate pattern general\n3 3 2\n1 2\n2 3\n";
        let (src, dst) = parse(text).unwrap();
        assert_eq!(src, vec![0, 1]);
        assert_eq!(dst, vec![1, 2]);
    }

    #[test]
    fn ignores_trailing_weight_column() {
        let text = b"%%MatrixMarket matrix coordinate real general\n2 2 1\n1 2 0.5\n";
        let (src, dst) = parse(text).unwrap();
        assert_eq!(src, vec![0]);
        assert_eq!(dst, vec![1]);
    }

    #[test]
    fn rejects_missing_header() {
        let text = b"5 5 6\n2 1\n";
        assert!(parse(text).is_err());
    }

    #[test]
    fn rejects_zero_based_indices() {
        let text = b"%%MatrixMarket matrix coordinate pattern general\n2 2 1\n0 1\n";
        assert!(parse(text).is_err());
    }
}
