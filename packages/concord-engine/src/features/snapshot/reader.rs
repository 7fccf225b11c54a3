use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// True when the path carries a `.gz` extension.
///
/// Compression is decided by file name only; no magic-byte sniffing.
pub fn is_gzip(path: &Path) -> bool {
    path.extension().map(|ext| ext == "gz").unwrap_or(false)
}

/// Open a snapshot for buffered reading, decompressing `.gz` files
/// transparently. Callers never branch on compression themselves.
pub fn open_snapshot(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_gzip(path) {
        // MultiGzDecoder also accepts concatenated gzip members.
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Line iterator over a snapshot, plain or gzipped.
pub fn snapshot_lines(path: &Path) -> io::Result<io::Lines<Box<dyn BufRead>>> {
    Ok(open_snapshot(path)?.lines())
}
