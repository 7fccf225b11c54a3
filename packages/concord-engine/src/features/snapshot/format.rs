use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::errors::{EngineError, Result};

use super::reader::snapshot_lines;

lazy_static! {
    /// One mapping per line: variant OCN, single tab, canonical OCN.
    /// Anchored on both ends, so spaces, signs, extra tabs, and empty
    /// lines all fail.
    static ref LINE_RE: Regex = Regex::new(r"^[0-9]+\t[0-9]+$").unwrap();
}

/// Outcome of a full-file format scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    /// Total lines scanned.
    pub lines: usize,
    /// Lines rejected by the format check.
    pub malformed: usize,
}

impl FormatReport {
    pub fn is_clean(&self) -> bool {
        self.malformed == 0
    }
}

/// True when `line` is exactly `digits TAB digits`.
pub fn line_is_well_formed(line: &str) -> bool {
    LINE_RE.is_match(line)
}

/// Scan every line of a snapshot and fail if any line is malformed.
///
/// The whole file is always read so the error reports the full malformed
/// count, not just the first offender. A malformed file produces no graph
/// and no output downstream.
pub fn verify_format(path: &Path) -> Result<FormatReport> {
    let mut report = FormatReport {
        lines: 0,
        malformed: 0,
    };
    for line in snapshot_lines(path)? {
        let line = line?;
        report.lines += 1;
        if !line_is_well_formed(&line) {
            report.malformed += 1;
        }
    }
    if report.malformed > 0 {
        return Err(EngineError::MalformedInput {
            count: report.malformed,
        });
    }
    Ok(report)
}
