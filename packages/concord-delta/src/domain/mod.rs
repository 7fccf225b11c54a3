//! Domain types for delta computation

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// One day-over-day comparison to run.
#[derive(Debug, Clone)]
pub struct DeltaRequest {
    /// Previous snapshot, plain or gzipped.
    pub old_snapshot: PathBuf,

    /// Current snapshot, plain or gzipped.
    pub new_snapshot: PathBuf,

    /// Directory that receives the `.adds` and `.deletes` files.
    pub out_dir: PathBuf,

    /// Date stamped into the output file names; today in UTC when unset.
    pub date: Option<NaiveDate>,
}

impl DeltaRequest {
    pub fn effective_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Where a finished delta landed and how many lines went each way.
#[derive(Debug, Clone, Serialize)]
pub struct DeltaFiles {
    /// Lines present only in the new snapshot.
    pub adds: PathBuf,
    /// Lines present only in the old snapshot.
    pub deletes: PathBuf,
    pub adds_count: usize,
    pub deletes_count: usize,
}

impl DeltaFiles {
    pub fn is_unchanged(&self) -> bool {
        self.adds_count == 0 && self.deletes_count == 0
    }
}
