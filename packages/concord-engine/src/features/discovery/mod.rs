//! Dated snapshot discovery
//!
//! Snapshot drops are flat directories of files named
//! `YYYYMMDD.<rest>`, e.g. `20240401.concordance.txt.gz`. Discovery
//! compares the raw drop directory against the validated output directory
//! to find dates still waiting for a validation run.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use walkdir::WalkDir;

use crate::errors::Result;

/// Compact date prefix carried by every snapshot file name.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Extract the date from a snapshot file name, if it carries one.
///
/// The first eight characters must be digits forming a real calendar
/// date; anything else is not a snapshot file.
pub fn snapshot_date(file_name: &str) -> Option<NaiveDate> {
    let prefix = file_name.get(..8)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
}

/// Distinct snapshot dates present in one directory, ascending.
///
/// Only direct children count; files without a date prefix are ignored.
pub fn scan_dates(dir: &Path) -> Result<BTreeSet<NaiveDate>> {
    let mut dates = BTreeSet::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(date) = snapshot_date(&entry.file_name().to_string_lossy()) {
            dates.insert(date);
        }
    }
    Ok(dates)
}

/// Dates with a raw snapshot but no validated counterpart, ascending.
///
/// A missing validated directory means nothing has been validated yet, so
/// every raw date is pending.
pub fn dates_needing_validation(raw_dir: &Path, validated_dir: &Path) -> Result<Vec<NaiveDate>> {
    let raw = scan_dates(raw_dir)?;
    let validated = if validated_dir.is_dir() {
        scan_dates(validated_dir)?
    } else {
        BTreeSet::new()
    };
    Ok(raw.difference(&validated).copied().collect())
}

/// The snapshot file for one date, lexically first when several share the
/// prefix (a plain `.txt` sorts before its `.txt.gz` twin).
pub fn snapshot_for_date(dir: &Path, date: NaiveDate) -> Result<Option<PathBuf>> {
    let prefix = date.format(DATE_FORMAT).to_string();
    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with(&prefix) {
            matches.push(entry.into_path());
        }
    }
    matches.sort();
    Ok(matches.into_iter().next())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_snapshot_date_parsing() {
        assert_eq!(
            snapshot_date("20240401.concordance.txt.gz"),
            Some(date(2024, 4, 1))
        );
        assert_eq!(snapshot_date("20240401"), Some(date(2024, 4, 1)));
        assert_eq!(snapshot_date("20241301.txt"), None);
        assert_eq!(snapshot_date("2024.txt"), None);
        assert_eq!(snapshot_date("readme.md"), None);
        assert_eq!(snapshot_date(""), None);
    }

    #[test]
    fn test_scan_dates_skips_non_snapshots_and_subdirs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "20240401.concordance.txt");
        touch(dir.path(), "20240402.concordance.txt.gz");
        touch(dir.path(), "notes.txt");
        std::fs::create_dir(dir.path().join("20240403.d")).unwrap();

        let dates = scan_dates(dir.path()).unwrap();
        assert_eq!(
            dates.into_iter().collect::<Vec<_>>(),
            vec![date(2024, 4, 1), date(2024, 4, 2)]
        );
    }

    #[test]
    fn test_dates_needing_validation() {
        let raw = TempDir::new().unwrap();
        let validated = TempDir::new().unwrap();
        touch(raw.path(), "20240401.concordance.txt");
        touch(raw.path(), "20240402.concordance.txt");
        touch(validated.path(), "20240401.validated.tsv");

        let pending = dates_needing_validation(raw.path(), validated.path()).unwrap();
        assert_eq!(pending, vec![date(2024, 4, 2)]);
    }

    #[test]
    fn test_missing_validated_dir_means_everything_pending() {
        let raw = TempDir::new().unwrap();
        touch(raw.path(), "20240401.concordance.txt");
        let pending =
            dates_needing_validation(raw.path(), &raw.path().join("absent")).unwrap();
        assert_eq!(pending, vec![date(2024, 4, 1)]);
    }

    #[test]
    fn test_snapshot_for_date_prefers_lexically_first() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "20240401.concordance.txt.gz");
        touch(dir.path(), "20240401.concordance.txt");

        let found = snapshot_for_date(dir.path(), date(2024, 4, 1)).unwrap();
        assert_eq!(
            found,
            Some(dir.path().join("20240401.concordance.txt"))
        );
        assert_eq!(snapshot_for_date(dir.path(), date(2024, 4, 2)).unwrap(), None);
    }
}
