use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use concord_engine::snapshot_lines;
use tempfile::NamedTempFile;
use tracing::info;

use crate::domain::{DeltaFiles, DeltaRequest};
use crate::error::{DeltaError, Result};

use super::sorted_diff::sorted_diff;

/// File name date stamp, same compact form the snapshots carry.
const DATE_FORMAT: &str = "%Y%m%d";

/// Compute the `.adds`/`.deletes` pair for one day-over-day comparison.
///
/// Both snapshots are sorted before the lockstep walk, so lines that only
/// moved position appear in neither file. Output lines stay sorted.
/// Both outputs are staged in temporaries and renamed into place at the
/// end, leaving the output directory untouched when anything fails.
pub fn compute_delta(request: &DeltaRequest) -> Result<DeltaFiles> {
    info!(
        old = %request.old_snapshot.display(),
        new = %request.new_snapshot.display(),
        "computing snapshot delta"
    );
    let old = load_sorted(&request.old_snapshot)?;
    let new = load_sorted(&request.new_snapshot)?;
    let (deletes, adds) = sorted_diff(&old, &new);

    let stamp = request.effective_date().format(DATE_FORMAT).to_string();
    fs::create_dir_all(&request.out_dir)?;
    let adds_path = request.out_dir.join(format!("{stamp}.adds"));
    let deletes_path = request.out_dir.join(format!("{stamp}.deletes"));
    write_lines(&request.out_dir, &adds_path, &adds)?;
    write_lines(&request.out_dir, &deletes_path, &deletes)?;

    let delta = DeltaFiles {
        adds: adds_path,
        deletes: deletes_path,
        adds_count: adds.len(),
        deletes_count: deletes.len(),
    };
    info!(
        adds = delta.adds_count,
        deletes = delta.deletes_count,
        "delta complete"
    );
    Ok(delta)
}

fn load_sorted(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(DeltaError::snapshot(format!(
            "missing snapshot: {}",
            path.display()
        )));
    }
    let mut lines: Vec<String> = Vec::new();
    for line in snapshot_lines(path)? {
        lines.push(line?);
    }
    lines.sort_unstable();
    Ok(lines)
}

fn write_lines(dir: &Path, target: &Path, lines: &[String]) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
    }
    tmp.persist(target).map_err(|e| {
        DeltaError::scratch(format!("failed to stage {}", target.display())).with_source(e.error)
    })?;
    Ok(())
}
