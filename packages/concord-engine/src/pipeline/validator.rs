use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::{error, info, warn};

use crate::config::EngineConfig;
use crate::errors::{EngineError, Result};
use crate::features::concordance::{canonical_ocn, detect_cycles, ConcordanceGraph};
use crate::shared::models::Ocn;

use super::report::{ResolutionFailure, ValidationReport};

/// One snapshot to validate and where its outputs go.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    /// Raw concordance snapshot, plain or gzipped.
    pub input: PathBuf,

    /// Destination for resolved `variant TAB canonical` lines.
    pub output: PathBuf,

    /// Destination for the per-seed failure log.
    pub log: PathBuf,
}

/// Validate one snapshot end to end.
///
/// Rejects the file outright when any line is malformed, then resolves
/// every variant in ascending order. Resolved seeds land in the output
/// file as `variant TAB canonical`; seeds caught in a cycle, an ambiguous
/// merge, or the hop ceiling are written to the failure log and skipped.
/// Both files are staged in temporaries and only renamed into place once
/// the whole run succeeds, so a failed run leaves nothing behind.
pub fn validate_file(
    request: &ValidationRequest,
    config: &EngineConfig,
) -> Result<ValidationReport> {
    let started = Instant::now();
    info!(input = %request.input.display(), "validating concordance snapshot");

    let graph = match ConcordanceGraph::load(&request.input) {
        Ok(graph) => graph,
        Err(err) => {
            error!(input = %request.input.display(), %err, "snapshot rejected");
            return Err(err);
        }
    };

    let out_dir = scratch_dir(&request.output);
    let log_dir = scratch_dir(&request.log);
    fs::create_dir_all(out_dir)?;
    fs::create_dir_all(log_dir)?;
    let mut out_tmp = NamedTempFile::new_in(out_dir)?;
    let mut log_tmp = NamedTempFile::new_in(log_dir)?;

    let mut resolved = 0usize;
    let mut failures: Vec<ResolutionFailure> = Vec::new();
    {
        let mut out = BufWriter::new(out_tmp.as_file_mut());
        let mut log = BufWriter::new(log_tmp.as_file_mut());
        for seed in graph.sorted_variants() {
            match resolve_seed(&graph, seed, config) {
                Ok(canonical) => {
                    writeln!(out, "{seed}\t{canonical}")?;
                    resolved += 1;
                }
                Err(err) => match ResolutionFailure::from_error(seed, &err) {
                    Some(failure) => {
                        if config.log_failures {
                            warn!(input = %request.input.display(), %failure, "seed skipped");
                        }
                        writeln!(log, "{failure}")?;
                        failures.push(failure);
                    }
                    None => return Err(err),
                },
            }
        }
        out.flush()?;
        log.flush()?;
    }
    out_tmp
        .persist(&request.output)
        .map_err(|e| EngineError::Io(e.error))?;
    log_tmp
        .persist(&request.log)
        .map_err(|e| EngineError::Io(e.error))?;

    let report = ValidationReport {
        input: request.input.clone(),
        output: request.output.clone(),
        log: request.log.clone(),
        lines: graph.line_count(),
        edges: graph.edge_count(),
        self_mappings: graph.self_mapping_count(),
        variants: graph.variant_count(),
        resolved,
        failures,
        duration_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        input = %request.input.display(),
        resolved = report.resolved,
        failures = report.failure_count(),
        duration_ms = report.duration_ms,
        "validation complete"
    );
    Ok(report)
}

/// Validate many snapshots in parallel.
///
/// Results come back in request order; one file failing never stops the
/// others.
pub fn validate_batch(
    requests: &[ValidationRequest],
    config: &EngineConfig,
) -> Vec<Result<ValidationReport>> {
    requests
        .par_iter()
        .map(|request| validate_file(request, config))
        .collect()
}

fn resolve_seed(graph: &ConcordanceGraph, seed: Ocn, config: &EngineConfig) -> Result<Ocn> {
    let subgraph = graph.subgraph(seed);
    detect_cycles(&subgraph)?;
    canonical_ocn(graph, seed, config.resolver)
}

fn scratch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
