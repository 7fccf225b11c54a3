use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::errors::EngineError;
use crate::shared::models::{format_ocn_list, Ocn};

/// Which per-seed condition stopped a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Cycle,
    Ambiguous,
    DepthExceeded,
}

/// One seed the pipeline skipped, with the OCNs that caused the skip.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionFailure {
    pub seed: Ocn,
    pub kind: FailureKind,
    /// Cycle members or ambiguity candidates, sorted ascending. Empty
    /// for a hop-ceiling hit.
    pub implicated: Vec<Ocn>,
}

impl ResolutionFailure {
    /// Classify an error as a per-seed failure.
    ///
    /// Returns `None` for file-level errors (malformed input, IO,
    /// configuration), which must abort the whole run instead of being
    /// logged and skipped.
    pub fn from_error(seed: Ocn, err: &EngineError) -> Option<Self> {
        match err {
            EngineError::CyclicGraph { nodes } => Some(ResolutionFailure {
                seed,
                kind: FailureKind::Cycle,
                implicated: nodes.clone(),
            }),
            EngineError::AmbiguousResolution { candidates, .. } => Some(ResolutionFailure {
                seed,
                kind: FailureKind::Ambiguous,
                implicated: candidates.clone(),
            }),
            EngineError::ResolutionDepthExceeded { .. } => Some(ResolutionFailure {
                seed,
                kind: FailureKind::DepthExceeded,
                implicated: Vec::new(),
            }),
            EngineError::MalformedInput { .. }
            | EngineError::Io(_)
            | EngineError::Config(_) => None,
        }
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::Cycle => write!(
                f,
                "cycle detected for OCN {}: unresolved OCNs {}",
                self.seed,
                format_ocn_list(&self.implicated)
            ),
            FailureKind::Ambiguous => write!(
                f,
                "ambiguous resolution for OCN {}: canonical candidates {}",
                self.seed,
                format_ocn_list(&self.implicated)
            ),
            FailureKind::DepthExceeded => {
                write!(f, "resolution aborted for OCN {}: hop ceiling reached", self.seed)
            }
        }
    }
}

/// Summary of one completed validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Snapshot that was validated.
    pub input: PathBuf,
    /// Where the resolved mappings were written.
    pub output: PathBuf,
    /// Where the failure log was written.
    pub log: PathBuf,
    /// Total input lines read.
    pub lines: usize,
    /// Mappings recorded (self-mappings excluded).
    pub edges: usize,
    /// Self-mapping lines dropped.
    pub self_mappings: usize,
    /// Distinct variant OCNs seen.
    pub variants: usize,
    /// Seeds that resolved to a canonical OCN.
    pub resolved: usize,
    /// Seeds skipped, in output order.
    pub failures: Vec<ResolutionFailure>,
    pub duration_ms: u64,
}

impl ValidationReport {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.failures.is_empty()
    }
}
