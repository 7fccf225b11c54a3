//! Concordance resolution and validation engine
//!
//! OCLC publishes concordance snapshots: flat files mapping variant OCNs
//! (duplicate bibliographic record numbers) to the canonical OCN each was
//! merged into. Merges chain and occasionally go wrong, so a variant is
//! only trustworthy once it resolves to exactly one terminal OCN.
//!
//! The engine does that end to end:
//!
//! 1. Strict format scan (`digits TAB digits` per line, gzip transparent)
//! 2. Bidirectional graph build with self-mappings dropped
//! 3. Per-seed subgraph compilation and cycle rejection
//! 4. Iterative multi-hop resolution with ambiguity detection
//!
//! Bad lines fail the whole file; bad seeds are logged and skipped.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use concord_engine::{validate_file, EngineConfig, ValidationRequest};
//!
//! let request = ValidationRequest {
//!     input: "drops/20240401.concordance.txt.gz".into(),
//!     output: "validated/20240401.validated.tsv".into(),
//!     log: "validated/20240401.failures.log".into(),
//! };
//! let report = validate_file(&request, &EngineConfig::default())?;
//! println!("{} resolved, {} skipped", report.resolved, report.failure_count());
//! ```
//!
//! Single-OCN lookups go through the library API directly:
//!
//! ```rust,ignore
//! use concord_engine::{canonical_ocn, ConcordanceGraph, Ocn, ResolverLimits};
//!
//! let graph = ConcordanceGraph::load("drops/20240401.concordance.txt".as_ref())?;
//! let canonical = canonical_ocn(&graph, Ocn(1150424), ResolverLimits::default())?;
//! ```

pub mod config;
pub mod errors;
pub mod features;
pub mod pipeline;
pub mod shared;

pub use config::{EngineConfig, CONFIG_VERSION};
pub use errors::{EngineError, Result};
pub use features::concordance::{
    canonical_ocn, detect_cycles, ConcordanceGraph, ResolverLimits, Subgraph, DEFAULT_MAX_HOPS,
};
pub use features::discovery;
pub use features::snapshot::{open_snapshot, snapshot_lines, verify_format, FormatReport};
pub use pipeline::{
    validate_batch, validate_file, FailureKind, ResolutionFailure, ValidationReport,
    ValidationRequest,
};
pub use shared::models::Ocn;
