//! Error types for concord-engine
//!
//! Provides unified error handling across the crate. Per-node failures
//! (cycles, ambiguity, hop ceiling) are recoverable at the validation-loop
//! level; format and I/O failures are fatal for the whole file.

use thiserror::Error;

use crate::shared::models::{format_ocn_list, Ocn};

/// Main error type for concordance operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input file contains lines violating the `int\tint` format.
    ///
    /// Fatal for the whole file; no partial graph is ever built.
    #[error("{count} line(s) are malformed")]
    MalformedInput { count: usize },

    /// A node's subgraph contains at least one cycle.
    ///
    /// `nodes` holds the ids Kahn's algorithm could not retire, sorted
    /// ascending. Scoped to one subgraph; other subgraphs keep processing.
    #[error("cycle detected: unresolved OCNs {}", format_ocn_list(.nodes))]
    CyclicGraph { nodes: Vec<Ocn> },

    /// A variant resolves to more than one distinct terminal OCN.
    ///
    /// `candidates` holds the terminal list sorted ascending. Scoped to a
    /// single variant; other variants keep processing.
    #[error("ambiguous resolution for OCN {seed}: canonical candidates {}", format_ocn_list(.candidates))]
    AmbiguousResolution { seed: Ocn, candidates: Vec<Ocn> },

    /// The resolver hit its hop ceiling without reaching a terminal.
    ///
    /// Only reachable when cyclic input skipped cycle detection; the
    /// ceiling turns a would-be infinite loop into a per-node failure.
    #[error("resolution of OCN {seed} exceeded {max_hops} hop(s); subgraph was not validated as acyclic")]
    ResolutionDepthExceeded { seed: Ocn, max_hops: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::Config(msg.into())
    }

    /// True for failures scoped to one seed OCN (cycle, ambiguity, hop
    /// ceiling); false for file-level failures that abort the run.
    pub fn is_per_node(&self) -> bool {
        matches!(
            self,
            EngineError::CyclicGraph { .. }
                | EngineError::AmbiguousResolution { .. }
                | EngineError::ResolutionDepthExceeded { .. }
        )
    }
}

/// Result type alias for concordance operations
pub type Result<T> = std::result::Result<T, EngineError>;
