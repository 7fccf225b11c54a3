use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};
use crate::shared::models::Ocn;

use super::graph::ConcordanceGraph;

/// Hop ceiling applied when no explicit limit is configured.
///
/// Real merge chains are a handful of hops deep; a thousand is far past
/// anything legitimate while still bounding the walk on cyclic input.
pub const DEFAULT_MAX_HOPS: usize = 1000;

/// Tunable bounds for [`canonical_ocn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverLimits {
    /// Maximum expansion rounds before resolution gives up on a seed.
    pub max_hops: usize,
}

impl Default for ResolverLimits {
    fn default() -> Self {
        ResolverLimits {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

/// Resolve a seed OCN to its single canonical OCN.
///
/// Starts from the seed's direct targets and repeatedly substitutes every
/// non-terminal candidate with its own targets until only terminals
/// remain. One surviving terminal is the answer; several distinct
/// terminals mean the merge history genuinely diverged and the seed fails
/// with [`EngineError::AmbiguousResolution`], candidates sorted ascending.
///
/// A seed with no outgoing mapping resolves to itself, whether or not the
/// snapshot mentions it. The ambiguity check runs on the raw candidate
/// list before each round's dedup, so duplicate input lines pointing at
/// the same terminal surface the duplication in the error rather than
/// being silently collapsed.
///
/// Callers are expected to run [`super::detect_cycles`] first; the hop
/// ceiling only exists so cyclic input reaching this far fails with
/// [`EngineError::ResolutionDepthExceeded`] instead of spinning.
pub fn canonical_ocn(graph: &ConcordanceGraph, seed: Ocn, limits: ResolverLimits) -> Result<Ocn> {
    let mut candidates: Vec<Ocn> = graph.canonical_targets(seed).to_vec();
    if candidates.is_empty() {
        return Ok(seed);
    }

    for _ in 0..limits.max_hops {
        if candidates.len() == 1 && graph.is_canonical(candidates[0]) {
            return Ok(candidates[0]);
        }
        if candidates.len() > 1 && candidates.iter().all(|&c| graph.is_canonical(c)) {
            let mut sorted = candidates.clone();
            sorted.sort_unstable();
            return Err(EngineError::AmbiguousResolution {
                seed,
                candidates: sorted,
            });
        }

        // One hop: terminals carry over, everything else is replaced by
        // its own targets.
        let mut next: Vec<Ocn> = Vec::with_capacity(candidates.len());
        for &candidate in &candidates {
            let targets = graph.canonical_targets(candidate);
            if targets.is_empty() {
                next.push(candidate);
            } else {
                next.extend_from_slice(targets);
            }
        }
        next.sort_unstable();
        next.dedup();
        candidates = next;
    }

    Err(EngineError::ResolutionDepthExceeded {
        seed,
        max_hops: limits.max_hops,
    })
}
