//! Bidirectional variant/canonical adjacency maps
//!
//! Built once per snapshot file and then queried read-only by subgraph
//! compilation and resolution. Both directions are materialized because
//! traversal walks merges forward (variant to canonical) and backward
//! (canonical to its variants) from the same seed.

use std::io;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::errors::{EngineError, Result};
use crate::features::snapshot::{line_is_well_formed, snapshot_lines, verify_format};
use crate::shared::models::Ocn;

use super::subgraph::Subgraph;

/// In-memory concordance for one snapshot.
///
/// Mapping lists keep duplicates in input order. A line mapping an OCN to
/// itself is dropped before insertion and only counted, so neither map
/// ever contains a self-loop.
#[derive(Debug, Default, Clone)]
pub struct ConcordanceGraph {
    variant_to_canonical: FxHashMap<Ocn, Vec<Ocn>>,
    canonical_to_variant: FxHashMap<Ocn, Vec<Ocn>>,
    lines: usize,
    edges: usize,
    self_mappings: usize,
}

impl ConcordanceGraph {
    /// Build a graph from an iterator of raw snapshot lines.
    ///
    /// Every line is consumed even after a bad one so the error carries
    /// the complete malformed count. Any malformed line fails the whole
    /// build; no partial graph escapes.
    pub fn build<I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut graph = ConcordanceGraph::default();
        let mut malformed = 0usize;
        for line in lines {
            let line = line?;
            graph.lines += 1;
            let Some((variant, canonical)) = parse_line(&line) else {
                malformed += 1;
                continue;
            };
            if variant == canonical {
                graph.self_mappings += 1;
                continue;
            }
            graph
                .variant_to_canonical
                .entry(variant)
                .or_default()
                .push(canonical);
            graph
                .canonical_to_variant
                .entry(canonical)
                .or_default()
                .push(variant);
            graph.edges += 1;
        }
        if malformed > 0 {
            return Err(EngineError::MalformedInput { count: malformed });
        }
        Ok(graph)
    }

    /// Load a snapshot file, plain or gzipped.
    ///
    /// Runs the format scan first so a dirty file is rejected before any
    /// graph work starts.
    pub fn load(path: &Path) -> Result<Self> {
        verify_format(path)?;
        Self::build(snapshot_lines(path)?)
    }

    /// Canonical OCNs this variant maps to, in input order. Empty slice
    /// when the OCN was never merged into anything.
    pub fn canonical_targets(&self, ocn: Ocn) -> &[Ocn] {
        self.variant_to_canonical
            .get(&ocn)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Variant OCNs that were merged into this one, in input order.
    pub fn variant_sources(&self, ocn: Ocn) -> &[Ocn] {
        self.canonical_to_variant
            .get(&ocn)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// An OCN is canonical when it maps forward to nothing.
    ///
    /// OCNs the snapshot never mentions are canonical by this definition;
    /// they resolve to themselves.
    pub fn is_canonical(&self, ocn: Ocn) -> bool {
        self.canonical_targets(ocn).is_empty()
    }

    /// Every OCN that appears on the variant side, unordered.
    pub fn variants(&self) -> impl Iterator<Item = Ocn> + '_ {
        self.variant_to_canonical.keys().copied()
    }

    /// Variant OCNs sorted ascending, for deterministic output order.
    pub fn sorted_variants(&self) -> Vec<Ocn> {
        let mut variants: Vec<Ocn> = self.variants().collect();
        variants.sort_unstable();
        variants
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn self_mapping_count(&self) -> usize {
        self.self_mappings
    }

    pub fn variant_count(&self) -> usize {
        self.variant_to_canonical.len()
    }

    /// Compile the connected neighborhood of `seed` into a standalone
    /// subgraph. See [`Subgraph::compile`].
    pub fn subgraph(&self, seed: Ocn) -> Subgraph {
        Subgraph::compile(self, seed)
    }
}

/// Parse one snapshot line into a (variant, canonical) pair.
///
/// The format gate is the same anchored pattern the file scan uses; a
/// digit run that overflows `u64` is treated as malformed as well.
fn parse_line(line: &str) -> Option<(Ocn, Ocn)> {
    if !line_is_well_formed(line) {
        return None;
    }
    let (variant, canonical) = line.split_once('\t')?;
    Some((variant.parse().ok()?, canonical.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn graph_from(rows: &[(u64, u64)]) -> ConcordanceGraph {
        ConcordanceGraph::build(rows.iter().map(|&(v, c)| Ok(format!("{v}\t{c}")))).unwrap()
    }

    #[test]
    fn test_build_populates_both_directions() {
        let graph = graph_from(&[(1, 2), (3, 2)]);
        assert_eq!(graph.canonical_targets(Ocn(1)), &[Ocn(2)]);
        assert_eq!(graph.canonical_targets(Ocn(3)), &[Ocn(2)]);
        let mut sources = graph.variant_sources(Ocn(2)).to_vec();
        sources.sort_unstable();
        assert_eq!(sources, vec![Ocn(1), Ocn(3)]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.line_count(), 2);
    }

    #[test]
    fn test_self_mapping_dropped_and_counted() {
        let graph = graph_from(&[(5, 5), (1, 2)]);
        assert_eq!(graph.self_mapping_count(), 1);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.canonical_targets(Ocn(5)).is_empty());
        assert!(graph.variant_sources(Ocn(5)).is_empty());
        assert_eq!(graph.line_count(), 2);
    }

    #[test]
    fn test_duplicate_lines_preserved() {
        let graph = graph_from(&[(1, 2), (1, 2)]);
        assert_eq!(graph.canonical_targets(Ocn(1)), &[Ocn(2), Ocn(2)]);
        assert_eq!(graph.variant_sources(Ocn(2)), &[Ocn(1), Ocn(1)]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_is_canonical_for_terminal_and_unknown() {
        let graph = graph_from(&[(1, 2)]);
        assert!(!graph.is_canonical(Ocn(1)));
        assert!(graph.is_canonical(Ocn(2)));
        assert!(graph.is_canonical(Ocn(99)));
    }

    #[test]
    fn test_build_fails_with_total_malformed_count() {
        let lines = vec![
            Ok("1\t2".to_string()),
            Ok("oops".to_string()),
            Ok("3\t4\t5".to_string()),
            Ok("6\t7".to_string()),
        ];
        let err = ConcordanceGraph::build(lines).unwrap_err();
        assert_eq!(err.to_string(), "2 line(s) are malformed");
    }

    #[test]
    fn test_u64_overflow_is_malformed() {
        let lines = vec![Ok("99999999999999999999999999\t1".to_string())];
        let err = ConcordanceGraph::build(lines).unwrap_err();
        assert_eq!(err.to_string(), "1 line(s) are malformed");
    }

    #[test]
    fn test_sorted_variants_ascending() {
        let graph = graph_from(&[(30, 1), (2, 1), (10, 1)]);
        assert_eq!(graph.sorted_variants(), vec![Ocn(2), Ocn(10), Ocn(30)]);
    }

    #[test]
    fn test_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap.txt");
        std::fs::write(&path, "1\t2\n2\t3\n").unwrap();
        let graph = ConcordanceGraph::load(&path).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.canonical_targets(Ocn(2)), &[Ocn(3)]);
    }

    #[test]
    fn test_load_rejects_dirty_file_before_building() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap.txt");
        std::fs::write(&path, "1\t2\nnope\n").unwrap();
        let err = ConcordanceGraph::load(&path).unwrap_err();
        assert_eq!(err.to_string(), "1 line(s) are malformed");
    }
}
