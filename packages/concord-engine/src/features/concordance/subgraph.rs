use rustc_hash::{FxHashMap, FxHashSet};

use crate::shared::models::Ocn;

use super::graph::ConcordanceGraph;

/// The connected neighborhood of one seed OCN.
///
/// Holds the same bidirectional adjacency shape as the full graph,
/// restricted to every node reachable from the seed by following edges in
/// either direction. Keys exist only for nodes with a non-empty list, and
/// the lists are copied verbatim from the full graph, duplicates included.
#[derive(Debug, Default, Clone)]
pub struct Subgraph {
    out_edges: FxHashMap<Ocn, Vec<Ocn>>,
    in_edges: FxHashMap<Ocn, Vec<Ocn>>,
}

impl Subgraph {
    /// Collect the seed's component with a worklist walk.
    ///
    /// Each visited node contributes its forward and backward lists and
    /// enqueues every unvisited neighbor from both. A seed the snapshot
    /// never mentions yields an empty subgraph.
    pub fn compile(graph: &ConcordanceGraph, seed: Ocn) -> Self {
        let mut subgraph = Subgraph::default();
        let mut visited: FxHashSet<Ocn> = FxHashSet::default();
        let mut stack = vec![seed];

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            let targets = graph.canonical_targets(node);
            if !targets.is_empty() {
                subgraph.out_edges.insert(node, targets.to_vec());
                stack.extend(targets.iter().filter(|t| !visited.contains(t)));
            }
            let sources = graph.variant_sources(node);
            if !sources.is_empty() {
                subgraph.in_edges.insert(node, sources.to_vec());
                stack.extend(sources.iter().filter(|s| !visited.contains(s)));
            }
        }
        subgraph
    }

    pub fn out_edges(&self) -> &FxHashMap<Ocn, Vec<Ocn>> {
        &self.out_edges
    }

    pub fn in_edges(&self) -> &FxHashMap<Ocn, Vec<Ocn>> {
        &self.in_edges
    }

    /// Sorted union of every node keyed in either direction.
    pub fn nodes(&self) -> Vec<Ocn> {
        let mut nodes: Vec<Ocn> = self
            .out_edges
            .keys()
            .chain(self.in_edges.keys())
            .copied()
            .collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    pub fn edge_count(&self) -> usize {
        self.out_edges.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.out_edges.is_empty() && self.in_edges.is_empty()
    }
}
