use crate::errors::{EngineError, Result};
use crate::shared::models::Ocn;

use super::subgraph::Subgraph;

/// Reject a subgraph that cannot be resolved because it loops.
///
/// Kahn's algorithm: repeatedly retire nodes whose incoming lists are
/// exhausted, starting from nodes that only ever appear on the variant
/// side. Whatever still holds incoming edges afterwards is part of at
/// least one cycle and is reported sorted ascending. An acyclic subgraph
/// returns `Ok(())` and is safe to resolve.
pub fn detect_cycles(subgraph: &Subgraph) -> Result<()> {
    let out_edges = subgraph.out_edges();
    let mut pending_in = subgraph.in_edges().clone();

    // In-degree zero means the node never occurs as a merge target.
    let mut worklist: Vec<Ocn> = out_edges
        .keys()
        .filter(|node| !pending_in.contains_key(node))
        .copied()
        .collect();

    while let Some(node) = worklist.pop() {
        let Some(targets) = out_edges.get(&node) else {
            // Terminal node, nothing downstream to release.
            continue;
        };
        for target in targets {
            let Some(sources) = pending_in.get_mut(target) else {
                continue;
            };
            // Drop every occurrence of the retired node, so duplicate
            // edges cannot leave a phantom in-degree behind.
            sources.retain(|&s| s != node);
            if sources.is_empty() {
                pending_in.remove(target);
                worklist.push(*target);
            }
        }
    }

    if pending_in.is_empty() {
        return Ok(());
    }
    let mut nodes: Vec<Ocn> = pending_in.keys().copied().collect();
    nodes.sort_unstable();
    Err(EngineError::CyclicGraph { nodes })
}
