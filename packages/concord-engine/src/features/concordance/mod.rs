//! Concordance graph and its algorithms
//!
//! A concordance maps variant OCNs to the canonical OCN librarians merged
//! them into. Merges chain over time, so resolution walks the graph until
//! it reaches an OCN that is no longer a variant of anything.

mod cycles;
mod graph;
mod resolver;
mod subgraph;

pub use cycles::detect_cycles;
pub use graph::ConcordanceGraph;
pub use resolver::{canonical_ocn, ResolverLimits, DEFAULT_MAX_HOPS};
pub use subgraph::Subgraph;
