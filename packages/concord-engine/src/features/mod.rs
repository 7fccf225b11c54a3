//! Feature modules
//!
//! - snapshot/    - Reading and format-checking raw concordance snapshots
//! - concordance/ - The variant-to-canonical graph and its algorithms
//! - discovery/   - Locating dated snapshot files on disk

pub mod concordance;
pub mod discovery;
pub mod snapshot;
