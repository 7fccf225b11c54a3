//! Day-over-day deltas between concordance snapshots
//!
//! Consecutive snapshot drops are mostly identical; what matters is what
//! moved. This crate compares two snapshots as sorted line multisets and
//! writes a dated pair of files:
//!
//! - `YYYYMMDD.adds`    - lines present only in the new snapshot
//! - `YYYYMMDD.deletes` - lines present only in the old snapshot
//!
//! Reordered lines are not changes. A line repeated three times against
//! one copy counts as two on the heavier side.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use concord_delta::{compute_delta, DeltaRequest};
//!
//! let delta = compute_delta(&DeltaRequest {
//!     old_snapshot: "drops/20240401.concordance.txt.gz".into(),
//!     new_snapshot: "drops/20240402.concordance.txt.gz".into(),
//!     out_dir: "deltas".into(),
//!     date: None, // stamp with today, UTC
//! })?;
//! println!("+{} -{}", delta.adds_count, delta.deletes_count);
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::{DeltaFiles, DeltaRequest};
pub use error::{DeltaError, ErrorKind, Result};
pub use infrastructure::{compute_delta, sorted_diff};
