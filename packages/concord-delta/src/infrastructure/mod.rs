//! Delta computation over sorted snapshot lines

mod snapshot_diff;
mod sorted_diff;

pub use snapshot_diff::compute_delta;
pub use sorted_diff::sorted_diff;
