//! Snapshot input: transparent (de)compression and line-format checking

mod format;
mod reader;

pub use format::{line_is_well_formed, verify_format, FormatReport};
pub use reader::{is_gzip, open_snapshot, snapshot_lines};
