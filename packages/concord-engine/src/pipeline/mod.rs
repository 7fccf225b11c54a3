//! Validation pipeline
//!
//! Drives one snapshot from format scan through per-seed resolution to
//! the validated output pair: a `.tsv` of resolved mappings and a log of
//! seeds that could not be resolved. Batch mode fans out over files.

mod report;
mod validator;

pub use report::{FailureKind, ResolutionFailure, ValidationReport};
pub use validator::{validate_batch, validate_file, ValidationRequest};
