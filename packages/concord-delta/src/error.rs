//! Error types for concord-delta

use std::fmt;
use thiserror::Error;

/// Delta error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Snapshot missing or unreadable
    Snapshot,
    /// Staging or renaming output files
    Scratch,
    /// I/O errors
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Snapshot => "snapshot",
            ErrorKind::Scratch => "scratch",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Delta error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct DeltaError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl DeltaError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Snapshot, message)
    }

    pub fn scratch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Scratch, message)
    }
}

impl From<std::io::Error> for DeltaError {
    fn from(err: std::io::Error) -> Self {
        DeltaError::new(ErrorKind::IO, format!("IO error: {err}")).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DeltaError>;
