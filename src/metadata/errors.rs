//! Metadata document error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for metadata document operations
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors raised while reading or writing node metadata documents.
///
/// `NotFound` is the one recoverable variant: optional auxiliary documents
/// report it so call sites can downgrade absence to "feature absent."
/// Everything else means the document exists but is unusable.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("no metadata document at {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read metadata document at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed metadata document at {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("metadata document at {path} is not a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("metadata document at {path} is missing required field '{field}'")]
    MissingField { path: PathBuf, field: &'static str },
}

impl MetadataError {
    /// Returns whether this error only signals document absence.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MetadataError::NotFound { .. })
    }
}
