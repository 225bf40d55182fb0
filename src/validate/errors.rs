//! Validator error types

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::metadata::MetadataError;
use crate::registry::RegistryError;

/// Result type for validator operations
pub type ValidateResult<T> = Result<T, ValidateError>;

/// Errors raised while validating an object directory.
///
/// Metadata and registry failures pass through unchanged so callers can
/// still tell a malformed document from a missing handler; the remaining
/// variants are produced by the walk itself or by per-type handlers.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("validation of '{tag}' object at {path} failed: {reason}")]
    HandlerFailure {
        tag: String,
        path: PathBuf,
        reason: String,
    },

    #[error("object at {path} declares {extent} {declared} but {measured} was measured")]
    ExtentMismatch {
        path: PathBuf,
        extent: &'static str,
        declared: String,
        measured: String,
    },

    #[error("maximum validation depth {max_depth} exceeded at {path}")]
    DepthExceeded { path: PathBuf, max_depth: usize },

    #[error("object at {path} of type '{tag}' does not satisfy interface '{interface}'")]
    InterfaceNotSatisfied {
        path: PathBuf,
        tag: String,
        interface: String,
    },
}

impl ValidateError {
    /// Builds a handler failure with path context.
    ///
    /// Handlers use this for violations inside their own layout; failures of
    /// nested objects propagate as-is from `validate_subpath`.
    pub fn handler_failure(
        tag: impl Into<String>,
        path: &Path,
        reason: impl Into<String>,
    ) -> Self {
        ValidateError::HandlerFailure {
            tag: tag.into(),
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
