//! Legacy validator error types

use thiserror::Error;

/// Result type for legacy-graph validation
pub type LegacyResult<T> = Result<T, LegacyError>;

/// Errors raised while validating the legacy metadata graph.
///
/// The structural variants each correspond to exactly one way the tree
/// shape can be wrong, so a single mutation to a correct tree flips a
/// single variant.
#[derive(Debug, Error)]
pub enum LegacyError {
    #[error("failed to walk '{path}': {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("malformed metadata document at '{file}': {reason}")]
    Malformed { file: String, reason: String },

    #[error("missing child object at '{child}' (referenced from '{parent}')")]
    MissingChild { parent: String, child: String },

    #[error("multiple references to child at '{child}'")]
    MultipleReferences { child: String },

    #[error("non-child object at '{child}' is referenced from '{parent}'")]
    NonChildReferenced { parent: String, child: String },

    #[error("object at '{parent}' references non-nested child at '{child}'")]
    NonNestedChild { parent: String, child: String },

    #[error("non-child object at '{path}' is nested")]
    UnreferencedNested { path: String },

    #[error("non-referenced child object at '{path}'")]
    NonReferencedChild { path: String },

    #[error("invalid redirection from '{from}' to '{target}'")]
    InvalidRedirection { from: String, target: String },

    #[error("redirection from existing path '{path}'")]
    RedirectionFromExistingPath { path: String },

    #[error("redirection document at '{file}' references an unexpected path '{path}'")]
    RedirectionUnexpectedPath { file: String, path: String },

    #[error("metadata document at '{file}' declares unexpected path '{path}'")]
    UnexpectedPath { file: String, path: String },

    #[error("unknown file at '{path}'")]
    UnknownFile { path: String },
}
