//! Encoding optimizer error types

use thiserror::Error;

use super::types::TextEncoding;

/// Result type for encoding selection
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors raised by encoding selection.
///
/// The optimizer never fails on representable input; these cover invalid
/// declared encodings and the theoretically unreachable exhaustion of the
/// double-precision placeholder search.
#[derive(Debug, Clone, Error)]
pub enum EncodingError {
    #[error("unsupported text encoding '{tag}'")]
    UnsupportedTextEncoding { tag: String },

    #[error("value {value:?} is not valid {encoding} text")]
    InvalidTextValue {
        value: String,
        encoding: TextEncoding,
    },

    #[error("placeholder search exhausted for {container} storage")]
    PlaceholderExhausted { container: &'static str },
}
