//! Text storage selection
//!
//! Per FORMAT.md §4.3: a fixed-width byte buffer sized to the longest
//! present value (minimum 1 byte), under a declared ASCII or UTF-8
//! character set. The missing-value placeholder is `"NA"` with one leading
//! underscore prepended per collision, and the buffer widens to cover it.

use std::collections::HashSet;

use tracing::trace;

use super::errors::{EncodingError, EncodingResult};
use super::types::{ContainerType, Placeholder, StorageEncoding, TextEncoding};

/// Selects the fixed-width text container for the collection.
///
/// # Errors
///
/// `InvalidTextValue` if a value does not conform to the declared character
/// set. Callers with a raw character-set tag parse it first via
/// [`TextEncoding::from_tag`], which rejects unsupported sets.
pub fn optimize_text(
    values: &[Option<&str>],
    encoding: TextEncoding,
) -> EncodingResult<StorageEncoding> {
    let mut observed: HashSet<&str> = HashSet::new();
    let mut longest = 0usize;
    let mut any_missing = false;

    for value in values {
        match value {
            Some(v) => {
                if encoding == TextEncoding::Ascii && !v.is_ascii() {
                    return Err(EncodingError::InvalidTextValue {
                        value: (*v).to_string(),
                        encoding,
                    });
                }
                longest = longest.max(v.len());
                observed.insert(v);
            }
            None => any_missing = true,
        }
    }

    if !any_missing {
        return Ok(StorageEncoding {
            container: ContainerType::Text {
                width: longest.max(1),
                encoding,
            },
            placeholder: None,
        });
    }

    let mut sentinel = String::from("NA");
    while observed.contains(sentinel.as_str()) {
        sentinel.insert(0, '_');
    }

    let width = longest.max(sentinel.len()).max(1);
    trace!(width, sentinel = %sentinel, "selected text storage");

    Ok(StorageEncoding {
        container: ContainerType::Text { width, encoding },
        placeholder: Some(Placeholder::Text(sentinel)),
    })
}
