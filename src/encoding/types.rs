//! Container-type descriptors produced by the optimizer

use std::fmt;

use serde_json::{json, Value};

use super::errors::{EncodingError, EncodingResult};

/// Declared character set for text storage.
///
/// Only sets representable in a single fixed-width byte buffer are allowed;
/// anything else is rejected as invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Ascii,
    Utf8,
}

impl TextEncoding {
    /// Parses a declared character-set tag.
    ///
    /// # Errors
    ///
    /// `UnsupportedTextEncoding` for any set other than ASCII or UTF-8.
    pub fn from_tag(tag: &str) -> EncodingResult<Self> {
        if tag.eq_ignore_ascii_case("ascii") {
            Ok(TextEncoding::Ascii)
        } else if tag.eq_ignore_ascii_case("utf-8") || tag.eq_ignore_ascii_case("utf8") {
            Ok(TextEncoding::Utf8)
        } else {
            Err(EncodingError::UnsupportedTextEncoding {
                tag: tag.to_string(),
            })
        }
    }

    /// Returns the canonical tag recorded in metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Ascii => "ASCII",
            TextEncoding::Utf8 => "UTF-8",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The storage container selected for a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    /// Double-precision floating point.
    F64,
    /// Fixed-width byte buffer of `width` bytes.
    Text { width: usize, encoding: TextEncoding },
}

impl ContainerType {
    /// Returns the container name recorded in metadata.
    pub fn type_name(&self) -> &'static str {
        match self {
            ContainerType::U8 => "u8",
            ContainerType::I8 => "i8",
            ContainerType::U16 => "u16",
            ContainerType::I16 => "i16",
            ContainerType::U32 => "u32",
            ContainerType::I32 => "i32",
            ContainerType::F64 => "f64",
            ContainerType::Text { .. } => "text",
        }
    }

    /// Returns the inclusive value range of an integer container.
    pub fn integer_range(&self) -> Option<(i64, i64)> {
        match self {
            ContainerType::U8 => Some((0, u8::MAX as i64)),
            ContainerType::I8 => Some((i8::MIN as i64, i8::MAX as i64)),
            ContainerType::U16 => Some((0, u16::MAX as i64)),
            ContainerType::I16 => Some((i16::MIN as i64, i16::MAX as i64)),
            ContainerType::U32 => Some((0, u32::MAX as i64)),
            ContainerType::I32 => Some((i32::MIN as i64, i32::MAX as i64)),
            ContainerType::F64 | ContainerType::Text { .. } => None,
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerType::Text { width, encoding } => {
                write!(f, "text[{} x {}]", width, encoding)
            }
            other => write!(f, "{}", other.type_name()),
        }
    }
}

/// The sentinel value reserved to mean "missing."
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    Integer(i64),
    Real(f64),
    Text(String),
}

/// The optimizer's output: a container plus an optional missing-value
/// placeholder of that container's type.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageEncoding {
    pub container: ContainerType,
    pub placeholder: Option<Placeholder>,
}

impl StorageEncoding {
    /// Renders the selection as a metadata fragment for the saved node.
    ///
    /// Non-finite placeholder doubles are recorded as the strings `"NaN"`,
    /// `"Inf"` and `"-Inf"` since JSON numbers cannot carry them.
    pub fn to_metadata(&self) -> Value {
        let mut doc = match &self.container {
            ContainerType::Text { width, encoding } => json!({
                "container": "text",
                "width": width,
                "encoding": encoding.as_str(),
            }),
            other => json!({ "container": other.type_name() }),
        };

        if let Some(placeholder) = &self.placeholder {
            let value = match placeholder {
                Placeholder::Integer(v) => json!(v),
                Placeholder::Real(v) if v.is_nan() => json!("NaN"),
                Placeholder::Real(v) if *v == f64::INFINITY => json!("Inf"),
                Placeholder::Real(v) if *v == f64::NEG_INFINITY => json!("-Inf"),
                Placeholder::Real(v) => json!(v),
                Placeholder::Text(v) => json!(v),
            };
            doc["placeholder"] = value;
        }

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_tag_parsing() {
        assert_eq!(TextEncoding::from_tag("ascii").unwrap(), TextEncoding::Ascii);
        assert_eq!(TextEncoding::from_tag("UTF-8").unwrap(), TextEncoding::Utf8);
        assert_eq!(TextEncoding::from_tag("utf8").unwrap(), TextEncoding::Utf8);

        let err = TextEncoding::from_tag("latin1").unwrap_err();
        assert!(matches!(err, EncodingError::UnsupportedTextEncoding { .. }));
    }

    #[test]
    fn test_integer_ranges() {
        assert_eq!(ContainerType::U8.integer_range(), Some((0, 255)));
        assert_eq!(ContainerType::I16.integer_range(), Some((-32768, 32767)));
        assert_eq!(ContainerType::F64.integer_range(), None);
    }

    #[test]
    fn test_metadata_fragment() {
        let encoding = StorageEncoding {
            container: ContainerType::U8,
            placeholder: Some(Placeholder::Integer(255)),
        };
        let doc = encoding.to_metadata();
        assert_eq!(doc["container"], "u8");
        assert_eq!(doc["placeholder"], 255);

        let encoding = StorageEncoding {
            container: ContainerType::F64,
            placeholder: Some(Placeholder::Real(f64::NAN)),
        };
        assert_eq!(encoding.to_metadata()["placeholder"], "NaN");

        let encoding = StorageEncoding {
            container: ContainerType::Text {
                width: 4,
                encoding: TextEncoding::Ascii,
            },
            placeholder: None,
        };
        let doc = encoding.to_metadata();
        assert_eq!(doc["width"], 4);
        assert_eq!(doc["encoding"], "ASCII");
        assert!(doc.get("placeholder").is_none());
    }
}
