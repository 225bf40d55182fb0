//! Reading and writing `OBJECT.json` documents
//!
//! Per FORMAT.md §2.1 the document lives at a fixed location inside the
//! node's directory and must be a JSON object with a string `type` field.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::{MetadataError, MetadataResult};

/// Fixed file name of the node metadata document.
pub const OBJECT_FILE: &str = "OBJECT.json";

/// Returns the metadata document path for a node directory.
pub fn document_path(node_dir: &Path) -> PathBuf {
    node_dir.join(OBJECT_FILE)
}

/// Reads a node's metadata document.
///
/// # Errors
///
/// - `MetadataError::NotFound` if no document exists at the fixed location
/// - `MetadataError::Io` on any other read failure
/// - `MetadataError::Malformed` if the content is not valid JSON
/// - `MetadataError::NotAnObject` if the content is JSON but not an object
pub fn read_document(node_dir: &Path) -> MetadataResult<Value> {
    let path = document_path(node_dir);

    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MetadataError::NotFound { path: path.clone() }
        } else {
            MetadataError::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| MetadataError::Malformed {
        path: path.clone(),
        reason: format!("invalid JSON: {}", e),
    })?;

    if !value.is_object() {
        return Err(MetadataError::NotAnObject { path });
    }

    Ok(value)
}

/// Reads an optional auxiliary document from a node directory.
///
/// Absence is not a failure: a missing file yields `Ok(None)` so call sites
/// can treat the feature as absent. A present but unreadable or malformed
/// document still fails.
pub fn read_optional_document(node_dir: &Path, name: &str) -> MetadataResult<Option<Value>> {
    let path = node_dir.join(name);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(MetadataError::Io { path, source: e }),
    };

    let value: Value = serde_json::from_str(&content).map_err(|e| MetadataError::Malformed {
        path: path.clone(),
        reason: format!("invalid JSON: {}", e),
    })?;

    if !value.is_object() {
        return Err(MetadataError::NotAnObject { path });
    }

    Ok(Some(value))
}

/// Extracts the `type` tag from a metadata document.
///
/// # Errors
///
/// Returns `MetadataError::MissingField` if `type` is absent or not a string.
/// The `path` argument only provides error context.
pub fn type_tag<'a>(metadata: &'a Value, node_dir: &Path) -> MetadataResult<&'a str> {
    metadata
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| MetadataError::MissingField {
            path: document_path(node_dir),
            field: "type",
        })
}

/// Returns the `is_child` flag of a metadata document, defaulting to false.
pub fn is_child(metadata: &Value) -> bool {
    metadata
        .get("is_child")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Writes a node's metadata document, creating the directory if needed.
///
/// The document must be a JSON object carrying a string `type` field; this
/// is enforced at write time so a saved node is always resolvable.
pub fn write_document(node_dir: &Path, metadata: &Value) -> MetadataResult<()> {
    let path = document_path(node_dir);

    if !metadata.is_object() {
        return Err(MetadataError::NotAnObject { path });
    }
    type_tag(metadata, node_dir)?;

    fs::create_dir_all(node_dir).map_err(|e| MetadataError::Io {
        path: node_dir.to_path_buf(),
        source: e,
    })?;

    let content = serde_json::to_string_pretty(metadata).map_err(|e| MetadataError::Malformed {
        path: path.clone(),
        reason: format!("failed to serialize document: {}", e),
    })?;

    fs::write(&path, content).map_err(|e| MetadataError::Io { path, source: e })?;

    Ok(())
}
