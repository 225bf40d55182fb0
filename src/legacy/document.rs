//! Legacy metadata documents
//!
//! Per FORMAT.md §3.1, a document carries its own declared `path`, an
//! optional `is_child` flag, an optional `children` array of
//! `{"resource": {"path": ...}}` entries, and (for redirections) a
//! `redirection.target` in place of data. Handler-specific fields are
//! ignored here; only the graph-relevant fields are extracted.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::{LegacyError, LegacyResult};

#[derive(Debug, Deserialize)]
struct RawDocument {
    path: String,
    #[serde(default)]
    is_child: bool,
    #[serde(default)]
    children: Vec<RawChild>,
    #[serde(default)]
    redirection: Option<RawRedirection>,
}

#[derive(Debug, Deserialize)]
struct RawChild {
    resource: RawResource,
}

#[derive(Debug, Deserialize)]
struct RawResource {
    path: String,
}

#[derive(Debug, Deserialize)]
struct RawRedirection {
    target: String,
}

/// The graph-relevant view of one legacy metadata document.
#[derive(Debug, Clone)]
pub struct LegacyDocument {
    /// The node path this document declares for itself.
    pub path: String,
    /// Whether the node claims to be owned by an enclosing object.
    pub is_child: bool,
    /// Declared child paths, in declaration order.
    pub children: Vec<String>,
    /// Redirection target; its presence marks the document as a redirect.
    pub redirect_target: Option<String>,
    /// Where the document physically lives, relative to the root.
    pub file: String,
}

impl LegacyDocument {
    /// Whether this document is a redirection.
    pub fn is_redirect(&self) -> bool {
        self.redirect_target.is_some()
    }
}

/// Loads one legacy metadata document.
///
/// `file` is the document's path relative to `root`, `/`-separated.
///
/// # Errors
///
/// `LegacyError::Malformed` if the file is unreadable, not valid JSON, or
/// missing the required `path` field.
pub fn load_document(root: &Path, file: &str) -> LegacyResult<LegacyDocument> {
    let content = fs::read_to_string(root.join(file)).map_err(|e| LegacyError::Malformed {
        file: file.to_string(),
        reason: format!("failed to read: {}", e),
    })?;

    let raw: RawDocument = serde_json::from_str(&content).map_err(|e| LegacyError::Malformed {
        file: file.to_string(),
        reason: format!("invalid JSON: {}", e),
    })?;

    Ok(LegacyDocument {
        path: raw.path,
        is_child: raw.is_child,
        children: raw.children.into_iter().map(|c| c.resource.path).collect(),
        redirect_target: raw.redirection.map(|r| r.target),
        file: file.to_string(),
    })
}
