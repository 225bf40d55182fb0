//! Node metadata documents for the current object-directory format
//!
//! Per FORMAT.md §2.1, every node directory carries a single JSON object in
//! a file named `OBJECT.json`:
//!
//! - `type` (string, required) names the handler family for the node
//! - `is_child` (bool, optional) marks nodes owned by an enclosing object
//! - all other fields are handler-specific and opaque to the core
//!
//! Absence of an *optional* auxiliary document is not an error; call sites
//! use [`read_optional_document`] to treat it as "feature absent."

mod document;
mod errors;

pub use document::{
    document_path, is_child, read_document, read_optional_document, type_tag, write_document,
    OBJECT_FILE,
};
pub use errors::{MetadataError, MetadataResult};
