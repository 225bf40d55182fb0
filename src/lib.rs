//! objdir - portable object-directory validation and storage-encoding selection
//!
//! A saved object is a tree of nodes on disk, each carrying a JSON metadata
//! document (see FORMAT.md). This crate proves such a tree is internally
//! consistent and decodable, independently of any in-memory object model:
//!
//! - `validate` walks the current directory format, dispatching per-type
//!   handlers from an injectable registry
//! - `legacy` checks the older single-index metadata graph
//! - `registry` holds the per-type `validate`/`height`/`dimensions` handlers
//!   plus interface and derivation declarations
//! - `encoding` picks the smallest exact storage container for a collection
//!   and, when values are missing, an unused sentinel
//! - `metadata` reads and writes the node metadata documents themselves

pub mod encoding;
pub mod legacy;
pub mod metadata;
pub mod registry;
pub mod validate;
