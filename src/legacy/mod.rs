//! Legacy metadata-graph validator
//!
//! Per FORMAT.md §3, the older layout annotates every node's data path `p`
//! with a JSON document at `p.json`; parents list their children explicitly
//! inside their own document instead of each child validating itself. The
//! validator loads every document under the root into one index keyed by
//! declared path and proves the whole graph is consistent: references,
//! `is_child` flags, nesting, redirections, and file accounting.
//!
//! First violation wins; there is no aggregate report.

mod document;
mod errors;
mod graph;

pub use document::{load_document, LegacyDocument};
pub use errors::{LegacyError, LegacyResult};
pub use graph::validate_legacy_tree;
