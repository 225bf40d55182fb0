//! Storage-encoding selection
//!
//! Per FORMAT.md §4, callers hand over a homogeneous collection with
//! explicit missingness (`Option`-typed elements) and receive the smallest
//! exact container type plus, when values are missing, a placeholder of
//! that container's type guaranteed unused by real data. The caller writes
//! the placeholder into missing slots before persisting and records both in
//! the node's metadata, so readers need no inference.
//!
//! All selection is pure: one or two linear passes (plus a sort for the
//! double-precision bisection fallback) over the in-memory buffer, no
//! shared state.

mod boolean;
mod errors;
mod integer;
mod real;
mod text;
mod types;

pub use boolean::optimize_booleans;
pub use errors::{EncodingError, EncodingResult};
pub use integer::optimize_integers;
pub use real::optimize_reals;
pub use text::optimize_text;
pub use types::{ContainerType, Placeholder, StorageEncoding, TextEncoding};
