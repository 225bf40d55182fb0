//! Handler signatures and registration policies
//!
//! Handlers receive the node's directory and its metadata document, plus the
//! calling [`Validator`](crate::validate::Validator) so they can recurse
//! into sub-paths. They are stored behind `Arc` so a lookup hands back a
//! clone that stays callable across concurrent re-registration.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::validate::{ValidateResult, Validator};

/// A registered `validate` function.
pub type ValidateFn = dyn Fn(&Path, &Value, &Validator<'_>) -> ValidateResult<()> + Send + Sync;

/// A registered `height` function, reporting a node's primary extent.
pub type HeightFn = dyn Fn(&Path, &Value, &Validator<'_>) -> ValidateResult<u64> + Send + Sync;

/// A registered `dimensions` function, reporting all of a node's extents.
pub type DimensionsFn =
    dyn Fn(&Path, &Value, &Validator<'_>) -> ValidateResult<Vec<u64>> + Send + Sync;

/// Shared handle to a `validate` function.
pub type ValidateHandler = Arc<ValidateFn>;

/// Shared handle to a `height` function.
pub type HeightHandler = Arc<HeightFn>;

/// Shared handle to a `dimensions` function.
pub type DimensionsHandler = Arc<DimensionsFn>;

/// What a registration does when a handler already exists for the tag.
///
/// Registering `None` removes the entry regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Leave the existing handler in place; the new one is dropped.
    KeepExisting,
    /// Replace the existing handler with the new one.
    Replace,
    /// Fail with `RegistryError::Conflict`, leaving the registry untouched.
    ErrorOnConflict,
}

/// The capability a registration or lookup addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Validate,
    Height,
    Dimensions,
}

impl Capability {
    /// Returns the capability name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Validate => "validate",
            Capability::Height => "height",
            Capability::Dimensions => "dimensions",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
