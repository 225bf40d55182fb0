//! The object-directory validator
//!
//! Per FORMAT.md §2: resolve the node's `type`, dispatch the registered
//! `validate` handler, let the handler recurse via [`Validator::validate_subpath`],
//! and answer extent and interface questions on demand. Recursion depth is
//! bounded because tree depth is data-driven. File handles are scoped to one
//! node's step; nothing stays open across siblings.

use std::cell::Cell;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, trace};

use crate::metadata;
use crate::registry::TypeRegistry;

use super::errors::{ValidateError, ValidateResult};

/// Tunables for a validation pass.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorOptions {
    /// Maximum nesting depth a handler-driven walk may reach.
    pub max_depth: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Walks a saved object's directory tree, dispatching per-type handlers
/// from the borrowed registry.
///
/// A `Validator` is cheap, single-threaded state for one invocation;
/// independent validations of different roots run on separate instances.
pub struct Validator<'r> {
    registry: &'r TypeRegistry,
    options: ValidatorOptions,
    depth: Cell<usize>,
}

impl<'r> Validator<'r> {
    /// Creates a validator with default options.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_options(registry, ValidatorOptions::default())
    }

    /// Creates a validator with explicit options.
    pub fn with_options(registry: &'r TypeRegistry, options: ValidatorOptions) -> Self {
        Self {
            registry,
            options,
            depth: Cell::new(0),
        }
    }

    /// Returns the backing registry, for handlers that need direct queries.
    pub fn registry(&self) -> &TypeRegistry {
        self.registry
    }

    /// Validates the object rooted at `node_dir`.
    ///
    /// Resolves the node's metadata, dispatches its `validate` handler, and
    /// fails on the first violation anywhere in the tree.
    pub fn validate(&self, node_dir: &Path) -> ValidateResult<()> {
        self.validate_node(node_dir)
    }

    /// Validates a nested object on behalf of its parent's handler.
    ///
    /// This is the re-entry point handlers call for each child they know
    /// about; it enforces the depth bound and then runs the same
    /// resolve-and-dispatch cycle as [`Validator::validate`].
    pub fn validate_subpath(&self, node_dir: &Path) -> ValidateResult<()> {
        let depth = self.depth.get() + 1;
        if depth > self.options.max_depth {
            return Err(ValidateError::DepthExceeded {
                path: node_dir.to_path_buf(),
                max_depth: self.options.max_depth,
            });
        }

        self.depth.set(depth);
        let result = self.validate_node(node_dir);
        self.depth.set(depth - 1);
        result
    }

    fn validate_node(&self, node_dir: &Path) -> ValidateResult<()> {
        let document = metadata::read_document(node_dir)?;
        let tag = metadata::type_tag(&document, node_dir)?;
        let handler = self.registry.validate_handler(tag)?;

        debug!(path = %node_dir.display(), r#type = tag, depth = self.depth.get(), "validating object");
        handler(node_dir, &document, self)
    }

    /// Reports the node's primary extent via its registered `height` handler.
    ///
    /// Absence of the handler is a hard error distinct from validation
    /// failure; enclosing structures call this when a declared extent needs
    /// confirmation.
    pub fn height(&self, node_dir: &Path) -> ValidateResult<u64> {
        let document = metadata::read_document(node_dir)?;
        let tag = metadata::type_tag(&document, node_dir)?;
        let handler = self.registry.height_handler(tag)?;

        trace!(path = %node_dir.display(), r#type = tag, "measuring height");
        handler(node_dir, &document, self)
    }

    /// Reports all of the node's extents via its registered `dimensions`
    /// handler.
    pub fn dimensions(&self, node_dir: &Path) -> ValidateResult<Vec<u64>> {
        let document = metadata::read_document(node_dir)?;
        let tag = metadata::type_tag(&document, node_dir)?;
        let handler = self.registry.dimensions_handler(tag)?;

        trace!(path = %node_dir.display(), r#type = tag, "measuring dimensions");
        handler(node_dir, &document, self)
    }

    /// Confirms a nested node's height matches a declared value.
    pub fn check_height(&self, node_dir: &Path, declared: u64) -> ValidateResult<()> {
        let measured = self.height(node_dir)?;
        if measured != declared {
            return Err(ValidateError::ExtentMismatch {
                path: node_dir.to_path_buf(),
                extent: "height",
                declared: declared.to_string(),
                measured: measured.to_string(),
            });
        }
        Ok(())
    }

    /// Confirms a nested node's dimensions match declared values.
    pub fn check_dimensions(&self, node_dir: &Path, declared: &[u64]) -> ValidateResult<()> {
        let measured = self.dimensions(node_dir)?;
        if measured != declared {
            return Err(ValidateError::ExtentMismatch {
                path: node_dir.to_path_buf(),
                extent: "dimensions",
                declared: format!("{:?}", declared),
                measured: format!("{:?}", measured),
            });
        }
        Ok(())
    }

    /// Confirms the node's type satisfies a named interface.
    ///
    /// Answered purely from registry membership (including derivation
    /// inheritance); the node's own `validate` handler is not re-run.
    pub fn check_interface(&self, node_dir: &Path, interface: &str) -> ValidateResult<()> {
        let document = metadata::read_document(node_dir)?;
        let tag = metadata::type_tag(&document, node_dir)?;

        if !self.registry.satisfies_interface(tag, interface) {
            return Err(ValidateError::InterfaceNotSatisfied {
                path: node_dir.to_path_buf(),
                tag: tag.to_string(),
                interface: interface.to_string(),
            });
        }
        Ok(())
    }

    /// Reads a node's metadata without dispatching any handler.
    ///
    /// Handlers use this to inspect a child's document (for example its
    /// `type` or `is_child` field) before deciding how to recurse.
    pub fn read_metadata(&self, node_dir: &Path) -> ValidateResult<Value> {
        Ok(metadata::read_document(node_dir)?)
    }
}
