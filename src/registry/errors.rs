//! Registry error types

use thiserror::Error;

use super::entry::Capability;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised by registration and lookup.
///
/// `UnknownType` and `UnregisteredCapability` are deliberately distinct: the
/// first means the tag appears nowhere in the registry, the second means the
/// tag is known but this particular capability was never registered.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("a {capability} handler is already registered for type '{tag}'")]
    Conflict { tag: String, capability: Capability },

    #[error("unknown type '{tag}'")]
    UnknownType { tag: String },

    #[error("type '{tag}' has no registered {capability} handler")]
    UnregisteredCapability { tag: String, capability: Capability },

    #[error("declaring that '{tag}' derives from '{base}' would create a cycle")]
    DerivationCycle { tag: String, base: String },

    #[error("internal registry error: {0}")]
    Internal(String),
}
