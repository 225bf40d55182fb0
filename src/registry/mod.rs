//! Capability registry for object types
//!
//! Maps a node's `type` tag to up to three independently registered
//! handlers (`validate`, `height`, `dimensions`) plus two relation stores:
//! interface membership and derivation edges. The registry is an explicitly
//! constructed value injected into validator calls, never a hidden global,
//! so isolated registries can coexist in one process.
//!
//! All mutation goes through registration calls carrying a
//! [`ConflictPolicy`]; policy evaluation is atomic with the mutation itself
//! (one writer lock), so two racing registrations can never both observe
//! "no existing entry."

mod entry;
mod errors;
mod registry;

pub use entry::{
    Capability, ConflictPolicy, DimensionsFn, DimensionsHandler, HeightFn, HeightHandler,
    ValidateFn, ValidateHandler,
};
pub use errors::{RegistryError, RegistryResult};
pub use registry::TypeRegistry;
