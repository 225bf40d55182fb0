//! The capability registry itself
//!
//! Three capability maps and two relation stores share one tag key space
//! behind a single `RwLock`: conflict-policy evaluation happens under the
//! same writer lock as the mutation, and lookups clone the `Arc`'d handler
//! under the read lock, so a concurrent lookup observes either the old or
//! the new handler, never a half-updated entry.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::entry::{
    Capability, ConflictPolicy, DimensionsHandler, HeightHandler, ValidateHandler,
};
use super::errors::{RegistryError, RegistryResult};

#[derive(Default)]
struct Tables {
    validate: HashMap<String, ValidateHandler>,
    height: HashMap<String, HeightHandler>,
    dimensions: HashMap<String, DimensionsHandler>,
    interfaces: HashMap<String, HashSet<String>>,
    derivations: HashMap<String, HashSet<String>>,
}

impl Tables {
    /// Whether the tag appears anywhere in the registry.
    fn knows(&self, tag: &str) -> bool {
        self.validate.contains_key(tag)
            || self.height.contains_key(tag)
            || self.dimensions.contains_key(tag)
            || self.interfaces.contains_key(tag)
            || self.derivations.contains_key(tag)
            || self.derivations.values().any(|bases| bases.contains(tag))
    }

    /// Whether a derivation path of one or more edges leads from `from` to `to`.
    fn reaches(&self, from: &str, to: &str) -> bool {
        let mut stack: Vec<&str> = match self.derivations.get(from) {
            Some(bases) => bases.iter().map(String::as_str).collect(),
            None => return false,
        };
        let mut seen: HashSet<&str> = HashSet::new();

        while let Some(tag) = stack.pop() {
            if tag == to {
                return true;
            }
            if seen.insert(tag) {
                if let Some(bases) = self.derivations.get(tag) {
                    stack.extend(bases.iter().map(String::as_str));
                }
            }
        }
        false
    }
}

/// Injectable registry of per-type capabilities and relations.
///
/// Safe to share across threads; see the module docs for the locking
/// discipline.
#[derive(Default)]
pub struct TypeRegistry {
    tables: RwLock<Tables>,
}

/// Applies one registration to one capability map under the write lock.
fn apply<H>(
    map: &mut HashMap<String, H>,
    tag: &str,
    handler: Option<H>,
    policy: ConflictPolicy,
    capability: Capability,
) -> RegistryResult<()> {
    let Some(handler) = handler else {
        map.remove(tag);
        return Ok(());
    };

    if map.contains_key(tag) {
        match policy {
            ConflictPolicy::KeepExisting => return Ok(()),
            ConflictPolicy::Replace => {}
            ConflictPolicy::ErrorOnConflict => {
                return Err(RegistryError::Conflict {
                    tag: tag.to_string(),
                    capability,
                })
            }
        }
    }

    map.insert(tag.to_string(), handler);
    Ok(())
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RegistryResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| RegistryError::Internal("registry lock poisoned".into()))
    }

    fn write(&self) -> RegistryResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| RegistryError::Internal("registry lock poisoned".into()))
    }

    /// Registers, replaces, or removes the `validate` handler for a tag.
    ///
    /// The policy only matters when a handler already exists; `None` always
    /// removes the entry.
    pub fn register_validate(
        &self,
        tag: &str,
        handler: Option<ValidateHandler>,
        policy: ConflictPolicy,
    ) -> RegistryResult<()> {
        let mut tables = self.write()?;
        apply(&mut tables.validate, tag, handler, policy, Capability::Validate)
    }

    /// Registers, replaces, or removes the `height` handler for a tag.
    pub fn register_height(
        &self,
        tag: &str,
        handler: Option<HeightHandler>,
        policy: ConflictPolicy,
    ) -> RegistryResult<()> {
        let mut tables = self.write()?;
        apply(&mut tables.height, tag, handler, policy, Capability::Height)
    }

    /// Registers, replaces, or removes the `dimensions` handler for a tag.
    pub fn register_dimensions(
        &self,
        tag: &str,
        handler: Option<DimensionsHandler>,
        policy: ConflictPolicy,
    ) -> RegistryResult<()> {
        let mut tables = self.write()?;
        apply(
            &mut tables.dimensions,
            tag,
            handler,
            policy,
            Capability::Dimensions,
        )
    }

    /// Looks up the `validate` handler for a tag.
    ///
    /// # Errors
    ///
    /// `UnknownType` if the tag appears nowhere in the registry;
    /// `UnregisteredCapability` if the tag is known but has no `validate`
    /// handler.
    pub fn validate_handler(&self, tag: &str) -> RegistryResult<ValidateHandler> {
        let tables = self.read()?;
        match tables.validate.get(tag) {
            Some(handler) => Ok(handler.clone()),
            None => Err(self.missing(&tables, tag, Capability::Validate)),
        }
    }

    /// Looks up the `height` handler for a tag.
    pub fn height_handler(&self, tag: &str) -> RegistryResult<HeightHandler> {
        let tables = self.read()?;
        match tables.height.get(tag) {
            Some(handler) => Ok(handler.clone()),
            None => Err(self.missing(&tables, tag, Capability::Height)),
        }
    }

    /// Looks up the `dimensions` handler for a tag.
    pub fn dimensions_handler(&self, tag: &str) -> RegistryResult<DimensionsHandler> {
        let tables = self.read()?;
        match tables.dimensions.get(tag) {
            Some(handler) => Ok(handler.clone()),
            None => Err(self.missing(&tables, tag, Capability::Dimensions)),
        }
    }

    fn missing(&self, tables: &Tables, tag: &str, capability: Capability) -> RegistryError {
        if tables.knows(tag) {
            RegistryError::UnregisteredCapability {
                tag: tag.to_string(),
                capability,
            }
        } else {
            RegistryError::UnknownType {
                tag: tag.to_string(),
            }
        }
    }

    /// Whether the tag appears anywhere in the registry.
    pub fn has_type(&self, tag: &str) -> bool {
        self.read().map(|t| t.knows(tag)).unwrap_or(false)
    }

    /// Declares that a tag satisfies a named interface.
    pub fn declare_interface(&self, tag: &str, interface: &str) -> RegistryResult<()> {
        let mut tables = self.write()?;
        tables
            .interfaces
            .entry(tag.to_string())
            .or_default()
            .insert(interface.to_string());
        Ok(())
    }

    /// Revokes a tag's own declaration of an interface.
    ///
    /// Declarations inherited through derivation are unaffected.
    pub fn revoke_interface(&self, tag: &str, interface: &str) -> RegistryResult<()> {
        let mut tables = self.write()?;
        if let Some(set) = tables.interfaces.get_mut(tag) {
            set.remove(interface);
            if set.is_empty() {
                tables.interfaces.remove(tag);
            }
        }
        Ok(())
    }

    /// Whether the tag satisfies an interface, directly or through any
    /// transitive derivation base.
    pub fn satisfies_interface(&self, tag: &str, interface: &str) -> bool {
        let Ok(tables) = self.read() else {
            return false;
        };

        let mut stack = vec![tag];
        let mut seen: HashSet<&str> = HashSet::new();

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if tables
                .interfaces
                .get(current)
                .is_some_and(|set| set.contains(interface))
            {
                return true;
            }
            if let Some(bases) = tables.derivations.get(current) {
                stack.extend(bases.iter().map(String::as_str));
            }
        }
        false
    }

    /// Declares that `tag` derives from `base`.
    ///
    /// # Errors
    ///
    /// `DerivationCycle` if the edge would close a cycle (including
    /// `tag == base`); the edge is not inserted.
    pub fn declare_derivation(&self, tag: &str, base: &str) -> RegistryResult<()> {
        let mut tables = self.write()?;
        if tag == base || tables.reaches(base, tag) {
            return Err(RegistryError::DerivationCycle {
                tag: tag.to_string(),
                base: base.to_string(),
            });
        }
        tables
            .derivations
            .entry(tag.to_string())
            .or_default()
            .insert(base.to_string());
        Ok(())
    }

    /// Whether `tag` transitively derives from `base`.
    pub fn derives_from(&self, tag: &str, base: &str) -> bool {
        self.read().map(|t| t.reaches(tag, base)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use serde_json::json;

    use crate::validate::Validator;

    fn height_handler(value: u64) -> HeightHandler {
        Arc::new(move |_, _, _| Ok(value))
    }

    fn call_height(registry: &TypeRegistry, tag: &str) -> u64 {
        let handler = registry.height_handler(tag).unwrap();
        let validator = Validator::new(registry);
        handler(Path::new("x"), &json!({}), &validator).unwrap()
    }

    #[test]
    fn test_register_and_look_up() {
        let registry = TypeRegistry::new();
        registry
            .register_height("atomic_vector", Some(height_handler(7)), ConflictPolicy::Replace)
            .unwrap();

        assert_eq!(call_height(&registry, "atomic_vector"), 7);
    }

    #[test]
    fn test_keep_existing_leaves_original_observable() {
        let registry = TypeRegistry::new();
        registry
            .register_height("x", Some(height_handler(1)), ConflictPolicy::Replace)
            .unwrap();
        registry
            .register_height("x", Some(height_handler(2)), ConflictPolicy::KeepExisting)
            .unwrap();

        assert_eq!(call_height(&registry, "x"), 1);
    }

    #[test]
    fn test_replace_swaps_handler() {
        let registry = TypeRegistry::new();
        registry
            .register_height("x", Some(height_handler(1)), ConflictPolicy::Replace)
            .unwrap();
        registry
            .register_height("x", Some(height_handler(2)), ConflictPolicy::Replace)
            .unwrap();

        assert_eq!(call_height(&registry, "x"), 2);
    }

    #[test]
    fn test_error_on_conflict_leaves_registry_untouched() {
        let registry = TypeRegistry::new();
        registry
            .register_height("x", Some(height_handler(1)), ConflictPolicy::Replace)
            .unwrap();

        let result =
            registry.register_height("x", Some(height_handler(2)), ConflictPolicy::ErrorOnConflict);
        assert!(matches!(result, Err(RegistryError::Conflict { .. })));

        assert_eq!(call_height(&registry, "x"), 1);
    }

    #[test]
    fn test_none_removes_under_any_policy() {
        let registry = TypeRegistry::new();
        registry
            .register_height("x", Some(height_handler(1)), ConflictPolicy::Replace)
            .unwrap();
        registry
            .register_height("x", None, ConflictPolicy::ErrorOnConflict)
            .unwrap();

        let err = registry.height_handler("x").err().unwrap();
        assert!(matches!(err, RegistryError::UnknownType { .. }));
    }

    #[test]
    fn test_unknown_type_vs_unregistered_capability() {
        let registry = TypeRegistry::new();
        registry
            .register_validate("known", Some(Arc::new(|_, _, _| Ok(()))), ConflictPolicy::Replace)
            .unwrap();

        let err = registry.height_handler("known").err().unwrap();
        assert!(matches!(err, RegistryError::UnregisteredCapability { .. }));

        let err = registry.height_handler("never_seen").err().unwrap();
        assert!(matches!(err, RegistryError::UnknownType { .. }));
    }

    #[test]
    fn test_capabilities_are_independent() {
        let registry = TypeRegistry::new();
        registry
            .register_height("x", Some(height_handler(3)), ConflictPolicy::Replace)
            .unwrap();

        // A height registration neither creates nor disturbs validate
        assert!(registry.validate_handler("x").is_err());
        assert_eq!(call_height(&registry, "x"), 3);
    }

    #[test]
    fn test_interface_membership() {
        let registry = TypeRegistry::new();
        registry.declare_interface("data_frame", "keyed_collection").unwrap();

        assert!(registry.satisfies_interface("data_frame", "keyed_collection"));
        assert!(!registry.satisfies_interface("data_frame", "matrix_like"));

        registry.revoke_interface("data_frame", "keyed_collection").unwrap();
        assert!(!registry.satisfies_interface("data_frame", "keyed_collection"));
    }

    #[test]
    fn test_interfaces_inherited_through_derivation() {
        let registry = TypeRegistry::new();
        registry.declare_interface("base_frame", "keyed_collection").unwrap();
        registry.declare_derivation("ranged_frame", "base_frame").unwrap();
        registry.declare_derivation("genomic_frame", "ranged_frame").unwrap();

        assert!(registry.satisfies_interface("genomic_frame", "keyed_collection"));
        assert!(registry.derives_from("genomic_frame", "base_frame"));
        assert!(!registry.derives_from("base_frame", "genomic_frame"));
    }

    #[test]
    fn test_derivation_cycle_rejected() {
        let registry = TypeRegistry::new();
        registry.declare_derivation("b", "a").unwrap();
        registry.declare_derivation("c", "b").unwrap();

        let err = registry.declare_derivation("a", "c").unwrap_err();
        assert!(matches!(err, RegistryError::DerivationCycle { .. }));

        // The rejected edge was not inserted
        assert!(!registry.derives_from("a", "c"));

        let err = registry.declare_derivation("a", "a").unwrap_err();
        assert!(matches!(err, RegistryError::DerivationCycle { .. }));
    }

    #[test]
    fn test_relations_make_a_tag_known() {
        let registry = TypeRegistry::new();
        registry.declare_derivation("derived", "base").unwrap();

        // Both ends of the edge are known tags, so lookups report the
        // missing capability rather than an unknown type
        let err = registry.validate_handler("derived").err().unwrap();
        assert!(matches!(err, RegistryError::UnregisteredCapability { .. }));
        let err = registry.validate_handler("base").err().unwrap();
        assert!(matches!(err, RegistryError::UnregisteredCapability { .. }));
    }

    #[test]
    fn test_concurrent_registration_and_lookup() {
        let registry = Arc::new(TypeRegistry::new());
        registry
            .register_height("x", Some(height_handler(1)), ConflictPolicy::Replace)
            .unwrap();

        let writer = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for i in 0..100u64 {
                    registry
                        .register_height("x", Some(height_handler(i)), ConflictPolicy::Replace)
                        .unwrap();
                }
            })
        };

        // Lookups always observe a complete handler
        for _ in 0..100 {
            let handler = registry.height_handler("x").unwrap();
            let validator = Validator::new(&registry);
            assert!(handler(Path::new("x"), &json!({}), &validator).is_ok());
        }

        writer.join().unwrap();
    }
}
