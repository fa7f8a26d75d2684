//! The module catalog lookup boundary.
//!
//! The layout engine consumes module definitions through the read-only
//! [`ModuleCatalog`] trait and never mutates the catalog. A definition may
//! legitimately be absent (a module referenced by a stored template can
//! have been deleted since), so `resolve` returns an `Option` and callers
//! must tolerate `None` by degrading gracefully ("module not found")
//! rather than failing.

use indexmap::IndexMap;

use crate::module::{ModuleDefinition, ModuleKind};

/// Read-only lookup of module definitions by `(module_id, kind)`.
///
/// Implemented by the external module catalog (static presets plus
/// user-defined modules). Test harnesses implement it with a handful of
/// fixture definitions.
pub trait ModuleCatalog {
    /// Resolves a module definition, or `None` if no definition with this
    /// id exists for the given kind.
    fn resolve(&self, module_id: &str, kind: ModuleKind) -> Option<&ModuleDefinition>;
}

/// An insertion-ordered, in-memory [`ModuleCatalog`].
///
/// # Examples
///
/// ```
/// use tessera_core::catalog::{InMemoryCatalog, ModuleCatalog};
/// use tessera_core::module::{ModuleDefinition, ModuleKind};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.register(ModuleKind::Wps, ModuleDefinition::new("gas", "Shielding Gas", "Gas"));
///
/// assert!(catalog.resolve("gas", ModuleKind::Wps).is_some());
/// assert!(catalog.resolve("gas", ModuleKind::Pqr).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    modules: IndexMap<(ModuleKind, String), ModuleDefinition>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition for the given kind.
    ///
    /// Re-registering an existing `(kind, id)` pair replaces the stored
    /// definition in place.
    pub fn register(&mut self, kind: ModuleKind, definition: ModuleDefinition) {
        self.modules
            .insert((kind, definition.id().to_string()), definition);
    }

    /// Iterates the definitions registered for `kind` in insertion order.
    pub fn iter_kind(&self, kind: ModuleKind) -> impl Iterator<Item = &ModuleDefinition> {
        self.modules
            .iter()
            .filter(move |((k, _), _)| *k == kind)
            .map(|(_, def)| def)
    }

    /// Returns the total number of registered definitions across kinds.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleCatalog for InMemoryCatalog {
    fn resolve(&self, module_id: &str, kind: ModuleKind) -> Option<&ModuleDefinition> {
        self.modules.get(&(kind, module_id.to_string()))
    }
}
