//! Read-only preview projection of a grid.
//!
//! The preview collaborator renders the template as the finished document
//! will look: rows in ascending order, each pairing the placed instances
//! with their resolved module definitions. An instance whose `module_id`
//! no longer resolves (the module was deleted after the template was
//! saved) is kept as an explicit "module not found" placeholder; it still
//! occupies its cell and can still be removed or moved.

use tessera_core::{
    catalog::ModuleCatalog,
    instance::ModuleInstance,
    module::{ModuleDefinition, ModuleKind},
};

use crate::reindex::row_groups;

/// One instance paired with its resolved definition, if any.
#[derive(Debug, Clone)]
pub struct PreviewEntry<'a> {
    instance: &'a ModuleInstance,
    definition: Option<&'a ModuleDefinition>,
}

impl<'a> PreviewEntry<'a> {
    /// Returns the placed instance.
    pub fn instance(&self) -> &'a ModuleInstance {
        self.instance
    }

    /// Returns the resolved definition, or `None` for a stale module id.
    pub fn definition(&self) -> Option<&'a ModuleDefinition> {
        self.definition
    }

    /// Returns `true` when the module id no longer resolves.
    pub fn is_missing(&self) -> bool {
        self.definition.is_none()
    }

    /// Returns the label to render on the tile: the user's custom name
    /// when set, otherwise the definition name, otherwise the raw module
    /// id of the missing module.
    pub fn display_name(&self) -> &'a str {
        self.instance
            .custom_name()
            .or_else(|| self.definition.map(|d| d.name()))
            .unwrap_or_else(|| self.instance.module_id())
    }
}

/// One rendered row of the preview.
#[derive(Debug, Clone)]
pub struct PreviewRow<'a> {
    row_index: usize,
    entries: Vec<PreviewEntry<'a>>,
}

impl<'a> PreviewRow<'a> {
    /// Returns the grid row index this row came from.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// Returns the row's entries, columns ascending.
    pub fn entries(&self) -> &[PreviewEntry<'a>] {
        &self.entries
    }
}

/// Projects an instance list into preview rows, resolving each module
/// against the catalog for the given kind.
pub fn project<'a>(
    instances: &'a [ModuleInstance],
    catalog: &'a dyn ModuleCatalog,
    kind: ModuleKind,
) -> Vec<PreviewRow<'a>> {
    row_groups(instances)
        .into_iter()
        .map(|members| {
            let row_index = instances[members[0]].row_index();
            let entries = members
                .into_iter()
                .map(|index| {
                    let instance = &instances[index];
                    PreviewEntry {
                        instance,
                        definition: catalog.resolve(instance.module_id(), kind),
                    }
                })
                .collect();
            PreviewRow { row_index, entries }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use tessera_core::{catalog::InMemoryCatalog, instance::InstanceId};

    use super::*;

    fn catalog() -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        catalog.register(ModuleKind::Wps, ModuleDefinition::new("gas", "Shielding Gas", "Gas"));
        catalog
    }

    fn instance(id: &str, module: &str, row: usize, column: usize) -> ModuleInstance {
        ModuleInstance::new(InstanceId::from_raw(id), module, row, column)
    }

    #[test]
    fn test_project_groups_rows_ascending() {
        let catalog = catalog();
        let instances = vec![
            instance("c", "gas", 2, 0),
            instance("a", "gas", 0, 0),
            instance("b", "gas", 0, 1),
        ];

        let rows = project(&instances, &catalog, ModuleKind::Wps);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_index(), 0);
        assert_eq!(rows[0].entries().len(), 2);
        assert_eq!(rows[1].row_index(), 2);
        assert_eq!(rows[0].entries()[0].display_name(), "Shielding Gas");
    }

    #[test]
    fn test_stale_module_becomes_placeholder() {
        let catalog = catalog();
        let instances = vec![instance("a", "deleted_module", 0, 0)];

        let rows = project(&instances, &catalog, ModuleKind::Wps);

        let entry = &rows[0].entries()[0];
        assert!(entry.is_missing());
        assert_eq!(entry.display_name(), "deleted_module");
    }

    #[test]
    fn test_custom_name_wins_over_definition_name() {
        let catalog = catalog();
        let instances =
            vec![instance("a", "gas", 0, 0).with_custom_name("Root shielding")];

        let rows = project(&instances, &catalog, ModuleKind::Wps);

        assert_eq!(rows[0].entries()[0].display_name(), "Root shielding");
    }

    #[test]
    fn test_kind_mismatch_is_missing() {
        let catalog = catalog();
        let instances = vec![instance("a", "gas", 0, 0)];

        let rows = project(&instances, &catalog, ModuleKind::Pqr);

        assert!(rows[0].entries()[0].is_missing());
    }
}
