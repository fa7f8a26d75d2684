//! Module definition types.
//!
//! A module definition is a named, reusable field-schema template (for
//! example "Shielding Gas") that a template author drops onto the canvas.
//! Definitions are owned by an external catalog and are read-only from the
//! engine's point of view; see [`crate::catalog`] for the lookup boundary.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of qualification document a module belongs to.
///
/// A template edits exactly one kind at a time; definitions are looked up
/// by `(module_id, kind)` and switching a template's kind resets its grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Welding Procedure Specification.
    #[default]
    Wps,
    /// Procedure Qualification Record.
    Pqr,
    /// Preliminary Procedure Qualification Record.
    Ppqr,
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleKind::Wps => write!(f, "wps"),
            ModuleKind::Pqr => write!(f, "pqr"),
            ModuleKind::Ppqr => write!(f, "ppqr"),
        }
    }
}

/// The input control a field renders as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldControl {
    /// Free-form single-line text.
    Text,
    /// Numeric entry.
    Number,
    /// Selection from a fixed set of options.
    Select {
        /// The selectable option labels, in display order.
        options: Vec<String>,
    },
    /// Boolean checkbox.
    Checkbox,
    /// Calendar date.
    Date,
}

/// The schema of a single field within a module definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Human-readable field label.
    label: String,

    /// The control this field renders as.
    control: FieldControl,

    /// Whether the field must be filled before the document is complete.
    #[serde(default)]
    required: bool,

    /// Optional measurement unit displayed next to the field (e.g. "mm").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
}

impl FieldSchema {
    /// Creates a new field schema with the given label and control.
    pub fn new(label: impl Into<String>, control: FieldControl) -> Self {
        Self {
            label: label.into(),
            control,
            required: false,
            unit: None,
        }
    }

    /// Marks this field as required (builder style).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the measurement unit for this field (builder style).
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Returns the field label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the field control.
    pub fn control(&self) -> &FieldControl {
        &self.control
    }

    /// Returns `true` if the field is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the measurement unit, if any.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
}

/// A named, typed field-schema template that module instances reference.
///
/// Definitions live in the external module catalog (static presets plus
/// user-defined modules). The layout engine treats them as opaque payloads:
/// placement never depends on a definition's fields, only on its identity
/// and `repeatable` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    /// Stable identifier referenced by placed instances.
    id: String,

    /// Display name shown on the library card and the placed tile.
    name: String,

    /// Grouping category in the module library (e.g. "Process", "Gas").
    category: String,

    /// Whether the same module may be placed more than once.
    #[serde(default)]
    repeatable: bool,

    /// Field schemas keyed by field key, in display order.
    #[serde(default)]
    fields: IndexMap<String, FieldSchema>,
}

impl ModuleDefinition {
    /// Creates a new module definition with no fields.
    ///
    /// # Arguments
    ///
    /// * `id` - Stable identifier for catalog lookup
    /// * `name` - Display name
    /// * `category` - Library grouping category
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            repeatable: false,
            fields: IndexMap::new(),
        }
    }

    /// Marks this definition as repeatable (builder style).
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Adds a field schema under the given key (builder style).
    ///
    /// Re-adding an existing key replaces the schema in place without
    /// changing its position.
    pub fn with_field(mut self, key: impl Into<String>, schema: FieldSchema) -> Self {
        self.fields.insert(key.into(), schema);
        self
    }

    /// Returns the stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the library category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns `true` if the module may be placed more than once.
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// Returns the field schemas keyed by field key, in display order.
    pub fn fields(&self) -> &IndexMap<String, FieldSchema> {
        &self.fields
    }
}
