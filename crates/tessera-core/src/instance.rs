//! Placed module instances and their identities.
//!
//! A [`ModuleInstance`] is one occurrence of a module definition placed on
//! the template canvas, carrying its grid coordinates and row-major rank.
//! Its serde representation is the persisted wire shape consumed by the
//! external save/load collaborators:
//!
//! ```json
//! { "instanceId": "mi-1c9a40f2e3b8", "moduleId": "shielding_gas",
//!   "order": 2, "rowIndex": 0, "columnIndex": 1, "customName": "Root gas" }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a placed module instance.
///
/// Generated once at creation and immutable for the instance's lifetime, so
/// reordering never re-keys consumers (UI list identity, persistence
/// diffing). Serialized as a plain string.
///
/// # Examples
///
/// ```
/// use tessera_core::instance::InstanceId;
///
/// let a = InstanceId::generate();
/// let b = InstanceId::generate();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Generates a fresh, globally unique instance id.
    ///
    /// The id is a `mi-` prefixed random 96-bit hex payload; collisions are
    /// additionally guarded against by the grid on creation.
    pub fn generate() -> Self {
        let payload: u128 = rand::random();
        Self(format!("mi-{:024x}", payload & ((1 << 96) - 1)))
    }

    /// Wraps an externally supplied id, e.g. from a loaded template.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placed, uniquely identified occurrence of a module definition.
///
/// Coordinates are zero-based; `order` is the one-based global row-major
/// rank (row ascending, then column ascending) recomputed after every
/// structural change. `order` exists for external consumers that want a
/// flat ordering and is never used for identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInstance {
    /// Globally unique, immutable identity.
    instance_id: InstanceId,

    /// Foreign key into the module catalog; not unique within the grid.
    module_id: String,

    /// Global row-major rank, starting at 1.
    order: usize,

    /// Zero-based row position.
    row_index: usize,

    /// Zero-based column position within the row.
    column_index: usize,

    /// Optional user-supplied label; no effect on identity or placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_name: Option<String>,
}

impl ModuleInstance {
    /// Creates a new instance of the given module at the given coordinates.
    ///
    /// `order` starts at 0 and is assigned by the next renumbering pass.
    pub fn new(instance_id: InstanceId, module_id: impl Into<String>, row_index: usize, column_index: usize) -> Self {
        Self {
            instance_id,
            module_id: module_id.into(),
            order: 0,
            row_index,
            column_index,
            custom_name: None,
        }
    }

    /// Returns the instance identity.
    pub fn instance_id(&self) -> &InstanceId {
        &self.instance_id
    }

    /// Returns the referenced module id.
    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// Returns the global row-major rank.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the zero-based row position.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// Returns the zero-based column position within the row.
    pub fn column_index(&self) -> usize {
        self.column_index
    }

    /// Returns the user-supplied label, if any.
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    /// Sets the user-supplied label. `None` clears it.
    pub fn set_custom_name(&mut self, name: Option<String>) {
        self.custom_name = name;
    }

    /// Sets the custom name (builder style).
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    /// Reassigns the grid coordinates. Used only by the grid's
    /// renumbering passes; coordinates are otherwise immutable.
    pub fn set_position(&mut self, row_index: usize, column_index: usize) {
        self.row_index = row_index;
        self.column_index = column_index;
    }

    /// Reassigns the global row-major rank.
    pub fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_and_prefixed() {
        let ids: Vec<InstanceId> = (0..64).map(|_| InstanceId::generate()).collect();
        for id in &ids {
            assert!(id.as_str().starts_with("mi-"));
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_wire_shape_camel_case() {
        let instance = ModuleInstance::new(InstanceId::from_raw("mi-1"), "base_metal", 2, 1)
            .with_custom_name("Backing");

        let json = serde_json::to_value(&instance).unwrap();
        assert_eq!(json["instanceId"], "mi-1");
        assert_eq!(json["moduleId"], "base_metal");
        assert_eq!(json["rowIndex"], 2);
        assert_eq!(json["columnIndex"], 1);
        assert_eq!(json["customName"], "Backing");
    }

    #[test]
    fn test_wire_shape_omits_unset_custom_name() {
        let instance = ModuleInstance::new(InstanceId::from_raw("mi-1"), "base_metal", 0, 0);

        let json = serde_json::to_value(&instance).unwrap();
        assert!(json.get("customName").is_none());
    }

    #[test]
    fn test_wire_shape_round_trip() {
        let json = r#"{
            "instanceId": "mi-abc",
            "moduleId": "joint_design",
            "order": 3,
            "rowIndex": 1,
            "columnIndex": 2
        }"#;

        let instance: ModuleInstance = serde_json::from_str(json).unwrap();
        assert_eq!(instance.instance_id().as_str(), "mi-abc");
        assert_eq!(instance.order(), 3);
        assert_eq!(instance.custom_name(), None);
    }
}
