//! # Serialized Field State
//!
//! Per-node key/value store for reference-typed fields, mirroring how the
//! editor serializes them. Binding reads a field's current value to decide
//! whether it needs resolving and writes resolved values back here; the
//! on-disk format itself lives with the scene serializer, not in this crate.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// 1. AssetRef
// ============================================================================

/// Stable identifier for an entry in the asset catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef(pub Uuid);

impl AssetRef {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssetRef {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// 2. FieldValue
// ============================================================================

/// Value of a reference-typed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Single reference to a node carrying the field's component class
    Object(Option<Entity>),
    /// Ordered collection of node references, synchronized (not replaced)
    /// by plural bind sources
    ObjectList(Vec<Entity>),
    /// Reference to a prefab asset
    Asset(Option<AssetRef>),
}

impl FieldValue {
    /// An empty field is what triggers a resolution attempt on redraw.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Object(value) => value.is_none(),
            FieldValue::ObjectList(list) => list.is_empty(),
            FieldValue::Asset(value) => value.is_none(),
        }
    }
}

// ============================================================================
// 3. Fields component
// ============================================================================

/// Serialized reference-field state of one node.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fields {
    pub values: HashMap<String, FieldValue>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    /// A missing field counts as empty: nothing has been bound to it yet.
    pub fn is_field_empty(&self, name: &str) -> bool {
        self.values.get(name).map(FieldValue::is_empty).unwrap_or(true)
    }
}
