//! # Bind Sources
//!
//! Declarative descriptors attached to reference fields. Each field carries
//! exactly one [`BindSource`], chosen from a closed set of strategies, fixed
//! at declaration time and immutable for the node's lifetime. The source
//! variant alone decides which resolution branch runs.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// 1. BindSource
// ============================================================================

/// How a field's reference should be located in the scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindSource {
    /// Component of the field's class on the owning node itself
    OwnComponent,

    /// First matching component in the owner's subtree. When `child_name`
    /// is set, only that named child (path-style, `/`-separated) is
    /// checked instead of the whole subtree.
    DescendantComponent {
        include_inactive: bool,
        child_name: Option<String>,
    },

    /// All matching components in the owner's subtree (or the named
    /// child's subtree), merged into the ordered collection field named by
    /// `target_field`. A missing target field is a configuration error.
    DescendantComponents {
        include_inactive: bool,
        child_name: Option<String>,
        target_field: Option<String>,
    },

    /// Always attaches a fresh component instance to the owning node
    AddedComponent,

    /// Any instance of the class anywhere in the loaded scene
    AnyInstance,

    /// Component on the owner's immediate parent only
    AncestorComponent,

    /// All matching components in the parent's subtree, merged into
    /// `target_field`. Searches downward from the parent rather than
    /// walking the ancestor chain; kept that way deliberately, see
    /// DESIGN.md.
    AncestorComponents { target_field: Option<String> },

    /// Prefab asset at a project-relative path
    PrefabAsset { path: String },
}

// ============================================================================
// 2. BindDecl / Bindings
// ============================================================================

/// One field's bind declaration: which field, which class, which source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindDecl {
    /// Name of the annotated field in the owner's serialized state
    pub field: String,
    /// Serialized element-type tag, possibly `Ref<...>`-wrapped
    pub class_tag: String,
    pub source: BindSource,
}

impl BindDecl {
    pub fn new(field: impl Into<String>, class_tag: impl Into<String>, source: BindSource) -> Self {
        Self {
            field: field.into(),
            class_tag: class_tag.into(),
            source,
        }
    }
}

/// Bind declarations of one node, at most one per field.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bindings(pub Vec<BindDecl>);

impl Bindings {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, decl: BindDecl) {
        self.0.push(decl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BindDecl> {
        self.0.iter()
    }
}
