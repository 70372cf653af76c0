//! # Scene Lookup
//!
//! The capability boundary between the binding core and the host scene
//! graph. Resolution only ever talks to [`SceneLookup`]; the World-backed
//! implementation below is both the production adapter and the in-memory
//! double the unit tests drive.
//!
//! All reads are pure. `add_component` is the only scene mutation and
//! `load_asset` the only asset-store access.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::classes::SceneNode;
use crate::fields::AssetRef;
use crate::registry::BindClass;

// ============================================================================
// 1. SceneLookup trait
// ============================================================================

/// Scene-graph queries the resolution engine needs, one method per
/// primitive. Implementations decide what "active" and "named child" mean
/// for their host; the World-backed one below follows engine convention.
pub trait SceneLookup {
    /// Component of `class` on `node` itself.
    fn own_component(&self, node: Entity, class: &BindClass) -> Option<Entity>;

    /// First component of `class` in `node`'s subtree (including `node`).
    fn descendant_component(
        &self,
        node: Entity,
        class: &BindClass,
        include_inactive: bool,
    ) -> Option<Entity>;

    /// All components of `class` in `node`'s subtree, depth-first.
    fn descendant_components(
        &self,
        node: Entity,
        class: &BindClass,
        include_inactive: bool,
    ) -> Vec<Entity>;

    /// Child of `node` at a `/`-separated name path. Absence means "stop,
    /// leave the field alone", never an error.
    fn named_child(&self, node: Entity, path: &str) -> Option<Entity>;

    /// Immediate parent, if any.
    fn parent(&self, node: Entity) -> Option<Entity>;

    /// Attach a fresh component of `class` to `node` and return the
    /// reference to it.
    fn add_component(&mut self, node: Entity, class: &BindClass) -> Entity;

    /// Any instance of `class` anywhere in the loaded scene.
    fn any_instance(&mut self, class: &BindClass) -> Option<Entity>;

    /// Prefab asset at a project-relative path. A missing path is a
    /// legitimate transient authoring state, so this is an Option.
    fn load_asset(&self, path: &str) -> Option<AssetRef>;
}

// ============================================================================
// 2. AssetCatalog
// ============================================================================

/// Project-relative asset paths known to the editor session.
#[derive(Resource, Debug, Clone, Default)]
pub struct AssetCatalog {
    entries: HashMap<String, AssetRef>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path, returning its stable reference. Re-registering an
    /// existing path keeps the original reference.
    pub fn register(&mut self, path: impl Into<String>) -> AssetRef {
        *self.entries.entry(path.into()).or_insert_with(AssetRef::new)
    }

    pub fn lookup(&self, path: &str) -> Option<AssetRef> {
        self.entries.get(path).copied()
    }
}

// ============================================================================
// 3. WorldSceneLookup
// ============================================================================

/// [`SceneLookup`] over a Bevy `World` carrying `SceneNode` hierarchies and
/// an [`AssetCatalog`] resource.
pub struct WorldSceneLookup<'w> {
    pub world: &'w mut World,
}

impl<'w> WorldSceneLookup<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }

    /// Nodes without a `SceneNode` are treated as active.
    fn is_active(&self, node: Entity) -> bool {
        self.world
            .get::<SceneNode>(node)
            .map(|n| n.active)
            .unwrap_or(true)
    }

    fn child_by_name(&self, node: Entity, name: &str) -> Option<Entity> {
        let children = self.world.get::<Children>(node)?;
        children.iter().find(|&child| {
            self.world
                .get::<SceneNode>(child)
                .map(|n| n.name == name)
                .unwrap_or(false)
        })
    }

    fn collect_descendants(
        &self,
        node: Entity,
        class: &BindClass,
        include_inactive: bool,
        found: &mut Vec<Entity>,
    ) {
        // An inactive node hides its whole subtree from active-only searches
        if !include_inactive && !self.is_active(node) {
            return;
        }
        if class.is_on(self.world, node) {
            found.push(node);
        }
        if let Some(children) = self.world.get::<Children>(node) {
            let children: Vec<Entity> = children.iter().collect();
            for child in children {
                self.collect_descendants(child, class, include_inactive, found);
            }
        }
    }
}

impl SceneLookup for WorldSceneLookup<'_> {
    fn own_component(&self, node: Entity, class: &BindClass) -> Option<Entity> {
        class.is_on(self.world, node).then_some(node)
    }

    fn descendant_component(
        &self,
        node: Entity,
        class: &BindClass,
        include_inactive: bool,
    ) -> Option<Entity> {
        self.descendant_components(node, class, include_inactive)
            .first()
            .copied()
    }

    fn descendant_components(
        &self,
        node: Entity,
        class: &BindClass,
        include_inactive: bool,
    ) -> Vec<Entity> {
        let mut found = Vec::new();
        self.collect_descendants(node, class, include_inactive, &mut found);
        found
    }

    fn named_child(&self, node: Entity, path: &str) -> Option<Entity> {
        let mut current = node;
        let mut walked = false;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = self.child_by_name(current, segment)?;
            walked = true;
        }
        walked.then_some(current)
    }

    fn parent(&self, node: Entity) -> Option<Entity> {
        self.world.get::<ChildOf>(node).map(|child_of| child_of.0)
    }

    fn add_component(&mut self, node: Entity, class: &BindClass) -> Entity {
        class.attach_to(self.world, node);
        node
    }

    fn any_instance(&mut self, class: &BindClass) -> Option<Entity> {
        class.find_any_in(self.world)
    }

    fn load_asset(&self, path: &str) -> Option<AssetRef> {
        self.world
            .get_resource::<AssetCatalog>()
            .and_then(|catalog| catalog.lookup(path))
    }
}
