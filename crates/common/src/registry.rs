//! # Class Registry
//!
//! Maps a serialized element-type tag to a registered component class.
//! The registry is populated once at startup by explicit registration;
//! binding never scans the process for types per call.
//!
//! Object-reference fields are serialized with a `Ref<ClassName>` element
//! tag. [`ClassRegistry::resolve`] strips that wrapper before matching, so
//! `"Ref<Sprite>"` and `"Sprite"` resolve to the same class.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::classes::{AudioEmitter, Collider, PathFollower, Sprite};
use crate::resolve::BindError;

// ============================================================================
// 1. BindClass — runtime class descriptor
// ============================================================================

type ContainsFn = fn(&World, Entity) -> bool;
type AttachFn = fn(&mut World, Entity);
type FindAnyFn = fn(&mut World) -> Option<Entity>;

/// Runtime descriptor for one attachable component class.
///
/// Carries the operations the scene-lookup layer needs to work with the
/// class generically, without knowing the concrete component type.
#[derive(Clone)]
pub struct BindClass {
    name: &'static str,
    contains: ContainsFn,
    attach: AttachFn,
    find_any: FindAnyFn,
}

impl BindClass {
    /// Simple class name this descriptor was registered under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Does `entity` carry a component of this class?
    pub fn is_on(&self, world: &World, entity: Entity) -> bool {
        (self.contains)(world, entity)
    }

    /// Attach a default-constructed component of this class to `entity`.
    pub fn attach_to(&self, world: &mut World, entity: Entity) {
        (self.attach)(world, entity)
    }

    /// Find any entity in the world carrying this class.
    pub fn find_any_in(&self, world: &mut World) -> Option<Entity> {
        (self.find_any)(world)
    }
}

impl std::fmt::Debug for BindClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindClass").field("name", &self.name).finish()
    }
}

fn contains_class<T: Component>(world: &World, entity: Entity) -> bool {
    world
        .get_entity(entity)
        .map(|e| e.contains::<T>())
        .unwrap_or(false)
}

fn attach_class<T: Component + Default>(world: &mut World, entity: Entity) {
    world.entity_mut(entity).insert(T::default());
}

fn find_any_class<T: Component>(world: &mut World) -> Option<Entity> {
    let mut query = world.query_filtered::<Entity, With<T>>();
    query.iter(world).next()
}

// ============================================================================
// 2. ClassRegistry
// ============================================================================

/// Registry of attachable component classes, keyed by simple class name.
#[derive(Resource, Default)]
pub struct ClassRegistry {
    classes: HashMap<&'static str, BindClass>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in component family.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register::<Sprite>("Sprite");
        registry.register::<AudioEmitter>("AudioEmitter");
        registry.register::<Collider>("Collider");
        registry.register::<PathFollower>("PathFollower");
        registry
    }

    /// Register a component class under its simple name.
    ///
    /// First registration wins: a second class arriving under an
    /// already-taken name is ignored with a warning, so the mapping stays
    /// stable for fields that were authored against the first one.
    pub fn register<T: Component + Default>(&mut self, name: &'static str) {
        if self.classes.contains_key(name) {
            tracing::warn!("class '{name}' is already registered, keeping the first registration");
            return;
        }
        self.classes.insert(
            name,
            BindClass {
                name,
                contains: contains_class::<T>,
                attach: attach_class::<T>,
                find_any: find_any_class::<T>,
            },
        );
    }

    /// Resolve a serialized element-type tag to a registered class.
    ///
    /// Strips the `Ref<...>` wrapper if present, then matches the simple
    /// name exactly. An unknown name is an error, never a silent miss:
    /// a field whose class cannot be resolved must be reported, not left
    /// looking like "not yet bound".
    pub fn resolve(&self, tag: &str) -> Result<&BindClass, BindError> {
        let name = strip_ref_wrapper(tag);
        self.classes
            .get(name)
            .ok_or_else(|| BindError::ClassNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Strip the host's object-reference wrapper from a type tag.
fn strip_ref_wrapper(tag: &str) -> &str {
    tag.strip_prefix("Ref<")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(tag)
}
