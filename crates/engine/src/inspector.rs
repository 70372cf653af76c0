//! # Inspector Binding Pass
//!
//! The once-per-redraw sweep that gives bound fields their values. For
//! every node with bind declarations, each field that is still empty is
//! resolved through the core and the outcome written back into the node's
//! serialized field state. Everything else about the inspector (layout,
//! repaint) stays with the UI; this module only supplies the data and the
//! tint choice.

use bevy::log::warn;
use bevy::prelude::*;

use tether_common::{
    resolve, Bindings, ClassRegistry, FieldValue, Fields, Resolution, WorldSceneLookup,
};

use crate::editor_settings::{EditorSettings, PlayMode};

/// Tint for drawing a reference field, depending on whether it is bound.
pub fn field_tint(settings: &EditorSettings, is_empty: bool) -> [f32; 4] {
    if is_empty {
        settings.empty_tint
    } else {
        settings.bound_tint
    }
}

/// Resolve every empty bound field in the scene.
///
/// Runs as an exclusive system so resolution sees the same world the
/// redraw is about to draw. Skipped entirely while the global toggle is
/// off or the host is live-simulating. A failure only skips the one field
/// it belongs to; the pass itself always completes.
pub fn auto_bind_pass(world: &mut World) {
    let enabled = world
        .get_resource::<EditorSettings>()
        .map(|s| s.auto_bind_enabled)
        .unwrap_or(true);
    let playing = world
        .get_resource::<PlayMode>()
        .map(|p| p.running)
        .unwrap_or(false);
    if !enabled || playing {
        return;
    }

    let mut owners_query = world.query::<(Entity, &Bindings)>();
    let owners: Vec<(Entity, Bindings)> = owners_query
        .iter(world)
        .map(|(entity, bindings)| (entity, bindings.clone()))
        .collect();

    for (owner, bindings) in owners {
        for decl in bindings.iter() {
            bind_field(world, owner, decl);
        }
    }
}

fn bind_field(world: &mut World, owner: Entity, decl: &tether_common::BindDecl) {
    // Re-read per field: an earlier declaration may have written state
    let fields = world.get::<Fields>(owner).cloned().unwrap_or_default();
    if !fields.is_field_empty(&decl.field) {
        return;
    }

    let class = {
        let Some(registry) = world.get_resource::<ClassRegistry>() else {
            warn!("Auto-bind pass is running without a ClassRegistry resource");
            return;
        };
        match registry.resolve(&decl.class_tag) {
            Ok(class) => class.clone(),
            Err(e) => {
                warn!("Auto-bind of {:?}.{} failed: {}", owner, decl.field, e);
                return;
            }
        }
    };

    let outcome = {
        let mut lookup = WorldSceneLookup::new(world);
        resolve(&mut lookup, owner, &class, &decl.source, &fields)
    };
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Auto-bind of {:?}.{} failed: {}", owner, decl.field, e);
            return;
        }
    };

    if world.get::<Fields>(owner).is_none() {
        world.entity_mut(owner).insert(Fields::default());
    }
    let Some(mut fields) = world.get_mut::<Fields>(owner) else {
        return;
    };
    match outcome {
        Resolution::Single(value) => fields.set(&decl.field, FieldValue::Object(value)),
        Resolution::Prefab(value) => fields.set(&decl.field, FieldValue::Asset(value)),
        Resolution::Collection { field, entries } => {
            fields.set(&field, FieldValue::ObjectList(entries))
        }
    }
}
