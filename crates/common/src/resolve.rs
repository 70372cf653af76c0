//! # Bind Resolution
//!
//! Executes one field's bind source against the scene and returns the
//! value(s) to write back. Dispatch is a pure function of the source
//! variant; the only scene mutation is `AddedComponent`.
//!
//! Failures are local to the field being resolved: the caller logs them and
//! moves on to the next field, and the next redraw re-attempts from scratch.

use bevy::prelude::*;

use crate::fields::{AssetRef, FieldValue, Fields};
use crate::lookup::SceneLookup;
use crate::registry::BindClass;
use crate::sources::BindSource;
use crate::sync::sync_refs;

// ============================================================================
// 1. Outcome and error types
// ============================================================================

/// Result of resolving one bind declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Value for a single-reference field; `None` is a legitimate
    /// "nothing there yet" outcome, not a failure
    Single(Option<Entity>),
    /// Replacement contents for the ordered collection field `field`
    Collection { field: String, entries: Vec<Entity> },
    /// Value for a prefab-asset field
    Prefab(Option<AssetRef>),
}

/// Errors that abort one field's resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The serialized class tag matches no registered component class.
    /// Distinct from an empty result on purpose: an unknown class must be
    /// reported, an absent component must not.
    #[error("no registered component class matches '{0}'")]
    ClassNotFound(String),

    /// The bind declaration itself is malformed
    #[error("bind configuration error: {0}")]
    Configuration(String),
}

// ============================================================================
// 2. resolve
// ============================================================================

/// Resolve `source` for the field's `class` on `owner`.
///
/// `fields` is the owner's current serialized state; plural sources read
/// their target collection's contents from it. The caller owns the
/// write-back of the returned [`Resolution`].
pub fn resolve(
    lookup: &mut dyn SceneLookup,
    owner: Entity,
    class: &BindClass,
    source: &BindSource,
    fields: &Fields,
) -> Result<Resolution, BindError> {
    match source {
        BindSource::OwnComponent => Ok(Resolution::Single(lookup.own_component(owner, class))),

        BindSource::DescendantComponent {
            include_inactive,
            child_name,
        } => {
            let found = match child_name {
                Some(name) => lookup
                    .named_child(owner, name)
                    .and_then(|child| lookup.own_component(child, class)),
                None => lookup.descendant_component(owner, class, *include_inactive),
            };
            Ok(Resolution::Single(found))
        }

        BindSource::DescendantComponents {
            include_inactive,
            child_name,
            target_field,
        } => {
            let field = require_target(target_field)?;
            let existing = collection_contents(fields, field)?;
            let root = match child_name {
                Some(name) => match lookup.named_child(owner, name) {
                    Some(child) => child,
                    // Absent child: leave the collection as it is
                    None => {
                        return Ok(Resolution::Collection {
                            field: field.to_string(),
                            entries: existing.to_vec(),
                        })
                    }
                },
                None => owner,
            };
            let queried = lookup.descendant_components(root, class, *include_inactive);
            Ok(Resolution::Collection {
                field: field.to_string(),
                entries: sync_refs(existing, &queried),
            })
        }

        BindSource::AddedComponent => {
            Ok(Resolution::Single(Some(lookup.add_component(owner, class))))
        }

        BindSource::AnyInstance => Ok(Resolution::Single(lookup.any_instance(class))),

        BindSource::AncestorComponent => {
            let found = lookup
                .parent(owner)
                .and_then(|parent| lookup.own_component(parent, class));
            Ok(Resolution::Single(found))
        }

        BindSource::AncestorComponents { target_field } => {
            let field = require_target(target_field)?;
            let existing = collection_contents(fields, field)?;
            let entries = match lookup.parent(owner) {
                Some(parent) => {
                    let queried = lookup.descendant_components(parent, class, false);
                    sync_refs(existing, &queried)
                }
                // Root node: nothing to search, keep the collection
                None => existing.to_vec(),
            };
            Ok(Resolution::Collection {
                field: field.to_string(),
                entries,
            })
        }

        BindSource::PrefabAsset { path } => {
            if path.is_empty() {
                return Err(BindError::Configuration(
                    "prefab bind source requires an asset path".to_string(),
                ));
            }
            // A missing asset is a transient authoring state, never an error
            Ok(Resolution::Prefab(lookup.load_asset(path)))
        }
    }
}

fn require_target(target_field: &Option<String>) -> Result<&str, BindError> {
    match target_field.as_deref() {
        Some(field) if !field.is_empty() => Ok(field),
        _ => Err(BindError::Configuration(
            "plural bind source requires a target collection field".to_string(),
        )),
    }
}

fn collection_contents<'a>(fields: &'a Fields, field: &str) -> Result<&'a [Entity], BindError> {
    match fields.get(field) {
        Some(FieldValue::ObjectList(list)) => Ok(list),
        Some(_) => Err(BindError::Configuration(format!(
            "target field '{field}' is not an object list"
        ))),
        None => Err(BindError::Configuration(format!(
            "owner has no field named '{field}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{AudioEmitter, SceneNode, Sprite};
    use crate::lookup::{AssetCatalog, WorldSceneLookup};
    use crate::registry::ClassRegistry;

    fn class(name: &str) -> BindClass {
        ClassRegistry::with_builtins().resolve(name).unwrap().clone()
    }

    fn list_field(name: &str, entries: Vec<Entity>) -> Fields {
        let mut fields = Fields::new();
        fields.set(name, FieldValue::ObjectList(entries));
        fields
    }

    #[test]
    fn test_own_component() {
        let mut world = World::new();
        let owner = world.spawn((SceneNode::named("Owner"), Sprite::default())).id();
        let bare = world.spawn(SceneNode::named("Bare")).id();
        let sprite = class("Sprite");
        let fields = Fields::new();

        let mut lookup = WorldSceneLookup::new(&mut world);
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &BindSource::OwnComponent, &fields),
            Ok(Resolution::Single(Some(owner)))
        );
        assert_eq!(
            resolve(&mut lookup, bare, &sprite, &BindSource::OwnComponent, &fields),
            Ok(Resolution::Single(None))
        );
    }

    #[test]
    fn test_descendant_skips_inactive_when_asked() {
        // Two matching descendants, one inactive: only the active one binds
        let mut world = World::new();
        let owner = world.spawn(SceneNode::named("Owner")).id();
        world.spawn((
            SceneNode::named_inactive("Disabled"),
            Sprite::default(),
            ChildOf(owner),
        ));
        let active = world
            .spawn((SceneNode::named("Enabled"), Sprite::default(), ChildOf(owner)))
            .id();
        let sprite = class("Sprite");
        let fields = Fields::new();

        let mut lookup = WorldSceneLookup::new(&mut world);
        let source = BindSource::DescendantComponent {
            include_inactive: false,
            child_name: None,
        };
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Ok(Resolution::Single(Some(active)))
        );
    }

    #[test]
    fn test_named_child_overrides_subtree_search() {
        let mut world = World::new();
        let owner = world.spawn(SceneNode::named("Owner")).id();
        // A matching component elsewhere in the subtree must be ignored
        world.spawn((SceneNode::named("Other"), Sprite::default(), ChildOf(owner)));
        let body = world.spawn((SceneNode::named("Body"), ChildOf(owner))).id();
        let hand = world
            .spawn((SceneNode::named("Hand"), Sprite::default(), ChildOf(body)))
            .id();
        let sprite = class("Sprite");
        let fields = Fields::new();

        let mut lookup = WorldSceneLookup::new(&mut world);
        let source = BindSource::DescendantComponent {
            include_inactive: false,
            child_name: Some("Body/Hand".to_string()),
        };
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Ok(Resolution::Single(Some(hand)))
        );

        // Missing child stops resolution without an error
        let source = BindSource::DescendantComponent {
            include_inactive: false,
            child_name: Some("Body/Tail".to_string()),
        };
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Ok(Resolution::Single(None))
        );
    }

    #[test]
    fn test_plural_converges_onto_query() {
        // Existing collection of 3, fresh query returns 2: result is
        // exactly the 2 matches
        let mut world = World::new();
        let owner = world.spawn(SceneNode::named("Owner")).id();
        let a = world
            .spawn((SceneNode::named("A"), Sprite::default(), ChildOf(owner)))
            .id();
        let b = world
            .spawn((SceneNode::named("B"), Sprite::default(), ChildOf(owner)))
            .id();
        let stale = world.spawn_empty().id();
        let gone = world.spawn_empty().id();
        let sprite = class("Sprite");
        let fields = list_field("sprites", vec![stale, a, gone]);

        let mut lookup = WorldSceneLookup::new(&mut world);
        let source = BindSource::DescendantComponents {
            include_inactive: false,
            child_name: None,
            target_field: Some("sprites".to_string()),
        };
        let outcome = resolve(&mut lookup, owner, &sprite, &source, &fields).unwrap();
        match outcome {
            Resolution::Collection { field, entries } => {
                assert_eq!(field, "sprites");
                assert_eq!(entries.len(), 2);
                assert!(entries.contains(&a));
                assert!(entries.contains(&b));
            }
            other => panic!("expected a collection, got {other:?}"),
        }
    }

    #[test]
    fn test_plural_without_target_field_is_a_configuration_error() {
        let mut world = World::new();
        let owner = world.spawn(SceneNode::named("Owner")).id();
        let sprite = class("Sprite");
        let fields = Fields::new();

        let mut lookup = WorldSceneLookup::new(&mut world);
        let source = BindSource::DescendantComponents {
            include_inactive: false,
            child_name: None,
            target_field: None,
        };
        assert!(matches!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Err(BindError::Configuration(_))
        ));

        // A target field the owner does not have is just as broken
        let source = BindSource::DescendantComponents {
            include_inactive: false,
            child_name: None,
            target_field: Some("no_such_field".to_string()),
        };
        assert!(matches!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Err(BindError::Configuration(_))
        ));
    }

    #[test]
    fn test_plural_named_child_scopes_the_search() {
        let mut world = World::new();
        let owner = world.spawn(SceneNode::named("Owner")).id();
        world.spawn((SceneNode::named("Outside"), Sprite::default(), ChildOf(owner)));
        let rack = world.spawn((SceneNode::named("Rack"), ChildOf(owner))).id();
        let inside = world
            .spawn((SceneNode::named("Inside"), Sprite::default(), ChildOf(rack)))
            .id();
        let sprite = class("Sprite");
        let fields = list_field("sprites", Vec::new());

        let mut lookup = WorldSceneLookup::new(&mut world);
        let source = BindSource::DescendantComponents {
            include_inactive: false,
            child_name: Some("Rack".to_string()),
            target_field: Some("sprites".to_string()),
        };
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Ok(Resolution::Collection {
                field: "sprites".to_string(),
                entries: vec![inside],
            })
        );

        // Missing named child leaves the collection untouched
        let fields = list_field("sprites", vec![inside]);
        let source = BindSource::DescendantComponents {
            include_inactive: false,
            child_name: Some("Shelf".to_string()),
            target_field: Some("sprites".to_string()),
        };
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Ok(Resolution::Collection {
                field: "sprites".to_string(),
                entries: vec![inside],
            })
        );
    }

    #[test]
    fn test_added_component_attaches_and_returns_owner() {
        let mut world = World::new();
        let owner = world.spawn(SceneNode::named("Owner")).id();
        let emitter = class("AudioEmitter");
        let fields = Fields::new();

        let outcome = {
            let mut lookup = WorldSceneLookup::new(&mut world);
            resolve(&mut lookup, owner, &emitter, &BindSource::AddedComponent, &fields)
        };
        assert_eq!(outcome, Ok(Resolution::Single(Some(owner))));
        assert!(world.get::<AudioEmitter>(owner).is_some());
    }

    #[test]
    fn test_any_instance_absent_when_none_exist() {
        let mut world = World::new();
        let owner = world.spawn(SceneNode::named("Owner")).id();
        let emitter = class("AudioEmitter");
        let fields = Fields::new();

        let mut lookup = WorldSceneLookup::new(&mut world);
        assert_eq!(
            resolve(&mut lookup, owner, &emitter, &BindSource::AnyInstance, &fields),
            Ok(Resolution::Single(None))
        );

        let somewhere = lookup
            .world
            .spawn((SceneNode::named("Speaker"), AudioEmitter::default()))
            .id();
        let mut lookup = WorldSceneLookup::new(&mut world);
        assert_eq!(
            resolve(&mut lookup, owner, &emitter, &BindSource::AnyInstance, &fields),
            Ok(Resolution::Single(Some(somewhere)))
        );
    }

    #[test]
    fn test_ancestor_on_root_is_absent_not_an_error() {
        let mut world = World::new();
        let root = world.spawn(SceneNode::named("Root")).id();
        let sprite = class("Sprite");
        let fields = Fields::new();

        let mut lookup = WorldSceneLookup::new(&mut world);
        assert_eq!(
            resolve(&mut lookup, root, &sprite, &BindSource::AncestorComponent, &fields),
            Ok(Resolution::Single(None))
        );
    }

    #[test]
    fn test_ancestor_checks_immediate_parent_only() {
        let mut world = World::new();
        let grandparent = world
            .spawn((SceneNode::named("Grandparent"), Sprite::default()))
            .id();
        let parent = world.spawn((SceneNode::named("Parent"), ChildOf(grandparent))).id();
        let owner = world.spawn((SceneNode::named("Owner"), ChildOf(parent))).id();
        let sprite = class("Sprite");
        let fields = Fields::new();

        let mut lookup = WorldSceneLookup::new(&mut world);
        // Grandparent has the component but the parent does not: no bind
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &BindSource::AncestorComponent, &fields),
            Ok(Resolution::Single(None))
        );

        lookup.world.entity_mut(parent).insert(Sprite::default());
        let mut lookup = WorldSceneLookup::new(&mut world);
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &BindSource::AncestorComponent, &fields),
            Ok(Resolution::Single(Some(parent)))
        );
    }

    #[test]
    fn test_ancestor_plural_searches_parent_subtree() {
        // Deliberately searches downward from the parent; siblings count
        let mut world = World::new();
        let parent = world.spawn((SceneNode::named("Parent"), Sprite::default())).id();
        let owner = world.spawn((SceneNode::named("Owner"), ChildOf(parent))).id();
        let sibling = world
            .spawn((SceneNode::named("Sibling"), Sprite::default(), ChildOf(parent)))
            .id();
        let sprite = class("Sprite");
        let fields = list_field("sprites", Vec::new());

        let mut lookup = WorldSceneLookup::new(&mut world);
        let source = BindSource::AncestorComponents {
            target_field: Some("sprites".to_string()),
        };
        let outcome = resolve(&mut lookup, owner, &sprite, &source, &fields).unwrap();
        match outcome {
            Resolution::Collection { entries, .. } => {
                assert_eq!(entries, vec![parent, sibling]);
            }
            other => panic!("expected a collection, got {other:?}"),
        }
    }

    #[test]
    fn test_ancestor_plural_on_root_keeps_collection() {
        let mut world = World::new();
        let root = world.spawn(SceneNode::named("Root")).id();
        let kept = world.spawn_empty().id();
        let sprite = class("Sprite");
        let fields = list_field("sprites", vec![kept]);

        let mut lookup = WorldSceneLookup::new(&mut world);
        let source = BindSource::AncestorComponents {
            target_field: Some("sprites".to_string()),
        };
        assert_eq!(
            resolve(&mut lookup, root, &sprite, &source, &fields),
            Ok(Resolution::Collection {
                field: "sprites".to_string(),
                entries: vec![kept],
            })
        );
    }

    #[test]
    fn test_prefab_missing_path_is_absent() {
        let mut world = World::new();
        let mut catalog = AssetCatalog::new();
        let asset = catalog.register("prefabs/door.scn");
        world.insert_resource(catalog);
        let owner = world.spawn(SceneNode::named("Owner")).id();
        let sprite = class("Sprite");
        let fields = Fields::new();

        let mut lookup = WorldSceneLookup::new(&mut world);
        let source = BindSource::PrefabAsset {
            path: "prefabs/door.scn".to_string(),
        };
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Ok(Resolution::Prefab(Some(asset)))
        );

        let source = BindSource::PrefabAsset {
            path: "missing/path".to_string(),
        };
        assert_eq!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Ok(Resolution::Prefab(None))
        );

        let source = BindSource::PrefabAsset { path: String::new() };
        assert!(matches!(
            resolve(&mut lookup, owner, &sprite, &source, &fields),
            Err(BindError::Configuration(_))
        ));
    }
}
