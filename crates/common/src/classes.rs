//! # Tether Class System
//!
//! Scene-graph node base and the built-in attachable component family.
//! Hierarchy is expressed with Bevy's `ChildOf`/`Children` relationship
//! components; every node additionally carries a [`SceneNode`] with its
//! editable name and active flag.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// 1. SceneNode (Base)
// ============================================================================

/// Base component present on every node in the scene graph.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct SceneNode {
    /// Editable label, used by named-child lookups
    pub name: String,

    /// Inactive nodes hide their entire subtree from active-only searches
    pub active: bool,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            name: "SceneNode".to_string(),
            active: true,
        }
    }
}

impl SceneNode {
    /// Create an active node with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
        }
    }

    /// Create an inactive node with the given name.
    pub fn named_inactive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: false,
        }
    }
}

// ============================================================================
// 2. Built-in Attachable Classes
// ============================================================================

/// 2D visual attached to a node.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct Sprite {
    /// Project-relative texture path
    pub texture: String,
    /// Draw order within the layer
    pub layer: i32,
}

/// Positional audio source.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct AudioEmitter {
    /// Linear volume, 0.0 - 1.0
    pub volume: f32,
    pub looped: bool,
}

impl Default for AudioEmitter {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looped: false,
        }
    }
}

/// Axis-aligned collision volume.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct Collider {
    /// Half-extents in local space
    pub extents: Vec3,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            extents: Vec3::splat(0.5),
        }
    }
}

/// Moves its node along an authored path at a fixed speed.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct PathFollower {
    /// Units per second
    pub speed: f32,
    /// Restart from the first waypoint after the last
    pub wrap: bool,
}

impl Default for PathFollower {
    fn default() -> Self {
        Self {
            speed: 1.0,
            wrap: true,
        }
    }
}
