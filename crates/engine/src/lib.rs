//! # Tether Engine — Auto-Binding Glue
//!
//! Editor-side wiring for the `tether-common` binding core: the plugin that
//! registers the built-in classes, the persisted global toggle, and the
//! once-per-redraw inspector pass that fills empty bound fields.

use bevy::prelude::*;

use tether_common::{AssetCatalog, ClassRegistry};

pub mod editor_settings;
pub mod inspector;

pub use editor_settings::{EditorSettings, EditorSettingsPlugin, PlayMode};
pub use inspector::{auto_bind_pass, field_tint};

/// Sets up auto-binding for an editor session: built-in class registry,
/// asset catalog, persisted settings, and the binding pass each frame.
pub struct TetherBindPlugin;

impl Plugin for TetherBindPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClassRegistry::with_builtins())
            .init_resource::<AssetCatalog>()
            .add_plugins(EditorSettingsPlugin)
            .add_systems(Update, auto_bind_pass);
    }
}
