//! # Editor Settings Module
//!
//! Persistent editor settings for the auto-binding tools.
//!
//! - **Automatic Loading**: loaded from `~/.tether_studio/settings.json` on startup
//! - **Auto-Save**: saved when modified, via Bevy's change detection
//! - **Default Fallback**: defaults are used when the file is missing or unreadable
//!
//! The `auto_bind_enabled` toggle is the process-wide switch the binding
//! pass checks before doing anything; it defaults to on.

use std::fs;
use std::path::PathBuf;

use bevy::log::{info, warn};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Global editor settings resource.
///
/// Automatically persisted to `~/.tether_studio/settings.json`.
#[derive(Resource, Serialize, Deserialize, Clone)]
pub struct EditorSettings {
    /// Master switch for the auto-binding pass
    pub auto_bind_enabled: bool,

    /// Inspector tint for a field that resolved to something, RGBA
    pub bound_tint: [f32; 4],

    /// Inspector tint for a field that is still empty, RGBA
    pub empty_tint: [f32; 4],
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            auto_bind_enabled: true,
            bound_tint: [0.6, 0.6, 0.6, 1.0],
            empty_tint: [1.0, 0.5, 0.5, 1.0],
        }
    }
}

impl EditorSettings {
    /// Get the settings file path (~/.tether_studio/settings.json)
    fn settings_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tether_studio").join("settings.json"))
    }

    /// Load settings from file or create defaults.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine home directory. Using default settings.");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<EditorSettings>(&content) {
                Ok(settings) => {
                    info!("Loaded editor settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings file: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Save settings to file.
    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path()
            .ok_or_else(|| "Could not determine home directory".to_string())?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        fs::write(&path, json).map_err(|e| format!("Failed to write settings file: {}", e))?;
        Ok(())
    }
}

/// Whether the host is currently live-simulating. The binding pass never
/// runs while playing, so scenes behave exactly as a build would.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayMode {
    pub running: bool,
}

/// Plugin to manage editor settings.
pub struct EditorSettingsPlugin;

impl Plugin for EditorSettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(EditorSettings::load())
            .init_resource::<PlayMode>()
            .add_systems(Update, auto_save_settings);
    }
}

/// Auto-save settings when they change.
fn auto_save_settings(settings: Res<EditorSettings>) {
    if settings.is_changed() && !settings.is_added() {
        if let Err(e) = settings.save() {
            warn!("Failed to save editor settings: {}", e);
        }
    }
}
