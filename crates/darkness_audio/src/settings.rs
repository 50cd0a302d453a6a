//! Audio engine settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings shared by the audio engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Directory sound identifiers are resolved against
    pub asset_root: String,
    /// Distance between the listener's ears in world units
    pub ear_spacing: f32,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// How many engine updates a one-shot voice lasts in the headless engine
    pub headless_one_shot_updates: u32,
}

impl AudioSettings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset root
    pub fn with_asset_root(mut self, root: impl Into<String>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Set master volume
    pub fn with_master_volume(mut self, volume: f32) -> Self {
        self.master_volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Set ear spacing
    pub fn with_ear_spacing(mut self, spacing: f32) -> Self {
        self.ear_spacing = spacing.max(0.0);
        self
    }

    /// Set headless one-shot length
    pub fn with_headless_one_shot_updates(mut self, updates: u32) -> Self {
        self.headless_one_shot_updates = updates.max(1);
        self
    }

    /// Resolve a sound identifier to a path on disk
    pub fn resolve(&self, file: &str) -> PathBuf {
        if self.asset_root.is_empty() || Path::new(file).is_absolute() {
            PathBuf::from(file)
        } else {
            Path::new(&self.asset_root).join(file)
        }
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            asset_root: "assets/sounds".to_string(),
            ear_spacing: 0.2,
            master_volume: 1.0,
            headless_one_shot_updates: 120,
        }
    }
}
