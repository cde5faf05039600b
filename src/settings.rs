//! Host settings and preferences
//!
//! Audio levels, key bindings and resource locations. Nothing here changes
//! the simulation; gameplay numbers live in `tuning`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::KeyBindings;

/// Where the draw/audio layer finds its files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePaths {
    pub font: PathBuf,
    pub sounds: PathBuf,
    pub shader: PathBuf,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            font: PathBuf::from("resources/PICO-8_wide-upper.ttf"),
            sounds: PathBuf::from("resources/sounds"),
            shader: PathBuf::from("resources/shaders/scanlines.fs"),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    pub bindings: KeyBindings,
    pub resources: ResourcePaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
            bindings: KeyBindings::default(),
            resources: ResourcePaths::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Volume actually applied to effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
