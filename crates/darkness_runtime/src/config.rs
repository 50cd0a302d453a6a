//! Runtime Configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `DARKNESS_SEED`, `DARKNESS_AUDIO`,
//!    `DARKNESS_MAX_FRAMES`
//! 2. Config file: `$DARKNESS_CONFIG`, else `darkness.toml` if present
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! audio_backend = "rodio"   # headless, rodio
//! workers = 2
//! max_frames = 3600
//!
//! [game]
//! respawn_speed = 0.01
//! seed = 7
//!
//! [game.sounds]
//! weapon = ["shotgun.wav"]
//!
//! [audio]
//! asset_root = "assets/sounds"
//! ```

use crate::error::RuntimeError;
use darkness_audio::AudioSettings;
use darkness_game::GameConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "darkness.toml";

/// Which audio engine to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioBackend {
    /// In-memory engine, no sound
    Headless,
    /// Real output through rodio
    Rodio,
}

impl Default for AudioBackend {
    fn default() -> Self {
        Self::Headless
    }
}

impl std::fmt::Display for AudioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Headless => write!(f, "headless"),
            Self::Rodio => write!(f, "rodio"),
        }
    }
}

impl std::str::FromStr for AudioBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "headless" | "none" | "off" => Ok(Self::Headless),
            "rodio" | "on" | "speakers" => Ok(Self::Rodio),
            _ => Err(format!("Unknown audio backend: {}", s)),
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Audio engine
    pub audio_backend: AudioBackend,
    /// Background cue workers
    pub workers: usize,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Frames to keep running after the player dies
    pub death_grace_frames: u32,
    /// Head sweep half-width in degrees
    pub sweep_degrees: f32,
    /// Head sweep period in seconds
    pub sweep_seconds: f32,
    /// Simulation tunables
    pub game: GameConfig,
    /// Audio engine settings
    pub audio: AudioSettings,
    /// Where this configuration came from
    #[serde(skip)]
    pub config_path: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            audio_backend: AudioBackend::Headless,
            workers: 2,
            max_frames: None,
            death_grace_frames: 120,
            sweep_degrees: 120.0,
            sweep_seconds: 12.0,
            game: GameConfig::default(),
            audio: AudioSettings::default(),
            config_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, RuntimeError> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Load configuration reading variables through `env`
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self, RuntimeError> {
        let mut config = match env("DARKNESS_CONFIG").filter(|p| !p.is_empty()) {
            // An explicit file must exist
            Some(path) => Self::load_from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env(env)?;
        config.game.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self, RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ConfigRead {
            path: path.to_string(),
            source,
        })?;

        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_string());
        log::info!("Loaded config from {}", path);
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, RuntimeError> {
        Ok(toml::from_str(content)?)
    }

    /// Override with environment variables
    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), RuntimeError> {
        if let Some(seed) = env("DARKNESS_SEED") {
            let parsed = seed.trim().parse::<u64>().map_err(|_| RuntimeError::Env {
                name: "DARKNESS_SEED",
                value: seed.clone(),
            })?;
            self.game.seed = Some(parsed);
            log::info!("Seed from env: {}", parsed);
        }

        if let Some(backend) = env("DARKNESS_AUDIO") {
            self.audio_backend = backend.parse().map_err(|_| RuntimeError::Env {
                name: "DARKNESS_AUDIO",
                value: backend.clone(),
            })?;
            log::info!("Audio backend from env: {}", self.audio_backend);
        }

        if let Some(frames) = env("DARKNESS_MAX_FRAMES") {
            let parsed = frames.trim().parse::<u64>().map_err(|_| RuntimeError::Env {
                name: "DARKNESS_MAX_FRAMES",
                value: frames.clone(),
            })?;
            self.max_frames = Some(parsed);
        }

        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        log::info!("Runtime Configuration:");
        log::info!("  Audio: {} (assets: {})", self.audio_backend, self.audio.asset_root);
        log::info!("  Workers: {}", self.workers);
        log::info!("  Frame rate: {} Hz", self.game.frame_rate);
        match self.max_frames {
            Some(frames) => log::info!("  Max frames: {}", frames),
            None => log::info!("  Max frames: unlimited"),
        }
        if let Some(seed) = self.game.seed {
            log::info!("  Seed: {}", seed);
        }
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path);
        }
    }
}
