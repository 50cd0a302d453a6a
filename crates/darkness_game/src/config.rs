//! Game configuration

use crate::error::ConfigError;
use darkness_audio::SoundLibrary;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Distance below which the zombie has reached the viewer
pub const MIN_ENGAGE_DISTANCE: f32 = 2.0;
/// Radius zombies respawn at
pub const MAX_MODEL_DISTANCE: f32 = 7.0;
/// Half-width of the gaze cone in radians
pub const YAW_LIMIT: f32 = 0.35;
/// Per-frame approach speed after a hit
pub const RESPAWN_SPEED: f32 = 0.007;
/// Upper bound of the ambient interval in seconds
pub const AMBIENT_MAX_SECONDS: u32 = 7;
/// Assumed frame callback rate
pub const FRAME_RATE: u32 = 60;

/// Tunables of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Distance below which the zombie reaches the viewer
    pub min_engage_distance: f32,
    /// Spawn radius; also bounds ambient cue positions
    pub max_model_distance: f32,
    /// Speed of the scene-start zombie (stationary by default)
    pub initial_speed: f32,
    /// Speed of every respawned zombie
    pub respawn_speed: f32,
    /// Gaze cone half-width in radians
    pub yaw_limit: f32,
    /// Ambient interval upper bound in seconds
    pub ambient_max_seconds: u32,
    /// Frames per second the counters assume
    pub frame_rate: u32,
    /// Depth of the floor plane; the weapon sounds from half of it below the viewer
    pub floor_depth: f32,
    /// Cosmetic spin per frame in degrees
    pub spin_degrees_per_frame: f32,
    /// Cosmetic spin axis (normalized on use)
    pub spin_axis: [f32; 3],
    /// Haptic pulse on a hit, in milliseconds
    pub haptic_ms: u64,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Sound files per cue
    pub sounds: SoundLibrary,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_engage_distance: MIN_ENGAGE_DISTANCE,
            max_model_distance: MAX_MODEL_DISTANCE,
            initial_speed: 0.0,
            respawn_speed: RESPAWN_SPEED,
            yaw_limit: YAW_LIMIT,
            ambient_max_seconds: AMBIENT_MAX_SECONDS,
            frame_rate: FRAME_RATE,
            floor_depth: 20.0,
            spin_degrees_per_frame: 0.3,
            spin_axis: [0.5, 0.5, 1.0],
            haptic_ms: 250,
            seed: None,
            sounds: SoundLibrary::default(),
        }
    }
}

impl GameConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the scene-start zombie speed
    pub fn with_initial_speed(mut self, speed: f32) -> Self {
        self.initial_speed = speed;
        self
    }

    /// Set the respawn speed
    pub fn with_respawn_speed(mut self, speed: f32) -> Self {
        self.respawn_speed = speed;
        self
    }

    /// Set the sound library
    pub fn with_sounds(mut self, sounds: SoundLibrary) -> Self {
        self.sounds = sounds;
        self
    }

    /// Check every tunable
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_engage_distance", self.min_engage_distance)?;
        positive("max_model_distance", self.max_model_distance)?;
        if self.min_engage_distance >= self.max_model_distance {
            return Err(ConfigError::DistanceOrder {
                min: self.min_engage_distance,
                max: self.max_model_distance,
            });
        }

        non_negative("initial_speed", self.initial_speed)?;
        non_negative("respawn_speed", self.respawn_speed)?;

        if !(self.yaw_limit > 0.0 && self.yaw_limit <= std::f32::consts::PI) {
            return Err(ConfigError::invalid("yaw_limit", "must be in (0, pi]"));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::invalid("frame_rate", "must be positive"));
        }
        if self.ambient_max_seconds == 0 {
            return Err(ConfigError::invalid("ambient_max_seconds", "must be positive"));
        }
        if !self.floor_depth.is_finite() {
            return Err(ConfigError::invalid("floor_depth", "must be finite"));
        }
        if !self.spin_degrees_per_frame.is_finite() {
            return Err(ConfigError::invalid("spin_degrees_per_frame", "must be finite"));
        }

        let axis = Vec3::from(self.spin_axis);
        if !axis.is_finite() || axis.length_squared() <= f32::EPSILON {
            return Err(ConfigError::invalid("spin_axis", "must be a non-zero vector"));
        }

        for (name, set) in self.sounds.cue_sets() {
            if set.is_empty() {
                return Err(ConfigError::EmptyCueSet(name));
            }
        }

        Ok(())
    }

    /// Exclusive upper bound of the ambient interval in frames
    pub fn ambient_max_ticks(&self) -> u32 {
        self.ambient_max_seconds.saturating_mul(self.frame_rate)
    }

    /// Spin increment per frame in radians
    pub fn spin_step(&self) -> f32 {
        self.spin_degrees_per_frame.to_radians()
    }

    /// Unit spin axis
    pub fn spin_axis(&self) -> Vec3 {
        Vec3::from(self.spin_axis).normalize_or_zero()
    }

    /// Where the weapon cue plays from
    pub fn weapon_position(&self) -> [f32; 3] {
        [0.0, -self.floor_depth / 2.0, 0.0]
    }

    /// Scene-start zombie position, straight ahead of the viewer
    pub fn initial_position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -self.max_model_distance / 2.0)
    }

    /// Haptic pulse length
    pub fn haptic_duration(&self) -> Duration {
        Duration::from_millis(self.haptic_ms)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} is not positive", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} is negative", value)))
    }
}
