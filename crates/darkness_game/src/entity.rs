//! The zombie: radial approach and lifecycle

use crate::audio_state::EntityAudioState;
use crate::config::GameConfig;
use crate::task::TaskSpawner;
use darkness_audio::{SoundLibrary, SpatialAudio};
use glam::{Mat4, Vec3};
use rand::Rng;
use std::f32::consts::TAU;
use std::sync::Arc;

/// Result of one approach step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Still closing in
    Continues,
    /// Got within the engage distance; the round is over
    ReachedViewer,
}

/// The approaching hostile.
///
/// Walks straight toward the viewer's vertical axis at a fixed per-frame
/// speed while spinning cosmetically. A zombie is never reused: a hit
/// replaces it with a freshly spawned one.
pub struct Zombie {
    position: Vec3,
    speed: f32,
    min_engage_distance: f32,
    spin_axis: Vec3,
    spin_step: f32,
    spin_angle: f32,
    model: Mat4,
    reached: bool,
    audio: EntityAudioState,
}

impl Zombie {
    /// Create a zombie at an explicit position and queue its first cue
    pub fn at<R: Rng + ?Sized>(
        config: &GameConfig,
        sounds: &Arc<SoundLibrary>,
        audio: &Arc<dyn SpatialAudio>,
        spawner: &dyn TaskSpawner,
        rng: &mut R,
        position: Vec3,
        speed: f32,
    ) -> Self {
        let mut zombie = Self {
            position,
            speed,
            min_engage_distance: config.min_engage_distance,
            spin_axis: config.spin_axis(),
            spin_step: config.spin_step(),
            spin_angle: 0.0,
            model: Mat4::IDENTITY,
            reached: false,
            audio: EntityAudioState::new(Arc::clone(sounds)),
        };
        zombie.refresh_model();

        zombie
            .audio
            .request_initial(audio, spawner, rng, position.to_array());

        log::info!(
            "Zombie spawned at ({:.2}, {:.2}, {:.2}), speed {}",
            position.x,
            position.y,
            position.z,
            speed
        );
        zombie
    }

    /// Create a zombie at a random angle on the spawn circle
    pub fn spawn<R: Rng + ?Sized>(
        config: &GameConfig,
        sounds: &Arc<SoundLibrary>,
        audio: &Arc<dyn SpatialAudio>,
        spawner: &dyn TaskSpawner,
        rng: &mut R,
        speed: f32,
    ) -> Self {
        let angle_xz = rng.gen_range(0.0..TAU);
        let angle_y = 0.0_f32;
        let radius = config.max_model_distance;

        let position = Vec3::new(
            angle_xz.cos() * radius,
            angle_y.tan() * radius,
            angle_xz.sin() * radius,
        );
        Self::at(config, sounds, audio, spawner, rng, position, speed)
    }

    /// One frame of approach.
    ///
    /// The position never drops below the engage distance: the step that
    /// would cross it stops all voices and leaves the zombie where it was.
    pub fn advance<R: Rng + ?Sized>(&mut self, audio: &dyn SpatialAudio, rng: &mut R) -> Advance {
        if self.reached {
            return Advance::ReachedViewer;
        }

        let angle = self.position.z.atan2(self.position.x);
        let new_distance = self.distance() - self.speed;

        if new_distance < self.min_engage_distance {
            self.audio.stop_all(audio);
            self.reached = true;
            log::info!("Zombie reached the viewer at distance {:.3}", self.distance());
            return Advance::ReachedViewer;
        }

        self.spin_angle = (self.spin_angle + self.spin_step) % TAU;
        self.position.x = angle.cos() * new_distance;
        self.position.z = angle.sin() * new_distance;
        self.refresh_model();

        // Repositions live voices and replaces silent ones
        self.audio.tick(audio, rng, self.position.to_array());

        log::trace!("Zombie at {:?}, distance {:.3}", self.position, new_distance);
        Advance::Continues
    }

    /// Silence the zombie and play its death cue where it stands
    pub fn kill<R: Rng + ?Sized>(
        &self,
        audio: &Arc<dyn SpatialAudio>,
        spawner: &dyn TaskSpawner,
        rng: &mut R,
    ) {
        self.audio
            .on_killed(audio, spawner, rng, self.position.to_array());
    }

    fn refresh_model(&mut self) {
        self.model = Mat4::from_translation(self.position)
            * Mat4::from_axis_angle(self.spin_axis, self.spin_angle);
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Horizontal distance to the viewer
    pub fn distance(&self) -> f32 {
        (self.position.x * self.position.x + self.position.z * self.position.z).sqrt()
    }

    /// Per-frame closing speed
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Model transform for rendering and gaze
    pub fn model(&self) -> &Mat4 {
        &self.model
    }

    /// Whether the zombie has reached the viewer
    pub fn has_reached(&self) -> bool {
        self.reached
    }

    /// The zombie's cue state
    pub fn audio(&self) -> &EntityAudioState {
        &self.audio
    }
}
