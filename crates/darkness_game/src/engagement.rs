//! Frame orchestration and trigger handling
//!
//! [`EngagementController`] is what the host drives: one [`on_frame`] per
//! rendered frame with the latest head pose, one [`on_trigger`] per trigger
//! pull, one [`draw`] per eye pass. Within a frame the zombie moves first,
//! then gaze is evaluated against its fresh transform, then ambient sound
//! is scheduled.
//!
//! [`on_frame`]: EngagementController::on_frame
//! [`on_trigger`]: EngagementController::on_trigger
//! [`draw`]: EngagementController::draw

use crate::ambient::{AmbientCue, AmbientScheduler};
use crate::background::BackgroundTrack;
use crate::config::GameConfig;
use crate::cue;
use crate::entity::{Advance, Zombie};
use crate::error::ConfigError;
use crate::gaze::GazeCone;
use crate::head::HeadTransform;
use crate::task::TaskSpawner;
use darkness_audio::{SoundLibrary, SpatialAudio};
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

/// Rendering and haptics provided by the host
pub trait Host {
    /// Draw the zombie cube
    fn draw_entity(&mut self, model: &Mat4, looked_at: bool);

    /// Pulse the controller or phone
    fn vibrate(&mut self, duration: Duration);
}

/// Outcome of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The round goes on
    Alive,
    /// The zombie reached the viewer this frame
    PlayerDied,
    /// The round was already over; nothing happened
    Dead,
}

/// Outcome of a trigger pull
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The zombie was in the gaze cone and has been replaced
    Hit,
    /// Shot into the dark
    Miss,
    /// The round is over; only the weapon sounded
    Ignored,
}

/// Events for the host to consume
#[derive(Debug, Clone, PartialEq)]
pub enum EngagementEvent {
    /// A zombie was shot
    Hit { position: Vec3 },
    /// A replacement zombie appeared
    Respawned { position: Vec3, speed: f32 },
    /// The zombie reached the viewer
    PlayerDied { position: Vec3, frame: u64 },
    /// An ambient cue was queued
    Ambient(AmbientCue),
    /// A non-finite head pose was ignored
    PoseRejected { frame: u64 },
}

/// Owns the round: zombie, head pose, ambient scheduler and terminal flag
pub struct EngagementController {
    config: GameConfig,
    sounds: Arc<SoundLibrary>,
    audio: Arc<dyn SpatialAudio>,
    spawner: Arc<dyn TaskSpawner>,
    rng: StdRng,
    gaze: GazeCone,
    head: HeadTransform,
    zombie: Zombie,
    ambient: AmbientScheduler,
    background: BackgroundTrack,
    player_alive: bool,
    looked_at: bool,
    frame: u64,
    events: Vec<EngagementEvent>,
}

impl EngagementController {
    /// Start a round: background track, scene-start zombie straight ahead,
    /// ambient scheduler armed.
    pub fn new(
        config: GameConfig,
        audio: Arc<dyn SpatialAudio>,
        spawner: Arc<dyn TaskSpawner>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sounds = Arc::new(config.sounds.clone());

        let background = BackgroundTrack::new(sounds.background.clone());
        background.start(&audio, spawner.as_ref());

        let zombie = Zombie::at(
            &config,
            &sounds,
            &audio,
            spawner.as_ref(),
            &mut rng,
            config.initial_position(),
            config.initial_speed,
        );
        let ambient = AmbientScheduler::from_config(&config, &mut rng);
        let head = HeadTransform::default();
        let gaze = GazeCone::new(config.yaw_limit);
        let looked_at = gaze.contains(&head, zombie.model());

        log::info!(
            "Round started (seed: {:?}, first ambient cue in {} frames)",
            config.seed,
            ambient.ticks_until_next()
        );

        Ok(Self {
            config,
            sounds,
            audio,
            spawner,
            rng,
            gaze,
            head,
            zombie,
            ambient,
            background,
            player_alive: true,
            looked_at,
            frame: 0,
            events: Vec::new(),
        })
    }

    /// Advance one frame
    pub fn on_frame(&mut self, head: &HeadTransform) -> FrameStatus {
        if !self.player_alive {
            return FrameStatus::Dead;
        }
        self.frame += 1;

        if head.is_finite() {
            self.head = *head;
        } else {
            log::warn!("Ignoring non-finite head pose at frame {}", self.frame);
            self.events.push(EngagementEvent::PoseRejected { frame: self.frame });
        }

        self.audio
            .set_listener_orientation(self.head.orientation_array());
        self.audio.update();

        let mut status = FrameStatus::Alive;
        if self.zombie.advance(self.audio.as_ref(), &mut self.rng) == Advance::ReachedViewer {
            self.on_player_death();
            status = FrameStatus::PlayerDied;
        }

        self.looked_at = self.gaze.contains(&self.head, self.zombie.model());

        if let Some(cue) = self
            .ambient
            .tick(&self.audio, self.spawner.as_ref(), &mut self.rng)
        {
            log::debug!("Ambient cue {} at {:?}", cue.file, cue.position);
            self.events.push(EngagementEvent::Ambient(cue));
        }

        status
    }

    fn on_player_death(&mut self) {
        let position = self.zombie.position();

        match self.sounds.player_death.pick(&mut self.rng) {
            Some(file) => {
                cue::fire(
                    &self.audio,
                    self.spawner.as_ref(),
                    "player-death-cue",
                    file.to_string(),
                    position.to_array(),
                );
            }
            None => log::warn!("No player death sounds configured"),
        }

        self.background.stop(self.audio.as_ref());
        self.player_alive = false;
        log::info!("Player died at frame {}", self.frame);
        self.events.push(EngagementEvent::PlayerDied {
            position,
            frame: self.frame,
        });
    }

    /// Handle a trigger pull. The weapon sounds every time.
    pub fn on_trigger<H: Host + ?Sized>(&mut self, host: &mut H) -> TriggerOutcome {
        match self.sounds.weapon.pick(&mut self.rng) {
            Some(file) => {
                cue::fire(
                    &self.audio,
                    self.spawner.as_ref(),
                    "weapon-cue",
                    file.to_string(),
                    self.config.weapon_position(),
                );
            }
            None => log::warn!("No weapon sounds configured"),
        }

        if !self.player_alive {
            return TriggerOutcome::Ignored;
        }
        if !self.is_looking_at() {
            log::debug!("Missed at frame {}", self.frame);
            return TriggerOutcome::Miss;
        }

        host.vibrate(self.config.haptic_duration());

        let hit_position = self.zombie.position();
        self.zombie
            .kill(&self.audio, self.spawner.as_ref(), &mut self.rng);
        log::info!("Zombie hit at {:?}", hit_position);
        self.events.push(EngagementEvent::Hit {
            position: hit_position,
        });

        self.zombie = Zombie::spawn(
            &self.config,
            &self.sounds,
            &self.audio,
            self.spawner.as_ref(),
            &mut self.rng,
            self.config.respawn_speed,
        );
        self.looked_at = self.gaze.contains(&self.head, self.zombie.model());
        self.events.push(EngagementEvent::Respawned {
            position: self.zombie.position(),
            speed: self.zombie.speed(),
        });

        TriggerOutcome::Hit
    }

    /// Whether the zombie is inside the gaze cone of the current head pose
    pub fn is_looking_at(&self) -> bool {
        self.gaze.contains(&self.head, self.zombie.model())
    }

    /// Hand the zombie to the renderer
    pub fn draw<H: Host + ?Sized>(&self, host: &mut H) {
        log::trace!("Drawing zombie (looked at: {})", self.looked_at);
        host.draw_entity(self.zombie.model(), self.looked_at);
    }

    /// Replace the zombie with one at a fixed spot. Its voices are silenced
    /// without a death cue.
    pub fn spawn_zombie_at(&mut self, position: Vec3, speed: f32) {
        self.zombie.audio().stop_all(self.audio.as_ref());
        self.zombie = Zombie::at(
            &self.config,
            &self.sounds,
            &self.audio,
            self.spawner.as_ref(),
            &mut self.rng,
            position,
            speed,
        );
        self.looked_at = self.gaze.contains(&self.head, self.zombie.model());
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<EngagementEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn zombie(&self) -> &Zombie {
        &self.zombie
    }

    pub fn head(&self) -> &HeadTransform {
        &self.head
    }

    pub fn is_player_alive(&self) -> bool {
        self.player_alive
    }

    /// Gaze result of the latest frame
    pub fn looked_at(&self) -> bool {
        self.looked_at
    }

    /// Frames simulated so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn ambient(&self) -> &AmbientScheduler {
        &self.ambient
    }

    pub fn background(&self) -> &BackgroundTrack {
        &self.background
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
