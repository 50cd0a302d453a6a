//! Darkness Game - Zombie Approach and Engagement
//!
//! The simulation behind the jump scare: a zombie walks toward the viewer
//! while its breathing and footsteps follow it through a spatial audio
//! engine. Center it in your gaze and pull the trigger to send it back to
//! the edge of the room; let it get close and the round is over.
//!
//! # Features
//!
//! - Radial approach with a fixed per-frame speed and a terminal distance
//! - Per-zombie cue state machine (one-shot breathing, looped footsteps)
//! - Forward-cone gaze test against the head view matrix
//! - Randomly timed ambient water drops
//! - Fire-and-forget cue playback through an injectable [`TaskSpawner`]
//!
//! # Example
//!
//! ```ignore
//! use darkness_game::prelude::*;
//! use darkness_audio::HeadlessAudio;
//! use std::sync::Arc;
//!
//! let mut game = EngagementController::new(
//!     GameConfig::default().with_seed(7),
//!     Arc::new(HeadlessAudio::new()),
//!     Arc::new(InlineSpawner),
//! )?;
//!
//! loop {
//!     if game.on_frame(&HeadTransform::from_yaw(0.0)) != FrameStatus::Alive {
//!         break;
//!     }
//!     game.draw(&mut host);
//! }
//! ```

pub mod ambient;
pub mod audio_state;
pub mod background;
pub mod config;
pub mod cue;
pub mod engagement;
pub mod entity;
pub mod error;
pub mod gaze;
pub mod head;
pub mod slot;
pub mod task;

pub mod prelude {
    pub use crate::ambient::{AmbientCue, AmbientScheduler};
    pub use crate::audio_state::{CueCategory, EntityAudioState};
    pub use crate::background::BackgroundTrack;
    pub use crate::config::GameConfig;
    pub use crate::engagement::{
        EngagementController, EngagementEvent, FrameStatus, Host, TriggerOutcome,
    };
    pub use crate::entity::{Advance, Zombie};
    pub use crate::error::ConfigError;
    pub use crate::gaze::GazeCone;
    pub use crate::head::HeadTransform;
    pub use crate::slot::{SlotState, VoiceSlot};
    pub use crate::task::{InlineSpawner, Task, TaskError, TaskSpawner, WorkerPool};
}

pub use prelude::*;
