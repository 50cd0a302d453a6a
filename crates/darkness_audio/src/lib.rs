//! Darkness Audio - Spatial Voice Capability
//!
//! The simulation never talks to a sound card directly. It drives a
//! handle-based [`SpatialAudio`] engine: preload a file, create a voice,
//! position it, play it, poll whether it is still playing.
//!
//! # Engines
//!
//! - [`HeadlessAudio`]: in-memory engine with deterministic voice lifetimes,
//!   used by tests and by the runtime when no output device is wanted
//! - `RodioAudio`: real binaural-ish playback through rodio spatial sinks
//!   (requires the `rodio-backend` feature)
//!
//! # Example
//!
//! ```ignore
//! use darkness_audio::prelude::*;
//!
//! let audio = HeadlessAudio::new();
//! audio.preload("water/water_drops_1.wav");
//! let voice = audio.create_voice("water/water_drops_1.wav");
//! audio.set_voice_position(voice, [3.0, 0.0, 1.5]);
//! audio.play(voice, false);
//! ```

pub mod engine;
pub mod error;
pub mod headless;
pub mod library;
pub mod listener;
pub mod settings;
pub mod voice;

#[cfg(feature = "rodio-backend")]
pub mod backend;

#[cfg(feature = "rodio-backend")]
pub use backend::{RodioAudio, RodioOutput};

pub mod prelude {
    pub use crate::engine::{play_positioned, SpatialAudio};
    pub use crate::error::AudioError;
    pub use crate::headless::{HeadlessAudio, VoiceInfo};
    pub use crate::library::{CueSet, SoundLibrary};
    pub use crate::settings::AudioSettings;
    pub use crate::voice::{PlaybackState, VoiceHandle};
}

pub use prelude::*;
