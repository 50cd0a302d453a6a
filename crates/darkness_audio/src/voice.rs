//! Voice handles

use serde::{Deserialize, Serialize};

/// Handle to an engine-managed spatial voice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceHandle(pub u64);

impl VoiceHandle {
    /// Sentinel returned when a voice could not be created
    pub const INVALID: VoiceHandle = VoiceHandle(0);

    /// Whether this handle refers to a created voice
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Playback state of a voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Created but never started
    Created,
    /// Currently audible
    Playing,
    /// Ran to the end (one-shot voices only)
    Finished,
    /// Stopped explicitly
    Stopped,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Created
    }
}

impl PlaybackState {
    /// Whether the voice can no longer become audible
    pub fn is_done(self) -> bool {
        matches!(self, Self::Finished | Self::Stopped)
    }
}
