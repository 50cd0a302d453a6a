//! Single-voice slots
//!
//! A slot holds at most one voice for one cue. It is shared between the
//! frame thread and a background request, so it lives behind a mutex.

use darkness_audio::{SpatialAudio, VoiceHandle};
use parking_lot::Mutex;
use std::sync::Arc;

/// State of a voice slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    /// No voice held
    #[default]
    Idle,
    /// A background request will deliver the voice
    Requesting,
    /// Holding a voice the engine may still be playing
    Playing(VoiceHandle),
    /// Silenced for good
    Stopped,
}

/// Shared single-voice slot
#[derive(Debug, Clone, Default)]
pub struct VoiceSlot {
    state: Arc<Mutex<SlotState>>,
}

impl VoiceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> SlotState {
        *self.state.lock()
    }

    /// Mark the slot as awaiting a background voice.
    ///
    /// Only an idle slot can start a request.
    pub fn begin_request(&self) -> bool {
        let mut state = self.state.lock();
        if *state != SlotState::Idle {
            return false;
        }
        *state = SlotState::Requesting;
        true
    }

    /// Undo [`begin_request`](Self::begin_request) when the request never ran
    pub fn release_request(&self) {
        let mut state = self.state.lock();
        if *state == SlotState::Requesting {
            *state = SlotState::Idle;
        }
    }

    /// Deliver the voice of a background request.
    ///
    /// Plays it if the slot is still waiting for it, stops it otherwise.
    pub fn fulfil(
        &self,
        audio: &dyn SpatialAudio,
        handle: VoiceHandle,
        position: [f32; 3],
        looped: bool,
    ) {
        let mut state = self.state.lock();

        if *state != SlotState::Requesting {
            // Stopped while the request was in flight
            audio.stop(handle);
            return;
        }

        if !handle.is_valid() {
            log::warn!("Background request produced no voice; retrying next tick");
            *state = SlotState::Idle;
            return;
        }

        audio.set_voice_position(handle, position);
        audio.play(handle, looped);
        *state = SlotState::Playing(handle);
    }

    /// Keep the voice in place, or replace it once the engine reports it
    /// silent. `pick` supplies the file for a replacement.
    ///
    /// Returns the new handle when a voice was created.
    pub fn refresh<'a>(
        &self,
        audio: &dyn SpatialAudio,
        position: [f32; 3],
        looped: bool,
        pick: impl FnOnce() -> Option<&'a str>,
    ) -> Option<VoiceHandle> {
        let mut state = self.state.lock();

        match *state {
            SlotState::Requesting | SlotState::Stopped => return None,
            SlotState::Playing(handle) if audio.is_playing(handle) => {
                audio.set_voice_position(handle, position);
                return None;
            }
            _ => {}
        }

        // The previous voice, if any, is left to the engine
        let Some(file) = pick() else {
            *state = SlotState::Idle;
            return None;
        };

        let handle = audio.create_voice(file);
        if !handle.is_valid() {
            log::warn!("Invalid voice for {}; retrying next tick", file);
            *state = SlotState::Idle;
            return None;
        }

        audio.set_voice_position(handle, position);
        audio.play(handle, looped);
        *state = SlotState::Playing(handle);
        Some(handle)
    }

    /// Move the held voice
    pub fn reposition(&self, audio: &dyn SpatialAudio, position: [f32; 3]) {
        if let SlotState::Playing(handle) = *self.state.lock() {
            audio.set_voice_position(handle, position);
        }
    }

    /// Stop the held voice and close the slot. Idempotent.
    pub fn stop(&self, audio: &dyn SpatialAudio) {
        let mut state = self.state.lock();
        if let SlotState::Playing(handle) = *state {
            audio.stop(handle);
        }
        *state = SlotState::Stopped;
    }
}
