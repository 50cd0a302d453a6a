//! Looped background bed

use crate::cue::{self, SlotRequest};
use crate::slot::{SlotState, VoiceSlot};
use crate::task::TaskSpawner;
use darkness_audio::SpatialAudio;
use std::sync::Arc;

/// Background track played at the listener for the whole round
#[derive(Debug, Default)]
pub struct BackgroundTrack {
    file: Option<String>,
    slot: VoiceSlot,
}

impl BackgroundTrack {
    pub fn new(file: Option<String>) -> Self {
        Self {
            file,
            slot: VoiceSlot::new(),
        }
    }

    /// Queue the track. Does nothing without a file or once started.
    pub fn start(&self, audio: &Arc<dyn SpatialAudio>, spawner: &dyn TaskSpawner) {
        let Some(file) = &self.file else {
            return;
        };
        if !self.slot.begin_request() {
            return;
        }

        log::debug!("Starting background track {}", file);
        let request = SlotRequest {
            preload: Vec::new(),
            file: file.clone(),
            position: [0.0; 3],
            looped: true,
        };
        cue::request(audio, spawner, "background-track", &self.slot, request);
    }

    /// Stop the track for good
    pub fn stop(&self, audio: &dyn SpatialAudio) {
        self.slot.stop(audio);
    }

    /// Slot state of the track
    pub fn state(&self) -> SlotState {
        self.slot.state()
    }
}
