//! Per-zombie cue state machine
//!
//! Two independent cue categories, each backed by one [`VoiceSlot`]:
//! breathing plays as punctuated one-shots, footsteps loop. Whenever the
//! engine reports a category silent, a new file is picked at random and a
//! fresh voice takes its place at the zombie's current position.

use crate::cue::{self, SlotRequest};
use crate::slot::{SlotState, VoiceSlot};
use crate::task::TaskSpawner;
use darkness_audio::{CueSet, SoundLibrary, SpatialAudio};
use rand::Rng;
use std::sync::Arc;

/// Cue categories a zombie voices continuously
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueCategory {
    Breathing,
    Footsteps,
}

impl CueCategory {
    pub const ALL: [CueCategory; 2] = [CueCategory::Breathing, CueCategory::Footsteps];

    /// Footsteps loop seamlessly, breathing is punctuated
    pub fn looped(self) -> bool {
        matches!(self, CueCategory::Footsteps)
    }

    /// Files this category picks from
    pub fn cue_set(self, sounds: &SoundLibrary) -> &CueSet {
        match self {
            CueCategory::Breathing => &sounds.breathing,
            CueCategory::Footsteps => &sounds.footsteps,
        }
    }
}

/// Audio owned by one zombie
pub struct EntityAudioState {
    sounds: Arc<SoundLibrary>,
    breathing: VoiceSlot,
    footsteps: VoiceSlot,
}

impl EntityAudioState {
    pub fn new(sounds: Arc<SoundLibrary>) -> Self {
        Self {
            sounds,
            breathing: VoiceSlot::new(),
            footsteps: VoiceSlot::new(),
        }
    }

    fn slot(&self, category: CueCategory) -> &VoiceSlot {
        match category {
            CueCategory::Breathing => &self.breathing,
            CueCategory::Footsteps => &self.footsteps,
        }
    }

    /// Slot state of a category
    pub fn state(&self, category: CueCategory) -> SlotState {
        self.slot(category).state()
    }

    /// Whether every category has been silenced
    pub fn is_stopped(&self) -> bool {
        CueCategory::ALL
            .iter()
            .all(|&c| self.state(c) == SlotState::Stopped)
    }

    /// Queue the spawn-time breathing cue.
    ///
    /// Warms every file a zombie may use, then creates and plays the first
    /// breathing voice. The zombie is usable before this completes.
    pub fn request_initial<R: Rng + ?Sized>(
        &self,
        audio: &Arc<dyn SpatialAudio>,
        spawner: &dyn TaskSpawner,
        rng: &mut R,
        position: [f32; 3],
    ) {
        let category = CueCategory::Breathing;
        let Some(file) = category.cue_set(&self.sounds).pick(rng) else {
            return;
        };
        let slot = self.slot(category);
        if !slot.begin_request() {
            return;
        }

        let request = SlotRequest {
            preload: self.sounds.zombie_files().map(str::to_string).collect(),
            file: file.to_string(),
            position,
            looped: category.looped(),
        };
        cue::request(audio, spawner, "zombie-initial-cue", slot, request);
    }

    /// Per-frame update: keep live voices on the zombie, replace silent ones
    pub fn tick<R: Rng + ?Sized>(
        &self,
        audio: &dyn SpatialAudio,
        rng: &mut R,
        position: [f32; 3],
    ) {
        for category in CueCategory::ALL {
            let set = category.cue_set(&self.sounds);
            let created = self
                .slot(category)
                .refresh(audio, position, category.looped(), || set.pick(rng));

            if let Some(handle) = created {
                log::trace!("{:?} voice {} at {:?}", category, handle.0, position);
            }
        }
    }

    /// Move every live voice without replacing anything
    pub fn reposition(&self, audio: &dyn SpatialAudio, position: [f32; 3]) {
        for category in CueCategory::ALL {
            self.slot(category).reposition(audio, position);
        }
    }

    /// Stop both categories for good. Idempotent.
    pub fn stop_all(&self, audio: &dyn SpatialAudio) {
        for category in CueCategory::ALL {
            self.slot(category).stop(audio);
        }
    }

    /// Silence the zombie and scream once from where it died
    pub fn on_killed<R: Rng + ?Sized>(
        &self,
        audio: &Arc<dyn SpatialAudio>,
        spawner: &dyn TaskSpawner,
        rng: &mut R,
        position: [f32; 3],
    ) {
        self.stop_all(audio.as_ref());

        match self.sounds.zombie_death.pick(rng) {
            Some(file) => {
                cue::fire(audio, spawner, "zombie-death-cue", file.to_string(), position);
            }
            None => log::warn!("No zombie death sounds configured"),
        }
    }
}
