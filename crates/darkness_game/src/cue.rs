//! Background cue playback
//!
//! Two flavours of preload/create/play sequence run on the spawner:
//! one-shots nobody tracks afterwards, and requests whose voice is handed to
//! a [`VoiceSlot`] once it exists.

use crate::slot::VoiceSlot;
use crate::task::{submit, TaskSpawner};
use darkness_audio::{play_positioned, SpatialAudio};
use std::sync::Arc;

/// Play a one-shot cue in the background. Its handle is never seen again.
pub fn fire(
    audio: &Arc<dyn SpatialAudio>,
    spawner: &dyn TaskSpawner,
    label: &'static str,
    file: String,
    position: [f32; 3],
) -> bool {
    let audio = Arc::clone(audio);
    log::debug!("Queueing {} cue {} at {:?}", label, file, position);

    submit(spawner, label, move || {
        play_positioned(audio.as_ref(), &file, position, false);
    })
}

/// What a slot request should play
pub struct SlotRequest {
    /// Files to warm before creating the voice
    pub preload: Vec<String>,
    pub file: String,
    pub position: [f32; 3],
    pub looped: bool,
}

/// Create a voice in the background and hand it to `slot`.
///
/// The slot must already be marked as requesting. If submission fails the
/// slot is released again so a later tick can retry.
pub fn request(
    audio: &Arc<dyn SpatialAudio>,
    spawner: &dyn TaskSpawner,
    label: &'static str,
    slot: &VoiceSlot,
    request: SlotRequest,
) -> bool {
    let audio = Arc::clone(audio);
    let task_slot = slot.clone();

    let accepted = submit(spawner, label, move || {
        let SlotRequest {
            preload,
            file,
            position,
            looped,
        } = request;

        for f in &preload {
            if !audio.preload(f) {
                log::warn!("Could not preload {}", f);
            }
        }
        if !preload.iter().any(|f| f == &file) && !audio.preload(&file) {
            log::warn!("Could not preload {}", file);
        }

        let handle = audio.create_voice(&file);
        task_slot.fulfil(audio.as_ref(), handle, position, looped);
    });

    if !accepted {
        slot.release_request();
    }
    accepted
}
