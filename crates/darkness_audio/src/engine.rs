//! The spatial audio capability

use crate::voice::VoiceHandle;

/// Handle-based spatial audio engine.
///
/// Engines are shared between the frame thread and any number of background
/// cue tasks, so every method takes `&self` and implementations synchronize
/// internally. Failures are reported through sentinels, never panics:
/// `create_voice` returns [`VoiceHandle::INVALID`] and every other call on an
/// invalid or finished handle is a no-op.
pub trait SpatialAudio: Send + Sync {
    /// Decode and cache a sound file. Safe to call repeatedly.
    fn preload(&self, file: &str) -> bool;

    /// Create a voice for a sound file
    fn create_voice(&self, file: &str) -> VoiceHandle;

    /// Move a voice in world space
    fn set_voice_position(&self, handle: VoiceHandle, position: [f32; 3]);

    /// Start playback, optionally looping forever
    fn play(&self, handle: VoiceHandle, looped: bool);

    /// Stop playback
    fn stop(&self, handle: VoiceHandle);

    /// Whether the voice is currently audible
    fn is_playing(&self, handle: VoiceHandle) -> bool;

    /// Orient the listener's head (quaternion as `[x, y, z, w]`)
    fn set_listener_orientation(&self, rotation: [f32; 4]);

    /// Per-frame engine update
    fn update(&self);
}

/// Preload, create, position and start a voice in one go.
///
/// This is the sequence every fire-and-forget cue runs on a background task.
/// Returns the new handle, or [`VoiceHandle::INVALID`] if the engine refused
/// to create a voice.
pub fn play_positioned(
    audio: &dyn SpatialAudio,
    file: &str,
    position: [f32; 3],
    looped: bool,
) -> VoiceHandle {
    if !audio.preload(file) {
        log::warn!("Could not preload {}", file);
    }

    let handle = audio.create_voice(file);
    if !handle.is_valid() {
        log::warn!("Engine returned an invalid voice for {}", file);
        return handle;
    }

    audio.set_voice_position(handle, position);
    audio.play(handle, looped);
    log::debug!("Playing {} at {:?} (voice {})", file, position, handle.0);
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessAudio;

    #[test]
    fn test_play_positioned() {
        let audio = HeadlessAudio::new();
        let handle = play_positioned(&audio, "handgun_shot.wav", [0.0, -10.0, 0.0], false);

        assert!(handle.is_valid());
        assert!(audio.is_playing(handle));
        assert!(audio.is_preloaded("handgun_shot.wav"));

        let info = audio.voice(handle).unwrap();
        assert_eq!(info.position, [0.0, -10.0, 0.0]);
        assert!(!info.looped);
    }

    #[test]
    fn test_play_positioned_invalid() {
        let audio = HeadlessAudio::new();
        audio.fail_next_creates(1);

        let handle = play_positioned(&audio, "handgun_shot.wav", [0.0; 3], false);
        assert_eq!(handle, VoiceHandle::INVALID);
        assert_eq!(audio.live_voice_count(), 0);
    }
}
