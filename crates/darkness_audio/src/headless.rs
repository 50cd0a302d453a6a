//! Headless audio engine
//!
//! Keeps a voice table in memory without producing sound. One-shot voices
//! stay audible for a fixed number of engine updates, looped voices until they
//! are stopped. Used by the runtime when no output device is wanted and by
//! tests that need to observe exactly which voices exist.

use crate::engine::SpatialAudio;
use crate::error::AudioError;
use crate::listener::ListenerPose;
use crate::voice::{PlaybackState, VoiceHandle};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Snapshot of a voice
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceInfo {
    pub handle: VoiceHandle,
    pub file: String,
    pub position: [f32; 3],
    pub looped: bool,
    pub state: PlaybackState,
}

struct Voice {
    file: String,
    position: [f32; 3],
    looped: bool,
    state: PlaybackState,
    remaining_updates: u32,
}

#[derive(Default)]
struct Inner {
    voices: HashMap<u64, Voice>,
    next_handle: u64,
    preloaded: HashSet<String>,
    catalog: Option<HashSet<String>>,
    listener: ListenerPose,
    failing_creates: u32,
    created: u64,
    updates: u64,
}

impl Inner {
    fn check_available(&self, file: &str) -> Result<(), AudioError> {
        match &self.catalog {
            Some(catalog) if !catalog.contains(file) => {
                Err(AudioError::FileNotFound(file.to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// In-memory [`SpatialAudio`] engine
pub struct HeadlessAudio {
    inner: Mutex<Inner>,
    one_shot_updates: u32,
}

impl HeadlessAudio {
    /// Create an engine where every file exists
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_handle: 1,
                ..Default::default()
            }),
            one_shot_updates: 120,
        }
    }

    /// Set how many updates a one-shot voice stays audible
    pub fn with_one_shot_updates(mut self, updates: u32) -> Self {
        self.one_shot_updates = updates.max(1);
        self
    }

    /// Restrict the engine to a known set of files; anything else fails to
    /// preload and yields invalid voices
    pub fn with_catalog<I, S>(self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.lock().catalog = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// Make the next `count` voice creations fail
    pub fn fail_next_creates(&self, count: u32) {
        self.inner.lock().failing_creates = count;
    }

    /// Snapshot of a voice still tracked by the engine
    pub fn voice(&self, handle: VoiceHandle) -> Option<VoiceInfo> {
        let inner = self.inner.lock();
        inner.voices.get(&handle.0).map(|voice| snapshot(handle.0, voice))
    }

    /// All currently audible voices, ordered by handle
    pub fn playing_voices(&self) -> Vec<VoiceInfo> {
        let inner = self.inner.lock();
        let mut voices: Vec<_> = inner
            .voices
            .iter()
            .filter(|(_, v)| v.state == PlaybackState::Playing)
            .map(|(&id, v)| snapshot(id, v))
            .collect();
        voices.sort_by_key(|v| v.handle.0);
        voices
    }

    /// Number of audible voices playing one of the given files
    pub fn playing_count_where(&self, mut predicate: impl FnMut(&str) -> bool) -> usize {
        let inner = self.inner.lock();
        inner
            .voices
            .values()
            .filter(|v| v.state == PlaybackState::Playing && predicate(&v.file))
            .count()
    }

    /// Number of voices the engine still tracks
    pub fn live_voice_count(&self) -> usize {
        self.inner.lock().voices.len()
    }

    /// Total voices ever created
    pub fn created_count(&self) -> u64 {
        self.inner.lock().created
    }

    /// Number of engine updates so far
    pub fn update_count(&self) -> u64 {
        self.inner.lock().updates
    }

    /// Whether a file has been preloaded
    pub fn is_preloaded(&self, file: &str) -> bool {
        self.inner.lock().preloaded.contains(file)
    }

    /// Last listener orientation
    pub fn listener(&self) -> ListenerPose {
        self.inner.lock().listener
    }

    /// Let a one-shot voice run out immediately
    pub fn finish(&self, handle: VoiceHandle) {
        if let Some(voice) = self.inner.lock().voices.get_mut(&handle.0) {
            if voice.state == PlaybackState::Playing {
                voice.state = PlaybackState::Finished;
            }
        }
    }
}

impl Default for HeadlessAudio {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot(id: u64, voice: &Voice) -> VoiceInfo {
    VoiceInfo {
        handle: VoiceHandle(id),
        file: voice.file.clone(),
        position: voice.position,
        looped: voice.looped,
        state: voice.state,
    }
}

impl SpatialAudio for HeadlessAudio {
    fn preload(&self, file: &str) -> bool {
        let mut inner = self.inner.lock();
        if let Err(e) = inner.check_available(file) {
            log::warn!("Preload failed: {}", e);
            return false;
        }
        inner.preloaded.insert(file.to_string());
        true
    }

    fn create_voice(&self, file: &str) -> VoiceHandle {
        let mut inner = self.inner.lock();

        if inner.failing_creates > 0 {
            inner.failing_creates -= 1;
            return VoiceHandle::INVALID;
        }
        if let Err(e) = inner.check_available(file) {
            log::warn!("Voice creation failed: {}", e);
            return VoiceHandle::INVALID;
        }

        let id = inner.next_handle;
        inner.next_handle += 1;
        inner.created += 1;
        inner.voices.insert(
            id,
            Voice {
                file: file.to_string(),
                position: [0.0; 3],
                looped: false,
                state: PlaybackState::Created,
                remaining_updates: 0,
            },
        );
        VoiceHandle(id)
    }

    fn set_voice_position(&self, handle: VoiceHandle, position: [f32; 3]) {
        if let Some(voice) = self.inner.lock().voices.get_mut(&handle.0) {
            voice.position = position;
        }
    }

    fn play(&self, handle: VoiceHandle, looped: bool) {
        if let Some(voice) = self.inner.lock().voices.get_mut(&handle.0) {
            if voice.state.is_done() {
                return;
            }
            voice.looped = looped;
            voice.state = PlaybackState::Playing;
            voice.remaining_updates = self.one_shot_updates;
        }
    }

    fn stop(&self, handle: VoiceHandle) {
        if let Some(voice) = self.inner.lock().voices.get_mut(&handle.0) {
            voice.state = PlaybackState::Stopped;
        }
    }

    fn is_playing(&self, handle: VoiceHandle) -> bool {
        self.inner
            .lock()
            .voices
            .get(&handle.0)
            .map(|v| v.state == PlaybackState::Playing)
            .unwrap_or(false)
    }

    fn set_listener_orientation(&self, rotation: [f32; 4]) {
        self.inner.lock().listener = ListenerPose::new(rotation);
    }

    fn update(&self) {
        let mut inner = self.inner.lock();
        inner.updates += 1;

        // Drop voices that ended before this update
        inner.voices.retain(|_, voice| !voice.state.is_done());

        for voice in inner.voices.values_mut() {
            if voice.state == PlaybackState::Playing && !voice.looped {
                voice.remaining_updates = voice.remaining_updates.saturating_sub(1);
                if voice.remaining_updates == 0 {
                    voice.state = PlaybackState::Finished;
                }
            }
        }
    }
}
