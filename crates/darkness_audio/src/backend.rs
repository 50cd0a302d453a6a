//! Rodio audio engine
//!
//! Real playback through rodio spatial sinks. Only compiled when the
//! `rodio-backend` feature is enabled.
//!
//! Each voice owns one [`SpatialSink`]. The listener sits at the origin and
//! turning the head moves both ear positions of every live sink.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use parking_lot::Mutex;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source, SpatialSink};

use crate::engine::SpatialAudio;
use crate::error::AudioError;
use crate::listener::ListenerPose;
use crate::settings::AudioSettings;
use crate::voice::{PlaybackState, VoiceHandle};

/// Keeps the output device open. Must outlive the engine and stay on the
/// thread that opened it.
pub struct RodioOutput {
    _stream: OutputStream,
}

struct Voice {
    file: String,
    sink: SpatialSink,
    state: PlaybackState,
}

impl Voice {
    fn refresh_state(&mut self) {
        if self.state == PlaybackState::Playing && self.sink.empty() {
            self.state = PlaybackState::Finished;
        }
    }
}

struct Inner {
    cache: HashMap<String, Arc<[u8]>>,
    voices: HashMap<u64, Voice>,
    next_handle: u64,
    listener: ListenerPose,
}

/// [`SpatialAudio`] engine backed by rodio
pub struct RodioAudio {
    stream_handle: OutputStreamHandle,
    settings: AudioSettings,
    inner: Mutex<Inner>,
}

impl RodioAudio {
    /// Open the default output device
    pub fn open_default(settings: AudioSettings) -> Result<(RodioOutput, RodioAudio), AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::OutputInit(e.to_string()))?;

        log::info!(
            "Audio output opened (assets: {}, volume: {:.2})",
            settings.asset_root,
            settings.master_volume
        );

        Ok((RodioOutput { _stream: stream }, Self::with_handle(stream_handle, settings)))
    }

    /// Create an engine on an existing output stream
    pub fn with_handle(stream_handle: OutputStreamHandle, settings: AudioSettings) -> Self {
        Self {
            stream_handle,
            settings,
            inner: Mutex::new(Inner {
                cache: HashMap::new(),
                voices: HashMap::new(),
                next_handle: 1,
                listener: ListenerPose::default(),
            }),
        }
    }

    /// Engine settings
    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    fn load(&self, file: &str) -> Result<Arc<[u8]>, AudioError> {
        if let Some(bytes) = self.inner.lock().cache.get(file) {
            return Ok(bytes.clone());
        }

        let path = self.settings.resolve(file);
        if !path.exists() {
            return Err(AudioError::FileNotFound(path.display().to_string()));
        }
        let bytes: Arc<[u8]> = std::fs::read(&path)?.into();

        // Validate once so a broken file fails at preload, not mid-frame
        Decoder::new(Cursor::new(bytes.clone())).map_err(|e| AudioError::Decode(e.to_string()))?;

        log::debug!("Cached {} ({} bytes)", file, bytes.len());
        self.inner
            .lock()
            .cache
            .insert(file.to_string(), bytes.clone());
        Ok(bytes)
    }

    fn try_create(&self, file: &str) -> Result<VoiceHandle, AudioError> {
        self.load(file)?;

        let mut inner = self.inner.lock();
        let (left, right) = inner.listener.ear_positions(self.settings.ear_spacing);
        let sink = SpatialSink::try_new(&self.stream_handle, [0.0; 3], left, right)
            .map_err(|e| AudioError::OutputInit(e.to_string()))?;
        sink.set_volume(self.settings.master_volume);

        let id = inner.next_handle;
        inner.next_handle += 1;
        inner.voices.insert(
            id,
            Voice {
                file: file.to_string(),
                sink,
                state: PlaybackState::Created,
            },
        );
        Ok(VoiceHandle(id))
    }

    fn try_play(&self, handle: VoiceHandle, looped: bool) -> Result<(), AudioError> {
        let mut inner = self.inner.lock();
        let Inner { cache, voices, .. } = &mut *inner;

        let Some(voice) = voices.get_mut(&handle.0) else {
            return Ok(());
        };
        if voice.state != PlaybackState::Created {
            return Ok(());
        }

        let bytes = cache
            .get(&voice.file)
            .cloned()
            .ok_or_else(|| AudioError::FileNotFound(voice.file.clone()))?;
        let source =
            Decoder::new(Cursor::new(bytes)).map_err(|e| AudioError::Decode(e.to_string()))?;

        if looped {
            voice.sink.append(source.repeat_infinite());
        } else {
            voice.sink.append(source);
        }
        voice.sink.play();
        voice.state = PlaybackState::Playing;
        Ok(())
    }
}

impl SpatialAudio for RodioAudio {
    fn preload(&self, file: &str) -> bool {
        match self.load(file) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Failed to preload {}: {}", file, e);
                false
            }
        }
    }

    fn create_voice(&self, file: &str) -> VoiceHandle {
        match self.try_create(file) {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("Failed to create voice for {}: {}", file, e);
                VoiceHandle::INVALID
            }
        }
    }

    fn set_voice_position(&self, handle: VoiceHandle, position: [f32; 3]) {
        if let Some(voice) = self.inner.lock().voices.get(&handle.0) {
            voice.sink.set_emitter_position(position);
        }
    }

    fn play(&self, handle: VoiceHandle, looped: bool) {
        if let Err(e) = self.try_play(handle, looped) {
            log::warn!("Failed to play voice {}: {}", handle.0, e);
        }
    }

    fn stop(&self, handle: VoiceHandle) {
        if let Some(voice) = self.inner.lock().voices.get_mut(&handle.0) {
            voice.sink.stop();
            voice.state = PlaybackState::Stopped;
        }
    }

    fn is_playing(&self, handle: VoiceHandle) -> bool {
        match self.inner.lock().voices.get_mut(&handle.0) {
            Some(voice) => {
                voice.refresh_state();
                voice.state == PlaybackState::Playing
            }
            None => false,
        }
    }

    fn set_listener_orientation(&self, rotation: [f32; 4]) {
        let mut inner = self.inner.lock();
        inner.listener = ListenerPose::new(rotation);

        let (left, right) = inner.listener.ear_positions(self.settings.ear_spacing);
        for voice in inner.voices.values() {
            voice.sink.set_left_ear_position(left);
            voice.sink.set_right_ear_position(right);
        }
    }

    fn update(&self) {
        let mut inner = self.inner.lock();
        let before = inner.voices.len();

        inner.voices.retain(|_, voice| {
            voice.refresh_state();
            !voice.state.is_done()
        });

        let released = before - inner.voices.len();
        if released > 0 {
            log::trace!("Released {} finished voices", released);
        }
    }
}
