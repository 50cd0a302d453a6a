//! Audio error types

use thiserror::Error;

/// Errors raised by audio engines.
///
/// These never cross the [`SpatialAudio`](crate::SpatialAudio) boundary; the
/// engines log them and fall back to sentinel values.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Failed to initialize audio output: {0}")]
    OutputInit(String),

    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_error_display() {
        let err = AudioError::FileNotFound("zombie/breathing_1.wav".to_string());
        assert!(err.to_string().contains("zombie/breathing_1.wav"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AudioError = io.into();
        assert!(matches!(err, AudioError::Io(_)));
    }
}
