//! Runtime error types

use darkness_audio::AudioError;
use darkness_game::{ConfigError, TaskError};
use thiserror::Error;

/// Errors that stop the runtime before or while a round runs
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid environment variable {name}: {value}")]
    Env { name: &'static str, value: String },

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    #[error("Failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
