//! Game error types

use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Engage distance {min} must be below spawn distance {max}")]
    DistanceOrder { min: f32, max: f32 },

    #[error("Cue set '{0}' has no files")]
    EmptyCueSet(&'static str),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("frame_rate", "must be positive");
        assert_eq!(err.to_string(), "Invalid frame_rate: must be positive");

        let err = ConfigError::EmptyCueSet("footsteps");
        assert!(err.to_string().contains("footsteps"));
    }
}
