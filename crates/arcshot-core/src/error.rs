//! Error types for targeting operations.
//!
//! Only invalid configuration is an error. An unreachable target is an
//! expected outcome and is reported through `LaunchSolution::feasible`.

use thiserror::Error;

/// Top-level error type for ARCSHOT operations.
#[derive(Debug, Error)]
pub enum TargetingError {
    /// A parameter is out of its valid domain. Fatal to the call.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Configuration text could not be parsed.
    #[error("failed to parse targeting config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Invalid targeting parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("gravity must be a positive finite magnitude, got {gravity}")]
    NonPositiveGravity { gravity: f64 },

    #[error("time to impact must be positive, got {time}")]
    NonPositiveTimeToImpact { time: f64 },

    #[error("launch speed must be a non-negative finite value, got {speed}")]
    InvalidLaunchSpeed { speed: f64 },

    #[error("angle step must be positive, got {step}")]
    NonPositiveAngleStep { step: f64 },

    #[error("angle step must be at least {min} degrees, got {step}")]
    AngleStepTooSmall { step: f64, min: f64 },

    #[error("tolerance must be non-negative, got {tolerance}")]
    NegativeTolerance { tolerance: f64 },

    #[error("trajectory time step must be positive, got {time_step}")]
    NonPositiveTimeStep { time_step: f64 },

    #[error("trajectory sample cap must be at least 1")]
    ZeroSampleCap,

    #[error("prediction horizon must be non-negative, got {horizon}")]
    NegativeHorizon { horizon: f64 },

    #[error("{field} must be non-negative, got {value}")]
    NegativeDuration { field: &'static str, value: f64 },
}

impl TargetingError {
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, TargetingError::InvalidConfiguration(_))
    }
}
