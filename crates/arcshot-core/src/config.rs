//! Targeting configuration supplied by the host.
//!
//! All values are read-only scalars for the duration of a computation. The
//! host may build a `TargetingConfig` in code or load it from JSON.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::LaunchConstraint;
use crate::error::{ConfigError, TargetingError};

/// Parameters for predicting, solving and sampling a shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Gravity magnitude (m/s²), acting along −Y.
    pub gravity: f64,
    /// Active flight constraint.
    pub constraint: LaunchConstraint,
    /// Angle scan step for fixed-speed mode (degrees).
    pub angle_step_deg: f64,
    /// Accepted vertical miss for fixed-speed mode (meters).
    pub tolerance: f64,
    /// Trajectory sampling interval (seconds).
    pub time_step: f64,
    /// Hard cap on trajectory samples.
    pub max_samples: usize,
    /// Added to the predicted target height before solving (meters).
    pub vertical_offset: f64,
    /// How far ahead to predict the target (seconds). When unset, the
    /// fixed-time constraint uses its own time and fixed-speed estimates a
    /// lead horizon from the launch speed.
    pub prediction_horizon: Option<f64>,
    /// Re-poll interval for a launcher that has lost its target (seconds).
    pub target_poll_interval_secs: f64,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
            constraint: LaunchConstraint::default(),
            angle_step_deg: DEFAULT_ANGLE_STEP_DEG,
            tolerance: DEFAULT_TOLERANCE,
            time_step: DEFAULT_TIME_STEP,
            max_samples: MAX_TRAJECTORY_SAMPLES,
            vertical_offset: 0.0,
            prediction_horizon: None,
            target_poll_interval_secs: TARGET_POLL_INTERVAL,
        }
    }
}

impl TargetingConfig {
    /// Parse a JSON document and validate it. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, TargetingError> {
        let config: TargetingConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter against its valid domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_gravity(self.gravity)?;
        validate_constraint(&self.constraint)?;
        validate_search(self.angle_step_deg, self.tolerance)?;
        if !(self.time_step > 0.0 && self.time_step.is_finite()) {
            return Err(ConfigError::NonPositiveTimeStep {
                time_step: self.time_step,
            });
        }
        if self.max_samples == 0 {
            return Err(ConfigError::ZeroSampleCap);
        }
        if let Some(horizon) = self.prediction_horizon {
            if !(horizon >= 0.0) {
                return Err(ConfigError::NegativeHorizon { horizon });
            }
        }
        if !(self.target_poll_interval_secs >= 0.0) {
            return Err(ConfigError::NegativeDuration {
                field: "target_poll_interval_secs",
                value: self.target_poll_interval_secs,
            });
        }
        Ok(())
    }

    /// Same configuration with a different constraint.
    pub fn with_constraint(self, constraint: LaunchConstraint) -> Self {
        Self { constraint, ..self }
    }
}

/// Gravity must be a positive finite magnitude.
pub fn validate_gravity(gravity: f64) -> Result<(), ConfigError> {
    if gravity > 0.0 && gravity.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveGravity { gravity })
    }
}

/// Fixed time must be positive; fixed speed must be non-negative and finite.
pub fn validate_constraint(constraint: &LaunchConstraint) -> Result<(), ConfigError> {
    match *constraint {
        LaunchConstraint::FixedTimeToImpact { time } => {
            if time > 0.0 && time.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::NonPositiveTimeToImpact { time })
            }
        }
        LaunchConstraint::FixedSpeed { speed } => {
            if speed >= 0.0 && speed.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::InvalidLaunchSpeed { speed })
            }
        }
    }
}

/// The angle scan needs a positive, bounded step and a non-negative tolerance.
pub fn validate_search(angle_step_deg: f64, tolerance: f64) -> Result<(), ConfigError> {
    if !(angle_step_deg > 0.0 && angle_step_deg.is_finite()) {
        return Err(ConfigError::NonPositiveAngleStep {
            step: angle_step_deg,
        });
    }
    if angle_step_deg < MIN_ANGLE_STEP_DEG {
        return Err(ConfigError::AngleStepTooSmall {
            step: angle_step_deg,
            min: MIN_ANGLE_STEP_DEG,
        });
    }
    if !(tolerance >= 0.0) {
        return Err(ConfigError::NegativeTolerance { tolerance });
    }
    Ok(())
}
