//! Enumeration types used throughout targeting.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TIME_TO_IMPACT;

/// Flight constraint the launch solver works under. Exactly one is active per
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LaunchConstraint {
    /// Launch speed is fixed; the solver searches for a launch angle.
    FixedSpeed { speed: f64 },
    /// Time to impact is fixed; velocity components are solved in closed form.
    FixedTimeToImpact { time: f64 },
}

impl Default for LaunchConstraint {
    fn default() -> Self {
        LaunchConstraint::FixedTimeToImpact {
            time: DEFAULT_TIME_TO_IMPACT,
        }
    }
}

impl LaunchConstraint {
    /// Fixed time to impact, if this is the fixed-time mode.
    pub fn time_to_impact(&self) -> Option<f64> {
        match self {
            LaunchConstraint::FixedTimeToImpact { time } => Some(*time),
            LaunchConstraint::FixedSpeed { .. } => None,
        }
    }

    /// Fixed launch speed, if this is the fixed-speed mode.
    pub fn launch_speed(&self) -> Option<f64> {
        match self {
            LaunchConstraint::FixedSpeed { speed } => Some(*speed),
            LaunchConstraint::FixedTimeToImpact { .. } => None,
        }
    }
}

/// Kind of projectile being thrown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectileKind {
    /// Plain impact projectile.
    #[default]
    Rock,
    /// Thrown with a wind-up before it leaves the hand.
    Molotov,
}

impl ProjectileKind {
    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            ProjectileKind::Rock => "rock",
            ProjectileKind::Molotov => "molotov",
        }
    }
}

/// Why a fixed-speed launch found no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReachFailure {
    /// Horizontal distance exceeds the flat-ground range of the launch speed.
    BeyondMaxRange,
    /// Within range, but no scanned angle passes within tolerance of the
    /// target height.
    NoAngleWithinTolerance,
}
