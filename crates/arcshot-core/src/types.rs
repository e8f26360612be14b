//! Fundamental geometric and targeting types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D vector in world space (meters or m/s). Y is up.
pub type Vec3 = DVec3;

/// Point-in-time read of a moving target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    /// Current world position of the target.
    pub position: Vec3,
    /// Current velocity of the target (m/s).
    pub velocity: Vec3,
}

impl TargetSnapshot {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    /// A target that is not moving.
    pub fn stationary(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
        }
    }
}

/// Result of a single launch computation.
///
/// `apex` is relative to the launch point, which is the origin of the
/// displacement frame the solver works in. Use [`LaunchSolution::apex_from`]
/// to get the world-space apex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchSolution {
    /// Velocity to apply to the projectile at launch (m/s).
    pub initial_velocity: Vec3,
    /// Whether the target is reachable under the active constraint.
    pub feasible: bool,
    /// Highest point of the arc, relative to the launch point.
    pub apex: Vec3,
    /// Elevation of `initial_velocity` above the horizontal plane (degrees).
    pub launch_angle_deg: f64,
    /// Time for the arc to cover the displacement (seconds).
    pub flight_time: f64,
}

impl LaunchSolution {
    /// Solution reported when the target cannot be reached. Carries no velocity;
    /// the caller decides what to do instead.
    pub fn infeasible() -> Self {
        Self {
            initial_velocity: Vec3::ZERO,
            feasible: false,
            apex: Vec3::ZERO,
            launch_angle_deg: 0.0,
            flight_time: 0.0,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// World-space apex for a projectile launched from `launch_point`.
    pub fn apex_from(&self, launch_point: Vec3) -> Vec3 {
        launch_point + self.apex
    }

    /// Launch speed magnitude (m/s).
    pub fn speed(&self) -> f64 {
        self.initial_velocity.length()
    }
}

/// Split a displacement into its horizontal (XZ) distance and vertical (Y) part.
pub fn decompose(displacement: Vec3) -> (f64, f64) {
    let horizontal = (displacement.x * displacement.x + displacement.z * displacement.z).sqrt();
    (horizontal, displacement.y)
}

/// Unit direction of the XZ projection of `v`, or zero when it has no
/// horizontal extent.
pub fn horizontal_direction(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}
