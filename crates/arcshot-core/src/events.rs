//! Events emitted by a launcher for rendering and gameplay feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{ProjectileKind, ReachFailure};
use crate::types::Vec3;

/// Launcher notifications, buffered until the caller drains them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LaunchEvent {
    /// Provider returned a target after having none.
    TargetAcquired { position: Vec3 },
    /// Provider stopped returning a target.
    TargetLost,
    /// No launch reaches the predicted target.
    OutOfReach {
        reason: ReachFailure,
        horizontal_distance: f64,
        max_range: f64,
    },
    /// Fire request accepted; the projectile leaves after its spawn delay.
    ProjectileSpawned { kind: ProjectileKind, fire_at: f64 },
    /// Projectile released with the given initial velocity.
    ProjectileShot {
        kind: ProjectileKind,
        velocity: Vec3,
        launch_point: Vec3,
    },
}
