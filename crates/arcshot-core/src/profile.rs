//! Projectile profiles: per-projectile timing data the launcher needs.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COOLDOWN_SECS, MOLOTOV_SPAWN_DELAY_SECS};
use crate::enums::ProjectileKind;

/// Timing and identity of the projectile currently loaded in a launcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileProfile {
    pub kind: ProjectileKind,
    /// Minimum interval between two shots (seconds).
    pub cooldown_secs: f64,
    /// Wind-up between the fire request and the projectile leaving (seconds).
    pub spawn_delay_secs: f64,
}

impl ProjectileProfile {
    /// Default profile for a projectile kind.
    pub fn for_kind(kind: ProjectileKind) -> Self {
        let spawn_delay_secs = match kind {
            ProjectileKind::Rock => 0.0,
            ProjectileKind::Molotov => MOLOTOV_SPAWN_DELAY_SECS,
        };
        Self {
            kind,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            spawn_delay_secs,
        }
    }
}

impl Default for ProjectileProfile {
    fn default() -> Self {
        Self::for_kind(ProjectileKind::Rock)
    }
}
