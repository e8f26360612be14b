//! Targeting constants and default tuning parameters.

/// Standard gravity magnitude (m/s²). Gravity always acts along −Y.
pub const STANDARD_GRAVITY: f64 = 9.81;

// --- Launch solver ---

/// Default angle step for the fixed-speed angle scan (degrees).
pub const DEFAULT_ANGLE_STEP_DEG: f64 = 0.1;

/// Default vertical tolerance for accepting a scanned launch angle (meters).
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Smallest accepted angle step (degrees). Keeps the scan to at most
/// 90 000 candidate angles.
pub const MIN_ANGLE_STEP_DEG: f64 = 1e-3;

/// Upper bound of the angle scan (degrees). The scan covers [0°, 90°].
pub const MAX_LAUNCH_ANGLE_DEG: f64 = 90.0;

/// Horizontal launch speeds below this are treated as near-vertical and
/// skipped by the angle scan (m/s).
pub const MIN_HORIZONTAL_SPEED: f64 = 1e-3;

/// Horizontal distances below this count as "directly above or below" (meters).
pub const HORIZONTAL_EPSILON: f64 = 1e-6;

/// Default time to impact for the fixed-time constraint (seconds).
pub const DEFAULT_TIME_TO_IMPACT: f64 = 2.0;

// --- Trajectory sampling ---

/// Default trajectory sampling interval (seconds).
pub const DEFAULT_TIME_STEP: f64 = 0.05;

/// Hard cap on samples per trajectory, guarding shallow arcs that never
/// come back down to launch height.
pub const MAX_TRAJECTORY_SAMPLES: usize = 512;

// --- Launcher ---

/// Refinement passes when estimating the lead horizon for fixed-speed shots.
pub const LEAD_ITERATIONS: u32 = 2;

/// How often a launcher without a target re-polls its provider (seconds).
pub const TARGET_POLL_INTERVAL: f64 = 0.5;

/// Default cooldown between shots (seconds).
pub const DEFAULT_COOLDOWN_SECS: f64 = 1.0;

/// Throw wind-up before a molotov leaves the hand (seconds).
pub const MOLOTOV_SPAWN_DELAY_SECS: f64 = 0.3;
