//! Launch velocity solver.
//!
//! Works in the displacement frame: the launch point is the origin and the
//! predicted target sits at `displacement`. Horizontal (XZ) and vertical (Y)
//! motion are solved independently since gravity only acts on Y.
//!
//! Two modes, selected by `LaunchConstraint`:
//! - fixed time to impact: closed form, always feasible.
//! - fixed launch speed: linear scan over elevation angles, first match wins.
//!
//! The solver never substitutes a fallback shot. An unreachable target comes
//! back as `LaunchSolution { feasible: false, .. }`.

use tracing::{debug, warn};

use arcshot_core::config::{validate_constraint, validate_gravity, validate_search};
use arcshot_core::constants::*;
use arcshot_core::enums::LaunchConstraint;
use arcshot_core::error::TargetingError;
use arcshot_core::types::{decompose, horizontal_direction, LaunchSolution, Vec3};

/// Compute the initial velocity that carries a projectile across `displacement`.
///
/// `angle_step_deg` and `tolerance` only matter for fixed-speed mode. Invalid
/// gravity or constraint values fail the call; no partial result is produced.
///
/// In fixed-speed mode a target whose horizontal distance is below
/// `HORIZONTAL_EPSILON`, or whose distance is within `tolerance` and missed
/// by the scan, gets a straight-up shot when one can reach its height.
pub fn solve(
    displacement: Vec3,
    gravity: f64,
    constraint: LaunchConstraint,
    angle_step_deg: f64,
    tolerance: f64,
) -> Result<LaunchSolution, TargetingError> {
    validate_gravity(gravity)?;
    validate_constraint(&constraint)?;

    let solution = match constraint {
        LaunchConstraint::FixedTimeToImpact { time } => solve_fixed_time(displacement, gravity, time),
        LaunchConstraint::FixedSpeed { speed } => {
            validate_search(angle_step_deg, tolerance)?;
            solve_fixed_speed(displacement, gravity, speed, angle_step_deg, tolerance)
        }
    };
    Ok(solution)
}

/// Closed-form solution for a fixed flight time. Assumes validated inputs.
fn solve_fixed_time(displacement: Vec3, gravity: f64, time: f64) -> LaunchSolution {
    let (x, y) = decompose(displacement);
    let dir = flight_direction(displacement, x);

    let v0x = x / time;
    let v0y = (y + 0.5 * gravity * time * time) / time;

    let solution = build_solution(dir, v0x, v0y, gravity, time);
    debug!(
        x,
        y,
        time,
        v0x,
        v0y,
        angle_deg = solution.launch_angle_deg,
        "fixed-time launch solved"
    );
    solution
}

/// Angle scan for a fixed launch speed. Assumes validated inputs.
fn solve_fixed_speed(
    displacement: Vec3,
    gravity: f64,
    speed: f64,
    angle_step_deg: f64,
    tolerance: f64,
) -> LaunchSolution {
    let (x, y) = decompose(displacement);

    let range = max_range(speed, gravity);
    if x > range {
        warn!(
            horizontal = x,
            max_range = range,
            "target out of range for fixed launch speed"
        );
        return LaunchSolution::infeasible();
    }

    if x < HORIZONTAL_EPSILON {
        return solve_vertical(y, gravity, speed);
    }

    let scanned = scan_angles(displacement, x, y, gravity, speed, angle_step_deg, tolerance);
    if let Some(solution) = scanned {
        return solution;
    }

    // Steep shots near the vertical line are skipped by the scan. A target
    // within tolerance of that line is still hit by firing straight up.
    if x <= tolerance {
        let solution = solve_vertical(y, gravity, speed);
        if solution.feasible {
            debug!(x, y, speed, "near-vertical target solved with a straight-up shot");
            return solution;
        }
    }

    warn!(
        x,
        y,
        speed,
        tolerance,
        "no launch angle within tolerance"
    );
    LaunchSolution::infeasible()
}

/// First angle in `[0°, 90°]` whose arc crosses `x` within `tolerance` of `y`.
fn scan_angles(
    displacement: Vec3,
    x: f64,
    y: f64,
    gravity: f64,
    speed: f64,
    angle_step_deg: f64,
    tolerance: f64,
) -> Option<LaunchSolution> {
    let dir = horizontal_direction(displacement);
    // Bounded by the minimum step enforced in validation.
    let steps = (MAX_LAUNCH_ANGLE_DEG / angle_step_deg).floor() as u64;

    for i in 0..=steps {
        let deg = i as f64 * angle_step_deg;
        let theta = deg.to_radians();
        let v0x = speed * theta.cos();
        let v0y = speed * theta.sin();

        // Near-vertical: time of flight blows up.
        if v0x < MIN_HORIZONTAL_SPEED {
            continue;
        }

        let t = x / v0x;
        let y_calc = v0y * t - 0.5 * gravity * t * t;
        if (y_calc - y).abs() <= tolerance {
            debug!(
                x,
                y,
                speed,
                angle_deg = deg,
                flight_time = t,
                miss = y_calc - y,
                "fixed-speed launch solved"
            );
            return Some(build_solution(dir, v0x, v0y, gravity, t));
        }
    }
    None
}

/// Target directly above or below the launch point: fire straight up, which
/// passes every height up to `speed² / 2g` (and everything below on the way
/// down).
fn solve_vertical(y: f64, gravity: f64, speed: f64) -> LaunchSolution {
    let peak = speed * speed / (2.0 * gravity);
    if y > peak {
        warn!(y, peak, speed, "target directly overhead is above the reachable peak");
        return LaunchSolution::infeasible();
    }

    let disc = (speed * speed - 2.0 * gravity * y).max(0.0).sqrt();
    // First crossing on the way up when above, the descending one when below.
    let flight_time = if y >= 0.0 {
        (speed - disc) / gravity
    } else {
        (speed + disc) / gravity
    };

    build_solution(Vec3::ZERO, 0.0, speed, gravity, flight_time)
}

/// Direction of horizontal travel, zero when the target is straight above or below.
fn flight_direction(displacement: Vec3, horizontal: f64) -> Vec3 {
    if horizontal < HORIZONTAL_EPSILON {
        Vec3::ZERO
    } else {
        horizontal_direction(displacement)
    }
}

fn build_solution(dir: Vec3, v0x: f64, v0y: f64, gravity: f64, flight_time: f64) -> LaunchSolution {
    let initial_velocity = dir * v0x + Vec3::Y * v0y;
    let horizontal_speed = if dir == Vec3::ZERO { 0.0 } else { v0x };
    LaunchSolution {
        initial_velocity,
        feasible: true,
        apex: apex_offset(initial_velocity, gravity),
        launch_angle_deg: v0y.atan2(horizontal_speed).to_degrees(),
        flight_time,
    }
}

/// Maximum horizontal range on flat ground for a launch speed (45° shot).
pub fn max_range(speed: f64, gravity: f64) -> f64 {
    speed * speed * (2.0 * 45f64.to_radians()).sin() / gravity
}

/// Offset from the launch point to the highest point of the arc.
///
/// A velocity that is not rising peaks at the launch point itself.
pub fn apex_offset(initial_velocity: Vec3, gravity: f64) -> Vec3 {
    let v0y = initial_velocity.y;
    if v0y <= 0.0 {
        return Vec3::ZERO;
    }
    let t_apex = v0y / gravity;
    let h_max = v0y * v0y / (2.0 * gravity);
    let horizontal = Vec3::new(initial_velocity.x, 0.0, initial_velocity.z);
    horizontal * t_apex + Vec3::Y * h_max
}

/// Manual aim: flatten `forward` onto the XZ plane, pitch it up by
/// `elevation_deg` and scale to `speed`.
///
/// A vertical `forward` has no heading; only the vertical component remains.
pub fn direct_launch(forward: Vec3, elevation_deg: f64, speed: f64) -> Vec3 {
    let heading = horizontal_direction(forward);
    let theta = elevation_deg.to_radians();
    (heading * theta.cos() + Vec3::Y * theta.sin()) * speed
}
