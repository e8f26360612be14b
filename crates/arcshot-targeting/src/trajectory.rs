//! Lazy sampling of a ballistic arc for visualization.
//!
//! Samples are computed analytically at `t = k * time_step`, so a trajectory
//! holds no integration state and can be cloned or rebuilt from the same
//! inputs to replay the exact same points.

use std::iter::FusedIterator;

use arcshot_core::constants::MAX_TRAJECTORY_SAMPLES;
use arcshot_core::types::Vec3;

/// Position after `t` seconds of free flight, gravity along −Y.
pub fn position_at(launch_point: Vec3, initial_velocity: Vec3, gravity: f64, t: f64) -> Vec3 {
    let gravity_vec = Vec3::new(0.0, -gravity, 0.0);
    launch_point + initial_velocity * t + gravity_vec * (0.5 * t * t)
}

/// Sample one full arc with the default sample cap.
pub fn sample(launch_point: Vec3, initial_velocity: Vec3, gravity: f64, time_step: f64) -> Trajectory {
    sample_with_cap(
        launch_point,
        initial_velocity,
        gravity,
        time_step,
        MAX_TRAJECTORY_SAMPLES,
    )
}

/// Sample one full arc, yielding at most `max_samples` points.
pub fn sample_with_cap(
    launch_point: Vec3,
    initial_velocity: Vec3,
    gravity: f64,
    time_step: f64,
    max_samples: usize,
) -> Trajectory {
    Trajectory {
        launch_point,
        initial_velocity,
        gravity,
        time_step,
        max_samples,
        index: 0,
        risen: false,
        done: false,
    }
}

/// Finite iterator over points of a parabolic arc.
///
/// Ends after the first sample at or below launch height once the arc has
/// risen above it, or when the sample cap is hit. A non-positive time step
/// yields only the launch point.
#[derive(Debug, Clone)]
pub struct Trajectory {
    launch_point: Vec3,
    initial_velocity: Vec3,
    gravity: f64,
    time_step: f64,
    max_samples: usize,
    index: usize,
    risen: bool,
    done: bool,
}

impl Trajectory {
    /// Final sample of the arc: where it comes back to launch height (or the
    /// last point before the cap).
    pub fn landing_point(self) -> Option<Vec3> {
        self.last()
    }
}

impl Iterator for Trajectory {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        if self.done || self.index >= self.max_samples {
            self.done = true;
            return None;
        }

        if !(self.time_step > 0.0) {
            self.index += 1;
            self.done = true;
            return Some(self.launch_point);
        }

        let t = self.index as f64 * self.time_step;
        let point = position_at(self.launch_point, self.initial_velocity, self.gravity, t);
        self.index += 1;

        if point.y > self.launch_point.y {
            self.risen = true;
        } else if self.risen {
            self.done = true;
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.max_samples.saturating_sub(self.index)))
        }
    }
}

impl FusedIterator for Trajectory {}
