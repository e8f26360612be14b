//! Ballistic targeting for ARCSHOT.
//!
//! Predicts where a moving target will be, solves the launch velocity that
//! lands a projectile there under constant gravity, and samples the resulting
//! arc for rendering. `Launcher` wraps the pure math in a per-tick state
//! machine that handles cooldowns, spawn delays and target loss.

pub mod launcher;
pub mod predictor;
pub mod solver;
pub mod trajectory;

pub use arcshot_core as core;
pub use launcher::{from_fn, FireOutcome, FiringSolution, Launcher, Shot, TargetProvider};
pub use solver::solve;
pub use trajectory::{sample, Trajectory};
