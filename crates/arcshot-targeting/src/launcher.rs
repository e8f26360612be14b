//! Per-tick targeting state around the pure solver.
//!
//! Each tick the host calls [`Launcher::aim`] with the launch point and a
//! target provider, optionally [`Launcher::fire`], then [`Launcher::tick`] to
//! release delayed shots, and finally drains events with
//! [`Launcher::drain_events`]. The launcher owns no physics: released shots
//! are handed back as [`Shot`] values for the host to apply as an impulse.
//!
//! Infeasible solutions are returned to the caller, never fired, and never
//! replaced by a fallback velocity.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use arcshot_core::config::TargetingConfig;
use arcshot_core::constants::LEAD_ITERATIONS;
use arcshot_core::enums::{LaunchConstraint, ProjectileKind, ReachFailure};
use arcshot_core::error::{ConfigError, TargetingError};
use arcshot_core::events::LaunchEvent;
use arcshot_core::profile::ProjectileProfile;
use arcshot_core::types::{decompose, LaunchSolution, TargetSnapshot, Vec3};

use crate::predictor::{lead_horizon, predict};
use crate::solver::{max_range, solve};
use crate::trajectory::{sample_with_cap, Trajectory};

/// Source of target snapshots, queried at most once per tick.
pub trait TargetProvider {
    /// Current target state, or `None` when there is nothing to aim at.
    fn snapshot(&mut self) -> Option<TargetSnapshot>;
}

impl TargetProvider for Option<TargetSnapshot> {
    fn snapshot(&mut self) -> Option<TargetSnapshot> {
        *self
    }
}

/// Provider backed by a closure. See [`from_fn`].
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

impl<F> TargetProvider for FromFn<F>
where
    F: FnMut() -> Option<TargetSnapshot>,
{
    fn snapshot(&mut self) -> Option<TargetSnapshot> {
        (self.0)()
    }
}

/// Wrap a closure as a [`TargetProvider`].
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Option<TargetSnapshot>,
{
    FromFn(f)
}

/// Everything computed for one aim pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringSolution {
    pub launch_point: Vec3,
    /// Predicted target position, vertical offset applied.
    pub target_point: Vec3,
    /// Prediction horizon used (seconds), spawn delay included.
    pub horizon: f64,
    pub solution: LaunchSolution,
}

impl FiringSolution {
    pub fn is_feasible(&self) -> bool {
        self.solution.feasible
    }

    /// World-space apex of the arc.
    pub fn apex_world(&self) -> Vec3 {
        self.solution.apex_from(self.launch_point)
    }
}

/// A projectile leaving the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub kind: ProjectileKind,
    pub velocity: Vec3,
    pub launch_point: Vec3,
    pub released_at: f64,
}

/// Result of a fire request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireOutcome {
    /// Released immediately.
    Shot(Shot),
    /// Accepted; released by `tick` once the spawn delay has passed.
    Scheduled { fire_at: f64 },
    /// Another shot is still winding up.
    Pending { fire_at: f64 },
    /// Cooldown from the previous shot has not expired.
    CoolingDown { ready_at: f64 },
    /// The solution cannot reach its target; nothing was fired.
    Infeasible,
}

#[derive(Debug, Clone, Copy)]
struct PendingShot {
    kind: ProjectileKind,
    velocity: Vec3,
    launch_point: Vec3,
    fire_at: f64,
}

/// Stateful targeting wrapper driven once per simulation tick.
#[derive(Debug, Clone)]
pub struct Launcher {
    config: TargetingConfig,
    profile: ProjectileProfile,
    has_target: bool,
    next_poll_time: f64,
    next_fire_time: f64,
    pending: Option<PendingShot>,
    events: Vec<LaunchEvent>,
}

impl Launcher {
    /// Create a launcher, validating the configuration and profile up front.
    pub fn new(config: TargetingConfig, profile: ProjectileProfile) -> Result<Self, TargetingError> {
        config.validate()?;
        validate_profile(&profile)?;
        Ok(Self {
            config,
            profile,
            has_target: false,
            next_poll_time: f64::NEG_INFINITY,
            next_fire_time: f64::NEG_INFINITY,
            pending: None,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    pub fn profile(&self) -> &ProjectileProfile {
        &self.profile
    }

    /// Whether the provider returned a target on the last poll.
    pub fn has_target(&self) -> bool {
        self.has_target
    }

    /// Earliest time the next shot may be released.
    pub fn ready_at(&self) -> f64 {
        self.next_fire_time
    }

    /// Swap the loaded projectile. A shot already winding up keeps its kind.
    pub fn set_profile(&mut self, profile: ProjectileProfile) -> Result<(), TargetingError> {
        validate_profile(&profile)?;
        debug!(kind = profile.kind.name(), "projectile switched");
        self.profile = profile;
        Ok(())
    }

    /// Poll the provider, predict the target and solve the launch.
    ///
    /// Returns `Ok(None)` when there is no target this tick. An unreachable
    /// target still yields a `FiringSolution` with `feasible == false`.
    pub fn aim(
        &mut self,
        now: f64,
        launch_point: Vec3,
        provider: &mut impl TargetProvider,
    ) -> Result<Option<FiringSolution>, TargetingError> {
        let snapshot = match self.poll_target(now, provider) {
            Some(s) => s,
            None => return Ok(None),
        };

        let horizon = self.horizon(&snapshot, launch_point);
        let target_point = predict(&snapshot, horizon) + Vec3::Y * self.config.vertical_offset;
        let displacement = target_point - launch_point;

        let solution = solve(
            displacement,
            self.config.gravity,
            self.config.constraint,
            self.config.angle_step_deg,
            self.config.tolerance,
        )?;

        if !solution.feasible {
            self.report_out_of_reach(displacement);
        }

        trace!(
            now,
            horizon,
            feasible = solution.feasible,
            "aim pass complete"
        );

        Ok(Some(FiringSolution {
            launch_point,
            target_point,
            horizon,
            solution,
        }))
    }

    /// Request a shot using `firing`.
    pub fn fire(&mut self, now: f64, firing: &FiringSolution) -> FireOutcome {
        if !firing.solution.feasible {
            return FireOutcome::Infeasible;
        }
        if let Some(pending) = &self.pending {
            return FireOutcome::Pending {
                fire_at: pending.fire_at,
            };
        }
        if now < self.next_fire_time {
            return FireOutcome::CoolingDown {
                ready_at: self.next_fire_time,
            };
        }

        let fire_at = now + self.profile.spawn_delay_secs;
        self.events.push(LaunchEvent::ProjectileSpawned {
            kind: self.profile.kind,
            fire_at,
        });

        let pending = PendingShot {
            kind: self.profile.kind,
            velocity: firing.solution.initial_velocity,
            launch_point: firing.launch_point,
            fire_at,
        };

        if self.profile.spawn_delay_secs <= 0.0 {
            FireOutcome::Shot(self.release(now, pending))
        } else {
            debug!(fire_at, kind = pending.kind.name(), "shot scheduled");
            self.pending = Some(pending);
            FireOutcome::Scheduled { fire_at }
        }
    }

    /// Release a scheduled shot once its spawn delay has passed.
    ///
    /// When `latest` holds a feasible solution, the shot leaves with that
    /// fresher velocity and launch point instead of the ones captured by `fire`.
    pub fn tick(&mut self, now: f64, latest: Option<&FiringSolution>) -> Option<Shot> {
        let mut pending = match self.pending {
            Some(p) if now >= p.fire_at => p,
            _ => return None,
        };
        self.pending = None;

        if let Some(fresh) = latest.filter(|f| f.is_feasible()) {
            pending.velocity = fresh.solution.initial_velocity;
            pending.launch_point = fresh.launch_point;
        }
        Some(self.release(now, pending))
    }

    /// Drop a scheduled shot without releasing it.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Take all buffered events, oldest first.
    pub fn drain_events(&mut self) -> Vec<LaunchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Sampled arc of a firing solution using the configured step and cap.
    pub fn trajectory(&self, firing: &FiringSolution) -> Trajectory {
        sample_with_cap(
            firing.launch_point,
            firing.solution.initial_velocity,
            self.config.gravity,
            self.config.time_step,
            self.config.max_samples,
        )
    }

    fn poll_target(
        &mut self,
        now: f64,
        provider: &mut impl TargetProvider,
    ) -> Option<TargetSnapshot> {
        if !self.has_target && now < self.next_poll_time {
            trace!(now, next_poll = self.next_poll_time, "waiting to re-poll target");
            return None;
        }

        match provider.snapshot() {
            Some(snapshot) => {
                if !self.has_target {
                    self.has_target = true;
                    debug!(position = ?snapshot.position, "target acquired");
                    self.events.push(LaunchEvent::TargetAcquired {
                        position: snapshot.position,
                    });
                }
                Some(snapshot)
            }
            None => {
                if self.has_target {
                    self.has_target = false;
                    warn!("target lost; polling for a new one");
                    self.events.push(LaunchEvent::TargetLost);
                }
                self.next_poll_time = now + self.config.target_poll_interval_secs;
                None
            }
        }
    }

    fn horizon(&self, snapshot: &TargetSnapshot, launch_point: Vec3) -> f64 {
        let flight = match (self.config.prediction_horizon, self.config.constraint) {
            (Some(horizon), _) => horizon,
            (None, LaunchConstraint::FixedTimeToImpact { time }) => time,
            (None, LaunchConstraint::FixedSpeed { speed }) => {
                lead_horizon(snapshot, launch_point, speed, LEAD_ITERATIONS)
            }
        };
        flight + self.profile.spawn_delay_secs
    }

    fn report_out_of_reach(&mut self, displacement: Vec3) {
        let (horizontal, vertical) = decompose(displacement);
        // Only the fixed-speed scan can come back infeasible.
        let range = self
            .config
            .constraint
            .launch_speed()
            .map_or(f64::INFINITY, |speed| max_range(speed, self.config.gravity));
        let reason = if horizontal > range {
            ReachFailure::BeyondMaxRange
        } else {
            ReachFailure::NoAngleWithinTolerance
        };
        warn!(
            horizontal,
            vertical,
            max_range = range,
            ?reason,
            "predicted target out of reach"
        );
        self.events.push(LaunchEvent::OutOfReach {
            reason,
            horizontal_distance: horizontal,
            max_range: range,
        });
    }

    fn release(&mut self, now: f64, pending: PendingShot) -> Shot {
        self.next_fire_time = now + self.profile.cooldown_secs;
        let shot = Shot {
            kind: pending.kind,
            velocity: pending.velocity,
            launch_point: pending.launch_point,
            released_at: now,
        };
        debug!(
            kind = shot.kind.name(),
            velocity = ?shot.velocity,
            ready_at = self.next_fire_time,
            "projectile released"
        );
        self.events.push(LaunchEvent::ProjectileShot {
            kind: shot.kind,
            velocity: shot.velocity,
            launch_point: shot.launch_point,
        });
        shot
    }
}

fn validate_profile(profile: &ProjectileProfile) -> Result<(), ConfigError> {
    if !(profile.cooldown_secs >= 0.0) {
        return Err(ConfigError::NegativeDuration {
            field: "cooldown_secs",
            value: profile.cooldown_secs,
        });
    }
    if !(profile.spawn_delay_secs >= 0.0) {
        return Err(ConfigError::NegativeDuration {
            field: "spawn_delay_secs",
            value: profile.spawn_delay_secs,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_at(x: f64) -> Option<TargetSnapshot> {
        Some(TargetSnapshot::stationary(Vec3::new(x, 0.0, 0.0)))
    }

    fn rock_launcher() -> Launcher {
        Launcher::new(TargetingConfig::default(), ProjectileProfile::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = TargetingConfig {
            gravity: 0.0,
            ..Default::default()
        };
        let err = Launcher::new(config, ProjectileProfile::default()).unwrap_err();
        assert!(err.is_invalid_configuration());

        let profile = ProjectileProfile {
            cooldown_secs: -1.0,
            ..Default::default()
        };
        assert!(Launcher::new(TargetingConfig::default(), profile).is_err());
    }

    #[test]
    fn test_no_target_no_solution() {
        let mut launcher = rock_launcher();
        let mut provider: Option<TargetSnapshot> = None;
        let aimed = launcher.aim(0.0, Vec3::ZERO, &mut provider).unwrap();
        assert!(aimed.is_none());
        assert!(!launcher.has_target());
        // Never had a target: nothing was lost.
        assert!(launcher.drain_events().is_empty());
    }

    #[test]
    fn test_acquire_and_lose_target() {
        let mut launcher = rock_launcher();
        let mut provider = target_at(10.0);
        launcher.aim(0.0, Vec3::ZERO, &mut provider).unwrap();
        launcher.aim(0.1, Vec3::ZERO, &mut provider).unwrap();

        let mut gone: Option<TargetSnapshot> = None;
        launcher.aim(0.2, Vec3::ZERO, &mut gone).unwrap();

        let events = launcher.drain_events();
        assert_eq!(
            events,
            vec![
                LaunchEvent::TargetAcquired {
                    position: Vec3::new(10.0, 0.0, 0.0)
                },
                LaunchEvent::TargetLost,
            ]
        );
        assert!(launcher.drain_events().is_empty(), "drain clears the buffer");
    }

    #[test]
    fn test_repoll_is_throttled_after_loss() {
        let mut launcher = rock_launcher();
        let mut polls = 0;
        let mut provider = from_fn(|| {
            polls += 1;
            None
        });
        launcher.aim(0.0, Vec3::ZERO, &mut provider).unwrap();
        launcher.aim(0.1, Vec3::ZERO, &mut provider).unwrap();
        launcher.aim(0.4, Vec3::ZERO, &mut provider).unwrap();
        launcher.aim(0.5, Vec3::ZERO, &mut provider).unwrap();
        drop(provider);
        assert_eq!(polls, 2, "polled at t=0 and again at t=0.5 only");
    }

    #[test]
    fn test_fixed_time_aim_leads_moving_target() {
        let mut launcher = rock_launcher();
        let mut provider = Some(TargetSnapshot::new(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
        ));
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut provider)
            .unwrap()
            .unwrap();
        // Default constraint is 2s to impact, no spawn delay for a rock.
        assert_eq!(firing.horizon, 2.0);
        assert!((firing.target_point - Vec3::new(10.0, 0.0, 6.0)).length() < 1e-12);
        assert!(firing.is_feasible());
        assert!(firing.apex_world().y > 0.0);
    }

    #[test]
    fn test_vertical_offset_raises_aim_point() {
        let config = TargetingConfig {
            vertical_offset: 1.2,
            ..Default::default()
        };
        let mut launcher = Launcher::new(config, ProjectileProfile::default()).unwrap();
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut target_at(8.0))
            .unwrap()
            .unwrap();
        assert!((firing.target_point.y - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_spawn_delay_extends_horizon() {
        let profile = ProjectileProfile::for_kind(ProjectileKind::Molotov);
        let mut launcher = Launcher::new(TargetingConfig::default(), profile).unwrap();
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut target_at(8.0))
            .unwrap()
            .unwrap();
        assert!((firing.horizon - (2.0 + profile.spawn_delay_secs)).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_reach_is_reported_not_fired() {
        let config = TargetingConfig::default()
            .with_constraint(LaunchConstraint::FixedSpeed { speed: 20.0 });
        let mut launcher = Launcher::new(config, ProjectileProfile::default()).unwrap();
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut target_at(100.0))
            .unwrap()
            .unwrap();
        assert!(!firing.is_feasible());
        assert_eq!(launcher.fire(0.0, &firing), FireOutcome::Infeasible);

        let events = launcher.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            LaunchEvent::OutOfReach {
                reason: ReachFailure::BeyondMaxRange,
                horizontal_distance,
                max_range,
            } if (*horizontal_distance - 100.0).abs() < 1e-9 && *max_range < 41.0
        )));
        assert!(!events
            .iter()
            .any(|e| matches!(e, LaunchEvent::ProjectileShot { .. })));
    }

    #[test]
    fn test_unreachable_height_within_range_reports_reason() {
        let config = TargetingConfig::default()
            .with_constraint(LaunchConstraint::FixedSpeed { speed: 20.0 });
        let mut launcher = Launcher::new(config, ProjectileProfile::default()).unwrap();
        let mut provider = Some(TargetSnapshot::stationary(Vec3::new(10.0, 50.0, 0.0)));
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut provider)
            .unwrap()
            .unwrap();
        assert!(!firing.is_feasible());

        let reach = launcher
            .drain_events()
            .into_iter()
            .find_map(|e| match e {
                LaunchEvent::OutOfReach {
                    reason,
                    horizontal_distance,
                    max_range,
                } => Some((reason, horizontal_distance, max_range)),
                _ => None,
            })
            .expect("out-of-reach event");
        assert_eq!(reach.0, ReachFailure::NoAngleWithinTolerance);
        assert!(reach.1 < reach.2, "within range: {} < {}", reach.1, reach.2);
    }

    #[test]
    fn test_cooldown_gates_shots() {
        let mut launcher = rock_launcher();
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut target_at(10.0))
            .unwrap()
            .unwrap();

        let shot = match launcher.fire(0.0, &firing) {
            FireOutcome::Shot(shot) => shot,
            other => panic!("expected immediate shot, got {other:?}"),
        };
        assert_eq!(shot.velocity, firing.solution.initial_velocity);
        assert_eq!(shot.released_at, 0.0);

        assert_eq!(
            launcher.fire(0.5, &firing),
            FireOutcome::CoolingDown { ready_at: 1.0 }
        );
        assert!(matches!(launcher.fire(1.0, &firing), FireOutcome::Shot(_)));
    }

    #[test]
    fn test_delayed_shot_released_by_tick() {
        let profile = ProjectileProfile {
            kind: ProjectileKind::Molotov,
            cooldown_secs: 1.0,
            spawn_delay_secs: 0.5,
        };
        let mut launcher = Launcher::new(TargetingConfig::default(), profile).unwrap();
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut target_at(10.0))
            .unwrap()
            .unwrap();

        assert_eq!(
            launcher.fire(0.0, &firing),
            FireOutcome::Scheduled { fire_at: 0.5 }
        );
        assert_eq!(
            launcher.fire(0.1, &firing),
            FireOutcome::Pending { fire_at: 0.5 }
        );
        assert!(launcher.tick(0.25, None).is_none());

        let shot = launcher.tick(0.5, None).unwrap();
        assert_eq!(shot.velocity, firing.solution.initial_velocity);
        assert_eq!(shot.released_at, 0.5);
        // Cooldown counts from release.
        assert_eq!(launcher.ready_at(), 1.5);
        assert!(launcher.tick(0.6, None).is_none());
    }

    #[test]
    fn test_delayed_shot_uses_fresh_solution() {
        let profile = ProjectileProfile {
            kind: ProjectileKind::Rock,
            cooldown_secs: 0.0,
            spawn_delay_secs: 0.2,
        };
        let mut launcher = Launcher::new(TargetingConfig::default(), profile).unwrap();
        let first = launcher
            .aim(0.0, Vec3::ZERO, &mut target_at(10.0))
            .unwrap()
            .unwrap();
        launcher.fire(0.0, &first);

        let fresh = launcher
            .aim(0.2, Vec3::new(0.0, 1.0, 0.0), &mut target_at(12.0))
            .unwrap()
            .unwrap();
        let shot = launcher.tick(0.2, Some(&fresh)).unwrap();
        assert_eq!(shot.velocity, fresh.solution.initial_velocity);
        assert_eq!(shot.launch_point, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_cancel_pending() {
        let profile = ProjectileProfile::for_kind(ProjectileKind::Molotov);
        let mut launcher = Launcher::new(TargetingConfig::default(), profile).unwrap();
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut target_at(10.0))
            .unwrap()
            .unwrap();
        launcher.fire(0.0, &firing);
        assert!(launcher.cancel_pending());
        assert!(!launcher.cancel_pending());
        assert!(launcher.tick(10.0, None).is_none());
    }

    #[test]
    fn test_weapon_switch_changes_next_shot() {
        let mut launcher = rock_launcher();
        launcher
            .set_profile(ProjectileProfile::for_kind(ProjectileKind::Molotov))
            .unwrap();
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut target_at(10.0))
            .unwrap()
            .unwrap();
        assert!(matches!(
            launcher.fire(0.0, &firing),
            FireOutcome::Scheduled { .. }
        ));

        let bad = ProjectileProfile {
            spawn_delay_secs: -0.1,
            ..Default::default()
        };
        assert!(launcher.set_profile(bad).is_err());
        assert_eq!(launcher.profile().kind.name(), "molotov");
    }

    #[test]
    fn test_trajectory_uses_config() {
        let config = TargetingConfig {
            time_step: 0.1,
            max_samples: 5,
            ..Default::default()
        };
        let mut launcher = Launcher::new(config, ProjectileProfile::default()).unwrap();
        let firing = launcher
            .aim(0.0, Vec3::ZERO, &mut target_at(10.0))
            .unwrap()
            .unwrap();
        let points: Vec<Vec3> = launcher.trajectory(&firing).collect();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], Vec3::ZERO);
    }
}
