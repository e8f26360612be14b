//! Target position prediction by linear extrapolation.

use arcshot_core::types::{TargetSnapshot, Vec3};

/// Predict where the target will be `horizon` seconds from now.
///
/// No acceleration is modeled. A non-positive (or NaN) horizon returns the
/// current position.
pub fn predict(snapshot: &TargetSnapshot, horizon: f64) -> Vec3 {
    if horizon > 0.0 {
        snapshot.position + snapshot.velocity * horizon
    } else {
        snapshot.position
    }
}

/// Estimate how far ahead to predict so a projectile launched at `speed`
/// from `launch_point` arrives together with the target.
///
/// Starts from the straight-line travel time to the current position and
/// refines it `iterations` times against the predicted position. Returns 0
/// when the speed cannot reach anything.
pub fn lead_horizon(
    snapshot: &TargetSnapshot,
    launch_point: Vec3,
    speed: f64,
    iterations: u32,
) -> f64 {
    if !(speed > 0.0) {
        return 0.0;
    }

    let mut horizon = launch_point.distance(snapshot.position) / speed;
    for _ in 0..iterations {
        let predicted = predict(snapshot, horizon);
        horizon = launch_point.distance(predicted) / speed;
    }
    horizon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> TargetSnapshot {
        TargetSnapshot::new(Vec3::new(10.0, 0.0, 5.0), Vec3::new(2.0, 0.0, -1.0))
    }

    #[test]
    fn test_predict_is_linear() {
        let s = runner();
        for h in [0.5, 1.0, 2.5, 10.0] {
            let p = predict(&s, h);
            let expected = s.position + s.velocity * h;
            assert!(
                (p - expected).length() < 1e-12,
                "h={h}: got {p:?}, expected {expected:?}"
            );
        }
    }

    #[test]
    fn test_predict_zero_or_negative_horizon() {
        let s = runner();
        assert_eq!(predict(&s, 0.0), s.position);
        assert_eq!(predict(&s, -3.0), s.position);
        assert_eq!(predict(&s, f64::NAN), s.position);
    }

    #[test]
    fn test_predict_stationary_target() {
        let s = TargetSnapshot::stationary(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(predict(&s, 5.0), s.position);
    }

    #[test]
    fn test_lead_horizon_stationary_is_travel_time() {
        let s = TargetSnapshot::stationary(Vec3::new(30.0, 0.0, 40.0));
        let h = lead_horizon(&s, Vec3::ZERO, 10.0, 2);
        assert!((h - 5.0).abs() < 1e-12, "expected 5s, got {h}");
    }

    #[test]
    fn test_lead_horizon_leads_receding_target() {
        // Target running directly away: the lead must exceed the naive time.
        let s = TargetSnapshot::new(Vec3::new(20.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0));
        let naive = 20.0 / 20.0;
        let h = lead_horizon(&s, Vec3::ZERO, 20.0, 2);
        assert!(h > naive, "lead {h} should exceed naive {naive}");

        // Exact answer solves 20 + 4h = 20h -> h = 1.25; iterations approach it.
        let refined = lead_horizon(&s, Vec3::ZERO, 20.0, 20);
        assert!((refined - 1.25).abs() < 1e-6, "got {refined}");
    }

    #[test]
    fn test_lead_horizon_zero_speed() {
        assert_eq!(lead_horizon(&runner(), Vec3::ZERO, 0.0, 2), 0.0);
        assert_eq!(lead_horizon(&runner(), Vec3::ZERO, -5.0, 2), 0.0);
    }
}
