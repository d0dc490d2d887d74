//! Angle helpers that respect wrap-around at ±π.

use super::scalar::{clamp, sign};
use super::{PI, TAU};

/// Shortest signed difference from `from` to `to`, in radians.
///
/// The result lies in `(-π, π]` up to floating-point rounding, so
/// interpolating along it never takes the long way around the circle.
#[must_use]
pub fn angle_difference(from: f64, to: f64) -> f64 {
    let difference = (to - from) % TAU;
    (2.0 * difference) % TAU - difference
}

/// Linear interpolation between two angles along the shortest arc.
#[must_use]
pub fn lerp_angle(from: f64, to: f64, weight: f64) -> f64 {
    from + angle_difference(from, to) * weight
}

/// Rotates `from` toward `to` by at most `delta` radians.
///
/// A negative `delta` rotates away from `to`, but never further than π
/// radians from it.
#[must_use]
pub fn rotate_toward(from: f64, to: f64, delta: f64) -> f64 {
    let difference = angle_difference(from, to);
    let abs_difference = difference.abs();
    from + sign(difference) * clamp(delta, abs_difference - PI, abs_difference)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const TOL: f64 = 1e-10;

    /// Angles equal modulo a full turn.
    fn same_direction(a: f64, b: f64) -> bool {
        let d = (a - b) % TAU;
        d.abs() < 1e-9 || (d.abs() - TAU).abs() < 1e-9
    }

    #[test]
    fn difference_takes_short_way() {
        let d = angle_difference(0.0, 3.0 * PI / 2.0);
        assert!((d + PI / 2.0).abs() < TOL, "d={d}");

        let d = angle_difference(0.1, TAU - 0.1);
        assert!((d + 0.2).abs() < TOL, "d={d}");
    }

    #[test]
    fn lerp_angle_crosses_zero() {
        let a = lerp_angle(TAU - 0.2, 0.2, 0.5);
        assert!(same_direction(a, 0.0), "a={a}");
    }

    #[test]
    fn rotate_toward_positive_and_negative_direction() {
        assert!((rotate_toward(0.0, 1.0, 0.25) - 0.25).abs() < TOL);
        assert!((rotate_toward(0.0, -1.0, 0.25) + 0.25).abs() < TOL);
        assert!((rotate_toward(0.0, 1.0, 5.0) - 1.0).abs() < TOL);
        assert!((rotate_toward(0.0, -1.0, 5.0) + 1.0).abs() < TOL);
    }

    #[test]
    fn rotate_toward_negative_delta_stops_opposite_target() {
        assert!((rotate_toward(0.0, 1.0, -0.5) + 0.5).abs() < TOL);
        let r = rotate_toward(0.0, 1.0, -10.0);
        assert!((r - (1.0 - PI)).abs() < TOL, "r={r}");
    }

    #[test]
    fn rotate_toward_equal_angles_is_stationary() {
        assert_eq!(rotate_toward(0.7, 0.7, 1.0), 0.7);
    }

    proptest! {
        #[test]
        fn lerp_angle_endpoints(a in -10.0f64..10.0, theta in -10.0f64..10.0) {
            prop_assert!((lerp_angle(a, a + theta, 0.0) - a).abs() < 1e-12);
            let end = lerp_angle(a, a + theta, 1.0);
            prop_assert!(same_direction(end, a + theta), "end={} b={}", end, a + theta);
        }

        #[test]
        fn difference_is_bounded(a in -50.0f64..50.0, b in -50.0f64..50.0) {
            prop_assert!(angle_difference(a, b).abs() <= PI + 1e-9);
        }
    }
}
