//! Cubic, Bézier and time-parameterized interpolation of scalars.
//!
//! The vector types apply these componentwise.

use super::scalar::lerp;
use super::TAU;

/// Catmull-Rom style cubic interpolation between `from` and `to`, with
/// `pre` and `post` as the neighbouring samples.
#[must_use]
pub fn cubic_interpolate(from: f64, to: f64, pre: f64, post: f64, weight: f64) -> f64 {
    let w2 = weight * weight;
    let w3 = w2 * weight;
    0.5 * ((from * 2.0)
        + (-pre + to) * weight
        + (2.0 * pre - 5.0 * from + 4.0 * to - post) * w2
        + (-pre + 3.0 * from - 3.0 * to + post) * w3)
}

/// Unwraps the four control angles so consecutive ones are within π of each other.
fn unwrap_angles(from: f64, to: f64, pre: f64, post: f64) -> (f64, f64, f64, f64) {
    let from_rot = from % TAU;

    let pre_diff = (pre - from_rot) % TAU;
    let pre_rot = from_rot + (2.0 * pre_diff) % TAU - pre_diff;

    let to_diff = (to - from_rot) % TAU;
    let to_rot = from_rot + (2.0 * to_diff) % TAU - to_diff;

    let post_diff = (post - to_rot) % TAU;
    let post_rot = to_rot + (2.0 * post_diff) % TAU - post_diff;

    (from_rot, to_rot, pre_rot, post_rot)
}

/// [`cubic_interpolate`] for angles, taking the shortest path between samples.
#[must_use]
pub fn cubic_interpolate_angle(from: f64, to: f64, pre: f64, post: f64, weight: f64) -> f64 {
    let (from_rot, to_rot, pre_rot, post_rot) = unwrap_angles(from, to, pre, post);
    cubic_interpolate(from_rot, to_rot, pre_rot, post_rot, weight)
}

/// Cubic interpolation for unevenly spaced samples (Barry-Goldman).
///
/// `from` sits at time 0, `to` at `to_t`, `pre` at `pre_t` (usually negative)
/// and `post` at `post_t`. Zero spacings degrade to the nearest defined
/// neighbour instead of dividing by zero.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn cubic_interpolate_in_time(
    from: f64,
    to: f64,
    pre: f64,
    post: f64,
    weight: f64,
    to_t: f64,
    pre_t: f64,
    post_t: f64,
) -> f64 {
    let t = lerp(0.0, to_t, weight);

    let a1 = if pre_t == 0.0 {
        pre
    } else {
        lerp(pre, from, (t - pre_t) / -pre_t)
    };
    let a2 = if to_t == 0.0 {
        lerp(from, to, 0.5)
    } else {
        lerp(from, to, t / to_t)
    };
    let a3 = if post_t - to_t == 0.0 {
        post
    } else {
        lerp(to, post, (t - to_t) / (post_t - to_t))
    };

    let b1 = if to_t - pre_t == 0.0 {
        a1
    } else {
        lerp(a1, a2, (t - pre_t) / (to_t - pre_t))
    };
    let b2 = if post_t == 0.0 {
        a3
    } else {
        lerp(a2, a3, t / post_t)
    };

    if to_t == 0.0 {
        lerp(b1, b2, 0.5)
    } else {
        lerp(b1, b2, t / to_t)
    }
}

/// [`cubic_interpolate_in_time`] for angles.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn cubic_interpolate_angle_in_time(
    from: f64,
    to: f64,
    pre: f64,
    post: f64,
    weight: f64,
    to_t: f64,
    pre_t: f64,
    post_t: f64,
) -> f64 {
    let (from_rot, to_rot, pre_rot, post_rot) = unwrap_angles(from, to, pre, post);
    cubic_interpolate_in_time(
        from_rot, to_rot, pre_rot, post_rot, weight, to_t, pre_t, post_t,
    )
}

/// Evaluates a cubic Bézier curve at `t`.
#[must_use]
pub fn bezier_interpolate(start: f64, control_1: f64, control_2: f64, end: f64, t: f64) -> f64 {
    let omt = 1.0 - t;
    let omt2 = omt * omt;
    let omt3 = omt2 * omt;
    let t2 = t * t;
    let t3 = t2 * t;

    start * omt3 + control_1 * omt2 * t * 3.0 + control_2 * omt * t2 * 3.0 + end * t3
}

/// Derivative of a cubic Bézier curve at `t`.
#[must_use]
pub fn bezier_derivative(start: f64, control_1: f64, control_2: f64, end: f64, t: f64) -> f64 {
    let omt = 1.0 - t;
    let omt2 = omt * omt;
    let t2 = t * t;

    (control_1 - start) * 3.0 * omt2
        + (control_2 - control_1) * 6.0 * omt * t
        + (end - control_2) * 3.0 * t2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PI;

    const TOL: f64 = 1e-10;

    #[test]
    fn cubic_hits_endpoints() {
        assert!((cubic_interpolate(1.0, 2.0, 7.0, -3.0, 0.0) - 1.0).abs() < TOL);
        assert!((cubic_interpolate(1.0, 2.0, 7.0, -3.0, 1.0) - 2.0).abs() < TOL);
    }

    #[test]
    fn cubic_reproduces_linear_data() {
        let v = cubic_interpolate(1.0, 2.0, 0.0, 3.0, 0.5);
        assert!((v - 1.5).abs() < TOL, "v={v}");
    }

    #[test]
    fn cubic_angle_wraps_short_way() {
        // From just below 2π to just above 0: the midpoint sits at the seam.
        let v = cubic_interpolate_angle(TAU - 0.1, 0.1, TAU - 0.3, 0.3, 0.5);
        let wrapped = v.rem_euclid(TAU);
        assert!(wrapped < 1e-9 || (TAU - wrapped) < 1e-9, "v={v}");
    }

    #[test]
    fn in_time_with_even_spacing_matches_linear_data() {
        let v = cubic_interpolate_in_time(1.0, 2.0, 0.0, 3.0, 0.5, 1.0, -1.0, 2.0);
        assert!((v - 1.5).abs() < TOL, "v={v}");
    }

    #[test]
    fn in_time_hits_endpoints_with_uneven_spacing() {
        let start = cubic_interpolate_in_time(1.0, 4.0, 0.5, 9.0, 0.0, 2.0, -0.5, 5.0);
        let end = cubic_interpolate_in_time(1.0, 4.0, 0.5, 9.0, 1.0, 2.0, -0.5, 5.0);
        assert!((start - 1.0).abs() < TOL, "start={start}");
        assert!((end - 4.0).abs() < TOL, "end={end}");
    }

    #[test]
    fn in_time_zero_spacings_are_finite() {
        let v = cubic_interpolate_in_time(1.0, 2.0, 0.0, 3.0, 0.5, 0.0, 0.0, 0.0);
        assert!(v.is_finite(), "v={v}");
    }

    #[test]
    fn angle_in_time_hits_endpoints() {
        let start = cubic_interpolate_angle_in_time(0.2, PI, 0.0, 4.0, 0.0, 1.0, -1.0, 2.0);
        assert!((start - 0.2).abs() < TOL, "start={start}");
    }

    #[test]
    fn bezier_value_and_derivative() {
        assert!((bezier_interpolate(0.0, 0.0, 1.0, 1.0, 0.5) - 0.5).abs() < TOL);
        assert!((bezier_interpolate(2.0, 5.0, -1.0, 3.0, 0.0) - 2.0).abs() < TOL);
        assert!((bezier_interpolate(2.0, 5.0, -1.0, 3.0, 1.0) - 3.0).abs() < TOL);
        assert!((bezier_derivative(0.0, 0.0, 1.0, 1.0, 0.5) - 1.5).abs() < TOL);
        assert!((bezier_derivative(0.0, 1.0, 2.0, 3.0, 0.25) - 3.0).abs() < TOL);
    }
}
