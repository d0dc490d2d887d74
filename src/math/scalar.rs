//! Scalar helpers shared by the vector and matrix types.

use super::{is_equal_approx, is_zero_approx, PI};

/// Returns `1.0` for positive, `-1.0` for negative and `0.0` for zero (or NaN) input.
#[must_use]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Clamps `value` to `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: inverted bounds resolve to `min`
/// for values below it and `max` otherwise.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Integer counterpart of [`clamp`].
#[must_use]
pub fn clampi(value: i64, min: i64, max: i64) -> i64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Rounds `value` to the nearest multiple of `step`. A zero step yields `0.0`.
#[must_use]
pub fn snapped(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return 0.0;
    }
    (value / step).round() * step
}

/// Snaps `target` onto the grid `offset + k * step`.
///
/// A zero step leaves `target` untouched.
#[must_use]
pub fn snap_scalar(offset: f64, step: f64, target: f64) -> f64 {
    if step == 0.0 {
        return target;
    }
    snapped(target - offset, step) + offset
}

/// Snaps `target` onto a grid of `step`-sized cells separated by `separation`.
#[must_use]
pub fn snap_scalar_separation(offset: f64, step: f64, target: f64, separation: f64) -> f64 {
    if step == 0.0 {
        return target;
    }
    let a = snapped(target - offset, step + separation) + offset;
    let b = if target >= 0.0 {
        a - separation
    } else {
        a + step
    };
    if (target - a).abs() < (target - b).abs() {
        a
    } else {
        b
    }
}

/// Floating-point modulus whose result takes the sign of `y`.
#[must_use]
pub fn fposmod(x: f64, y: f64) -> f64 {
    let mut value = x % y;
    if (value < 0.0 && y > 0.0) || (value > 0.0 && y < 0.0) {
        value += y;
    }
    value
}

/// Integer modulus whose result takes the sign of `y`.
///
/// A zero divisor returns `x` unchanged.
#[must_use]
pub fn posmod(x: i64, y: i64) -> i64 {
    if y == 0 {
        return x;
    }
    // `i64::MIN % -1` overflows; its true remainder is zero.
    let mut value = x.wrapping_rem(y);
    if (value < 0 && y > 0) || (value > 0 && y < 0) {
        value += y;
    }
    value
}

/// Converts degrees to radians.
#[must_use]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Converts radians to degrees.
#[must_use]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Linear interpolation between `from` and `to`.
#[must_use]
pub fn lerp(from: f64, to: f64, weight: f64) -> f64 {
    from + (to - from) * weight
}

/// Returns the weight at which `lerp(from, to, weight) == value`.
#[must_use]
pub fn inverse_lerp(from: f64, to: f64, value: f64) -> f64 {
    (value - from) / (to - from)
}

/// Maps `value` from the range `[istart, istop]` into `[ostart, ostop]`.
#[must_use]
pub fn remap(value: f64, istart: f64, istop: f64, ostart: f64, ostop: f64) -> f64 {
    lerp(ostart, ostop, inverse_lerp(istart, istop, value))
}

/// Hermite interpolation of `s` between the edges `from` and `to`.
///
/// Returns `from` when the two edges are approximately equal.
#[must_use]
pub fn smoothstep(from: f64, to: f64, s: f64) -> f64 {
    if is_equal_approx(from, to) {
        return from;
    }
    let s = clamp((s - from) / (to - from), 0.0, 1.0);
    s * s * (3.0 - 2.0 * s)
}

/// Moves `from` toward `to` by at most `delta`.
#[must_use]
pub fn move_toward(from: f64, to: f64, delta: f64) -> f64 {
    if (to - from).abs() <= delta {
        return to;
    }
    from + sign(to - from) * delta
}

/// Converts a linear energy ratio to decibels.
#[must_use]
pub fn linear_to_db(linear: f64) -> f64 {
    linear.ln() * 8.685_889_638_065_037
}

/// Converts decibels to a linear energy ratio.
#[must_use]
pub fn db_to_linear(db: f64) -> f64 {
    (db * 0.115_129_254_649_702_28).exp()
}

/// Wraps an integer into the half-open range `[min, max)`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn wrapi(value: i64, min: i64, max: i64) -> i64 {
    // The span of two i64 bounds needs 65 bits.
    let (value, min, max) = (i128::from(value), i128::from(min), i128::from(max));
    let range = max - min;
    if range == 0 {
        return min as i64;
    }
    // Lies between `min` and `max`, so it fits back into i64.
    (min + ((value - min) % range + range) % range) as i64
}

/// Wraps a float into the half-open range `[min, max)`.
#[must_use]
pub fn wrapf(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if is_zero_approx(range) {
        return min;
    }
    let result = value - range * ((value - min) / range).floor();
    if is_equal_approx(result, max) {
        return min;
    }
    result
}

/// Fractional part of `value`, always in `[0, 1)`.
#[must_use]
pub fn fract(value: f64) -> f64 {
    value - value.floor()
}

/// Bounces `value` back and forth between `0` and `length`.
#[must_use]
pub fn pingpong(value: f64, length: f64) -> f64 {
    if length == 0.0 {
        return 0.0;
    }
    (fract((value - length) / (length * 2.0)) * length * 2.0 - length).abs()
}
