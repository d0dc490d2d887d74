use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::interpolate::{
    bezier_derivative, bezier_interpolate, cubic_interpolate, cubic_interpolate_in_time,
};
use super::scalar::{clamp, fposmod, lerp, sign, snapped};
use super::{is_equal_approx, is_zero_approx, Basis, Vector2, CMP_EPSILON};
use crate::error::{GeometryError, Result};

/// A three-component `f64` vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn dot(self, with: Self) -> f64 {
        self.x * with.x + self.y * with.y + self.z * with.z
    }

    #[must_use]
    pub fn cross(self, with: Self) -> Self {
        Self::new(
            self.y * with.z - self.z * with.y,
            self.z * with.x - self.x * with.z,
            self.x * with.y - self.y * with.x,
        )
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Scales this vector to unit length in place. The zero vector is left untouched.
    pub fn normalize(&mut self) {
        let scale = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if scale != 0.0 {
            let scaled = *self / scale;
            let length = scaled.length();
            self.x = scaled.x / length;
            self.y = scaled.y / length;
            self.z = scaled.z / length;
        }
    }

    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Returns `true` if the squared length is approximately one.
    #[must_use]
    pub fn is_normalized(self) -> bool {
        is_equal_approx(self.length_squared(), 1.0)
    }

    #[must_use]
    pub fn distance_to(self, to: Self) -> f64 {
        (to - self).length()
    }

    #[must_use]
    pub fn distance_squared_to(self, to: Self) -> f64 {
        (to - self).length_squared()
    }

    #[must_use]
    pub fn direction_to(self, to: Self) -> Self {
        (to - self).normalized()
    }

    /// Unsigned angle between the two vectors, in `[0, π]`.
    #[must_use]
    pub fn angle_to(self, to: Self) -> f64 {
        self.cross(to).length().atan2(self.dot(to))
    }

    /// Angle to `to`, negative when the rotation runs clockwise around `axis`.
    #[must_use]
    pub fn signed_angle_to(self, to: Self, axis: Self) -> f64 {
        let cross_to = self.cross(to);
        let unsigned_angle = cross_to.length().atan2(self.dot(to));
        if cross_to.dot(axis) < 0.0 {
            -unsigned_angle
        } else {
            unsigned_angle
        }
    }

    #[must_use]
    pub fn project(self, onto: Self) -> Self {
        onto * (self.dot(onto) / onto.length_squared())
    }

    /// Componentwise reciprocal.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(1.0 / self.x, 1.0 / self.y, 1.0 / self.z)
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    #[must_use]
    pub fn sign(self) -> Self {
        Self::new(sign(self.x), sign(self.y), sign(self.z))
    }

    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    #[must_use]
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil(), self.z.ceil())
    }

    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round(), self.z.round())
    }

    #[must_use]
    pub fn posmod(self, modulus: f64) -> Self {
        Self::new(
            fposmod(self.x, modulus),
            fposmod(self.y, modulus),
            fposmod(self.z, modulus),
        )
    }

    #[must_use]
    pub fn posmodv(self, modulus: Self) -> Self {
        Self::new(
            fposmod(self.x, modulus.x),
            fposmod(self.y, modulus.y),
            fposmod(self.z, modulus.z),
        )
    }

    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            clamp(self.x, min.x, max.x),
            clamp(self.y, min.y, max.y),
            clamp(self.z, min.z, max.z),
        )
    }

    #[must_use]
    pub fn snapped(self, step: Self) -> Self {
        Self::new(
            snapped(self.x, step.x),
            snapped(self.y, step.y),
            snapped(self.z, step.z),
        )
    }

    #[must_use]
    pub fn limit_length(self, max_length: f64) -> Self {
        let l = self.length();
        if l > 0.0 && max_length < l {
            self / l * max_length
        } else {
            self
        }
    }

    #[must_use]
    pub fn move_toward(self, to: Self, delta: f64) -> Self {
        let vd = to - self;
        let len = vd.length();
        if len <= delta || len < CMP_EPSILON {
            to
        } else {
            self + vd / len * delta
        }
    }

    /// Rotates this vector in place around `axis` by `angle` radians.
    ///
    /// `axis` is expected to be normalized; the rotation is applied through
    /// [`Basis::from_axis_angle`].
    pub fn rotate(&mut self, axis: Self, angle: f64) {
        *self = Basis::from_axis_angle(axis, angle).xform(*self);
    }

    #[must_use]
    pub fn rotated(mut self, axis: Self, angle: f64) -> Self {
        self.rotate(axis, angle);
        self
    }

    /// Component of this vector lying in the plane described by `normal`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotNormalized`] if `normal` is not a unit vector.
    pub fn slide(self, normal: Self) -> Result<Self> {
        require_normalized(normal, "slide normal")?;
        Ok(self - normal * self.dot(normal))
    }

    /// Reflection of this vector across the plane perpendicular to `normal`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotNormalized`] if `normal` is not a unit vector.
    pub fn reflect(self, normal: Self) -> Result<Self> {
        require_normalized(normal, "reflect normal")?;
        Ok(normal * 2.0 * self.dot(normal) - self)
    }

    /// # Errors
    ///
    /// Returns [`GeometryError::NotNormalized`] if `normal` is not a unit vector.
    pub fn bounce(self, normal: Self) -> Result<Self> {
        Ok(-self.reflect(normal)?)
    }

    #[must_use]
    pub fn lerp(self, to: Self, weight: f64) -> Self {
        Self::new(
            lerp(self.x, to.x, weight),
            lerp(self.y, to.y, weight),
            lerp(self.z, to.z, weight),
        )
    }

    /// Spherical interpolation around the axis perpendicular to both vectors.
    ///
    /// Zero-length and colinear inputs have no rotation axis and fall back to
    /// [`Vector3::lerp`].
    #[must_use]
    pub fn slerp(self, to: Self, weight: f64) -> Self {
        let start_length_sq = self.length_squared();
        let end_length_sq = to.length_squared();
        if start_length_sq == 0.0 || end_length_sq == 0.0 {
            return self.lerp(to, weight);
        }
        let axis = self.cross(to);
        let axis_length_sq = axis.length_squared();
        if axis_length_sq == 0.0 {
            return self.lerp(to, weight);
        }
        let axis = axis / axis_length_sq.sqrt();
        let start_length = start_length_sq.sqrt();
        let result_length = lerp(start_length, end_length_sq.sqrt(), weight);
        let angle = self.angle_to(to);
        self.rotated(axis, angle * weight) * (result_length / start_length)
    }

    #[must_use]
    pub fn cubic_interpolate(self, b: Self, pre_a: Self, post_b: Self, weight: f64) -> Self {
        Self::new(
            cubic_interpolate(self.x, b.x, pre_a.x, post_b.x, weight),
            cubic_interpolate(self.y, b.y, pre_a.y, post_b.y, weight),
            cubic_interpolate(self.z, b.z, pre_a.z, post_b.z, weight),
        )
    }

    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn cubic_interpolate_in_time(
        self,
        b: Self,
        pre_a: Self,
        post_b: Self,
        weight: f64,
        b_t: f64,
        pre_a_t: f64,
        post_b_t: f64,
    ) -> Self {
        let axis = |s: f64, b: f64, pre: f64, post: f64| {
            cubic_interpolate_in_time(s, b, pre, post, weight, b_t, pre_a_t, post_b_t)
        };
        Self::new(
            axis(self.x, b.x, pre_a.x, post_b.x),
            axis(self.y, b.y, pre_a.y, post_b.y),
            axis(self.z, b.z, pre_a.z, post_b.z),
        )
    }

    #[must_use]
    pub fn bezier_interpolate(self, control_1: Self, control_2: Self, end: Self, t: f64) -> Self {
        Self::new(
            bezier_interpolate(self.x, control_1.x, control_2.x, end.x, t),
            bezier_interpolate(self.y, control_1.y, control_2.y, end.y, t),
            bezier_interpolate(self.z, control_1.z, control_2.z, end.z, t),
        )
    }

    #[must_use]
    pub fn bezier_derivative(self, control_1: Self, control_2: Self, end: Self, t: f64) -> Self {
        Self::new(
            bezier_derivative(self.x, control_1.x, control_2.x, end.x, t),
            bezier_derivative(self.y, control_1.y, control_2.y, end.y, t),
            bezier_derivative(self.z, control_1.z, control_2.z, end.z, t),
        )
    }

    #[must_use]
    pub fn is_equal_approx(self, other: Self) -> bool {
        is_equal_approx(self.x, other.x)
            && is_equal_approx(self.y, other.y)
            && is_equal_approx(self.z, other.z)
    }

    #[must_use]
    pub fn is_zero_approx(self) -> bool {
        is_zero_approx(self.x) && is_zero_approx(self.y) && is_zero_approx(self.z)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Drops the Z component.
    #[must_use]
    pub fn to_vector2(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

fn require_normalized(normal: Vector3, what: &'static str) -> Result<()> {
    if normal.is_normalized() {
        return Ok(());
    }
    let length_squared = normal.length_squared();
    tracing::debug!(what, length_squared, "rejected non-normalized vector");
    Err(GeometryError::NotNormalized {
        what,
        length_squared,
    }
    .into())
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vector3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add<f64> for Vector3 {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self::new(self.x + rhs, self.y + rhs, self.z + rhs)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<f64> for Vector3 {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self::new(self.x - rhs, self.y - rhs, self.z - rhs)
    }
}

impl Mul for Vector3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

// IEEE division: a zero divisor gives a signed infinity (NaN for 0/0).
impl Div for Vector3 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl MulAssign for Vector3 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Vector3 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use proptest::prelude::*;

    use super::*;

    const TOL: f64 = 1e-10;

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    fn assert_close(a: Vector3, b: Vector3) {
        assert!(
            (a.x - b.x).abs() < TOL && (a.y - b.y).abs() < TOL && (a.z - b.z).abs() < TOL,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(Vector3::RIGHT.cross(Vector3::UP), Vector3::BACK);
        assert_eq!(Vector3::UP.cross(Vector3::RIGHT), Vector3::FORWARD);
        assert!((v(1.0, 2.0, 3.0).dot(v(4.0, 5.0, 6.0)) - 32.0).abs() < TOL);
    }

    #[test]
    fn division_by_zero_yields_signed_infinity() {
        let r = v(1.0, -2.0, 0.5) / v(0.0, 0.0, 2.0);
        assert_eq!(r.x, f64::INFINITY);
        assert_eq!(r.y, f64::NEG_INFINITY);
        assert!((r.z - 0.25).abs() < TOL);
        assert!(!r.is_finite());
    }

    #[test]
    fn rotated_about_z() {
        assert_close(Vector3::RIGHT.rotated(Vector3::BACK, FRAC_PI_2), Vector3::UP);
        assert_close(v(1.0, 1.0, 5.0).rotated(Vector3::BACK, PI), v(-1.0, -1.0, 5.0));
    }

    #[test]
    fn rotate_in_place_matches_rotated() {
        let axis = v(1.0, 1.0, 1.0).normalized();
        let mut a = v(1.0, 0.0, 0.0);
        a.rotate(axis, 2.0 * PI / 3.0);
        assert_close(a, Vector3::UP);
    }

    #[test]
    fn angles() {
        assert!((Vector3::RIGHT.angle_to(Vector3::UP) - FRAC_PI_2).abs() < TOL);
        let s = Vector3::RIGHT.signed_angle_to(Vector3::UP, Vector3::FORWARD);
        assert!((s + FRAC_PI_2).abs() < TOL, "s={s}");
        let s = Vector3::RIGHT.signed_angle_to(Vector3::UP, Vector3::BACK);
        assert!((s - FRAC_PI_2).abs() < TOL, "s={s}");
    }

    #[test]
    fn slerp_rotates_and_scales() {
        let r = v(1.0, 0.0, 0.0).slerp(v(0.0, 2.0, 0.0), 0.5);
        assert!((r.length() - 1.5).abs() < TOL, "r={r:?}");
        assert!((r.angle_to(Vector3::RIGHT) - FRAC_PI_4).abs() < TOL, "r={r:?}");
        assert!(r.z.abs() < TOL);
    }

    #[test]
    fn slerp_colinear_falls_back_to_lerp() {
        assert_close(v(1.0, 0.0, 0.0).slerp(v(3.0, 0.0, 0.0), 0.5), v(2.0, 0.0, 0.0));
        assert_close(Vector3::ZERO.slerp(v(0.0, 0.0, 2.0), 0.25), v(0.0, 0.0, 0.5));
    }

    #[test]
    fn reflect_and_slide() {
        let n = Vector3::UP;
        let a = v(1.0, -1.0, 2.0);
        assert_close(a.slide(n).unwrap(), v(1.0, 0.0, 2.0));
        assert_close(a.reflect(n).unwrap(), v(-1.0, -1.0, -2.0));
        assert_close(a.bounce(n).unwrap(), v(1.0, 1.0, 2.0));
        assert!(a.reflect(v(0.0, 3.0, 0.0)).is_err());
        assert!(a.slide(Vector3::ONE).is_err());
    }

    #[test]
    fn inverse_and_projection() {
        assert_close(v(2.0, 4.0, -0.5).inverse(), v(0.5, 0.25, -2.0));
        assert_close(v(3.0, 4.0, 5.0).project(v(0.0, 0.0, 2.0)), v(0.0, 0.0, 5.0));
        assert_eq!(v(1.5, 2.5, 3.5).to_vector2(), Vector2::new(1.5, 2.5));
    }

    #[test]
    fn componentwise_helpers() {
        let a = v(-1.5, 2.4, 0.0);
        assert_eq!(a.abs(), v(1.5, 2.4, 0.0));
        assert_eq!(a.sign(), v(-1.0, 1.0, 0.0));
        assert_eq!(a.floor(), v(-2.0, 2.0, 0.0));
        assert_eq!(a.ceil(), v(-1.0, 3.0, 0.0));
        assert_close(v(-1.0, 4.0, 7.0).posmod(3.0), v(2.0, 1.0, 1.0));
        assert_close(v(3.0, 4.0, 0.0).limit_length(2.5), v(1.5, 2.0, 0.0));
        assert_close(Vector3::ZERO.move_toward(v(0.0, 0.0, 10.0), 1.0), v(0.0, 0.0, 1.0));
        assert!((Vector3::ZERO.distance_to(v(2.0, 3.0, 6.0)) - 7.0).abs() < TOL);
    }

    #[test]
    fn interpolation_endpoints() {
        let (a, b, pre, post) = (
            v(0.0, 0.0, 0.0),
            v(1.0, 2.0, 3.0),
            v(-1.0, -1.0, -1.0),
            v(3.0, 3.0, 3.0),
        );
        assert_close(a.lerp(b, 0.5), v(0.5, 1.0, 1.5));
        assert_close(a.cubic_interpolate(b, pre, post, 0.0), a);
        assert_close(a.cubic_interpolate_in_time(b, pre, post, 1.0, 1.0, -1.0, 2.0), b);
        assert_close(a.bezier_interpolate(pre, post, b, 0.0), a);
        assert_close(a.bezier_derivative(a, b, b, 0.5), v(1.5, 3.0, 4.5));
    }

    #[test]
    fn normalize_extreme_magnitudes() {
        let tiny = v(1e-170, 0.0, 0.0).normalized();
        assert_eq!(tiny, v(1.0, 0.0, 0.0));

        let huge = v(1e200, -1e200, 1e200).normalized();
        assert!((huge.length() - 1.0).abs() < TOL, "huge={huge:?}");
        assert!(huge.is_normalized());
    }

    proptest! {
        #[test]
        fn normalized_has_unit_length_at_any_magnitude(
            x in -1.0f64..1.0,
            y in -1.0f64..1.0,
            z in -1.0f64..1.0,
            exp in -300i32..300,
        ) {
            let a = v(x, y, z) * 10f64.powi(exp);
            prop_assume!(a != Vector3::ZERO);
            let n = a.normalized();
            prop_assert!((n.length() - 1.0).abs() < 1e-9, "a={:?} n={:?}", a, n);
        }

        #[test]
        fn normalized_has_unit_length(
            x in -1e6f64..1e6,
            y in -1e6f64..1e6,
            z in -1e6f64..1e6,
        ) {
            let n = v(x, y, z).normalized();
            if x == 0.0 && y == 0.0 && z == 0.0 {
                prop_assert_eq!(n, Vector3::ZERO);
            } else {
                prop_assert!((n.length() - 1.0).abs() < 1e-9, "n={:?}", n);
            }
        }
    }
}
