use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::interpolate::{
    bezier_derivative, bezier_interpolate, cubic_interpolate, cubic_interpolate_in_time,
};
use super::scalar::{clamp, fposmod, lerp, sign, snapped};
use super::{is_equal_approx, is_zero_approx, CMP_EPSILON};
use crate::error::{GeometryError, Result};

/// A two-component `f64` vector, used for both points and directions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    pub const UP: Self = Self::new(0.0, -1.0);
    pub const DOWN: Self = Self::new(0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians from the positive X axis.
    #[must_use]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Angle of this vector relative to the positive X axis, in `[-π, π]`.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[must_use]
    pub fn dot(self, with: Self) -> f64 {
        self.x * with.x + self.y * with.y
    }

    /// Z component of the 3D cross product of the two vectors.
    #[must_use]
    pub fn cross(self, with: Self) -> f64 {
        self.x * with.y - self.y * with.x
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Scales this vector to unit length in place. The zero vector is left untouched.
    pub fn normalize(&mut self) {
        // Dividing by the largest component first keeps the squared length
        // away from overflow and underflow.
        let scale = self.x.abs().max(self.y.abs());
        if scale != 0.0 {
            let (x, y) = (self.x / scale, self.y / scale);
            let l = x.hypot(y);
            self.x = x / l;
            self.y = y / l;
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

    /// Normalized direction from this point toward `to`.
    #[must_use]
    pub fn direction_to(self, to: Self) -> Self {
        (to - self).normalized()
    }

    /// Signed angle from this vector to `to`, in radians.
    #[must_use]
    pub fn angle_to(self, to: Self) -> f64 {
        self.cross(to).atan2(self.dot(to))
    }

    /// Angle of the line from this point to `to`.
    #[must_use]
    pub fn angle_to_point(self, to: Self) -> f64 {
        (to - self).angle()
    }

    /// Rotated 90 degrees counter-clockwise in a Y-down frame.
    #[must_use]
    pub fn orthogonal(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Rotated by `angle` radians.
    #[must_use]
    pub fn rotated(self, angle: f64) -> Self {
        let (sine, cosine) = angle.sin_cos();
        Self::new(
            self.x * cosine - self.y * sine,
            self.x * sine + self.y * cosine,
        )
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    #[must_use]
    pub fn sign(self) -> Self {
        Self::new(sign(self.x), sign(self.y))
    }

    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    #[must_use]
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    #[must_use]
    pub fn posmod(self, modulus: f64) -> Self {
        Self::new(fposmod(self.x, modulus), fposmod(self.y, modulus))
    }

    #[must_use]
    pub fn posmodv(self, modulus: Self) -> Self {
        Self::new(fposmod(self.x, modulus.x), fposmod(self.y, modulus.y))
    }

    /// Projection of this vector onto `onto`.
    #[must_use]
    pub fn project(self, onto: Self) -> Self {
        onto * (self.dot(onto) / onto.length_squared())
    }

    /// Componentwise clamp between `min` and `max`.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(clamp(self.x, min.x, max.x), clamp(self.y, min.y, max.y))
    }

    #[must_use]
    pub fn clampf(self, min: f64, max: f64) -> Self {
        Self::new(clamp(self.x, min, max), clamp(self.y, min, max))
    }

    #[must_use]
    pub fn snapped(self, step: Self) -> Self {
        Self::new(snapped(self.x, step.x), snapped(self.y, step.y))
    }

    #[must_use]
    pub fn snappedf(self, step: f64) -> Self {
        Self::new(snapped(self.x, step), snapped(self.y, step))
    }

    /// Shortens the vector to `max_length` if it is longer.
    #[must_use]
    pub fn limit_length(self, max_length: f64) -> Self {
        let l = self.length();
        if l > 0.0 && max_length < l {
            self / l * max_length
        } else {
            self
        }
    }

    /// Moves toward `to` by at most `delta`.
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

    /// Component of this vector lying in the plane described by `normal`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotNormalized`] if `normal` is not a unit vector.
    pub fn slide(self, normal: Self) -> Result<Self> {
        require_normalized(normal, "slide normal")?;
        Ok(self - normal * self.dot(normal))
    }

    /// Reflection of this vector across the line perpendicular to `normal`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotNormalized`] if `normal` is not a unit vector.
    pub fn reflect(self, normal: Self) -> Result<Self> {
        require_normalized(normal, "reflect normal")?;
        Ok(normal * 2.0 * self.dot(normal) - self)
    }

    /// The vector "bouncing off" a surface with the given `normal`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotNormalized`] if `normal` is not a unit vector.
    pub fn bounce(self, normal: Self) -> Result<Self> {
        Ok(-self.reflect(normal)?)
    }

    #[must_use]
    pub fn lerp(self, to: Self, weight: f64) -> Self {
        Self::new(lerp(self.x, to.x, weight), lerp(self.y, to.y, weight))
    }

    /// Spherical interpolation: rotates toward `to` while interpolating length.
    ///
    /// Falls back to [`Vector2::lerp`] when either vector has zero length.
    #[must_use]
    pub fn slerp(self, to: Self, weight: f64) -> Self {
        let start_length_sq = self.length_squared();
        let end_length_sq = to.length_squared();
        if start_length_sq == 0.0 || end_length_sq == 0.0 {
            return self.lerp(to, weight);
        }
        let start_length = start_length_sq.sqrt();
        let result_length = lerp(start_length, end_length_sq.sqrt(), weight);
        let angle = self.angle_to(to);
        self.rotated(angle * weight) * (result_length / start_length)
    }

    #[must_use]
    pub fn cubic_interpolate(self, b: Self, pre_a: Self, post_b: Self, weight: f64) -> Self {
        Self::new(
            cubic_interpolate(self.x, b.x, pre_a.x, post_b.x, weight),
            cubic_interpolate(self.y, b.y, pre_a.y, post_b.y, weight),
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
        Self::new(
            cubic_interpolate_in_time(self.x, b.x, pre_a.x, post_b.x, weight, b_t, pre_a_t, post_b_t),
            cubic_interpolate_in_time(self.y, b.y, pre_a.y, post_b.y, weight, b_t, pre_a_t, post_b_t),
        )
    }

    #[must_use]
    pub fn bezier_interpolate(self, control_1: Self, control_2: Self, end: Self, t: f64) -> Self {
        Self::new(
            bezier_interpolate(self.x, control_1.x, control_2.x, end.x, t),
            bezier_interpolate(self.y, control_1.y, control_2.y, end.y, t),
        )
    }

    #[must_use]
    pub fn bezier_derivative(self, control_1: Self, control_2: Self, end: Self, t: f64) -> Self {
        Self::new(
            bezier_derivative(self.x, control_1.x, control_2.x, end.x, t),
            bezier_derivative(self.y, control_1.y, control_2.y, end.y, t),
        )
    }

    #[must_use]
    pub fn is_equal_approx(self, other: Self) -> bool {
        is_equal_approx(self.x, other.x) && is_equal_approx(self.y, other.y)
    }

    #[must_use]
    pub fn is_zero_approx(self) -> bool {
        is_zero_approx(self.x) && is_zero_approx(self.y)
    }

    /// Returns `true` if neither component is infinite or NaN.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

fn require_normalized(normal: Vector2, what: &'static str) -> Result<()> {
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

impl From<[f64; 2]> for Vector2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2> for [f64; 2] {
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f64> for Vector2 {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f64> for Vector2 {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul for Vector2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

// IEEE division: a zero divisor gives a signed infinity (NaN for 0/0).
impl Div for Vector2 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl MulAssign for Vector2 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Vector2 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}
