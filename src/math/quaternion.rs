use std::ops::Mul;

use super::{is_equal_approx, Vector3, CMP_EPSILON};
use crate::error::{GeometryError, Result};

/// A quaternion used to represent 3D rotations.
///
/// Rotation methods assume a unit quaternion; the raw constructor does not
/// enforce it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotNormalized`] if `axis` is not a unit vector.
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Result<Self> {
        if !axis.is_normalized() {
            let length_squared = axis.length_squared();
            tracing::debug!(length_squared, "rejected non-normalized rotation axis");
            return Err(GeometryError::NotNormalized {
                what: "rotation axis",
                length_squared,
            }
            .into());
        }
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        Ok(Self::new(
            axis.x * sin_half,
            axis.y * sin_half,
            axis.z * sin_half,
            cos_half,
        ))
    }

    /// Shortest-arc rotation taking unit vector `v0` onto unit vector `v1`.
    ///
    /// Opposite vectors have no unique shortest arc; the result is then a half
    /// turn around some axis perpendicular to `v0`.
    #[must_use]
    pub fn between(v0: Vector3, v1: Vector3) -> Self {
        let c = v0.cross(v1);
        let d = v0.dot(v1);

        if d < -1.0 + CMP_EPSILON {
            let mut axis = v0.cross(Vector3::RIGHT);
            if axis.length_squared() < CMP_EPSILON {
                axis = v0.cross(Vector3::UP);
            }
            let axis = axis.normalized();
            return Self::new(axis.x, axis.y, axis.z, 0.0);
        }

        let s = ((1.0 + d) * 2.0).sqrt();
        let rs = 1.0 / s;
        Self::new(c.x * rs, c.y * rs, c.z * rs, s * 0.5)
    }

    #[must_use]
    pub fn dot(self, with: Self) -> f64 {
        self.x * with.x + self.y * with.y + self.z * with.z + self.w * with.w
    }

    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit-length copy. The zero quaternion has no direction and yields NaN
    /// components.
    #[must_use]
    pub fn normalized(self) -> Self {
        let l = self.length();
        Self::new(self.x / l, self.y / l, self.z / l, self.w / l)
    }

    #[must_use]
    pub fn is_normalized(self) -> bool {
        is_equal_approx(self.length_squared(), 1.0)
    }

    /// Conjugate, which is the inverse rotation of a unit quaternion.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotates `v` by this quaternion.
    #[must_use]
    pub fn xform(self, v: Vector3) -> Vector3 {
        let u = Vector3::new(self.x, self.y, self.z);
        let uv = u.cross(v);
        v + ((uv * self.w) + u.cross(uv)) * 2.0
    }

    #[must_use]
    pub fn is_equal_approx(self, other: Self) -> bool {
        is_equal_approx(self.x, other.x)
            && is_equal_approx(self.y, other.y)
            && is_equal_approx(self.z, other.z)
            && is_equal_approx(self.w, other.w)
    }
}

/// Hamilton product: `(a * b).xform(v) == a.xform(b.xform(v))`.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, q: Self) -> Self {
        Self::new(
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y + self.y * q.w + self.z * q.x - self.x * q.z,
            self.w * q.z + self.z * q.w + self.x * q.y - self.y * q.x,
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
        )
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.xform(rhs)
    }
}
