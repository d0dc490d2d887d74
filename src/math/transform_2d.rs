use std::ops::Mul;

use super::scalar::sign;
use super::Vector2;
use crate::error::{GeometryError, Result};

/// A 2D affine transform: two basis columns plus an origin.
///
/// `columns[0]` is the x axis, `columns[1]` the y axis and `columns[2]` the
/// translation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform2D {
    pub columns: [Vector2; 3],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        columns: [Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0), Vector2::ZERO],
    };

    /// Rotation by `rotation` radians followed by a translation to `position`.
    #[must_use]
    pub fn new(rotation: f64, position: Vector2) -> Self {
        let (sr, cr) = rotation.sin_cos();
        Self {
            columns: [Vector2::new(cr, sr), Vector2::new(-sr, cr), position],
        }
    }

    #[must_use]
    pub const fn from_cells(xx: f64, xy: f64, yx: f64, yy: f64, ox: f64, oy: f64) -> Self {
        Self {
            columns: [
                Vector2::new(xx, xy),
                Vector2::new(yx, yy),
                Vector2::new(ox, oy),
            ],
        }
    }

    #[must_use]
    pub const fn from_columns(x: Vector2, y: Vector2, origin: Vector2) -> Self {
        Self {
            columns: [x, y, origin],
        }
    }

    #[must_use]
    pub fn origin(&self) -> Vector2 {
        self.columns[2]
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.columns[0].y.atan2(self.columns[0].x)
    }

    /// Replaces the rotation while keeping the current scale.
    pub fn set_rotation(&mut self, rotation: f64) {
        let scale = self.scale();
        let (sr, cr) = rotation.sin_cos();
        self.columns[0] = Vector2::new(cr, sr);
        self.columns[1] = Vector2::new(-sr, cr);
        self.set_scale(scale);
    }

    /// Lengths of the basis columns. A mirrored transform reports a negative
    /// y scale.
    #[must_use]
    pub fn scale(&self) -> Vector2 {
        let det_sign = sign(self.determinant());
        Vector2::new(
            self.columns[0].length(),
            det_sign * self.columns[1].length(),
        )
    }

    pub fn set_scale(&mut self, scale: Vector2) {
        self.columns[0].normalize();
        self.columns[1].normalize();
        self.columns[0] *= scale.x;
        self.columns[1] *= scale.y;
    }

    /// Shifts the origin by `offset` in parent space.
    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self::from_columns(self.columns[0], self.columns[1], self.columns[2] + offset)
    }

    /// Shifts the origin by `offset` expressed in this transform's own axes.
    #[must_use]
    pub fn translated_local(&self, offset: Vector2) -> Self {
        Self::from_columns(
            self.columns[0],
            self.columns[1],
            self.columns[2] + self.basis_xform(offset),
        )
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.columns[0].x * self.columns[1].y - self.columns[0].y * self.columns[1].x
    }

    fn tdotx(&self, v: Vector2) -> f64 {
        self.columns[0].x * v.x + self.columns[1].x * v.y
    }

    fn tdoty(&self, v: Vector2) -> f64 {
        self.columns[0].y * v.x + self.columns[1].y * v.y
    }

    /// Applies only the basis, ignoring the origin.
    #[must_use]
    pub fn basis_xform(&self, v: Vector2) -> Vector2 {
        Vector2::new(self.tdotx(v), self.tdoty(v))
    }

    #[must_use]
    pub fn xform(&self, v: Vector2) -> Vector2 {
        self.basis_xform(v) + self.columns[2]
    }

    /// Inverse of [`Transform2D::xform`] for orthonormal transforms.
    #[must_use]
    pub fn xform_inv(&self, v: Vector2) -> Vector2 {
        let v = v - self.columns[2];
        Vector2::new(self.columns[0].dot(v), self.columns[1].dot(v))
    }

    #[must_use]
    pub fn to_global(&self, point: Vector2) -> Vector2 {
        self.xform(point)
    }

    /// Maps a parent-space point into this transform's local space.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularMatrix`] if the basis is degenerate.
    pub fn to_local(&self, point: Vector2) -> Result<Vector2> {
        Ok(self.affine_inverse()?.xform(point))
    }

    fn require_invertible(&self) -> Result<f64> {
        let det = self.determinant();
        if det == 0.0 {
            tracing::debug!(columns = ?self.columns, "transform inversion rejected, determinant is zero");
            return Err(GeometryError::SingularMatrix.into());
        }
        Ok(det)
    }

    /// Inverse of a rotation-plus-translation transform. Scaled transforms
    /// need [`Transform2D::affine_inverse`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularMatrix`] if the basis is degenerate.
    pub fn inverse(&self) -> Result<Self> {
        self.require_invertible()?;
        let mut inv = *self;
        inv.columns[0].y = self.columns[1].x;
        inv.columns[1].x = self.columns[0].y;
        inv.columns[2] = inv.basis_xform(-self.columns[2]);
        Ok(inv)
    }

    /// Full inverse, valid for any invertible basis including scale and skew.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularMatrix`] if the basis is degenerate.
    pub fn affine_inverse(&self) -> Result<Self> {
        let idet = 1.0 / self.require_invertible()?;
        let [x, y, origin] = self.columns;
        let mut inv = Self::from_columns(
            Vector2::new(y.y * idet, -x.y * idet),
            Vector2::new(-y.x * idet, x.x * idet),
            Vector2::ZERO,
        );
        inv.columns[2] = inv.basis_xform(-origin);
        Ok(inv)
    }

    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.columns
            .iter()
            .zip(&other.columns)
            .all(|(a, b)| a.is_equal_approx(*b))
    }
}

/// Composition: `(a * b).xform(p) == a.xform(b.xform(p))`.
impl Mul for Transform2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_columns(
            self.basis_xform(rhs.columns[0]),
            self.basis_xform(rhs.columns[1]),
            self.xform(rhs.columns[2]),
        )
    }
}

impl Mul<Vector2> for Transform2D {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        self.xform(rhs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use proptest::prelude::*;

    use super::*;
    use crate::error::MathgdError;

    const TOL: f64 = 1e-10;

    fn assert_close(a: Vector2, b: Vector2) {
        assert!(
            (a.x - b.x).abs() < TOL && (a.y - b.y).abs() < TOL,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn rotation_and_translation() {
        let t = Transform2D::new(FRAC_PI_2, Vector2::new(1.0, 2.0));
        assert_close(t.xform(Vector2::RIGHT), Vector2::new(1.0, 3.0));
        assert_close(t * Vector2::new(0.0, 1.0), Vector2::new(0.0, 2.0));
        assert!((t.rotation() - FRAC_PI_2).abs() < TOL);
        assert!((t.determinant() - 1.0).abs() < TOL);
        assert_eq!(t.origin(), Vector2::new(1.0, 2.0));
    }

    #[test]
    fn identity_is_neutral() {
        let p = Vector2::new(3.5, -2.0);
        assert_eq!(Transform2D::IDENTITY.xform(p), p);
        assert_eq!(Transform2D::default(), Transform2D::new(0.0, Vector2::ZERO));
    }

    #[test]
    fn inverse_undoes_rigid_transform() {
        let t = Transform2D::new(0.8, Vector2::new(-3.0, 4.0));
        let inv = t.inverse().unwrap();
        let p = Vector2::new(2.0, 7.0);
        assert_close(inv.xform(t.xform(p)), p);
        assert_close(t.xform_inv(t.xform(p)), p);
        assert!((t * inv).is_equal_approx(&Transform2D::IDENTITY));
    }

    #[test]
    fn affine_inverse_handles_scale_and_skew() {
        let t = Transform2D::from_cells(2.0, 0.5, -1.0, 3.0, 5.0, 6.0);
        let p = Vector2::new(-1.5, 0.25);
        assert_close(t.to_local(t.to_global(p)).unwrap(), p);
        let inv = t.affine_inverse().unwrap();
        assert!((inv * t).is_equal_approx(&Transform2D::IDENTITY));
    }

    #[test]
    fn singular_transform_cannot_be_inverted() {
        let t = Transform2D::from_cells(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
        assert!(matches!(
            t.affine_inverse(),
            Err(MathgdError::Geometry(GeometryError::SingularMatrix))
        ));
        assert!(t.inverse().is_err());
        assert!(t.to_local(Vector2::ONE).is_err());
    }

    #[test]
    fn scale_reports_mirroring() {
        let t = Transform2D::from_cells(1.0, 0.0, 0.0, -2.0, 0.0, 0.0);
        assert_close(t.scale(), Vector2::new(1.0, -2.0));
    }

    #[test]
    fn set_rotation_keeps_scale() {
        let mut t = Transform2D::from_cells(2.0, 0.0, 0.0, 3.0, 1.0, 1.0);
        t.set_rotation(0.5);
        assert!((t.rotation() - 0.5).abs() < TOL);
        assert_close(t.scale(), Vector2::new(2.0, 3.0));
        assert_eq!(t.origin(), Vector2::new(1.0, 1.0));

        t.set_scale(Vector2::new(1.0, 1.0));
        assert!((t.determinant() - 1.0).abs() < TOL);
    }

    #[test]
    fn translated_in_parent_and_local_space() {
        let t = Transform2D::new(FRAC_PI_2, Vector2::ZERO);
        assert_close(t.translated(Vector2::RIGHT).origin(), Vector2::RIGHT);
        assert_close(
            t.translated_local(Vector2::RIGHT).origin(),
            Vector2::new(0.0, 1.0),
        );
    }

    #[test]
    fn composition_applies_right_operand_first() {
        let a = Transform2D::new(PI / 3.0, Vector2::new(1.0, 0.0));
        let b = Transform2D::from_cells(2.0, 0.0, 0.0, 0.5, 0.0, -4.0);
        let p = Vector2::new(0.3, 0.9);
        assert_close((a * b).xform(p), a.xform(b.xform(p)));
    }

    proptest! {
        #[test]
        fn affine_inverse_round_trips(
            xx in -5.0f64..5.0, xy in -5.0f64..5.0,
            yx in -5.0f64..5.0, yy in -5.0f64..5.0,
            ox in -100.0f64..100.0, oy in -100.0f64..100.0,
            px in -100.0f64..100.0, py in -100.0f64..100.0,
        ) {
            let t = Transform2D::from_cells(xx, xy, yx, yy, ox, oy);
            prop_assume!(t.determinant().abs() > 0.1);
            let p = Vector2::new(px, py);
            let back = t.affine_inverse().unwrap().xform(t.xform(p));
            prop_assert!((back - p).length() < 1e-6, "back={:?} p={:?}", back, p);
        }
    }
}
