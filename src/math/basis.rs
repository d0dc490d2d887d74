use std::ops::Mul;

use super::{Quaternion, Vector3};
use crate::error::{GeometryError, Result};

/// A 3×3 matrix stored as rows.
///
/// The columns are the basis axes, so [`Basis::xform`] maps local coordinates
/// into the parent space. No orthonormality is enforced; a basis may be
/// singular.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Basis {
    pub rows: [[f64; 3]; 3],
}

impl Default for Basis {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Basis {
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    #[must_use]
    pub const fn from_rows(x: Vector3, y: Vector3, z: Vector3) -> Self {
        Self {
            rows: [[x.x, x.y, x.z], [y.x, y.y, y.z], [z.x, z.y, z.z]],
        }
    }

    #[must_use]
    pub fn from_columns(x: Vector3, y: Vector3, z: Vector3) -> Self {
        let mut basis = Self::IDENTITY;
        basis.set_columns(x, y, z);
        basis
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// `axis` is expected to be normalized; it is not checked.
    #[must_use]
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let mut basis = Self::IDENTITY;
        basis.set_axis_angle(axis, angle);
        basis
    }

    /// Rotation matrix of a quaternion. Non-unit quaternions are normalized
    /// implicitly.
    #[must_use]
    pub fn from_quaternion(q: Quaternion) -> Self {
        let s = 2.0 / q.length_squared();
        let (xs, ys, zs) = (q.x * s, q.y * s, q.z * s);
        let (wx, wy, wz) = (q.w * xs, q.w * ys, q.w * zs);
        let (xx, xy, xz) = (q.x * xs, q.x * ys, q.x * zs);
        let (yy, yz, zz) = (q.y * ys, q.y * zs, q.z * zs);
        Self {
            rows: [
                [1.0 - (yy + zz), xy - wz, xz + wy],
                [xy + wz, 1.0 - (xx + zz), yz - wx],
                [xz - wy, yz + wx, 1.0 - (xx + yy)],
            ],
        }
    }

    /// Overwrites all nine entries, row by row.
    #[allow(clippy::too_many_arguments, clippy::similar_names)]
    pub fn set(
        &mut self,
        xx: f64,
        xy: f64,
        xz: f64,
        yx: f64,
        yy: f64,
        yz: f64,
        zx: f64,
        zy: f64,
        zz: f64,
    ) {
        self.rows = [[xx, xy, xz], [yx, yy, yz], [zx, zy, zz]];
    }

    /// Turns this basis into the rotation of `angle` radians around `axis`
    /// (Rodrigues' formula).
    pub fn set_axis_angle(&mut self, axis: Vector3, angle: f64) {
        let (sine, cosine) = angle.sin_cos();
        let t = 1.0 - cosine;
        let sq = Vector3::new(axis.x * axis.x, axis.y * axis.y, axis.z * axis.z);

        self.rows[0][0] = sq.x + cosine * (1.0 - sq.x);
        self.rows[1][1] = sq.y + cosine * (1.0 - sq.y);
        self.rows[2][2] = sq.z + cosine * (1.0 - sq.z);

        let xyt = axis.x * axis.y * t;
        let zs = axis.z * sine;
        self.rows[0][1] = xyt - zs;
        self.rows[1][0] = xyt + zs;

        let xzt = axis.x * axis.z * t;
        let ys = axis.y * sine;
        self.rows[0][2] = xzt + ys;
        self.rows[2][0] = xzt - ys;

        let yzt = axis.y * axis.z * t;
        let xs = axis.x * sine;
        self.rows[1][2] = yzt - xs;
        self.rows[2][1] = yzt + xs;
    }

    /// Column `index` (0 = x axis, 1 = y axis, 2 = z axis).
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    #[must_use]
    pub fn column(&self, index: usize) -> Vector3 {
        Vector3::new(
            self.rows[0][index],
            self.rows[1][index],
            self.rows[2][index],
        )
    }

    /// # Panics
    ///
    /// Panics if `index > 2`.
    pub fn set_column(&mut self, index: usize, value: Vector3) {
        self.rows[0][index] = value.x;
        self.rows[1][index] = value.y;
        self.rows[2][index] = value.z;
    }

    pub fn set_columns(&mut self, x: Vector3, y: Vector3, z: Vector3) {
        self.set_column(0, x);
        self.set_column(1, y);
        self.set_column(2, z);
    }

    #[must_use]
    pub fn main_diagonal(&self) -> Vector3 {
        Vector3::new(self.rows[0][0], self.rows[1][1], self.rows[2][2])
    }

    fn row(&self, index: usize) -> Vector3 {
        let [x, y, z] = self.rows[index];
        Vector3::new(x, y, z)
    }

    /// Applies this basis to `v`.
    #[must_use]
    pub fn xform(&self, v: Vector3) -> Vector3 {
        Vector3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }

    /// Applies the transpose of this basis to `v`. For a pure rotation that
    /// is the inverse rotation.
    #[must_use]
    pub fn xform_inv(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.column(0).dot(v),
            self.column(1).dot(v),
            self.column(2).dot(v),
        )
    }

    /// Expanded along the first row, the same expansion [`Self::inverse`]
    /// checks for singularity.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let co = self.first_column_cofactors();
        self.rows[0][0] * co[0] + self.rows[0][1] * co[1] + self.rows[0][2] * co[2]
    }

    /// Cofactors of the first row, i.e. the first column of the adjugate.
    fn first_column_cofactors(&self) -> [f64; 3] {
        let r = &self.rows;
        [
            r[1][1] * r[2][2] - r[1][2] * r[2][1],
            r[1][2] * r[2][0] - r[1][0] * r[2][2],
            r[1][0] * r[2][1] - r[1][1] * r[2][0],
        ]
    }

    /// Inverts this basis in place.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularMatrix`] if the determinant is exactly
    /// zero. The basis is left unchanged in that case.
    pub fn invert(&mut self) -> Result<()> {
        *self = self.inverse()?;
        Ok(())
    }

    /// Adjugate divided by the determinant.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularMatrix`] if the determinant is exactly
    /// zero.
    pub fn inverse(&self) -> Result<Self> {
        let r = &self.rows;
        let cofac = |row1: usize, col1: usize, row2: usize, col2: usize| {
            r[row1][col1] * r[row2][col2] - r[row1][col2] * r[row2][col1]
        };

        let co = self.first_column_cofactors();
        let det = self.determinant();
        if det == 0.0 {
            tracing::debug!(?r, "basis inversion rejected, determinant is zero");
            return Err(GeometryError::SingularMatrix.into());
        }

        let s = 1.0 / det;
        Ok(Self {
            rows: [
                [co[0] * s, cofac(0, 2, 2, 1) * s, cofac(0, 1, 1, 2) * s],
                [co[1] * s, cofac(0, 0, 2, 2) * s, cofac(0, 2, 1, 0) * s],
                [co[2] * s, cofac(0, 1, 2, 0) * s, cofac(0, 0, 1, 1) * s],
            ],
        })
    }

    #[must_use]
    pub fn transposed(&self) -> Self {
        let r = &self.rows;
        Self {
            rows: [
                [r[0][0], r[1][0], r[2][0]],
                [r[0][1], r[1][1], r[2][1]],
                [r[0][2], r[1][2], r[2][2]],
            ],
        }
    }

    /// `selfᵀ · m`.
    #[must_use]
    pub fn transpose_xform(&self, m: &Self) -> Self {
        self.transposed() * *m
    }

    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        (0..3).all(|i| self.row(i).is_equal_approx(other.row(i)))
    }
}

impl Mul for Basis {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            let lhs = self.row(i);
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = lhs.dot(rhs.column(j));
            }
        }
        Self { rows }
    }
}

impl Mul<Vector3> for Basis {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.xform(rhs)
    }
}
