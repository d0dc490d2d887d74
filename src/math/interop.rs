//! Conversions to and from `nalgebra` and `geo` types.

use super::{Basis, Quaternion, Transform2D, Vector2, Vector3};

impl From<Vector2> for nalgebra::Vector2<f64> {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<nalgebra::Vector2<f64>> for Vector2 {
    fn from(v: nalgebra::Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for nalgebra::Point2<f64> {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<nalgebra::Point2<f64>> for Vector2 {
    fn from(p: nalgebra::Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Basis> for nalgebra::Matrix3<f64> {
    fn from(b: Basis) -> Self {
        let r = b.rows;
        Self::new(
            r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2],
        )
    }
}

impl From<nalgebra::Matrix3<f64>> for Basis {
    fn from(m: nalgebra::Matrix3<f64>) -> Self {
        Self {
            rows: [
                [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
                [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
                [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
            ],
        }
    }
}

// nalgebra orders quaternion components as (w, i, j, k) in its constructor.
impl From<Quaternion> for nalgebra::Quaternion<f64> {
    fn from(q: Quaternion) -> Self {
        Self::new(q.w, q.x, q.y, q.z)
    }
}

impl From<nalgebra::Quaternion<f64>> for Quaternion {
    fn from(q: nalgebra::Quaternion<f64>) -> Self {
        let c = q.coords;
        Self::new(c.x, c.y, c.z, c.w)
    }
}

/// Homogeneous 3×3 form with the origin in the last column.
impl From<Transform2D> for nalgebra::Matrix3<f64> {
    fn from(t: Transform2D) -> Self {
        let [x, y, o] = t.columns;
        Self::new(x.x, y.x, o.x, x.y, y.y, o.y, 0.0, 0.0, 1.0)
    }
}

/// Reads the affine part of a homogeneous matrix; the bottom row is ignored.
impl From<nalgebra::Matrix3<f64>> for Transform2D {
    fn from(m: nalgebra::Matrix3<f64>) -> Self {
        Self::from_cells(
            m[(0, 0)],
            m[(1, 0)],
            m[(0, 1)],
            m[(1, 1)],
            m[(0, 2)],
            m[(1, 2)],
        )
    }
}

impl From<Vector2> for geo::Coord<f64> {
    fn from(v: Vector2) -> Self {
        geo::Coord { x: v.x, y: v.y }
    }
}

impl From<geo::Coord<f64>> for Vector2 {
    fn from(c: geo::Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}
