pub mod angle;
pub mod basis;
pub mod distance_2d;
pub mod interop;
pub mod interpolate;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod quaternion;
pub mod scalar;
pub mod transform_2d;
pub mod vector2;
pub mod vector3;

pub use basis::Basis;
pub use quaternion::Quaternion;
pub use transform_2d::Transform2D;
pub use vector2::Vector2;
pub use vector3::Vector3;

/// Tolerance used for approximate floating-point comparisons.
pub const CMP_EPSILON: f64 = 0.00001;

/// Square of [`CMP_EPSILON`].
pub const CMP_EPSILON2: f64 = CMP_EPSILON * CMP_EPSILON;

/// Tolerance used when checking whether a vector is normalized.
pub const CMP_NORMALIZE_TOLERANCE: f64 = 0.000_001;

/// Tolerance used when checking whether a point lies on a plane.
pub const CMP_POINT_IN_PLANE_EPSILON: f64 = 0.00001;

/// Archimedes' constant.
pub const PI: f64 = std::f64::consts::PI;

/// The full circle constant (2π).
pub const TAU: f64 = std::f64::consts::TAU;

/// Returns `true` if `x` is within [`CMP_EPSILON`] of zero.
#[must_use]
pub fn is_zero_approx(x: f64) -> bool {
    x.abs() < CMP_EPSILON
}

/// Returns `true` if `a` and `b` differ by less than [`CMP_EPSILON`].
#[must_use]
pub fn is_equal_approx(a: f64, b: f64) -> bool {
    // Exact check first so that equal infinities compare equal.
    if a == b {
        return true;
    }
    is_zero_approx(a - b)
}
