pub mod error;
pub mod math;
pub mod operations;

pub use error::{GeometryError, MathgdError, OperationError, Result};
pub use math::{Basis, Quaternion, Transform2D, Vector2, Vector3};
pub use operations::offset::{
    offset_polygon, offset_polyline, EndType, JoinType, OffsetOptions, PolygonOffset2D,
    PolylineOffset2D,
};
