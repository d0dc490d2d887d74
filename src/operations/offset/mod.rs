//! Polygon and polyline offsetting on top of the Clipper library.
//!
//! Coordinates are converted to Clipper's fixed-point integers by multiplying
//! with [`OffsetOptions::scale`] and divided back on return. Results are
//! lists of open rings: each output polygon contributes its outer ring
//! followed by its holes.

mod clipper;
mod polygon_offset_2d;
mod polyline_offset_2d;

pub use polygon_offset_2d::PolygonOffset2D;
pub use polyline_offset_2d::PolylineOffset2D;

use crate::error::Result;
use crate::math::Vector2;

/// How corners are joined when offsetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinType {
    /// Corners are cut off at distance `delta`.
    #[default]
    Square,
    /// Corners are rounded, approximated within [`OffsetOptions::arc_tolerance`].
    Round,
    /// Corners are extended to a sharp point, falling back to a square cut
    /// beyond [`OffsetOptions::miter_limit`].
    Miter,
}

/// How the ends of an open path are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndType {
    /// Closed polygon offset. Not valid for polylines.
    Polygon,
    /// The path is closed and offset as a line, producing an outline on both
    /// sides.
    Joined,
    /// Ends are squared off flush with the endpoints.
    #[default]
    Butt,
    /// Ends are squared off and extended by `delta`.
    Square,
    /// Ends are rounded.
    Round,
}

/// Tuning parameters for offset operations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetOptions {
    /// Maximum miter length as a multiple of `delta` for [`JoinType::Miter`].
    pub miter_limit: f64,
    /// Maximum deviation of rounded joins and ends from the true arc.
    /// `0.0` selects the library default.
    pub arc_tolerance: f64,
    /// Factor converting coordinates to Clipper's fixed-point integers.
    pub scale: f64,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            miter_limit: 4.0,
            arc_tolerance: 0.0,
            scale: 100_000_000.0,
        }
    }
}

/// Inflates (`delta > 0`) or deflates (`delta < 0`) a closed polygon.
///
/// # Errors
///
/// See [`PolygonOffset2D::execute`].
pub fn offset_polygon(
    polygon: &[Vector2],
    delta: f64,
    join: JoinType,
) -> Result<Vec<Vec<Vector2>>> {
    PolygonOffset2D::new(polygon.to_vec(), delta, join).execute()
}

/// Grows an open polyline into the polygons covering everything within
/// `delta` of it.
///
/// # Errors
///
/// See [`PolylineOffset2D::execute`].
pub fn offset_polyline(
    polyline: &[Vector2],
    delta: f64,
    join: JoinType,
    end: EndType,
) -> Result<Vec<Vec<Vector2>>> {
    PolylineOffset2D::new(polyline.to_vec(), delta, join, end).execute()
}
