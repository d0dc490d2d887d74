use super::{clipper, EndType, JoinType, OffsetOptions};
use crate::error::{OperationError, Result};
use crate::math::Vector2;

/// Grows an open polyline into the polygons covering everything within
/// `|delta|` of it.
///
/// `end` controls the caps at the two endpoints; [`EndType::Joined`] treats
/// the path as a closed loop and outlines both of its sides.
#[derive(Debug, Clone)]
pub struct PolylineOffset2D {
    points: Vec<Vector2>,
    delta: f64,
    join: JoinType,
    end: EndType,
    options: OffsetOptions,
}

impl PolylineOffset2D {
    /// Creates a new polyline offset operation with default [`OffsetOptions`].
    #[must_use]
    pub fn new(points: Vec<Vector2>, delta: f64, join: JoinType, end: EndType) -> Self {
        Self {
            points,
            delta,
            join,
            end,
            options: OffsetOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: OffsetOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the offset.
    ///
    /// A polyline has no inside, so a `delta` of zero or less yields no rings,
    /// as does a path whose points all fall into one fixed-point cell.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if `end` is [`EndType::Polygon`]
    /// - `OperationError::InvalidInput` if a coordinate or `delta` is not
    ///   finite, or does not fit Clipper's fixed-point range
    /// - `OperationError::Failed` if Clipper returns nothing for a path that
    ///   should have produced an outline
    pub fn execute(&self) -> Result<Vec<Vec<Vector2>>> {
        if self.end == EndType::Polygon {
            tracing::debug!("polyline offset rejected polygon end type");
            return Err(OperationError::InvalidInput(
                "EndType::Polygon is not valid for polylines, use PolygonOffset2D".to_owned(),
            )
            .into());
        }
        if self.points.is_empty() {
            return Ok(Vec::new());
        }
        clipper::validate(&self.points, self.delta, &self.options)?;
        if self.delta <= 0.0 {
            tracing::debug!(delta = self.delta, "polyline offset with no reach");
            return Ok(Vec::new());
        }

        let rings = clipper::offset_open(
            &self.points,
            self.delta,
            self.join,
            self.end,
            &self.options,
        );
        let rings = clipper::ensure_open_output(rings, &self.points, self.delta, &self.options)?;
        tracing::debug!(
            input_points = self.points.len(),
            delta = self.delta,
            join = ?self.join,
            end = ?self.end,
            output_rings = rings.len(),
            "polyline offset"
        );
        Ok(rings)
    }
}
