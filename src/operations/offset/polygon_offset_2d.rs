use super::{clipper, JoinType, OffsetOptions};
use crate::error::Result;
use crate::math::Vector2;

/// Inflates or deflates a closed polygon by `delta`.
///
/// Positive `delta` grows the polygon, negative shrinks it, independent of the
/// input winding. Shrinking may split the polygon into several pieces or
/// remove it entirely.
#[derive(Debug, Clone)]
pub struct PolygonOffset2D {
    points: Vec<Vector2>,
    delta: f64,
    join: JoinType,
    options: OffsetOptions,
}

impl PolygonOffset2D {
    /// Creates a new polygon offset operation with default [`OffsetOptions`].
    #[must_use]
    pub fn new(points: Vec<Vector2>, delta: f64, join: JoinType) -> Self {
        Self {
            points,
            delta,
            join,
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
    /// Returns one open ring per output boundary. Empty input yields no rings.
    ///
    /// # Errors
    ///
    /// `OperationError::InvalidInput` if a coordinate or `delta` is not
    /// finite, or does not fit Clipper's fixed-point range at the configured
    /// scale.
    pub fn execute(&self) -> Result<Vec<Vec<Vector2>>> {
        if self.points.is_empty() {
            return Ok(Vec::new());
        }
        clipper::validate(&self.points, self.delta, &self.options)?;

        let rings = clipper::offset_closed(&self.points, self.delta, self.join, &self.options);
        tracing::debug!(
            input_points = self.points.len(),
            delta = self.delta,
            join = ?self.join,
            output_rings = rings.len(),
            "polygon offset"
        );
        Ok(rings)
    }
}
