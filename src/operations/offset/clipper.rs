use geo::{LineString, MultiLineString, MultiPolygon, Polygon};
use geo_clipper::{Clipper, ClipperOpen};

use super::{EndType, JoinType, OffsetOptions};
use crate::error::{MathgdError, OperationError, Result};
use crate::math::Vector2;

/// Largest magnitude Clipper accepts for a fixed-point coordinate.
const CLIPPER_HI_RANGE: f64 = 4.611_686_018_427_387e18;

fn invalid(message: impl Into<String>) -> MathgdError {
    let message = message.into();
    tracing::debug!(%message, "offset input rejected");
    OperationError::InvalidInput(message).into()
}

/// Checks that `points`, `delta` and `options` can be converted to Clipper's
/// fixed-point representation without overflow.
pub(super) fn validate(points: &[Vector2], delta: f64, options: &OffsetOptions) -> Result<()> {
    if !(options.scale.is_finite() && options.scale > 0.0) {
        return Err(invalid(format!(
            "scale must be positive and finite, got {}",
            options.scale
        )));
    }
    if !delta.is_finite() {
        return Err(invalid(format!("delta must be finite, got {delta}")));
    }
    if !(options.miter_limit.is_finite() && options.arc_tolerance.is_finite()) {
        return Err(invalid("miter limit and arc tolerance must be finite"));
    }

    let reach = delta.abs() * options.scale;
    for (i, p) in points.iter().enumerate() {
        if !p.is_finite() {
            return Err(invalid(format!("point {i} is not finite: {p:?}")));
        }
        let extent = p.x.abs().max(p.y.abs()) * options.scale + reach;
        if extent > CLIPPER_HI_RANGE {
            return Err(invalid(format!(
                "point {i} exceeds the fixed-point range at scale {}: {p:?}",
                options.scale
            )));
        }
    }
    Ok(())
}

fn clipper_join(join: JoinType, options: &OffsetOptions) -> geo_clipper::JoinType {
    match join {
        JoinType::Square => geo_clipper::JoinType::Square,
        JoinType::Round => geo_clipper::JoinType::Round(options.arc_tolerance),
        JoinType::Miter => geo_clipper::JoinType::Miter(options.miter_limit),
    }
}

fn clipper_end(end: EndType, options: &OffsetOptions) -> geo_clipper::EndType {
    match end {
        EndType::Polygon => geo_clipper::EndType::ClosedPolygon,
        EndType::Joined => geo_clipper::EndType::ClosedLine,
        EndType::Butt => geo_clipper::EndType::OpenButt,
        EndType::Square => geo_clipper::EndType::OpenSquare,
        EndType::Round => geo_clipper::EndType::OpenRound(options.arc_tolerance),
    }
}

pub(super) fn offset_closed(
    points: &[Vector2],
    delta: f64,
    join: JoinType,
    options: &OffsetOptions,
) -> Vec<Vec<Vector2>> {
    let polygon = Polygon::new(LineString::from(points.to_vec()), vec![]);
    let solution = Clipper::offset(
        &polygon,
        delta,
        clipper_join(join, options),
        geo_clipper::EndType::ClosedPolygon,
        options.scale,
    );
    into_rings(solution)
}

pub(super) fn offset_open(
    points: &[Vector2],
    delta: f64,
    join: JoinType,
    end: EndType,
    options: &OffsetOptions,
) -> Vec<Vec<Vector2>> {
    // Clipper's open-path preprocessing drops paths lying on a single
    // scanline. Those are offset with x and y swapped, then mapped back with
    // the winding restored.
    if is_flat(points, options.scale, |p| p.y) {
        let swapped: Vec<Vector2> = points.iter().copied().map(swap_axes).collect();
        return offset_open_path(&swapped, delta, join, end, options)
            .into_iter()
            .map(|ring| ring.into_iter().rev().map(swap_axes).collect())
            .collect();
    }
    offset_open_path(points, delta, join, end, options)
}

fn offset_open_path(
    points: &[Vector2],
    delta: f64,
    join: JoinType,
    end: EndType,
    options: &OffsetOptions,
) -> Vec<Vec<Vector2>> {
    let lines = MultiLineString::new(vec![LineString::from(points.to_vec())]);
    let solution = ClipperOpen::offset(
        &lines,
        delta,
        clipper_join(join, options),
        clipper_end(end, options),
        options.scale,
    );
    into_rings(solution)
}

fn swap_axes(p: Vector2) -> Vector2 {
    Vector2::new(p.y, p.x)
}

/// Whether all points share one fixed-point value along `axis`.
fn is_flat(points: &[Vector2], scale: f64, axis: impl Fn(&Vector2) -> f64) -> bool {
    // Clipper truncates toward zero when converting to fixed point.
    let mut fixed = points.iter().map(|p| (axis(p) * scale).trunc());
    match fixed.next() {
        Some(first) => fixed.all(|v| (v - first).abs() < 0.5),
        None => true,
    }
}

/// Whether the points span more than one fixed-point cell.
fn has_extent(points: &[Vector2], scale: f64) -> bool {
    !(is_flat(points, scale, |p| p.x) && is_flat(points, scale, |p| p.y))
}

/// Fails when an open path with extent and a reach of at least one
/// fixed-point unit came back empty from Clipper.
pub(super) fn ensure_open_output(
    rings: Vec<Vec<Vector2>>,
    points: &[Vector2],
    delta: f64,
    options: &OffsetOptions,
) -> Result<Vec<Vec<Vector2>>> {
    if rings.is_empty() && delta * options.scale >= 1.0 && has_extent(points, options.scale) {
        tracing::debug!(
            input_points = points.len(),
            delta,
            "clipper returned no rings for an open path"
        );
        return Err(OperationError::Failed(format!(
            "offsetting a {}-point polyline by {delta} produced no output",
            points.len()
        ))
        .into());
    }
    Ok(rings)
}

/// Flattens a multipolygon into open rings, outer ring first then holes.
fn into_rings(solution: MultiPolygon<f64>) -> Vec<Vec<Vector2>> {
    solution
        .into_iter()
        .flat_map(|polygon| {
            let (exterior, interiors) = polygon.into_inner();
            std::iter::once(exterior).chain(interiors)
        })
        .map(open_ring)
        .filter(|ring| !ring.is_empty())
        .collect()
}

fn open_ring(ring: LineString<f64>) -> Vec<Vector2> {
    let mut points: Vec<Vector2> = ring.into_iter().map(Vector2::from).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn closing_vertex_is_stripped() {
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(open_ring(ring).len(), 3);
    }

    #[test]
    fn holes_follow_their_exterior() {
        let outer = LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let hole = LineString::from(vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)]);
        let rings = into_rings(MultiPolygon::new(vec![Polygon::new(outer, vec![hole])]));
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[1].len(), 3);
        assert_eq!(rings[1][0], Vector2::new(1.0, 1.0));
    }

    #[test]
    fn flatness_follows_fixed_point_truncation() {
        let scale = OffsetOptions::default().scale;
        let horizontal = [Vector2::new(0.0, 1.0), Vector2::new(10.0, 1.0)];
        assert!(is_flat(&horizontal, scale, |p| p.y));
        assert!(!is_flat(&horizontal, scale, |p| p.x));
        assert!(has_extent(&horizontal, scale));

        // Closer together than one fixed-point unit.
        let jitter = [Vector2::new(0.0, 1.0), Vector2::new(0.0, 1.0 + 1e-10)];
        assert!(!has_extent(&jitter, scale));
        assert!(has_extent(&jitter, 1e12));
    }

    #[test]
    fn horizontal_segment_is_offset_through_swapped_axes() {
        let options = OffsetOptions::default();
        let segment = [Vector2::new(0.0, 2.0), Vector2::new(4.0, 2.0)];
        let rings = offset_open(&segment, 1.0, JoinType::Square, EndType::Butt, &options);
        assert_eq!(rings.len(), 1);
        for p in &rings[0] {
            assert!((-1e-6..=4.0 + 1e-6).contains(&p.x), "p={p:?}");
            assert!((1.0 - 1e-6..=3.0 + 1e-6).contains(&p.y), "p={p:?}");
        }
        // Swapping back restores Clipper's counter-clockwise outer rings.
        assert!(crate::math::polygon_2d::signed_area(&rings[0]) > 0.0);
    }

    #[test]
    fn empty_open_output_is_a_failure_only_with_reach_and_extent() {
        let options = OffsetOptions::default();
        let segment = [Vector2::ZERO, Vector2::new(1.0, 1.0)];
        assert!(matches!(
            ensure_open_output(vec![], &segment, 1.0, &options),
            Err(MathgdError::Operation(OperationError::Failed(_)))
        ));
        assert!(ensure_open_output(vec![], &segment, 1e-9, &options)
            .unwrap()
            .is_empty());
        assert!(ensure_open_output(vec![], &[Vector2::ONE; 3], 1.0, &options)
            .unwrap()
            .is_empty());
        let ring = vec![vec![Vector2::ZERO, Vector2::RIGHT, Vector2::ONE]];
        assert_eq!(
            ensure_open_output(ring.clone(), &segment, 1.0, &options).unwrap(),
            ring
        );
    }

    #[test]
    fn rejects_out_of_range_and_non_finite_input() {
        let options = OffsetOptions::default();
        assert!(validate(&[Vector2::new(1e10, -5.0)], 1.0, &options).is_ok());
        assert!(matches!(
            validate(&[Vector2::new(1e11, 0.0)], 1.0, &options),
            Err(MathgdError::Operation(OperationError::InvalidInput(_)))
        ));
        assert!(validate(&[Vector2::new(f64::NAN, 0.0)], 1.0, &options).is_err());
        assert!(validate(&[Vector2::ZERO], f64::INFINITY, &options).is_err());

        let bad_scale = OffsetOptions {
            scale: 0.0,
            ..OffsetOptions::default()
        };
        assert!(validate(&[Vector2::ZERO], 1.0, &bad_scale).is_err());
    }
}
