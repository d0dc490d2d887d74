use super::{is_equal_approx, is_zero_approx, Vector2, CMP_EPSILON};

/// Intersection of the infinite lines `from_a + t * dir_a` and
/// `from_b + u * dir_b`.
///
/// Returns `None` for (near) parallel lines.
#[must_use]
pub fn line_intersects_line(
    from_a: Vector2,
    dir_a: Vector2,
    from_b: Vector2,
    dir_b: Vector2,
) -> Option<Vector2> {
    let denom = dir_b.y * dir_a.x - dir_b.x * dir_a.y;
    if is_zero_approx(denom) {
        return None;
    }

    let v = from_a - from_b;
    let t = (dir_b.x * v.y - dir_b.y * v.x) / denom;
    Some(from_a + dir_a * t)
}

/// Intersection point of segments `from_a -> to_a` and `from_b -> to_b`.
///
/// Returns `None` when the segments miss each other, are parallel or
/// colinear, or when the first segment has zero length.
#[must_use]
pub fn segment_intersects_segment(
    from_a: Vector2,
    to_a: Vector2,
    from_b: Vector2,
    to_b: Vector2,
) -> Option<Vector2> {
    let b = to_a - from_a;
    let ab_len = b.dot(b);
    if ab_len <= 0.0 {
        return None;
    }

    // Express the second segment in a frame where A-B runs from (0,0) to (1,0).
    let bn = b / ab_len;
    let to_frame = |p: Vector2| Vector2::new(p.x * bn.x + p.y * bn.y, p.y * bn.x - p.x * bn.y);
    let c = to_frame(from_b - from_a);
    let d = to_frame(to_b - from_a);

    // Both endpoints strictly on the same side.
    if (c.y < -CMP_EPSILON && d.y < -CMP_EPSILON) || (c.y > CMP_EPSILON && d.y > CMP_EPSILON) {
        return None;
    }
    if is_equal_approx(c.y, d.y) {
        return None;
    }

    let ab_pos = d.x + (c.x - d.x) * d.y / (d.y - c.y);
    if !(0.0..=1.0).contains(&ab_pos) {
        return None;
    }

    Some(from_a + b * ab_pos)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    #[test]
    fn lines_cross() {
        let p = line_intersects_line(v(0.0, 0.0), v(1.0, 1.0), v(0.0, 2.0), v(1.0, -1.0)).unwrap();
        assert!((p - v(1.0, 1.0)).length() < TOL, "p={p:?}");

        // Intersection outside both "segments" is still found for lines.
        let p = line_intersects_line(v(0.0, 0.0), v(1.0, 0.0), v(5.0, 3.0), v(0.0, 1.0)).unwrap();
        assert!((p - v(5.0, 0.0)).length() < TOL, "p={p:?}");
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        assert!(line_intersects_line(v(0.0, 0.0), v(1.0, 1.0), v(0.0, 1.0), v(2.0, 2.0)).is_none());
    }

    #[test]
    fn crossing_segments() {
        let p = segment_intersects_segment(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0))
            .unwrap();
        assert!((p - v(1.0, 1.0)).length() < TOL, "p={p:?}");
    }

    #[test]
    fn intersection_at_origin_is_reported() {
        let p = segment_intersects_segment(v(-1.0, 0.0), v(1.0, 0.0), v(0.0, -1.0), v(0.0, 1.0))
            .unwrap();
        assert!(p.length() < TOL, "p={p:?}");
    }

    #[test]
    fn non_overlapping_segments() {
        // Same side of the first segment's line.
        assert!(
            segment_intersects_segment(v(0.0, 0.0), v(2.0, 0.0), v(0.0, 1.0), v(2.0, 3.0))
                .is_none()
        );
        // Crosses the line beyond the end of the first segment.
        assert!(
            segment_intersects_segment(v(0.0, 0.0), v(1.0, 0.0), v(3.0, -1.0), v(3.0, 1.0))
                .is_none()
        );
    }

    #[test]
    fn parallel_colinear_and_degenerate_segments() {
        assert!(
            segment_intersects_segment(v(0.0, 0.0), v(2.0, 0.0), v(1.0, 0.0), v(3.0, 0.0))
                .is_none()
        );
        assert!(
            segment_intersects_segment(v(1.0, 1.0), v(1.0, 1.0), v(0.0, 0.0), v(2.0, 2.0))
                .is_none()
        );
    }
}
