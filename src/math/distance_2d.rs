use super::scalar::clamp;
use super::{Vector2, CMP_EPSILON};

/// Squared segment length below which a segment is treated as a single point.
const DEGENERATE_LENGTH_SQUARED: f64 = 1e-20;

/// Returns the point on `segment` closest to `point`.
///
/// A degenerate segment returns its first endpoint.
#[must_use]
pub fn closest_point_to_segment(point: Vector2, segment: [Vector2; 2]) -> Vector2 {
    let [a, b] = segment;
    let n = b - a;
    let l2 = n.length_squared();
    if l2 < DEGENERATE_LENGTH_SQUARED {
        return a;
    }

    let d = n.dot(point - a) / l2;
    if d <= 0.0 {
        a
    } else if d >= 1.0 {
        b
    } else {
        a + n * d
    }
}

/// Projection of `point` onto the infinite line through `segment`.
#[must_use]
pub fn closest_point_to_segment_uncapped(point: Vector2, segment: [Vector2; 2]) -> Vector2 {
    let [a, b] = segment;
    let n = b - a;
    let l2 = n.length_squared();
    if l2 < DEGENERATE_LENGTH_SQUARED {
        return a;
    }
    a + n * (n.dot(point - a) / l2)
}

#[must_use]
pub fn distance_to_segment(point: Vector2, segment: [Vector2; 2]) -> f64 {
    point.distance_to(closest_point_to_segment(point, segment))
}

#[must_use]
pub fn distance_squared_to_segment(point: Vector2, segment: [Vector2; 2]) -> f64 {
    point.distance_squared_to(closest_point_to_segment(point, segment))
}

/// Closest pair of points between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentClosestPoints {
    /// Point on the first segment.
    pub on_first: Vector2,
    /// Point on the second segment.
    pub on_second: Vector2,
    pub distance: f64,
}

/// Finds the closest points between segment `p1 -> q1` and segment `p2 -> q2`.
///
/// Segments shorter than [`CMP_EPSILON`] (squared) are treated as points.
/// Parallel segments pick the start of the first segment and project from
/// there.
#[must_use]
pub fn closest_points_between_segments(
    p1: Vector2,
    q1: Vector2,
    p2: Vector2,
    q2: Vector2,
) -> SegmentClosestPoints {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;

    let a = d1.dot(d1);
    let e = d2.dot(d2);
    let f = d2.dot(r);

    let (s, t) = if a <= CMP_EPSILON && e <= CMP_EPSILON {
        (0.0, 0.0)
    } else if a <= CMP_EPSILON {
        (0.0, clamp(f / e, 0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= CMP_EPSILON {
            (clamp(-c / a, 0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            let s = if denom == 0.0 {
                0.0
            } else {
                clamp((b * f - c * e) / denom, 0.0, 1.0)
            };
            // Re-clamp t and recompute s if the projection leaves the second segment.
            let t = (b * s + f) / e;
            if t < 0.0 {
                (clamp(-c / a, 0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (clamp((b - c) / a, 0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    let on_first = p1 + d1 * s;
    let on_second = p2 + d2 * t;
    SegmentClosestPoints {
        on_first,
        on_second,
        distance: on_first.distance_to(on_second),
    }
}

/// Shortest distance between segment `p1 -> q1` and segment `p2 -> q2`.
#[must_use]
pub fn distance_between_segments(p1: Vector2, q1: Vector2, p2: Vector2, q2: Vector2) -> f64 {
    closest_points_between_segments(p1, q1, p2, q2).distance
}
