use super::Vector2;

/// Returns `true` if the ring winds clockwise in a y-up frame.
///
/// The ring is implicitly closed. Fewer than three points never wind.
#[must_use]
pub fn is_polygon_clockwise(points: &[Vector2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let sum: f64 = (0..n)
        .map(|i| {
            let v1 = points[i];
            let v2 = points[(i + 1) % n];
            (v2.x - v1.x) * (v2.y + v1.y)
        })
        .sum();
    sum > 0.0
}

/// Signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Vector2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].cross(points[j]);
    }
    sum * 0.5
}
