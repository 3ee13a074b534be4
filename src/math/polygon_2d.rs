use super::intersect_2d::point_on_segment;
use super::{Point2, TOLERANCE};

/// Classification of a point relative to a closed boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Rotates a closed ring so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    if best == 0 {
        return points.to_vec();
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Classifies `point` against the closed ring `ring`.
///
/// Points within `eps` of any edge are `OnBoundary`. Otherwise a horizontal
/// ray is cast and crossings are counted with the half-open rule, so a ray
/// passing exactly through a vertex is counted once.
#[must_use]
pub fn point_in_polygon_2d(point: &Point2, ring: &[Point2], eps: f64) -> PointClassification {
    let n = ring.len();
    if n < 3 {
        return PointClassification::Outside;
    }

    for i in 0..n {
        if point_on_segment(point, &ring[i], &ring[(i + 1) % n], eps) {
            return PointClassification::OnBoundary;
        }
    }

    let mut inside = false;
    for i in 0..n {
        let a = &ring[i];
        let b = &ring[(i + 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }

    if inside {
        PointClassification::Inside
    } else {
        PointClassification::Outside
    }
}
