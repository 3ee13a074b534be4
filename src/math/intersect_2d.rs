use super::distance_2d::point_to_segment_dist;
use super::{cross, Point2, Vector2};

/// Relative threshold on `|d1 × d2| / (|d1| |d2|)` below which two
/// directions are parallel.
const PARALLEL_SIN: f64 = 1e-12;

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    if denom.abs() <= PARALLEL_SIN * d1.norm() * d2.norm() {
        return None;
    }
    let d = p2 - p1;
    let t = cross(&d, d2) / denom;
    let u = cross(&d, d1) / denom;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are the clamped
/// parameters on `a0 → a1` and `b0 → b1`. Parallel and collinear segments
/// never intersect here. Overlaps are handled by the callers through
/// endpoint-on-segment tests.
///
/// `eps` is a distance: a hit up to `eps` beyond either end still counts.
/// With `include_ends == false`, a hit within `eps` of any endpoint of
/// either segment is rejected, so only proper crossings are reported.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    eps: f64,
    include_ends: bool,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let len_a = da.norm();
    let len_b = db.norm();
    if len_a <= eps || len_b <= eps {
        return None;
    }

    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;
    let ta = eps / len_a;
    let tb = eps / len_b;
    if t < -ta || t > 1.0 + ta || u < -tb || u > 1.0 + tb {
        return None;
    }

    let t = t.clamp(0.0, 1.0);
    let u = u.clamp(0.0, 1.0);
    if !include_ends {
        let at_end_a = t * len_a <= eps || (1.0 - t) * len_a <= eps;
        let at_end_b = u * len_b <= eps || (1.0 - u) * len_b <= eps;
        if at_end_a || at_end_b {
            return None;
        }
    }

    Some((a0 + da * t, t, u))
}

/// Whether `p` lies on segment `a → b` within distance `eps`.
#[must_use]
pub fn point_on_segment(p: &Point2, a: &Point2, b: &Point2, eps: f64) -> bool {
    point_to_segment_dist(p, a, b) <= eps
}
