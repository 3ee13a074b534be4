pub mod distance_2d;
pub mod intersect_2d;
pub mod point_index;
pub mod polygon_2d;
pub mod tolerance;

pub use point_index::PointIndex;
pub use tolerance::Tolerance;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default geometric tolerance shared by the whole kernel.
///
/// Points closer than this are the same vertex, and scalars closer than
/// this are equal.
pub const TOLERANCE: f64 = 1e-5;

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Orientation of `c` relative to the directed line `a → b`.
///
/// Positive when `c` is to the left, negative to the right, zero when collinear.
#[must_use]
pub fn orient(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    cross(&(b - a), &(c - a))
}

/// Normalizes an angle to [0, 2pi).
#[must_use]
pub fn normalize_angle(a: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    let mut r = a % two_pi;
    if r < 0.0 {
        r += two_pi;
    }
    r
}
