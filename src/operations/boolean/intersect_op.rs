use crate::geometry::Polygon;
use crate::math::Tolerance;

use super::engine::boolean_execute;
use super::select::BooleanOp;

/// Computes the boolean intersection of two polygons.
pub struct Intersect<'a> {
    a: &'a Polygon,
    b: &'a Polygon,
    tolerance: Tolerance,
}

impl<'a> Intersect<'a> {
    /// Creates a new `Intersect` operation.
    #[must_use]
    pub fn new(a: &'a Polygon, b: &'a Polygon) -> Self {
        Self {
            a,
            b,
            tolerance: Tolerance::default(),
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the intersection. Counter-clockwise loops are regions, clockwise
    /// loops are holes.
    #[must_use]
    pub fn execute(&self) -> Vec<Polygon> {
        boolean_execute(self.a, self.b, BooleanOp::Intersect, self.tolerance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
        .unwrap()
    }

    #[test]
    fn adjacent_rectangles_have_empty_intersection() {
        let a = rect(0.0, 0.0, 5.0, 5.0);
        let b = rect(5.0, 0.0, 10.0, 5.0);
        assert!(Intersect::new(&a, &b).execute().is_empty());
    }

    #[test]
    fn nested_rectangle_is_the_intersection() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let inner = rect(2.0, 2.0, 4.0, 4.0);
        let result = Intersect::new(&outer, &inner).execute();
        assert_eq!(result.len(), 1);
        assert!(result[0].is_equivalent(&inner, Tolerance::default()));
    }
}
