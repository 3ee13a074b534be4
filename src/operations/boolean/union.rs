use crate::geometry::Polygon;
use crate::math::Tolerance;

use super::engine::boolean_execute;
use super::select::BooleanOp;

/// Computes the boolean union of two polygons.
pub struct Union<'a> {
    a: &'a Polygon,
    b: &'a Polygon,
    tolerance: Tolerance,
}

impl<'a> Union<'a> {
    /// Creates a new `Union` operation.
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

    /// Executes the union. Counter-clockwise loops are regions, clockwise
    /// loops are holes.
    #[must_use]
    pub fn execute(&self) -> Vec<Polygon> {
        boolean_execute(self.a, self.b, BooleanOp::Union, self.tolerance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use approx::assert_relative_eq;

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
    fn adjacent_rectangles_merge() {
        let a = rect(0.0, 0.0, 5.0, 5.0);
        let b = rect(5.0, 0.0, 10.0, 5.0);
        let result = Union::new(&a, &b).execute();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 6);
        assert_relative_eq!(result[0].signed_area(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_rectangles_stay_apart() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(10.0, 10.0, 11.0, 11.0);
        let result = Union::new(&a, &b).execute();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(Polygon::is_ccw));
    }

    #[test]
    fn corner_touching_rectangles_stay_apart() {
        let a = rect(0.0, 0.0, 5.0, 5.0);
        let b = rect(5.0, 5.0, 10.0, 10.0);
        let result = Union::new(&a, &b).execute();
        assert_eq!(result.len(), 2);
        assert!(result
            .iter()
            .all(|p| (p.signed_area() - 25.0).abs() < 1e-9));
    }
}
