use crate::geometry::Polygon;
use crate::math::Tolerance;

use super::engine::boolean_execute;
use super::select::BooleanOp;

/// Computes the boolean subtraction of one polygon from another.
pub struct Subtract<'a> {
    a: &'a Polygon,
    b: &'a Polygon,
    tolerance: Tolerance,
}

impl<'a> Subtract<'a> {
    /// Creates a new `Subtract` operation (A - B).
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

    /// Executes the subtraction. Counter-clockwise loops are regions, clockwise
    /// loops are holes.
    #[must_use]
    pub fn execute(&self) -> Vec<Polygon> {
        boolean_execute(self.a, self.b, BooleanOp::Subtract, self.tolerance)
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
    fn nested_subtraction_leaves_a_hole() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let inner = rect(2.0, 2.0, 4.0, 4.0);
        let result = Subtract::new(&outer, &inner).execute();
        assert_eq!(result.len(), 2);
        let hole = result.iter().find(|p| !p.is_ccw()).unwrap();
        assert_relative_eq!(hole.signed_area(), -4.0, epsilon = 1e-9);
        let region = result.iter().find(|p| p.is_ccw()).unwrap();
        assert_relative_eq!(region.signed_area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn adjacent_subtraction_keeps_a() {
        let a = rect(0.0, 0.0, 5.0, 5.0);
        let b = rect(5.0, 0.0, 10.0, 5.0);
        let result = Subtract::new(&a, &b).execute();
        assert_eq!(result.len(), 1);
        assert!(result[0].is_equivalent(&a, Tolerance::default()));
    }

    #[test]
    fn subtracting_a_containing_region_leaves_nothing() {
        let inner = rect(2.0, 2.0, 4.0, 4.0);
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        assert!(Subtract::new(&inner, &outer).execute().is_empty());
    }
}
