mod half_edge;
mod polygonize;
mod polylinize;

pub use half_edge::{HalfEdge, HalfEdgeArrangement, HalfEdgeId, Vertex, VertexId};

use tracing::{debug, instrument};

use crate::geometry::Segment;
use crate::math::Tolerance;

/// Builds a half-edge arrangement from segments that no longer cross.
///
/// One-way mode keeps each segment's direction as given. Two-way mode adds
/// both directions, for inputs whose winding is unknown or inconsistent.
pub struct ConstructArrangement<'a> {
    segments: &'a [Segment],
    two_way: bool,
    tolerance: Tolerance,
}

impl<'a> ConstructArrangement<'a> {
    /// Creates a new one-way `ConstructArrangement` operation.
    #[must_use]
    pub fn new(segments: &'a [Segment]) -> Self {
        Self {
            segments,
            two_way: false,
            tolerance: Tolerance::default(),
        }
    }

    #[must_use]
    pub fn two_way(mut self, two_way: bool) -> Self {
        self.two_way = two_way;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builds the arrangement. Non-finite segments are skipped.
    #[instrument(skip_all, fields(segments = self.segments.len(), two_way = self.two_way))]
    #[must_use]
    pub fn execute(&self) -> HalfEdgeArrangement {
        let mut arrangement = HalfEdgeArrangement::new(self.tolerance);
        for seg in self.segments.iter().filter(|s| s.is_finite()) {
            arrangement.add_segment(seg.start, seg.end, seg.owner, self.two_way);
        }
        debug!(
            vertices = arrangement.vertex_count(),
            half_edges = arrangement.half_edge_count(),
            "arrangement built"
        );
        arrangement
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::math::Point2;
    use crate::operations::sweep::FindIntersections;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::new(vec![
            p(x, y),
            p(x + size, y),
            p(x + size, y + size),
            p(x, y + size),
        ])
        .unwrap()
    }

    #[test]
    fn simple_polygon_round_trips() {
        let poly = Polygon::new(vec![p(0.0, 0.0), p(3.0, 0.0), p(4.0, 2.0), p(1.0, 3.0)]).unwrap();
        let segments = poly.segments();
        let loops = ConstructArrangement::new(&segments).execute().polygonize();
        assert_eq!(loops.len(), 1);
        assert!(loops[0].is_equivalent(&poly, Tolerance::default()));
    }

    #[test]
    fn both_ways_from_lines_gives_positive_and_negative_loop() {
        let segments = [
            Segment::new(p(0.0, 0.0), p(5.0, 0.0)),
            Segment::new(p(0.0, 5.0), p(5.0, 5.0)),
            Segment::new(p(5.0, 0.0), p(5.0, 5.0)),
            Segment::new(p(0.0, 0.0), p(0.0, 5.0)),
        ];
        let loops = ConstructArrangement::new(&segments).two_way(true).execute().polygonize();
        assert_eq!(loops.len(), 2);
        assert!(loops.iter().any(|l| l.signed_area() > 0.0));
        assert!(loops.iter().any(|l| l.signed_area() < 0.0));
    }

    #[test]
    fn inconsistent_winding_squares_via_two_way() {
        // Two disjoint squares, one wound clockwise.
        let mut segments = square(0.0, 0.0, 1.0).segments();
        segments.extend(square(3.0, 0.0, 1.0).reversed().segments());
        let loops = ConstructArrangement::new(&segments).two_way(true).execute().polygonize();
        let positive: Vec<_> = loops.iter().filter(|l| l.is_ccw()).collect();
        assert_eq!(positive.len(), 2);
        assert!(positive.iter().all(|l| (l.area() - 1.0).abs() < 1e-9));
    }

    #[test]
    fn overlapping_squares_split_then_arranged() {
        // Two squares overlapping in a 2.5 x 2.5 corner.
        let mut segments = square(-2.5, -2.5, 5.0).segments();
        segments.extend(square(0.0, 0.0, 5.0).segments());
        let pieces = FindIntersections::new(&segments).execute().split_segments(&segments);
        assert_eq!(pieces.len(), 12);
        let arrangement = ConstructArrangement::new(&pieces).two_way(true).execute();
        assert_eq!(arrangement.vertex_count(), 10);
        let loops = arrangement.polygonize();
        let total: f64 = loops.iter().filter(|l| l.is_ccw()).map(Polygon::area).sum();
        assert_relative_eq!(total, 43.75, epsilon = 1e-9);
    }
}
