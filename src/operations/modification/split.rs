use tracing::{debug, instrument};

use crate::geometry::{Polygon, Polyline, Segment};
use crate::math::polygon_2d::PointClassification;
use crate::math::Tolerance;
use crate::operations::arrangement::HalfEdgeArrangement;
use crate::operations::sweep::FindIntersections;

const BOUNDARY: usize = 0;
const SPLITTER: usize = 1;

/// Splits a polygon into regions along open polylines.
///
/// Polylines are cut where they cross the boundary and each other; only the
/// pieces running through the interior divide the region. A splitter that
/// stops short of the far side leaves the region whole.
pub struct SplitPolygon<'a> {
    polygon: &'a Polygon,
    splitters: &'a [Polyline],
    tolerance: Tolerance,
}

impl<'a> SplitPolygon<'a> {
    /// Creates a new `SplitPolygon` operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon, splitters: &'a [Polyline]) -> Self {
        Self {
            polygon,
            splitters,
            tolerance: Tolerance::default(),
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the split, returning the counter-clockwise regions.
    #[instrument(skip_all, fields(vertices = self.polygon.len(), splitters = self.splitters.len()))]
    #[must_use]
    pub fn execute(&self) -> Vec<Polygon> {
        let polygon = self.polygon.to_ccw();
        let mut segments = polygon.segments_with_owner(BOUNDARY);
        for line in self.splitters {
            segments.extend(line.segments(Some(SPLITTER)));
        }
        let pieces = FindIntersections::new(&segments)
            .with_tolerance(self.tolerance)
            .execute()
            .split_segments(&segments);

        let mut arrangement = HalfEdgeArrangement::new(self.tolerance);
        for piece in pieces.iter().filter(|s| s.owner == Some(BOUNDARY)) {
            arrangement.add_segment(piece.start, piece.end, piece.owner, false);
        }
        let inside = |s: &&Segment| {
            polygon.contains_point(&s.midpoint(), self.tolerance) == PointClassification::Inside
        };
        let interior: Vec<&Segment> = pieces
            .iter()
            .filter(|s| s.owner == Some(SPLITTER))
            .filter(inside)
            .collect();
        for piece in &interior {
            arrangement.add_segment(piece.start, piece.end, piece.owner, true);
        }
        debug!(
            pieces = pieces.len(),
            interior = interior.len(),
            "splitters cut"
        );

        let min_area = self.tolerance.epsilon() * self.tolerance.epsilon();
        let regions: Vec<Polygon> = arrangement
            .polygonize()
            .into_iter()
            .filter(|r| r.signed_area() > min_area)
            .collect();
        debug!(regions = regions.len(), "split finished");
        regions
    }
}
