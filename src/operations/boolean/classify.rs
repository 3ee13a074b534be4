use tracing::{debug, instrument};

use crate::geometry::{Polygon, Segment};
use crate::math::intersect_2d::point_on_segment;
use crate::math::polygon_2d::PointClassification;
use crate::math::{Point2, Tolerance};

/// Where an edge of one boundary lies relative to the other region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetClassification {
    AOutsideB,
    BOutsideA,
    AInsideB,
    BInsideA,
}

impl SetClassification {
    /// Whether the edge belongs to boundary A.
    #[must_use]
    pub fn is_from_a(self) -> bool {
        matches!(self, Self::AOutsideB | Self::AInsideB)
    }

    #[must_use]
    pub fn is_inside(self) -> bool {
        matches!(self, Self::AInsideB | Self::BInsideA)
    }
}

/// How an edge lying on the other boundary runs relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryContact {
    /// The edge is off the other boundary.
    None,
    /// Both boundaries run the same way along the shared stretch.
    SameDirection,
    /// The boundaries run against each other along the shared stretch.
    OppositeDirection,
}

/// One edge of a split boundary with its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedEdge {
    pub from: Point2,
    pub to: Point2,
    pub classification: SetClassification,
    pub contact: BoundaryContact,
}

impl ClassifiedEdge {
    #[must_use]
    pub fn segment(&self) -> Segment {
        Segment::new(self.from, self.to)
    }

    /// Same edge walked the other way.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            ..*self
        }
    }
}

type EdgeFilter<'a> = Box<dyn Fn(&ClassifiedEdge) -> bool + 'a>;

/// Labels every edge of two boundaries against the other region.
///
/// Both boundaries must already be split at their mutual intersections, so
/// each edge lies wholly inside, wholly outside, or along the other
/// boundary. An edge's midpoint decides its label. Edges along the other
/// boundary count as outside, so touching regions never report inside edges.
pub struct ClassifySegments<'a> {
    a: &'a Polygon,
    b: &'a Polygon,
    tolerance: Tolerance,
    filter: Option<EdgeFilter<'a>>,
}

impl<'a> ClassifySegments<'a> {
    /// Creates a new `ClassifySegments` operation.
    #[must_use]
    pub fn new(a: &'a Polygon, b: &'a Polygon) -> Self {
        Self {
            a,
            b,
            tolerance: Tolerance::default(),
            filter: None,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Keeps only edges accepted by `predicate`.
    #[must_use]
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ClassifiedEdge) -> bool + 'a,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Classifies A's edges, then B's, each in ring order.
    #[instrument(skip_all, fields(a = self.a.len(), b = self.b.len()))]
    #[must_use]
    pub fn execute(&self) -> Vec<ClassifiedEdge> {
        let mut edges = Vec::with_capacity(self.a.len() + self.b.len());
        self.classify_ring(
            self.a,
            self.b,
            SetClassification::AOutsideB,
            SetClassification::AInsideB,
            &mut edges,
        );
        self.classify_ring(
            self.b,
            self.a,
            SetClassification::BOutsideA,
            SetClassification::BInsideA,
            &mut edges,
        );
        if let Some(keep) = &self.filter {
            edges.retain(|e| keep(e));
        }
        debug!(edges = edges.len(), "classified boundary edges");
        edges
    }

    fn classify_ring(
        &self,
        ring: &Polygon,
        other: &Polygon,
        outside: SetClassification,
        inside: SetClassification,
        out: &mut Vec<ClassifiedEdge>,
    ) {
        let eps = self.tolerance.epsilon();
        let other_edges = other.segments();
        for seg in ring.segments() {
            let mid = seg.midpoint();
            let contact = other_edges
                .iter()
                .find(|o| point_on_segment(&mid, &o.start, &o.end, eps))
                .map_or(BoundaryContact::None, |o| {
                    if seg.direction().dot(&o.direction()) > 0.0 {
                        BoundaryContact::SameDirection
                    } else {
                        BoundaryContact::OppositeDirection
                    }
                });
            let classification = if contact == BoundaryContact::None
                && other.contains_point(&mid, self.tolerance) == PointClassification::Inside
            {
                inside
            } else {
                outside
            };
            out.push(ClassifiedEdge {
                from: seg.start,
                to: seg.end,
                classification,
                contact,
            });
        }
    }
}

/// Counts edges per label, in the order A-outside-B, B-outside-A,
/// A-inside-B, B-inside-A.
#[must_use]
pub fn count_by_label(edges: &[ClassifiedEdge]) -> [usize; 4] {
    let mut counts = [0; 4];
    for e in edges {
        let slot = match e.classification {
            SetClassification::AOutsideB => 0,
            SetClassification::BOutsideA => 1,
            SetClassification::AInsideB => 2,
            SetClassification::BInsideA => 3,
        };
        counts[slot] += 1;
    }
    counts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::new(vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ])
        .unwrap()
    }

    #[test]
    fn nested_squares() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 2.0);
        let edges = ClassifySegments::new(&outer, &inner).execute();
        assert_eq!(count_by_label(&edges), [4, 0, 0, 4]);
    }

    #[test]
    fn shared_edge_records_direction() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);
        let edges = ClassifySegments::new(&a, &b).execute();
        assert_eq!(count_by_label(&edges), [4, 4, 0, 0]);
        let shared: Vec<_> = edges
            .iter()
            .filter(|e| e.contact != BoundaryContact::None)
            .collect();
        assert_eq!(shared.len(), 2);
        assert!(shared
            .iter()
            .all(|e| e.contact == BoundaryContact::OppositeDirection));

        let same = ClassifySegments::new(&a, &a.clone()).execute();
        assert!(same
            .iter()
            .all(|e| e.contact == BoundaryContact::SameDirection));
    }

    #[test]
    fn filter_keeps_requested_labels() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 2.0);
        let edges = ClassifySegments::new(&outer, &inner)
            .filter(|e| e.classification == SetClassification::BInsideA)
            .execute();
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|e| !e.classification.is_from_a()));
        assert!(edges.iter().all(|e| e.classification.is_inside()));
    }
}
