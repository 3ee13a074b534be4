use crate::geometry::Segment;
use crate::math::Point2;

/// Identity of one intersection point within a [`SweepIntersections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointKey(pub usize);

/// A point where two or more input segments meet.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionRecord {
    pub point: Point2,
    /// Indices of every input segment through `point`, ascending.
    pub segments: Vec<usize>,
}

/// Result of a sweep: every meeting point, plus each segment's ordered
/// chain of split points.
#[derive(Debug, Clone, Default)]
pub struct SweepIntersections {
    records: Vec<IntersectionRecord>,
    chains: Vec<Vec<Point2>>,
}

impl SweepIntersections {
    pub(crate) fn new(records: Vec<IntersectionRecord>, chains: Vec<Vec<Point2>>) -> Self {
        Self { records, chains }
    }

    /// Number of distinct intersection points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = (PointKey, &IntersectionRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (PointKey(i), r))
    }

    #[must_use]
    pub fn get(&self, key: PointKey) -> Option<&IntersectionRecord> {
        self.records.get(key.0)
    }

    /// All intersection points in sweep order.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        self.records.iter().map(|r| r.point).collect()
    }

    /// Points along segment `index` from its start to its end, endpoints
    /// included. Empty for segments the sweep skipped (zero-length or
    /// non-finite) and for out-of-range indices.
    #[must_use]
    pub fn split_points(&self, index: usize) -> &[Point2] {
        self.chains.get(index).map_or(&[], Vec::as_slice)
    }

    /// For one intersection, the split chain of every segment through it.
    #[must_use]
    pub fn chains(&self, key: PointKey) -> Vec<(usize, &[Point2])> {
        self.get(key)
            .map(|r| {
                r.segments
                    .iter()
                    .map(|&i| (i, self.split_points(i)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cuts `segments` (the sweep's input) at every split point. Pieces keep
    /// their segment's direction and owner tag.
    #[must_use]
    pub fn split_segments(&self, segments: &[Segment]) -> Vec<Segment> {
        let mut pieces = Vec::new();
        for (i, seg) in segments.iter().enumerate() {
            for w in self.split_points(i).windows(2) {
                pieces.push(Segment {
                    start: w[0],
                    end: w[1],
                    owner: seg.owner,
                });
            }
        }
        pieces
    }
}
