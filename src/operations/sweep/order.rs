use std::cmp::Ordering;

use crate::geometry::Segment;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::Point2;
use crate::search::KeyOrder;

/// Which side of the current event point the order describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepPhase {
    /// Just before the event: segments meeting there are still in their
    /// incoming order.
    Before,
    /// Just after the event: segments meeting there have swapped.
    After,
}

/// Top-to-bottom order of segments along the sweep line.
///
/// Segments are indexed into a slice whose entries run left to right
/// (`start` is the endpoint met first by the sweep). The sweep line sits at
/// `point.x`; a segment's place is its height there. Heights within
/// `epsilon` of each other are ties, settled by slope on the side of the
/// tie the sweep has reached, then by index.
#[derive(Debug, Clone, Copy)]
pub struct SegmentOrder<'a> {
    segments: &'a [Segment],
    point: Point2,
    phase: SweepPhase,
    epsilon: f64,
}

impl<'a> SegmentOrder<'a> {
    /// Creates an order over `segments` with the sweep at the origin.
    #[must_use]
    pub fn new(segments: &'a [Segment], epsilon: f64) -> Self {
        Self {
            segments,
            point: Point2::origin(),
            phase: SweepPhase::After,
            epsilon,
        }
    }

    /// Moves the sweep to the event at `point`.
    pub fn set_position(&mut self, point: Point2, phase: SweepPhase) {
        self.point = point;
        self.phase = phase;
    }

    #[must_use]
    pub fn position(&self) -> (Point2, SweepPhase) {
        (self.point, self.phase)
    }

    /// Height of segment `index` where it meets the sweep line.
    ///
    /// A vertical segment meets the line along its whole length; in its own
    /// column its height is the event's y, clamped to the segment. Off the
    /// column it sits at its lower end before it and its upper end after.
    #[must_use]
    pub fn y_at(&self, index: usize) -> f64 {
        let seg = &self.segments[index];
        let dx = seg.end.x - seg.start.x;
        if dx.abs() <= self.epsilon {
            let lo = seg.start.y.min(seg.end.y);
            let hi = seg.start.y.max(seg.end.y);
            return if self.point.x > seg.start.x + self.epsilon {
                hi
            } else if self.point.x < seg.start.x - self.epsilon {
                lo
            } else {
                self.point.y.clamp(lo, hi)
            };
        }
        let t = ((self.point.x - seg.start.x) / dx).clamp(0.0, 1.0);
        seg.start.y + t * (seg.end.y - seg.start.y)
    }

    fn slope(&self, index: usize) -> f64 {
        let seg = &self.segments[index];
        let dx = seg.end.x - seg.start.x;
        if dx.abs() <= self.epsilon {
            f64::INFINITY
        } else {
            (seg.end.y - seg.start.y) / dx
        }
    }

    /// Where segment `index` sits relative to the current event point:
    /// `Less` above it, `Greater` below it, `Equal` through it.
    #[must_use]
    pub fn locate(&self, index: usize) -> Ordering {
        let seg = &self.segments[index];
        if point_to_segment_dist(&self.point, &seg.start, &seg.end) <= self.epsilon {
            return Ordering::Equal;
        }
        if self.y_at(index) > self.point.y {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

impl KeyOrder<usize> for SegmentOrder<'_> {
    fn compare(&self, a: &usize, b: &usize) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let ya = self.y_at(*a);
        let yb = self.y_at(*b);
        if (ya - yb).abs() > self.epsilon {
            return yb.total_cmp(&ya);
        }

        // The tie lies below the event when the sweep has already passed it.
        let tie = 0.5 * (ya + yb);
        let phase = if tie < self.point.y - self.epsilon {
            SweepPhase::After
        } else if tie > self.point.y + self.epsilon {
            SweepPhase::Before
        } else {
            self.phase
        };
        let (sa, sb) = (self.slope(*a), self.slope(*b));
        let by_slope = match phase {
            SweepPhase::After => sb.total_cmp(&sa),
            SweepPhase::Before => sa.total_cmp(&sb),
        };
        by_slope.then(a.cmp(b))
    }
}
