use std::collections::HashMap;

use tracing::{debug, instrument, trace, warn};

use crate::geometry::Segment;
use crate::math::distance_2d::project_onto_segment;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{Point2, PointIndex, Tolerance};
use crate::search::{EventPriorityQueue, KeyOrder, StatusTree};

use super::events::EventKey;
use super::intersections::{IntersectionRecord, SweepIntersections};
use super::order::{SegmentOrder, SweepPhase};

/// Finds every point where two or more segments meet.
///
/// Bentley-Ottmann sweep: events are segment endpoints plus crossings found
/// between segments that become neighbours in the status tree. Endpoint
/// contacts, T-junctions and collinear overlaps are reported at the
/// endpoints involved. Zero-length and non-finite segments are skipped.
pub struct FindIntersections<'a> {
    segments: &'a [Segment],
    tolerance: Tolerance,
}

impl<'a> FindIntersections<'a> {
    /// Creates a new `FindIntersections` operation.
    #[must_use]
    pub fn new(segments: &'a [Segment]) -> Self {
        Self {
            segments,
            tolerance: Tolerance::default(),
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Runs the sweep.
    #[instrument(skip_all, fields(segments = self.segments.len()))]
    #[must_use]
    pub fn execute(&self) -> SweepIntersections {
        let eps = self.tolerance.epsilon();
        let mut events = EventQueue {
            points: PointIndex::new(eps),
            queue: EventPriorityQueue::new(),
            columns: columns(self.segments, eps),
            epsilon: eps,
        };

        // Left-to-right copies of the input, snapped to merged event points.
        let mut swept = Vec::with_capacity(self.segments.len());
        let mut right_end: Vec<Option<usize>> = Vec::with_capacity(self.segments.len());
        let mut ends: Vec<Option<(usize, usize)>> = Vec::with_capacity(self.segments.len());
        let mut starting: HashMap<usize, Vec<usize>> = HashMap::new();

        for (i, seg) in self.segments.iter().enumerate() {
            swept.push(*seg);
            right_end.push(None);
            ends.push(None);
            if !seg.is_finite() {
                warn!(segment = i, "skipping segment with non-finite coordinates");
                continue;
            }
            let a = events.add_point(seg.start);
            let b = events.add_point(seg.end);
            if a == b {
                debug!(segment = i, "skipping zero-length segment");
                continue;
            }
            let (pa, pb) = (events.points.point(a), events.points.point(b));
            let (left, right, li, ri) = if EventKey::new(&pa) <= EventKey::new(&pb) {
                (pa, pb, a, b)
            } else {
                (pb, pa, b, a)
            };
            swept[i] = Segment {
                start: left,
                end: right,
                owner: seg.owner,
            };
            right_end[i] = Some(ri);
            ends[i] = Some((a, b));
            starting.entry(li).or_default().push(i);
        }

        let mut records = Vec::new();
        let mut tree: StatusTree<usize> = StatusTree::new();
        let mut order = SegmentOrder::new(&swept, eps);

        while let Some((_, event)) = events.queue.pop_min() {
            let p = events.points.point(event);
            order.set_position(p, SweepPhase::Before);

            let span = tree.span_by(|s: &usize| order.locate(*s));
            let through: Vec<usize> = span.matching.iter().map(|&&s| s).collect();
            let above = span.before.copied();
            let below = span.after.copied();
            let upper = starting.remove(&event).unwrap_or_default();

            let mut involved: Vec<usize> = upper.iter().chain(&through).copied().collect();
            involved.sort_unstable();
            involved.dedup();
            if involved.len() >= 2 {
                trace!(x = p.x, y = p.y, segments = ?involved, "intersection");
                records.push(IntersectionRecord {
                    point: p,
                    segments: involved,
                });
            }

            for s in &through {
                if tree.remove(s, &order).is_none() {
                    warn!(segment = *s, x = p.x, y = p.y, "status tree lost track of segment");
                }
            }

            order.set_position(p, SweepPhase::After);
            let mut continuing: Vec<usize> = through
                .iter()
                .filter(|&&s| right_end[s] != Some(event))
                .chain(&upper)
                .copied()
                .collect();
            for &s in &continuing {
                tree.insert(s, &order);
            }

            if continuing.is_empty() {
                if let (Some(a), Some(b)) = (above, below) {
                    events.schedule(&swept, a, b, &p);
                }
                continue;
            }

            continuing.sort_by(|a, b| order.compare(a, b));
            let (Some(&top), Some(&bottom)) = (continuing.first(), continuing.last()) else {
                continue;
            };
            if let (Some(&pred), _) = tree.predecessor_successor(&top, &order) {
                events.schedule(&swept, pred, top, &p);
            }
            if let (_, Some(&succ)) = tree.predecessor_successor(&bottom, &order) {
                events.schedule(&swept, bottom, succ, &p);
            }
        }

        let chains = ends
            .iter()
            .enumerate()
            .map(|(i, end)| {
                end.map_or_else(Vec::new, |(a, b)| {
                    split_chain(
                        i,
                        events.points.point(a),
                        events.points.point(b),
                        &records,
                        &self.tolerance,
                    )
                })
            })
            .collect();

        debug!(intersections = records.len(), "sweep finished");
        SweepIntersections::new(records, chains)
    }
}

/// The x and y-span of a vertical input segment.
#[derive(Debug, Clone, Copy)]
struct Column {
    x: f64,
    lo: f64,
    hi: f64,
}

/// Vertical segments sorted by x.
fn columns(segments: &[Segment], eps: f64) -> Vec<Column> {
    let mut columns: Vec<Column> = segments
        .iter()
        .filter(|s| s.is_finite() && !s.is_degenerate(eps))
        .filter(|s| (s.end.x - s.start.x).abs() <= eps)
        .map(|s| Column {
            x: s.start.x,
            lo: s.start.y.min(s.end.y),
            hi: s.start.y.max(s.end.y),
        })
        .collect();
    columns.sort_by(|a, b| a.x.total_cmp(&b.x));
    columns
}

struct EventQueue {
    points: PointIndex,
    queue: EventPriorityQueue<usize, EventKey>,
    columns: Vec<Column>,
    epsilon: f64,
}

impl EventQueue {
    /// Moves `p` onto the x of a vertical segment passing within epsilon.
    ///
    /// Event order compares x exactly, so a point on a vertical must share
    /// its x or it sorts after the vertical's upper end.
    fn snap_to_column(&self, mut p: Point2) -> Point2 {
        let first = self.columns.partition_point(|c| c.x < p.x - self.epsilon);
        let column = self.columns[first..]
            .iter()
            .take_while(|c| c.x <= p.x + self.epsilon)
            .find(|c| p.y >= c.lo - self.epsilon && p.y <= c.hi + self.epsilon);
        if let Some(c) = column {
            p.x = c.x;
        }
        p
    }

    fn add_point(&mut self, p: Point2) -> usize {
        let (index, _) = self.points.insert(self.snap_to_column(p));
        let key = EventKey::new(&self.points.point(index));
        self.queue.add_or_update(index, key);
        index
    }

    /// Queues the crossing of `a` and `b` if it lies strictly ahead of the
    /// sweep at `current`.
    fn schedule(&mut self, swept: &[Segment], a: usize, b: usize, current: &Point2) {
        let (sa, sb) = (&swept[a], &swept[b]);
        let Some((mut pt, _, _)) =
            segment_segment_intersect_2d(&sa.start, &sa.end, &sb.start, &sb.end, self.epsilon, true)
        else {
            return;
        };
        let mut on_vertical = false;
        for s in [sa, sb] {
            if (s.end.x - s.start.x).abs() <= self.epsilon {
                pt.x = s.start.x;
                on_vertical = true;
            }
            if (s.end.y - s.start.y).abs() <= self.epsilon {
                pt.y = s.start.y;
            }
        }
        if !on_vertical {
            pt = self.snap_to_column(pt);
        }
        // Rounding can put a crossing higher in the event's own column a hair
        // to its left; it still lies ahead.
        if pt.x < current.x
            && current.x - pt.x <= self.epsilon
            && pt.y > current.y + self.epsilon
        {
            pt.x = current.x;
        }
        if (pt - current).norm() <= self.epsilon || EventKey::new(&pt) <= EventKey::new(current) {
            return;
        }
        let (index, is_new) = self.points.insert(pt);
        if is_new {
            trace!(x = pt.x, y = pt.y, a, b, "crossing event");
            self.queue
                .add_or_update(index, EventKey::new(&self.points.point(index)));
        }
    }
}

/// Ordered points along segment `index`, from `start` to `end`.
fn split_chain(
    index: usize,
    start: Point2,
    end: Point2,
    records: &[IntersectionRecord],
    tol: &Tolerance,
) -> Vec<Point2> {
    let mut inner: Vec<(f64, Point2)> = records
        .iter()
        .filter(|r| r.segments.binary_search(&index).is_ok())
        .map(|r| (project_onto_segment(&r.point, &start, &end), r.point))
        .collect();
    inner.sort_by(|x, y| x.0.total_cmp(&y.0));

    let mut chain = vec![start];
    for (_, p) in inner {
        if chain.last().map_or(true, |q| !tol.points_coincident(q, &p))
            && !tol.points_coincident(&p, &end)
        {
            chain.push(p);
        }
    }
    chain.push(end);
    chain
}
