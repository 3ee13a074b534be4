use std::collections::HashSet;

use tracing::{debug, instrument, trace, warn};

use crate::geometry::Polygon;

use super::half_edge::{HalfEdgeArrangement, HalfEdgeId};

impl HalfEdgeArrangement {
    /// Extracts closed loops by walking unused half-edges.
    ///
    /// Each walk starts at the first unused half-edge (vertices in insertion
    /// order) and follows the turning rule over unused half-edges until it
    /// returns to its start vertex. A walk that dead-ends is an open chain and
    /// is left to [`polylinize`](Self::polylinize); its half-edges are free
    /// for later walks, but no half-edge starts more than one walk.
    /// Back-and-forth spurs are cut out of each loop. Loops of both
    /// orientations are returned.
    #[must_use]
    pub fn polygonize(&self) -> Vec<Polygon> {
        self.polygonize_rejecting(|_| false)
    }

    /// Like [`polygonize`](Self::polygonize), but a loop that uses any
    /// half-edge whose owner satisfies `reject` is dropped. Its half-edges
    /// stay consumed.
    #[instrument(skip_all, fields(vertices = self.vertex_count(), half_edges = self.half_edge_count()))]
    #[must_use]
    pub fn polygonize_rejecting<F>(&self, reject: F) -> Vec<Polygon>
    where
        F: Fn(Option<usize>) -> bool,
    {
        let mut used: HashSet<HalfEdgeId> = HashSet::new();
        let mut tried: HashSet<HalfEdgeId> = HashSet::new();
        let mut loops = Vec::new();

        let starts: Vec<HalfEdgeId> = self
            .vertices()
            .flat_map(|(_, v)| v.outgoing.iter().copied())
            .collect();

        for start in starts {
            if used.contains(&start) || !tried.insert(start) {
                continue;
            }
            let Some(edges) = self.walk_loop(start, &mut used) else {
                continue;
            };
            let edges = self.cancel_spurs(edges);
            if edges.len() < 3 {
                continue;
            }
            if edges
                .iter()
                .filter_map(|&h| self.half_edge(h))
                .any(|e| reject(e.owner))
            {
                trace!(edges = edges.len(), "loop rejected by owner");
                continue;
            }
            let ring = edges
                .iter()
                .filter_map(|&h| self.half_edge(h))
                .map(|e| self.point(e.origin))
                .collect();
            loops.push(Polygon::from_ring(ring));
        }

        debug!(loops = loops.len(), "polygonize finished");
        loops
    }

    /// Walks from `start` until the path closes. `None` for a dead end, in
    /// which case the walk's half-edges are released for later walks.
    fn walk_loop(
        &self,
        start: HalfEdgeId,
        used: &mut HashSet<HalfEdgeId>,
    ) -> Option<Vec<HalfEdgeId>> {
        let origin = self.half_edge(start)?.origin;
        used.insert(start);
        let mut path = vec![start];
        let mut cur = start;
        loop {
            if self.half_edge(cur)?.dest == origin {
                return Some(path);
            }
            let Some(next) = self.turn(cur, |h| !used.contains(&h)) else {
                let at = self.point(self.half_edge(cur)?.dest);
                warn!(x = at.x, y = at.y, edges = path.len(), "walk dead-ended; leaving open chain");
                for h in &path {
                    used.remove(h);
                }
                return None;
            };
            used.insert(next);
            path.push(next);
            cur = next;
        }
    }

    /// Removes every half-edge immediately followed by its reverse, including
    /// pairs that meet across the loop's start.
    fn cancel_spurs(&self, path: Vec<HalfEdgeId>) -> Vec<HalfEdgeId> {
        let mut stack: Vec<HalfEdgeId> = Vec::with_capacity(path.len());
        for h in path {
            if stack.last().is_some_and(|&top| self.is_reverse(top, h)) {
                stack.pop();
            } else {
                stack.push(h);
            }
        }
        let mut lo = 0;
        let mut hi = stack.len();
        while hi - lo >= 2 && self.is_reverse(stack[hi - 1], stack[lo]) {
            lo += 1;
            hi -= 1;
        }
        stack[lo..hi].to_vec()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::geometry::Polygon;
    use crate::math::{Point2, Tolerance};
    use crate::operations::arrangement::HalfEdgeArrangement;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn build(points: &[(f64, f64)], two_way: bool) -> HalfEdgeArrangement {
        let mut arr = HalfEdgeArrangement::new(Tolerance::default());
        let n = points.len();
        for i in 0..n {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % n];
            arr.add_segment(p(x0, y0), p(x1, y1), None, two_way);
        }
        arr
    }

    #[test]
    fn one_way_square_gives_one_loop() {
        let arr = build(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)], false);
        let loops = arr.polygonize();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
        assert_relative_eq!(loops[0].signed_area(), 4.0);
    }

    #[test]
    fn two_way_square_gives_both_orientations() {
        let arr = build(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)], true);
        let loops = arr.polygonize();
        assert_eq!(loops.len(), 2);
        let mut areas: Vec<f64> = loops.iter().map(Polygon::signed_area).collect();
        areas.sort_by(f64::total_cmp);
        assert_relative_eq!(areas[0], -4.0);
        assert_relative_eq!(areas[1], 4.0);
    }

    #[test]
    fn open_chain_yields_no_loop() {
        let mut arr = HalfEdgeArrangement::new(Tolerance::default());
        arr.add_segment(p(0.0, 0.0), p(1.0, 0.0), None, false);
        arr.add_segment(p(1.0, 0.0), p(1.0, 1.0), None, false);
        assert!(arr.polygonize().is_empty());
    }

    #[test]
    fn dangling_spur_is_cut_from_loop() {
        // Square with its bottom edge split, plus a two-way stub reaching in.
        let mut arr = build(
            &[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
            false,
        );
        arr.add_segment(p(2.0, 0.0), p(2.0, 1.5), None, true);
        assert_eq!(arr.vertex_count(), 6);
        let loops = arr.polygonize();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 5);
        assert_relative_eq!(loops[0].signed_area(), 16.0);
    }

    #[test]
    fn dead_end_walk_releases_its_edges() {
        // The one-way stub at (4, 0) is the sharper left turn, so the first
        // walk runs into it and stops. The square must still come out.
        let mut arr = build(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], false);
        arr.add_segment(p(4.0, 0.0), p(2.0, 2.0), None, false);
        let loops = arr.polygonize();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
        assert_relative_eq!(loops[0].signed_area(), 16.0);
    }

    #[test]
    fn loops_with_rejected_owner_are_dropped() {
        let mut arr = HalfEdgeArrangement::new(Tolerance::default());
        for (owner, x) in [(0, 0.0), (1, 5.0)] {
            let ring = [p(x, 0.0), p(x + 2.0, 0.0), p(x + 2.0, 2.0), p(x, 2.0)];
            for i in 0..4 {
                arr.add_segment(ring[i], ring[(i + 1) % 4], Some(owner), false);
            }
        }
        assert_eq!(arr.polygonize().len(), 2);
        let kept = arr.polygonize_rejecting(|owner| owner == Some(1));
        assert_eq!(kept.len(), 1);
        assert!(kept[0].vertices().iter().all(|v| v.x <= 2.0));
        assert_eq!(arr.polygonize_rejecting(|owner| owner.is_none()).len(), 2);
    }
}
