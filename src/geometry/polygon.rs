use crate::error::{GeometryError, Result};
use crate::math::distance_2d::project_onto_segment;
use crate::math::intersect_2d::point_on_segment;
use crate::math::polygon_2d::{
    point_in_polygon_2d, rotate_to_canonical_start, signed_area_2d, PointClassification,
};
use crate::math::{Point2, Tolerance};
use crate::operations::sweep::{FindIntersections, SweepIntersections};

use super::segment::{is_finite, Segment};

/// A closed ring of vertices. The last vertex connects back to the first.
///
/// Counter-clockwise rings (positive signed area) bound regions,
/// clockwise rings bound holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from its ring of vertices.
    ///
    /// Consecutive duplicates and a repeated closing vertex are collapsed.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for NaN or infinite coordinates, or
    /// `GeometryError::Degenerate` if fewer than 3 distinct vertices remain.
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if !vertices.iter().all(is_finite) {
            return Err(GeometryError::NonFinite.into());
        }
        let tol = Tolerance::default();
        let mut ring: Vec<Point2> = Vec::with_capacity(vertices.len());
        for p in vertices {
            if ring.last().map_or(true, |q| !tol.points_coincident(q, &p)) {
                ring.push(p);
            }
        }
        while ring.len() > 1 && tol.points_coincident(&ring[0], &ring[ring.len() - 1]) {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "polygon needs at least 3 distinct vertices, got {}",
                ring.len()
            ))
            .into());
        }
        Ok(Self { vertices: ring })
    }

    /// Wraps a ring already known to be clean.
    pub(crate) fn from_ring(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Number of vertices (and of edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The ring's edges in order, untagged.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
            .collect()
    }

    /// The ring's edges in order, each tagged with `owner`.
    #[must_use]
    pub fn segments_with_owner(&self, owner: usize) -> Vec<Segment> {
        self.segments()
            .into_iter()
            .map(|s| s.with_owner(owner))
            .collect()
    }

    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Same ring walked the other way round.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// This ring oriented counter-clockwise.
    #[must_use]
    pub fn to_ccw(&self) -> Self {
        if self.signed_area() < 0.0 {
            self.reversed()
        } else {
            self.clone()
        }
    }

    /// Same ring rotated to start at its leftmost-lowest vertex.
    #[must_use]
    pub fn canonical(&self) -> Self {
        Self {
            vertices: rotate_to_canonical_start(&self.vertices),
        }
    }

    /// Classifies `point` against this ring.
    #[must_use]
    pub fn contains_point(&self, point: &Point2, tol: Tolerance) -> PointClassification {
        point_in_polygon_2d(point, &self.vertices, tol.epsilon())
    }

    /// Inserts every point of `points` that lies on an edge (away from its
    /// endpoints) as a new vertex. Points on the same edge are inserted in
    /// order along it; points elsewhere are ignored.
    #[must_use]
    pub fn split_at(&self, points: &[Point2], tol: Tolerance) -> Self {
        let eps = tol.epsilon();
        let n = self.vertices.len();
        let mut ring = Vec::with_capacity(n + points.len());
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            ring.push(a);

            let mut on_edge: Vec<(f64, Point2)> = points
                .iter()
                .filter(|p| {
                    point_on_segment(p, &a, &b, eps)
                        && !tol.points_coincident(p, &a)
                        && !tol.points_coincident(p, &b)
                })
                .map(|p| (project_onto_segment(p, &a, &b), *p))
                .collect();
            on_edge.sort_by(|x, y| x.0.total_cmp(&y.0));
            for (_, p) in on_edge {
                if ring.last().map_or(true, |q| !tol.points_coincident(q, &p)) {
                    ring.push(p);
                }
            }
        }
        Self { vertices: ring }
    }

    /// Finds where this ring's edges meet `other`'s edges.
    ///
    /// This ring's edges carry owner `0`, the other's owner `1`. Shared
    /// vertices between consecutive edges of the same ring are reported too.
    #[must_use]
    pub fn intersections_2d(&self, other: &Self, tol: Tolerance) -> SweepIntersections {
        let mut segments = self.segments_with_owner(0);
        segments.extend(other.segments_with_owner(1));
        FindIntersections::new(&segments)
            .with_tolerance(tol)
            .execute()
    }

    /// Whether both rings visit the same vertices in the same cyclic order,
    /// allowing a different starting vertex.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self, tol: Tolerance) -> bool {
        let n = self.vertices.len();
        if n != other.vertices.len() {
            return false;
        }
        (0..n).any(|offset| {
            (0..n).all(|i| {
                tol.points_coincident(&self.vertices[i], &other.vertices[(i + offset) % n])
            })
        })
    }
}
