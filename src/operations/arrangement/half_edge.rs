use std::f64::consts::PI;

use slotmap::{new_key_type, SlotMap};

use crate::math::{normalize_angle, Point2, PointIndex, Tolerance};

new_key_type! {
    /// Handle to a vertex of a [`HalfEdgeArrangement`].
    pub struct VertexId;
    /// Handle to a half-edge of a [`HalfEdgeArrangement`].
    pub struct HalfEdgeId;
}

/// A merged endpoint and the half-edges leaving and entering it.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub point: Point2,
    pub outgoing: Vec<HalfEdgeId>,
    pub incoming: Vec<HalfEdgeId>,
}

/// One direction of a segment.
#[derive(Debug, Clone)]
pub struct HalfEdge {
    pub origin: VertexId,
    pub dest: VertexId,
    /// The opposite half-edge, when both directions are present.
    pub twin: Option<HalfEdgeId>,
    /// The half-edge the turning rule picks at `dest`.
    pub next: Option<HalfEdgeId>,
    pub owner: Option<usize>,
}

/// Planar graph of directed half-edges over tolerance-merged vertices.
///
/// Built per call and owned by the caller. Vertices and half-edges are
/// arena entries; all links between them are ids.
#[derive(Debug, Clone)]
pub struct HalfEdgeArrangement {
    vertices: SlotMap<VertexId, Vertex>,
    half_edges: SlotMap<HalfEdgeId, HalfEdge>,
    index: PointIndex,
    by_index: Vec<VertexId>,
    tolerance: Tolerance,
}

impl HalfEdgeArrangement {
    /// Creates an empty arrangement.
    #[must_use]
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            vertices: SlotMap::with_key(),
            half_edges: SlotMap::with_key(),
            index: PointIndex::new(tolerance.epsilon()),
            by_index: Vec::new(),
            tolerance,
        }
    }

    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    #[must_use]
    pub fn half_edge(&self, id: HalfEdgeId) -> Option<&HalfEdge> {
        self.half_edges.get(id)
    }

    /// Vertices in the order they were first added.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.by_index.iter().map(|&id| (id, &self.vertices[id]))
    }

    /// Half-edges in the order they were added.
    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdge)> {
        self.half_edges.iter()
    }

    /// Position of a vertex.
    #[must_use]
    pub fn point(&self, id: VertexId) -> Point2 {
        self.vertices[id].point
    }

    /// Finds the vertex within tolerance of `p`.
    #[must_use]
    pub fn find_vertex(&self, p: &Point2) -> Option<VertexId> {
        self.index.find(p).map(|i| self.by_index[i])
    }

    /// Finds or creates the vertex at `p`.
    pub fn add_vertex(&mut self, p: Point2) -> VertexId {
        let (i, is_new) = self.index.insert(p);
        if !is_new {
            return self.by_index[i];
        }
        let id = self.vertices.insert(Vertex {
            point: self.index.point(i),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        });
        self.by_index.push(id);
        id
    }

    /// The half-edge running `from → to`, if present.
    #[must_use]
    pub fn find_half_edge(&self, from: VertexId, to: VertexId) -> Option<HalfEdgeId> {
        self.vertices
            .get(from)?
            .outgoing
            .iter()
            .copied()
            .find(|&h| self.half_edges[h].dest == to)
    }

    /// Whether either direction between the two points is already present.
    #[must_use]
    pub fn has_edge_between(&self, a: &Point2, b: &Point2) -> bool {
        match (self.find_vertex(a), self.find_vertex(b)) {
            (Some(va), Some(vb)) => {
                self.find_half_edge(va, vb).is_some() || self.find_half_edge(vb, va).is_some()
            }
            _ => false,
        }
    }

    /// Adds the segment `from → to`, and `to → from` as well when `two_way`.
    ///
    /// Zero-length segments and half-edges already present are skipped.
    /// Returns the `from → to` half-edge, or `None` for a zero-length segment.
    pub fn add_segment(
        &mut self,
        from: Point2,
        to: Point2,
        owner: Option<usize>,
        two_way: bool,
    ) -> Option<HalfEdgeId> {
        let a = self.add_vertex(from);
        let b = self.add_vertex(to);
        if a == b {
            return None;
        }
        let forward = self.add_half_edge(a, b, owner);
        if two_way {
            self.add_half_edge(b, a, owner);
        }
        self.relink(a);
        self.relink(b);
        Some(forward)
    }

    fn add_half_edge(&mut self, a: VertexId, b: VertexId, owner: Option<usize>) -> HalfEdgeId {
        if let Some(existing) = self.find_half_edge(a, b) {
            return existing;
        }
        let twin = self.find_half_edge(b, a);
        let id = self.half_edges.insert(HalfEdge {
            origin: a,
            dest: b,
            twin,
            next: None,
            owner,
        });
        if let Some(t) = twin {
            self.half_edges[t].twin = Some(id);
        }
        self.vertices[a].outgoing.push(id);
        self.vertices[b].incoming.push(id);
        id
    }

    /// Recomputes `next` for every half-edge arriving at `v`.
    fn relink(&mut self, v: VertexId) {
        let incoming = self.vertices[v].incoming.clone();
        for h in incoming {
            let next = self.turn(h, |_| true);
            self.half_edges[h].next = next;
        }
    }

    /// Picks the half-edge to follow after `h`: the sharpest left turn at
    /// its destination among half-edges accepted by `allowed`.
    ///
    /// Turning straight back along `h` is the last resort, taken only at a
    /// dead end.
    pub(crate) fn turn<F>(&self, h: HalfEdgeId, allowed: F) -> Option<HalfEdgeId>
    where
        F: Fn(HalfEdgeId) -> bool,
    {
        let edge = &self.half_edges[h];
        let at = self.vertices[edge.dest].point;
        let back = self.vertices[edge.origin].point - at;
        let back_angle = back.y.atan2(back.x);

        let mut best: Option<(HalfEdgeId, f64)> = None;
        for &candidate in &self.vertices[edge.dest].outgoing {
            if !allowed(candidate) {
                continue;
            }
            let dir = self.vertices[self.half_edges[candidate].dest].point - at;
            // Clockwise sweep from the way back to the candidate.
            let mut cw = normalize_angle(back_angle - dir.y.atan2(dir.x));
            if cw < ANGLE_EPS || cw > 2.0 * PI - ANGLE_EPS {
                cw = 2.0 * PI;
            }
            if best.map_or(true, |(_, b)| cw < b) {
                best = Some((candidate, cw));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Whether `b` runs straight back along `a`.
    pub(crate) fn is_reverse(&self, a: HalfEdgeId, b: HalfEdgeId) -> bool {
        let (ea, eb) = (&self.half_edges[a], &self.half_edges[b]);
        ea.origin == eb.dest && ea.dest == eb.origin
    }
}

const ANGLE_EPS: f64 = 1e-9;
