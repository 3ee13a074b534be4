use crate::error::{GeometryError, Result};
use crate::math::{Point2, Tolerance};

use super::segment::{is_finite, Segment};

/// An open chain of vertices.
///
/// A chain whose last vertex repeats its first is a closed cycle; the
/// repeated vertex is kept so the chain still reads end to end.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    vertices: Vec<Point2>,
}

impl Polyline {
    /// Creates a polyline, collapsing consecutive duplicate vertices.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for NaN or infinite coordinates, or
    /// `GeometryError::Degenerate` if fewer than 2 distinct vertices remain.
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if !vertices.iter().all(is_finite) {
            return Err(GeometryError::NonFinite.into());
        }
        let tol = Tolerance::default();
        let mut chain: Vec<Point2> = Vec::with_capacity(vertices.len());
        for p in vertices {
            if chain.last().map_or(true, |q| !tol.points_coincident(q, &p)) {
                chain.push(p);
            }
        }
        if chain.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "polyline needs at least 2 distinct vertices, got {}",
                chain.len()
            ))
            .into());
        }
        Ok(Self { vertices: chain })
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Point2> {
        self.vertices.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Point2> {
        self.vertices.last()
    }

    /// Whether the chain ends where it starts.
    #[must_use]
    pub fn is_closed(&self, tol: Tolerance) -> bool {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => self.vertices.len() > 2 && tol.points_coincident(a, b),
            _ => false,
        }
    }

    /// Consecutive pieces of the chain, each tagged with `owner` if given.
    #[must_use]
    pub fn segments(&self, owner: Option<usize>) -> Vec<Segment> {
        self.vertices
            .windows(2)
            .map(|w| Segment {
                start: w[0],
                end: w[1],
                owner,
            })
            .collect()
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.vertices.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}
