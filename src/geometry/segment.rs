use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2};

/// A straight boundary piece between two points.
///
/// Endpoint order is kept: classification treats the region as lying to the
/// left of `start → end`. The `owner` tag records which input boundary (or
/// which input index) the segment came from and survives splitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
    pub owner: Option<usize>,
}

impl Segment {
    /// Creates an untagged segment without validation.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            owner: None,
        }
    }

    /// Creates a segment, rejecting non-finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if any coordinate is NaN or infinite.
    pub fn try_new(start: Point2, end: Point2) -> Result<Self> {
        if !is_finite(&start) || !is_finite(&end) {
            return Err(GeometryError::NonFinite.into());
        }
        Ok(Self::new(start, end))
    }

    /// Returns a copy tagged with `owner`.
    #[must_use]
    pub fn with_owner(mut self, owner: usize) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }

    /// Point at parameter `t` along `start → end`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.direction() * t
    }

    /// Same segment with its endpoints swapped. The owner tag is kept.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            owner: self.owner,
        }
    }

    /// Whether the segment is shorter than `eps`.
    #[must_use]
    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.length() <= eps
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        is_finite(&self.start) && is_finite(&self.end)
    }
}

pub(crate) fn is_finite(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
