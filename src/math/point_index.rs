use std::collections::HashMap;

use super::Point2;

/// Tolerance-merged set of points, indexed densely in insertion order.
///
/// Points are bucketed in a grid of `epsilon`-sized cells. A lookup checks
/// the 3x3 neighbourhood of the query cell, so any stored point within
/// `epsilon` of the query is found.
#[derive(Debug, Clone)]
pub struct PointIndex {
    epsilon: f64,
    points: Vec<Point2>,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl PointIndex {
    /// Creates an empty index that merges points closer than `epsilon`.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            points: Vec::new(),
            cells: HashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell(&self, p: &Point2) -> (i64, i64) {
        (
            (p.x / self.epsilon).floor() as i64,
            (p.y / self.epsilon).floor() as i64,
        )
    }

    /// Returns the index of a stored point within `epsilon` of `p`, if any.
    ///
    /// When several stored points qualify, the closest one wins.
    #[must_use]
    pub fn find(&self, p: &Point2) -> Option<usize> {
        let (cx, cy) = self.cell(p);
        let eps_sq = self.epsilon * self.epsilon;
        let mut best: Option<(usize, f64)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &i in bucket {
                    let d = (self.points[i] - p).norm_squared();
                    if d <= eps_sq && best.map_or(true, |(_, bd)| d < bd) {
                        best = Some((i, d));
                    }
                }
            }
        }
        best.map(|(i, _)| i)
    }

    /// Finds or inserts a point, returning its index and whether it was new.
    pub fn insert(&mut self, p: Point2) -> (usize, bool) {
        if let Some(i) = self.find(&p) {
            return (i, false);
        }
        let i = self.points.len();
        let cell = self.cell(&p);
        self.points.push(p);
        self.cells.entry(cell).or_default().push(i);
        (i, true)
    }

    /// The stored representative point at `index`.
    #[must_use]
    pub fn point(&self, index: usize) -> Point2 {
        self.points[index]
    }

    /// All stored points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of distinct points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn merges_points_within_epsilon() {
        let mut index = PointIndex::new(TOLERANCE);
        let (a, new_a) = index.insert(Point2::new(1.0, 1.0));
        let (b, new_b) = index.insert(Point2::new(1.0 + 0.5 * TOLERANCE, 1.0));
        assert!(new_a);
        assert!(!new_b);
        assert_eq!(a, b);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn merges_across_cell_boundary() {
        let mut index = PointIndex::new(1.0);
        // 0.99 and 1.01 fall in different cells but are closer than epsilon.
        let (a, _) = index.insert(Point2::new(0.99, 0.0));
        let (b, _) = index.insert(Point2::new(1.01, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn keeps_distant_points_apart() {
        let mut index = PointIndex::new(TOLERANCE);
        index.insert(Point2::new(0.0, 0.0));
        index.insert(Point2::new(0.0, 1.0));
        index.insert(Point2::new(-3.0, 2.0));
        assert_eq!(index.len(), 3);
        assert_eq!(index.find(&Point2::new(-3.0, 2.0)).unwrap(), 2);
        assert!(index.find(&Point2::new(5.0, 5.0)).is_none());
    }
}
