use std::cmp::Ordering;

use crate::math::Point2;

/// Sweep order of event points: left to right, then bottom to top.
#[derive(Debug, Clone, Copy)]
pub struct EventKey {
    pub x: f64,
    pub y: f64,
}

impl EventKey {
    #[must_use]
    pub fn new(p: &Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl PartialEq for EventKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventKey {}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_x_then_y() {
        let a = EventKey::new(&Point2::new(0.0, 5.0));
        let b = EventKey::new(&Point2::new(1.0, -5.0));
        let c = EventKey::new(&Point2::new(1.0, 2.0));
        assert!(a < b);
        assert!(b < c);
        assert_eq!(c, EventKey::new(&Point2::new(1.0, 2.0)));
    }
}
