mod events;
mod find;
mod intersections;
mod order;

pub use events::EventKey;
pub use find::FindIntersections;
pub use intersections::{IntersectionRecord, PointKey, SweepIntersections};
pub use order::{SegmentOrder, SweepPhase};
