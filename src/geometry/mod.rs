pub mod polygon;
pub mod polyline;
pub mod segment;

pub use polygon::Polygon;
pub use polyline::Polyline;
pub use segment::Segment;
