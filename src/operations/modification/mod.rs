mod split;

pub use split::SplitPolygon;
