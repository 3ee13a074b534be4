mod classify;
mod engine;
mod graph;
mod intersect_op;
mod select;
mod subtract;
mod union;

pub use classify::{
    count_by_label, BoundaryContact, ClassifiedEdge, ClassifySegments, SetClassification,
};
pub use engine::split_boundaries;
pub use graph::BuildGraph;
pub use intersect_op::Intersect;
pub use select::{
    edge_source_location, should_keep_edge, BooleanOp, EdgeLocation, EdgeSource, KeepDecision,
};
pub use subtract::Subtract;
pub use union::Union;
