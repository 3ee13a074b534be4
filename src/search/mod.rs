pub mod priority_queue;
pub mod status_tree;

pub use priority_queue::EventPriorityQueue;
pub use status_tree::{KeyOrder, NodeId, Span, StatusTree};
