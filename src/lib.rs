pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod search;

pub use error::{Error, Result};
