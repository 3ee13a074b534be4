pub mod arrangement;
pub mod boolean;
pub mod modification;
pub mod sweep;
