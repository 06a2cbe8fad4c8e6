pub mod fixtures;
pub mod plan;
pub mod types;
