pub mod data;
pub mod formatting;
