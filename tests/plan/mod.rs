pub mod dispatch;
pub mod panics;
