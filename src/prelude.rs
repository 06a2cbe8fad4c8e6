//! Convenience re-exports for common usage patterns.
//!
//! This prelude module provides the most commonly used items for quick starts.
//! Import everything with:
//!
//! ```
//! use fault_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`class_error!`], [`raise!`]
//! - **Types**: [`ErrorClass`], [`ClassFlags`], [`Error`], [`Fault`], [`Plan`]
//! - **Functions**: [`reraise`], [`protect`]
//! - **Traits**: [`ResultExt`]
//!
//! # Examples
//!
//! ```
//! use fault_rail::prelude::*;
//!
//! fn read_settings(path: &str) -> FaultResult<String> {
//!     let settings = ErrorClass::new(None, "settings");
//!     Ok(std::fs::read_to_string(path).classify(settings)?)
//! }
//!
//! let mut seen = None;
//! let outcome = Plan::run(|| read_settings("/no/such/settings.toml").map(drop))
//!     .catch_all(|fault| {
//!         seen = Some(fault.class().name());
//!         Ok(())
//!     })
//!     .execute();
//!
//! assert!(outcome.is_ok());
//! assert_eq!(seen, Some("settings"));
//! ```

// Macros
pub use crate::{class_error, raise};

// Core types
pub use crate::types::{ClassFlags, Error, ErrorClass, Fault};
pub use crate::Plan;

// Functions
pub use crate::plan::{protect, reraise};

// Traits
pub use crate::traits::ResultExt;

/// Result type for code that raises through a [`Plan`].
pub type FaultResult<T> = Result<T, Fault>;
