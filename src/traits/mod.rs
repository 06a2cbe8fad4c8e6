//! Extension traits for classifying errors.
//!
//! - [`ResultExt`]: tags the error side of any `Result` with an
//!   [`ErrorClass`](crate::ErrorClass)
//!
//! # Examples
//!
//! ```
//! use fault_rail::traits::ResultExt;
//! use fault_rail::ErrorClass;
//!
//! let parse = ErrorClass::new(None, "parse");
//! let err = "x1".parse::<u8>().classify(parse).unwrap_err();
//! assert!(err.to_string().starts_with("parse: invalid digit"));
//! ```

pub mod result_ext;

pub use result_ext::ResultExt;
