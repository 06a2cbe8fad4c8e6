//! Hierarchical error classes and typed catch/finally plans.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `fault_rail::*` or pick focused pieces as needed.
//!
//! The crate has two halves:
//!
//! - A classification forest of [`ErrorClass`] nodes. Failures are wrapped
//!   into classified [`Error`] values, which can later be queried for
//!   membership anywhere up the hierarchy.
//! - A structured control-flow layer, [`Plan`], that runs a protected block,
//!   dispatches whatever [`Fault`] it raises to the first matching catch
//!   handler and always runs finally callbacks.
//!
//! Raising is explicit: blocks and handlers return `Result<(), Fault>` and
//! `Err` plays the part of an in-flight exception.
//!
//! # Examples
//!
//! ## Classes and Wrapping
//!
//! ```
//! use fault_rail::{ErrorClass, HIERARCHICAL_ERROR};
//!
//! let fruit = ErrorClass::new(None, "fruit");
//! let apple = fruit.subclass("apple");
//!
//! let err = apple.new_error("bruised");
//! assert!(err.is(fruit));
//! assert!(err.is(HIERARCHICAL_ERROR));
//! assert!(err.stack().is_some());
//!
//! // Wrapping with a class the error already belongs to is a no-op.
//! assert!(fruit.wrap(err.clone()).ptr_eq(&err));
//! ```
//!
//! ## Catch and Finally
//!
//! ```
//! use std::cell::RefCell;
//! use fault_rail::{Fault, Plan};
//!
//! let trace = RefCell::new(Vec::new());
//!
//! let outcome = Plan::run(|| {
//!     trace.borrow_mut().push("block");
//!     Err(Fault::failure("any error"))
//! })
//! .catch_all(|_| {
//!     trace.borrow_mut().push("catch all");
//!     Ok(())
//! })
//! .finally(|| {
//!     trace.borrow_mut().push("finally");
//!     Ok(())
//! })
//! .execute();
//!
//! assert!(outcome.is_ok());
//! assert_eq!(*trace.borrow(), ["block", "catch all", "finally"]);
//! ```
//!
//! ## Raising Arbitrary Values
//!
//! ```
//! use fault_rail::{Fault, Plan, ORIGINAL_ERROR_KEY, UNKNOWN_ERROR};
//!
//! let mut caught = None;
//! Plan::run(|| Err(Fault::value("hooray!")))
//!     .catch(UNKNOWN_ERROR, |err| {
//!         caught = err.data_as::<&str>(ORIGINAL_ERROR_KEY).copied();
//!         Ok(())
//!     })
//!     .execute()
//!     .unwrap();
//!
//! assert_eq!(caught, Some("hooray!"));
//! ```

/// Process-wide capture and logging limits
pub mod config;
/// Creation-time logging through `tracing`
pub mod logging;
/// Macros for building and raising classified errors
pub mod macros;
/// Static table classifying platform failure types
pub mod platform;
/// Typed catch/finally plans and the unknown-fault adapter
pub mod plan;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Extension traits for classifying errors
pub mod traits;
/// Error classes, classified errors, side-table data and faults
pub mod types;

pub use config::Config;
pub use plan::{original_error, protect, reraise, Plan, ORIGINAL_ERROR_KEY, UNKNOWN_ERROR};
pub use prelude::FaultResult;
pub use traits::*;
pub use types::{
    get_class, get_data, get_exits, set_data, set_shared_data, wrapped_err, BoxError, ClassFlags,
    DataEntry, DataKey, DataValue, Error, ErrorClass, ExitRecord, Fault, PanicPayload, Payload,
    HIERARCHICAL_ERROR, NOT_IMPLEMENTED_ERROR, PROGRAMMER_ERROR, SYSTEM_ERROR,
};
