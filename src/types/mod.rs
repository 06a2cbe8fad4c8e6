//! Error classes, classified errors and faults.
//!
//! This module holds the data model the [`Plan`](crate::Plan) engine reasons
//! over: the class forest ([`ErrorClass`]), classified values ([`Error`]),
//! their side-table ([`DataKey`]) and the raised outcome itself ([`Fault`]).
//!
//! # Examples
//!
//! ```
//! use fault_rail::types::{get_class, ErrorClass, HIERARCHICAL_ERROR};
//!
//! let parse = ErrorClass::new(None, "parse");
//! let err = parse.new_error("unexpected token");
//!
//! assert_eq!(get_class(&err), parse);
//! assert!(err.is(HIERARCHICAL_ERROR));
//! assert!(err.stack().is_some());
//! ```
pub mod data;
pub mod error;
pub mod error_class;
pub mod fault;
pub(crate) mod stack;

pub use data::{set_data, set_shared_data, DataEntry, DataKey, DataValue};
pub use error::{get_class, get_data, get_exits, wrapped_err, Error, ExitRecord};
pub use error_class::{
    ClassFlags, ErrorClass, HIERARCHICAL_ERROR, NOT_IMPLEMENTED_ERROR, PROGRAMMER_ERROR,
    SYSTEM_ERROR,
};
pub use fault::{BoxError, Fault, PanicPayload, Payload};
