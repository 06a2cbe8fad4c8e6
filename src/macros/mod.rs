//! Ergonomic macros for building and raising classified errors.
//!
//! - [`macro@crate::class_error`] - Formats a message and wraps it into an
//!   [`Error`](crate::Error) of the given class.
//! - [`macro@crate::raise`] - Returns `Err(Fault)` from the enclosing block,
//!   either from a formatted message or from anything convertible into a
//!   [`Fault`](crate::Fault).
//!
//! # Examples
//!
//! ```
//! use fault_rail::{raise, ErrorClass, Fault, Plan};
//!
//! let quota = ErrorClass::new(None, "quota");
//!
//! let outcome = Plan::run(|| {
//!     let used = 11;
//!     if used > 10 {
//!         raise!(quota, "{} of 10 slots used", used);
//!     }
//!     Ok(())
//! })
//! .execute();
//!
//! let fault = outcome.unwrap_err();
//! assert!(fault.is(quota));
//! assert!(fault.to_string().starts_with("quota: 11 of 10 slots used"));
//! ```

/// Creates an [`Error`](crate::Error) of `class` from a format string.
///
/// # Examples
///
/// ```
/// use fault_rail::{class_error, NOT_IMPLEMENTED_ERROR};
///
/// let err = class_error!(NOT_IMPLEMENTED_ERROR, "codec {} not supported", "zstd");
/// assert!(err.is(NOT_IMPLEMENTED_ERROR));
/// ```
#[macro_export]
macro_rules! class_error {
    ($class:expr, $($arg:tt)*) => {
        $crate::ErrorClass::new_error($class, ::std::format!($($arg)*))
    };
}

/// Raises from the enclosing block by returning `Err(Fault)`.
///
/// `raise!(class, "fmt", args..)` raises a new classified error;
/// `raise!(value)` raises anything convertible into a [`Fault`](crate::Fault).
///
/// # Examples
///
/// ```
/// use fault_rail::{raise, Fault};
///
/// fn check(len: usize) -> Result<(), Fault> {
///     if len == 0 {
///         raise!(Fault::failure("empty input"));
///     }
///     Ok(())
/// }
///
/// assert_eq!(check(0).unwrap_err().to_string(), "empty input");
/// ```
#[macro_export]
macro_rules! raise {
    ($class:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        return ::std::result::Result::Err($crate::Fault::Error($crate::class_error!(
            $class, $fmt $(, $arg)*
        )))
    };
    ($fault:expr $(,)?) => {
        return ::std::result::Result::Err(::std::convert::Into::<$crate::Fault>::into($fault))
    };
}
