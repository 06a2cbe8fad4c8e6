//! Classified error values and the wrap boundary.
//!
//! [`ErrorClass::wrap`] is the single place where an underlying failure turns
//! into a classified [`Error`]. Wrapping is idempotent: an error that already
//! belongs to the wrapping class (or to one of the exempted classes) passes
//! through untouched, which keeps nested boundaries of the same class from
//! piling up layers.
//!
//! # Examples
//!
//! ```
//! use fault_rail::ErrorClass;
//!
//! let storage = ErrorClass::new(None, "storage");
//! let err = storage.new_error("disk full");
//! assert!(err.to_string().starts_with("storage: disk full"));
//!
//! let again = storage.wrap(err.clone());
//! assert!(again.ptr_eq(&err));
//! ```
use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};

use crate::types::data::DataMap;
use crate::types::{stack, BoxError, DataEntry, DataKey, DataValue, ErrorClass, Fault};
use crate::{config, logging, ClassFlags};

/// Location of a plan boundary a classified fault passed through.
pub type ExitRecord = &'static Location<'static>;

struct Inner {
    cause: BoxError,
    class: ErrorClass,
    stack: Option<Box<str>>,
    data: DataMap,
    exits: Mutex<Vec<ExitRecord>>,
}

/// An underlying failure tagged with an [`ErrorClass`].
///
/// `Error` is an immutable, cheaply clonable handle; clones share identity
/// (see [`ptr_eq`](Error::ptr_eq)). The only thing that ever changes after
/// construction is the additive exit-path record kept by the
/// [`Plan`](crate::Plan) engine.
#[derive(Clone)]
pub struct Error {
    inner: Arc<Inner>,
}

impl Error {
    #[inline]
    pub fn class(&self) -> ErrorClass {
        self.inner.class
    }

    /// Returns `true` if this error's class [`is`](ErrorClass::is) `class`.
    #[inline]
    pub fn is(&self, class: ErrorClass) -> bool {
        self.inner.class.is(class)
    }

    /// Returns the stack captured at wrap time, if the class asked for one.
    #[inline]
    pub fn stack(&self) -> Option<&str> {
        self.inner.stack.as_deref()
    }

    /// Returns the wrapped underlying failure.
    #[inline]
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner.cause
    }

    /// Looks up `key` in the side-table.
    ///
    /// If this error does not carry the key, classified errors further down
    /// the cause chain are consulted.
    pub fn data(&self, key: DataKey) -> Option<&DataValue> {
        if let Some(value) = self.inner.data.get(key) {
            return Some(value);
        }
        self.inner.cause.downcast_ref::<Error>().and_then(|cause| cause.data(key))
    }

    /// Typed variant of [`data`](Error::data).
    pub fn data_as<T: Any>(&self, key: DataKey) -> Option<&T> {
        self.data(key).and_then(|value| value.as_ref().downcast_ref::<T>())
    }

    /// Returns the plan boundaries this error has passed through, oldest first.
    pub fn exits(&self) -> Vec<ExitRecord> {
        self.inner.exits.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn record_exit(&self, exit: ExitRecord) {
        self.inner.exits.lock().unwrap_or_else(PoisonError::into_inner).push(exit);
    }

    /// Returns `true` if both handles refer to the same error.
    #[inline]
    pub fn ptr_eq(&self, other: &Error) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn message(&self) -> String {
        let class = self.inner.class;
        let rendered = self.inner.cause.to_string();
        let message = rendered.trim_end_matches(['\n', ' ']);
        if message.contains('\n') {
            format!("{class}:\n  {}", message.replace('\n', "\n  "))
        } else {
            format!("{class}: {message}")
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())?;
        if let Some(stack) = &self.inner.stack {
            write!(f, "\n\n{} backtrace: {}", self.inner.class, stack)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("class", &self.inner.class.name())
            .field("cause", &self.inner.cause)
            .field("data", &self.inner.data)
            .field("has_stack", &self.inner.stack.is_some())
            .finish_non_exhaustive()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.inner.cause)
    }
}

impl ErrorClass {
    /// Wraps `cause` into an error of this class.
    pub fn wrap<E>(self, cause: E) -> Error
    where
        E: Into<BoxError>,
    {
        self.build(cause.into(), &[], DataMap::new())
    }

    /// Like [`wrap`](ErrorClass::wrap), but a cause that already belongs to
    /// any class in `exemptions` is returned unchanged too.
    pub fn wrap_exempt<E>(self, cause: E, exemptions: &[ErrorClass]) -> Error
    where
        E: Into<BoxError>,
    {
        self.build(cause.into(), exemptions, DataMap::new())
    }

    /// Wraps `cause` and attaches side-table entries to the new error.
    ///
    /// The entries are dropped if `cause` passes through unchanged.
    pub fn wrap_with<E, I>(self, cause: E, data: I) -> Error
    where
        E: Into<BoxError>,
        I: IntoIterator<Item = DataEntry>,
    {
        self.build(cause.into(), &[], data.into_iter().collect())
    }

    /// Nil-propagating wrap: `None` stays `None`.
    pub fn wrap_opt<E>(self, cause: Option<E>) -> Option<Error>
    where
        E: Into<BoxError>,
    {
        cause.map(|cause| self.wrap(cause))
    }

    /// Creates an error of this class from a message.
    ///
    /// See [`class_error!`](crate::class_error) for the formatting shorthand.
    pub fn new_error<M>(self, message: M) -> Error
    where
        M: fmt::Display,
    {
        self.wrap(message.to_string())
    }

    fn build(self, cause: BoxError, exemptions: &[ErrorClass], data: DataMap) -> Error {
        let cause: BoxError = match cause.downcast::<Error>() {
            Ok(existing) => {
                if existing.is(self) || exemptions.iter().any(|&class| existing.is(class)) {
                    return *existing;
                }
                existing as BoxError
            },
            Err(cause) => cause,
        };

        let flags = self.flags();
        let stack = if flags.contains(ClassFlags::CAPTURE_STACK) {
            stack::capture(config::current().stack_capture_len)
        } else {
            None
        };

        let err = Error {
            inner: Arc::new(Inner { cause, class: self, stack, data, exits: Mutex::new(Vec::new()) }),
        };
        if flags.contains(ClassFlags::LOG_ON_CREATION) {
            logging::log_with_stack(&err.to_string());
        }
        err
    }
}

/// Classifies any failure value.
///
/// Classified errors report their own class; everything else is looked up in
/// the [platform table](crate::platform), defaulting to
/// [`SYSTEM_ERROR`](crate::SYSTEM_ERROR).
pub fn get_class(err: &(dyn StdError + 'static)) -> ErrorClass {
    match err.downcast_ref::<Error>() {
        Some(classified) => classified.class(),
        None => crate::platform::classify(err),
    }
}

/// Returns the cause of a classified error, or `err` itself otherwise.
pub fn wrapped_err<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    match err.downcast_ref::<Error>() {
        Some(classified) => classified.cause(),
        None => err,
    }
}

/// Looks up `key` on a fault; only classified errors carry a side-table.
pub fn get_data(fault: &Fault, key: DataKey) -> Option<&DataValue> {
    fault.as_error().and_then(|err| err.data(key))
}

/// Renders the exit path of a fault, one `file:line:column` per line.
///
/// Unclassified faults have no exit path and render as an empty string.
pub fn get_exits(fault: &Fault) -> String {
    fault
        .as_error()
        .map(|err| err.exits().iter().map(|exit| exit.to_string()).collect::<Vec<_>>().join("\n"))
        .unwrap_or_default()
}
