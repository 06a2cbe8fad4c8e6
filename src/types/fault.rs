//! The value carried by an abruptly terminated block.
//!
//! Protected blocks, catch handlers and finally callbacks all return
//! `Result<(), Fault>`; returning `Err` is how they raise. A [`Fault`] is
//! already sorted into the three shapes the [`Plan`](crate::Plan) engine
//! dispatches on.
//!
//! # Examples
//!
//! ```
//! use fault_rail::{Fault, SYSTEM_ERROR, UNKNOWN_ERROR};
//!
//! fn parse(input: &str) -> Result<u16, Fault> {
//!     Ok(input.parse::<u16>()?)
//! }
//!
//! let fault = parse("nope").unwrap_err();
//! assert!(matches!(fault, Fault::Failure(_)));
//! assert_eq!(fault.class(), SYSTEM_ERROR);
//!
//! let odd = Fault::value(7_i32);
//! assert_eq!(odd.class(), UNKNOWN_ERROR);
//! assert_eq!(odd.to_string(), "7");
//! ```
use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::plan::UNKNOWN_ERROR;
use crate::types::{DataValue, Error, ErrorClass};

/// Boxed failure value that is not (yet) a classified [`Error`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Payload of a fault.
///
/// `Fault` does not implement [`std::error::Error`], so any error
/// type converts into it with `?`. Classified [`Error`]s are recognised during
/// that conversion and land in [`Fault::Error`].
#[derive(Debug)]
pub enum Fault {
    /// An already classified error.
    Error(Error),
    /// A plain failure value that was never classified.
    Failure(BoxError),
    /// Arbitrary data that is not failure-shaped at all.
    Value(Payload),
}

impl Fault {
    /// Raises an arbitrary non-failure value.
    #[inline]
    pub fn value<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
    {
        Self::Value(Payload::new(value))
    }

    /// Raises a failure value, recognising classified errors.
    ///
    /// `Fault::failure("disk full")` yields [`Fault::Failure`];
    /// passing an [`Error`] yields [`Fault::Error`].
    #[inline]
    pub fn failure<E>(failure: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::from_boxed(failure.into())
    }

    /// Sorts a boxed failure into [`Fault::Error`] or [`Fault::Failure`].
    pub fn from_boxed(failure: BoxError) -> Self {
        match failure.downcast::<Error>() {
            Ok(err) => Self::Error(*err),
            Err(failure) => Self::Failure(failure),
        }
    }

    /// Returns the class this fault would be dispatched under.
    ///
    /// Unclassified failures go through the platform table; arbitrary values
    /// belong to [`UNKNOWN_ERROR`].
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Error(err) => err.class(),
            Self::Failure(failure) => crate::platform::classify(&**failure),
            Self::Value(_) => UNKNOWN_ERROR,
        }
    }

    #[inline]
    pub fn is(&self, class: ErrorClass) -> bool {
        self.class().is(class)
    }

    #[inline]
    pub fn as_error(&self) -> Option<&Error> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the classified error, or gives the fault back unchanged.
    pub fn into_error(self) -> Result<Error, Self> {
        match self {
            Self::Error(err) => Ok(err),
            other => Err(other),
        }
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Value(payload) => Some(payload),
            _ => None,
        }
    }

    /// Re-raises this fault; see [`reraise`](crate::reraise).
    pub fn reraise(self) -> Self {
        match self {
            Self::Error(err) => crate::plan::reraise(err),
            other => other,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => fmt::Display::fmt(err, f),
            Self::Failure(failure) => fmt::Display::fmt(failure, f),
            Self::Value(payload) => fmt::Display::fmt(payload, f),
        }
    }
}

impl<E> From<E> for Fault
where
    E: StdError + Send + Sync + 'static,
{
    #[inline]
    fn from(failure: E) -> Self {
        Self::from_boxed(Box::new(failure))
    }
}

impl From<Payload> for Fault {
    #[inline]
    fn from(payload: Payload) -> Self {
        Self::Value(payload)
    }
}

/// A raised value that is not failure-shaped, plus its rendered description.
///
/// The value is shared: cloning a payload, or adapting it into an
/// [`UNKNOWN_ERROR`], never copies the underlying data, so identity survives
/// a round trip through the handler chain.
#[derive(Clone)]
pub struct Payload {
    value: DataValue,
    description: Arc<str>,
}

impl Payload {
    /// Wraps `value`. Strings render as their text, anything else via `Debug`.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
    {
        let description = describe(&value).unwrap_or_else(|| format!("{value:?}"));
        Self { value: Arc::new(value), description: description.into() }
    }

    /// Wraps an already shared value without changing its identity.
    pub fn from_shared<D>(value: DataValue, description: D) -> Self
    where
        D: Into<Arc<str>>,
    {
        Self { value, description: description.into() }
    }

    /// Converts the payload of a caught Rust panic.
    ///
    /// Message payloads (`&'static str` and `String`) are kept as-is. Any other
    /// payload is only `Send`, so it is parked in a [`PanicPayload`] and the
    /// payload renders as `Box<dyn Any>`.
    pub fn from_panic(panic: Box<dyn Any + Send>) -> Self {
        match panic.downcast::<&'static str>() {
            Ok(message) => Self::from_shared(Arc::new(*message), *message),
            Err(panic) => match panic.downcast::<String>() {
                Ok(message) => {
                    let description: Arc<str> = message.as_str().into();
                    Self::from_shared(Arc::new(*message), description)
                },
                Err(panic) => Self::from_shared(Arc::new(PanicPayload::new(panic)), "Box<dyn Any>"),
            },
        }
    }

    #[inline]
    pub fn value(&self) -> &DataValue {
        &self.value
    }

    /// Returns the value if it is a `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_ref().downcast_ref::<T>()
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` if both payloads share the same underlying value.
    #[inline]
    pub fn ptr_eq(&self, other: &Payload) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload").field("description", &self.description).finish_non_exhaustive()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

fn describe(value: &dyn Any) -> Option<String> {
    if let Some(text) = value.downcast_ref::<&'static str>() {
        return Some((*text).to_owned());
    }
    value.downcast_ref::<String>().cloned()
}

/// A panic payload that is neither a `&'static str` nor a `String`.
///
/// Panic payloads are `Send` but not `Sync`; the lock makes them shareable
/// through a [`Payload`] without losing the original value.
///
/// # Examples
///
/// ```
/// use fault_rail::{protect, PanicPayload};
///
/// let fault = protect(|| std::panic::panic_any(42_u8)).unwrap_err();
/// let parked = fault.payload().and_then(|p| p.downcast_ref::<PanicPayload>()).unwrap();
///
/// assert_eq!(parked.downcast_cloned::<u8>(), Some(42));
/// let original = parked.take().unwrap();
/// assert_eq!(original.downcast_ref::<u8>(), Some(&42));
/// assert!(parked.take().is_none());
/// ```
pub struct PanicPayload(Mutex<Option<Box<dyn Any + Send>>>);

impl PanicPayload {
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        Self(Mutex::new(Some(payload)))
    }

    /// Moves the original payload out, e.g. for [`std::panic::resume_unwind`].
    ///
    /// Returns `None` once the payload has been taken.
    pub fn take(&self) -> Option<Box<dyn Any + Send>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// Returns a copy of the payload if it is still present and is a `T`.
    pub fn downcast_cloned<T: Any + Clone>(&self) -> Option<T> {
        let guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().and_then(|payload| payload.downcast_ref::<T>()).cloned()
    }
}

impl fmt::Debug for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present = self.0.lock().map(|payload| payload.is_some()).unwrap_or(false);
        f.debug_struct("PanicPayload").field("present", &present).finish()
    }
}
