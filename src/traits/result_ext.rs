//! Extension trait for classifying the error side of a `Result`.
//!
//! This module provides [`ResultExt`], which routes an `Err` through
//! [`ErrorClass::wrap`](crate::ErrorClass::wrap) without verbose `.map_err()`
//! chains. `Ok` values pass through untouched, which is the `Result` reading of
//! "wrapping nothing yields nothing".
//!
//! # Examples
//!
//! ```
//! use fault_rail::traits::ResultExt;
//! use fault_rail::ErrorClass;
//!
//! let config = ErrorClass::new(None, "config");
//!
//! fn load(path: &str) -> Result<String, std::io::Error> {
//!     std::fs::read_to_string(path)
//! }
//!
//! let err = load("/definitely/missing.toml").classify(config).unwrap_err();
//! assert!(err.is(config));
//! ```
use crate::types::{BoxError, Error, ErrorClass};

/// Extension trait for tagging `Result` errors with an [`ErrorClass`].
pub trait ResultExt<T> {
    /// Wraps the error with `class`.
    ///
    /// An error that already belongs to `class` is passed through unchanged.
    fn classify(self, class: ErrorClass) -> Result<T, Error>;

    /// Like [`classify`](ResultExt::classify), also passing through errors
    /// that belong to any class in `exemptions`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fault_rail::traits::ResultExt;
    /// use fault_rail::ErrorClass;
    ///
    /// let db = ErrorClass::new(None, "db");
    /// let api = ErrorClass::new(None, "api");
    ///
    /// let inner: Result<(), _> = Err(db.new_error("locked"));
    /// let outer = inner.classify_exempt(api, &[db]).unwrap_err();
    /// assert_eq!(outer.class(), db);
    /// ```
    fn classify_exempt(self, class: ErrorClass, exemptions: &[ErrorClass]) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline]
    fn classify(self, class: ErrorClass) -> Result<T, Error> {
        self.map_err(|e| class.wrap(e))
    }

    #[inline]
    fn classify_exempt(self, class: ErrorClass, exemptions: &[ErrorClass]) -> Result<T, Error> {
        self.map_err(|e| class.wrap_exempt(e, exemptions))
    }
}
