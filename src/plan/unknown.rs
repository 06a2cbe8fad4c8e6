//! Adapter for faults whose payload is not failure-shaped.
//!
//! A [`Fault::Value`] cannot be matched against typed catch entries as-is, so
//! the engine synthesizes an [`UNKNOWN_ERROR`] carrying the original payload
//! under [`ORIGINAL_ERROR_KEY`]. [`reraise`] reverses the adaptation.
use std::panic::{self, AssertUnwindSafe};

use crate::types::error_class::{builtin_class, HIERARCHICAL_NODE};
use crate::types::{set_data, set_shared_data, ClassFlags, DataKey, Error, Fault, Payload};
use crate::PROGRAMMER_ERROR;

builtin_class!(
    /// Class of errors synthesized for raised values that were never failures.
    UNKNOWN_ERROR,
    UNKNOWN_NODE,
    4,
    Some(&HIERARCHICAL_NODE),
    "Unknown Error",
    ClassFlags::CAPTURE_STACK
);

/// Side-table key under which an [`UNKNOWN_ERROR`] keeps the original payload.
pub const ORIGINAL_ERROR_KEY: DataKey = DataKey::reserved(0);

pub(crate) fn adapt(payload: &Payload) -> Error {
    UNKNOWN_ERROR.wrap_with(
        payload.description().to_owned(),
        [set_shared_data(ORIGINAL_ERROR_KEY, payload.value().clone())],
    )
}

/// Builds the fault that re-raising `err` should produce.
///
/// Errors that are not unknown-fault adapters come back verbatim. An adapter
/// is unwrapped so the original payload continues outward instead of the
/// wrapper. An adapter without a stored payload is a misuse and yields a
/// [`PROGRAMMER_ERROR`].
///
/// # Examples
///
/// ```
/// use fault_rail::{reraise, Fault, Plan};
///
/// let outcome = Plan::run(|| Err(Fault::value(404_u16)))
///     .catch_all(|fault| Err(fault.reraise()))
///     .execute();
///
/// let payload = outcome.unwrap_err();
/// assert_eq!(payload.payload().and_then(|p| p.downcast_ref::<u16>()), Some(&404));
/// ```
pub fn reraise(err: Error) -> Fault {
    if !err.is(UNKNOWN_ERROR) {
        return Fault::Error(err);
    }
    match err.data(ORIGINAL_ERROR_KEY) {
        Some(value) => {
            Fault::Value(Payload::from_shared(value.clone(), err.cause().to_string()))
        },
        None => {
            let misuse = PROGRAMMER_ERROR.wrap_with(
                "misuse of plan internals: unknown fault carries no original payload",
                [set_data(ORIGINAL_ERROR_KEY, err)],
            );
            Fault::Error(misuse)
        },
    }
}

/// Returns the originally raised payload if `fault` adapts one, else `fault`.
pub fn original_error(fault: Fault) -> Fault {
    match fault {
        Fault::Error(err) if err.is(UNKNOWN_ERROR) => match err.data(ORIGINAL_ERROR_KEY) {
            Some(value) => {
                Fault::Value(Payload::from_shared(value.clone(), err.cause().to_string()))
            },
            None => Fault::Error(err),
        },
        other => other,
    }
}

/// Runs `block`, turning a Rust panic into a [`Fault::Value`].
///
/// This fences panic-oriented code so its failures flow through a
/// [`Plan`](crate::Plan) like any other raised value.
///
/// # Examples
///
/// ```
/// use fault_rail::{protect, UNKNOWN_ERROR};
///
/// let fault = protect(|| panic!("hooray!")).unwrap_err();
/// assert!(fault.is(UNKNOWN_ERROR));
/// assert_eq!(fault.to_string(), "hooray!");
/// ```
pub fn protect<F>(block: F) -> Result<(), Fault>
where
    F: FnOnce() -> Result<(), Fault>,
{
    match panic::catch_unwind(AssertUnwindSafe(block)) {
        Ok(outcome) => outcome,
        Err(panic) => {
            tracing::debug!(target: "fault_rail", "panic converted into fault");
            Err(Fault::Value(Payload::from_panic(panic)))
        },
    }
}
