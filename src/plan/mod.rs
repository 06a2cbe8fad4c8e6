//! Typed catch/finally plans over explicit fault outcomes.
//!
//! A [`Plan`] runs one protected block, classifies whatever [`Fault`] it
//! raises, hands it to the first matching catch entry and always runs the
//! registered finally callbacks before deciding whether the fault is absorbed
//! or keeps propagating.
//!
//! Matching is first-match-wins in registration order, not most-specific-wins:
//! register subclass handlers before their superclasses, and
//! [`catch_all`](Plan::catch_all) last.
//!
//! Any fault raised by a handler or a finally callback replaces whatever was
//! in flight. A finally callback that raises therefore masks the original
//! fault for good.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use fault_rail::{ErrorClass, Fault, Plan};
//!
//! let fruit = ErrorClass::new(None, "fruit");
//! let apple = fruit.subclass("apple");
//! let trace = RefCell::new(Vec::new());
//!
//! let outcome = Plan::run(|| {
//!     trace.borrow_mut().push("block");
//!     Err(Fault::Error(apple.new_error("bruised")))
//! })
//! .catch(fruit, |_| {
//!     trace.borrow_mut().push("fruit handler");
//!     Ok(())
//! })
//! .finally(|| {
//!     trace.borrow_mut().push("finally");
//!     Ok(())
//! })
//! .execute();
//!
//! assert!(outcome.is_ok());
//! assert_eq!(*trace.borrow(), ["block", "fruit handler", "finally"]);
//! ```
use std::fmt;
use std::panic::Location;

use smallvec::SmallVec;

use crate::types::{Error, ErrorClass, ExitRecord, Fault};

mod unknown;

pub use unknown::{original_error, protect, reraise, ORIGINAL_ERROR_KEY, UNKNOWN_ERROR};

type Block<'a> = Box<dyn FnOnce() -> Result<(), Fault> + 'a>;
type ClassHandler<'a> = Box<dyn FnOnce(Error) -> Result<(), Fault> + 'a>;
type AnyHandler<'a> = Box<dyn FnOnce(Fault) -> Result<(), Fault> + 'a>;

enum Check<'a> {
    Class(ErrorClass, ClassHandler<'a>),
    Wildcard(AnyHandler<'a>),
}

impl Check<'_> {
    fn accepts(&self, class: ErrorClass) -> bool {
        match self {
            Check::Class(kind, _) => class.is(*kind),
            Check::Wildcard(_) => true,
        }
    }

    fn is_wildcard(&self) -> bool {
        matches!(self, Check::Wildcard(_))
    }

    fn invoke(self, err: Error) -> Result<(), Fault> {
        match self {
            Check::Class(_, handler) => handler(err),
            Check::Wildcard(handler) => handler(Fault::Error(err)),
        }
    }
}

/// Where a fault stands once catching and cleanup are over.
#[derive(Debug)]
enum Disposition {
    /// No fault, or a handler consumed it.
    Absorbed,
    /// A fault leaves the plan boundary.
    Propagating(Fault),
}

impl Disposition {
    fn settle(outcome: Result<(), Fault>) -> Self {
        match outcome {
            Ok(()) => Self::Absorbed,
            Err(fault) => {
                tracing::debug!(target: "fault_rail", %fault, "handler raised a new fault");
                Self::Propagating(fault)
            },
        }
    }

    fn into_result(self) -> Result<(), Fault> {
        match self {
            Self::Absorbed => Ok(()),
            Self::Propagating(fault) => Err(fault),
        }
    }
}

/// Finally callbacks, run newest-first on every exit path.
///
/// If the dispatch routine unwinds because of a Rust panic, the callbacks
/// still run from `Drop`; faults they raise at that point can only be logged.
struct FinallyGuard<'a> {
    callbacks: SmallVec<[Block<'a>; 1]>,
}

impl FinallyGuard<'_> {
    fn finish(mut self, mut disposition: Disposition) -> Disposition {
        // Pop one at a time so a panicking callback leaves the older ones to `Drop`.
        while let Some(callback) = self.callbacks.pop() {
            if let Err(fault) = callback() {
                if let Disposition::Propagating(masked) = &disposition {
                    tracing::debug!(target: "fault_rail", %masked, "finally fault masks pending fault");
                }
                disposition = Disposition::Propagating(fault);
            }
        }
        disposition
    }
}

impl Drop for FinallyGuard<'_> {
    fn drop(&mut self) {
        while let Some(callback) = self.callbacks.pop() {
            if let Err(fault) = callback() {
                tracing::error!(target: "fault_rail", %fault, "finally raised while unwinding");
            }
        }
    }
}

/// A one-shot protected execution boundary.
///
/// Build it with [`Plan::run`], configure it with [`catch`](Plan::catch),
/// [`catch_all`](Plan::catch_all) and [`finally`](Plan::finally), then call
/// [`execute`](Plan::execute). Nothing runs until `execute` is called.
#[must_use = "a plan does nothing until `execute` is called"]
pub struct Plan<'a> {
    main: Block<'a>,
    catch: SmallVec<[Check<'a>; 2]>,
    finally: SmallVec<[Block<'a>; 1]>,
    origin: &'static Location<'static>,
}

impl<'a> Plan<'a> {
    /// Begins a plan around the protected `block`.
    #[track_caller]
    pub fn run<F>(block: F) -> Self
    where
        F: FnOnce() -> Result<(), Fault> + 'a,
    {
        Self {
            main: Box::new(block),
            catch: SmallVec::new(),
            finally: SmallVec::new(),
            origin: Location::caller(),
        }
    }

    /// Begins a plan whose block is additionally fenced with [`protect`], so a
    /// Rust panic inside it is dispatched as a [`Fault::Value`].
    #[track_caller]
    pub fn run_protected<F>(block: F) -> Self
    where
        F: FnOnce() -> Result<(), Fault> + 'a,
    {
        Self::run(move || protect(block))
    }

    /// Registers a handler for faults whose class [`is`](ErrorClass::is) `class`.
    pub fn catch<F>(mut self, class: ErrorClass, handler: F) -> Self
    where
        F: FnOnce(Error) -> Result<(), Fault> + 'a,
    {
        self.catch.push(Check::Class(class, Box::new(handler)));
        self
    }

    /// Registers a handler that accepts any fault.
    ///
    /// The handler receives [`Fault::Error`] for classified errors and for
    /// adapted [`Fault::Value`] payloads, and [`Fault::Failure`] for plain
    /// failures.
    pub fn catch_all<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Result<(), Fault> + 'a,
    {
        self.catch.push(Check::Wildcard(Box::new(handler)));
        self
    }

    /// Registers a cleanup callback.
    ///
    /// Callbacks run after catching, whatever happened, newest first. Every
    /// callback runs even if an earlier one raised; the last fault raised wins.
    pub fn finally<F>(mut self, cleanup: F) -> Self
    where
        F: FnOnce() -> Result<(), Fault> + 'a,
    {
        self.finally.push(Box::new(cleanup));
        self
    }

    /// Runs the plan.
    ///
    /// Returns `Ok(())` when the block succeeded or a handler consumed its
    /// fault, and `Err` with the fault that leaves this boundary otherwise.
    /// The caller's location is appended to the exit path of classified
    /// errors before dispatch.
    #[track_caller]
    pub fn execute(self) -> Result<(), Fault> {
        let boundary = Location::caller();
        let Plan { main, catch, finally, origin } = self;
        let guard = FinallyGuard { callbacks: finally };

        tracing::trace!(target: "fault_rail", %origin, "running protected block");
        let disposition = match main() {
            Ok(()) => Disposition::Absorbed,
            Err(fault) => dispatch(catch, fault, boundary),
        };

        let disposition = guard.finish(disposition);
        if let Disposition::Propagating(fault) = &disposition {
            tracing::trace!(target: "fault_rail", %origin, %fault, "fault propagating");
        }
        disposition.into_result()
    }
}

impl fmt::Debug for Plan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("origin", &self.origin)
            .field("catch", &self.catch.len())
            .field("finally", &self.finally.len())
            .finish_non_exhaustive()
    }
}

fn dispatch(catch: SmallVec<[Check<'_>; 2]>, fault: Fault, boundary: ExitRecord) -> Disposition {
    match fault {
        Fault::Error(err) => {
            err.record_exit(boundary);
            let class = err.class();
            match catch.into_iter().find(|check| check.accepts(class)) {
                Some(check) => {
                    tracing::trace!(target: "fault_rail", %class, "classified fault caught");
                    Disposition::settle(check.invoke(err))
                },
                None => Disposition::Propagating(Fault::Error(err)),
            }
        },
        Fault::Failure(failure) => match catch.into_iter().find(Check::is_wildcard) {
            Some(Check::Wildcard(handler)) => {
                tracing::trace!(target: "fault_rail", "unclassified failure caught");
                Disposition::settle(handler(Fault::Failure(failure)))
            },
            _ => Disposition::Propagating(Fault::Failure(failure)),
        },
        Fault::Value(payload) => match catch.into_iter().find(|check| check.accepts(UNKNOWN_ERROR)) {
            Some(check) => {
                tracing::trace!(target: "fault_rail", %payload, "raised value adapted and caught");
                Disposition::settle(check.invoke(unknown::adapt(&payload)))
            },
            None => Disposition::Propagating(Fault::Value(payload)),
        },
    }
}
