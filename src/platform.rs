//! Static lookup from platform failure types to system classes.
//!
//! Failures that never went through [`ErrorClass::wrap`](crate::ErrorClass::wrap)
//! are classified by type inspection against this table. Every class here
//! descends from [`SYSTEM_ERROR`] and carries no flags.
//!
//! # Examples
//!
//! ```
//! use std::io;
//! use fault_rail::platform::{self, NETWORK_ERROR, NET_OP_ERROR};
//!
//! let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
//! assert_eq!(platform::classify(&refused), NET_OP_ERROR);
//! assert!(NET_OP_ERROR.is(NETWORK_ERROR));
//! ```
use std::error::Error as StdError;
use std::io;
use std::net::AddrParseError;

use crate::types::error_class::{builtin_class, SYSTEM_NODE};
use crate::types::{ClassFlags, ErrorClass, SYSTEM_ERROR};

builtin_class!(
    /// Failed system call.
    SYSCALL_ERROR, SYSCALL_NODE, 16, Some(&SYSTEM_NODE), "Syscall Error", ClassFlags::empty()
);
builtin_class!(
    /// Raw OS error code.
    ERRNO_ERROR, ERRNO_NODE, 17, Some(&SYSTEM_NODE), "Errno Error", ClassFlags::empty()
);
builtin_class!(
    /// Root of network failures.
    ///
    /// [`classify`] never returns this root itself; catch it to handle every
    /// network class below it.
    NETWORK_ERROR, NETWORK_NODE, 18, Some(&SYSTEM_NODE), "Network Error", ClassFlags::empty()
);
builtin_class!(
    /// Network failure of no more specific kind.
    ///
    /// Kept for hierarchy parity; `std` has no failure type that maps onto it,
    /// so it is only produced by wrapping explicitly.
    UNKNOWN_NETWORK_ERROR,
    UNKNOWN_NETWORK_NODE,
    19,
    Some(&NETWORK_NODE),
    "Unknown Network Error",
    ClassFlags::empty()
);
builtin_class!(
    /// Address could not be bound or is unavailable.
    ADDR_ERROR, ADDR_NODE, 20, Some(&NETWORK_NODE), "Addr Error", ClassFlags::empty()
);
builtin_class!(
    /// Address that is well-formed but unusable for the operation.
    ///
    /// Kept for hierarchy parity; only produced by wrapping explicitly.
    INVALID_ADDR_ERROR,
    INVALID_ADDR_NODE,
    21,
    Some(&ADDR_NODE),
    "Invalid Addr Error",
    ClassFlags::empty()
);
builtin_class!(
    /// Failure of an operation on an established or attempted connection.
    NET_OP_ERROR, NET_OP_NODE, 22, Some(&NETWORK_NODE), "Network Op Error", ClassFlags::empty()
);
builtin_class!(
    /// Malformed network address.
    NET_PARSE_ERROR,
    NET_PARSE_NODE,
    23,
    Some(&NETWORK_NODE),
    "Network Parse Error",
    ClassFlags::empty()
);
builtin_class!(
    /// Name resolution failure.
    ///
    /// `std` reports lookup failures as uncategorized `io::Error`s, so
    /// [`classify`] cannot tell them apart; resolvers wrap with this class.
    DNS_ERROR, DNS_NODE, 24, Some(&NETWORK_NODE), "DNS Error", ClassFlags::empty()
);
builtin_class!(
    /// Broken resolver configuration. Only produced by wrapping explicitly.
    DNS_CONFIG_ERROR, DNS_CONFIG_NODE, 25, Some(&DNS_NODE), "DNS Config Error", ClassFlags::empty()
);

/// Returns the best-matching system class for an unclassified failure.
pub fn classify(err: &(dyn StdError + 'static)) -> ErrorClass {
    if err.is::<AddrParseError>() {
        return NET_PARSE_ERROR;
    }
    match err.downcast_ref::<io::Error>() {
        Some(io_err) => classify_io(io_err),
        None => SYSTEM_ERROR,
    }
}

fn classify_io(err: &io::Error) -> ErrorClass {
    use io::ErrorKind::*;

    match err.kind() {
        AddrInUse | AddrNotAvailable => ADDR_ERROR,
        ConnectionRefused | ConnectionReset | ConnectionAborted | NotConnected | BrokenPipe
        | TimedOut => NET_OP_ERROR,
        _ if err.raw_os_error().is_some() => ERRNO_ERROR,
        _ => SYSCALL_ERROR,
    }
}
