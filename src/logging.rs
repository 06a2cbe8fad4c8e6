//! Creation-time logging for `LOG_ON_CREATION` classes.
//!
//! Log lines go through [`tracing`]; installing a subscriber (for example
//! `tracing_subscriber::fmt`) decides where they end up. Events use the
//! `fault_rail` target so they can be filtered with
//! `RUST_LOG=fault_rail=error`.
use crate::config;
use crate::types::stack;

/// Emits `"<message>\n<stack>"` at error level.
///
/// The stack is the caller's current stack, truncated to
/// [`Config::stack_log_len`](crate::config::Config::stack_log_len) bytes.
pub fn log_with_stack(message: &str) {
    let stack = stack::capture(config::current().stack_log_len).unwrap_or_default();
    tracing::error!(target: "fault_rail", "{}\n{}", message, stack);
}
