//! Point-in-time stack snapshots.
use std::backtrace::Backtrace;

/// Captures the current thread's stack, truncated to at most `limit` bytes.
///
/// Returns `None` when `limit` is zero. Capture ignores `RUST_BACKTRACE` so
/// that classes flagged for capture always get frames.
pub(crate) fn capture(limit: usize) -> Option<Box<str>> {
    if limit == 0 {
        return None;
    }
    let trace = Backtrace::force_capture().to_string();
    Some(truncate(&trace, limit).into())
}

/// Cuts `text` to at most `limit` bytes without splitting a UTF-8 sequence.
pub(crate) fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
