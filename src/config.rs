//! Process-wide capture and logging limits.
//!
//! The limits are plain configuration owned by the embedding program: install
//! a [`Config`] once at startup (or never, to keep the defaults).
//!
//! # Examples
//!
//! ```
//! use fault_rail::config::{self, Config};
//!
//! let previous = config::install(Config::default().with_stack_capture_len(1024));
//! assert_eq!(config::current().stack_capture_len, 1024);
//! config::install(previous);
//! ```
use std::sync::{PoisonError, RwLock};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default maximum byte length of a stack captured into an error.
pub const DEFAULT_STACK_CAPTURE_LEN: usize = 2048;
/// Default maximum byte length of a stack written by a creation log line.
pub const DEFAULT_STACK_LOG_LEN: usize = 4096;

/// Environment variable read by [`Config::from_env`] for the capture limit.
pub const STACK_CAPTURE_LEN_ENV: &str = "FAULT_RAIL_STACK_CAPTURE_LEN";
/// Environment variable read by [`Config::from_env`] for the log limit.
pub const STACK_LOG_LEN_ENV: &str = "FAULT_RAIL_STACK_LOG_LEN";

static CURRENT: RwLock<Config> = RwLock::new(Config::DEFAULT);

/// Byte limits for stack snapshots.
///
/// A limit of zero disables the corresponding capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Config {
    /// Maximum length of the stack stored in errors of `CAPTURE_STACK` classes.
    pub stack_capture_len: usize,
    /// Maximum length of the stack appended to `LOG_ON_CREATION` log lines.
    pub stack_log_len: usize,
}

impl Config {
    const DEFAULT: Config = Config {
        stack_capture_len: DEFAULT_STACK_CAPTURE_LEN,
        stack_log_len: DEFAULT_STACK_LOG_LEN,
    };

    /// Reads limits from [`STACK_CAPTURE_LEN_ENV`] and [`STACK_LOG_LEN_ENV`].
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Config::from_env) with a caller-supplied variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: usize| {
            lookup(name).and_then(|raw| raw.trim().parse().ok()).unwrap_or(default)
        };
        Self {
            stack_capture_len: read(STACK_CAPTURE_LEN_ENV, DEFAULT_STACK_CAPTURE_LEN),
            stack_log_len: read(STACK_LOG_LEN_ENV, DEFAULT_STACK_LOG_LEN),
        }
    }

    #[inline]
    pub fn with_stack_capture_len(mut self, len: usize) -> Self {
        self.stack_capture_len = len;
        self
    }

    #[inline]
    pub fn with_stack_log_len(mut self, len: usize) -> Self {
        self.stack_log_len = len;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Replaces the process-wide configuration, returning the previous one.
pub fn install(config: Config) -> Config {
    let mut current = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *current, config)
}

/// Returns the process-wide configuration.
pub fn current() -> Config {
    *CURRENT.read().unwrap_or_else(PoisonError::into_inner)
}
