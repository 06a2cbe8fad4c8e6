//! Side-table attachments for classified errors.
//!
//! Keys are process-wide unique tokens handed out by [`DataKey::alloc`]; values
//! are shared, type-erased payloads. The table lets callers stash auxiliary
//! data on an [`Error`](crate::Error) without widening the error type itself.
//!
//! # Examples
//!
//! ```
//! use fault_rail::{set_data, DataKey, ErrorClass};
//!
//! let request_id = DataKey::alloc();
//! let class = ErrorClass::new(None, "request");
//!
//! let err = class.wrap_with("timed out", [set_data(request_id, 42_u64)]);
//! assert_eq!(err.data_as::<u64>(request_id), Some(&42));
//! ```
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use smallvec::SmallVec;

/// Shared, type-erased value stored in the side-table.
pub type DataValue = Arc<dyn Any + Send + Sync>;

/// Keys below this value are reserved for the crate's own well-known keys.
const FIRST_DYNAMIC_KEY: u64 = 64;

static NEXT_KEY: AtomicU64 = AtomicU64::new(FIRST_DYNAMIC_KEY);

/// Opaque, process-wide unique key into an error's side-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataKey(u64);

impl DataKey {
    /// Allocates a fresh key that no other call will ever return.
    pub fn alloc() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) const fn reserved(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A key/value pair applied to an error when it is created.
///
/// Build one with [`set_data`] or [`set_shared_data`] and pass it to
/// [`ErrorClass::wrap_with`](crate::ErrorClass::wrap_with).
#[derive(Clone)]
pub struct DataEntry {
    pub(crate) key: DataKey,
    pub(crate) value: DataValue,
}

impl DataEntry {
    #[inline]
    pub fn key(&self) -> DataKey {
        self.key
    }

    #[inline]
    pub fn value(&self) -> &DataValue {
        &self.value
    }
}

impl fmt::Debug for DataEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataEntry").field("key", &self.key).finish_non_exhaustive()
    }
}

/// Produces an entry that stores `value` under `key` at wrap time.
pub fn set_data<V>(key: DataKey, value: V) -> DataEntry
where
    V: Any + Send + Sync,
{
    DataEntry { key, value: Arc::new(value) }
}

/// Like [`set_data`], but keeps the identity of an already shared value.
pub fn set_shared_data(key: DataKey, value: DataValue) -> DataEntry {
    DataEntry { key, value }
}

/// Small insertion-ordered map backing an error's side-table.
///
/// Most errors carry zero or one entry, so lookups are linear scans over
/// inline storage.
#[derive(Clone, Default)]
pub(crate) struct DataMap {
    entries: SmallVec<[(DataKey, DataValue); 1]>,
}

impl DataMap {
    #[inline]
    pub(crate) fn new() -> Self {
        Self { entries: SmallVec::new() }
    }

    /// Inserts or replaces the value stored under `entry.key`.
    pub(crate) fn insert(&mut self, entry: DataEntry) {
        match self.entries.iter_mut().find(|(key, _)| *key == entry.key) {
            Some(slot) => slot.1 = entry.value,
            None => self.entries.push((entry.key, entry.value)),
        }
    }

    pub(crate) fn get(&self, key: DataKey) -> Option<&DataValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, value)| value)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = DataKey> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }
}

impl FromIterator<DataEntry> for DataMap {
    fn from_iter<I: IntoIterator<Item = DataEntry>>(iter: I) -> Self {
        let mut map = Self::new();
        for entry in iter {
            map.insert(entry);
        }
        map
    }
}

impl fmt::Debug for DataMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}
