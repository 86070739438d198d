use std::str;
use std::sync::Arc;

use dashmap::DashMap;
use slog;

use crate::{Result, Store, TraceKvError};

/// A key either holds raw bytes or a list of byte entries.
/// Operations on the wrong kind fail, as they do on the real service.
enum Slot {
    Raw(Vec<u8>),
    List(Vec<Vec<u8>>),
}

/// The `MemStore` is an in-memory stand-in for the remote key-value
/// service. Clones share the same underlying map, so a handle can be
/// kept next to a `Cache` for inspecting recorded history.
///
/// Example:
///
/// ```rust
/// # use tracekv::{MemStore, Result, Store};
/// # use slog;
/// # fn try_main() -> Result<()> {
///    let logger = slog::Logger::root(slog::Discard, slog::o!());
///    let store = MemStore::new(logger);
///    store.set("key".to_owned(), b"value".to_vec())?;
///    let val = store.get("key".to_owned())?;
///    assert_eq!(val, Some(b"value".to_vec()));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MemStore {
    map: Arc<DashMap<String, Slot>>,
    logger: slog::Logger,
}

impl MemStore {
    /// Construct an empty `MemStore` with the given logger.
    pub fn new(logger: slog::Logger) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            logger,
        }
    }
}

impl Store for MemStore {
    /// Sets the value of a key to raw bytes.
    ///
    /// Overwrites unconditionally, even when the key held a list before.
    fn set(&self, key: String, value: Vec<u8>) -> Result<()> {
        self.map.insert(key, Slot::Raw(value));
        Ok(())
    }

    /// Gets the raw bytes stored under a given key.
    ///
    /// Returns `None` if the given key does not exist.
    ///
    /// # Errors
    ///
    /// It returns `TraceKvError::WrongKind` if the key holds a list.
    fn get(&self, key: String) -> Result<Option<Vec<u8>>> {
        match self.map.get(&key) {
            Some(slot) => match slot.value() {
                Slot::Raw(raw) => Ok(Some(raw.clone())),
                Slot::List(_) => Err(TraceKvError::WrongKind(key)),
            },
            None => Ok(None),
        }
    }

    /// Increments the decimal integer under a key, counting up from zero
    /// when the key is absent.
    ///
    /// # Errors
    ///
    /// It returns `TraceKvError::WrongKind` if the key holds a list, and
    /// a parse error if it holds bytes that are not a decimal integer.
    fn incr(&self, key: String) -> Result<i64> {
        let mut slot = self
            .map
            .entry(key.clone())
            .or_insert_with(|| Slot::Raw(b"0".to_vec()));

        match slot.value_mut() {
            Slot::Raw(raw) => {
                let next = str::from_utf8(raw)?.parse::<i64>()? + 1;
                *raw = next.to_string().into_bytes();
                Ok(next)
            }
            Slot::List(_) => Err(TraceKvError::WrongKind(key)),
        }
    }

    /// Appends an entry to the list under a key, creating it if absent.
    ///
    /// # Errors
    ///
    /// It returns `TraceKvError::WrongKind` if the key holds raw bytes.
    fn rpush(&self, key: String, value: Vec<u8>) -> Result<u64> {
        let mut slot = self
            .map
            .entry(key.clone())
            .or_insert_with(|| Slot::List(Vec::new()));

        match slot.value_mut() {
            Slot::List(items) => {
                items.push(value);
                Ok(items.len() as u64)
            }
            Slot::Raw(_) => Err(TraceKvError::WrongKind(key)),
        }
    }

    /// Returns the inclusive `start..=stop` range of the list under a key.
    ///
    /// Index semantics match the remote service: negative indices count
    /// from the tail, out-of-range bounds clamp, and an inverted range or
    /// absent key yields an empty vec.
    fn lrange(&self, key: String, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        match self.map.get(&key) {
            Some(slot) => match slot.value() {
                Slot::List(items) => Ok(slice_range(items, start, stop)),
                Slot::Raw(_) => Err(TraceKvError::WrongKind(key)),
            },
            None => Ok(Vec::new()),
        }
    }

    /// Removes every key. Destructive.
    fn flush(&self) -> Result<()> {
        self.map.clear();
        slog::debug!(self.logger, "flushed all keys");
        Ok(())
    }
}

fn slice_range(items: &[Vec<u8>], start: i64, stop: i64) -> Vec<Vec<u8>> {
    let len = items.len() as i64;
    let mut start = if start < 0 { start + len } else { start };
    let mut stop = if stop < 0 { stop + len } else { stop };

    if start < 0 {
        start = 0;
    }
    if stop >= len {
        stop = len - 1;
    }
    if len == 0 || start >= len || stop < 0 || start > stop {
        return Vec::new();
    }

    items[start as usize..=stop as usize].to_vec()
}
