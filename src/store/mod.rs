use crate::Result;

/// The `Store` trait - defines the narrow client interface to the
/// key-value service consumed by `Cache` and the tracing wrappers.
/// The service itself is an external collaborator; any remote or
/// embedded client implementing these six operations can be plugged in.
pub trait Store: Clone + Send + 'static {
    /// Sets the value of a key to raw bytes.
    ///
    /// If the key already exists, the previous value will be overwritten,
    /// whatever kind it held before.
    fn set(&self, key: String, value: Vec<u8>) -> Result<()>;

    /// Gets the raw bytes stored under a given key.
    ///
    /// Returns `None` if the given key does not exist.
    fn get(&self, key: String) -> Result<Option<Vec<u8>>>;

    /// Increments the decimal integer stored under a key and returns the
    /// new count. An absent key counts up from zero.
    fn incr(&self, key: String) -> Result<i64>;

    /// Appends an entry to the list stored under a key, creating the list
    /// if absent. Returns the new list length.
    fn rpush(&self, key: String, value: Vec<u8>) -> Result<u64>;

    /// Returns the inclusive `start..=stop` range of the list stored under
    /// a key. Negative indices count from the tail, `-1` being the last
    /// entry. An absent key yields an empty range.
    fn lrange(&self, key: String, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Removes every key in the store. Destructive.
    fn flush(&self) -> Result<()>;
}

mod memory;

pub use self::memory::MemStore;
