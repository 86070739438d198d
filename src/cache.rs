use std::str;

use rand::Rng;
use serde::Serialize;
use slog;

use crate::{trace, Result, Store};

/// Operation identifier under which `Cache::store` calls are counted
/// and recorded. Counter lives at this key, history at
/// `Cache::store:inputs` / `Cache::store:outputs`.
pub const STORE_OP: &str = "Cache::store";

/// A scalar value accepted by `Cache::store`.
///
/// Integers and floats are written to the store as their decimal string
/// bytes, so they read back through `get_str`/`get_int` the same way
/// they went in. The serde encoding (untagged) is what gets recorded as
/// the call's input in the history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// UTF-8 text
    Str(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
}

impl Value {
    /// The byte representation written to the store.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Value::Str(s) => s.into_bytes(),
            Value::Bytes(b) => b,
            Value::Int(i) => i.to_string().into_bytes(),
            Value::Float(f) => f.to_string().into_bytes(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

/// The `Cache` facade stores scalar values under generated keys and
/// tracks every `store` call in the same store it writes to.
///
/// The store handle is injected at construction; keep a clone of it to
/// inspect counters or replay history.
///
/// Example:
///
/// ```rust
/// # use tracekv::{Cache, MemStore, Result, Value};
/// # fn try_main() -> Result<()> {
///    let logger = slog::Logger::root(slog::Discard, slog::o!());
///    let store = MemStore::new(logger.clone());
///    let cache = Cache::new(store, logger)?;
///    let key = cache.store(Value::from("hello"))?;
///    assert_eq!(cache.get_str(&key)?, Some("hello".to_owned()));
/// # Ok(())
/// # }
/// ```
pub struct Cache<S: Store> {
    store: S,
    logger: slog::Logger,
}

impl<S: Store> Cache<S> {
    /// Create a `Cache` over the given store handle, flushing the store.
    ///
    /// The flush resets all keys, counters and history included, so the
    /// handle should point at an ephemeral or test instance.
    pub fn new(store: S, logger: slog::Logger) -> Result<Self> {
        store.flush()?;
        slog::debug!(logger, "cache initialized over a flushed store");
        Ok(Self { store, logger })
    }

    /// Store a value under a fresh random key and return the key.
    ///
    /// Each call bumps the `Cache::store` counter and appends the call's
    /// input and the returned key to the history lists.
    pub fn store(&self, data: Value) -> Result<String> {
        let input = serde_json::to_string(&data)?;
        let store = &self.store;

        let key = trace::call_history(store, STORE_OP, &input, || {
            trace::count_calls(store, STORE_OP, || {
                let key = gen_key();
                store.set(key.clone(), data.into_bytes())?;
                Ok(key)
            })
        })?;

        slog::debug!(self.logger, "stored value"; "key" => key.as_str());
        Ok(key)
    }

    /// Gets the raw bytes stored under a key.
    ///
    /// Returns `None` if the given key does not exist. Not tracked.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key.to_owned())
    }

    /// Gets the value under a key and passes it through a converter.
    ///
    /// The converter sees the absent case too, so it decides what a
    /// missing key converts to.
    pub fn get_with<T, F>(&self, key: &str, convert: F) -> Result<T>
    where
        F: FnOnce(Option<Vec<u8>>) -> Result<T>,
    {
        convert(self.store.get(key.to_owned())?)
    }

    /// Gets the value under a key decoded as UTF-8 text.
    ///
    /// Returns `None` when the key is absent rather than failing.
    pub fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, |raw| Ok(raw.map(String::from_utf8).transpose()?))
    }

    /// Gets the value under a key parsed as a decimal integer.
    ///
    /// Returns `None` when the key is absent rather than failing.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, |raw| {
            raw.map(|raw| -> Result<i64> { Ok(str::from_utf8(&raw)?.parse()?) })
                .transpose()
        })
    }

    /// The injected store handle, for reading counters and history.
    pub fn store_client(&self) -> &S {
        &self.store
    }
}

/// A random 128-bit identifier as 32 lowercase hex chars. Collision
/// resistance comes from the width, not from any registry of used keys.
fn gen_key() -> String {
    let id: u128 = rand::thread_rng().gen();
    format!("{:032x}", id)
}
