#![deny(missing_docs)]
//! tracked key value cache lib
pub use cache::{Cache, Value, STORE_OP};
pub use error::{Result, TraceKvError};
pub use replay::replay;
pub use store::{MemStore, Store};

mod cache;
mod error;
mod replay;
mod store;
pub mod trace;
