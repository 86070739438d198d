use std::io;
use std::num::ParseIntError;
use std::str::Utf8Error;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Error type for tracekv.
#[derive(Error, Debug)]
pub enum TraceKvError {
  /// IO Error.
  #[error("IO error: {0}")]
  Io(#[from] io::Error),
  /// Serialization error while encoding a recorded input
  #[error("serde_json error: {0}")]
  Serde(#[from] serde_json::Error),
  /// Operation applied to a key holding the wrong kind of value
  /// e.g. a list append on a key holding raw bytes
  #[error("wrong kind of value at key {0}")]
  WrongKind(String),
  /// Value is invalid UTF-8 sequence
  #[error("UTF-8 error: {0}")]
  Utf8(#[from] FromUtf8Error),
  /// Value is not a decimal integer
  #[error("integer parse error: {0}")]
  ParseInt(#[from] ParseIntError),
  /// Str slice UTF-8 error
  #[error("Str slice UTF-8 error: {0}")]
  StrUtf8(#[from] Utf8Error),
}

/// Result type for tracekv.
pub type Result<T> = std::result::Result<T, TraceKvError>;
