//! Call tracking for store-backed operations.
//!
//! Two composable wrappers record metadata about an operation into the
//! same store the operation runs against: `count_calls` bumps a per-method
//! counter and `call_history` appends the call's input and output to a
//! pair of parallel lists. Both take the operation body as a closure and
//! return its result unchanged, so a method wraps itself by nesting them.

use std::fmt::Display;
use std::str;

use crate::{Result, Store};

/// Store key holding the recorded inputs of a method.
pub fn inputs_key(method: &str) -> String {
    format!("{}:inputs", method)
}

/// Store key holding the recorded outputs of a method.
pub fn outputs_key(method: &str) -> String {
    format!("{}:outputs", method)
}

/// Wraps an operation so each invocation increments the counter stored
/// under `method` before the body runs. There is no error path of its
/// own; a failed increment propagates and the body never runs.
pub fn count_calls<S, T, F>(store: &S, method: &str, op: F) -> Result<T>
where
    S: Store,
    F: FnOnce() -> Result<T>,
{
    store.incr(method.to_owned())?;
    op()
}

/// Wraps an operation so each invocation appends `input` to the method's
/// inputs list before the body runs and the display form of the result to
/// the outputs list after it succeeds.
///
/// When the body fails no output is appended, leaving the inputs list one
/// entry longer than the outputs list. The mismatch is observable and not
/// corrected; `replay` truncates to the shorter sequence.
pub fn call_history<S, T, F>(store: &S, method: &str, input: &str, op: F) -> Result<T>
where
    S: Store,
    T: Display,
    F: FnOnce() -> Result<T>,
{
    store.rpush(inputs_key(method), input.as_bytes().to_vec())?;
    let output = op()?;
    store.rpush(outputs_key(method), output.to_string().into_bytes())?;
    Ok(output)
}

/// Reads the call counter of a method. An absent counter reads as zero.
pub fn call_count<S: Store>(store: &S, method: &str) -> Result<i64> {
    match store.get(method.to_owned())? {
        Some(raw) => Ok(str::from_utf8(&raw)?.parse()?),
        None => Ok(0),
    }
}
