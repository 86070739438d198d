use std::io::Write;

use crate::{trace, Result, Store};

/// Writes the recorded call history of a method into `out`.
///
/// One summary line with the number of recorded inputs, then one line
/// per call pairing the recorded input with the recorded output:
///
/// ```text
/// Cache::store was called 2 times:
/// Cache::store("hello") -> 3f2a...
/// Cache::store(42) -> 9c01...
/// ```
///
/// Inputs and outputs are zipped pairwise, so if a failed call left the
/// sequences at different lengths the extra entries are not shown.
/// Purely presentational; nothing in the store is mutated.
pub fn replay<S: Store, W: Write>(store: &S, method: &str, out: &mut W) -> Result<()> {
    let inputs = store.lrange(trace::inputs_key(method), 0, -1)?;
    let outputs = store.lrange(trace::outputs_key(method), 0, -1)?;

    writeln!(out, "{} was called {} times:", method, inputs.len())?;
    for (input, output) in inputs.into_iter().zip(outputs.into_iter()) {
        writeln!(
            out,
            "{}({}) -> {}",
            method,
            String::from_utf8(input)?,
            String::from_utf8(output)?
        )?;
    }

    Ok(())
}
