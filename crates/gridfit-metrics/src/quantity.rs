//! Resource quantity normalization.
//!
//! Node metrics report CPU as nanocores (`"153427893n"`) and memory as
//! KiB (`"1843296Ki"`). The planner works in millicores and KiB.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum QuantityError {
    #[error("empty quantity")]
    Empty,

    #[error("malformed quantity: {0:?}")]
    Malformed(String),

    #[error("quantity out of range: {0:?}")]
    Overflow(String),

    #[error("quantity is not a string: {0}")]
    NotAString(String),
}

const NANOS_PER_MILLI: f64 = 1_000_000.0;
const MICROS_PER_MILLI: f64 = 1_000.0;
const MILLIS_PER_CORE: f64 = 1_000.0;

/// Parse a CPU quantity into millicores.
///
/// Accepts `n` (nanocores), `u` (microcores), `m` (millicores) and bare
/// core counts such as `"2"` or `"0.5"`.
pub fn parse_cpu_millis(raw: &str) -> Result<f64, QuantityError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(QuantityError::Empty);
    }

    let malformed = || QuantityError::Malformed(raw.to_string());

    if let Some(n) = raw.strip_suffix('n') {
        let nanos: u64 = n.parse().map_err(|_| malformed())?;
        return Ok(nanos as f64 / NANOS_PER_MILLI);
    }
    if let Some(u) = raw.strip_suffix('u') {
        let micros: u64 = u.parse().map_err(|_| malformed())?;
        return Ok(micros as f64 / MICROS_PER_MILLI);
    }
    if let Some(m) = raw.strip_suffix('m') {
        let millis: u64 = m.parse().map_err(|_| malformed())?;
        return Ok(millis as f64);
    }

    let cores: f64 = raw.parse().map_err(|_| malformed())?;
    if !cores.is_finite() || cores < 0.0 {
        return Err(malformed());
    }
    Ok(cores * MILLIS_PER_CORE)
}

/// Parse a memory quantity into KiB.
///
/// Accepts the binary suffixes `Ki`, `Mi`, `Gi`, `Ti` and bare byte
/// counts, which are floored to whole KiB.
pub fn parse_memory_kib(raw: &str) -> Result<u64, QuantityError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(QuantityError::Empty);
    }

    let malformed = || QuantityError::Malformed(raw.to_string());

    const SUFFIXES: [(&str, u64); 4] = [("Ki", 1), ("Mi", 1 << 10), ("Gi", 1 << 20), ("Ti", 1 << 30)];
    for (suffix, kib_per_unit) in SUFFIXES {
        if let Some(value) = raw.strip_suffix(suffix) {
            let value: u64 = value.parse().map_err(|_| malformed())?;
            return value
                .checked_mul(kib_per_unit)
                .ok_or_else(|| QuantityError::Overflow(raw.to_string()));
        }
    }

    let bytes: u64 = raw.parse().map_err(|_| malformed())?;
    Ok(bytes / 1024)
}
