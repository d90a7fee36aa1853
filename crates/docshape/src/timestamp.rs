//! Recognizing and converting store timestamps.

use chrono::{DateTime, Utc};
use docshape_core::{DecodeError, StoreMap, StoreValue, Timestamp};
use tracing::trace;

const SECONDS: &str = "seconds";
const NANOSECONDS: &str = "nanoseconds";

/// Whether a map has the structural timestamp shape: exactly two keys,
/// `seconds` and `nanoseconds`.
///
/// This is a heuristic. A record that legitimately has exactly those two
/// fields is indistinguishable from a timestamp that arrived untagged.
pub fn has_timestamp_shape(map: &StoreMap) -> bool {
    map.len() == 2 && map.contains_key(SECONDS) && map.contains_key(NANOSECONDS)
}

/// Whether a store value decodes to a date.
pub fn is_timestamp(value: &StoreValue) -> bool {
    match value {
        StoreValue::Timestamp(_) => true,
        StoreValue::Map(map) => has_timestamp_shape(map),
        _ => false,
    }
}

/// Convert a store timestamp into a date.
///
/// Accepts a tagged [`StoreValue::Timestamp`] or a map of exactly
/// `{seconds, nanoseconds}` with integral members.
///
/// # Errors
///
/// Returns [`DecodeError::UnacceptableTimestamp`] for any other value, and
/// [`DecodeError::OutOfRange`] if the instant is not a representable date.
///
/// # Example
///
/// ```
/// use docshape::timestamp_to_date;
/// use docshape_core::StoreValue;
/// use serde_json::json;
///
/// let date = timestamp_to_date(&StoreValue::from(json!({"seconds": 10, "nanoseconds": 0}))).unwrap();
/// assert_eq!(date.timestamp_millis(), 10_000);
///
/// assert!(timestamp_to_date(&StoreValue::from(json!({"seconds": 10}))).is_err());
/// ```
pub fn timestamp_to_date(value: &StoreValue) -> Result<DateTime<Utc>, DecodeError> {
    let timestamp = match value {
        StoreValue::Timestamp(ts) => *ts,
        StoreValue::Map(map) if has_timestamp_shape(map) => from_parts(map)?,
        StoreValue::Map(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            return Err(DecodeError::unacceptable(format!(
                "expected exactly {{{}, {}}}, found {{{}}}",
                SECONDS,
                NANOSECONDS,
                keys.join(", ")
            )));
        }
        other => {
            return Err(DecodeError::unacceptable(format!(
                "expected a timestamp, found {}",
                kind(other)
            )));
        }
    };
    trace!(seconds = timestamp.seconds(), nanoseconds = timestamp.nanoseconds(), "Converting timestamp");
    timestamp.to_date()
}

fn from_parts(map: &StoreMap) -> Result<Timestamp, DecodeError> {
    let seconds = integral(map.get(SECONDS), SECONDS)?;
    let nanoseconds = integral(map.get(NANOSECONDS), NANOSECONDS)?;
    Timestamp::new(seconds, nanoseconds)
}

fn integral(value: Option<&StoreValue>, field: &str) -> Result<i64, DecodeError> {
    match value {
        Some(StoreValue::Integer(i)) => Ok(*i),
        Some(StoreValue::Float(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(*f as i64),
        Some(other) => Err(DecodeError::unacceptable(format!(
            "{} must be an integer, found {}",
            field,
            kind(other)
        ))),
        None => Err(DecodeError::unacceptable(format!("missing {}", field))),
    }
}

fn kind(value: &StoreValue) -> &'static str {
    match value {
        StoreValue::Null => "null",
        StoreValue::Bool(_) => "bool",
        StoreValue::Integer(_) => "integer",
        StoreValue::Float(_) => "float",
        StoreValue::String(_) => "string",
        StoreValue::Timestamp(_) => "timestamp",
        StoreValue::Array(_) => "array",
        StoreValue::Map(_) => "map",
    }
}
