//! Store timestamp type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DecodeError;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A document-store timestamp: whole seconds since the Unix epoch plus a
/// sub-second nanosecond component.
///
/// The nanosecond component is always in `0..1_000_000_000`, so instants
/// before the epoch carry a negative `seconds` and a positive `nanoseconds`.
/// On the wire it is the fixed two-field shape
/// `{"seconds": <int>, "nanoseconds": <int>}`.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use docshape_core::Timestamp;
///
/// let date = Utc.timestamp_millis_opt(1_500).unwrap();
/// let ts = Timestamp::from_date(date);
/// assert_eq!(ts.seconds(), 1);
/// assert_eq!(ts.nanoseconds(), 500_000_000);
/// assert_eq!(ts.to_date().unwrap(), date);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTimestamp")]
pub struct Timestamp {
    seconds: i64,
    nanoseconds: i32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTimestamp {
    seconds: i64,
    nanoseconds: i64,
}

impl Timestamp {
    /// Create a timestamp from its two components.
    ///
    /// # Errors
    ///
    /// Returns an error if `nanoseconds` is outside `0..1_000_000_000`.
    pub fn new(seconds: i64, nanoseconds: i64) -> Result<Self, DecodeError> {
        if !(0..NANOS_PER_SECOND).contains(&nanoseconds) {
            return Err(DecodeError::unacceptable(format!(
                "nanoseconds {} outside 0..{}",
                nanoseconds, NANOS_PER_SECOND
            )));
        }
        Ok(Self {
            seconds,
            nanoseconds: nanoseconds as i32,
        })
    }

    /// Encode an absolute instant.
    ///
    /// A leap second (sub-second nanos of one second or more) is carried
    /// into the next whole second.
    pub fn from_date(date: DateTime<Utc>) -> Self {
        let nanos = i64::from(date.timestamp_subsec_nanos());
        let seconds = date.timestamp() + nanos / NANOS_PER_SECOND;
        Self {
            seconds,
            nanoseconds: (nanos % NANOS_PER_SECOND) as i32,
        }
    }

    /// Whole seconds since the Unix epoch.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second component in nanoseconds.
    pub fn nanoseconds(&self) -> i32 {
        self.nanoseconds
    }

    /// Milliseconds since the Unix epoch, truncating sub-millisecond precision.
    ///
    /// Returns `None` if the value does not fit an `i64`.
    pub fn millis(&self) -> Option<i64> {
        self.seconds
            .checked_mul(1000)?
            .checked_add(i64::from(self.nanoseconds) / 1_000_000)
    }

    /// Decode back into an absolute instant.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::OutOfRange`] if the instant cannot be
    /// represented as a `DateTime<Utc>`.
    pub fn to_date(&self) -> Result<DateTime<Utc>, DecodeError> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds as u32).ok_or(
            DecodeError::OutOfRange {
                seconds: self.seconds,
                nanoseconds: i64::from(self.nanoseconds),
            },
        )
    }
}

impl TryFrom<RawTimestamp> for Timestamp {
    type Error = DecodeError;

    fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
        Self::new(raw.seconds, raw.nanoseconds)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(date: DateTime<Utc>) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp(seconds={}, nanoseconds={})", self.seconds, self.nanoseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use serde_json::json;

    #[test]
    fn from_date_splits_millis() {
        let date = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let ts = Timestamp::from_date(date);
        assert_eq!(ts.seconds(), 1_700_000_000);
        assert_eq!(ts.nanoseconds(), 123_000_000);
        assert_eq!(ts.millis(), Some(1_700_000_000_123));
    }

    #[test]
    fn pre_epoch_keeps_positive_nanos() {
        let date = Utc.timestamp_millis_opt(-1_500).unwrap();
        let ts = Timestamp::from_date(date);
        assert_eq!(ts.seconds(), -2);
        assert_eq!(ts.nanoseconds(), 500_000_000);
        assert_eq!(ts.to_date().unwrap(), date);
    }

    #[test]
    fn leap_second_carries_into_next_second() {
        let date = NaiveDate::from_ymd_opt(2016, 12, 31)
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 1_500))
            .unwrap()
            .and_utc();
        let ts = Timestamp::from_date(date);
        assert_eq!(ts.seconds(), 1_483_228_800);
        assert_eq!(ts.nanoseconds(), 500_000_000);

        let json = serde_json::to_value(ts).unwrap();
        let back: Timestamp = serde_json::from_value(json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn millis_overflow_is_none() {
        let ts = Timestamp::new(i64::MAX, 0).unwrap();
        assert_eq!(ts.millis(), None);
        assert_eq!(Timestamp::new(-5, 0).unwrap().millis(), Some(-5_000));
    }

    #[test]
    fn rejects_out_of_range_nanos() {
        assert!(Timestamp::new(10, -1).is_err());
        assert!(Timestamp::new(10, 1_000_000_000).is_err());
        assert!(Timestamp::new(10, 999_999_999).is_ok());
    }

    #[test]
    fn out_of_range_date() {
        let ts = Timestamp::new(i64::MAX, 0).unwrap();
        assert!(matches!(ts.to_date(), Err(DecodeError::OutOfRange { .. })));
    }

    #[test]
    fn serializes_as_two_fields() {
        let ts = Timestamp::new(10, 5).unwrap();
        assert_eq!(
            serde_json::to_value(ts).unwrap(),
            json!({"seconds": 10, "nanoseconds": 5})
        );
    }

    #[test]
    fn deserialize_rejects_extra_fields() {
        let result: Result<Timestamp, _> =
            serde_json::from_value(json!({"seconds": 10, "nanoseconds": 0, "extra": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_missing_nanoseconds() {
        let result: Result<Timestamp, _> = serde_json::from_value(json!({"seconds": 10}));
        assert!(result.is_err());
    }
}
