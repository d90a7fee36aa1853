//! Transformer configuration.

use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

const MAX_OFFSET_MINUTES: u32 = 24 * 60;

/// Options controlling how records are converted.
///
/// Has no `Default`: callers always state whether the timezone shift applies.
///
/// # Example
///
/// ```
/// use docshape_core::{TimezoneSource, TransformOptions};
///
/// let options = TransformOptions::new(true)
///     .with_timezone(TimezoneSource::fixed(120).unwrap());
/// assert!(options.apply_timezone_offset);
/// assert_eq!(options.timezone.offset_minutes(), 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Shift dates by the timezone offset on encode and back on decode.
    pub apply_timezone_offset: bool,

    /// Where the offset comes from when the shift applies.
    #[serde(default)]
    pub timezone: TimezoneSource,
}

impl TransformOptions {
    /// Create options reading the offset from the local clock.
    pub fn new(apply_timezone_offset: bool) -> Self {
        Self {
            apply_timezone_offset,
            timezone: TimezoneSource::Local,
        }
    }

    /// Set the offset source.
    pub fn with_timezone(mut self, timezone: TimezoneSource) -> Self {
        self.timezone = timezone;
        self
    }

    /// The offset to shift by for one conversion, or `None` when the shift
    /// does not apply.
    pub fn effective_offset(&self) -> Option<FixedOffset> {
        self.apply_timezone_offset.then(|| self.timezone.resolve())
    }
}

/// Source of the timezone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTimezoneSource", into = "RawTimezoneSource")]
pub enum TimezoneSource {
    /// The machine's local timezone, read at the start of each conversion.
    #[default]
    Local,
    /// A constant offset east of UTC.
    Fixed(FixedOffset),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RawTimezoneSource {
    Local,
    Fixed { offset_minutes: i32 },
}

impl TimezoneSource {
    /// A constant offset, in minutes east of UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is not strictly within one day.
    pub fn fixed(offset_minutes: i32) -> Result<Self, Error> {
        let offset = (offset_minutes.unsigned_abs() < MAX_OFFSET_MINUTES)
            .then(|| FixedOffset::east_opt(offset_minutes * 60))
            .flatten()
            .ok_or_else(|| InvalidInputError::Options {
                message: format!("timezone offset {} minutes out of range", offset_minutes),
            })?;
        Ok(TimezoneSource::Fixed(offset))
    }

    /// Resolve to a concrete offset. `Local` reads the current local offset.
    pub fn resolve(&self) -> FixedOffset {
        match self {
            TimezoneSource::Local => Local::now().offset().fix(),
            TimezoneSource::Fixed(offset) => *offset,
        }
    }

    /// The resolved offset in minutes east of UTC.
    pub fn offset_minutes(&self) -> i32 {
        self.resolve().local_minus_utc() / 60
    }
}

impl From<FixedOffset> for TimezoneSource {
    fn from(offset: FixedOffset) -> Self {
        TimezoneSource::Fixed(offset)
    }
}

impl TryFrom<RawTimezoneSource> for TimezoneSource {
    type Error = Error;

    fn try_from(raw: RawTimezoneSource) -> Result<Self, Self::Error> {
        match raw {
            RawTimezoneSource::Local => Ok(TimezoneSource::Local),
            RawTimezoneSource::Fixed { offset_minutes } => TimezoneSource::fixed(offset_minutes),
        }
    }
}

impl From<TimezoneSource> for RawTimezoneSource {
    fn from(source: TimezoneSource) -> Self {
        match source {
            TimezoneSource::Local => RawTimezoneSource::Local,
            TimezoneSource::Fixed(offset) => RawTimezoneSource::Fixed {
                offset_minutes: offset.local_minus_utc() / 60,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn disabled_shift_has_no_offset() {
        let options = TransformOptions::new(false).with_timezone(TimezoneSource::fixed(60).unwrap());
        assert_eq!(options.effective_offset(), None);
    }

    #[test]
    fn enabled_shift_resolves_fixed_offset() {
        let options = TransformOptions::new(true).with_timezone(TimezoneSource::fixed(-300).unwrap());
        let offset = options.effective_offset().unwrap();
        assert_eq!(offset.local_minus_utc(), -300 * 60);
    }

    #[test]
    fn rejects_offsets_of_a_day_or_more() {
        assert!(TimezoneSource::fixed(24 * 60).is_err());
        assert!(TimezoneSource::fixed(-24 * 60).is_err());
        assert!(TimezoneSource::fixed(14 * 60).is_ok());
    }

    #[test]
    fn rejects_extreme_offsets_without_overflow() {
        assert!(TimezoneSource::fixed(i32::MIN).is_err());
        assert!(TimezoneSource::fixed(i32::MAX).is_err());

        let result: Result<TransformOptions, _> = serde_json::from_value(json!({
            "apply_timezone_offset": true,
            "timezone": {"kind": "fixed", "offset_minutes": -2147483648i64}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_requires_apply_flag() {
        let result: Result<TransformOptions, _> = serde_json::from_value(json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_defaults_to_local() {
        let options: TransformOptions =
            serde_json::from_value(json!({"apply_timezone_offset": true})).unwrap();
        assert_eq!(options.timezone, TimezoneSource::Local);
    }

    #[test]
    fn fixed_offset_roundtrips_through_config() {
        let options: TransformOptions = serde_json::from_value(json!({
            "apply_timezone_offset": false,
            "timezone": {"kind": "fixed", "offset_minutes": 330}
        }))
        .unwrap();
        assert_eq!(options.timezone.offset_minutes(), 330);

        let back = serde_json::to_value(options).unwrap();
        assert_eq!(back["timezone"], json!({"kind": "fixed", "offset_minutes": 330}));
    }

    #[test]
    fn deserialize_rejects_bad_offset() {
        let result: Result<TransformOptions, _> = serde_json::from_value(json!({
            "apply_timezone_offset": true,
            "timezone": {"kind": "fixed", "offset_minutes": 5000}
        }));
        assert!(result.is_err());
    }
}
