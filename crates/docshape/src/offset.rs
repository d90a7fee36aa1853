//! Timezone shift applied to dates crossing the store boundary.
//!
//! The store keeps a timestamp as an absolute instant. With the shift
//! enabled, a date is moved forward by its local offset east of UTC before
//! encoding, so the stored instant reads as the local wall-clock time, and
//! moved back by the same amount after decoding.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use docshape_core::DecodeError;
use tracing::debug;

fn delta(offset: FixedOffset) -> TimeDelta {
    TimeDelta::seconds(i64::from(offset.local_minus_utc()))
}

/// Shift a date on its way into the store.
///
/// Dates too close to the edge of the representable range to be shifted are
/// stored unshifted, keeping encoding total.
pub(crate) fn into_store(date: DateTime<Utc>, offset: Option<FixedOffset>) -> DateTime<Utc> {
    match offset {
        Some(offset) => date.checked_add_signed(delta(offset)).unwrap_or_else(|| {
            debug!(
                date = %date,
                offset_seconds = offset.local_minus_utc(),
                "Date too close to range limit to shift, storing unshifted"
            );
            date
        }),
        None => date,
    }
}

/// Undo [`into_store`] on a date read back from the store.
pub(crate) fn from_store(
    date: DateTime<Utc>,
    offset: Option<FixedOffset>,
) -> Result<DateTime<Utc>, DecodeError> {
    match offset {
        Some(offset) => date
            .checked_sub_signed(delta(offset))
            .ok_or(DecodeError::OutOfRange {
                seconds: date.timestamp(),
                nanoseconds: i64::from(date.timestamp_subsec_nanos()),
            }),
        None => Ok(date),
    }
}
