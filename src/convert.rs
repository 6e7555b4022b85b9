//! Conversions across the control boundary.
//!
//! A date-only control stores its value as the UTC midnight of the selected
//! calendar day, serialized as `YYYY-MM-DD`. Application code works with
//! local time. The two functions here translate between the two worlds:
//!
//! - [`local_to_utc_date`] shifts the instant by the local offset so that the
//!   UTC calendar date of the result equals the local calendar date, then
//!   keeps only the date.
//! - [`utc_to_local_date`] takes the UTC midnight the control reports and
//!   shifts it back by the local offset, landing on local midnight of the
//!   same calendar day.
//!
//! The pair round-trips the calendar date for every offset (including
//! `+05:45` style offsets). Time of day does not survive: the control has no
//! place to store it.
//!
//! ```
//! use datepicker_native::{DateValue, LocalZone, local_to_utc_date, utc_to_local_date};
//!
//! let zone = LocalZone::from_offset_minutes(-7 * 60).unwrap();
//! let evening = DateValue::from_ymd_hms(2022, 12, 31, 22, 0, 0, &zone).unwrap();
//! let wire = local_to_utc_date(&evening);
//! assert_eq!(wire, "2022-12-31");
//!
//! let back = utc_to_local_date(&wire, &zone).unwrap();
//! assert_eq!(back.date_naive(), evening.date_naive());
//! assert_eq!(back.hour(), 0);
//! ```

use chrono::{DateTime, NaiveDate};

use crate::{DatePickerError, DateValue, LocalZone};

/// `strftime` layout of the control boundary value.
pub const CONTROL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Local date → UTC date-only control string.
pub fn local_to_utc_date(local: &DateValue) -> String {
    let offset_ms = i64::from(local.offset().local_minus_utc()) * 1000;
    match local
        .timestamp_millis()
        .checked_add(offset_ms)
        .and_then(DateTime::from_timestamp_millis)
    {
        Some(shifted) => shifted.format(CONTROL_DATE_FORMAT).to_string(),
        // Only reachable at the very edge of the representable range.
        None => local.date_naive().format(CONTROL_DATE_FORMAT).to_string(),
    }
}

/// UTC date-only control string → local midnight of that calendar date.
///
/// # Errors
///
/// [`DatePickerError::InvalidControlValue`] if `value` is not exactly
/// `YYYY-MM-DD` or names a day that does not exist.
pub fn utc_to_local_date(value: &str, zone: &LocalZone) -> crate::Result<DateValue> {
    let invalid = || DatePickerError::InvalidControlValue(value.to_string());
    if !is_control_date(value) {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(value, CONTROL_DATE_FORMAT).map_err(|_| invalid())?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or(DatePickerError::DateOutOfRange)?;

    let offset = zone.offset_at_local(&midnight);
    let utc_ms = midnight.and_utc().timestamp_millis();
    let local_ms = utc_ms - i64::from(offset.local_minus_utc()) * 1000;

    DateValue::from_timestamp_millis(local_ms, &LocalZone::Fixed(offset))
        .ok_or(DatePickerError::DateOutOfRange)
}

/// `DDDD-DD-DD` with ASCII digits, nothing before or after.
fn is_control_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
