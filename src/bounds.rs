//! Minimum / maximum bounds for a date control.
//!
//! A bound is given in one of three shapes and always ends up as the
//! control's `YYYY-MM-DD` attribute:
//!
//! - [`DateBound::Literal`] is written unchanged;
//! - [`DateBound::Days`] counts days from today, *back* for a minimum and
//!   *forward* for a maximum;
//! - [`DateBound::Date`] goes through [`local_to_utc_date`].
//!
//! ```
//! use datepicker_native::{BoundKind, DateBound, DateValue, LocalZone};
//!
//! let today = DateValue::from_ymd_hms(2022, 3, 5, 9, 0, 0, &LocalZone::utc()).unwrap();
//! assert_eq!(DateBound::Days(7).normalize(BoundKind::Min, &today).unwrap(), "2022-02-26");
//! assert_eq!(DateBound::Days(7).normalize(BoundKind::Max, &today).unwrap(), "2022-03-12");
//! assert_eq!(DateBound::from("2020-01-01").normalize(BoundKind::Min, &today).unwrap(), "2020-01-01");
//! ```

use chrono::TimeDelta;

use crate::{DatePickerError, DateValue, LocalZone, local_to_utc_date};

/// Which attribute a bound is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Min,
    Max,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateBound {
    /// Written to the control as is.
    Literal(String),
    /// Day count relative to today.
    Days(i64),
    /// A local date.
    Date(DateValue),
}

impl DateBound {
    /// Resolve the bound to a control attribute value, `today` being the
    /// local date day counts are relative to.
    ///
    /// # Errors
    ///
    /// [`DatePickerError::DateOutOfRange`] if a day count leaves the
    /// representable range.
    pub fn normalize(&self, kind: BoundKind, today: &DateValue) -> crate::Result<String> {
        match self {
            DateBound::Literal(text) => Ok(text.clone()),
            DateBound::Date(date) => Ok(local_to_utc_date(date)),
            DateBound::Days(days) => {
                let days = match kind {
                    BoundKind::Min => days.checked_neg(),
                    BoundKind::Max => Some(*days),
                };
                let shifted = days
                    .and_then(TimeDelta::try_days)
                    .and_then(|delta| today.as_datetime().naive_local().checked_add_signed(delta))
                    .and_then(|local| DateValue::from_local(&local, &LocalZone::Fixed(today.offset())))
                    .ok_or(DatePickerError::DateOutOfRange)?;
                Ok(local_to_utc_date(&shifted))
            }
        }
    }
}

impl From<&str> for DateBound {
    fn from(text: &str) -> Self {
        DateBound::Literal(text.to_string())
    }
}

impl From<String> for DateBound {
    fn from(text: String) -> Self {
        DateBound::Literal(text)
    }
}

impl From<i64> for DateBound {
    fn from(days: i64) -> Self {
        DateBound::Days(days)
    }
}

impl From<DateValue> for DateBound {
    fn from(date: DateValue) -> Self {
        DateBound::Date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundKind, DateBound};
    use crate::{DatePickerError, DateValue, LocalZone};

    fn today() -> DateValue {
        DateValue::from_ymd_hms(2024, 2, 27, 23, 30, 0, &LocalZone::from_offset_minutes(-600).unwrap())
            .unwrap()
    }

    #[test]
    fn day_counts_cross_month_and_leap_day() {
        assert_eq!(DateBound::Days(3).normalize(BoundKind::Max, &today()).unwrap(), "2024-03-01");
        assert_eq!(DateBound::Days(-2).normalize(BoundKind::Max, &today()).unwrap(), "2024-02-25");
        assert_eq!(DateBound::Days(-2).normalize(BoundKind::Min, &today()).unwrap(), "2024-02-29");
        assert_eq!(DateBound::Days(0).normalize(BoundKind::Min, &today()).unwrap(), "2024-02-27");
    }

    #[test]
    fn date_bound_uses_local_calendar_day() {
        let late = today();
        assert_eq!(DateBound::Date(late).normalize(BoundKind::Min, &late).unwrap(), "2024-02-27");
    }

    #[test]
    fn overflowing_day_count() {
        let err = DateBound::Days(i64::MAX).normalize(BoundKind::Max, &today()).unwrap_err();
        assert!(matches!(err, DatePickerError::DateOutOfRange));
        assert!(DateBound::Days(i64::MIN).normalize(BoundKind::Min, &today()).is_err());
    }
}
