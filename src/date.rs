//! Local-time date values.
//!
//! [`DateValue`] is an instant together with the UTC offset that was in force
//! where it is observed. The calendar fields (`year`, `month`, `day`, ...)
//! are always read in that local offset, which makes a `DateValue` behave
//! like a host "local time" date object without touching global state.
//!
//! [`LocalZone`] decides what "local" means: either the host system zone
//! (the default) or a fixed offset, which keeps tests and headless hosts
//! independent of the machine they run on.
//!
//! # Examples
//!
//! ```
//! use datepicker_native::{DateValue, LocalZone};
//!
//! let zone = LocalZone::from_offset_minutes(60).unwrap();
//! let d = DateValue::from_ymd_hms(2022, 3, 5, 14, 30, 7, &zone).unwrap();
//! assert_eq!(d.year(), 2022);
//! assert_eq!(d.month0(), 2);
//! assert_eq!(d.hour(), 14);
//! assert_eq!(d.timezone_offset(), -60);
//! ```

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike,
    Utc, Weekday,
};

use crate::DatePickerError;

/// Naive date-time layouts interpreted as local wall-clock time.
const LOCAL_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts interpreted as local midnight.
const LOCAL_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y"];

/// Source of the local UTC offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocalZone {
    /// The host system zone (`chrono::Local`), daylight saving aware.
    #[default]
    System,
    /// A constant offset from UTC.
    Fixed(FixedOffset),
}

impl LocalZone {
    /// The UTC zone.
    pub fn utc() -> Self {
        LocalZone::Fixed(Utc.fix())
    }

    /// A fixed zone `minutes` east of UTC (`+05:45` is `345`).
    ///
    /// Returns `None` for offsets of a day or more.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(LocalZone::Fixed)
    }

    /// Offset in force at the given UTC instant.
    pub fn offset_at_utc(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            LocalZone::System => Local.offset_from_utc_datetime(utc).fix(),
            LocalZone::Fixed(offset) => *offset,
        }
    }

    /// Offset in force at the given local wall-clock time.
    ///
    /// Ambiguous times (clocks turned back) take the earlier offset; times
    /// skipped by a transition fall back to the offset at the same UTC time.
    pub fn offset_at_local(&self, local: &NaiveDateTime) -> FixedOffset {
        match self {
            LocalZone::System => match Local.offset_from_local_datetime(local).earliest() {
                Some(offset) => offset.fix(),
                None => Local.offset_from_utc_datetime(local).fix(),
            },
            LocalZone::Fixed(offset) => *offset,
        }
    }

    /// Current date and time in this zone.
    pub fn now(&self) -> DateValue {
        DateValue::from_utc(Utc::now(), self)
    }
}

/// An instant observed in a local UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateValue {
    inner: DateTime<FixedOffset>,
}

impl DateValue {
    /// Current date and time in the host system zone.
    pub fn now() -> Self {
        LocalZone::System.now()
    }

    /// Build a value from local calendar fields (`month` is 1–12).
    ///
    /// Returns `None` for impossible fields such as month 13 or 25:00.
    ///
    /// ```
    /// use datepicker_native::{DateValue, LocalZone};
    /// assert!(DateValue::from_ymd_hms(2024, 2, 29, 0, 0, 0, &LocalZone::utc()).is_some());
    /// assert!(DateValue::from_ymd_hms(2023, 2, 29, 0, 0, 0, &LocalZone::utc()).is_none());
    /// ```
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        zone: &LocalZone,
    ) -> Option<Self> {
        let local = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
        Self::from_local(&local, zone)
    }

    /// Interpret a naive wall-clock time in `zone`.
    pub fn from_local(local: &NaiveDateTime, zone: &LocalZone) -> Option<Self> {
        let offset = zone.offset_at_local(local);
        offset
            .from_local_datetime(local)
            .single()
            .map(|inner| DateValue { inner })
    }

    /// Observe a UTC instant in `zone`.
    pub fn from_utc(utc: DateTime<Utc>, zone: &LocalZone) -> Self {
        let offset = zone.offset_at_utc(&utc.naive_utc());
        DateValue {
            inner: utc.with_timezone(&offset),
        }
    }

    /// Observe milliseconds since the Unix epoch in `zone`.
    pub fn from_timestamp_millis(millis: i64, zone: &LocalZone) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|utc| Self::from_utc(utc, zone))
    }

    /// Parse date text the way a host `Date` constructor does.
    ///
    /// Accepted forms:
    /// - RFC 3339 / ISO 8601 with an offset (`2022-03-05T14:30:07Z`)
    /// - RFC 2822 (`Sat, 05 Mar 2022 14:30:07 +0000`)
    /// - ISO date-only (`2022-03-05`), read as UTC midnight
    /// - ISO date-time without offset, `YYYY/MM/DD` and `MM/DD/YYYY`
    ///   (with optional `HH:MM[:SS]`), read as local time in `zone`
    ///
    /// # Errors
    ///
    /// [`DatePickerError::InvalidDate`] when no form matches.
    ///
    /// ```
    /// use datepicker_native::{DateValue, LocalZone};
    /// let zone = LocalZone::from_offset_minutes(-300).unwrap();
    /// let d = DateValue::parse("2022-03-05T14:30:07", &zone).unwrap();
    /// assert_eq!((d.hour(), d.minute(), d.second()), (14, 30, 7));
    /// assert!(DateValue::parse("not a date", &zone).is_err());
    /// ```
    pub fn parse(text: &str, zone: &LocalZone) -> crate::Result<Self> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::from_utc(dt.with_timezone(&Utc), zone));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Ok(Self::from_utc(dt.with_timezone(&Utc), zone));
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::from_utc(midnight.and_utc(), zone));
            }
        }
        for format in LOCAL_DATE_TIME_FORMATS {
            if let Ok(local) = NaiveDateTime::parse_from_str(text, format) {
                return Self::from_local(&local, zone).ok_or(DatePickerError::DateOutOfRange);
            }
        }
        for format in LOCAL_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(text, format) {
                let local = date.and_hms_opt(0, 0, 0).ok_or(DatePickerError::DateOutOfRange)?;
                return Self::from_local(&local, zone).ok_or(DatePickerError::DateOutOfRange);
            }
        }

        Err(DatePickerError::InvalidDate(text.to_string()))
    }

    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    /// Zero based month, 0–11.
    pub fn month0(&self) -> u32 {
        self.inner.month0()
    }

    /// Month, 1–12.
    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    /// Day of month, 1–31.
    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    pub fn second(&self) -> u32 {
        self.inner.second()
    }

    pub fn weekday(&self) -> Weekday {
        self.inner.weekday()
    }

    /// Minutes to add to local time to reach UTC (`-60` for `+01:00`).
    pub fn timezone_offset(&self) -> i32 {
        -self.inner.offset().local_minus_utc() / 60
    }

    /// The local UTC offset this value is observed in.
    pub fn offset(&self) -> FixedOffset {
        *self.inner.offset()
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.inner.timestamp_millis()
    }

    /// Local calendar date.
    pub fn date_naive(&self) -> NaiveDate {
        self.inner.date_naive()
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.inner
    }
}

impl std::fmt::Display for DateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.to_rfc3339())
    }
}

impl From<DateTime<FixedOffset>> for DateValue {
    fn from(inner: DateTime<FixedOffset>) -> Self {
        DateValue { inner }
    }
}

impl From<DateTime<Local>> for DateValue {
    fn from(dt: DateTime<Local>) -> Self {
        DateValue {
            inner: dt.fixed_offset(),
        }
    }
}

impl From<DateValue> for DateTime<FixedOffset> {
    fn from(value: DateValue) -> Self {
        value.inner
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::{DateValue, LocalZone};

    #[test]
    fn fields_follow_local_offset() {
        let zone = LocalZone::from_offset_minutes(-8 * 60).unwrap();
        let d = DateValue::from_ymd_hms(2022, 3, 5, 23, 15, 0, &zone).unwrap();
        assert_eq!(d.day(), 5);
        assert_eq!(d.hour(), 23);
        assert_eq!(d.weekday(), Weekday::Sat);
        assert_eq!(d.timezone_offset(), 480);

        let utc = DateValue::from_timestamp_millis(d.timestamp_millis(), &LocalZone::utc()).unwrap();
        assert_eq!(utc.day(), 6);
        assert_eq!(utc.hour(), 7);
    }

    #[test]
    fn parses_date_only_as_utc_midnight() {
        let zone = LocalZone::from_offset_minutes(-5 * 60).unwrap();
        let d = DateValue::parse("2022-03-05", &zone).unwrap();
        // UTC midnight seen five hours west is the previous evening
        assert_eq!(d.day(), 4);
        assert_eq!(d.hour(), 19);
    }

    #[test]
    fn parses_offset_and_local_forms() {
        let zone = LocalZone::utc();
        let d = DateValue::parse("2022-03-05T14:30:07+02:00", &zone).unwrap();
        assert_eq!(d.hour(), 12);

        let d = DateValue::parse("03/05/2022 14:30", &zone).unwrap();
        assert_eq!((d.month(), d.day(), d.hour(), d.minute()), (3, 5, 14, 30));

        let d = DateValue::parse("2022/03/05", &zone).unwrap();
        assert_eq!((d.year(), d.month0(), d.day()), (2022, 2, 5));

        let d = DateValue::parse("Sat, 05 Mar 2022 14:30:07 +0000", &zone).unwrap();
        assert_eq!(d.second(), 7);
    }

    #[test]
    fn rejects_garbage() {
        assert!(DateValue::parse("", &LocalZone::utc()).is_err());
        assert!(DateValue::parse("2022-13-45", &LocalZone::utc()).is_err());
        assert!(DateValue::parse("yesterday", &LocalZone::utc()).is_err());
    }

    #[test]
    fn offset_bounds() {
        assert!(LocalZone::from_offset_minutes(345).is_some());
        assert!(LocalZone::from_offset_minutes(24 * 60).is_none());
    }
}
