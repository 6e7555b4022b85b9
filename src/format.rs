//! Token based date formatting.
//!
//! A template is plain text with embedded tokens. Each token is replaced at
//! most once, at its first occurrence, in this order:
//!
//! | Order | Token(s)               | Output                                   |
//! |-------|------------------------|------------------------------------------|
//! | 1     | `yyyy`, else `yy`      | `2022`, `22`                             |
//! | 2     | `dd`                   | zero padded day of month                 |
//! | 3     | `t`                    | `am` / `pm`                              |
//! | 4     | `HH`                   | zero padded 24 hour clock                |
//! | 5     | `hh`                   | zero padded 12 hour clock (0 → 12)       |
//! | 6     | `dw`                   | `Sun` `Mon` `Tues` `Wed` `Thur` `Fri` `Sat` |
//! | 7     | `DW`                   | long weekday name, see below             |
//! | 8     | `mm`                   | zero padded minutes                      |
//! | 9     | `ss`                   | zero padded seconds                      |
//! | 10    | `MMMM`, else `MMM`, else `MM` | `March`, `Mar`, `03`              |
//!
//! Replacement runs on the partially substituted string, so the order above
//! is part of the contract (`t` is consumed before any month name appears).
//!
//! # Long weekday names
//!
//! By default a `DW` in the template replaces the *lowercase* `dw` token
//! with the long name, so `DW` itself is never substituted. Templates written
//! against that behaviour keep working.
//! [`DateFormatter::with_long_weekday_token`] switches to replacing `DW`.
//!
//! # Invalid dates
//!
//! Text that fails to parse still formats: every field renders as `NaN`
//! (`yy` takes its two characters from that text, yielding `N`). Use
//! [`DateFormatter::try_format`] or [`DateFormatter::try_format_with`] to get
//! an error instead.
//!
//! ```
//! use datepicker_native::{DateInput, DateValue, LocalZone, format_date};
//!
//! let d = DateValue::from_ymd_hms(2022, 3, 5, 14, 30, 7, &LocalZone::utc()).unwrap();
//! assert_eq!(format_date(d, "dw, MMMM dd yyyy hh:mm t", ""), "Sat, March 05 2022 02:30 pm");
//! assert_eq!(format_date(DateInput::Empty, "yyyy", "-"), "-");
//! ```

use crate::{DateValue, LocalZone};

/// Template used when none (or an empty one) is given.
pub const DEFAULT_TEMPLATE: &str = "MM/dd/yyyy";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Short weekday names. `Tues` and `Thur` are four letters long.
pub const SHORT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tues", "Wed", "Thur", "Fri", "Sat"];

const INVALID_FIELD: &str = "NaN";

/// Something that can be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// No date: formats to the empty result.
    Empty,
    Value(DateValue),
    /// Date text, parsed with [`DateValue::parse`]. Empty text counts as
    /// [`DateInput::Empty`].
    Text(&'a str),
}

impl From<DateValue> for DateInput<'_> {
    fn from(value: DateValue) -> Self {
        DateInput::Value(value)
    }
}

impl From<&DateValue> for DateInput<'_> {
    fn from(value: &DateValue) -> Self {
        DateInput::Value(*value)
    }
}

impl From<Option<DateValue>> for DateInput<'_> {
    fn from(value: Option<DateValue>) -> Self {
        value.map_or(DateInput::Empty, DateInput::Value)
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(text: &'a str) -> Self {
        DateInput::Text(text)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(text: &'a String) -> Self {
        DateInput::Text(text)
    }
}

/// Reusable formatting settings.
///
/// ```
/// use datepicker_native::{DateFormatter, DateValue, LocalZone};
///
/// let fmt = DateFormatter::new()
///     .with_template("yyyy-MM-dd HH:mm")
///     .with_empty_result("n/a");
/// let d = DateValue::from_ymd_hms(1999, 12, 31, 23, 59, 0, &LocalZone::utc()).unwrap();
/// assert_eq!(fmt.format(d), "1999-12-31 23:59");
/// assert_eq!(fmt.format(""), "n/a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    template: String,
    empty_result: String,
    zone: LocalZone,
    long_weekday_token: bool,
}

impl Default for DateFormatter {
    fn default() -> Self {
        DateFormatter {
            template: DEFAULT_TEMPLATE.to_string(),
            empty_result: String::new(),
            zone: LocalZone::System,
            long_weekday_token: false,
        }
    }
}

impl DateFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template used by [`format`](Self::format).
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Returned unchanged when there is no date.
    pub fn with_empty_result(mut self, empty_result: impl Into<String>) -> Self {
        self.empty_result = empty_result.into();
        self
    }

    /// Zone used to interpret date text.
    pub fn with_zone(mut self, zone: LocalZone) -> Self {
        self.zone = zone;
        self
    }

    /// When `true`, `DW` is replaced by the long weekday name. When `false`
    /// (default) a `DW` in the template targets the `dw` token instead.
    pub fn with_long_weekday_token(mut self, enabled: bool) -> Self {
        self.long_weekday_token = enabled;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Format with the configured template.
    pub fn format<'a>(&self, date: impl Into<DateInput<'a>>) -> String {
        self.format_with(date, &self.template)
    }

    /// Format with an explicit template; an empty one means
    /// [`DEFAULT_TEMPLATE`].
    pub fn format_with<'a>(&self, date: impl Into<DateInput<'a>>, template: &str) -> String {
        match date.into() {
            DateInput::Empty | DateInput::Text("") => self.empty_result.clone(),
            DateInput::Value(value) => self.render(Some(&value), template),
            DateInput::Text(text) => match DateValue::parse(text, &self.zone) {
                Ok(value) => self.render(Some(&value), template),
                Err(err) => {
                    log::warn!("formatting unparseable date: {err}");
                    self.render(None, template)
                }
            },
        }
    }

    /// Like [`format`](Self::format) but fails on unparseable date text.
    ///
    /// # Errors
    ///
    /// [`DatePickerError::InvalidDate`](crate::DatePickerError::InvalidDate) if text input cannot be parsed.
    pub fn try_format<'a>(&self, date: impl Into<DateInput<'a>>) -> crate::Result<String> {
        self.try_format_with(date, &self.template)
    }

    /// Like [`format_with`](Self::format_with) but fails on unparseable
    /// date text.
    ///
    /// # Errors
    ///
    /// [`DatePickerError::InvalidDate`](crate::DatePickerError::InvalidDate) if text input cannot be parsed.
    pub fn try_format_with<'a>(&self, date: impl Into<DateInput<'a>>, template: &str) -> crate::Result<String> {
        match date.into() {
            DateInput::Empty | DateInput::Text("") => Ok(self.empty_result.clone()),
            DateInput::Value(value) => Ok(self.render(Some(&value), template)),
            DateInput::Text(text) => {
                let value = DateValue::parse(text, &self.zone)?;
                Ok(self.render(Some(&value), template))
            }
        }
    }

    fn render(&self, date: Option<&DateValue>, template: &str) -> String {
        let mut out = if template.is_empty() {
            DEFAULT_TEMPLATE.to_string()
        } else {
            template.to_string()
        };

        let year = date.map_or_else(|| INVALID_FIELD.to_string(), |d| d.year().to_string());
        if out.contains("yyyy") {
            out = out.replacen("yyyy", &year, 1);
        } else if out.contains("yy") {
            let short: String = year.chars().skip(2).take(2).collect();
            out = out.replacen("yy", &short, 1);
        }

        out = out.replacen("dd", &padded(date.map(DateValue::day)), 1);

        let hour = date.map(DateValue::hour);
        if out.contains('t') {
            let meridiem = if hour.is_some_and(|h| h > 11) { "pm" } else { "am" };
            out = out.replacen('t', meridiem, 1);
        }
        if out.contains("HH") {
            out = out.replacen("HH", &padded(hour), 1);
        }
        if out.contains("hh") {
            out = out.replacen("hh", &padded(hour.map(twelve_hour)), 1);
        }

        let weekday = date.map(|d| d.weekday().num_days_from_sunday() as usize);
        if out.contains("dw") {
            out = out.replacen("dw", name(weekday, &SHORT_DAY_NAMES), 1);
        }
        if out.contains("DW") {
            let token = if self.long_weekday_token { "DW" } else { "dw" };
            out = out.replacen(token, name(weekday, &DAY_NAMES), 1);
        }

        if out.contains("mm") {
            out = out.replacen("mm", &padded(date.map(DateValue::minute)), 1);
        }
        if out.contains("ss") {
            out = out.replacen("ss", &padded(date.map(DateValue::second)), 1);
        }

        let month = date.map(|d| d.month0() as usize);
        if out.contains("MMMM") {
            out = out.replacen("MMMM", name(month, &MONTH_NAMES), 1);
        } else if out.contains("MMM") {
            let short: String = name(month, &MONTH_NAMES).chars().take(3).collect();
            out = out.replacen("MMM", &short, 1);
        } else {
            out = out.replacen("MM", &padded(date.map(DateValue::month)), 1);
        }

        out
    }
}

/// Format `date` with `template`, returning `empty_result` when there is no
/// date. An empty template means [`DEFAULT_TEMPLATE`]; date text is read in
/// the system zone.
pub fn format_date<'a>(date: impl Into<DateInput<'a>>, template: &str, empty_result: &str) -> String {
    DateFormatter::new()
        .with_empty_result(empty_result)
        .format_with(date, template)
}

fn padded(field: Option<u32>) -> String {
    match field {
        Some(v) => format!("{v:02}"),
        None => INVALID_FIELD.to_string(),
    }
}

fn twelve_hour(hour: u32) -> u32 {
    match hour {
        0 => 12,
        13.. => hour - 12,
        _ => hour,
    }
}

fn name(index: Option<usize>, names: &[&'static str]) -> &'static str {
    index.and_then(|i| names.get(i).copied()).unwrap_or(INVALID_FIELD)
}
