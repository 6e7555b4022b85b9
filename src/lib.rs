//! Date formatting and date-picker binding.
//!
//! Two independent pieces:
//!
//! - [`format`]: token substitution (`yyyy`, `MM`, `dd`, `hh`, `t`, ...) of a
//!   template against a [`DateValue`], see [`format_date`] and
//!   [`DateFormatter`].
//! - [`picker`]: [`DatePicker`] keeps a local-time date in sync with a
//!   date-only control whose value is a UTC `YYYY-MM-DD` string, using the
//!   conversions in [`convert`].
//!
//! ```
//! use datepicker_native::prelude::*;
//!
//! let zone = LocalZone::from_offset_minutes(120).unwrap();
//! let d = DateValue::from_ymd_hms(2022, 3, 5, 14, 30, 7, &zone).unwrap();
//! assert_eq!(format_date(d, "yyyy-MM-dd HH:mm", ""), "2022-03-05 14:30");
//! assert_eq!(local_to_utc_date(&d), "2022-03-05");
//! ```

pub type Result<T> = std::result::Result<T, DatePickerError>;

mod errors;
pub use errors::DatePickerError;

pub mod date;
pub use date::{DateValue, LocalZone};

pub mod convert;
pub use convert::{CONTROL_DATE_FORMAT, local_to_utc_date, utc_to_local_date};

pub mod format;
pub use format::{DEFAULT_TEMPLATE, DateFormatter, DateInput, format_date};

pub mod control;
pub use control::{
    ChangeEvent, ChangeListener, ControlRef, ControlRegistry, ControlResolver, DateControl,
    ListenerId, MemoryControl, NoResolver, dispatch_change,
};

pub mod bounds;
pub use bounds::{BoundKind, DateBound};

pub mod picker;
pub use picker::{BindingOptions, ChangeCallback, ControlSource, DatePicker};

pub mod prelude;
