//! Convenient re-exports of the commonly used types and functions.
//!
//! ```
//! use datepicker_native::prelude::*;
//!
//! let control = MemoryControl::shared();
//! let start = DateValue::from_ymd_hms(2022, 3, 5, 0, 0, 0, &LocalZone::utc()).unwrap();
//! let picker = DatePicker::bind(control.clone(), Some(start), |_, _, _| {});
//! assert_eq!(control.borrow().value(), "2022-03-05");
//! assert!(picker.unbind());
//! ```
//!
//! Lower level items (name tables, `CONTROL_DATE_FORMAT`, `ListenerId`) stay
//! at the crate root.

pub use crate::{
    // Dates
    DateValue,
    LocalZone,
    DatePickerError,
    Result,
    // Formatting
    DateFormatter,
    DateInput,
    format_date,
    // Conversion
    local_to_utc_date,
    utc_to_local_date,
    // Controls
    ChangeEvent,
    ControlRef,
    ControlRegistry,
    ControlResolver,
    DateControl,
    MemoryControl,
    NoResolver,
    dispatch_change,
    // Binding
    BindingOptions,
    BoundKind,
    DateBound,
    DatePicker,
};
