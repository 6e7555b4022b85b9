//! Binding a local-time date to a date-only control.
//!
//! [`DatePicker`] keeps an application's local `active_date` and a
//! [`DateControl`]'s UTC `YYYY-MM-DD` value in sync:
//!
//! - on bind, the active date is written to the control (value and
//!   `date_value`), together with any configured `min`/`max` bounds;
//! - on every change event, the control value is converted back to a local
//!   date, stored as the active date and on the control, and handed to the
//!   `on_change` callback.
//!
//! The control's listener owns the binding, so it stays live after every
//! [`DatePicker`] handle is dropped; the handle is only needed to query or
//! rebind. [`DatePicker::unbind`] removes the listener and releases it.
//!
//! A change dispatched from inside `on_change` is applied at once and its
//! callback runs after the current one returns, so every accepted change
//! reaches the callback exactly once, in order.
//!
//! # Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use datepicker_native::prelude::*;
//!
//! let zone = LocalZone::from_offset_minutes(-300).unwrap();
//! let control = MemoryControl::shared();
//! let start = DateValue::from_ymd_hms(2022, 3, 5, 18, 0, 0, &zone).unwrap();
//!
//! let picked = Rc::new(RefCell::new(None));
//! let sink = picked.clone();
//! let picker = DatePicker::bind_with(
//!     BindingOptions::new(control.clone())
//!         .active_date(start)
//!         .max(DateBound::Days(30))
//!         .zone(zone)
//!         .on_change(move |date, _event, _picker| *sink.borrow_mut() = Some(*date)),
//!     &NoResolver,
//! )?;
//! assert_eq!(control.borrow().value(), "2022-03-05");
//!
//! dispatch_change(&control, "2022-04-01");
//! let date = picked.borrow().unwrap();
//! assert_eq!((date.month(), date.day(), date.hour()), (4, 1, 0));
//! assert_eq!(picker.active_date(), date);
//! # Ok::<(), datepicker_native::DatePickerError>(())
//! ```

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use crate::{
    BoundKind, ChangeEvent, ChangeListener, ControlRef, ControlResolver, DateBound, DateControl,
    DatePickerError, DateValue, ListenerId, LocalZone, local_to_utc_date, utc_to_local_date,
};

/// Called with the new local date, the change event and the picker.
pub type ChangeCallback<C> = Box<dyn FnMut(&DateValue, &ChangeEvent, &DatePicker<C>)>;

/// Where the control comes from.
pub enum ControlSource<C> {
    Handle(ControlRef<C>),
    /// Resolved through a [`ControlResolver`] at bind time.
    Id(String),
}

impl<C> From<ControlRef<C>> for ControlSource<C> {
    fn from(control: ControlRef<C>) -> Self {
        ControlSource::Handle(control)
    }
}

impl<C> From<&ControlRef<C>> for ControlSource<C> {
    fn from(control: &ControlRef<C>) -> Self {
        ControlSource::Handle(control.clone())
    }
}

impl<C> From<&str> for ControlSource<C> {
    fn from(id: &str) -> Self {
        ControlSource::Id(id.to_string())
    }
}

impl<C> From<String> for ControlSource<C> {
    fn from(id: String) -> Self {
        ControlSource::Id(id)
    }
}

/// Everything a [`DatePicker`] is configured with.
pub struct BindingOptions<C: DateControl> {
    pub control: ControlSource<C>,
    /// Initial local date; `None` means now.
    pub active_date: Option<DateValue>,
    pub min: Option<DateBound>,
    pub max: Option<DateBound>,
    pub on_change: Option<ChangeCallback<C>>,
    /// Zone used for "now", day-count bounds and UTC → local conversion.
    pub zone: LocalZone,
}

impl<C: DateControl> BindingOptions<C> {
    pub fn new(control: impl Into<ControlSource<C>>) -> Self {
        BindingOptions {
            control: control.into(),
            active_date: None,
            min: None,
            max: None,
            on_change: None,
            zone: LocalZone::System,
        }
    }

    pub fn active_date(mut self, date: DateValue) -> Self {
        self.active_date = Some(date);
        self
    }

    pub fn min(mut self, min: impl Into<DateBound>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<DateBound>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn zone(mut self, zone: LocalZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&DateValue, &ChangeEvent, &DatePicker<C>) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }
}

struct Inner<C: DateControl> {
    control: ControlRef<C>,
    active_date: Cell<DateValue>,
    min: Option<DateBound>,
    max: Option<DateBound>,
    zone: LocalZone,
    on_change: RefCell<Option<ChangeCallback<C>>>,
    /// Accepted changes whose callback has not run yet.
    pending: RefCell<VecDeque<(DateValue, ChangeEvent)>>,
    delivering: Cell<bool>,
    listener: Cell<Option<ListenerId>>,
}

impl<C: DateControl> Drop for Inner<C> {
    fn drop(&mut self) {
        if let Some(id) = self.listener.take() {
            if let Ok(mut control) = self.control.try_borrow_mut() {
                control.remove_change_listener(id);
            }
        }
    }
}

/// A live binding between a local date and a control.
///
/// Cloning yields another handle to the same binding. The binding lasts
/// until [`unbind`](Self::unbind), whether or not a handle is kept.
pub struct DatePicker<C: DateControl> {
    inner: Rc<Inner<C>>,
}

impl<C: DateControl> Clone for DatePicker<C> {
    fn clone(&self) -> Self {
        DatePicker {
            inner: self.inner.clone(),
        }
    }
}

impl<C: DateControl + 'static> DatePicker<C> {
    /// Bind `control` to `initial_date` (now when `None`) in the system zone.
    pub fn bind<F>(control: ControlRef<C>, initial_date: Option<DateValue>, on_change: F) -> Self
    where
        F: FnMut(&DateValue, &ChangeEvent, &DatePicker<C>) + 'static,
    {
        let mut options = BindingOptions::new(control.clone()).on_change(on_change);
        options.active_date = initial_date;
        Self::attach(control, options)
    }

    /// Bind according to `options`, resolving an [`ControlSource::Id`]
    /// through `resolver`.
    ///
    /// # Errors
    ///
    /// [`DatePickerError::ControlNotFound`] if the identifier does not
    /// resolve.
    pub fn bind_with<R>(options: BindingOptions<C>, resolver: &R) -> crate::Result<Self>
    where
        R: ControlResolver<C> + ?Sized,
    {
        let control = match &options.control {
            ControlSource::Handle(control) => control.clone(),
            ControlSource::Id(id) => resolver
                .resolve(id)
                .ok_or_else(|| DatePickerError::ControlNotFound(id.clone()))?,
        };
        Ok(Self::attach(control, options))
    }

    fn attach(control: ControlRef<C>, options: BindingOptions<C>) -> Self {
        let BindingOptions {
            active_date,
            min,
            max,
            on_change,
            zone,
            ..
        } = options;
        let active_date = active_date.unwrap_or_else(|| zone.now());

        let picker = DatePicker {
            inner: Rc::new(Inner {
                control,
                active_date: Cell::new(active_date),
                min,
                max,
                zone,
                on_change: RefCell::new(on_change),
                pending: RefCell::new(VecDeque::new()),
                delivering: Cell::new(false),
                listener: Cell::new(None),
            }),
        };

        // Control -> listener -> binding -> control; unbind breaks the cycle.
        let bound = picker.clone();
        let listener: ChangeListener = Rc::new(move |event: &ChangeEvent| bound.handle_change(event));
        let id = picker.inner.control.borrow_mut().add_change_listener(listener);
        picker.inner.listener.set(Some(id));

        picker.write_to_control(active_date);
        log::debug!("bound date picker to {}", local_to_utc_date(&active_date));
        picker
    }

    /// Make `date` the active date and write it to the control.
    pub fn set_active_date(&self, date: DateValue) {
        self.inner.active_date.set(date);
        self.write_to_control(date);
        log::debug!("date picker rebound to {}", local_to_utc_date(&date));
    }

    /// The current local date.
    pub fn active_date(&self) -> DateValue {
        self.inner.active_date.get()
    }

    pub fn control(&self) -> &ControlRef<C> {
        &self.inner.control
    }

    pub fn zone(&self) -> LocalZone {
        self.inner.zone
    }

    pub fn is_bound(&self) -> bool {
        self.inner.listener.get().is_some()
    }

    /// Stop listening for changes and release the listener's hold on the
    /// binding. Returns `false` if already unbound.
    pub fn unbind(&self) -> bool {
        let Some(id) = self.inner.listener.take() else {
            return false;
        };
        self.inner.control.borrow_mut().remove_change_listener(id);
        log::debug!("date picker unbound");
        true
    }

    fn write_to_control(&self, date: DateValue) {
        let value = local_to_utc_date(&date);
        let min = self.bound_value(self.inner.min.as_ref(), BoundKind::Min);
        let max = self.bound_value(self.inner.max.as_ref(), BoundKind::Max);

        let mut control = self.inner.control.borrow_mut();
        control.set_date_value(date);
        control.set_value(&value);
        if let Some(min) = min {
            control.set_min(&min);
        }
        if let Some(max) = max {
            control.set_max(&max);
        }
    }

    fn bound_value(&self, bound: Option<&DateBound>, kind: BoundKind) -> Option<String> {
        let bound = bound?;
        let today = self.inner.zone.now();
        match bound.normalize(kind, &today) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("skipping {kind:?} bound {bound:?}: {err}");
                None
            }
        }
    }

    fn handle_change(&self, event: &ChangeEvent) {
        let value = self.inner.control.borrow().value().to_string();
        let date = match utc_to_local_date(&value, &self.inner.zone) {
            Ok(date) => date,
            Err(err) => {
                log::warn!("ignoring date control change: {err}");
                return;
            }
        };

        self.inner.control.borrow_mut().set_date_value(date);
        self.inner.active_date.set(date);

        self.inner.pending.borrow_mut().push_back((date, event.clone()));
        if self.inner.delivering.replace(true) {
            // Nested dispatch; the outer call delivers it.
            return;
        }
        loop {
            let Some((date, event)) = self.inner.pending.borrow_mut().pop_front() else {
                break;
            };
            // Taken out while it runs so the callback may use this picker freely.
            let callback = self.inner.on_change.borrow_mut().take();
            if let Some(mut callback) = callback {
                callback(&date, &event, self);
                *self.inner.on_change.borrow_mut() = Some(callback);
            }
        }
        self.inner.delivering.set(false);
    }
}

impl<C: DateControl> std::fmt::Debug for DatePicker<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePicker")
            .field("active_date", &self.inner.active_date.get())
            .field("min", &self.inner.min)
            .field("max", &self.inner.max)
            .field("zone", &self.inner.zone)
            .field("bound", &self.inner.listener.get().is_some())
            .finish()
    }
}
