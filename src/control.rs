//! The date control abstraction.
//!
//! A [`DateControl`] is anything that behaves like a native date-only input:
//! it holds a `YYYY-MM-DD` value, accepts `min`/`max` attributes, carries an
//! extra `date_value` slot for the local date, and notifies change listeners.
//!
//! Controls are shared as [`ControlRef`] (`Rc<RefCell<_>>`). Hosts deliver a
//! change with [`dispatch_change`], which releases the control borrow before
//! calling listeners so that listeners may read and write the control.
//!
//! [`MemoryControl`] and [`ControlRegistry`] are in-memory implementations
//! for headless hosts and tests.
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//! use datepicker_native::{ChangeEvent, ControlRef, DateControl, MemoryControl, dispatch_change};
//!
//! let control: ControlRef<MemoryControl> = MemoryControl::shared();
//! let seen = Rc::new(Cell::new(0));
//! let counter = seen.clone();
//! control.borrow_mut().add_change_listener(Rc::new(move |_: &ChangeEvent| {
//!     counter.set(counter.get() + 1)
//! }));
//!
//! assert_eq!(dispatch_change(&control, "2022-03-05"), 1);
//! assert_eq!(control.borrow().value(), "2022-03-05");
//! assert_eq!(seen.get(), 1);
//! ```

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::DateValue;

/// Shared handle to a control.
pub type ControlRef<C> = Rc<RefCell<C>>;

/// Listener invoked when a control's value changes.
pub type ChangeListener = Rc<dyn Fn(&ChangeEvent)>;

/// Identifies a registered listener for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The control value at dispatch time (`YYYY-MM-DD`, may be empty).
    pub value: String,
}

pub trait DateControl {
    /// UTC date-only value (`YYYY-MM-DD`), empty when cleared.
    fn value(&self) -> &str;
    fn set_value(&mut self, value: &str);

    /// Local date attached next to the UTC value.
    fn date_value(&self) -> Option<DateValue>;
    fn set_date_value(&mut self, value: DateValue);

    fn set_min(&mut self, min: &str);
    fn set_max(&mut self, max: &str);

    fn add_change_listener(&mut self, listener: ChangeListener) -> ListenerId;

    /// Returns `false` if `id` was not registered.
    fn remove_change_listener(&mut self, id: ListenerId) -> bool;

    /// Snapshot of the registered listeners, in registration order.
    fn change_listeners(&self) -> Vec<ChangeListener>;
}

/// Looks up a control by identifier.
pub trait ControlResolver<C> {
    fn resolve(&self, id: &str) -> Option<ControlRef<C>>;
}

/// Resolves nothing; for callers that only bind direct handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl<C> ControlResolver<C> for NoResolver {
    fn resolve(&self, _id: &str) -> Option<ControlRef<C>> {
        None
    }
}

impl<C, F> ControlResolver<C> for F
where
    F: Fn(&str) -> Option<ControlRef<C>>,
{
    fn resolve(&self, id: &str) -> Option<ControlRef<C>> {
        self(id)
    }
}

/// Set `value` on the control and notify its listeners.
///
/// Returns the number of listeners notified.
pub fn dispatch_change<C: DateControl>(control: &ControlRef<C>, value: &str) -> usize {
    let listeners = {
        let mut c = control.borrow_mut();
        c.set_value(value);
        c.change_listeners()
    };
    let event = ChangeEvent {
        value: value.to_string(),
    };
    for listener in &listeners {
        listener(&event);
    }
    listeners.len()
}

/// A date control that lives in memory.
#[derive(Default)]
pub struct MemoryControl {
    value: String,
    date_value: Option<DateValue>,
    min: String,
    max: String,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: u64,
}

impl MemoryControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new control wrapped in a [`ControlRef`].
    pub fn shared() -> ControlRef<Self> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn min(&self) -> &str {
        &self.min
    }

    pub fn max(&self) -> &str {
        &self.max
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for MemoryControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryControl")
            .field("value", &self.value)
            .field("date_value", &self.date_value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DateControl for MemoryControl {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn date_value(&self) -> Option<DateValue> {
        self.date_value
    }

    fn set_date_value(&mut self, value: DateValue) {
        self.date_value = Some(value);
    }

    fn set_min(&mut self, min: &str) {
        self.min = min.to_string();
    }

    fn set_max(&mut self, max: &str) {
        self.max = max.to_string();
    }

    fn add_change_listener(&mut self, listener: ChangeListener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    fn change_listeners(&self) -> Vec<ChangeListener> {
        self.listeners.iter().map(|(_, l)| l.clone()).collect()
    }
}

/// Identifier → control map, the in-memory counterpart of a document's
/// element lookup.
pub struct ControlRegistry<C> {
    controls: HashMap<String, ControlRef<C>>,
}

impl<C> Default for ControlRegistry<C> {
    fn default() -> Self {
        ControlRegistry {
            controls: HashMap::new(),
        }
    }
}

impl<C> ControlRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `control` under `id`, returning the control it replaced.
    pub fn insert(&mut self, id: impl Into<String>, control: ControlRef<C>) -> Option<ControlRef<C>> {
        self.controls.insert(id.into(), control)
    }

    pub fn remove(&mut self, id: &str) -> Option<ControlRef<C>> {
        self.controls.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&ControlRef<C>> {
        self.controls.get(id)
    }
}

impl<C> ControlResolver<C> for ControlRegistry<C> {
    fn resolve(&self, id: &str) -> Option<ControlRef<C>> {
        self.controls.get(id).cloned()
    }
}
