use std::{cell::RefCell, rc::Rc};

use datepicker_native::prelude::*;

fn zone() -> LocalZone {
    LocalZone::from_offset_minutes(-7 * 60).unwrap()
}

fn date(y: i32, m: u32, d: u32, h: u32) -> DateValue {
    DateValue::from_ymd_hms(y, m, d, h, 0, 0, &zone()).unwrap()
}

type Calls = Rc<RefCell<Vec<(DateValue, String, DateValue)>>>;

/// Binds with a callback recording (new date, event value, picker active date).
fn bind_recording(
    control: &ControlRef<MemoryControl>,
    start: DateValue,
) -> (DatePicker<MemoryControl>, Calls) {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let picker = DatePicker::bind_with(
        BindingOptions::new(control)
            .active_date(start)
            .zone(zone())
            .on_change(move |date, event, picker| {
                sink.borrow_mut()
                    .push((*date, event.value.clone(), picker.active_date()))
            }),
        &NoResolver,
    )
    .unwrap();
    (picker, calls)
}

#[test]
fn bind_writes_value_and_date_value() {
    let control = MemoryControl::shared();
    let start = date(2022, 3, 5, 22);
    let (picker, _) = bind_recording(&control, start);

    assert_eq!(control.borrow().value(), "2022-03-05");
    assert_eq!(control.borrow().date_value(), Some(start));
    assert_eq!(picker.active_date(), start);
    assert!(picker.is_bound());
    assert_eq!(control.borrow().listener_count(), 1);
}

#[test]
fn change_event_updates_state_before_callback() {
    let control = MemoryControl::shared();
    let (picker, calls) = bind_recording(&control, date(2022, 3, 5, 9));

    assert_eq!(dispatch_change(&control, "2022-04-10"), 1);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    let (new_date, event_value, active_at_callback) = &calls[0];
    assert_eq!(new_date.date_naive(), date(2022, 4, 10, 0).date_naive());
    assert_eq!(new_date.hour(), 0);
    assert_eq!(event_value, "2022-04-10");
    assert_eq!(active_at_callback, new_date);
    assert_eq!(picker.active_date(), *new_date);
    assert_eq!(control.borrow().date_value(), Some(*new_date));
}

#[test]
fn unbind_stops_callbacks() {
    let control = MemoryControl::shared();
    let (picker, calls) = bind_recording(&control, date(2022, 3, 5, 9));

    assert!(picker.unbind());
    assert!(!picker.unbind());
    assert!(!picker.is_bound());
    assert_eq!(dispatch_change(&control, "2022-04-10"), 0);
    assert!(calls.borrow().is_empty());
    assert_eq!(picker.active_date(), date(2022, 3, 5, 9));
}

#[test]
fn binding_outlives_discarded_handle() {
    let control = MemoryControl::shared();
    let hits = Rc::new(RefCell::new(Vec::new()));
    let sink = hits.clone();
    DatePicker::bind(control.clone(), Some(date(2022, 3, 5, 9)), move |date, _, _| {
        sink.borrow_mut().push(*date)
    });

    assert_eq!(dispatch_change(&control, "2022-04-10"), 1);
    assert_eq!(hits.borrow().len(), 1);
    let picked = hits.borrow()[0];
    assert_eq!(control.borrow().date_value(), Some(picked));
    assert_eq!(local_to_utc_date(&picked), "2022-04-10");
}

#[test]
fn unbind_through_another_handle_releases_binding() {
    let control = MemoryControl::shared();
    let (picker, calls) = bind_recording(&control, date(2022, 3, 5, 9));
    let second = picker.clone();
    drop(picker);
    dispatch_change(&control, "2022-04-10");
    assert_eq!(calls.borrow().len(), 1);

    assert!(second.unbind());
    assert_eq!(control.borrow().listener_count(), 0);
    dispatch_change(&control, "2022-04-11");
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn change_dispatched_from_callback_is_delivered_after() {
    let control = MemoryControl::shared();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let picker = DatePicker::bind_with(
        BindingOptions::new(&control)
            .active_date(date(2022, 3, 5, 9))
            .zone(zone())
            .on_change(move |date, event, picker| {
                sink.borrow_mut()
                    .push((local_to_utc_date(date), event.value.clone()));
                if event.value == "2022-04-10" {
                    dispatch_change(picker.control(), "2022-04-01");
                    // Applied immediately, reported once this call returns
                    assert_eq!(local_to_utc_date(&picker.active_date()), "2022-04-01");
                }
            }),
        &NoResolver,
    )
    .unwrap();

    dispatch_change(&control, "2022-04-10");

    let expected = [("2022-04-10", "2022-04-10"), ("2022-04-01", "2022-04-01")]
        .map(|(d, v)| (d.to_string(), v.to_string()));
    assert_eq!(*seen.borrow(), expected);
    assert_eq!(local_to_utc_date(&picker.active_date()), "2022-04-01");

    // Delivery state is reset for the next top-level change
    dispatch_change(&control, "2022-05-05");
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn cleared_or_malformed_value_is_ignored() {
    let control = MemoryControl::shared();
    let start = date(2022, 3, 5, 9);
    let (picker, calls) = bind_recording(&control, start);

    dispatch_change(&control, "");
    dispatch_change(&control, "not-a-date");
    assert!(calls.borrow().is_empty());
    assert_eq!(picker.active_date(), start);
}

#[test]
fn positional_bind_defaults_to_now() {
    let control = MemoryControl::shared();
    let before = DateValue::now().timestamp_millis();
    let picker = DatePicker::bind(control.clone(), None, |_, _, _| {});
    let after = DateValue::now().timestamp_millis();

    let active = picker.active_date().timestamp_millis();
    assert!(before <= active && active <= after);
    assert_eq!(control.borrow().value(), local_to_utc_date(&picker.active_date()));
    assert_eq!(picker.zone(), LocalZone::System);
}

#[test]
fn bind_by_id_through_registry() {
    let control = MemoryControl::shared();
    let mut registry = ControlRegistry::new();
    registry.insert("due-date", control.clone());

    let picker = DatePicker::bind_with(
        BindingOptions::<MemoryControl>::new("due-date")
            .active_date(date(2023, 1, 2, 8))
            .zone(zone()),
        &registry,
    )
    .unwrap();
    assert!(Rc::ptr_eq(picker.control(), &control));
    assert_eq!(control.borrow().value(), "2023-01-02");
}

#[test]
fn unknown_id_fails() {
    let registry: ControlRegistry<MemoryControl> = ControlRegistry::new();
    let err = DatePicker::bind_with(BindingOptions::<MemoryControl>::new("missing"), &registry)
        .unwrap_err();
    assert!(matches!(err, DatePickerError::ControlNotFound(ref id) if id == "missing"));
    assert_eq!(err.to_string(), "Control not found: missing");

    let err = DatePicker::bind_with(BindingOptions::<MemoryControl>::new("missing"), &NoResolver)
        .unwrap_err();
    assert!(matches!(err, DatePickerError::ControlNotFound(_)));
}

#[test]
fn bounds_are_written_on_bind_and_rebind() {
    let control = MemoryControl::shared();
    let today = zone().now();
    let picker = DatePicker::bind_with(
        BindingOptions::new(&control)
            .active_date(date(2022, 3, 5, 9))
            .min("2020-01-01")
            .max(DateBound::Days(10))
            .zone(zone()),
        &NoResolver,
    )
    .unwrap();

    assert_eq!(control.borrow().min(), "2020-01-01");
    assert_eq!(
        control.borrow().max(),
        DateBound::Days(10).normalize(BoundKind::Max, &today).unwrap()
    );

    control.borrow_mut().set_min("");
    picker.set_active_date(date(2022, 6, 1, 12));
    assert_eq!(control.borrow().min(), "2020-01-01");
    assert_eq!(control.borrow().value(), "2022-06-01");
    assert_eq!(control.borrow().date_value(), Some(date(2022, 6, 1, 12)));
}

#[test]
fn without_bounds_min_max_are_untouched() {
    let control = MemoryControl::shared();
    control.borrow_mut().set_max("2030-12-31");
    let _picker = DatePicker::bind(control.clone(), Some(date(2022, 3, 5, 9)), |_, _, _| {});
    assert_eq!(control.borrow().min(), "");
    assert_eq!(control.borrow().max(), "2030-12-31");
}

#[test]
fn callback_may_rebind_and_unbind() {
    let control = MemoryControl::shared();
    let picker = DatePicker::bind_with(
        BindingOptions::new(&control)
            .active_date(date(2022, 3, 5, 9))
            .zone(zone())
            .on_change(|date, _, picker| {
                // Snap every selection to the first of its month
                let first =
                    DateValue::from_ymd_hms(date.year(), date.month(), 1, 0, 0, 0, &picker.zone())
                        .unwrap();
                picker.set_active_date(first);
                picker.unbind();
            }),
        &NoResolver,
    )
    .unwrap();

    dispatch_change(&control, "2022-08-17");
    assert_eq!(control.borrow().value(), "2022-08-01");
    assert_eq!(picker.active_date().day(), 1);
    assert!(!picker.is_bound());
}

#[test]
fn independent_pickers_do_not_interact() {
    let a = MemoryControl::shared();
    let b = MemoryControl::shared();
    let (pa, calls_a) = bind_recording(&a, date(2022, 1, 1, 0));
    let (pb, calls_b) = bind_recording(&b, date(2022, 2, 2, 0));

    dispatch_change(&a, "2022-05-05");
    assert_eq!(calls_a.borrow().len(), 1);
    assert!(calls_b.borrow().is_empty());
    assert_eq!(pb.active_date(), date(2022, 2, 2, 0));
    assert_eq!(pa.active_date().day(), 5);
}
