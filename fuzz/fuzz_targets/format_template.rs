#![no_main]
use datepicker_native::{DateFormatter, DateValue, LocalZone};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct Input<'a> {
    millis: i64,
    date_text: &'a str,
    template: &'a str,
    long_weekday: bool,
}

fuzz_target!(|input: Input<'_>| {
    let fmt = DateFormatter::new()
        .with_zone(LocalZone::utc())
        .with_long_weekday_token(input.long_weekday);
    if let Some(date) = DateValue::from_timestamp_millis(input.millis, &LocalZone::utc()) {
        let _ = fmt.format_with(date, input.template);
    }
    let _ = fmt.format_with(input.date_text, input.template);
});
