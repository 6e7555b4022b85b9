#![no_main]
use datepicker_native::{LocalZone, local_to_utc_date, utc_to_local_date};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, i16)| {
    let (value, offset) = data;
    // Accepted values must serialize back unchanged
    let Some(zone) = LocalZone::from_offset_minutes(i32::from(offset) % (24 * 60)) else {
        return;
    };
    if let Ok(local) = utc_to_local_date(value, &zone) {
        assert_eq!(local_to_utc_date(&local), value);
    }
});
