//! Tests for the hour/minute/period sub-widget.

use chronos_core::time_picker::{Period, TimeOfDay, TimePicker};
use chronos_core::{PickerError, ZonedInstant};

#[test]
fn starts_at_noon_without_a_value() {
    let picker = TimePicker::new(false, None);
    assert_eq!(picker.time(), TimeOfDay { hour: 12, minute: 0 });
    assert_eq!(picker.display_hour(), 12);
    assert_eq!(picker.period(), Period::Pm);
}

#[test]
fn reads_time_from_value() {
    let value = ZonedInstant::parse("2026-02-14T21:05", "UTC").unwrap();
    let picker = TimePicker::new(false, Some(&value));
    assert_eq!(picker.display_hour(), 9);
    assert_eq!(picker.minute(), 5);
    assert_eq!(picker.period(), Period::Pm);

    let picker = TimePicker::new(true, Some(&value));
    assert_eq!(picker.display_hour(), 21);
}

#[test]
fn twelve_hour_selection_reports_24_hour_value() {
    let value = ZonedInstant::parse("2026-02-14T15:00", "UTC").unwrap();
    let mut picker = TimePicker::new(false, Some(&value));

    assert_eq!(picker.set_display_hour(7).unwrap(), TimeOfDay { hour: 19, minute: 0 });
    assert_eq!(picker.set_display_hour(12).unwrap().hour, 12);

    picker.toggle_period();
    assert_eq!(picker.period(), Period::Am);
    assert_eq!(picker.set_display_hour(12).unwrap().hour, 0);
    assert_eq!(picker.set_display_hour(11).unwrap().hour, 11);
}

#[test]
fn toggling_period_keeps_display_hour() {
    let value = ZonedInstant::parse("2026-02-14T09:30", "UTC").unwrap();
    let mut picker = TimePicker::new(false, Some(&value));

    let pm = picker.toggle_period();
    assert_eq!(pm, TimeOfDay { hour: 21, minute: 30 });
    assert_eq!(picker.display_hour(), 9);

    let am = picker.toggle_period();
    assert_eq!(am.hour, 9);

    // Midnight <-> noon.
    picker.set_display_hour(12).unwrap();
    assert_eq!(picker.time().hour, 0);
    assert_eq!(picker.toggle_period().hour, 12);
    assert_eq!(picker.display_hour(), 12);
}

#[test]
fn out_of_range_input_is_rejected() {
    let mut twelve = TimePicker::new(false, None);
    assert!(matches!(twelve.set_display_hour(0), Err(PickerError::InvalidTime { .. })));
    assert!(matches!(twelve.set_display_hour(13), Err(PickerError::InvalidTime { .. })));

    let mut twenty_four = TimePicker::new(true, None);
    assert!(twenty_four.set_display_hour(0).is_ok());
    assert!(twenty_four.set_display_hour(24).is_err());
    assert!(twenty_four.set_minute(60).is_err());
    assert_eq!(twenty_four.set_minute(59).unwrap().minute, 59);
}

#[test]
fn option_lists_match_mode() {
    let twelve = TimePicker::new(false, None);
    assert_eq!(twelve.hour_options(), (1..=12).collect::<Vec<_>>());
    let twenty_four = TimePicker::new(true, None);
    assert_eq!(twenty_four.hour_options().len(), 24);
    assert_eq!(twenty_four.minute_options().len(), 60);
    assert_eq!(twelve.period_toggle_label(), "Switch to AM");
}
