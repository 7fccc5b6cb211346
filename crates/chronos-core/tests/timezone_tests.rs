//! Tests for timezone utilities and zoned instants.

use chrono::{TimeZone, Utc, Weekday};
use chronos_core::timezone::{
    convert_to_timezone, format_timezone_offset, is_valid_timezone, now_in_timezone,
    timezone_label, COMMON_TIMEZONES, DEFAULT_TIMEZONE,
};
use chronos_core::{DateInput, PickerError, ZonedInstant};

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn known_and_unknown_zones() {
    assert!(is_valid_timezone("Asia/Kolkata"));
    assert!(is_valid_timezone("UTC"));
    assert!(!is_valid_timezone("Not/A_Zone"));
    assert!(!is_valid_timezone(""));
    assert_eq!(DEFAULT_TIMEZONE, "Asia/Kolkata");
    assert_eq!(COMMON_TIMEZONES.len(), 12);
}

#[test]
fn now_in_unknown_zone_fails() {
    assert!(matches!(
        now_in_timezone("Nowhere/Land"),
        Err(PickerError::InvalidTimezone(zone)) if zone == "Nowhere/Land"
    ));
    assert_eq!(now_in_timezone("Asia/Tokyo").unwrap().timezone(), "Asia/Tokyo");
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

#[test]
fn offset_iso_string_keeps_its_instant() {
    let value = DateInput::from("2026-02-14T09:00:00Z");
    let converted = convert_to_timezone(&value, "Asia/Kolkata").unwrap();
    assert_eq!((converted.hour(), converted.minute()), (14, 30));
    assert_eq!(
        converted.timestamp_millis(),
        Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap().timestamp_millis()
    );
    assert_eq!(converted.to_iso(), "2026-02-14T14:30:00.000+05:30");
}

#[test]
fn minutes_only_iso_string_with_offset_keeps_its_instant() {
    let expected = Utc.with_ymd_and_hms(2026, 1, 26, 4, 30, 0).unwrap().timestamp_millis();
    for text in ["2026-01-26T10:00+05:30", "2026-01-26T04:30Z", "2026-01-26T10:00+0530"] {
        let converted = convert_to_timezone(&DateInput::from(text), "UTC").unwrap();
        assert_eq!(converted.timestamp_millis(), expected, "{text}");
        assert_eq!((converted.hour(), converted.minute()), (4, 30), "{text}");
    }

    let utc_value = DateInput::from("2026-01-26T10:00Z");
    let in_new_york = convert_to_timezone(&utc_value, "America/New_York").unwrap();
    assert_eq!(in_new_york.to_iso(), "2026-01-26T05:00:00.000-05:00");
}

#[test]
fn naive_iso_string_is_wall_clock_in_target_zone() {
    let value = DateInput::from("2026-02-14T09:00");
    let converted = convert_to_timezone(&value, "America/New_York").unwrap();
    assert_eq!(converted.hour(), 9);
    assert_eq!(converted.offset_seconds(), -5 * 3600);
}

#[test]
fn date_only_string_is_local_midnight() {
    let converted = convert_to_timezone(&DateInput::from("2026-01-26"), "Asia/Kolkata").unwrap();
    assert_eq!((converted.year(), converted.month(), converted.day()), (2026, 1, 26));
    assert_eq!((converted.hour(), converted.minute()), (0, 0));
    assert_eq!(converted.weekday(), Weekday::Mon);
}

#[test]
fn millis_are_absolute() {
    let millis = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap().timestamp_millis();
    let converted = convert_to_timezone(&DateInput::from(millis), "Asia/Tokyo").unwrap();
    assert_eq!(converted.hour(), 21);
    assert_eq!(converted.timestamp_millis(), millis);
}

#[test]
fn malformed_value_is_an_invalid_date() {
    let err = convert_to_timezone(&DateInput::from("14/02/2026"), "UTC").unwrap_err();
    assert!(matches!(err, PickerError::InvalidDate(_)));
    let err = convert_to_timezone(&DateInput::from("2026-02-30"), "UTC").unwrap_err();
    assert!(matches!(err, PickerError::InvalidDate(_)));
}

#[test]
fn date_input_deserializes_from_number_or_string() {
    let values: Vec<DateInput> = serde_json::from_str(r#"[1767225600000, "2026-01-01"]"#).unwrap();
    assert_eq!(values[0], DateInput::Millis(1_767_225_600_000));
    assert_eq!(values[1], DateInput::Text("2026-01-01".to_string()));
}

#[test]
fn round_trip_preserves_epoch_value() {
    let original = ZonedInstant::parse("2026-06-15T23:45:00", "America/Los_Angeles").unwrap();
    let tokyo = original.with_zone("Asia/Tokyo").unwrap();
    let back = tokyo.with_zone("America/Los_Angeles").unwrap();

    assert_ne!(tokyo.hour(), original.hour());
    assert_eq!(tokyo.timestamp_millis(), original.timestamp_millis());
    assert_eq!(back, original);
}

#[test]
fn with_date_keeps_wall_clock_time() {
    let original = ZonedInstant::parse("2026-02-14T14:30", "Asia/Kolkata").unwrap();
    let moved = original
        .with_date(chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        .unwrap();
    assert_eq!((moved.month(), moved.day(), moved.hour(), moved.minute()), (3, 1, 14, 30));
}

#[test]
fn with_time_rejects_impossible_times() {
    let original = ZonedInstant::parse("2026-02-14", "UTC").unwrap();
    assert!(matches!(
        original.with_time(24, 0, 0),
        Err(PickerError::InvalidTime { hour: 24, minute: 0 })
    ));
}

// ---------------------------------------------------------------------------
// Offsets and labels
// ---------------------------------------------------------------------------

#[test]
fn offsets_follow_dst() {
    let winter = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    let summer = Utc.with_ymd_and_hms(2026, 7, 15, 12, 0, 0).unwrap();
    assert_eq!(format_timezone_offset("Asia/Kolkata", winter).unwrap(), "UTC+5:30");
    assert_eq!(format_timezone_offset("America/New_York", winter).unwrap(), "UTC-5");
    assert_eq!(format_timezone_offset("America/New_York", summer).unwrap(), "UTC-4");
    assert_eq!(format_timezone_offset("UTC", summer).unwrap(), "UTC+0");
    assert!(format_timezone_offset("Bad/Zone", summer).is_err());
}

#[test]
fn labels_fall_back_to_zone_id() {
    assert_eq!(timezone_label("Asia/Tokyo"), "Tokyo (JST)");
    assert_eq!(timezone_label("Africa/Nairobi"), "Africa/Nairobi");
}
