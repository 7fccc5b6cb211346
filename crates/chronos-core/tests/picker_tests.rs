//! Tests for the root date-time picker widget.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use chronos_core::dismiss::ListenerKind;
use chronos_core::picker::{Orientation, Theme};
use chronos_core::{
    DateInput, DateTimePicker, PickerConfig, PickerError, PickerEvent, RangeSelection,
    SelectionMode,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn single(value: Option<&str>) -> DateTimePicker {
    DateTimePicker::new(PickerConfig {
        value: value.map(DateInput::from),
        ..PickerConfig::default()
    })
    .unwrap()
}

fn range_picker() -> DateTimePicker {
    DateTimePicker::new(PickerConfig {
        selection_mode: SelectionMode::Range,
        ..PickerConfig::default()
    })
    .unwrap()
}

fn change(events: &[PickerEvent]) -> &chronos_core::DateTimeValue {
    events
        .iter()
        .find_map(|e| match e {
            PickerEvent::Change(value) => Some(value),
            _ => None,
        })
        .expect("a change event")
}

fn range_change(events: &[PickerEvent]) -> &chronos_core::RangeValue {
    events
        .iter()
        .find_map(|e| match e {
            PickerEvent::RangeChange(value) => Some(value),
            _ => None,
        })
        .expect("a range change event")
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn defaults_match_documented_props() {
    let config = PickerConfig::default();
    assert_eq!(config.timezone, "Asia/Kolkata");
    assert!(config.show_time);
    assert!(config.use_24_hour);
    assert_eq!(config.placeholder, "Select date and time");
    assert_eq!(config.theme, Theme::Light);
    assert_eq!(config.orientation, Orientation::Portrait);
    assert_eq!(config.selection_mode, SelectionMode::Single);
}

#[test]
fn config_deserializes_from_camel_case_props() {
    let config: PickerConfig = serde_json::from_str(
        r#"{
            "value": "2026-02-14T14:30",
            "timezone": "America/New_York",
            "use24Hour": false,
            "showTimezoneSelector": true,
            "theme": "dark",
            "orientation": "landscape",
            "selectionMode": "single",
            "minDate": 1767225600000,
            "holidays": [{"date": "2026-02-16", "name": "Presidents Day"}],
            "weekStart": "Mon"
        }"#,
    )
    .unwrap();

    assert_eq!(config.timezone, "America/New_York");
    assert!(!config.use_24_hour);
    assert!(config.show_timezone_selector);
    assert!(config.show_time, "unspecified props keep their defaults");
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.orientation, Orientation::Landscape);
    assert_eq!(config.min_date, Some(DateInput::Millis(1_767_225_600_000)));
    assert_eq!(config.holidays.len(), 1);
    assert_eq!(config.week_start, Some(chrono::Weekday::Mon));

    let picker = DateTimePicker::new(config).unwrap();
    assert_eq!(picker.weekday_names()[0], "Mon");
    assert_eq!(picker.time_picker().display_hour(), 2);
}

#[test]
fn invalid_format_pattern_fails_construction() {
    let err = DateTimePicker::new(PickerConfig {
        date_format: "%Q".to_string(),
        ..PickerConfig::default()
    })
    .unwrap_err();
    assert!(matches!(err, PickerError::InvalidFormat(_)));
}

#[test]
fn initial_view_follows_value() {
    let picker = single(Some("2024-07-04T10:00"));
    assert_eq!((picker.view().year, picker.view().month), (2024, 7));
    assert_eq!(picker.display_value(), "Jul 4, 2024 10:00");
}

// ---------------------------------------------------------------------------
// Open / close
// ---------------------------------------------------------------------------

#[test]
fn toggle_registers_and_cleans_up_listeners() {
    let mut picker = single(None);
    assert!(picker.active_listeners().is_empty());

    assert_eq!(picker.toggle(), vec![PickerEvent::Opened]);
    assert!(picker.is_open());
    assert_eq!(
        picker.active_listeners(),
        &[ListenerKind::OutsidePointer, ListenerKind::Escape]
    );
    assert!(picker.trigger_aria().expanded);

    assert_eq!(picker.toggle(), vec![PickerEvent::Closed { restore_focus: false }]);
    assert!(!picker.is_open());
    assert!(picker.active_listeners().is_empty());
}

#[test]
fn escape_closes_and_restores_focus() {
    let mut picker = single(None);
    picker.toggle();
    assert_eq!(picker.handle_escape(), vec![PickerEvent::Closed { restore_focus: true }]);
    assert!(picker.handle_escape().is_empty(), "no listener once closed");
}

#[test]
fn outside_pointer_closes_only_while_open() {
    let mut picker = single(None);
    assert!(picker.handle_outside_pointer().is_empty());
    picker.toggle();
    assert_eq!(
        picker.handle_outside_pointer(),
        vec![PickerEvent::Closed { restore_focus: false }]
    );
}

#[test]
fn enter_and_space_toggle_from_the_trigger() {
    let mut picker = single(None);
    assert_eq!(picker.handle_trigger_key("Enter"), vec![PickerEvent::Opened]);
    assert!(picker.handle_trigger_key("a").is_empty());
    assert_eq!(picker.handle_trigger_key(" ").len(), 1);
    assert!(!picker.is_open());
}

#[test]
fn disabled_widget_ignores_toggle_and_clicks() {
    let mut picker = DateTimePicker::new(PickerConfig {
        disabled: true,
        ..PickerConfig::default()
    })
    .unwrap();
    assert!(picker.toggle().is_empty());
    assert!(picker.click_date(date(2026, 2, 14)).is_empty());
    assert!(picker.trigger_aria().disabled);
}

#[test]
fn disabling_an_open_widget_closes_it() {
    let mut picker = single(None);
    picker.toggle();
    assert_eq!(
        picker.set_disabled(true),
        vec![PickerEvent::Closed { restore_focus: false }]
    );
    assert!(picker.active_listeners().is_empty());
}

// ---------------------------------------------------------------------------
// Single selection
// ---------------------------------------------------------------------------

#[test]
fn date_click_emits_change_payload() {
    let mut picker = single(None);
    picker.toggle();
    let events = picker.click_date(date(2026, 2, 14));

    assert_eq!(events.len(), 1, "stays open while the time picker is shown");
    let value = change(&events);
    assert_eq!(value.iso, "2026-02-14T00:00:00.000+05:30");
    assert_eq!(value.formatted, "Feb 14, 2026 00:00");
    assert_eq!(
        value.timestamp,
        Utc.with_ymd_and_hms(2026, 2, 13, 18, 30, 0).unwrap().timestamp_millis()
    );
    assert_eq!(value.date_time.day(), 14);
    assert!(picker.is_open());
}

#[test]
fn date_only_mode_closes_after_selection() {
    let mut picker = DateTimePicker::new(PickerConfig {
        show_time: false,
        ..PickerConfig::default()
    })
    .unwrap();
    picker.toggle();
    let events = picker.click_date(date(2026, 2, 14));

    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], PickerEvent::Change(_)));
    assert_eq!(events[1], PickerEvent::Closed { restore_focus: false });
    assert_eq!(picker.display_value(), "Feb 14, 2026");
}

#[test]
fn changing_date_keeps_chosen_time() {
    let mut picker = single(None);
    picker.click_date(date(2026, 2, 14));
    picker.set_time(14, 30).unwrap();

    let events = picker.click_date(date(2026, 3, 2));
    let value = change(&events);
    assert_eq!(value.iso, "2026-03-02T14:30:00.000+05:30");
    assert_eq!((picker.view().year, picker.view().month), (2026, 3));
}

#[test]
fn set_time_without_selection_uses_today() {
    let mut picker = single(None);
    let events = picker.set_time(8, 15).unwrap();
    let value = change(&events);
    assert_eq!((value.date_time.hour(), value.date_time.minute()), (8, 15));
    assert_eq!(value.date_time.second(), 0);
    assert!(picker.set_time(25, 0).is_err());
}

#[test]
fn twelve_hour_controls_drive_selection() {
    let mut picker = DateTimePicker::new(PickerConfig {
        value: Some("2026-02-14T09:30".into()),
        use_24_hour: false,
        ..PickerConfig::default()
    })
    .unwrap();

    let events = picker.toggle_period().unwrap();
    assert_eq!(change(&events).date_time.hour(), 21);
    assert_eq!(picker.time_picker().display_hour(), 9);

    let events = picker.select_hour(11).unwrap();
    assert_eq!(change(&events).date_time.hour(), 23);

    let events = picker.select_minute(5).unwrap();
    assert_eq!(change(&events).formatted, "Feb 14, 2026 23:05");
}

#[test]
fn disabled_dates_are_inert() {
    let mut picker = DateTimePicker::new(PickerConfig {
        min_date: Some("2026-01-10".into()),
        max_date: Some("2026-01-20".into()),
        ..PickerConfig::default()
    })
    .unwrap();

    assert!(picker.is_date_disabled(date(2026, 1, 9)));
    assert!(!picker.is_date_disabled(date(2026, 1, 10)));
    assert!(picker.is_date_disabled(date(2026, 1, 21)));
    assert!(picker.click_date(date(2026, 1, 9)).is_empty());
    assert!(picker.selected().is_none());
    assert_eq!(picker.click_date(date(2026, 1, 20)).len(), 1);
}

#[test]
fn grid_reflects_widget_state() {
    let mut picker = DateTimePicker::new(PickerConfig {
        value: Some("2026-01-15T10:00".into()),
        min_date: Some("2026-01-10".into()),
        holidays: chronos_core::default_holidays_for_timezone("Asia/Kolkata"),
        ..PickerConfig::default()
    })
    .unwrap();

    let weeks = picker.grid().unwrap();
    let cells: Vec<_> = weeks.iter().flatten().collect();
    let find = |d: NaiveDate| cells.iter().find(|c| c.date() == d).unwrap();
    assert!(find(date(2026, 1, 15)).is_selected);
    assert!(find(date(2026, 1, 9)).is_disabled);
    assert_eq!(find(date(2026, 1, 26)).holiday.as_ref().unwrap().name, "Republic Day");

    picker.next_month();
    let weeks = picker.grid().unwrap();
    assert!(weeks.iter().flatten().all(|c| !c.is_selected));
}

// ---------------------------------------------------------------------------
// Prop sync
// ---------------------------------------------------------------------------

#[test]
fn external_value_replaces_selection() {
    let mut picker = single(Some("2026-02-14T14:30"));
    picker.sync_value(Some("2026-05-01T08:00".into()));
    assert_eq!(picker.selected().unwrap().month(), 5);
    assert_eq!(picker.time_picker().display_hour(), 8);

    picker.sync_value(None);
    assert!(picker.selected().is_none());
    assert_eq!(picker.display_value(), "");
}

#[test]
fn malformed_external_value_means_no_selection() {
    let mut picker = single(Some("yesterday-ish"));
    assert!(picker.selected().is_none());
    picker.sync_value(Some("2026-13-45".into()));
    assert!(picker.selected().is_none());
}

#[test]
fn range_sync_in_single_mode_is_ignored() {
    let mut picker = single(None);
    picker.sync_range(Some("2026-03-01".into()), Some("2026-03-05".into()));
    assert_eq!(picker.range(), RangeSelection::Empty);
}

// ---------------------------------------------------------------------------
// Range selection
// ---------------------------------------------------------------------------

#[test]
fn two_clicks_commit_a_range_with_nights() {
    let mut picker = range_picker();
    picker.toggle();

    let pending = picker.click_date(date(2026, 3, 1));
    assert_eq!(range_change(&pending).nights, 0);
    assert_eq!(picker.display_value(), "");

    let committed = picker.click_date(date(2026, 3, 5));
    let value = range_change(&committed);
    assert_eq!(value.start.iso, "2026-03-01T00:00:00.000+05:30");
    assert_eq!(value.end.iso, "2026-03-05T00:00:00.000+05:30");
    assert_eq!(value.nights, 4);
    assert!(picker.is_open(), "range mode has no auto-close");
    assert_eq!(picker.display_value(), "1 Mar 2026 \u{2013} 5 Mar 2026");

    let summary = picker.range_summary().unwrap();
    assert_eq!(summary.nights, 4);
}

#[test]
fn click_after_commit_starts_over() {
    let mut picker = range_picker();
    picker.click_date(date(2026, 3, 1));
    picker.click_date(date(2026, 3, 5));
    picker.click_date(date(2026, 3, 20));

    assert_eq!(picker.range(), RangeSelection::Pending { anchor: date(2026, 3, 20) });
    let weeks = picker.grid().unwrap();
    assert!(weeks.iter().flatten().all(|c| !c.is_in_range));
    assert!(picker.range_summary().is_none());
}

#[test]
fn range_value_sync_commits_or_pends() {
    let mut picker = range_picker();
    picker.sync_range(Some("2026-04-10".into()), Some("2026-04-12".into()));
    assert!(picker.range().is_committed());

    picker.sync_range(Some("2026-04-10".into()), Some("2026-04-10".into()));
    assert_eq!(picker.range(), RangeSelection::Pending { anchor: date(2026, 4, 10) });

    picker.sync_range(None, None);
    assert!(picker.range().is_empty());
}

#[test]
fn time_controls_are_hidden_in_range_mode() {
    let mut picker = range_picker();
    assert!(!picker.shows_time_picker());
    assert!(picker.select_hour(3).unwrap().is_empty());
    assert!(picker.set_time(3, 0).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Timezone
// ---------------------------------------------------------------------------

#[test]
fn timezone_change_rezones_same_instant() {
    let mut picker = DateTimePicker::new(PickerConfig {
        value: Some("2026-02-14T14:30".into()),
        show_timezone_selector: true,
        ..PickerConfig::default()
    })
    .unwrap();
    let before = picker.selected().unwrap().timestamp_millis();

    let events = picker.change_timezone("America/New_York").unwrap();
    let value = change(&events);
    assert_eq!(value.timestamp, before);
    assert_eq!(value.iso, "2026-02-14T04:00:00.000-05:00");
    assert_eq!(picker.timezone(), "America/New_York");
    assert_eq!(picker.timezone_selector().value(), "America/New_York");
    assert_eq!(picker.time_picker().display_hour(), 4);
}

#[test]
fn invalid_timezone_change_leaves_state_alone() {
    let mut picker = single(Some("2026-02-14T14:30"));
    let err = picker.change_timezone("Atlantis/Capital").unwrap_err();
    assert!(matches!(err, PickerError::InvalidTimezone(_)));
    assert_eq!(picker.timezone(), "Asia/Kolkata");
    assert_eq!(picker.selected().unwrap().hour(), 14);
}

#[test]
fn unknown_config_timezone_degrades_then_recovers() {
    let mut picker = DateTimePicker::new(PickerConfig {
        timezone: "Invalid/Zone".to_string(),
        value: Some("2026-02-14T14:30".into()),
        ..PickerConfig::default()
    })
    .unwrap();

    assert!(picker.is_degraded());
    assert_eq!(picker.display_value(), "");
    assert!(matches!(picker.grid(), Err(PickerError::InvalidTimezone(_))));
    assert!(picker.click_date(date(2026, 2, 14)).is_empty());

    let events = picker.change_timezone("UTC").unwrap();
    assert!(!picker.is_degraded());
    assert_eq!(change(&events).iso, "2026-02-14T14:30:00.000Z");
}

#[test]
fn timezone_options_include_custom_current_zone() {
    let picker = DateTimePicker::new(PickerConfig {
        timezone: "Africa/Nairobi".to_string(),
        ..PickerConfig::default()
    })
    .unwrap();
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let options = picker.timezone_selector().options(at);
    assert_eq!(options.len(), 13);
    let last = options.last().unwrap();
    assert_eq!(last.value, "Africa/Nairobi");
    assert!(last.selected);
    assert_eq!(last.offset, "UTC+3");
}

// ---------------------------------------------------------------------------
// View navigation
// ---------------------------------------------------------------------------

#[test]
fn navigation_wraps_years() {
    let mut picker = single(Some("2026-01-15"));
    picker.prev_month();
    assert_eq!((picker.view().year, picker.view().month), (2025, 12));
    picker.next_month();
    picker.next_month();
    assert_eq!((picker.view().year, picker.view().month), (2026, 2));

    picker.set_view_year(2030);
    picker.set_view_month(7).unwrap();
    assert_eq!((picker.view().year, picker.view().month), (2030, 7));
    assert!(matches!(picker.set_view_month(13), Err(PickerError::InvalidMonth(13))));
}

#[test]
fn navigation_stops_at_representable_years() {
    let mut picker = single(Some("2026-12-15"));
    picker.set_view_year(i32::MAX);
    assert_eq!(picker.view().year, NaiveDate::MAX.year());
    picker.next_month();
    assert_eq!((picker.view().year, picker.view().month), (NaiveDate::MAX.year(), 12));

    picker.set_view_month(1).unwrap();
    picker.set_view_year(i32::MIN);
    assert_eq!(picker.view().year, NaiveDate::MIN.year());
    picker.prev_month();
    assert_eq!((picker.view().year, picker.view().month), (NaiveDate::MIN.year(), 1));
    picker.next_month();
    assert_eq!((picker.view().year, picker.view().month), (NaiveDate::MIN.year(), 2));
}

#[test]
fn events_serialize_with_type_tags() {
    let json = serde_json::to_value(PickerEvent::Closed { restore_focus: true }).unwrap();
    assert_eq!(json["type"], "closed");
    assert_eq!(json["payload"]["restoreFocus"], true);

    let mut picker = single(None);
    let events = picker.click_date(date(2026, 2, 14));
    let json = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(json["type"], "change");
    assert_eq!(json["payload"]["formatted"], "Feb 14, 2026 00:00");
    assert_eq!(json["payload"]["dateTime"]["timezone"], "Asia/Kolkata");
}
