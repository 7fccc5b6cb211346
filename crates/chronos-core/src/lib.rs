//! # chronos-core
//!
//! Headless, timezone-aware date-time picker.
//!
//! Everything a calendar popover needs except pixels: month grids with
//! selection, range, bound and holiday state per day; a two-click range state
//! machine; hour/minute/period and timezone sub-widgets; and the root widget
//! that owns the state and emits change events. Timezone arithmetic is
//! delegated to `chrono-tz`, formatting to chrono's `strftime` engine.
//!
//! ## Modules
//!
//! - [`instant`] — `ZonedInstant` (instant + IANA zone) and external `DateInput` values
//! - [`timezone`] — Zone validation, the curated zone list, offset labels
//! - [`calendar`] — Month grid generation
//! - [`range`] — Range selection state machine and night counting
//! - [`holidays`] — Holiday entries, built-in data, per-grid lookup index
//! - [`time_picker`] — Hour/minute/AM-PM sub-widget
//! - [`timezone_selector`] — Timezone dropdown sub-widget
//! - [`format`] — Display patterns
//! - [`picker`] — The root widget
//! - [`dismiss`] — Open-scoped dismiss listeners
//! - [`value`] — Change-notification payloads
//! - [`error`] — Error types

pub mod calendar;
pub mod dismiss;
pub mod error;
pub mod format;
pub mod holidays;
pub mod instant;
pub mod picker;
pub mod range;
pub mod time_picker;
pub mod timezone;
pub mod timezone_selector;
pub mod value;

pub use calendar::{generate_month, generate_month_at, CalendarCell, GridOptions, Week};
pub use error::PickerError;
pub use holidays::{default_holidays_for_timezone, Holiday, HolidayEntry, HolidayKind};
pub use instant::{DateInput, ZonedInstant};
pub use picker::{DateTimePicker, PickerConfig, PickerEvent, SelectionMode};
pub use range::{nights_between, RangeSelection};
pub use timezone::{convert_to_timezone, now_in_timezone, COMMON_TIMEZONES, DEFAULT_TIMEZONE};
pub use value::{DateTimeValue, RangeValue};
