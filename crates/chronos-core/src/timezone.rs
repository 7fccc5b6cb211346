//! Timezone helpers over `chrono-tz`: validation, the curated zone list,
//! conversion of external values, and offset labels for display.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{PickerError, Result};
use crate::instant::{DateInput, ZonedInstant};

pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// One entry in the timezone dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimezoneOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Zones offered for quick selection.
pub const COMMON_TIMEZONES: [TimezoneOption; 12] = [
    TimezoneOption { value: "Asia/Kolkata", label: "India (IST)" },
    TimezoneOption { value: "America/New_York", label: "Eastern Time (ET)" },
    TimezoneOption { value: "America/Chicago", label: "Central Time (CT)" },
    TimezoneOption { value: "America/Denver", label: "Mountain Time (MT)" },
    TimezoneOption { value: "America/Los_Angeles", label: "Pacific Time (PT)" },
    TimezoneOption { value: "Europe/London", label: "London (GMT/BST)" },
    TimezoneOption { value: "Europe/Paris", label: "Central Europe (CET)" },
    TimezoneOption { value: "Asia/Dubai", label: "Dubai (GST)" },
    TimezoneOption { value: "Asia/Singapore", label: "Singapore (SGT)" },
    TimezoneOption { value: "Asia/Tokyo", label: "Tokyo (JST)" },
    TimezoneOption { value: "Australia/Sydney", label: "Sydney (AEDT)" },
    TimezoneOption { value: "UTC", label: "UTC" },
];

/// Parse an IANA identifier into a `chrono-tz` zone.
pub fn parse_timezone(zone: &str) -> Result<Tz> {
    zone.parse()
        .map_err(|_| PickerError::InvalidTimezone(zone.to_string()))
}

pub fn is_valid_timezone(zone: &str) -> bool {
    parse_timezone(zone).is_ok()
}

pub fn now_in_timezone(zone: &str) -> Result<ZonedInstant> {
    ZonedInstant::now(zone)
}

/// Interpret an external date value in `zone`.
///
/// # Errors
/// Returns `PickerError::InvalidTimezone` for an unknown zone and
/// `PickerError::InvalidDate` for a malformed or out-of-range value.
pub fn convert_to_timezone(value: &DateInput, zone: &str) -> Result<ZonedInstant> {
    value.resolve(parse_timezone(zone)?)
}

/// Label for a UTC offset given in seconds: `UTC+5:30`, `UTC-5`, `UTC+0`.
pub fn format_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let total_minutes = offset_seconds.unsigned_abs() / 60;
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);
    if minutes > 0 {
        format!("UTC{sign}{hours}:{minutes:02}")
    } else {
        format!("UTC{sign}{hours}")
    }
}

/// Offset label for `zone` as it stands at `at`.
pub fn format_timezone_offset(zone: &str, at: DateTime<Utc>) -> Result<String> {
    let instant = ZonedInstant::from_utc(at, zone)?;
    Ok(format_offset(instant.offset_seconds()))
}

/// Curated label for `zone`, or the zone id itself when it is not curated.
pub fn timezone_label(zone: &str) -> &str {
    COMMON_TIMEZONES
        .iter()
        .find(|option| option.value == zone)
        .map_or(zone, |option| option.label)
}
