//! Payloads carried by the widget's change notifications.

use serde::Serialize;

use crate::instant::ZonedInstant;

/// A selected instant in every shape a consumer might want.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeValue {
    /// ISO 8601 string with offset.
    pub iso: String,
    /// Rendered with the configured date and time patterns.
    pub formatted: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub date_time: ZonedInstant,
}

/// A date range as reported to the range-change callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeValue {
    pub start: DateTimeValue,
    pub end: DateTimeValue,
    pub nights: i64,
}
