//! Display formatting through chrono's `strftime` engine.
//!
//! Patterns are validated once, up front, so rendering a valid pattern later
//! cannot fail halfway through a render pass.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};

use crate::error::{PickerError, Result};
use crate::instant::ZonedInstant;
use crate::value::DateTimeValue;

/// Medium date, e.g. `Feb 14, 2026`.
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";
/// 24-hour clock, e.g. `09:05`.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";
/// Range endpoints in the trigger and summary, e.g. `14 Feb 2026`.
pub const RANGE_DATE_FORMAT: &str = "%-d %b %Y";
/// Day-cell accessible name, e.g. `February 14, 2026`.
pub const ARIA_DATE_FORMAT: &str = "%B %-d, %Y";

fn parse_pattern(pattern: &str) -> Result<Vec<Item<'_>>> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(PickerError::InvalidFormat(pattern.to_string()));
    }
    Ok(items)
}

/// Check that chrono can render `pattern`.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    parse_pattern(pattern).map(|_| ())
}

/// Render `instant` with `pattern`.
pub fn render(instant: &ZonedInstant, pattern: &str) -> Result<String> {
    let items = parse_pattern(pattern)?;
    let mut out = String::new();
    write!(out, "{}", instant.as_datetime().format_with_items(items.iter()))
        .map_err(|_| PickerError::InvalidFormat(pattern.to_string()))?;
    Ok(out)
}

/// The widget's configured date and time patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    date: String,
    time: String,
}

impl DisplayFormat {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Result<Self> {
        let (date, time) = (date.into(), time.into());
        validate_pattern(&date)?;
        validate_pattern(&time)?;
        Ok(Self { date, time })
    }

    pub fn date_pattern(&self) -> &str {
        &self.date
    }

    pub fn time_pattern(&self) -> &str {
        &self.time
    }

    /// Date alone, or date and time separated by a space.
    pub fn format(&self, instant: &ZonedInstant, include_time: bool) -> Result<String> {
        if include_time {
            render(instant, &format!("{} {}", self.date, self.time))
        } else {
            render(instant, &self.date)
        }
    }

    /// The change-notification payload for `instant`. The formatted string
    /// always carries both date and time.
    pub fn to_value(&self, instant: &ZonedInstant) -> Result<DateTimeValue> {
        Ok(DateTimeValue {
            iso: instant.to_iso(),
            formatted: self.format(instant, true)?,
            timestamp: instant.timestamp_millis(),
            date_time: *instant,
        })
    }
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_FORMAT.to_string(),
            time: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}
