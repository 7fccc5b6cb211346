//! Timezone dropdown state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::timezone::{format_timezone_offset, parse_timezone, timezone_label, COMMON_TIMEZONES};

/// A dropdown row: zone id, label and its current UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneChoice {
    pub value: String,
    pub label: String,
    pub offset: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneSelector {
    value: String,
    expanded: bool,
}

impl TimezoneSelector {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expanded: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn current_label(&self) -> &str {
        timezone_label(&self.value)
    }

    /// The curated zones, plus the current value when it is not one of them.
    /// Offsets are computed at `at`; zones that fail to resolve get an empty
    /// offset label.
    pub fn options(&self, at: DateTime<Utc>) -> Vec<ZoneChoice> {
        let mut choices: Vec<ZoneChoice> = COMMON_TIMEZONES
            .iter()
            .map(|option| self.choice(option.value, option.label, at))
            .collect();
        if !COMMON_TIMEZONES.iter().any(|option| option.value == self.value) {
            choices.push(self.choice(&self.value, &self.value, at));
        }
        choices
    }

    fn choice(&self, value: &str, label: &str, at: DateTime<Utc>) -> ZoneChoice {
        ZoneChoice {
            value: value.to_string(),
            label: label.to_string(),
            offset: format_timezone_offset(value, at).unwrap_or_default(),
            selected: value == self.value,
        }
    }

    /// Pick `zone` and collapse the list. Unknown zones are rejected and leave
    /// the selector untouched.
    pub fn select(&mut self, zone: &str) -> Result<&str> {
        parse_timezone(zone)?;
        self.value = zone.to_string();
        self.expanded = false;
        Ok(&self.value)
    }
}
