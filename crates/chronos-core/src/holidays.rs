//! Holiday highlighting: external entries, built-in data, and the per-grid
//! lookup index.

use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::instant::ZonedInstant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HolidayKind {
    #[default]
    National,
    LongWeekend,
}

/// A holiday as supplied by the caller. `date` is an ISO date string read in
/// the grid's timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub date: Cow<'static, str>,
    pub name: Cow<'static, str>,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<HolidayKind>,
}

impl HolidayEntry {
    pub fn new(
        date: impl Into<String>,
        name: impl Into<String>,
        kind: Option<HolidayKind>,
    ) -> Self {
        Self {
            date: Cow::Owned(date.into()),
            name: Cow::Owned(name.into()),
            kind,
        }
    }

    const fn builtin(date: &'static str, name: &'static str, kind: HolidayKind) -> Self {
        Self {
            date: Cow::Borrowed(date),
            name: Cow::Borrowed(name),
            kind: Some(kind),
        }
    }
}

/// A holiday resolved against a timezone, as attached to a calendar cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: ZonedInstant,
    pub name: String,
    pub kind: HolidayKind,
}

/// Holidays keyed by calendar date in one timezone.
#[derive(Debug, Clone, Default)]
pub struct HolidayIndex {
    by_date: HashMap<NaiveDate, Holiday>,
}

impl HolidayIndex {
    /// Index `entries` by their calendar date in `tz`.
    ///
    /// Entries whose date cannot be parsed are skipped. When two entries land on
    /// the same date, a national holiday replaces a long-weekend one; otherwise
    /// the first entry is kept.
    pub fn build(entries: &[HolidayEntry], tz: Tz) -> Self {
        let mut by_date = HashMap::with_capacity(entries.len());
        for entry in entries {
            let date = match ZonedInstant::parse_tz(&entry.date, tz) {
                Ok(date) => date,
                Err(e) => {
                    warn!("skipping holiday '{}': {}", entry.name, e);
                    continue;
                }
            };
            let holiday = Holiday {
                date,
                name: entry.name.to_string(),
                kind: entry.kind.unwrap_or_default(),
            };
            match by_date.entry(date.date()) {
                Entry::Vacant(slot) => {
                    slot.insert(holiday);
                }
                Entry::Occupied(mut slot) => {
                    let upgrades = slot.get().kind == HolidayKind::LongWeekend
                        && holiday.kind == HolidayKind::National;
                    if upgrades {
                        slot.insert(holiday);
                    }
                }
            }
        }
        Self { by_date }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Holiday> {
        self.by_date.get(&date)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Timezone the built-in holiday data is published for.
pub const DEFAULT_HOLIDAYS_TIMEZONE: &str = "Asia/Kolkata";

// Festival dates marked tentative follow the lunar calendar and may move.
pub const INDIAN_HOLIDAYS_2026: [HolidayEntry; 8] = [
    HolidayEntry::builtin("2026-01-26", "Republic Day", HolidayKind::National),
    HolidayEntry::builtin("2026-03-19", "Holi", HolidayKind::National), // tentative
    HolidayEntry::builtin("2026-04-14", "Dr. Ambedkar Jayanti", HolidayKind::National),
    HolidayEntry::builtin("2026-08-15", "Independence Day", HolidayKind::National),
    HolidayEntry::builtin("2026-10-02", "Gandhi Jayanti", HolidayKind::National),
    HolidayEntry::builtin("2026-10-20", "Dussehra", HolidayKind::National), // tentative
    HolidayEntry::builtin("2026-11-08", "Diwali", HolidayKind::National),   // tentative
    HolidayEntry::builtin("2026-12-25", "Christmas", HolidayKind::National),
];

pub const LONG_WEEKENDS_2026: [HolidayEntry; 13] = [
    HolidayEntry::builtin("2026-01-24", "Long Weekend: Trip to Jaipur?", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-01-25", "Long Weekend: Fort Visit", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-01-26", "Republic Day", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-03-19", "Holi Celebration", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-03-20", "Take a leave! Beach time?", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-03-21", "Relaxing Saturday", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-03-22", "Lazy Sunday", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-08-15", "Independence Day", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-08-16", "Sunday Brunch", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-08-17", "Take a leave? Hills calling!", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-11-07", "Choti Diwali", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-11-08", "Diwali", HolidayKind::LongWeekend),
    HolidayEntry::builtin("2026-11-09", "Govardhan Puja (Take leave)", HolidayKind::LongWeekend),
];

/// Built-in national holidays and long-weekend suggestions for `zone`.
///
/// Data ships for Asia/Kolkata only; every other zone gets an empty list.
pub fn default_holidays_for_timezone(zone: &str) -> Vec<HolidayEntry> {
    if zone == DEFAULT_HOLIDAYS_TIMEZONE {
        INDIAN_HOLIDAYS_2026
            .iter()
            .chain(LONG_WEEKENDS_2026.iter())
            .cloned()
            .collect()
    } else {
        Vec::new()
    }
}

/// Parse a JSON array of `{date, name, kind?}` objects.
pub fn holidays_from_json(json: &str) -> Result<Vec<HolidayEntry>> {
    Ok(serde_json::from_str(json)?)
}
