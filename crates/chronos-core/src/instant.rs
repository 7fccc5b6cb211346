//! Timezone-aware instants and the external date-value union.
//!
//! [`ZonedInstant`] pairs an absolute point in time with an IANA zone. Every
//! calendar field (year, month, day, hour, weekday, offset) is derived from
//! that pair on demand, so the fields can never drift out of sync with the
//! instant they describe.

use std::fmt;

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    SecondsFormat, TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{PickerError, Result};
use crate::format;
use crate::timezone::parse_timezone;

/// An immutable point in time viewed from a specific IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedInstant {
    inner: DateTime<Tz>,
}

impl ZonedInstant {
    /// View a UTC instant from `zone`.
    pub fn from_utc(instant: DateTime<Utc>, zone: &str) -> Result<Self> {
        Ok(Self::from_utc_tz(instant, parse_timezone(zone)?))
    }

    pub fn from_utc_tz(instant: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            inner: instant.with_timezone(&tz),
        }
    }

    /// Build from Unix epoch milliseconds.
    pub fn from_millis(millis: i64, zone: &str) -> Result<Self> {
        Self::from_millis_tz(millis, parse_timezone(zone)?)
    }

    pub fn from_millis_tz(millis: i64, tz: Tz) -> Result<Self> {
        let utc = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| PickerError::InvalidDate(format!("timestamp {millis} out of range")))?;
        Ok(Self::from_utc_tz(utc, tz))
    }

    /// Parse an ISO 8601 string relative to `zone`.
    ///
    /// Strings carrying an offset (`2026-01-26T10:00:00+05:30`, `2026-01-26T10:00Z`)
    /// keep their absolute instant and are re-zoned. Strings without one (`2026-01-26`,
    /// `2026-01-26T10:00`) are wall-clock times in `zone`.
    pub fn parse(text: &str, zone: &str) -> Result<Self> {
        Self::parse_tz(text, parse_timezone(zone)?)
    }

    pub fn parse_tz(text: &str, tz: Tz) -> Result<Self> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::from_utc_tz(dt.with_timezone(&Utc), tz));
        }

        // ISO 8601 also allows an offset after minutes-only times.
        let with_offset = match text.strip_suffix(['Z', 'z']) {
            Some(rest) => format!("{rest}+00:00"),
            None => text.to_string(),
        };
        for pattern in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"] {
            if let Ok(dt) = DateTime::parse_from_str(&with_offset, pattern) {
                return Ok(Self::from_utc_tz(dt.with_timezone(&Utc), tz));
            }
        }

        const NAIVE_FORMATS: [&str; 3] =
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
        for pattern in NAIVE_FORMATS {
            if let Ok(local) = NaiveDateTime::parse_from_str(text, pattern) {
                return Self::at_local(tz, local);
            }
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| PickerError::InvalidDate(format!("'{text}': {e}")))
            .and_then(|date| Self::start_of_date(date, tz))
    }

    /// The current instant in `zone`.
    pub fn now(zone: &str) -> Result<Self> {
        Ok(Self::from_utc_tz(Utc::now(), parse_timezone(zone)?))
    }

    /// Resolve a wall-clock time in `tz`.
    ///
    /// Ambiguous times (clocks falling back) take the earlier instant. Times
    /// inside a gap (clocks springing forward) are pushed forward by the size
    /// of the gap, so 02:30 on a spring-forward night becomes 03:30.
    pub fn at_local(tz: Tz, local: NaiveDateTime) -> Result<Self> {
        let resolved = match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => local
                .checked_sub_signed(Duration::days(1))
                .and_then(|day_before| tz.from_local_datetime(&day_before).earliest())
                .and_then(|before| {
                    let offset = before.offset().fix().local_minus_utc();
                    local.checked_sub_signed(Duration::seconds(i64::from(offset)))
                })
                .map(|utc| tz.from_utc_datetime(&utc)),
        };
        resolved
            .map(|inner| Self { inner })
            .ok_or_else(|| {
                PickerError::InvalidDate(format!("{local} cannot be resolved in {}", tz.name()))
            })
    }

    /// Midnight (or the first existing instant) of `date` in `tz`.
    pub fn start_of_date(date: NaiveDate, tz: Tz) -> Result<Self> {
        Self::at_local(tz, date.and_time(NaiveTime::MIN))
    }

    pub fn tz(&self) -> Tz {
        self.inner.timezone()
    }

    /// IANA identifier of the zone this instant is viewed from.
    pub fn timezone(&self) -> &'static str {
        self.inner.timezone().name()
    }

    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    pub fn second(&self) -> u32 {
        self.inner.second()
    }

    pub fn weekday(&self) -> Weekday {
        self.inner.weekday()
    }

    /// Calendar date in this instant's zone.
    pub fn date(&self) -> NaiveDate {
        self.inner.date_naive()
    }

    pub fn time(&self) -> NaiveTime {
        self.inner.time()
    }

    /// Offset from UTC in seconds (east positive).
    pub fn offset_seconds(&self) -> i32 {
        self.inner.offset().fix().local_minus_utc()
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.inner.timestamp_millis()
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.inner.with_timezone(&Utc)
    }

    pub fn as_datetime(&self) -> &DateTime<Tz> {
        &self.inner
    }

    /// The same instant seen from another zone. Wall-clock fields change, the
    /// epoch value does not.
    pub fn with_zone(&self, zone: &str) -> Result<Self> {
        Ok(self.with_tz(parse_timezone(zone)?))
    }

    pub fn with_tz(&self, tz: Tz) -> Self {
        Self {
            inner: self.inner.with_timezone(&tz),
        }
    }

    /// Move to `date`, keeping this instant's wall-clock time of day.
    pub fn with_date(&self, date: NaiveDate) -> Result<Self> {
        Self::at_local(self.tz(), date.and_time(self.time()))
    }

    /// Replace the wall-clock time of day, keeping the date.
    pub fn with_time(&self, hour: u32, minute: u32, second: u32) -> Result<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or(PickerError::InvalidTime { hour, minute })?;
        Self::at_local(self.tz(), self.date().and_time(time))
    }

    pub fn start_of_day(&self) -> Result<Self> {
        Self::start_of_date(self.date(), self.tz())
    }

    /// Last millisecond of this instant's calendar day.
    pub fn end_of_day(&self) -> Result<Self> {
        let next = self
            .date()
            .succ_opt()
            .ok_or_else(|| PickerError::InvalidDate(format!("no day after {}", self.date())))?;
        let start_of_next = Self::start_of_date(next, self.tz())?;
        Ok(Self {
            inner: start_of_next.inner - Duration::milliseconds(1),
        })
    }

    /// ISO 8601 with millisecond precision and the zone's offset, e.g.
    /// `2026-02-14T10:30:00.000+05:30`.
    pub fn to_iso(&self) -> String {
        self.inner.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Render with a chrono `strftime` pattern.
    pub fn format(&self, pattern: &str) -> Result<String> {
        format::render(self, pattern)
    }

    /// True when both instants fall on the same calendar date in this zone.
    pub fn same_day(&self, other: &ZonedInstant) -> bool {
        self.date() == other.with_tz(self.tz()).date()
    }
}

impl PartialEq for ZonedInstant {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.tz() == other.tz()
    }
}

impl Eq for ZonedInstant {}

impl fmt::Display for ZonedInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl Serialize for ZonedInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ZonedInstant", 3)?;
        state.serialize_field("iso", &self.to_iso())?;
        state.serialize_field("timezone", self.timezone())?;
        state.serialize_field("timestamp", &self.timestamp_millis())?;
        state.end()
    }
}

/// A date value supplied from outside the widget: epoch milliseconds, an ISO
/// string, or an instant that is already zoned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Millis(i64),
    Text(String),
    #[serde(skip_deserializing)]
    Instant(ZonedInstant),
}

impl DateInput {
    /// Interpret this value in `tz`.
    pub fn resolve(&self, tz: Tz) -> Result<ZonedInstant> {
        match self {
            DateInput::Millis(ms) => ZonedInstant::from_millis_tz(*ms, tz),
            DateInput::Text(text) => ZonedInstant::parse_tz(text, tz),
            DateInput::Instant(instant) => Ok(instant.with_tz(tz)),
        }
    }
}

impl From<ZonedInstant> for DateInput {
    fn from(instant: ZonedInstant) -> Self {
        DateInput::Instant(instant)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl From<i64> for DateInput {
    fn from(millis: i64) -> Self {
        DateInput::Millis(millis)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(instant: DateTime<Utc>) -> Self {
        DateInput::Millis(instant.timestamp_millis())
    }
}
