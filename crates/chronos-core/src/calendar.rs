//! Month grid generation.
//!
//! Produces the full weeks overlapping a month, one [`CalendarCell`] per day,
//! with selection, range, bound and holiday state already applied. The grid is
//! a pure function of its inputs and is cheap enough to recompute on every
//! render.

use chrono::{Datelike, Days, Month, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{PickerError, Result};
use crate::format::{self, ARIA_DATE_FORMAT};
use crate::holidays::{Holiday, HolidayEntry, HolidayIndex};
use crate::instant::ZonedInstant;
use crate::range::RangeSelection;
use crate::timezone::parse_timezone;

/// One day in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Start of this day in the grid's timezone.
    pub instant: ZonedInstant,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
    pub is_in_range: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub holiday: Option<Holiday>,
}

impl CalendarCell {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Accessible name, e.g. `February 14, 2026`.
    pub fn aria_label(&self) -> String {
        format::render(&self.instant, ARIA_DATE_FORMAT).unwrap_or_else(|_| self.date.to_string())
    }

    /// `aria-current` value: `"date"` for today.
    pub fn aria_current(&self) -> Option<&'static str> {
        self.is_today.then_some("date")
    }
}

/// Seven consecutive days starting on the grid's week start.
pub type Week = [CalendarCell; 7];

/// Optional state applied to each generated cell.
#[derive(Debug, Clone, Default)]
pub struct GridOptions<'a> {
    /// Single-mode selection.
    pub selected: Option<ZonedInstant>,
    /// Earliest selectable day (inclusive).
    pub min: Option<ZonedInstant>,
    /// Latest selectable day (inclusive).
    pub max: Option<ZonedInstant>,
    pub range_start: Option<ZonedInstant>,
    pub range_end: Option<ZonedInstant>,
    pub holidays: &'a [HolidayEntry],
    /// First column of the grid; Sunday when unset.
    pub week_start: Option<Weekday>,
}

/// Generate the grid for `month` (1-12) of `year`, viewed from `zone`.
///
/// # Errors
/// Returns `PickerError::InvalidMonth` for a month outside 1-12,
/// `PickerError::InvalidTimezone` for an unknown zone, and
/// `PickerError::InvalidDate` when the year is outside the supported range.
pub fn generate_month(
    year: i32,
    month: u32,
    zone: &str,
    options: &GridOptions<'_>,
) -> Result<Vec<Week>> {
    let today = ZonedInstant::now(zone)?.date();
    generate_month_at(year, month, zone, options, today)
}

/// [`generate_month`] with an explicit "today" in `zone`.
pub fn generate_month_at(
    year: i32,
    month: u32,
    zone: &str,
    options: &GridOptions<'_>,
    today: NaiveDate,
) -> Result<Vec<Week>> {
    if !(1..=12).contains(&month) {
        return Err(PickerError::InvalidMonth(month));
    }
    let tz = parse_timezone(zone)?;
    let week_start = options.week_start.unwrap_or(Weekday::Sun);

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| PickerError::InvalidDate(format!("{year:04}-{month:02}-01")))?;
    let last = last_day_of_month(first)?;
    // The padded weeks can run past the representable date range.
    let grid_start = first
        .week(week_start)
        .checked_first_day()
        .ok_or_else(|| PickerError::InvalidDate(format!("week before {first} out of range")))?;
    let grid_end = last
        .week(week_start)
        .checked_last_day()
        .ok_or_else(|| PickerError::InvalidDate(format!("week after {last} out of range")))?;
    let week_count = ((grid_end - grid_start).num_days() as usize + 1) / 7;

    // Bounds and selections are compared as calendar dates in the grid's zone.
    let in_zone = |instant: &Option<ZonedInstant>| instant.map(|i| i.with_tz(tz).date());
    let selected = in_zone(&options.selected);
    let min = in_zone(&options.min);
    let max = in_zone(&options.max);
    let range_mode = options.range_start.is_some() || options.range_end.is_some();
    let range =
        RangeSelection::from_bounds(in_zone(&options.range_start), in_zone(&options.range_end));
    let holidays = HolidayIndex::build(options.holidays, tz);

    let mut weeks = Vec::with_capacity(week_count);
    let mut cursor = grid_start;
    for _ in 0..week_count {
        let mut days = [cursor; 7];
        for (offset, day) in days.iter_mut().enumerate() {
            *day = cursor.checked_add_days(Days::new(offset as u64)).ok_or_else(|| {
                PickerError::InvalidDate(format!("no day {offset} after {cursor}"))
            })?;
        }
        let cells = days.map(|date| -> Result<CalendarCell> {
            let mut cell = CalendarCell {
                date,
                instant: ZonedInstant::start_of_date(date, tz)?,
                in_current_month: date.month() == month && date.year() == year,
                is_today: date == today,
                is_selected: false,
                is_disabled: min.is_some_and(|m| date < m) || max.is_some_and(|m| date > m),
                is_in_range: false,
                is_range_start: false,
                is_range_end: false,
                holiday: holidays.get(date).cloned(),
            };
            if range_mode {
                apply_range(&mut cell, date, range);
            } else {
                cell.is_selected = selected == Some(date);
            }
            Ok(cell)
        });
        let [a, b, c, d, e, f, g] = cells;
        weeks.push([a?, b?, c?, d?, e?, f?, g?]);
        // The last week may end on the final representable date.
        match days[6].succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }

    Ok(weeks)
}

fn apply_range(cell: &mut CalendarCell, date: NaiveDate, range: RangeSelection) {
    match range {
        RangeSelection::Empty => {}
        RangeSelection::Pending { anchor } => {
            if date == anchor {
                cell.is_selected = true;
                cell.is_range_start = true;
            }
        }
        RangeSelection::Committed { start, end } => {
            cell.is_in_range = start <= date && date <= end;
            cell.is_range_start = date == start;
            cell.is_range_end = date == end;
            cell.is_selected = cell.is_range_start || cell.is_range_end;
        }
    }
}

fn last_day_of_month(first: NaiveDate) -> Result<NaiveDate> {
    shift_month(first.year(), first.month(), 1)
        .and_then(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| PickerError::InvalidDate(format!("end of month for {first}")))
}

/// Move `delta` months from `(year, month)`, carrying across years.
///
/// Returns `None` when the result does not fit in an `i32` year.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    Some((year, index.rem_euclid(12) as u32 + 1))
}

/// Short weekday names in grid column order.
pub fn weekday_names(week_start: Weekday) -> [&'static str; 7] {
    let mut day = week_start;
    std::array::from_fn(|_| {
        let name = short_weekday(day);
        day = day.succ();
        name
    })
}

fn short_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Full month names, January first.
pub fn month_names() -> [&'static str; 12] {
    let mut month = Month::January;
    std::array::from_fn(|_| {
        let name = month.name();
        month = month.succ();
        name
    })
}

/// Years offered by the year dropdown: `center` plus and minus ten.
pub fn year_options(center: i32) -> Vec<i32> {
    (center - 10..=center + 10).collect()
}
