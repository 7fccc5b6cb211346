//! The date-time picker root widget.
//!
//! [`DateTimePicker`] owns every piece of mutable state (selection, view month,
//! open flag, active timezone) and drives the time and timezone sub-widgets.
//! The host feeds it configuration and UI input; each handler returns the
//! [`PickerEvent`]s the host should forward to its change callbacks.
//!
//! External values are synchronised one way: a new `value`/`rangeValue` from
//! the host replaces the internal selection, and user interaction owns the
//! selection between syncs.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, GridOptions, Week};
use crate::dismiss::{DismissListeners, ListenerKind};
use crate::error::{PickerError, Result};
use crate::format::{
    self, DisplayFormat, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT, RANGE_DATE_FORMAT,
};
use crate::holidays::HolidayEntry;
use crate::instant::{DateInput, ZonedInstant};
use crate::range::RangeSelection;
use crate::time_picker::TimePicker;
use crate::timezone::{parse_timezone, DEFAULT_TIMEZONE};
use crate::timezone_selector::TimezoneSelector;
use crate::value::{DateTimeValue, RangeValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Calendar and sidebar stacked, or side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Externally controlled range bounds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RangeInput {
    pub start: Option<DateInput>,
    pub end: Option<DateInput>,
}

/// Widget configuration, deserializable from the host's props object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    pub value: Option<DateInput>,
    pub range_value: Option<RangeInput>,
    /// IANA zone the widget starts in.
    pub timezone: String,
    /// chrono `strftime` pattern for the date part.
    pub date_format: String,
    /// chrono `strftime` pattern for the time part.
    pub time_format: String,
    pub min_date: Option<DateInput>,
    pub max_date: Option<DateInput>,
    pub placeholder: String,
    pub disabled: bool,
    /// Show the time-of-day picker. Without it, picking a date closes the popover.
    pub show_time: bool,
    pub use_24_hour: bool,
    pub aria_label: String,
    pub show_timezone_selector: bool,
    pub theme: Theme,
    pub orientation: Orientation,
    pub selection_mode: SelectionMode,
    pub holidays: Vec<HolidayEntry>,
    pub week_start: Option<Weekday>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            value: None,
            range_value: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            min_date: None,
            max_date: None,
            placeholder: "Select date and time".to_string(),
            disabled: false,
            show_time: true,
            use_24_hour: true,
            aria_label: "Date and time picker".to_string(),
            show_timezone_selector: false,
            theme: Theme::Light,
            orientation: Orientation::Portrait,
            selection_mode: SelectionMode::Single,
            holidays: Vec::new(),
            week_start: None,
        }
    }
}

/// Notifications emitted by the widget's handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum PickerEvent {
    Change(DateTimeValue),
    RangeChange(RangeValue),
    Opened,
    /// `restore_focus` asks the host to focus the trigger control again.
    Closed {
        #[serde(rename = "restoreFocus")]
        restore_focus: bool,
    },
}

/// Years the calendar view can show.
fn view_years() -> RangeInclusive<i32> {
    NaiveDate::MIN.year()..=NaiveDate::MAX.year()
}

/// The month currently shown by the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub year: i32,
    pub month: u32,
}

impl ViewState {
    fn of(instant: &ZonedInstant) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }
}

/// ARIA attributes for the trigger input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerAria {
    pub label: String,
    pub expanded: bool,
    pub has_popup: &'static str,
    pub role: &'static str,
    pub disabled: bool,
}

/// Header shown above the calendar for a committed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeSummary {
    pub nights: i64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct DateTimePicker {
    config: PickerConfig,
    format: DisplayFormat,
    timezone: String,
    /// `None` while the active zone is unrecognised; the widget renders unset.
    tz: Option<Tz>,
    selected: Option<ZonedInstant>,
    range: RangeSelection,
    view: ViewState,
    open: bool,
    time_picker: TimePicker,
    timezone_selector: TimezoneSelector,
    dismiss: DismissListeners,
}

impl DateTimePicker {
    /// Build the widget from its configuration.
    ///
    /// # Errors
    /// Returns `PickerError::InvalidFormat` when either display pattern is not a
    /// valid chrono pattern. An unknown timezone or malformed value does not
    /// fail construction; the widget starts with no selection instead.
    pub fn new(config: PickerConfig) -> Result<Self> {
        let format = DisplayFormat::new(config.date_format.as_str(), config.time_format.as_str())?;
        let tz = match parse_timezone(&config.timezone) {
            Ok(tz) => Some(tz),
            Err(e) => {
                warn!("picker starts without a usable timezone: {}", e);
                None
            }
        };

        let mut picker = Self {
            timezone: config.timezone.clone(),
            format,
            tz,
            selected: None,
            range: RangeSelection::Empty,
            view: ViewState::of(&ZonedInstant::from_utc_tz(Utc::now(), tz.unwrap_or(Tz::UTC))),
            open: false,
            time_picker: TimePicker::new(config.use_24_hour, None),
            timezone_selector: TimezoneSelector::new(config.timezone.clone()),
            dismiss: DismissListeners::default(),
            config,
        };

        match picker.config.selection_mode {
            SelectionMode::Single => {
                picker.selected = picker.resolve(picker.config.value.as_ref());
                picker.time_picker.sync(picker.selected.as_ref());
            }
            SelectionMode::Range => {
                picker.range = picker.resolve_range(picker.config.range_value.as_ref());
            }
        }
        if let Some(anchor) = picker.selected.or_else(|| picker.range_start_instant()) {
            picker.view = ViewState::of(&anchor);
        }
        Ok(picker)
    }

    // -----------------------------------------------------------------------
    // Prop sync
    // -----------------------------------------------------------------------

    /// Apply a new external `value`. Ignored in range mode.
    pub fn sync_value(&mut self, value: Option<DateInput>) {
        if self.config.selection_mode != SelectionMode::Single {
            debug!("ignoring single value sync in range mode");
            return;
        }
        self.config.value = value;
        self.selected = self.resolve(self.config.value.as_ref());
        self.time_picker.sync(self.selected.as_ref());
    }

    /// Apply new external range bounds. Ignored in single mode.
    pub fn sync_range(&mut self, start: Option<DateInput>, end: Option<DateInput>) {
        if self.config.selection_mode != SelectionMode::Range {
            debug!("ignoring range sync in single mode");
            return;
        }
        self.config.range_value = Some(RangeInput { start, end });
        self.range = self.resolve_range(self.config.range_value.as_ref());
    }

    /// Replace the selectable bounds.
    pub fn set_bounds(&mut self, min: Option<DateInput>, max: Option<DateInput>) {
        self.config.min_date = min;
        self.config.max_date = max;
    }

    pub fn set_holidays(&mut self, holidays: Vec<HolidayEntry>) {
        self.config.holidays = holidays;
    }

    /// Enable or disable the widget. Disabling closes an open popover.
    pub fn set_disabled(&mut self, disabled: bool) -> Vec<PickerEvent> {
        self.config.disabled = disabled;
        if disabled {
            self.close(false)
        } else {
            Vec::new()
        }
    }

    // -----------------------------------------------------------------------
    // Open / close
    // -----------------------------------------------------------------------

    /// Click on the trigger control.
    pub fn toggle(&mut self) -> Vec<PickerEvent> {
        if self.config.disabled {
            return Vec::new();
        }
        if self.open {
            self.close(false)
        } else {
            self.open = true;
            self.dismiss.register();
            debug!("picker opened");
            vec![PickerEvent::Opened]
        }
    }

    /// Key-press on the focused trigger: Enter and Space toggle the popover.
    pub fn handle_trigger_key(&mut self, key: &str) -> Vec<PickerEvent> {
        match key {
            "Enter" | " " => self.toggle(),
            _ => Vec::new(),
        }
    }

    /// Escape pressed while the dismiss listeners are live.
    pub fn handle_escape(&mut self) -> Vec<PickerEvent> {
        if !self.dismiss.is_active(ListenerKind::Escape) {
            return Vec::new();
        }
        self.close(true)
    }

    /// Pointer-down outside the widget while the dismiss listeners are live.
    pub fn handle_outside_pointer(&mut self) -> Vec<PickerEvent> {
        if !self.dismiss.is_active(ListenerKind::OutsidePointer) {
            return Vec::new();
        }
        self.close(false)
    }

    fn close(&mut self, restore_focus: bool) -> Vec<PickerEvent> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        self.dismiss.cleanup();
        if self.timezone_selector.is_expanded() {
            self.timezone_selector.toggle();
        }
        debug!("picker closed (restore_focus={restore_focus})");
        vec![PickerEvent::Closed { restore_focus }]
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Click on the day cell for `date`. Disabled days are ignored.
    pub fn click_date(&mut self, date: NaiveDate) -> Vec<PickerEvent> {
        let Some(tz) = self.tz else {
            return Vec::new();
        };
        if self.config.disabled || self.is_date_disabled(date) {
            debug!("ignoring click on disabled date {date}");
            return Vec::new();
        }
        match self.config.selection_mode {
            SelectionMode::Single => self.select_single(date, tz),
            SelectionMode::Range => self.select_range(date, tz),
        }
    }

    fn select_single(&mut self, date: NaiveDate, tz: Tz) -> Vec<PickerEvent> {
        // A new date keeps the time of day already chosen.
        let picked = match self.selected {
            Some(previous) => ZonedInstant::at_local(tz, date.and_time(previous.time())),
            None => ZonedInstant::start_of_date(date, tz),
        };
        let picked = match picked {
            Ok(picked) => picked,
            Err(e) => {
                warn!("cannot select {date}: {e}");
                return Vec::new();
            }
        };

        self.selected = Some(picked);
        self.view = ViewState::of(&picked);
        self.time_picker.sync(Some(&picked));
        debug!("selected {}", picked);

        let mut events: Vec<PickerEvent> = self.change_event(&picked).into_iter().collect();
        if !self.config.show_time {
            events.extend(self.close(false));
        }
        events
    }

    fn select_range(&mut self, date: NaiveDate, tz: Tz) -> Vec<PickerEvent> {
        self.range = self.range.click(date, false);
        debug!("range is now {:?}", self.range);

        let (Some(start), Some(end)) = self.range.bounds() else {
            return Vec::new();
        };
        let values = ZonedInstant::start_of_date(start, tz).and_then(|start| {
            let end = ZonedInstant::start_of_date(end, tz)?;
            Ok((self.format.to_value(&start)?, self.format.to_value(&end)?))
        });
        match values {
            Ok((start, end)) => {
                self.view = ViewState::of(&start.date_time);
                vec![PickerEvent::RangeChange(RangeValue {
                    start,
                    end,
                    nights: self.range.nights(),
                })]
            }
            Err(e) => {
                warn!("cannot report range {start}..{end}: {e}");
                Vec::new()
            }
        }
    }

    /// Set the time of day (24-hour) on the selection, or on "now" when
    /// nothing is selected. Seconds reset to zero. Single mode only.
    pub fn set_time(&mut self, hour: u32, minute: u32) -> Result<Vec<PickerEvent>> {
        let Some(tz) = self.tz else {
            return Ok(Vec::new());
        };
        if self.config.selection_mode != SelectionMode::Single {
            return Ok(Vec::new());
        }
        let base = self
            .selected
            .unwrap_or_else(|| ZonedInstant::from_utc_tz(Utc::now(), tz));
        let updated = base.with_time(hour, minute, 0)?;
        self.selected = Some(updated);
        self.time_picker.sync(Some(&updated));
        Ok(self.change_event(&updated).into_iter().collect())
    }

    /// Hour dropdown change, in the time picker's display convention.
    pub fn select_hour(&mut self, display_hour: u32) -> Result<Vec<PickerEvent>> {
        if !self.shows_time_picker() {
            return Ok(Vec::new());
        }
        let time = self.time_picker.set_display_hour(display_hour)?;
        self.set_time(time.hour, time.minute)
    }

    pub fn select_minute(&mut self, minute: u32) -> Result<Vec<PickerEvent>> {
        if !self.shows_time_picker() {
            return Ok(Vec::new());
        }
        let time = self.time_picker.set_minute(minute)?;
        self.set_time(time.hour, time.minute)
    }

    /// AM/PM button.
    pub fn toggle_period(&mut self) -> Result<Vec<PickerEvent>> {
        if !self.shows_time_picker() {
            return Ok(Vec::new());
        }
        let time = self.time_picker.toggle_period();
        self.set_time(time.hour, time.minute)
    }

    // -----------------------------------------------------------------------
    // Timezone
    // -----------------------------------------------------------------------

    pub fn toggle_timezone_list(&mut self) {
        self.timezone_selector.toggle();
    }

    /// Switch the active zone.
    ///
    /// The selection keeps its absolute instant and its wall-clock fields move to
    /// the new zone. With no selection, the view jumps to the current month in
    /// the new zone.
    ///
    /// # Errors
    /// Returns `PickerError::InvalidTimezone` and leaves the widget unchanged
    /// when `zone` is unknown.
    pub fn change_timezone(&mut self, zone: &str) -> Result<Vec<PickerEvent>> {
        let tz = parse_timezone(zone)?;
        self.timezone_selector.select(zone)?;
        self.timezone = zone.to_string();
        self.tz = Some(tz);
        debug!("timezone changed to {zone}");

        if self.config.selection_mode == SelectionMode::Range {
            if self.range.is_empty() {
                self.range = self.resolve_range(self.config.range_value.as_ref());
            }
            self.view = ViewState::of(&ZonedInstant::from_utc_tz(Utc::now(), tz));
            return Ok(Vec::new());
        }

        let converted = match self.selected {
            Some(selected) => Some(selected.with_tz(tz)),
            // Recover a value that could not be read in the previous zone.
            None => self.resolve(self.config.value.as_ref()),
        };
        self.selected = converted;
        match converted {
            Some(converted) => {
                self.view = ViewState::of(&converted);
                self.time_picker.sync(Some(&converted));
                Ok(self.change_event(&converted).into_iter().collect())
            }
            None => {
                self.view = ViewState::of(&ZonedInstant::from_utc_tz(Utc::now(), tz));
                Ok(Vec::new())
            }
        }
    }

    // -----------------------------------------------------------------------
    // View navigation
    // -----------------------------------------------------------------------

    pub fn prev_month(&mut self) {
        self.shift_view(-1);
    }

    pub fn next_month(&mut self) {
        self.shift_view(1);
    }

    /// Navigation stops at the first and last representable months.
    fn shift_view(&mut self, delta: i32) {
        match calendar::shift_month(self.view.year, self.view.month, delta) {
            Some((year, month)) if view_years().contains(&year) => {
                self.view = ViewState { year, month };
            }
            _ => debug!("view cannot move {delta} months from {:?}", self.view),
        }
    }

    pub fn set_view_month(&mut self, month: u32) -> Result<()> {
        if !(1..=12).contains(&month) {
            return Err(PickerError::InvalidMonth(month));
        }
        self.view.month = month;
        Ok(())
    }

    /// Years outside the representable date range are clamped to it.
    pub fn set_view_year(&mut self, year: i32) {
        let years = view_years();
        self.view.year = year.clamp(*years.start(), *years.end());
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Day grid for the view month in the active zone.
    ///
    /// # Errors
    /// Returns `PickerError::InvalidTimezone` while the active zone is unknown.
    pub fn grid(&self) -> Result<Vec<Week>> {
        let tz = self.tz.ok_or_else(|| PickerError::InvalidTimezone(self.timezone.clone()))?;
        let (min, max) = self.bounds();
        let (range_start, range_end) = match self.range.bounds() {
            (Some(start), Some(end)) => (
                Some(ZonedInstant::start_of_date(start, tz)?),
                Some(ZonedInstant::start_of_date(end, tz)?),
            ),
            _ => (None, None),
        };
        let options = GridOptions {
            selected: self.selected,
            min,
            max,
            range_start,
            range_end,
            holidays: &self.config.holidays,
            week_start: self.config.week_start,
        };
        calendar::generate_month(self.view.year, self.view.month, tz.name(), &options)
    }

    pub fn weekday_names(&self) -> [&'static str; 7] {
        calendar::weekday_names(self.config.week_start.unwrap_or(Weekday::Sun))
    }

    /// Text for the trigger input; empty when nothing is selected.
    pub fn display_value(&self) -> String {
        if self.tz.is_none() {
            return String::new();
        }
        match self.config.selection_mode {
            SelectionMode::Single => self
                .selected
                .and_then(|selected| self.format.format(&selected, self.config.show_time).ok())
                .unwrap_or_default(),
            SelectionMode::Range => self.range_label().unwrap_or_default(),
        }
    }

    fn range_label(&self) -> Option<String> {
        let tz = self.tz?;
        let RangeSelection::Committed { start, end } = self.range else {
            return None;
        };
        let start = ZonedInstant::start_of_date(start, tz).ok()?;
        let end = ZonedInstant::start_of_date(end, tz).ok()?;
        Some(format!(
            "{} \u{2013} {}",
            format::render(&start, RANGE_DATE_FORMAT).ok()?,
            format::render(&end, RANGE_DATE_FORMAT).ok()?
        ))
    }

    pub fn range_summary(&self) -> Option<RangeSummary> {
        Some(RangeSummary {
            nights: self.range.nights(),
            label: self.range_label()?,
        })
    }

    pub fn trigger_aria(&self) -> TriggerAria {
        TriggerAria {
            label: self.config.aria_label.clone(),
            expanded: self.open,
            has_popup: "dialog",
            role: "combobox",
            disabled: self.config.disabled,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// True while the active zone is unknown and the widget renders unset.
    pub fn is_degraded(&self) -> bool {
        self.tz.is_none()
    }

    pub fn selected(&self) -> Option<&ZonedInstant> {
        self.selected.as_ref()
    }

    pub fn range(&self) -> RangeSelection {
        self.range
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active_listeners(&self) -> &[ListenerKind] {
        self.dismiss.active()
    }

    pub fn time_picker(&self) -> &TimePicker {
        &self.time_picker
    }

    pub fn timezone_selector(&self) -> &TimezoneSelector {
        &self.timezone_selector
    }

    pub fn shows_time_picker(&self) -> bool {
        self.config.selection_mode == SelectionMode::Single && self.config.show_time
    }

    pub fn shows_timezone_selector(&self) -> bool {
        self.config.selection_mode == SelectionMode::Single && self.config.show_timezone_selector
    }

    /// True when `date` falls outside the configured bounds in the active zone.
    pub fn is_date_disabled(&self, date: NaiveDate) -> bool {
        let (min, max) = self.bounds();
        min.is_some_and(|min| date < min.date()) || max.is_some_and(|max| date > max.date())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn resolve(&self, input: Option<&DateInput>) -> Option<ZonedInstant> {
        let tz = self.tz?;
        match input?.resolve(tz) {
            Ok(instant) => Some(instant),
            Err(e) => {
                warn!("treating external value as unset: {e}");
                None
            }
        }
    }

    fn resolve_range(&self, input: Option<&RangeInput>) -> RangeSelection {
        let Some(input) = input else {
            return RangeSelection::Empty;
        };
        let start = self.resolve(input.start.as_ref()).map(|s| s.date());
        let end = self.resolve(input.end.as_ref()).map(|e| e.date());
        RangeSelection::from_bounds(start, end)
    }

    fn range_start_instant(&self) -> Option<ZonedInstant> {
        let start = self.range.bounds().0?;
        ZonedInstant::start_of_date(start, self.tz?).ok()
    }

    fn bounds(&self) -> (Option<ZonedInstant>, Option<ZonedInstant>) {
        (
            self.resolve(self.config.min_date.as_ref()),
            self.resolve(self.config.max_date.as_ref()),
        )
    }

    fn change_event(&self, instant: &ZonedInstant) -> Option<PickerEvent> {
        match self.format.to_value(instant) {
            Ok(value) => Some(PickerEvent::Change(value)),
            Err(e) => {
                warn!("cannot format {instant}: {e}");
                None
            }
        }
    }
}
