//! WASM bindings for chronos-core.
//!
//! Exposes grid generation, timezone helpers and a stateful `DateTimePicker`
//! handle to JavaScript via `wasm-bindgen`. Complex values cross the boundary
//! as JSON strings; a component binds its props and DOM events to the handle
//! and forwards the returned events to its own callbacks.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p chronos-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/chronos-picker/wasm/ \
//!   target/wasm32-unknown-unknown/release/chronos_wasm.wasm
//! ```

use chrono::{NaiveDate, Utc, Weekday};
use chronos_core::calendar::{self, GridOptions};
use chronos_core::picker::{PickerConfig, PickerEvent, RangeInput};
use chronos_core::time_picker::Period;
use chronos_core::timezone::{self, COMMON_TIMEZONES};
use chronos_core::{DateInput, DateTimePicker, HolidayEntry, ZonedInstant};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Grid options passed from JavaScript. Dates accept epoch millis or ISO strings.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct GridOptionsInput {
    selected: Option<DateInput>,
    min_date: Option<DateInput>,
    max_date: Option<DateInput>,
    range_start: Option<DateInput>,
    range_end: Option<DateInput>,
    holidays: Vec<HolidayEntry>,
    week_start: Option<Weekday>,
    /// `YYYY-MM-DD`; defaults to the current date in the grid's zone.
    today: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimePickerDto {
    display_hour: u32,
    minute: u32,
    period: Period,
    uses_24_hour: bool,
    hour_options: Vec<u32>,
    period_toggle_label: String,
}

/// Everything a component needs to render the widget, in one snapshot.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PickerStateDto<'a> {
    display_value: String,
    placeholder: &'a str,
    is_open: bool,
    is_degraded: bool,
    timezone: &'a str,
    view: chronos_core::picker::ViewState,
    weekday_names: [&'static str; 7],
    month_names: [&'static str; 12],
    year_options: Vec<i32>,
    trigger_aria: chronos_core::picker::TriggerAria,
    active_listeners: &'a [chronos_core::dismiss::ListenerKind],
    range_summary: Option<chronos_core::picker::RangeSummary>,
    shows_time_picker: bool,
    shows_timezone_selector: bool,
    time_picker: TimePickerDto,
    timezone_label: &'a str,
    timezone_expanded: bool,
    timezone_options: Vec<chronos_core::timezone_selector::ZoneChoice>,
    theme: chronos_core::picker::Theme,
    orientation: chronos_core::picker::Orientation,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn events_json(events: Vec<PickerEvent>) -> Result<String, JsValue> {
    to_json(&events)
}

fn parse_json<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn parse_date(text: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", text, e)))
}

fn resolve(value: Option<&DateInput>, zone: &str) -> Result<Option<ZonedInstant>, JsValue> {
    value
        .map(|v| timezone::convert_to_timezone(v, zone))
        .transpose()
        .map_err(js_error)
}

fn parse_optional_input(json: Option<String>) -> Result<Option<DateInput>, JsValue> {
    match json {
        Some(json) => parse_json(&json, "date value"),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Stateless exports
// ---------------------------------------------------------------------------

/// Generate the day grid for `month` (1-12) of `year` in `timezone`.
///
/// `options_json` is an optional object with `selected`, `minDate`, `maxDate`,
/// `rangeStart`, `rangeEnd`, `holidays`, `weekStart` and `today`. Returns a
/// JSON array of weeks, each an array of seven cell objects.
#[wasm_bindgen(js_name = "generateCalendarMonth")]
pub fn generate_calendar_month(
    year: i32,
    month: u32,
    timezone: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let input: GridOptionsInput = match options_json.as_deref() {
        Some(json) => parse_json(json, "grid options")?,
        None => GridOptionsInput::default(),
    };
    let options = GridOptions {
        selected: resolve(input.selected.as_ref(), timezone)?,
        min: resolve(input.min_date.as_ref(), timezone)?,
        max: resolve(input.max_date.as_ref(), timezone)?,
        range_start: resolve(input.range_start.as_ref(), timezone)?,
        range_end: resolve(input.range_end.as_ref(), timezone)?,
        holidays: &input.holidays,
        week_start: input.week_start,
    };
    let weeks = match input.today.as_deref() {
        Some(today) => {
            calendar::generate_month_at(year, month, timezone, &options, parse_date(today)?)
        }
        None => calendar::generate_month(year, month, timezone, &options),
    }
    .map_err(js_error)?;
    to_json(&weeks)
}

/// Interpret a JSON date value (epoch millis or ISO string) in `timezone`.
/// Returns `{iso, timezone, timestamp}`.
#[wasm_bindgen(js_name = "convertToTimezone")]
pub fn convert_to_timezone(value_json: &str, timezone: &str) -> Result<String, JsValue> {
    let value: DateInput = parse_json(value_json, "date value")?;
    let instant = timezone::convert_to_timezone(&value, timezone).map_err(js_error)?;
    to_json(&instant)
}

/// Current offset label for `timezone`, e.g. `UTC+5:30`.
#[wasm_bindgen(js_name = "formatTimezoneOffset")]
pub fn format_timezone_offset(timezone: &str) -> Result<String, JsValue> {
    timezone::format_timezone_offset(timezone, Utc::now()).map_err(js_error)
}

#[wasm_bindgen(js_name = "isValidTimezone")]
pub fn is_valid_timezone(timezone: &str) -> bool {
    timezone::is_valid_timezone(timezone)
}

/// The curated `{value, label}` zone list as JSON.
#[wasm_bindgen(js_name = "commonTimezones")]
pub fn common_timezones() -> Result<String, JsValue> {
    to_json(&COMMON_TIMEZONES)
}

/// Built-in holidays for `timezone` as JSON (empty outside Asia/Kolkata).
#[wasm_bindgen(js_name = "defaultHolidays")]
pub fn default_holidays(timezone: &str) -> Result<String, JsValue> {
    to_json(&chronos_core::default_holidays_for_timezone(timezone))
}

// ---------------------------------------------------------------------------
// Stateful picker handle
// ---------------------------------------------------------------------------

/// The root widget, driven from a JavaScript component.
///
/// Every handler returns a JSON array of emitted events; each event has a
/// `type` (`change`, `rangeChange`, `opened`, `closed`) and a `payload`.
#[wasm_bindgen(js_name = "DateTimePicker")]
pub struct PickerHandle {
    inner: DateTimePicker,
}

#[wasm_bindgen(js_class = "DateTimePicker")]
impl PickerHandle {
    /// Build from the component's props object serialized as JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(props_json: &str) -> Result<PickerHandle, JsValue> {
        let config: PickerConfig = parse_json(props_json, "props")?;
        let inner = DateTimePicker::new(config).map_err(js_error)?;
        Ok(PickerHandle { inner })
    }

    /// Render snapshot as JSON.
    pub fn state(&self) -> Result<String, JsValue> {
        let picker = &self.inner;
        let time = picker.time_picker();
        let selector = picker.timezone_selector();
        let config = picker.config();
        let snapshot = PickerStateDto {
            display_value: picker.display_value(),
            placeholder: &config.placeholder,
            is_open: picker.is_open(),
            is_degraded: picker.is_degraded(),
            timezone: picker.timezone(),
            view: picker.view(),
            weekday_names: picker.weekday_names(),
            month_names: calendar::month_names(),
            year_options: calendar::year_options(picker.view().year),
            trigger_aria: picker.trigger_aria(),
            active_listeners: picker.active_listeners(),
            range_summary: picker.range_summary(),
            shows_time_picker: picker.shows_time_picker(),
            shows_timezone_selector: picker.shows_timezone_selector(),
            time_picker: TimePickerDto {
                display_hour: time.display_hour(),
                minute: time.minute(),
                period: time.period(),
                uses_24_hour: time.uses_24_hour(),
                hour_options: time.hour_options(),
                period_toggle_label: time.period_toggle_label(),
            },
            timezone_label: selector.current_label(),
            timezone_expanded: selector.is_expanded(),
            timezone_options: selector.options(Utc::now()),
            theme: config.theme,
            orientation: config.orientation,
        };
        to_json(&snapshot)
    }

    /// Day grid for the current view month as JSON.
    pub fn grid(&self) -> Result<String, JsValue> {
        let weeks = self.inner.grid().map_err(js_error)?;
        to_json(&weeks)
    }

    pub fn toggle(&mut self) -> Result<String, JsValue> {
        events_json(self.inner.toggle())
    }

    #[wasm_bindgen(js_name = "handleTriggerKey")]
    pub fn handle_trigger_key(&mut self, key: &str) -> Result<String, JsValue> {
        events_json(self.inner.handle_trigger_key(key))
    }

    #[wasm_bindgen(js_name = "handleEscape")]
    pub fn handle_escape(&mut self) -> Result<String, JsValue> {
        events_json(self.inner.handle_escape())
    }

    #[wasm_bindgen(js_name = "handleOutsidePointer")]
    pub fn handle_outside_pointer(&mut self) -> Result<String, JsValue> {
        events_json(self.inner.handle_outside_pointer())
    }

    /// Click on a day cell; `date` is `YYYY-MM-DD`.
    #[wasm_bindgen(js_name = "clickDate")]
    pub fn click_date(&mut self, date: &str) -> Result<String, JsValue> {
        let date = parse_date(date)?;
        events_json(self.inner.click_date(date))
    }

    #[wasm_bindgen(js_name = "setTime")]
    pub fn set_time(&mut self, hour: u32, minute: u32) -> Result<String, JsValue> {
        events_json(self.inner.set_time(hour, minute).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = "selectHour")]
    pub fn select_hour(&mut self, display_hour: u32) -> Result<String, JsValue> {
        events_json(self.inner.select_hour(display_hour).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = "selectMinute")]
    pub fn select_minute(&mut self, minute: u32) -> Result<String, JsValue> {
        events_json(self.inner.select_minute(minute).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = "togglePeriod")]
    pub fn toggle_period(&mut self) -> Result<String, JsValue> {
        events_json(self.inner.toggle_period().map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = "toggleTimezoneList")]
    pub fn toggle_timezone_list(&mut self) {
        self.inner.toggle_timezone_list();
    }

    #[wasm_bindgen(js_name = "changeTimezone")]
    pub fn change_timezone(&mut self, timezone: &str) -> Result<String, JsValue> {
        events_json(self.inner.change_timezone(timezone).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = "prevMonth")]
    pub fn prev_month(&mut self) {
        self.inner.prev_month();
    }

    #[wasm_bindgen(js_name = "nextMonth")]
    pub fn next_month(&mut self) {
        self.inner.next_month();
    }

    #[wasm_bindgen(js_name = "setViewMonth")]
    pub fn set_view_month(&mut self, month: u32) -> Result<(), JsValue> {
        self.inner.set_view_month(month).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "setViewYear")]
    pub fn set_view_year(&mut self, year: i32) {
        self.inner.set_view_year(year);
    }

    /// New `value` prop; pass `undefined` to clear.
    #[wasm_bindgen(js_name = "syncValue")]
    pub fn sync_value(&mut self, value_json: Option<String>) -> Result<(), JsValue> {
        let value = parse_optional_input(value_json)?;
        self.inner.sync_value(value);
        Ok(())
    }

    /// New `rangeValue` prop as `{start, end}` JSON; pass `undefined` to clear.
    #[wasm_bindgen(js_name = "syncRange")]
    pub fn sync_range(&mut self, range_json: Option<String>) -> Result<(), JsValue> {
        let range: RangeInput = match range_json {
            Some(json) => parse_json(&json, "range value")?,
            None => RangeInput::default(),
        };
        self.inner.sync_range(range.start, range.end);
        Ok(())
    }

    /// New `minDate`/`maxDate` props, each a JSON date value or `undefined`.
    #[wasm_bindgen(js_name = "setBounds")]
    pub fn set_bounds(
        &mut self,
        min_json: Option<String>,
        max_json: Option<String>,
    ) -> Result<(), JsValue> {
        let min = parse_optional_input(min_json)?;
        let max = parse_optional_input(max_json)?;
        self.inner.set_bounds(min, max);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setHolidays")]
    pub fn set_holidays(&mut self, holidays_json: &str) -> Result<(), JsValue> {
        let holidays = chronos_core::holidays::holidays_from_json(holidays_json).map_err(js_error)?;
        self.inner.set_holidays(holidays);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setDisabled")]
    pub fn set_disabled(&mut self, disabled: bool) -> Result<String, JsValue> {
        events_json(self.inner.set_disabled(disabled))
    }
}
