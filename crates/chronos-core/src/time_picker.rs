//! Hour/minute/period selection.
//!
//! State is kept as a 24-hour time; the 12-hour display hour and the AM/PM
//! period are derived from it. Every mutation returns the resulting 24-hour
//! [`TimeOfDay`] for the owning widget to apply.

use std::fmt;

use serde::Serialize;

use crate::error::{PickerError, Result};
use crate::instant::ZonedInstant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Period {
    pub fn of(hour24: u32) -> Self {
        if hour24 >= 12 {
            Period::Pm
        } else {
            Period::Am
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Period::Am => Period::Pm,
            Period::Pm => Period::Am,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

/// Convert a 1-12 clock hour in `period` to 0-23.
pub fn to_24_hour(hour12: u32, period: Period) -> u32 {
    match (period, hour12) {
        (Period::Am, 12) => 0,
        (Period::Am, h) => h,
        (Period::Pm, 12) => 12,
        (Period::Pm, h) => h + 12,
    }
}

/// Convert 0-23 to a 1-12 clock hour.
pub fn to_12_hour(hour24: u32) -> u32 {
    match hour24 % 12 {
        0 => 12,
        h => h,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePicker {
    hour: u32,
    minute: u32,
    use_24_hour: bool,
}

impl TimePicker {
    /// Starts at the time of `value`, or at 12:00 when there is none.
    pub fn new(use_24_hour: bool, value: Option<&ZonedInstant>) -> Self {
        let mut picker = Self {
            hour: 12,
            minute: 0,
            use_24_hour,
        };
        picker.sync(value);
        picker
    }

    /// Re-read hour and minute from the widget's selection. `None` keeps the
    /// current time.
    pub fn sync(&mut self, value: Option<&ZonedInstant>) {
        if let Some(value) = value {
            self.hour = value.hour();
            self.minute = value.minute();
        }
    }

    pub fn time(&self) -> TimeOfDay {
        TimeOfDay {
            hour: self.hour,
            minute: self.minute,
        }
    }

    pub fn uses_24_hour(&self) -> bool {
        self.use_24_hour
    }

    pub fn period(&self) -> Period {
        Period::of(self.hour)
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Hour as shown in the hour dropdown.
    pub fn display_hour(&self) -> u32 {
        if self.use_24_hour {
            self.hour
        } else {
            to_12_hour(self.hour)
        }
    }

    pub fn hour_options(&self) -> Vec<u32> {
        if self.use_24_hour {
            (0..=23).collect()
        } else {
            (1..=12).collect()
        }
    }

    pub fn minute_options(&self) -> Vec<u32> {
        (0..60).collect()
    }

    /// Pick an hour from the dropdown; in 12-hour mode it is read in the
    /// current period.
    pub fn set_display_hour(&mut self, hour: u32) -> Result<TimeOfDay> {
        let valid = if self.use_24_hour {
            hour <= 23
        } else {
            (1..=12).contains(&hour)
        };
        if !valid {
            return Err(PickerError::InvalidTime {
                hour,
                minute: self.minute,
            });
        }
        self.hour = if self.use_24_hour {
            hour
        } else {
            to_24_hour(hour, self.period())
        };
        Ok(self.time())
    }

    pub fn set_minute(&mut self, minute: u32) -> Result<TimeOfDay> {
        if minute > 59 {
            return Err(PickerError::InvalidTime {
                hour: self.hour,
                minute,
            });
        }
        self.minute = minute;
        Ok(self.time())
    }

    /// Flip AM/PM, keeping the displayed 12-hour hour.
    pub fn toggle_period(&mut self) -> TimeOfDay {
        let period = self.period().toggled();
        self.hour = to_24_hour(to_12_hour(self.hour), period);
        self.time()
    }

    /// `aria-label` for the period toggle button.
    pub fn period_toggle_label(&self) -> String {
        format!("Switch to {}", self.period().toggled())
    }
}
