//! Two-click date range selection.
//!
//! ```text
//! Empty --click A--> Pending(A) --click B--> Committed(min(A,B), max(A,B))
//!                        ^                            |
//!                        +--------click C-------------+
//! ```
//!
//! A click on a committed range discards it and anchors a new pending range;
//! ranges are never extended. Clicks on disabled dates change nothing.

use chrono::NaiveDate;
use serde::Serialize;

use crate::instant::ZonedInstant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RangeSelection {
    #[default]
    Empty,
    /// One date picked; start and end are both the anchor.
    Pending { anchor: NaiveDate },
    /// `start < end`, both fixed.
    Committed { start: NaiveDate, end: NaiveDate },
}

impl RangeSelection {
    /// Rebuild a selection from externally supplied bounds, in either order.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (None, None) => RangeSelection::Empty,
            (Some(anchor), None) | (None, Some(anchor)) => RangeSelection::Pending { anchor },
            (Some(a), Some(b)) if a == b => RangeSelection::Pending { anchor: a },
            (Some(a), Some(b)) => RangeSelection::Committed {
                start: a.min(b),
                end: a.max(b),
            },
        }
    }

    /// Apply a click on `date`.
    pub fn click(self, date: NaiveDate, disabled: bool) -> Self {
        if disabled {
            return self;
        }
        match self {
            RangeSelection::Pending { anchor } if anchor != date => RangeSelection::Committed {
                start: anchor.min(date),
                end: anchor.max(date),
            },
            _ => RangeSelection::Pending { anchor: date },
        }
    }

    /// `(start, end)`; a pending selection reports its anchor for both.
    pub fn bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match *self {
            RangeSelection::Empty => (None, None),
            RangeSelection::Pending { anchor } => (Some(anchor), Some(anchor)),
            RangeSelection::Committed { start, end } => (Some(start), Some(end)),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RangeSelection::Empty)
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, RangeSelection::Committed { .. })
    }

    /// Nights between the bounds; zero unless committed.
    pub fn nights(&self) -> i64 {
        match *self {
            RangeSelection::Committed { start, end } => (end - start).num_days().max(0),
            _ => 0,
        }
    }
}

/// `ceil(end - start)` in days, floored at zero.
///
/// Whole calendar days are counted in `start`'s zone, so a range spanning a DST
/// change still counts the 23- or 25-hour day as one night.
pub fn nights_between(start: &ZonedInstant, end: &ZonedInstant) -> i64 {
    let end = end.with_tz(start.tz());
    let mut days = (end.date() - start.date()).num_days();
    if end.time() > start.time() {
        days += 1;
    }
    days.max(0)
}
