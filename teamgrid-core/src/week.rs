//! Week addressing: canonical Monday-anchored keys for week-scoped data.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{TeamGridError, TeamGridResult};

/// Short weekday labels, indexed 0=Mon..6=Sun.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// The canonical key for one calendar week: the date of its Monday.
///
/// All week-scoped records are keyed by this, never by an arbitrary viewed
/// date, so any two dates inside the same Monday-to-Sunday span resolve to
/// the same underlying data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "NaiveDate", into = "NaiveDate")]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// The week containing `date`. Stable under repeated application:
    /// `WeekKey::containing(key.monday()) == key`.
    pub fn containing(date: NaiveDate) -> WeekKey {
        let offset = date.weekday().num_days_from_monday() as i64;
        WeekKey(date - Duration::days(offset))
    }

    /// The Monday this week starts on.
    pub fn monday(self) -> NaiveDate {
        self.0
    }

    /// The Sunday this week ends on.
    pub fn sunday(self) -> NaiveDate {
        self.0 + Duration::days(6)
    }

    /// Calendar date of a day within this week (0=Mon..6=Sun).
    pub fn day_date(self, day: u8) -> NaiveDate {
        self.0 + Duration::days(day as i64)
    }

    pub fn next(self) -> WeekKey {
        WeekKey(self.0 + Duration::days(7))
    }

    pub fn previous(self) -> WeekKey {
        WeekKey(self.0 - Duration::days(7))
    }
}

// Snapping in From keeps deserialized keys on a Monday even if the stored
// string drifted.
impl From<NaiveDate> for WeekKey {
    fn from(date: NaiveDate) -> Self {
        WeekKey::containing(date)
    }
}

impl From<WeekKey> for NaiveDate {
    fn from(key: WeekKey) -> Self {
        key.0
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Label for a day index (0=Mon..6=Sun).
pub fn weekday_label(day: u8) -> TeamGridResult<&'static str> {
    WEEKDAY_LABELS
        .get(day as usize)
        .copied()
        .ok_or(TeamGridError::InvalidDay(day))
}

/// Format an hour as "HH:00".
pub fn hour_label(hour: u8) -> String {
    format!("{:02}:00", hour)
}

// =============================================================================
// Tests
// =============================================================================
