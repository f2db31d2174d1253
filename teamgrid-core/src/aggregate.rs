//! Team aggregation engine: many players' slots, folded into per-cell counts.

use chrono::NaiveDate;

use crate::availability::AvailabilityStore;
use crate::error::{TeamGridError, TeamGridResult};
use crate::player::Roster;
use crate::settings::{BlockedHours, Settings};
use crate::slot::SlotState;
use crate::week::{self, WeekKey};

/// Cells with at least this many yes+maybe answers are highlighted as having
/// good availability. Derived from full-squad size, not tied to any one
/// roster's length.
pub const GOOD_AVAILABILITY_THRESHOLD: usize = 6;

/// The yes/maybe/no breakdown for one (week, day, hour) across the roster.
///
/// Names are in roster order. Players with no answer appear nowhere.
/// Always computed fresh from the store, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamCellDetail {
    pub yes: Vec<String>,
    pub maybe: Vec<String>,
    pub no_count: usize,
}

impl TeamCellDetail {
    /// The count shown on the team grid.
    pub fn count(&self) -> usize {
        self.yes.len() + self.maybe.len()
    }

    pub fn is_good(&self) -> bool {
        self.count() >= GOOD_AVAILABILITY_THRESHOLD
    }
}

/// Classify every player's slot at one coordinate.
///
/// Blocked cells are structurally absent from aggregation: stored states
/// beneath them are never read, so the detail comes back empty.
pub fn cell_detail(
    store: &AvailabilityStore,
    roster: &Roster,
    blocked: &BlockedHours,
    week: WeekKey,
    day: u8,
    hour: u8,
) -> TeamCellDetail {
    let mut detail = TeamCellDetail::default();
    if blocked.is_blocked(day, hour) {
        return detail;
    }

    for player in roster.players() {
        match store.get(week, &player.id, day, hour) {
            SlotState::Yes => detail.yes.push(player.name.clone()),
            SlotState::Maybe => detail.maybe.push(player.name.clone()),
            SlotState::No => detail.no_count += 1,
            SlotState::Empty => {}
        }
    }
    detail
}

/// One cell of the team grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamCell {
    Blocked,
    Open { count: usize, good: bool },
}

/// Aggregated counts for a whole week, laid out like the personal grid:
/// one row per hour, seven cells per row.
#[derive(Debug, Clone)]
pub struct TeamGrid {
    pub week: WeekKey,
    pub start_hour: u8,
    rows: Vec<[TeamCell; 7]>,
}

impl TeamGrid {
    pub fn build(
        store: &AvailabilityStore,
        roster: &Roster,
        settings: &Settings,
        week: WeekKey,
    ) -> TeamGridResult<TeamGrid> {
        let hours = settings.hours()?;
        let start_hour = hours.start;

        let rows = hours
            .map(|hour| {
                std::array::from_fn(|day| {
                    let day = day as u8;
                    if settings.blocked.is_blocked(day, hour) {
                        TeamCell::Blocked
                    } else {
                        let detail =
                            cell_detail(store, roster, &settings.blocked, week, day, hour);
                        TeamCell::Open {
                            count: detail.count(),
                            good: detail.is_good(),
                        }
                    }
                })
            })
            .collect();

        Ok(TeamGrid {
            week,
            start_hour,
            rows,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = (u8, &[TeamCell; 7])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (self.start_hour + i as u8, row))
    }

    pub fn cell(&self, day: u8, hour: u8) -> Option<TeamCell> {
        let row = self.rows.get(hour.checked_sub(self.start_hour)? as usize)?;
        row.get(day as usize).copied()
    }
}

/// A selected team cell: the fresh detail breakdown plus the resolved
/// calendar date and weekday label for display.
#[derive(Debug, Clone)]
pub struct CellSelection {
    pub detail: TeamCellDetail,
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub hour: u8,
}

/// Resolve one cell for the detail view.
pub fn select_cell(
    store: &AvailabilityStore,
    roster: &Roster,
    settings: &Settings,
    week: WeekKey,
    day: u8,
    hour: u8,
) -> TeamGridResult<CellSelection> {
    let weekday = week::weekday_label(day)?;
    if !settings.hours()?.contains(&hour) {
        return Err(TeamGridError::HourOutOfRange(hour));
    }

    Ok(CellSelection {
        detail: cell_detail(store, roster, &settings.blocked, week, day, hour),
        date: week.day_date(day),
        weekday,
        hour,
    })
}

// =============================================================================
// Tests
// =============================================================================
