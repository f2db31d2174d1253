//! Personal grid engine: one player's week, rendering-ready.

use crate::availability::AvailabilityStore;
use crate::error::{TeamGridError, TeamGridResult};
use crate::player::PlayerId;
use crate::settings::Settings;
use crate::slot::SlotState;
use crate::week::WeekKey;

/// One cell of a personal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalCell {
    /// Excluded by the blocked-hours overlay: not editable, no marker.
    Blocked,
    Open(SlotState),
}

/// A player's slot states for one week, laid out as the grid the
/// presentation layer draws: one row per hour, seven cells per row.
#[derive(Debug, Clone)]
pub struct PersonalGrid {
    pub week: WeekKey,
    pub start_hour: u8,
    rows: Vec<[PersonalCell; 7]>,
}

impl PersonalGrid {
    pub fn build(
        store: &AvailabilityStore,
        settings: &Settings,
        player: &PlayerId,
        week: WeekKey,
    ) -> TeamGridResult<PersonalGrid> {
        let hours = settings.hours()?;
        let start_hour = hours.start;

        let rows = hours
            .map(|hour| {
                std::array::from_fn(|day| {
                    let day = day as u8;
                    if settings.blocked.is_blocked(day, hour) {
                        PersonalCell::Blocked
                    } else {
                        PersonalCell::Open(store.get(week, player, day, hour))
                    }
                })
            })
            .collect();

        Ok(PersonalGrid {
            week,
            start_hour,
            rows,
        })
    }

    /// Rows top to bottom, each tagged with its hour.
    pub fn rows(&self) -> impl Iterator<Item = (u8, &[PersonalCell; 7])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (self.start_hour + i as u8, row))
    }

    pub fn cell(&self, day: u8, hour: u8) -> Option<PersonalCell> {
        let row = self.rows.get(hour.checked_sub(self.start_hour)? as usize)?;
        row.get(day as usize).copied()
    }
}

/// Apply one edit to a player's own slot: cycle to the next state, or jump
/// straight to No when `force_no` is set (the "can't make it" fast path).
///
/// Rejects blocked and out-of-range cells; returns the state written.
pub fn apply_edit(
    store: &mut AvailabilityStore,
    settings: &Settings,
    player: &PlayerId,
    week: WeekKey,
    day: u8,
    hour: u8,
    force_no: bool,
) -> TeamGridResult<SlotState> {
    if day > 6 {
        return Err(TeamGridError::InvalidDay(day));
    }
    if !settings.hours()?.contains(&hour) {
        return Err(TeamGridError::HourOutOfRange(hour));
    }
    if settings.blocked.is_blocked(day, hour) {
        return Err(TeamGridError::BlockedSlot { day, hour });
    }

    let state = if force_no {
        SlotState::No
    } else {
        store.get(week, player, day, hour).next()
    };
    store.set(week, player, day, hour, state);
    Ok(state)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week() -> WeekKey {
        WeekKey::containing(NaiveDate::from_ymd_opt(2026, 8, 24).unwrap())
    }

    fn player() -> PlayerId {
        PlayerId("p1".into())
    }

    #[test]
    fn test_build_dimensions_follow_hour_bounds() {
        let settings = Settings {
            start_hour: 18,
            end_hour: 22,
            ..Settings::default()
        };
        let grid =
            PersonalGrid::build(&AvailabilityStore::default(), &settings, &player(), week())
                .unwrap();

        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].0, 18);
        assert_eq!(rows[3].0, 21);
    }

    #[test]
    fn test_build_refuses_degenerate_bounds() {
        let settings = Settings {
            start_hour: 20,
            end_hour: 20,
            ..Settings::default()
        };
        assert!(matches!(
            PersonalGrid::build(&AvailabilityStore::default(), &settings, &player(), week()),
            Err(TeamGridError::InvalidHours { .. })
        ));
    }

    #[test]
    fn test_cells_show_state_and_blocked_overlay() {
        let mut settings = Settings::default();
        settings.blocked.toggle(2, 20);

        let mut store = AvailabilityStore::default();
        store.set(week(), &player(), 1, 20, SlotState::Maybe);
        // Stale state beneath a blocked cell
        store.set(week(), &player(), 2, 20, SlotState::Yes);

        let grid = PersonalGrid::build(&store, &settings, &player(), week()).unwrap();
        assert_eq!(grid.cell(1, 20), Some(PersonalCell::Open(SlotState::Maybe)));
        assert_eq!(grid.cell(2, 20), Some(PersonalCell::Blocked));
        assert_eq!(grid.cell(0, 20), Some(PersonalCell::Open(SlotState::Empty)));
        assert_eq!(grid.cell(0, 7), None);
    }

    #[test]
    fn test_edit_cycles_through_all_states() {
        let settings = Settings::default();
        let mut store = AvailabilityStore::default();

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(
                apply_edit(&mut store, &settings, &player(), week(), 2, 20, false).unwrap(),
            );
        }
        assert_eq!(
            seen,
            [SlotState::Yes, SlotState::Maybe, SlotState::No, SlotState::Empty]
        );
    }

    #[test]
    fn test_forced_no_from_any_state_is_idempotent() {
        let settings = Settings::default();
        for starting_edits in 0..4 {
            let mut store = AvailabilityStore::default();
            for _ in 0..starting_edits {
                apply_edit(&mut store, &settings, &player(), week(), 0, 10, false).unwrap();
            }
            let state =
                apply_edit(&mut store, &settings, &player(), week(), 0, 10, true).unwrap();
            assert_eq!(state, SlotState::No);
            // Forcing again stays at No
            let state =
                apply_edit(&mut store, &settings, &player(), week(), 0, 10, true).unwrap();
            assert_eq!(state, SlotState::No);
        }
    }

    #[test]
    fn test_edit_rejects_blocked_and_out_of_range() {
        let mut settings = Settings::default();
        settings.blocked.toggle(2, 20);
        let mut store = AvailabilityStore::default();

        assert!(matches!(
            apply_edit(&mut store, &settings, &player(), week(), 2, 20, false),
            Err(TeamGridError::BlockedSlot { day: 2, hour: 20 })
        ));
        assert!(matches!(
            apply_edit(&mut store, &settings, &player(), week(), 0, 7, false),
            Err(TeamGridError::HourOutOfRange(7))
        ));
        assert!(matches!(
            apply_edit(&mut store, &settings, &player(), week(), 7, 10, false),
            Err(TeamGridError::InvalidDay(7))
        ));
        assert!(store.is_empty());
    }
}
