//! The availability store: one slot state per (week, player, day, hour).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::slot::SlotState;
use crate::week::WeekKey;

/// Composite key for one slot. Flattening the four dimensions into a single
/// ordered key avoids four levels of nested optional containers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotKey {
    pub week: WeekKey,
    pub player: PlayerId,
    pub day: u8,
    pub hour: u8,
}

/// All recorded availability, across every week and player.
///
/// Unset slots read as [`SlotState::Empty`]; entries are created only by
/// explicit edits. Blocked cells may still hold stale values written before
/// the cell was blocked; aggregation skips those coordinates entirely.
///
/// Serialized in the snapshot document shape
/// (`week -> player -> day -> hour -> code`), dropping malformed leaves on
/// the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AvailabilityDoc", into = "AvailabilityDoc")]
pub struct AvailabilityStore {
    slots: BTreeMap<SlotKey, SlotState>,
}

type AvailabilityDoc =
    BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, u8>>>>;

impl AvailabilityStore {
    pub fn get(&self, week: WeekKey, player: &PlayerId, day: u8, hour: u8) -> SlotState {
        let key = SlotKey {
            week,
            player: player.clone(),
            day,
            hour,
        };
        self.slots.get(&key).copied().unwrap_or_default()
    }

    pub fn set(
        &mut self,
        week: WeekKey,
        player: &PlayerId,
        day: u8,
        hour: u8,
        state: SlotState,
    ) {
        let key = SlotKey {
            week,
            player: player.clone(),
            day,
            hour,
        };
        self.slots.insert(key, state);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl From<AvailabilityDoc> for AvailabilityStore {
    fn from(doc: AvailabilityDoc) -> Self {
        let mut slots = BTreeMap::new();
        for (week, players) in doc {
            let Ok(date) = week.parse::<chrono::NaiveDate>() else { continue };
            let week = WeekKey::containing(date);
            for (player, days) in players {
                let player = PlayerId(player);
                for (day, hours) in days {
                    let Ok(day) = day.parse::<u8>() else { continue };
                    for (hour, code) in hours {
                        let Ok(hour) = hour.parse::<u8>() else { continue };
                        let Ok(state) = SlotState::try_from(code) else { continue };
                        slots.insert(
                            SlotKey {
                                week,
                                player: player.clone(),
                                day,
                                hour,
                            },
                            state,
                        );
                    }
                }
            }
        }
        AvailabilityStore { slots }
    }
}

impl From<AvailabilityStore> for AvailabilityDoc {
    fn from(store: AvailabilityStore) -> Self {
        let mut doc = AvailabilityDoc::new();
        for (key, state) in store.slots {
            doc.entry(key.week.to_string())
                .or_default()
                .entry(key.player.0)
                .or_default()
                .entry(key.day.to_string())
                .or_default()
                .insert(key.hour.to_string(), state.code());
        }
        doc
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn week() -> WeekKey {
        WeekKey::containing(NaiveDate::from_ymd_opt(2026, 8, 24).unwrap())
    }

    #[test]
    fn test_unset_slot_reads_empty() {
        let store = AvailabilityStore::default();
        assert_eq!(
            store.get(week(), &PlayerId("p1".into()), 2, 20),
            SlotState::Empty
        );
    }

    #[test]
    fn test_write_then_read_back() {
        let mut store = AvailabilityStore::default();
        let p1 = PlayerId("p1".into());
        let p2 = PlayerId("p2".into());

        store.set(week(), &p1, 2, 20, SlotState::Yes);

        assert_eq!(store.get(week(), &p1, 2, 20), SlotState::Yes);
        // Same coordinate, different player: still unset
        assert_eq!(store.get(week(), &p2, 2, 20), SlotState::Empty);
        // Same player, neighboring coordinates: still unset
        assert_eq!(store.get(week(), &p1, 2, 21), SlotState::Empty);
        assert_eq!(store.get(week().next(), &p1, 2, 20), SlotState::Empty);
    }

    #[test]
    fn test_overwrite_replaces_state() {
        let mut store = AvailabilityStore::default();
        let p1 = PlayerId("p1".into());
        store.set(week(), &p1, 0, 8, SlotState::Yes);
        store.set(week(), &p1, 0, 8, SlotState::No);
        assert_eq!(store.get(week(), &p1, 0, 8), SlotState::No);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_document_shape() {
        let mut store = AvailabilityStore::default();
        let p1 = PlayerId("p1".into());
        store.set(week(), &p1, 2, 20, SlotState::Maybe);
        store.set(week(), &p1, 2, 21, SlotState::No);

        let value = serde_json::to_value(&store).unwrap();
        assert_eq!(
            value,
            json!({ "2026-08-24": { "p1": { "2": { "20": 2, "21": 3 } } } })
        );
    }

    #[test]
    fn test_serialization_round_trip_is_idempotent() {
        let mut store = AvailabilityStore::default();
        store.set(week(), &PlayerId("p1".into()), 2, 20, SlotState::Yes);
        store.set(week(), &PlayerId("p2".into()), 6, 8, SlotState::Empty);
        store.set(week().next(), &PlayerId("p1".into()), 0, 12, SlotState::Maybe);

        let value = serde_json::to_value(&store).unwrap();
        let back: AvailabilityStore = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(back, store);
        assert_eq!(serde_json::to_value(&back).unwrap(), value);
    }

    #[test]
    fn test_malformed_leaves_are_dropped() {
        let store: AvailabilityStore = serde_json::from_value(json!({
            "2026-08-24": {
                "p1": { "2": { "20": 1, "noon": 1, "21": 9 } }
            },
            "not-a-date": { "p1": { "0": { "8": 1 } } }
        }))
        .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(week(), &PlayerId("p1".into()), 2, 20),
            SlotState::Yes
        );
    }

    #[test]
    fn test_drifted_week_key_snaps_to_monday() {
        // A week keyed by a Wednesday lands in the Monday-keyed record
        let store: AvailabilityStore = serde_json::from_value(json!({
            "2026-08-26": { "p1": { "0": { "8": 1 } } }
        }))
        .unwrap();
        assert_eq!(
            store.get(week(), &PlayerId("p1".into()), 0, 8),
            SlotState::Yes
        );
    }
}
