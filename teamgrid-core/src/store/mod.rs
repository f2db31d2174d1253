//! Local collection storage: one JSON document per collection.
//!
//! Missing or malformed documents degrade to empty defaults ("no data yet",
//! never an error); validation happens here at the boundary so the grid and
//! aggregation engines can assume well-formed input.
//!
//! Every setter is also the outbound sync hook point: after a successful
//! local write it pushes the matching snapshot to the configured remote.
//! Writes made while applying a remote snapshot go through a separate path
//! that never pushes, so a pulled snapshot can't echo back to the remote.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::availability::AvailabilityStore;
use crate::error::{TeamGridError, TeamGridResult};
use crate::player::Roster;
use crate::settings::{Settings, TeamShared};
use crate::sync::{DirRemote, SnapshotKind};

const SETTINGS_FILE: &str = "settings.json";
const PLAYERS_FILE: &str = "players.json";
const AVAILABILITY_FILE: &str = "availability.json";
const EVENTS_FILE: &str = "events.json";
const ROTATIONS_FILE: &str = "rotations.json";

/// What happened on the remote after a local write.
///
/// Remote failures never fail the write itself: sync trouble degrades to
/// local-only operation and is surfaced as information, not an error.
#[derive(Debug)]
pub enum PushStatus {
    Pushed(SnapshotKind),
    LocalOnly,
    Failed(TeamGridError),
}

pub struct Store {
    data_dir: PathBuf,
    remote: Option<DirRemote>,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> Store {
        Store {
            data_dir: data_dir.into(),
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: DirRemote) -> Store {
        self.remote = Some(remote);
        self
    }

    pub fn remote(&self) -> Option<&DirRemote> {
        self.remote.as_ref()
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // READS (defaulting at the boundary):

    pub fn settings(&self) -> Settings {
        self.load_or_default(SETTINGS_FILE)
    }

    pub fn players(&self) -> Roster {
        self.load_or_default(PLAYERS_FILE)
    }

    pub fn availability(&self) -> AvailabilityStore {
        self.load_or_default(AVAILABILITY_FILE)
    }

    /// Calendar events, carried as an opaque document (the event editor is
    /// a separate surface; sync still covers its collection).
    pub fn events(&self) -> serde_json::Value {
        self.load_or(EVENTS_FILE, || serde_json::Value::Array(Vec::new()))
    }

    /// Saved rotations, carried as an opaque document like events.
    pub fn rotations(&self) -> serde_json::Value {
        self.load_or(ROTATIONS_FILE, || {
            serde_json::Value::Object(serde_json::Map::new())
        })
    }

    // WRITES (validate, save, push):

    /// Save settings. Only the team-shared subset (hours, blocked mask) is
    /// pushed; the display name stays on this device.
    pub fn set_settings(&self, settings: &Settings) -> TeamGridResult<PushStatus> {
        settings.validate()?;
        self.save_json(SETTINGS_FILE, settings)?;
        Ok(self.push(SnapshotKind::TeamShared, to_value(&settings.shared())?))
    }

    pub fn set_players(&self, roster: &Roster) -> TeamGridResult<PushStatus> {
        self.save_json(PLAYERS_FILE, roster)?;
        Ok(self.push(SnapshotKind::Players, to_value(roster)?))
    }

    pub fn set_availability(&self, availability: &AvailabilityStore) -> TeamGridResult<PushStatus> {
        self.save_json(AVAILABILITY_FILE, availability)?;
        Ok(self.push(SnapshotKind::Availability, to_value(availability)?))
    }

    pub fn set_events(&self, events: &serde_json::Value) -> TeamGridResult<PushStatus> {
        self.save_json(EVENTS_FILE, events)?;
        Ok(self.push(SnapshotKind::Events, events.clone()))
    }

    pub fn set_rotations(&self, rotations: &serde_json::Value) -> TeamGridResult<PushStatus> {
        self.save_json(ROTATIONS_FILE, rotations)?;
        Ok(self.push(SnapshotKind::Rotations, rotations.clone()))
    }

    // SYNC INTEGRATION:

    /// The full local collection for one snapshot kind, for seeding/pushing.
    pub fn snapshot_payload(&self, kind: SnapshotKind) -> TeamGridResult<serde_json::Value> {
        match kind {
            SnapshotKind::Players => to_value(&self.players()),
            SnapshotKind::Availability => to_value(&self.availability()),
            SnapshotKind::Events => Ok(self.events()),
            SnapshotKind::Rotations => Ok(self.rotations()),
            SnapshotKind::TeamShared => to_value(&self.settings().shared()),
        }
    }

    /// Replace a local collection with a remote snapshot.
    ///
    /// Writes only locally: this path has no push step at all, so applying
    /// can never trigger an outbound echo, and the very next normal setter
    /// call pushes again as usual.
    pub fn apply_remote(
        &self,
        kind: SnapshotKind,
        payload: serde_json::Value,
    ) -> TeamGridResult<()> {
        match kind {
            SnapshotKind::Players => {
                let roster: Roster = from_value(payload)?;
                self.save_json(PLAYERS_FILE, &roster)
            }
            SnapshotKind::Availability => {
                let availability: AvailabilityStore = from_value(payload)?;
                self.save_json(AVAILABILITY_FILE, &availability)
            }
            SnapshotKind::Events => self.save_json(EVENTS_FILE, &payload),
            SnapshotKind::Rotations => self.save_json(ROTATIONS_FILE, &payload),
            SnapshotKind::TeamShared => {
                let shared: TeamShared = from_value(payload)?;
                let mut settings = self.settings();
                settings.apply_shared(shared);
                settings.validate()?;
                self.save_json(SETTINGS_FILE, &settings)
            }
        }
    }

    fn push(&self, kind: SnapshotKind, payload: serde_json::Value) -> PushStatus {
        let Some(remote) = &self.remote else {
            return PushStatus::LocalOnly;
        };
        match remote.push(kind, payload) {
            Ok(()) => PushStatus::Pushed(kind),
            Err(e) => PushStatus::Failed(e),
        }
    }

    // FILE IO:

    fn load_or_default<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        self.load_or(file, T::default)
    }

    fn load_or<T: DeserializeOwned>(&self, file: &str, fallback: impl FnOnce() -> T) -> T {
        let path = self.data_dir.join(file);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|_| fallback()),
            Err(_) => fallback(),
        }
    }

    /// Atomic write: write to a temp file, then rename into place.
    fn save_json<T: Serialize>(&self, file: &str, value: &T) -> TeamGridResult<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let content = serde_json::to_string_pretty(value)
            .map_err(|e| TeamGridError::Serialization(e.to_string()))?;

        let path = self.data_dir.join(file);
        let temp = self.data_dir.join(format!("{}.tmp", file));
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

fn to_value<T: Serialize>(value: &T) -> TeamGridResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| TeamGridError::Serialization(e.to_string()))
}

fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> TeamGridResult<T> {
    serde_json::from_value(value).map_err(|e| TeamGridError::Serialization(e.to_string()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;
    use crate::slot::SlotState;
    use crate::week::WeekKey;
    use chrono::NaiveDate;

    fn week() -> WeekKey {
        WeekKey::containing(NaiveDate::from_ymd_opt(2026, 8, 24).unwrap())
    }

    #[test]
    fn test_missing_files_read_as_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path().join("data"));

        assert_eq!(store.settings(), Settings::default());
        assert!(store.players().is_empty());
        assert!(store.availability().is_empty());
        assert_eq!(store.events(), serde_json::json!([]));
        assert_eq!(store.rotations(), serde_json::json!({}));
    }

    #[test]
    fn test_malformed_files_read_as_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(SETTINGS_FILE), "{{ not json").unwrap();
        std::fs::write(tmp.path().join(PLAYERS_FILE), "42").unwrap();

        let store = Store::new(tmp.path());
        assert_eq!(store.settings(), Settings::default());
        assert!(store.players().is_empty());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path());

        let mut roster = Roster::default();
        roster.add("Alex");
        store.set_players(&roster).unwrap();

        let mut availability = AvailabilityStore::default();
        availability.set(week(), &roster.players()[0].id, 2, 20, SlotState::Maybe);
        store.set_availability(&availability).unwrap();

        assert_eq!(store.players(), roster);
        assert_eq!(store.availability(), availability);
    }

    #[test]
    fn test_set_availability_from_get_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path());

        let mut availability = AvailabilityStore::default();
        availability.set(week(), &PlayerId("p1".into()), 0, 9, SlotState::Yes);
        store.set_availability(&availability).unwrap();

        store.set_availability(&store.availability()).unwrap();
        assert_eq!(store.availability(), availability);
    }

    #[test]
    fn test_invalid_settings_are_rejected_before_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path());

        let bad = Settings {
            start_hour: 20,
            end_hour: 10,
            ..Settings::default()
        };
        assert!(store.set_settings(&bad).is_err());
        assert_eq!(store.settings(), Settings::default());
    }

    #[test]
    fn test_setter_pushes_and_apply_remote_does_not() {
        let tmp = tempfile::tempdir().unwrap();
        let remote = DirRemote::new(tmp.path().join("shared"));
        let store = Store::new(tmp.path().join("data")).with_remote(remote.clone());

        // Applying a remote snapshot must not echo back out
        let payload = serde_json::json!({
            "2026-08-24": { "p1": { "2": { "20": 1 } } }
        });
        store
            .apply_remote(SnapshotKind::Availability, payload)
            .unwrap();
        assert!(remote.fetch(SnapshotKind::Availability).unwrap().is_none());

        // ...but the next ordinary write pushes again: suppression is
        // scoped to the apply, not sticky
        let status = store.set_availability(&store.availability()).unwrap();
        assert!(matches!(status, PushStatus::Pushed(SnapshotKind::Availability)));
        assert!(remote.fetch(SnapshotKind::Availability).unwrap().is_some());
    }

    #[test]
    fn test_settings_push_carries_only_the_shared_subset() {
        let tmp = tempfile::tempdir().unwrap();
        let remote = DirRemote::new(tmp.path().join("shared"));
        let store = Store::new(tmp.path().join("data")).with_remote(remote.clone());

        let settings = Settings {
            my_name: "Lara".to_string(),
            ..Settings::default()
        };
        store.set_settings(&settings).unwrap();

        let snapshot = remote.fetch(SnapshotKind::TeamShared).unwrap().unwrap();
        assert!(snapshot.payload.get("myName").is_none());
        assert_eq!(snapshot.payload["startHour"], 8);
    }

    #[test]
    fn test_apply_team_shared_keeps_local_name() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path());

        let settings = Settings {
            my_name: "Lara".to_string(),
            ..Settings::default()
        };
        store.set_settings(&settings).unwrap();

        store
            .apply_remote(
                SnapshotKind::TeamShared,
                serde_json::json!({ "startHour": 9, "endHour": 22, "blocked": {} }),
            )
            .unwrap();

        let after = store.settings();
        assert_eq!(after.my_name, "Lara");
        assert_eq!((after.start_hour, after.end_hour), (9, 22));
    }

    #[test]
    fn test_writes_without_remote_stay_local() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path());
        let status = store.set_players(&Roster::default()).unwrap();
        assert!(matches!(status, PushStatus::LocalOnly));
    }
}
