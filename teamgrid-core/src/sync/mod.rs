//! Snapshot synchronization between devices.
//!
//! Each collection syncs as a whole document: pushing uploads the full local
//! collection (idempotent upsert), pulling replaces the full local collection.
//! Last write wins; there is no merging. A remote that cannot be reached
//! degrades to local-only operation.

mod dir_remote;

pub use dir_remote::DirRemote;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TeamGridResult;
use crate::store::Store;

/// The named documents a remote carries, one snapshot per kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SnapshotKind {
    #[serde(rename = "players")]
    Players,
    #[serde(rename = "availability")]
    Availability,
    #[serde(rename = "events")]
    Events,
    #[serde(rename = "rotations")]
    Rotations,
    /// Grid bounds and blocked mask, the shared subset of settings.
    #[serde(rename = "teamShared")]
    TeamShared,
}

impl SnapshotKind {
    pub const ALL: [SnapshotKind; 5] = [
        SnapshotKind::Players,
        SnapshotKind::Availability,
        SnapshotKind::Events,
        SnapshotKind::Rotations,
        SnapshotKind::TeamShared,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SnapshotKind::Players => "players",
            SnapshotKind::Availability => "availability",
            SnapshotKind::Events => "events",
            SnapshotKind::Rotations => "rotations",
            SnapshotKind::TeamShared => "teamShared",
        }
    }
}

/// One whole-collection document as stored on the remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub payload: serde_json::Value,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Upload local collections for every kind the remote doesn't have yet.
/// Returns the kinds that were seeded.
pub fn seed_if_missing(store: &Store, remote: &DirRemote) -> TeamGridResult<Vec<SnapshotKind>> {
    let mut seeded = Vec::new();
    for kind in SnapshotKind::ALL {
        if remote.fetch(kind)?.is_none() {
            remote.push(kind, store.snapshot_payload(kind)?)?;
            seeded.push(kind);
        }
    }
    Ok(seeded)
}

/// Apply every snapshot the remote currently has, replacing the local
/// collections. Returns the kinds that were applied.
pub fn pull(store: &Store, remote: &DirRemote) -> TeamGridResult<Vec<SnapshotKind>> {
    let mut seen = BTreeMap::new();
    pull_newer(store, remote, &mut seen)
}

/// Apply snapshots newer than the stamps in `seen`, updating `seen` as we
/// go. The watch loop calls this on every tick so unchanged documents are
/// not re-applied.
pub fn pull_newer(
    store: &Store,
    remote: &DirRemote,
    seen: &mut BTreeMap<SnapshotKind, DateTime<Utc>>,
) -> TeamGridResult<Vec<SnapshotKind>> {
    let mut applied = Vec::new();
    for kind in SnapshotKind::ALL {
        let Some(snapshot) = remote.fetch(kind)? else {
            continue;
        };
        if seen.get(&kind).is_some_and(|t| *t >= snapshot.updated_at) {
            continue;
        }
        store.apply_remote(kind, snapshot.payload)?;
        seen.insert(kind, snapshot.updated_at);
        applied.push(kind);
    }
    Ok(applied)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityStore;
    use crate::player::PlayerId;
    use crate::slot::SlotState;
    use crate::week::WeekKey;
    use chrono::NaiveDate;

    fn setup() -> (tempfile::TempDir, Store, DirRemote) {
        let tmp = tempfile::tempdir().unwrap();
        let remote = DirRemote::new(tmp.path().join("shared"));
        let store = Store::new(tmp.path().join("local")).with_remote(remote.clone());
        (tmp, store, remote)
    }

    #[test]
    fn test_seed_uploads_only_missing_kinds() {
        let (_tmp, store, remote) = setup();

        remote
            .push(SnapshotKind::Players, serde_json::json!([]))
            .unwrap();

        let seeded = seed_if_missing(&store, &remote).unwrap();
        assert!(!seeded.contains(&SnapshotKind::Players));
        assert_eq!(seeded.len(), 4);

        // Second seed finds everything present
        assert!(seed_if_missing(&store, &remote).unwrap().is_empty());
    }

    #[test]
    fn test_pull_replaces_local_collections() {
        let (_tmp, store, remote) = setup();
        let week = WeekKey::containing(NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());

        let mut availability = AvailabilityStore::default();
        availability.set(week, &PlayerId("p1".into()), 2, 20, SlotState::Yes);
        remote
            .push(
                SnapshotKind::Availability,
                serde_json::to_value(&availability).unwrap(),
            )
            .unwrap();

        let applied = pull(&store, &remote).unwrap();
        assert_eq!(applied, [SnapshotKind::Availability]);
        assert_eq!(
            store.availability().get(week, &PlayerId("p1".into()), 2, 20),
            SlotState::Yes
        );
    }

    #[test]
    fn test_pull_newer_skips_unchanged_snapshots() {
        let (_tmp, store, remote) = setup();

        remote
            .push(SnapshotKind::Rotations, serde_json::json!({"a": {}}))
            .unwrap();

        let mut seen = BTreeMap::new();
        let first = pull_newer(&store, &remote, &mut seen).unwrap();
        assert_eq!(first, [SnapshotKind::Rotations]);

        let second = pull_newer(&store, &remote, &mut seen).unwrap();
        assert!(second.is_empty());

        // A fresh push carries a newer stamp and is applied again
        remote
            .push(SnapshotKind::Rotations, serde_json::json!({"b": {}}))
            .unwrap();
        let third = pull_newer(&store, &remote, &mut seen).unwrap();
        assert_eq!(third, [SnapshotKind::Rotations]);
    }
}
