//! Shared-directory remote: one snapshot file per document kind.
//!
//! Any directory both devices can see works as the remote: a network
//! mount, a Syncthing folder, a USB stick.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{TeamGridError, TeamGridResult};
use crate::sync::{Snapshot, SnapshotKind};

#[derive(Debug, Clone)]
pub struct DirRemote {
    dir: PathBuf,
}

impl DirRemote {
    pub fn new(dir: impl Into<PathBuf>) -> DirRemote {
        DirRemote { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, kind: SnapshotKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.name()))
    }

    /// Upload a whole-collection snapshot, stamped now. Idempotent upsert:
    /// whatever was there before is replaced.
    pub fn push(&self, kind: SnapshotKind, payload: serde_json::Value) -> TeamGridResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let snapshot = Snapshot {
            payload,
            updated_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| TeamGridError::Serialization(e.to_string()))?;

        let path = self.snapshot_path(kind);
        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    /// The current snapshot for a kind, or None if the remote has none yet.
    pub fn fetch(&self, kind: SnapshotKind) -> TeamGridResult<Option<Snapshot>> {
        let path = self.snapshot_path(kind);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let snapshot = serde_json::from_str(&content).map_err(|e| {
            TeamGridError::Sync(format!("malformed {} snapshot: {}", kind.name(), e))
        })?;
        Ok(Some(snapshot))
    }
}

// =============================================================================
// Tests
// =============================================================================
