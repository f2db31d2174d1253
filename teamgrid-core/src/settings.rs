//! Team settings and the blocked-hours overlay.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{TeamGridError, TeamGridResult};

/// Recurring weekly mask of hours nobody can use (court closed, etc).
/// Sparse, per (day 0=Mon..6=Sun, hour 0..23), identical across all weeks
/// and all players.
///
/// Serialized in the snapshot document shape:
/// `{"<day>": {"<hour>": true}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BlockedDoc", into = "BlockedDoc")]
pub struct BlockedHours {
    slots: BTreeSet<(u8, u8)>,
}

type BlockedDoc = BTreeMap<String, BTreeMap<String, bool>>;

impl BlockedHours {
    pub fn is_blocked(&self, day: u8, hour: u8) -> bool {
        self.slots.contains(&(day, hour))
    }

    /// Flip one cell of the mask, returning its new state.
    pub fn toggle(&mut self, day: u8, hour: u8) -> bool {
        if self.slots.remove(&(day, hour)) {
            false
        } else {
            self.slots.insert((day, hour));
            true
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.slots.iter().copied()
    }
}

impl From<BlockedDoc> for BlockedHours {
    fn from(doc: BlockedDoc) -> Self {
        let mut slots = BTreeSet::new();
        for (day, hours) in doc {
            let Ok(day) = day.parse::<u8>() else { continue };
            for (hour, on) in hours {
                let Ok(hour) = hour.parse::<u8>() else { continue };
                if on && day < 7 && hour < 24 {
                    slots.insert((day, hour));
                }
            }
        }
        BlockedHours { slots }
    }
}

impl From<BlockedHours> for BlockedDoc {
    fn from(blocked: BlockedHours) -> Self {
        let mut doc = BlockedDoc::new();
        for (day, hour) in blocked.slots {
            doc.entry(day.to_string())
                .or_default()
                .insert(hour.to_string(), true);
        }
        doc
    }
}

/// Per-device settings plus the team-shared grid bounds and blocked mask.
///
/// Field names follow the snapshot document format (camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Display name on this device. Never synced.
    pub my_name: String,
    /// First hour shown on the grids (inclusive).
    pub start_hour: u8,
    /// Last hour shown on the grids (exclusive).
    pub end_hour: u8,
    pub blocked: BlockedHours,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            my_name: "Me".to_string(),
            start_hour: 8,
            end_hour: 23,
            blocked: BlockedHours::default(),
        }
    }
}

impl Settings {
    /// Enforce the hour-bound invariant. Called on every settings write;
    /// the grid engines assume it holds.
    pub fn validate(&self) -> TeamGridResult<()> {
        if self.start_hour > 23
            || self.end_hour < 1
            || self.end_hour > 24
            || self.end_hour <= self.start_hour
        {
            return Err(TeamGridError::InvalidHours {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        Ok(())
    }

    /// The grid's hour rows, refusing degenerate bounds.
    pub fn hours(&self) -> TeamGridResult<Range<u8>> {
        self.validate()?;
        Ok(self.start_hour..self.end_hour)
    }

    /// The subset of settings shared with the rest of the team.
    pub fn shared(&self) -> TeamShared {
        TeamShared {
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            blocked: self.blocked.clone(),
        }
    }

    /// Merge a remote team-shared snapshot, keeping the local display name.
    pub fn apply_shared(&mut self, shared: TeamShared) {
        self.start_hour = shared.start_hour;
        self.end_hour = shared.end_hour;
        self.blocked = shared.blocked;
    }
}

/// The synced subset of [`Settings`]: grid bounds and blocked mask.
/// Personal fields (display name) are deliberately excluded from sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamShared {
    pub start_hour: u8,
    pub end_hour: u8,
    #[serde(default)]
    pub blocked: BlockedHours,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!((s.start_hour, s.end_hour), (8, 23));
        assert!(s.blocked.is_empty());
        s.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_bounds() {
        let cases = [(24, 25), (8, 8), (10, 9), (0, 0)];
        for (start, end) in cases {
            let s = Settings {
                start_hour: start,
                end_hour: end,
                ..Settings::default()
            };
            assert!(
                matches!(s.validate(), Err(TeamGridError::InvalidHours { .. })),
                "expected rejection for {}..{}",
                start,
                end
            );
            assert!(s.hours().is_err());
        }
    }

    #[test]
    fn test_blocked_toggle_and_clear() {
        let mut blocked = BlockedHours::default();
        assert!(!blocked.is_blocked(2, 20));

        assert!(blocked.toggle(2, 20));
        assert!(blocked.is_blocked(2, 20));
        assert!(!blocked.is_blocked(2, 21));

        assert!(!blocked.toggle(2, 20));
        assert!(!blocked.is_blocked(2, 20));

        blocked.toggle(0, 18);
        blocked.toggle(0, 19);
        blocked.clear();
        assert!(blocked.is_empty());
    }

    #[test]
    fn test_blocked_document_shape() {
        let mut blocked = BlockedHours::default();
        blocked.toggle(0, 18);
        blocked.toggle(0, 19);
        blocked.toggle(2, 20);

        let value = serde_json::to_value(&blocked).unwrap();
        assert_eq!(
            value,
            json!({ "0": { "18": true, "19": true }, "2": { "20": true } })
        );

        let back: BlockedHours = serde_json::from_value(value).unwrap();
        assert_eq!(back, blocked);
    }

    #[test]
    fn test_blocked_ignores_malformed_entries() {
        let blocked: BlockedHours = serde_json::from_value(json!({
            "2": { "20": true, "not-an-hour": true, "21": false },
            "bogus": { "5": true },
            "9": { "5": true }
        }))
        .unwrap();

        assert!(blocked.is_blocked(2, 20));
        assert!(!blocked.is_blocked(2, 21));
        assert_eq!(blocked.iter().count(), 1);
    }

    #[test]
    fn test_apply_shared_keeps_my_name() {
        let mut settings = Settings {
            my_name: "Lara".to_string(),
            ..Settings::default()
        };

        let mut blocked = BlockedHours::default();
        blocked.toggle(5, 10);
        settings.apply_shared(TeamShared {
            start_hour: 9,
            end_hour: 22,
            blocked,
        });

        assert_eq!(settings.my_name, "Lara");
        assert_eq!((settings.start_hour, settings.end_hour), (9, 22));
        assert!(settings.blocked.is_blocked(5, 10));
    }

    #[test]
    fn test_settings_document_uses_camel_case() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert!(value.get("myName").is_some());
        assert!(value.get("startHour").is_some());
        assert!(value.get("endHour").is_some());
    }
}
