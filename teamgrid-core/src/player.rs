//! Players and roster management.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TeamGridError, TeamGridResult};

/// Opaque player identifier. Referenced everywhere a player is stored;
/// deleting a player does not rewrite availability keyed by their id.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Generate a fresh id for a newly added player.
    pub fn generate() -> PlayerId {
        PlayerId(format!("p_{}", Uuid::new_v4().simple()))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// The team roster. Order is significant: aggregation details list players
/// in roster order, not alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<Player>);

impl Roster {
    pub fn new(players: Vec<Player>) -> Roster {
        Roster(players)
    }

    pub fn players(&self) -> &[Player] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.0.iter().find(|p| &p.id == id)
    }

    /// Case-insensitive name lookup (used by the CLI's --player flag).
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        self.0
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Append a player with a generated id, returning it.
    pub fn add(&mut self, name: &str) -> PlayerId {
        let id = PlayerId::generate();
        self.0.push(Player {
            id: id.clone(),
            name: name.trim().to_string(),
        });
        id
    }

    pub fn rename(&mut self, id: &PlayerId, name: &str) -> TeamGridResult<()> {
        let player = self
            .0
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| TeamGridError::PlayerNotFound(id.to_string()))?;
        player.name = name.trim().to_string();
        Ok(())
    }

    /// Remove a player from the roster. Their historical availability
    /// entries stay in the store, orphaned.
    pub fn remove(&mut self, id: &PlayerId) -> TeamGridResult<Player> {
        let idx = self
            .0
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| TeamGridError::PlayerNotFound(id.to_string()))?;
        Ok(self.0.remove(idx))
    }
}

// =============================================================================
// Tests
// =============================================================================
