//! Per-slot availability state and its transition rule.

use serde::{Deserialize, Serialize};

/// A player's declared availability for one hour of one day.
///
/// Serialized as its integer code (0..3) to stay compatible with the
/// snapshot document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SlotState {
    /// No answer yet. Every unset slot reads as this.
    #[default]
    Empty,
    Yes,
    Maybe,
    No,
}

impl SlotState {
    /// The state a repeated edit on the same cell cycles to:
    /// Empty -> Yes -> Maybe -> No -> Empty.
    pub fn next(self) -> SlotState {
        match self {
            SlotState::Empty => SlotState::Yes,
            SlotState::Yes => SlotState::Maybe,
            SlotState::Maybe => SlotState::No,
            SlotState::No => SlotState::Empty,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<SlotState> for u8 {
    fn from(state: SlotState) -> u8 {
        state as u8
    }
}

impl TryFrom<u8> for SlotState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SlotState::Empty),
            1 => Ok(SlotState::Yes),
            2 => Ok(SlotState::Maybe),
            3 => Ok(SlotState::No),
            other => Err(format!("invalid slot state code: {}", other)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        assert_eq!(SlotState::Empty.next(), SlotState::Yes);
        assert_eq!(SlotState::Yes.next(), SlotState::Maybe);
        assert_eq!(SlotState::Maybe.next(), SlotState::No);
        assert_eq!(SlotState::No.next(), SlotState::Empty);
    }

    #[test]
    fn test_cycle_returns_to_start_after_four_steps() {
        for start in [
            SlotState::Empty,
            SlotState::Yes,
            SlotState::Maybe,
            SlotState::No,
        ] {
            assert_eq!(start.next().next().next().next(), start);
        }
    }

    #[test]
    fn test_codes_round_trip() {
        for code in 0..4u8 {
            let state = SlotState::try_from(code).unwrap();
            assert_eq!(state.code(), code);
        }
        assert!(SlotState::try_from(4).is_err());
    }

    #[test]
    fn test_serde_uses_integer_codes() {
        assert_eq!(serde_json::to_string(&SlotState::Maybe).unwrap(), "2");
        let state: SlotState = serde_json::from_str("3").unwrap();
        assert_eq!(state, SlotState::No);
        assert!(serde_json::from_str::<SlotState>("9").is_err());
    }
}
