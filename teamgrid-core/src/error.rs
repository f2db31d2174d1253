//! Error types for the teamgrid ecosystem.

use thiserror::Error;

/// Errors that can occur in teamgrid operations.
#[derive(Error, Debug)]
pub enum TeamGridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid hour bounds: start {start}, end {end} (need 0 <= start < end <= 24)")]
    InvalidHours { start: u8, end: u8 },

    #[error("Invalid day index {0} (expected 0=Mon..6=Sun)")]
    InvalidDay(u8),

    #[error("Hour {0} is outside the configured grid")]
    HourOutOfRange(u8),

    #[error("Slot {day}/{hour} is blocked for the whole team")]
    BlockedSlot { day: u8, hour: u8 },

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Sync error: {0}")]
    Sync(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for teamgrid operations.
pub type TeamGridResult<T> = Result<T, TeamGridError>;
