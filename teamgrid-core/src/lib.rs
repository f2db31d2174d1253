//! Core types for the teamgrid ecosystem.
//!
//! This crate provides everything the CLI renders and edits:
//! - week addressing (`WeekKey`) and the per-slot state machine (`SlotState`)
//! - the availability store and the blocked-hours overlay
//! - the personal grid and team aggregation engines
//! - local JSON storage and whole-document snapshot sync

pub mod aggregate;
pub mod availability;
pub mod config;
pub mod error;
pub mod grid;
pub mod player;
pub mod settings;
pub mod slot;
pub mod store;
pub mod sync;
pub mod week;
