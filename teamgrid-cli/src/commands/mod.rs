pub mod blocked;
pub mod cell;
pub mod players;
pub mod set;
pub mod settings;
pub mod sync;
pub mod team;
pub mod week;
