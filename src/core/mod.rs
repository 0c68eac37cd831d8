//! Core session types: players, roster, turn rotation, log, RNG.
//!
//! Everything here is variant-agnostic. The scoring engines in
//! [`crate::games`] build their rules on top of these building blocks.

pub mod log;
pub mod player;
pub mod rng;
pub mod roster;

pub use log::{GameLog, LogEntry};
pub use player::{Player, PlayerId};
pub use rng::GameRng;
pub use roster::{PlayDirection, Roster};
