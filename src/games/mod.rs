//! Variant scoring engines.
//!
//! Three rule sets share the roster and turn-rotation core:
//!
//! - [`generic`]: free-form counter, scores edited directly
//! - [`farkle`]: pending combos, busts, strikes, penalties
//! - [`skull_king`]: ten lock-step rounds of bids and tricks
//!
//! Each engine implements [`crate::session::ScoringEngine`] so a
//! [`crate::session::GameSession`] can drive it.

pub mod farkle;
pub mod generic;
pub mod skull_king;

pub use farkle::{FarkleGame, FarkleHand, FarkleSnapshot};
pub use generic::{GenericGame, GenericSnapshot};
pub use skull_king::{Round, RoundSheet, SkullKingGame, SkullKingSnapshot, ROUND_COUNT};
