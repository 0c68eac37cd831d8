//! Error types for engine operations.
//!
//! Every failure here is local-recovery only: an operation that returns an
//! error has not mutated any state, and the session keeps running. Storage
//! failures live in [`crate::store::StoreError`] and are swallowed at the
//! persistence helpers rather than propagated into game logic.

use thiserror::Error;

use crate::core::PlayerId;

/// Error produced by roster and scoring-engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A player name was empty. The add/rename is aborted.
    #[error("player name must not be empty")]
    EmptyPlayerName,

    /// The referenced player does not exist in the roster.
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),

    /// An operation needed a selected player and none was selected.
    #[error("no player is selected")]
    NoPlayerSelected,

    /// The roster has no players at all.
    #[error("roster has no players")]
    EmptyRoster,

    /// Turn rotation was asked to find an active player and there is none.
    ///
    /// Guards the rotation loop: without it, advancing over a fully
    /// deactivated roster would never terminate.
    #[error("roster has no active players")]
    NoActivePlayers,

    /// A bid or result was recorded against a round that has not started.
    #[error("round {round} has not started")]
    RoundNotStarted { round: usize },

    /// A bid or result was recorded against an already completed round.
    #[error("round {round} is already complete")]
    RoundComplete { round: usize },

    /// A round result was recorded before the player placed a bid.
    #[error("no bid recorded for round {round}")]
    BidNotSet { round: usize },

    /// A persisted game snapshot could not be decoded.
    #[error("invalid game snapshot: {0}")]
    Snapshot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", EngineError::UnknownPlayer(PlayerId::new(7))),
            "no player with id Player(7)"
        );
        assert_eq!(
            format!("{}", EngineError::BidNotSet { round: 3 }),
            "no bid recorded for round 3"
        );
    }
}
