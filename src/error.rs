//! Error types shared by the core and its collaborators.

use thiserror::Error;

use crate::cards::Card;

/// Errors produced while simulating, attributing or ingesting hands.
#[derive(Debug, Error)]
pub enum EvError {
    /// A card token could not be parsed.
    #[error("invalid card: {0:?}")]
    InvalidCard(String),

    /// The same card appears more than once across hole cards and board.
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),

    /// More than five community cards.
    #[error("board has {0} cards, at most 5 allowed")]
    BoardTooLong(usize),

    /// A player in the matchup does not hold exactly two cards.
    #[error("player {player} holds {count} hole cards, expected 2")]
    IncompleteHoleCards {
        /// Player name.
        player: String,
        /// Number of cards actually held.
        count: usize,
    },

    /// The simulation was asked to run zero iterations.
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    /// Not enough live cards to complete the deal.
    #[error("deck exhausted: need {needed} cards, {remaining} remaining")]
    DeckExhausted {
        /// Cards requested.
        needed: usize,
        /// Cards left in the deck.
        remaining: usize,
    },

    /// A hand-history block could not be parsed.
    #[error("hand {hand_id}: {message}")]
    Parse {
        /// Hand id, or `?` when the header itself is broken.
        hand_id: String,
        /// What went wrong.
        message: String,
    },

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EvError {
    /// Whether the error indicates corrupted input that should abort a session.
    ///
    /// Only deck exhaustion qualifies; every other per-hand error is recorded
    /// and the session moves on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EvError::DeckExhausted { .. })
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exhaustion_is_fatal() {
        assert!(EvError::DeckExhausted { needed: 5, remaining: 2 }.is_fatal());
        assert!(!EvError::ZeroIterations.is_fatal());
        assert!(!EvError::BoardTooLong(6).is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = EvError::DeckExhausted { needed: 5, remaining: 2 };
        assert_eq!(err.to_string(), "deck exhausted: need 5 cards, 2 remaining");

        let err = EvError::IncompleteHoleCards { player: "Hero".into(), count: 1 };
        assert_eq!(err.to_string(), "player Hero holds 1 hole cards, expected 2");
    }
}
