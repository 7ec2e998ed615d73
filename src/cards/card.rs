//! Single playing card.

use std::fmt;
use std::str::FromStr;

use crate::error::EvError;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
/// Rank 3.
pub const RANK_3: u8 = 1;
/// Rank 4.
pub const RANK_4: u8 = 2;
/// Rank 5.
pub const RANK_5: u8 = 3;
/// Rank 6.
pub const RANK_6: u8 = 4;
/// Rank 7.
pub const RANK_7: u8 = 5;
/// Rank 8.
pub const RANK_8: u8 = 6;
/// Rank 9.
pub const RANK_9: u8 = 7;
/// Rank ten.
pub const RANK_T: u8 = 8;
/// Rank jack.
pub const RANK_J: u8 = 9;
/// Rank queen.
pub const RANK_Q: u8 = 10;
/// Rank king.
pub const RANK_K: u8 = 11;
/// Rank ace, the highest.
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
/// Diamonds.
pub const SUIT_DIAMONDS: u8 = 1;
/// Hearts.
pub const SUIT_HEARTS: u8 = 2;
/// Spades.
pub const SUIT_SPADES: u8 = 3;

/// Number of ranks.
pub const NUM_RANKS: u8 = 13;
/// Number of suits.
pub const NUM_SUITS: u8 = 4;
/// Cards in a standard deck.
pub const NUM_CARDS: u8 = NUM_RANKS * NUM_SUITS;

const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// A single playing card.
///
/// Cards are ordered by id (`rank * 4 + suit`), which sorts by rank first.
/// Suits carry no strength; only comparators decide what beats what.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < NUM_RANKS, "rank must be 0-12");
        debug_assert!(suit < NUM_SUITS, "suit must be 0-3");
        Self { id: rank * NUM_SUITS + suit }
    }

    /// Create a card from its id (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < NUM_CARDS, "card id must be 0-51");
        Self { id }
    }

    /// Card id (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Rank index, 0 for a deuce up to 12 for an ace.
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / NUM_SUITS
    }

    /// Suit index (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % NUM_SUITS
    }

    /// Bit of this card in a 52-bit card mask.
    #[inline]
    pub fn mask(&self) -> u64 {
        1u64 << self.id
    }

    /// Rank character (`2`-`9`, `T`, `J`, `Q`, `K`, `A`).
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Suit character (`c`, `d`, `h`, `s`).
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl FromStr for Card {
    type Err = EvError;

    /// Parse a two-character token like `"As"`, `"Td"` or `"2c"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EvError::InvalidCard(s.to_string());
        let mut chars = s.chars();
        let (r, u) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(u), None) => (r, u),
            _ => return Err(invalid()),
        };

        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == r.to_ascii_uppercase())
            .ok_or_else(invalid)?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == u.to_ascii_lowercase())
            .ok_or_else(invalid)?;

        Ok(Self::new(rank as u8, suit as u8))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Parse whitespace-separated card tokens, e.g. `"Ah Kd"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, EvError> {
    s.split_whitespace().map(str::parse).collect()
}
