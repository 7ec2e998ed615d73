//! Board and deck representations.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::card::{Card, NUM_CARDS};
use crate::error::{EvError, Result};

/// Maximum number of community cards.
pub const MAX_BOARD: usize = 5;

/// All 52 cards in ascending id order.
pub fn deck() -> Vec<Card> {
    (0..NUM_CARDS).map(Card::from_id).collect()
}

/// Build the bitmask of a set of card groups, rejecting any card that
/// appears twice.
pub fn dead_mask(groups: &[&[Card]]) -> Result<u64> {
    let mut mask = 0u64;
    for &card in groups.iter().flat_map(|g| g.iter()) {
        if mask & card.mask() != 0 {
            return Err(EvError::DuplicateCard(card));
        }
        mask |= card.mask();
    }
    Ok(mask)
}

/// Community cards on the board (0-5 cards).
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(MAX_BOARD) }
    }

    /// Create a board from cards.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        if cards.len() > MAX_BOARD {
            return Err(EvError::BoardTooLong(cards.len()));
        }
        Ok(Self { cards })
    }

    /// Number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no card has been dealt yet.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still to come before the river.
    pub fn missing(&self) -> usize {
        MAX_BOARD.saturating_sub(self.cards.len())
    }

    /// Board cards in dealing order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// The live cards left after removing dead ones.
///
/// Sampling reorders the internal buffer in place, so one deck can be reused
/// for every iteration of a simulation without reallocating.
#[derive(Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Full 52-card deck.
    pub fn full() -> Self {
        Self { cards: deck() }
    }

    /// Deck with every card in `dead` (a card bitmask) removed.
    pub fn without(dead: u64) -> Self {
        let cards = (0..NUM_CARDS)
            .map(Card::from_id)
            .filter(|c| dead & c.mask() == 0)
            .collect();
        Self { cards }
    }

    /// Number of live cards.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Live cards, in no particular order after sampling.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Draw `n` distinct cards uniformly at random, without replacement.
    ///
    /// The deck itself is not depleted; the returned slice borrows the
    /// shuffled prefix of the buffer.
    pub fn sample<R: Rng>(&mut self, n: usize, rng: &mut R) -> Result<&[Card]> {
        if n > self.cards.len() {
            return Err(EvError::DeckExhausted {
                needed: n,
                remaining: self.cards.len(),
            });
        }
        let (picked, _) = self.cards.partial_shuffle(rng, n);
        Ok(picked)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_deck_is_complete() {
        let cards = deck();
        assert_eq!(cards.len(), 52);
        let mask = dead_mask(&[&cards]).unwrap();
        assert_eq!(mask.count_ones(), 52);
        assert_eq!(cards, deck());
    }

    #[test]
    fn test_dead_mask_rejects_duplicates() {
        let hero = parse_cards("Ah Kd").unwrap();
        let villain = parse_cards("Qs Ah").unwrap();
        match dead_mask(&[&hero, &villain]) {
            Err(EvError::DuplicateCard(card)) => assert_eq!(card.to_string(), "Ah"),
            other => panic!("expected duplicate, got {:?}", other),
        }
    }

    #[test]
    fn test_board() {
        let board = Board::from_cards(parse_cards("Ah Ks Qd").unwrap()).unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.missing(), 2);
        assert_eq!(board.to_string(), "AhKsQd");

        let too_long = parse_cards("2c 3c 4c 5c 6c 7c").unwrap();
        assert!(matches!(Board::from_cards(too_long), Err(EvError::BoardTooLong(6))));
    }

    #[test]
    fn test_deck_without() {
        let dead = parse_cards("As Ah").unwrap();
        let deck = Deck::without(dead_mask(&[&dead]).unwrap());
        assert_eq!(deck.remaining(), 50);
        assert!(!deck.cards().contains(&dead[0]));
    }

    #[test]
    fn test_sample_skips_dead_cards() {
        let dead = parse_cards("As Ah Ad Ac Ks Kh").unwrap();
        let mask = dead_mask(&[&dead]).unwrap();
        let mut deck = Deck::without(mask);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let drawn = deck.sample(5, &mut rng).unwrap();
            assert_eq!(drawn.len(), 5);
            let drawn_mask = dead_mask(&[drawn]).unwrap();
            assert_eq!(drawn_mask & mask, 0);
        }
        assert_eq!(deck.remaining(), 46);
    }

    #[test]
    fn test_sample_exhaustion() {
        let all = deck();
        let mut deck = Deck::without(dead_mask(&[&all[..50]]).unwrap());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            deck.sample(3, &mut rng),
            Err(EvError::DeckExhausted { needed: 3, remaining: 2 })
        ));
    }
}
