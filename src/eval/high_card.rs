//! Highest-card comparator.

use super::HandComparator;
use crate::cards::Card;

/// Ranks a card collection by its single highest rank.
///
/// Suits, pairs, straights and flushes are ignored: any ace-high collection
/// beats any king-high collection, and two collections tie whenever their top
/// ranks match. Equities computed with this comparator are only as good as
/// that rule. See [`FiveCard`](super::FiveCard) for real hand ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighCard;

impl HandComparator for HighCard {
    /// Rank index of the highest card (Ace = 12). Empty input ranks 0.
    #[inline]
    fn strength(&self, cards: &[Card]) -> u32 {
        cards.iter().map(|c| c.rank() as u32).max().unwrap_or(0)
    }

    fn name(&self) -> &'static str {
        "high-card"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, RANK_A, RANK_J};

    #[test]
    fn test_strength_is_max_rank() {
        let hero = parse_cards("Ah Kd 2h 3d 9c Jd Tc").unwrap();
        let villain = parse_cards("Qs Qc 2h 3d 9c Jd Tc").unwrap();
        assert_eq!(HighCard.strength(&hero), RANK_A as u32);
        assert_eq!(HighCard.strength(&villain), 10);

        let board_only = parse_cards("2h 3d 9c Jd Tc").unwrap();
        assert_eq!(HighCard.strength(&board_only), RANK_J as u32);
    }

    #[test]
    fn test_order_and_suit_invariance() {
        let a = parse_cards("2c 9d Ks 4h").unwrap();
        let mut b = a.clone();
        b.reverse();
        assert_eq!(HighCard.strength(&a), HighCard.strength(&b));

        // Pairs and flushes do not matter, only the top rank.
        let pair = parse_cards("Kc Kd 4h").unwrap();
        let flush = parse_cards("Ks 2s 3s 4s 5s").unwrap();
        assert_eq!(HighCard.strength(&pair), HighCard.strength(&flush));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(HighCard.strength(&[]), 0);
    }
}
