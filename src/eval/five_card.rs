//! Poker hand evaluation.
//!
//! Ranks the best five-card hand that can be made from up to seven cards.
//! Rank counts, per-suit rank masks and a straight scan are built in a single
//! pass, so no 21-way combination loop is needed for seven cards.

use std::cmp::Ordering;

use super::HandComparator;
use crate::cards::{Card, NUM_RANKS, NUM_SUITS};

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    /// No pair.
    HighCard = 0,
    /// One pair.
    OnePair = 1,
    /// Two pairs.
    TwoPair = 2,
    /// Trips or a set.
    ThreeOfAKind = 3,
    /// Five consecutive ranks.
    Straight = 4,
    /// Five cards of one suit.
    Flush = 5,
    /// Trips plus a pair.
    FullHouse = 6,
    /// Quads.
    FourOfAKind = 7,
    /// Straight in one suit.
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

/// A hand rank that can be compared.
/// Higher values are better hands.
/// Format: category (4 bits) | kicker1 (4 bits) | kicker2 (4 bits) | ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRank(u32);

impl HandRank {
    fn new(category: HandCategory, kickers: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &k) in kickers.iter().take(5).enumerate() {
            value |= (k as u32) << (16 - i * 4);
        }
        Self(value)
    }

    /// Raw value for comparison.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Hand category encoded in the rank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_bits(self.0 >> 20)
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Full poker hand ranking: pairs, straights, flushes and the rest.
///
/// Not the default comparator. Selecting it changes equities (and therefore
/// EV) relative to reports produced with [`HighCard`](super::HighCard).
#[derive(Debug, Clone, Copy, Default)]
pub struct FiveCard;

impl FiveCard {
    /// Evaluate the best hand in `cards` (1 to 7 cards).
    pub fn evaluate(&self, cards: &[Card]) -> HandRank {
        debug_assert!(cards.len() <= 7, "at most 7 cards");

        let mut rank_counts = [0u8; NUM_RANKS as usize];
        let mut suit_bits = [0u16; NUM_SUITS as usize];
        let mut rank_bits = 0u16;

        for card in cards {
            rank_counts[card.rank() as usize] += 1;
            suit_bits[card.suit() as usize] |= 1 << card.rank();
            rank_bits |= 1 << card.rank();
        }

        let flush_bits = suit_bits.iter().copied().find(|b| b.count_ones() >= 5);

        if let Some(high) = flush_bits.and_then(find_straight) {
            return HandRank::new(HandCategory::StraightFlush, &[high]);
        }

        let mut quads = Vec::new();
        let mut trips = Vec::new();
        let mut pairs = Vec::new();
        let mut singles = Vec::new();

        for rank in (0..NUM_RANKS).rev() {
            match rank_counts[rank as usize] {
                4 => quads.push(rank),
                3 => trips.push(rank),
                2 => pairs.push(rank),
                1 => singles.push(rank),
                _ => {}
            }
        }

        if let Some(&quad) = quads.first() {
            let kicker = (0..NUM_RANKS)
                .rev()
                .find(|&r| r != quad && rank_counts[r as usize] > 0)
                .unwrap_or(0);
            return HandRank::new(HandCategory::FourOfAKind, &[quad, kicker]);
        }

        if let Some(&trip) = trips.first() {
            let pair = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max();
            if let Some(pair) = pair {
                return HandRank::new(HandCategory::FullHouse, &[trip, pair]);
            }
        }

        if let Some(bits) = flush_bits {
            let top: Vec<u8> = ranks_desc(bits).take(5).collect();
            return HandRank::new(HandCategory::Flush, &top);
        }

        if let Some(high) = find_straight(rank_bits) {
            return HandRank::new(HandCategory::Straight, &[high]);
        }

        if let Some(&trip) = trips.first() {
            let mut kickers = vec![trip];
            kickers.extend(singles.iter().take(2));
            return HandRank::new(HandCategory::ThreeOfAKind, &kickers);
        }

        if pairs.len() >= 2 {
            let kicker = pairs.get(2).copied().into_iter().chain(singles.first().copied()).max();
            let mut kickers = vec![pairs[0], pairs[1]];
            kickers.extend(kicker);
            return HandRank::new(HandCategory::TwoPair, &kickers);
        }

        if let Some(&pair) = pairs.first() {
            let mut kickers = vec![pair];
            kickers.extend(singles.iter().take(3));
            return HandRank::new(HandCategory::OnePair, &kickers);
        }

        let kickers: Vec<u8> = singles.into_iter().take(5).collect();
        HandRank::new(HandCategory::HighCard, &kickers)
    }
}

impl HandComparator for FiveCard {
    #[inline]
    fn strength(&self, cards: &[Card]) -> u32 {
        self.evaluate(cards).value()
    }

    fn name(&self) -> &'static str {
        "five-card"
    }
}

/// Ranks present in a mask, highest first.
fn ranks_desc(bits: u16) -> impl Iterator<Item = u8> {
    (0..NUM_RANKS).rev().filter(move |&r| bits & (1 << r) != 0)
}

/// Find the highest straight from a rank bitmask.
/// Returns the high card of the straight, or None if no straight.
fn find_straight(rank_bits: u16) -> Option<u8> {
    for high in (4..NUM_RANKS).rev() {
        let mask = 0b11111u16 << (high - 4);
        if rank_bits & mask == mask {
            return Some(high);
        }
    }
    // Wheel: A-2-3-4-5, five-high
    let wheel = 0b1_0000_0000_1111u16;
    if rank_bits & wheel == wheel {
        return Some(3);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn rank(s: &str) -> HandRank {
        FiveCard.evaluate(&parse_cards(s).unwrap())
    }

    #[test]
    fn test_categories() {
        assert_eq!(rank("As Kd Qh Jc 9s").category(), HandCategory::HighCard);
        assert_eq!(rank("As Ad Kh Qc Js").category(), HandCategory::OnePair);
        assert_eq!(rank("As Ad Kh Kc Js").category(), HandCategory::TwoPair);
        assert_eq!(rank("As Ad Ah Kc Js").category(), HandCategory::ThreeOfAKind);
        assert_eq!(rank("Ts 9d 8h 7c 6s").category(), HandCategory::Straight);
        assert_eq!(rank("As Ks 9s 7s 2s").category(), HandCategory::Flush);
        assert_eq!(rank("As Ad Ah Kc Kd").category(), HandCategory::FullHouse);
        assert_eq!(rank("As Ad Ah Ac Ks").category(), HandCategory::FourOfAKind);
        assert_eq!(rank("9s 8s 7s 6s 5s").category(), HandCategory::StraightFlush);
    }

    #[test]
    fn test_wheel_is_lowest_straight() {
        let wheel = rank("5s 4d 3h 2c As");
        let six_high = rank("6s 5d 4h 3c 2s");
        assert_eq!(wheel.category(), HandCategory::Straight);
        assert!(six_high > wheel);
    }

    #[test]
    fn test_seven_cards_pick_best_five() {
        assert_eq!(rank("Ah As Ad Ac Kh Qs Jd").category(), HandCategory::FourOfAKind);
        // Two trips make a full house.
        assert_eq!(rank("Ah As Ad Kc Kh Ks 2d").category(), HandCategory::FullHouse);
        // Flush and straight together without a straight flush.
        assert_eq!(rank("9h 8h 7h 6c 5h 2h Kd").category(), HandCategory::Flush);
    }

    #[test]
    fn test_kickers_break_ties() {
        assert!(rank("As Ad Kh Qc Js") > rank("Ac Ah Kd Qs Ts"));
        assert_eq!(rank("As Ad Kh Qc Js"), rank("Ac Ah Kd Qs Jc"));
        // Third pair on a seven-card board can play as the kicker.
        assert!(rank("Ks Kd Qh Qc Jd Js 2c") > rank("Kc Kh Qs Qd Td 9s 2d"));
    }

    #[test]
    fn test_pair_beats_ace_high() {
        let aa = rank("Qs Qc 2h 3d 9c Jd Tc");
        let ak = rank("Ah Kd 2h 3d 9c Jd Tc");
        assert!(aa > ak);
    }
}
