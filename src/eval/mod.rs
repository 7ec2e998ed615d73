//! Showdown comparison.
//!
//! A [`HandComparator`] turns a card collection (hole cards plus whatever
//! board is known or simulated) into a strength value. Greater means strictly
//! stronger; equal means a split pot.
//!
//! ## Variants
//!
//! - [`HighCard`]: only the single highest rank counts. Default.
//! - [`FiveCard`]: best five-card poker hand out of up to seven cards.
//!
//! [`Comparator`] picks one of them at runtime.

pub mod five_card;
pub mod high_card;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

pub use five_card::{FiveCard, HandCategory, HandRank};
pub use high_card::HighCard;

/// Ranks card collections for showdown.
pub trait HandComparator {
    /// Strength of `cards`; a strictly greater value wins.
    fn strength(&self, cards: &[Card]) -> u32;

    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;
}

/// Runtime choice of comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comparator {
    /// Highest card only.
    #[default]
    HighCard,
    /// Full five-card ranking.
    FiveCard,
}

impl HandComparator for Comparator {
    #[inline]
    fn strength(&self, cards: &[Card]) -> u32 {
        match self {
            Comparator::HighCard => HighCard.strength(cards),
            Comparator::FiveCard => FiveCard.strength(cards),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Comparator::HighCard => HighCard.name(),
            Comparator::FiveCard => FiveCard.name(),
        }
    }
}

impl FromStr for Comparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high-card" => Ok(Comparator::HighCard),
            "five-card" => Ok(Comparator::FiveCard),
            other => Err(format!("unknown comparator {other:?} (expected high-card or five-card)")),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn test_comparator_dispatch() {
        let pair = parse_cards("Qs Qc 2h").unwrap();
        let ace = parse_cards("Ah 3c 2d").unwrap();

        assert!(Comparator::HighCard.strength(&ace) > Comparator::HighCard.strength(&pair));
        assert!(Comparator::FiveCard.strength(&pair) > Comparator::FiveCard.strength(&ace));
    }

    #[test]
    fn test_comparator_names_round_trip() {
        for c in [Comparator::HighCard, Comparator::FiveCard] {
            assert_eq!(c.to_string().parse::<Comparator>().unwrap(), c);
        }
        assert!("royal".parse::<Comparator>().is_err());
        assert_eq!(Comparator::default(), Comparator::HighCard);
    }
}
