//! Monte Carlo showdown equity.
//!
//! Given both players' hole cards and a partial board, the estimator
//! repeatedly completes the board from the live deck and asks a
//! [`HandComparator`] who wins. Equity is `(wins + ties / 2) / iterations`.
//!
//! The random source is passed in by the caller, so the same seed and the
//! same arguments always reproduce the same equity:
//!
//! ```
//! use allin_ev::cards::parse_cards;
//! use allin_ev::equity::EquityEstimator;
//! use allin_ev::eval::HighCard;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let hero = parse_cards("Ah Kd").unwrap();
//! let villain = parse_cards("Qs Qc").unwrap();
//! let estimator = EquityEstimator::new(HighCard);
//!
//! let a = estimator.equity(&hero, &villain, &[], 1_000, &mut StdRng::seed_from_u64(7)).unwrap();
//! let b = estimator.equity(&hero, &villain, &[], 1_000, &mut StdRng::seed_from_u64(7)).unwrap();
//! assert_eq!(a, b);
//! ```

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::cards::{dead_mask, Card, Deck, MAX_BOARD};
use crate::error::{EvError, Result};
use crate::eval::{HandComparator, HighCard};

/// Hole cards per player.
const HOLE_CARDS: usize = 2;

/// What is known about the opponent's hole cards.
#[derive(Debug, Clone, Copy)]
pub enum Opponent<'a> {
    /// Cards shown at showdown.
    Known(&'a [Card]),
    /// Cards never shown; dealt at random from the live deck each iteration.
    Random,
}

/// Showdown counts from one simulation, from the hero's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Showdowns the hero won.
    pub wins: u64,
    /// Showdowns that split.
    pub ties: u64,
    /// Showdowns the hero lost.
    pub losses: u64,
}

impl Tally {
    /// Total showdowns counted.
    pub fn iterations(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// Win probability with ties counted as half. Zero for an empty tally.
    pub fn equity(&self) -> f64 {
        let n = self.iterations();
        if n == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / n as f64
    }

    fn record(&mut self, outcome: Ordering, times: u64) {
        match outcome {
            Ordering::Greater => self.wins += times,
            Ordering::Equal => self.ties += times,
            Ordering::Less => self.losses += times,
        }
    }
}

/// Heads-up equity estimator over a chosen comparator.
#[derive(Debug, Clone, Default)]
pub struct EquityEstimator<C> {
    comparator: C,
}

impl<C: HandComparator> EquityEstimator<C> {
    /// Create an estimator over `comparator`.
    pub fn new(comparator: C) -> Self {
        Self { comparator }
    }

    /// The comparator in use.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Hero's equity against known villain cards.
    pub fn equity<R: Rng>(
        &self,
        hero: &[Card],
        villain: &[Card],
        board: &[Card],
        iterations: u64,
        rng: &mut R,
    ) -> Result<f64> {
        self.tally(hero, Opponent::Known(villain), board, iterations, rng)
            .map(|t| t.equity())
    }

    /// Run the simulation and return the raw counts.
    ///
    /// # Errors
    /// - [`EvError::ZeroIterations`] when `iterations == 0`
    /// - [`EvError::BoardTooLong`] for more than five board cards
    /// - [`EvError::IncompleteHoleCards`] unless each known hand has two cards
    /// - [`EvError::DuplicateCard`] when hero, villain and board overlap
    /// - [`EvError::DeckExhausted`] when the live deck cannot complete the deal
    pub fn tally<R: Rng>(
        &self,
        hero: &[Card],
        opponent: Opponent<'_>,
        board: &[Card],
        iterations: u64,
        rng: &mut R,
    ) -> Result<Tally> {
        if iterations == 0 {
            return Err(EvError::ZeroIterations);
        }
        if board.len() > MAX_BOARD {
            return Err(EvError::BoardTooLong(board.len()));
        }
        check_hole_cards("hero", hero)?;

        let villain: &[Card] = match opponent {
            Opponent::Known(cards) => {
                check_hole_cards("villain", cards)?;
                cards
            }
            Opponent::Random => &[],
        };

        let dead = dead_mask(&[hero, villain, board])?;
        let board_needed = MAX_BOARD - board.len();
        let villain_needed = HOLE_CARDS - villain.len();
        let needed = board_needed + villain_needed;

        let mut hero_hand: Vec<Card> = Vec::with_capacity(HOLE_CARDS + MAX_BOARD);
        hero_hand.extend_from_slice(hero);
        hero_hand.extend_from_slice(board);
        let mut villain_hand: Vec<Card> = Vec::with_capacity(HOLE_CARDS + MAX_BOARD);
        villain_hand.extend_from_slice(villain);
        villain_hand.extend_from_slice(board);

        let mut tally = Tally::default();

        // Nothing left to deal: the showdown is already decided.
        if needed == 0 {
            let outcome = self.compare(&hero_hand, &villain_hand);
            tally.record(outcome, iterations);
            return Ok(tally);
        }

        let mut deck = Deck::without(dead);
        if deck.remaining() < needed {
            return Err(EvError::DeckExhausted {
                needed,
                remaining: deck.remaining(),
            });
        }

        let hero_base = hero_hand.len();
        let villain_base = villain_hand.len();

        for _ in 0..iterations {
            let drawn = deck.sample(needed, rng)?;
            let (villain_cards, runout) = drawn.split_at(villain_needed);

            hero_hand.truncate(hero_base);
            hero_hand.extend_from_slice(runout);
            villain_hand.truncate(villain_base);
            villain_hand.extend_from_slice(villain_cards);
            villain_hand.extend_from_slice(runout);

            tally.record(self.compare(&hero_hand, &villain_hand), 1);
        }

        Ok(tally)
    }

    #[inline]
    fn compare(&self, hero: &[Card], villain: &[Card]) -> Ordering {
        self.comparator
            .strength(hero)
            .cmp(&self.comparator.strength(villain))
    }
}

fn check_hole_cards(player: &str, cards: &[Card]) -> Result<()> {
    if cards.len() != HOLE_CARDS {
        return Err(EvError::IncompleteHoleCards {
            player: player.to_string(),
            count: cards.len(),
        });
    }
    Ok(())
}

/// One-shot equity with the highest-card comparator.
///
/// Seeds a fresh generator from `seed`, or from OS entropy when `None`.
pub fn equity(
    hero: &[Card],
    villain: &[Card],
    board: &[Card],
    iterations: u64,
    seed: Option<u64>,
) -> Result<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    EquityEstimator::new(HighCard).equity(hero, villain, board, iterations, &mut rng)
}
