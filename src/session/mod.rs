//! Session aggregation.
//!
//! A [`Session`] walks hands in the order given, simulates each qualifying
//! showdown, attributes EV and keeps running totals:
//!
//! ```text
//! net_total = Σ hero_net
//! ev_total  = Σ ev_contribution
//! diff      = ev_total - net_total
//! ```
//!
//! A positive `diff` means the hero ran below expectation.
//!
//! Hands without a two-way showdown are skipped. A hand that violates a
//! precondition (overlapping cards, oversized board) is recorded as a
//! [`HandFailure`] and the session moves on; deck exhaustion means the input
//! is corrupt and aborts the whole run.

pub mod config;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::equity::{EquityEstimator, Opponent};
use crate::error::{EvError, Result};
use crate::ev::{attribute_ev, attribute_unchecked, EvRow, InvestmentModel, RakePolicy};
use crate::eval::{Comparator, HandComparator};
use crate::hand::Hand;

pub use config::{SessionConfig, DEFAULT_ITERATIONS};

/// What happened to one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An EV row was produced.
    Attributed,
    /// No qualifying matchup.
    Skipped,
    /// Precondition violation, recorded in the report.
    Failed,
}

/// A hand rejected because its data was inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandFailure {
    /// Hand id.
    pub hand_id: String,
    /// Error message.
    pub reason: String,
}

/// Session-level sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTotals {
    /// Sum of realized results.
    pub net_total: f64,
    /// Sum of EV contributions.
    pub ev_total: f64,
    /// `ev_total - net_total`.
    pub diff: f64,
}

impl SessionTotals {
    /// Sum over `rows`.
    pub fn from_rows(rows: &[EvRow]) -> Self {
        let net_total: f64 = rows.iter().map(|r| r.hero_net).sum();
        let ev_total: f64 = rows.iter().map(|r| r.ev_contribution).sum();
        Self {
            net_total,
            ev_total,
            diff: ev_total - net_total,
        }
    }
}

/// Running sums after a given row, for time-series output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// 1-based position among the rows.
    pub index: usize,
    /// Hand id of the row.
    pub hand_id: String,
    /// Cumulative realized result.
    pub net: f64,
    /// Cumulative EV.
    pub ev: f64,
}

/// Everything a session produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Configuration the run used.
    pub config: SessionConfig,
    /// One row per qualifying hand, in input order.
    pub rows: Vec<EvRow>,
    /// Session sums.
    pub totals: SessionTotals,
    /// Hands without a qualifying showdown.
    pub skipped: usize,
    /// Hands rejected for inconsistent data.
    pub failures: Vec<HandFailure>,
}

impl SessionReport {
    /// Cumulative net and EV after each row.
    pub fn cumulative(&self) -> Vec<CumulativePoint> {
        let mut net = 0.0;
        let mut ev = 0.0;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                net += row.hero_net;
                ev += row.ev_contribution;
                CumulativePoint {
                    index: i + 1,
                    hand_id: row.hand_id.clone(),
                    net,
                    ev,
                }
            })
            .collect()
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// Drives equity estimation and EV attribution over a sequence of hands.
pub struct Session {
    config: SessionConfig,
    estimator: EquityEstimator<Comparator>,
    /// One generator for the whole run, seeded once.
    rng: StdRng,
    rows: Vec<EvRow>,
    skipped: usize,
    failures: Vec<HandFailure>,
}

impl Session {
    /// Create a session. Fails if the configuration is invalid.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            "session: {} iterations per hand, comparator {}, seed {:?}",
            config.iterations,
            config.comparator.name(),
            config.seed
        );
        Ok(Self {
            estimator: EquityEstimator::new(config.comparator),
            config,
            rng,
            rows: Vec::new(),
            skipped: 0,
            failures: Vec::new(),
        })
    }

    /// Run a whole sequence of hands and return the report.
    pub fn run(mut self, hands: &[Hand]) -> Result<SessionReport> {
        for hand in hands {
            self.push(hand)?;
        }
        Ok(self.finish())
    }

    /// Process one hand.
    ///
    /// # Errors
    /// Only fatal errors (deck exhaustion) are returned; other per-hand
    /// errors become [`Outcome::Failed`].
    pub fn push(&mut self, hand: &Hand) -> Result<Outcome> {
        let matchup = if self.config.assume_random_opponent {
            hand.matchup_allowing_unknown()
        } else {
            hand.matchup()
        };
        let Some(matchup) = matchup else {
            debug!("hand {}: no two-way showdown, skipped", hand.id);
            self.skipped += 1;
            return Ok(Outcome::Skipped);
        };

        // A partly shown hand goes through the known path and fails there.
        let opponent = if matchup.villain.cards.is_empty() {
            Opponent::Random
        } else {
            Opponent::Known(&matchup.villain.cards)
        };

        let tally = match self.estimator.tally(
            &matchup.hero.cards,
            opponent,
            hand.board.cards(),
            self.config.iterations,
            &mut self.rng,
        ) {
            Ok(tally) => tally,
            Err(e) => return self.reject(hand, e),
        };

        let policy = self.rake_policy();
        let equity = tally.equity();
        let row = match opponent {
            Opponent::Known(_) => attribute_ev(hand, equity, policy),
            Opponent::Random => Some(attribute_unchecked(
                hand,
                equity,
                policy,
                InvestmentModel::EvenSplitHeadsUp,
            )),
        };
        let Some(row) = row else {
            self.skipped += 1;
            return Ok(Outcome::Skipped);
        };

        debug!(
            "hand {}: {} vs {} equity {:.4}, ev {:+.2}, net {:+.2}",
            hand.id,
            matchup.hero.name,
            matchup.villain.name,
            row.equity,
            row.ev_contribution,
            row.hero_net
        );
        self.rows.push(row);
        Ok(Outcome::Attributed)
    }

    /// Rows produced so far.
    pub fn rows(&self) -> &[EvRow] {
        &self.rows
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> &[HandFailure] {
        &self.failures
    }

    /// Totals over the rows produced so far.
    pub fn totals(&self) -> SessionTotals {
        SessionTotals::from_rows(&self.rows)
    }

    /// Record a per-hand error, or pass it on when it must abort the run.
    fn reject(&mut self, hand: &Hand, e: EvError) -> Result<Outcome> {
        if e.is_fatal() {
            return Err(e);
        }
        warn!("hand {}: {}", hand.id, e);
        self.failures.push(HandFailure {
            hand_id: hand.id.clone(),
            reason: e.to_string(),
        });
        Ok(Outcome::Failed)
    }

    fn rake_policy(&self) -> RakePolicy {
        self.config.rake_policy()
    }

    /// Close the session.
    pub fn finish(self) -> SessionReport {
        let totals = self.totals();
        info!(
            "session done: {} rows, {} skipped, {} failed",
            self.rows.len(),
            self.skipped,
            self.failures.len()
        );
        SessionReport {
            config: self.config,
            rows: self.rows,
            totals,
            skipped: self.skipped,
            failures: self.failures,
        }
    }
}
