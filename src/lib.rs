//! # All-in Adjusted EV
//!
//! Replaces the luck of all-in showdowns with their expectation. For every
//! hand in which the hero got all-in heads-up and both hands were shown, the
//! remaining board is simulated to estimate the hero's equity, the pot is
//! split by that equity, and the session's realized result is compared with
//! the equity-adjusted one.
//!
//! ## Quick Start
//!
//! ```ignore
//! use allin_ev::history::{read_hands, ParseOptions};
//! use allin_ev::session::{Session, SessionConfig};
//!
//! let hands = read_hands(&["hh/"], &ParseOptions::default())?;
//! let report = Session::new(SessionConfig::default().with_seed(42))?.run(&hands)?;
//! println!("Net {:.2}, EV {:.2}", report.totals.net_total, report.totals.ev_total);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Card encoding, board and live deck
//! - [`eval`]: Showdown comparators (highest card, five-card ranking)
//! - [`equity`]: Monte Carlo equity estimator
//! - [`ev`]: Per-hand EV attribution
//! - [`session`]: Aggregation over a session
//! - [`history`]: PokerStars hand-history reader and filters
//! - [`report`]: CSV and HTML output
//!
//! ## Architecture
//!
//! ```text
//!   hand-history files
//!          │
//!          ▼
//!   ┌─────────────┐    ┌────────────┐
//!   │   history   │───▶│ HandFilter │
//!   └─────────────┘    └────────────┘
//!                            │ Vec<Hand>
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Session                                │
//! │  - one seeded RNG          - per-hand skip / failure tracking   │
//! │                                                                 │
//! │   EquityEstimator<Comparator> ──▶ attribute_ev ──▶ EvRow        │
//! └─────────────────────────────────────────────────────────────────┘
//!                            │ SessionReport
//!                            ▼
//!                 ┌─────────────────────┐
//!                 │ report: CSV / HTML  │
//!                 └─────────────────────┘
//! ```

#![warn(missing_docs)]

/// Card encoding and the live deck.
pub mod cards;

/// Monte Carlo equity estimation.
pub mod equity;

/// Error types.
pub mod error;

/// EV attribution for one hand.
pub mod ev;

/// Showdown comparators.
pub mod eval;

/// Played hands.
pub mod hand;

/// Hand-history reading and filtering.
pub mod history;

/// CSV and HTML reports.
pub mod report;

/// Session aggregation.
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use cards::{Board, Card, Deck};
pub use equity::{EquityEstimator, Opponent, Tally};
pub use error::{EvError, Result};
pub use ev::{attribute_ev, EvRow, RakePolicy};
pub use eval::{Comparator, FiveCard, HandComparator, HighCard};
pub use hand::{GameMode, Hand, Player};
pub use session::{Session, SessionConfig, SessionReport, SessionTotals};
