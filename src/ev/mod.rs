//! EV attribution for a single hand.
//!
//! The realized showdown result is replaced by its expectation:
//!
//! ```text
//! eligible_pot    = total_pot - rake        (or total_pot before rake)
//! hero_invested   = eligible_pot / 2        (even-split heads-up assumption)
//! ev_contribution = equity * eligible_pot - hero_invested
//! ```
//!
//! The even split assumes a symmetric two-way all-in with no dead money and
//! no side pots. Multi-way and multi-street pots are mis-attributed under it;
//! [`InvestmentModel`] is where a model driven by betting action would go.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::hand::Hand;

/// Whether equity is applied to the pot before or after the house cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RakePolicy {
    /// Equity applies to the pot net of rake.
    #[default]
    AfterRake,
    /// Equity applies to the full pot.
    BeforeRake,
}

impl RakePolicy {
    /// Map the "compute EV before rake" switch.
    pub fn from_before_rake(before_rake: bool) -> Self {
        if before_rake {
            RakePolicy::BeforeRake
        } else {
            RakePolicy::AfterRake
        }
    }

    /// Pot the equity is applied against.
    pub fn eligible_pot(&self, total_pot: f64, rake: f64) -> f64 {
        match self {
            RakePolicy::AfterRake => total_pot - rake,
            RakePolicy::BeforeRake => total_pot,
        }
    }
}

/// How much of the eligible pot the hero is assumed to have put in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentModel {
    /// Half the eligible pot: both players got it in for the same amount.
    #[default]
    EvenSplitHeadsUp,
}

impl InvestmentModel {
    /// Hero's assumed share of `eligible_pot`.
    pub fn hero_invested(&self, eligible_pot: f64) -> f64 {
        match self {
            InvestmentModel::EvenSplitHeadsUp => eligible_pot / 2.0,
        }
    }
}

/// EV attribution for one qualifying hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvRow {
    /// Hand id from the history.
    pub hand_id: String,
    /// When the hand was played.
    pub date: NaiveDateTime,
    /// Hero name.
    pub hero: String,
    /// Hero's showdown equity in `[0, 1]`.
    pub equity: f64,
    /// Pot the equity is applied against.
    pub eligible_pot: f64,
    /// Hero's assumed investment.
    pub hero_invested: f64,
    /// Expected profit under the equity-weighted model.
    pub ev_contribution: f64,
    /// Realized profit.
    pub hero_net: f64,
}

/// Attribute EV for `hand` given hero's `equity`.
///
/// Returns `None` when the hand has no qualifying two-way matchup (see
/// [`Hand::matchup`]); such hands are skipped, not failed.
pub fn attribute_ev(hand: &Hand, equity: f64, rake: RakePolicy) -> Option<EvRow> {
    hand.matchup()?;
    Some(attribute_unchecked(hand, equity, rake, InvestmentModel::EvenSplitHeadsUp))
}

/// Build the row without checking qualification.
///
/// Used when the caller has already settled the matchup itself, e.g. against
/// a random opponent whose cards were never shown.
pub fn attribute_unchecked(
    hand: &Hand,
    equity: f64,
    rake: RakePolicy,
    model: InvestmentModel,
) -> EvRow {
    let eligible_pot = rake.eligible_pot(hand.total_pot, hand.rake);
    let hero_invested = model.hero_invested(eligible_pot);
    EvRow {
        hand_id: hand.id.clone(),
        date: hand.date,
        hero: hand.hero.clone(),
        equity,
        eligible_pot,
        hero_invested,
        ev_contribution: equity * eligible_pot - hero_invested,
        hero_net: hand.hero_net(),
    }
}
