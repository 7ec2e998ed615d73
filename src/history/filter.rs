//! Hand selection by date, stakes and game mode.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::hand::{GameMode, Hand};

/// Canonical stakes string: currency symbols and whitespace removed,
/// lowercased. `"$0.05/$0.10"` becomes `"0.05/0.10"`.
pub fn normalize_stakes(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '$' | '€' | '£'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Which game type to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeFilter {
    /// Keep every hand.
    #[default]
    Auto,
    /// Cash games only.
    Cash,
    /// Tournaments only.
    Tournament,
}

impl ModeFilter {
    fn accepts(&self, mode: GameMode) -> bool {
        match self {
            ModeFilter::Auto => true,
            ModeFilter::Cash => mode == GameMode::Cash,
            ModeFilter::Tournament => mode == GameMode::Tournament,
        }
    }
}

impl FromStr for ModeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ModeFilter::Auto),
            "cash" => Ok(ModeFilter::Cash),
            "mtt" | "tournament" => Ok(ModeFilter::Tournament),
            other => Err(format!("unknown mode {:?} (expected cash, mtt or auto)", other)),
        }
    }
}

impl fmt::Display for ModeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeFilter::Auto => write!(f, "auto"),
            ModeFilter::Cash => write!(f, "cash"),
            ModeFilter::Tournament => write!(f, "mtt"),
        }
    }
}

/// Selection applied to hands before the session runs.
///
/// Date bounds are inclusive and compare the calendar day of each hand.
/// With a stakes list, hands whose stakes are unknown are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandFilter {
    /// First day kept.
    pub from: Option<NaiveDate>,
    /// Last day kept.
    pub to: Option<NaiveDate>,
    /// Normalized stakes to keep; empty keeps all.
    pub stakes: Vec<String>,
    /// Game type kept.
    pub mode: ModeFilter,
}

impl HandFilter {
    /// Filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the first day.
    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Builder method: set the last day.
    pub fn with_to(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    /// Keep only these stakes. Entries are normalized.
    pub fn with_stakes<I, S>(mut self, stakes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stakes = stakes
            .into_iter()
            .map(|s| normalize_stakes(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    /// Builder method: set the game type.
    pub fn with_mode(mut self, mode: ModeFilter) -> Self {
        self.mode = mode;
        self
    }

    /// Whether `hand` passes every bound.
    pub fn matches(&self, hand: &Hand) -> bool {
        let day = hand.date.date();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        if !self.stakes.is_empty() {
            match &hand.stakes {
                Some(stakes) if self.stakes.contains(stakes) => {}
                _ => return false,
            }
        }
        self.mode.accepts(hand.mode)
    }

    /// Keep matching hands, preserving order.
    pub fn apply(&self, hands: Vec<Hand>) -> Vec<Hand> {
        let before = hands.len();
        let kept: Vec<Hand> = hands.into_iter().filter(|h| self.matches(h)).collect();
        if kept.len() != before {
            info!("filter kept {} of {} hands", kept.len(), before);
        }
        kept
    }
}
