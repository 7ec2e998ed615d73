//! Played hands as handed to the EV engine.
//!
//! A [`Hand`] is built once (by the history reader, or by [`HandBuilder`] in
//! tests) and never mutated afterwards. The engine only looks at the hero and
//! the first other player in seat order; see [`Hand::matchup`].

use std::fmt;

use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Board, Card};
use crate::error::Result;

/// Cash game or tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Ring game.
    #[default]
    Cash,
    /// Tournament or sit-and-go.
    Tournament,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Cash => write!(f, "cash"),
            GameMode::Tournament => write!(f, "mtt"),
        }
    }
}

/// A seated player and whatever hole cards became known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Screen name.
    pub name: String,
    /// Empty when the cards were never shown.
    pub cards: Vec<Card>,
}

impl Player {
    /// Create a player.
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self { name: name.into(), cards }
    }

    /// Whether both hole cards are known.
    pub fn is_known(&self) -> bool {
        self.cards.len() == 2
    }
}

/// Hero and the opponent the hand is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct Matchup<'a> {
    /// The hero, with both cards known.
    pub hero: &'a Player,
    /// First other player in seat order.
    pub villain: &'a Player,
}

/// One dealt-and-played hand.
#[derive(Debug, Clone)]
pub struct Hand {
    /// Hand id.
    pub id: String,
    /// Start time.
    pub date: NaiveDateTime,
    /// Hero name.
    pub hero: String,
    /// Players in seat order.
    pub players: Vec<Player>,
    /// Community cards, 0-5.
    pub board: Board,
    /// House cut taken from the pot.
    pub rake: f64,
    /// Total pot before rake.
    pub total_pot: f64,
    /// Realized result per player; a missing entry means zero.
    pub results: FxHashMap<String, f64>,
    /// Normalized blinds, e.g. `"0.05/0.10"`, when known.
    pub stakes: Option<String>,
    /// Cash game or tournament.
    pub mode: GameMode,
}

impl Hand {
    /// Start building a hand.
    pub fn builder(id: impl Into<String>, date: NaiveDateTime, hero: impl Into<String>) -> HandBuilder {
        HandBuilder::new(id, date, hero)
    }

    /// Look up a player by name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// The hero's seat, if present.
    pub fn hero_player(&self) -> Option<&Player> {
        self.player(&self.hero)
    }

    /// First non-hero player in seat order.
    pub fn villain(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.name != self.hero)
    }

    /// Hero versus villain when both hole cards are known on each side.
    ///
    /// Any other player at the table is ignored; equity is always two-way.
    pub fn matchup(&self) -> Option<Matchup<'_>> {
        self.matchup_allowing_unknown()
            .filter(|m| m.villain.is_known())
    }

    /// Like [`matchup`](Self::matchup) but accepts a villain whose cards
    /// were never shown.
    pub fn matchup_allowing_unknown(&self) -> Option<Matchup<'_>> {
        let hero = self.hero_player().filter(|p| p.is_known())?;
        let villain = self.villain()?;
        Some(Matchup { hero, villain })
    }

    /// Hero's realized result, zero when not recorded.
    pub fn hero_net(&self) -> f64 {
        self.results.get(&self.hero).copied().unwrap_or(0.0)
    }
}

/// Builder for [`Hand`].
#[derive(Debug, Clone)]
pub struct HandBuilder {
    id: String,
    date: NaiveDateTime,
    hero: String,
    players: Vec<Player>,
    board: Vec<Card>,
    rake: f64,
    total_pot: f64,
    results: FxHashMap<String, f64>,
    stakes: Option<String>,
    mode: GameMode,
}

impl HandBuilder {
    fn new(id: impl Into<String>, date: NaiveDateTime, hero: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date,
            hero: hero.into(),
            players: Vec::new(),
            board: Vec::new(),
            rake: 0.0,
            total_pot: 0.0,
            results: FxHashMap::default(),
            stakes: None,
            mode: GameMode::Cash,
        }
    }

    /// Seat a player. Seats are kept in call order; re-seating a name
    /// replaces its cards.
    pub fn player(mut self, name: impl Into<String>, cards: Vec<Card>) -> Self {
        let name = name.into();
        match self.players.iter_mut().find(|p| p.name == name) {
            Some(p) => p.cards = cards,
            None => self.players.push(Player::new(name, cards)),
        }
        self
    }

    /// Set the community cards.
    pub fn board(mut self, cards: Vec<Card>) -> Self {
        self.board = cards;
        self
    }

    /// Set the rake.
    pub fn rake(mut self, rake: f64) -> Self {
        self.rake = rake;
        self
    }

    /// Set the total pot.
    pub fn total_pot(mut self, total_pot: f64) -> Self {
        self.total_pot = total_pot;
        self
    }

    /// Record a player's realized result.
    pub fn result(mut self, name: impl Into<String>, net: f64) -> Self {
        self.results.insert(name.into(), net);
        self
    }

    /// Set the normalized stakes.
    pub fn stakes(mut self, stakes: impl Into<String>) -> Self {
        self.stakes = Some(stakes.into());
        self
    }

    /// Set the game mode.
    pub fn mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Finish the hand. Fails if the board holds more than five cards.
    pub fn build(self) -> Result<Hand> {
        Ok(Hand {
            id: self.id,
            date: self.date,
            hero: self.hero,
            players: self.players,
            board: Board::from_cards(self.board)?,
            rake: self.rake,
            total_pot: self.total_pot,
            results: self.results,
            stakes: self.stakes,
            mode: self.mode,
        })
    }
}
