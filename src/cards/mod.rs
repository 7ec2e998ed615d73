//! Card representation.
//!
//! - `card`: a single playing card and its two-character token
//! - `deck`: the community board and the live deck used for sampling

pub mod card;
pub mod deck;

pub use card::*;
pub use deck::{dead_mask, deck, Board, Deck, MAX_BOARD};
