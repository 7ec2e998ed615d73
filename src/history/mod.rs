//! PokerStars hand-history reader.
//!
//! Turns raw hand-history text into [`Hand`] values. Only what the EV engine
//! needs is extracted: id, timestamp, stakes, seats, hole cards that became
//! known, the board, pot and rake, and each player's realized result.
//!
//! Realized results are computed from the action lines:
//!
//! ```text
//! net = collected - committed
//! ```
//!
//! where `committed` counts blinds, antes, bets, calls and raises (a
//! `raises X to Y` commits `Y` minus what the player already had in on that
//! street), less any uncalled bet returned.
//!
//! A block that cannot be parsed is logged and skipped; the rest of the
//! file is still read.

pub mod filter;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::cards::{parse_cards, Card};
use crate::error::{EvError, Result};
use crate::hand::{GameMode, Hand};

pub use filter::{normalize_stakes, HandFilter, ModeFilter};

/// Marker that starts every hand.
const HAND_MARKER: &str = "PokerStars Hand #";
const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Reader options.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Hero name used when a hand has no `Dealt to` line.
    pub hero: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { hero: "Hero".to_string() }
    }
}

/// Parse every hand in a hand-history text.
pub fn parse_hand_history(text: &str, opts: &ParseOptions) -> Vec<Hand> {
    let mut hands = Vec::new();
    for block in text.split(HAND_MARKER).skip(1) {
        match parse_hand(block, opts) {
            Ok(hand) => hands.push(hand),
            Err(e) => warn!("skipping hand: {}", e),
        }
    }
    hands
}

/// Read hands from files and directories.
///
/// A directory contributes its `*.txt` files in name order. Hands come back
/// sorted by timestamp (stable, so same-second hands keep file order).
pub fn read_hands<P: AsRef<Path>>(paths: &[P], opts: &ParseOptions) -> Result<Vec<Hand>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            warn!("{}: no such file or directory", path.display());
        }
    }

    let mut hands = Vec::new();
    for file in &files {
        let bytes = fs::read(file)?;
        let text = String::from_utf8_lossy(&bytes);
        let parsed = parse_hand_history(&text, opts);
        debug!("{}: {} hands", file.display(), parsed.len());
        hands.extend(parsed);
    }
    hands.sort_by_key(|h| h.date);

    info!("read {} hands from {} files", hands.len(), files.len());
    Ok(hands)
}

/// Per-hand bookkeeping while walking the lines.
#[derive(Default)]
struct Ledger {
    seats: Vec<String>,
    committed: FxHashMap<String, f64>,
    street: FxHashMap<String, f64>,
    collected: FxHashMap<String, f64>,
    shown: FxHashMap<String, Vec<Card>>,
}

impl Ledger {
    fn is_seated(&self, name: &str) -> bool {
        self.seats.iter().any(|s| s == name)
    }

    /// Put chips in on the current street.
    fn put(&mut self, name: &str, amount: f64) {
        *self.street.entry(name.to_string()).or_default() += amount;
        *self.committed.entry(name.to_string()).or_default() += amount;
    }

    /// Raise to a street total.
    fn raise_to(&mut self, name: &str, to: f64) {
        let already = self.street.get(name).copied().unwrap_or(0.0);
        self.put(name, to - already);
    }

    fn net(&self, name: &str) -> f64 {
        let won = self.collected.get(name).copied().unwrap_or(0.0);
        let paid = self.committed.get(name).copied().unwrap_or(0.0);
        won - paid
    }
}

/// Parse one block (the text following `PokerStars Hand #`).
pub fn parse_hand(block: &str, opts: &ParseOptions) -> Result<Hand> {
    let mut lines = block.lines();
    let header = lines.next().unwrap_or_default();

    let hand_id = header
        .split(':')
        .next()
        .map(str::trim)
        .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
        .ok_or_else(|| EvError::Parse {
            hand_id: "?".to_string(),
            message: format!("bad header {:?}", header),
        })?
        .to_string();
    let fail = |message: String| EvError::Parse {
        hand_id: hand_id.clone(),
        message,
    };

    let date = parse_date(header).ok_or_else(|| fail("missing timestamp".to_string()))?;
    let mode = if header.contains("Tournament #") {
        GameMode::Tournament
    } else {
        GameMode::Cash
    };
    let stakes = parse_stakes(header);

    let mut ledger = Ledger::default();
    let mut hero: Option<String> = None;
    let mut board: Vec<Card> = Vec::new();
    let mut total_pot: Option<f64> = None;
    let mut rake = 0.0;
    let mut in_summary = false;

    let cards = |s: &str| parse_cards(s).map_err(|e| fail(e.to_string()));
    let amount = |s: &str| parse_amount(s).ok_or_else(|| fail(format!("bad amount {:?}", s)));

    for line in lines.map(str::trim) {
        if line.starts_with("*** ") {
            if line.starts_with("*** SUMMARY") {
                in_summary = true;
            } else if line.starts_with("*** FLOP")
                || line.starts_with("*** TURN")
                || line.starts_with("*** RIVER")
            {
                // Blinds stay in the preflop street total; later streets start at zero.
                ledger.street.clear();
                let mut street_board = Vec::new();
                for group in brackets(line) {
                    street_board.extend(cards(group)?);
                }
                board = street_board;
            }
            continue;
        }

        if in_summary {
            if let Some(rest) = line.strip_prefix("Total pot ") {
                let pot = rest.split_whitespace().next().unwrap_or_default();
                total_pot = Some(amount(pot)?);
                if let Some((_, r)) = rest.split_once("Rake ") {
                    rake = amount(r.split_whitespace().next().unwrap_or_default())?;
                }
            } else if let Some(rest) = line.strip_prefix("Board ") {
                if let Some(group) = brackets(rest).next() {
                    board = cards(group)?;
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("Seat ") {
            if let Some((_, seat)) = rest.split_once(": ") {
                if seat.contains(" in chips") {
                    if let Some((name, _)) = seat.rsplit_once(" (") {
                        ledger.seats.push(name.to_string());
                    }
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("Dealt to ") {
            if let Some((name, tail)) = rest.split_once(" [") {
                let group = tail.split(']').next().unwrap_or_default();
                ledger.shown.insert(name.to_string(), cards(group)?);
                hero = Some(name.to_string());
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("Uncalled bet (") {
            if let Some((value, name)) = rest.split_once(") returned to ") {
                let value = amount(value)?;
                *ledger.committed.entry(name.to_string()).or_default() -= value;
            }
            continue;
        }

        if let Some((name, action)) = line.split_once(": ") {
            if !ledger.is_seated(name) {
                continue;
            }
            let words: Vec<&str> = action.split_whitespace().collect();
            match words.as_slice() {
                ["posts", "the", "ante", value, ..] => {
                    let value = amount(*value)?;
                    *ledger.committed.entry(name.to_string()).or_default() += value;
                }
                ["posts", .., value] if !value.starts_with('[') => {
                    ledger.put(name, amount(*value)?);
                }
                ["bets", value, ..] | ["calls", value, ..] => {
                    ledger.put(name, amount(*value)?);
                }
                ["raises", _, "to", to, ..] => {
                    ledger.raise_to(name, amount(*to)?);
                }
                ["shows", ..] => {
                    if let Some(group) = brackets(action).next() {
                        ledger.shown.insert(name.to_string(), cards(group)?);
                    }
                }
                _ => {}
            }
            continue;
        }

        if let Some((name, rest)) = line.split_once(" collected ") {
            if ledger.is_seated(name) {
                let value = rest.split_whitespace().next().unwrap_or_default();
                *ledger.collected.entry(name.to_string()).or_default() += amount(value)?;
            }
        }
    }

    let total_pot = total_pot.ok_or_else(|| fail("missing total pot".to_string()))?;
    let hero = hero.unwrap_or_else(|| opts.hero.clone());

    let mut builder = Hand::builder(hand_id.clone(), date, hero)
        .board(board)
        .total_pot(total_pot)
        .rake(rake)
        .mode(mode);
    if let Some(stakes) = stakes {
        builder = builder.stakes(stakes);
    }
    for name in &ledger.seats {
        let cards = ledger.shown.get(name).cloned().unwrap_or_default();
        builder = builder.player(name.clone(), cards).result(name.clone(), ledger.net(name));
    }
    builder.build().map_err(|e| fail(e.to_string()))
}

/// First `YYYY/MM/DD H:MM:SS` following a ` - ` separator. The hour is not
/// zero-padded in PokerStars headers.
fn parse_date(header: &str) -> Option<NaiveDateTime> {
    header.split(" - ").skip(1).find_map(|part| {
        let mut tokens = part.split_whitespace();
        let date = tokens.next()?;
        let time = tokens.next()?;
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), DATE_FORMAT).ok()
    })
}

/// First parenthesised `small/big` in the header, normalized.
fn parse_stakes(header: &str) -> Option<String> {
    header
        .split('(')
        .skip(1)
        .filter_map(|s| s.split(')').next())
        .find(|s| s.contains('/'))
        .map(|s| normalize_stakes(s.split_whitespace().next().unwrap_or_default()))
}

/// Parse a chip or money amount like `$1,234.50`.
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | '(' | ')'))
        .collect();
    cleaned.parse().ok()
}

/// Contents of each `[...]` group.
fn brackets(s: &str) -> impl Iterator<Item = &str> {
    s.split('[').skip(1).filter_map(|g| g.split_once(']').map(|(inner, _)| inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CASH_HAND: &str = "\
PokerStars Hand #245671234567:  Hold'em No Limit ($0.05/$0.10 USD) - 2024/01/15 20:30:00 ET
Table 'Alpha' 6-max Seat #1 is the button
Seat 1: Hero ($10.00 in chips)
Seat 2: Villain ($12.30 in chips)
Seat 3: Bystander ($8.00 in chips)
Hero: posts small blind $0.05
Villain: posts big blind $0.10
*** HOLE CARDS ***
Dealt to Hero [Ah Kd]
Bystander: folds
Hero: raises $9.90 to $10 and is all-in
Villain: calls $9.90
*** FLOP *** [2h 3d 9c]
*** TURN *** [2h 3d 9c] [Jd]
*** RIVER *** [2h 3d 9c Jd] [Tc]
*** SHOW DOWN ***
Hero: shows [Ah Kd] (high card Ace)
Villain: shows [Qs Qc] (a pair of Queens)
Villain collected $19.55 from pot
*** SUMMARY ***
Total pot $20 | Rake $0.45
Board [2h 3d 9c Jd Tc]
Seat 1: Hero (button) (small blind) showed [Ah Kd] and lost with high card Ace
Seat 2: Villain (big blind) showed [Qs Qc] and won ($19.55) with a pair of Queens
Seat 3: Bystander folded before Flop (didn't bet)
";

    const TOURNAMENT_HAND: &str = "\
PokerStars Hand #100200300: Tournament #3456789, $1+$0.10 USD Hold'em No Limit - Level I (10/20) - 2024/01/14 18:00:00 ET
Table '3456789 1' 9-max Seat #2 is the button
Seat 1: Hero (1500 in chips)
Seat 2: Villain (1500 in chips)
Hero: posts the ante 5
Villain: posts the ante 5
Hero: posts small blind 10
Villain: posts big blind 20
*** HOLE CARDS ***
Dealt to Hero [7h 7d]
Hero: raises 40 to 60
Villain: folds
Uncalled bet (40) returned to Hero
Hero collected 50 from pot
*** SUMMARY ***
Total pot 50 | Rake 0
Seat 1: Hero collected (50)
";

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_parse_cash_hand() {
        let hands = parse_hand_history(CASH_HAND, &opts());
        assert_eq!(hands.len(), 1);
        let hand = &hands[0];

        assert_eq!(hand.id, "245671234567");
        assert_eq!(
            hand.date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(20, 30, 0).unwrap()
        );
        assert_eq!(hand.hero, "Hero");
        assert_eq!(hand.mode, GameMode::Cash);
        assert_eq!(hand.stakes.as_deref(), Some("0.05/0.10"));
        assert_eq!(hand.board.to_string(), "2h3d9cJdTc");
        assert_eq!(hand.total_pot, 20.0);
        assert_eq!(hand.rake, 0.45);

        let m = hand.matchup().unwrap();
        assert_eq!(m.villain.name, "Villain");
        assert_eq!(parse_cards("Qs Qc").unwrap(), m.villain.cards);

        assert!((hand.hero_net() + 10.0).abs() < 1e-9);
        assert!((hand.results["Villain"] - 9.55).abs() < 1e-9);
        assert_eq!(hand.results["Bystander"], 0.0);
    }

    #[test]
    fn test_parse_tournament_hand() {
        let hands = parse_hand_history(TOURNAMENT_HAND, &opts());
        assert_eq!(hands.len(), 1);
        let hand = &hands[0];

        assert_eq!(hand.mode, GameMode::Tournament);
        assert_eq!(hand.stakes.as_deref(), Some("10/20"));
        assert!(hand.board.is_empty());
        // Posted 5 ante + 60, got 40 back, collected 50.
        assert!((hand.hero_net() - 25.0).abs() < 1e-9);
        assert!((hand.results["Villain"] + 25.0).abs() < 1e-9);
        assert!(hand.matchup().is_none());
    }

    #[test]
    fn test_bad_block_is_skipped() {
        let broken = "PokerStars Hand #999: Hold'em No Limit ($0.05/$0.10 USD) - no date here\n";
        let text = format!("{}\n\n{}\n\n{}", CASH_HAND, broken, TOURNAMENT_HAND);
        let hands = parse_hand_history(&text, &opts());
        assert_eq!(hands.len(), 2);
        assert!(matches!(
            parse_hand("999: Hold'em - no date", &opts()),
            Err(EvError::Parse { .. })
        ));
    }

    #[test]
    fn test_single_digit_hour() {
        let text = CASH_HAND.replace("20:30:00", "8:05:09");
        let hands = parse_hand_history(&text, &opts());
        assert_eq!(hands.len(), 1);
        assert_eq!(
            hands[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(8, 5, 9).unwrap()
        );
        assert_eq!(
            parse_date("1: Hold'em - 2024/01/15 0:00:01 ET"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(0, 0, 1)
        );
        assert_eq!(parse_date("1: Hold'em - Level I (10/20) - x"), None);
    }

    #[test]
    fn test_default_hero_without_dealt_line() {
        let text = CASH_HAND.replace("Dealt to Hero [Ah Kd]\n", "");
        let opts = ParseOptions { hero: "Villain".to_string() };
        let hand = &parse_hand_history(&text, &opts)[0];
        assert_eq!(hand.hero, "Villain");
    }

    #[test]
    fn test_read_hands_sorts_by_date() {
        let dir = std::env::temp_dir().join(format!("allin_ev_hh_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.txt"), CASH_HAND).unwrap();
        fs::write(dir.join("b.txt"), TOURNAMENT_HAND).unwrap();
        fs::write(dir.join("notes.md"), CASH_HAND).unwrap();

        let hands = read_hands(&[&dir], &opts()).unwrap();
        let ids: Vec<&str> = hands.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["100200300", "245671234567"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_helpers() {
        assert_eq!(parse_amount("$1,234.50"), Some(1234.5));
        assert_eq!(parse_amount("(40)"), Some(40.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(brackets("[2h 3d] [Jd]").collect::<Vec<_>>(), vec!["2h 3d", "Jd"]);
        assert_eq!(parse_stakes("Hold'em No Limit (€0.02/€0.05 EUR) - x").as_deref(), Some("0.02/0.05"));
    }
}
