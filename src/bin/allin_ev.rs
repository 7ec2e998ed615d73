//! All-in adjusted EV calculator
//!
//! Reads PokerStars hand histories, replaces every heads-up all-in showdown
//! with its Monte Carlo equity and reports realized vs expected results.
//!
//! Usage:
//!   allin-ev --hh histories/ --out ev.csv --plot ev.html --seed 42

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn, LevelFilter};

use allin_ev::eval::Comparator;
use allin_ev::history::{read_hands, HandFilter, ModeFilter, ParseOptions};
use allin_ev::report::{export_csv, save_html};
use allin_ev::session::{Session, SessionConfig, DEFAULT_ITERATIONS};

#[derive(Parser, Debug)]
#[command(name = "allin-ev", about = "All-in adjusted EV calculator for PokerStars hand histories")]
struct Args {
    /// Hand-history files or directories of *.txt files
    #[arg(long, required = true, num_args = 1..)]
    hh: Vec<PathBuf>,

    /// CSV file for per-hand results
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON file for the full session report
    #[arg(long)]
    json: Option<PathBuf>,

    /// HTML file with the cumulative Net vs EV chart
    #[arg(long)]
    plot: Option<PathBuf>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Stakes to include, comma separated (e.g. 0.05/0.10,0.10/0.25)
    #[arg(long, value_delimiter = ',')]
    stakes: Vec<String>,

    /// Game type: cash, mtt or auto
    #[arg(long, default_value = "auto")]
    mode: ModeFilter,

    /// Monte Carlo iterations per hand
    #[arg(long = "mc-iters", default_value_t = DEFAULT_ITERATIONS)]
    mc_iters: u64,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Apply equity to the pot before rake
    #[arg(long)]
    ev_before_rake: bool,

    /// Deal unshown villain cards at random instead of skipping the hand
    #[arg(long)]
    assume_random_opponent: bool,

    /// Hero name for hands without a "Dealt to" line
    #[arg(long, default_value = "Hero")]
    hero: String,

    /// Showdown comparator: high-card or five-card
    #[arg(long, default_value = "high-card")]
    comparator: Comparator,

    /// Debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    if let Err(e) = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("logger: {}", e);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();

    let opts = ParseOptions { hero: args.hero.clone() };
    let hands = read_hands(&args.hh, &opts)?;
    info!("Hands read: {}", hands.len());

    let mut filter = HandFilter::new().with_stakes(&args.stakes).with_mode(args.mode);
    if let Some(from) = args.from {
        filter = filter.with_from(from);
    }
    if let Some(to) = args.to {
        filter = filter.with_to(to);
    }
    let hands = filter.apply(hands);

    let mut config = SessionConfig::new()
        .with_iterations(args.mc_iters)
        .with_ev_before_rake(args.ev_before_rake)
        .with_comparator(args.comparator)
        .with_random_opponent(args.assume_random_opponent);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut session = Session::new(config)?;

    let pb = if args.verbose {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(hands.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    for hand in &hands {
        session.push(hand)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let report = session.finish();
    if report.rows.is_empty() {
        info!("No data for report ({} hands skipped)", report.skipped);
        return Ok(());
    }

    let totals = &report.totals;
    info!(
        "Net total: {:.2}, EV total: {:.2}, Diff: {:.2}",
        totals.net_total, totals.ev_total, totals.diff
    );
    info!(
        "{} all-in hands, {} skipped, {} failed in {:.2?}",
        report.rows.len(),
        report.skipped,
        report.failures.len(),
        start.elapsed()
    );
    for failure in &report.failures {
        warn!("hand {} not evaluated: {}", failure.hand_id, failure.reason);
    }

    if let Some(path) = &args.out {
        export_csv(&report.rows, path)?;
        info!("CSV saved to {}", path.display());
    }
    if let Some(path) = &args.json {
        report.save_json(path)?;
        info!("JSON saved to {}", path.display());
    }
    if let Some(path) = &args.plot {
        save_html(&report, path)?;
        info!("Chart saved to {}", path.display());
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
