//! Benchmarks for equity estimation and session runs.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use allin_ev::cards::parse_cards;
use allin_ev::equity::EquityEstimator;
use allin_ev::eval::{Comparator, FiveCard, HighCard};
use allin_ev::hand::Hand;
use allin_ev::session::{Session, SessionConfig};

fn preflop_equity_benchmark(c: &mut Criterion) {
    let hero = parse_cards("Ah Kd").unwrap();
    let villain = parse_cards("Qs Qc").unwrap();

    let high_card = EquityEstimator::new(HighCard);
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("preflop_high_card_10k", |b| {
        b.iter(|| high_card.equity(&hero, &villain, &[], black_box(10_000), &mut rng))
    });

    let five_card = EquityEstimator::new(FiveCard);
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("preflop_five_card_10k", |b| {
        b.iter(|| five_card.equity(&hero, &villain, &[], black_box(10_000), &mut rng))
    });
}

fn flop_equity_benchmark(c: &mut Criterion) {
    let hero = parse_cards("Ah Kh").unwrap();
    let villain = parse_cards("Qs Qc").unwrap();
    let board = parse_cards("2h 7h Jd").unwrap();

    let estimator = EquityEstimator::new(FiveCard);
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("flop_five_card_10k", |b| {
        b.iter(|| estimator.equity(&hero, &villain, &board, black_box(10_000), &mut rng))
    });
}

fn session_benchmark(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(20, 30, 0)
        .unwrap();
    let hands: Vec<Hand> = (0..100)
        .map(|i| {
            Hand::builder(i.to_string(), date, "Hero")
                .player("Hero", parse_cards("Ah Kd").unwrap())
                .player("Villain", parse_cards("Qs Qc").unwrap())
                .total_pot(20.0)
                .rake(1.0)
                .result("Hero", if i % 2 == 0 { 10.0 } else { -10.0 })
                .build()
                .unwrap()
        })
        .collect();

    c.bench_function("session_100_hands_1k", |b| {
        b.iter(|| {
            let config = SessionConfig::default()
                .with_seed(42)
                .with_iterations(1_000)
                .with_comparator(Comparator::FiveCard);
            Session::new(config).unwrap().run(black_box(&hands)).unwrap()
        })
    });
}

criterion_group!(
    benches,
    preflop_equity_benchmark,
    flop_equity_benchmark,
    session_benchmark
);
criterion_main!(benches);
