//! Benchmarks for FLN half-rounds on the short scenario.

#![allow(missing_docs)]

use std::hint::black_box;

use colonial_twilight::bot::FlnBot;
use colonial_twilight::core::{GameContext, GameOptions};
use colonial_twilight::rules::{possible_actions, ActionChoice, Player};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_first_eligible(c: &mut Criterion) {
    let ctx = GameContext::new(GameOptions::default()).expect("short scenario");
    let possible = possible_actions(None);

    c.bench_function("fln_half_round_first", |b| {
        b.iter(|| {
            let mut ctx = ctx.clone();
            let choice = FlnBot.play(&mut ctx, None, black_box(&possible));
            black_box(choice)
        });
    });
}

fn bench_limited(c: &mut Criterion) {
    let ctx = GameContext::new(GameOptions::default()).expect("short scenario");
    let previous = Some(ActionChoice::OpOnly);
    let possible = possible_actions(previous);

    c.bench_function("fln_half_round_limited", |b| {
        b.iter(|| {
            let mut ctx = ctx.clone();
            let choice = FlnBot.play(&mut ctx, previous, black_box(&possible));
            black_box(choice)
        });
    });
}

fn bench_checkpoint(c: &mut Criterion) {
    let ctx = GameContext::new(GameOptions::default()).expect("short scenario");

    c.bench_function("context_checkpoint", |b| {
        b.iter(|| black_box(ctx.checkpoint()));
    });
}

criterion_group!(benches, bench_first_eligible, bench_limited, bench_checkpoint);
criterion_main!(benches);
