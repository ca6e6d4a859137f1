//! Recording and playback benchmarks.
//!
//! Recording cost bounds how quickly a learner sees the first frame after
//! submitting input; playback cost bounds how cheaply a renderer can scrub.
//!
//! Run with: cargo bench --bench trace_benchmarks

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stepwise::prelude::*;

fn descending(len: i64) -> AlgorithmInput {
    AlgorithmInput::Array {
        values: (0..len).rev().collect(),
    }
}

/// Full validate + run + JSON conversion through the registry.
fn bench_record(c: &mut Criterion) {
    let registry = AlgorithmRegistry::builtin();
    let limits = InputLimits::default();
    let mut group = c.benchmark_group("record");

    for len in [8i64, 32, 64] {
        group.bench_with_input(BenchmarkId::new("shell_sort", len), &len, |b, &len| {
            let input = descending(len);
            b.iter(|| black_box(registry.record("shell_sort", &input, &limits)));
        });
        group.bench_with_input(BenchmarkId::new("kadane", len), &len, |b, &len| {
            let input = descending(len);
            b.iter(|| black_box(registry.record("kadane", &input, &limits)));
        });
    }

    for n in [4usize, 6, 8] {
        group.bench_with_input(BenchmarkId::new("n_queens", n), &n, |b, &n| {
            let input = AlgorithmInput::BoardSize { n };
            b.iter(|| black_box(registry.record("n_queens", &input, &limits)));
        });
    }

    group.finish();
}

fn bench_fingerprint(c: &mut Criterion) {
    let registry = AlgorithmRegistry::builtin();
    let limits = InputLimits::default();
    let trace = registry
        .record("n_queens", &AlgorithmInput::BoardSize { n: 6 }, &limits)
        .unwrap_or_else(|e| panic!("recording failed: {e}"));

    c.bench_function("fingerprint/n_queens_6", |b| {
        b.iter(|| black_box(trace.fingerprint()));
    });
}

/// Scrubbing and autoplay over a recorded trace.
fn bench_playback(c: &mut Criterion) {
    let registry = AlgorithmRegistry::builtin();
    let limits = InputLimits::default();
    let trace = registry
        .record("shell_sort", &descending(64), &limits)
        .unwrap_or_else(|e| panic!("recording failed: {e}"));
    let len = trace.len();

    let mut group = c.benchmark_group("playback");

    group.bench_function("load", |b| {
        let mut controller = PlaybackController::new();
        b.iter(|| black_box(controller.load(trace.clone())));
    });

    group.bench_function("scrub_all", |b| {
        let mut controller = PlaybackController::new();
        let _ = controller.load(trace.clone());
        b.iter(|| {
            for i in (0..len).rev() {
                controller.jump_to(i);
                black_box(controller.view());
            }
        });
    });

    group.bench_function("autoplay_to_end", |b| {
        let mut controller = PlaybackController::new();
        let _ = controller.load(trace.clone());
        controller.set_speed(SpeedPreset::Fastest);
        b.iter(|| {
            controller.restart();
            while controller.state() == PlaybackState::Playing {
                controller.advance(Duration::from_millis(16));
            }
            black_box(controller.cursor())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_record, bench_fingerprint, bench_playback);
criterion_main!(benches);
