//! Benchmarks for book mutation and snapshot paths.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tick_engine::book::OrderBook;
use tick_engine::types::{Action, Side};

fn populated_book(levels: usize) -> OrderBook {
    let mut book = OrderBook::new("BENCH");
    for i in 0..levels {
        book.apply_update(Side::Buy, 100.0 - i as f64 * 0.05, 100, Action::Add);
        book.apply_update(Side::Sell, 100.05 + i as f64 * 0.05, 100, Action::Add);
    }
    book
}

fn bench_apply_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_update");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut book = populated_book(size);

            b.iter(|| {
                book.apply_update(
                    black_box(Side::Buy),
                    black_box(99.5),
                    black_box(250),
                    black_box(Action::Update),
                );
            });
        });
    }

    group.finish();
}

fn bench_best_bid(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_bid");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let book = populated_book(size);

            b.iter(|| {
                black_box(book.best_bid());
            });
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for depth in [5, 10, 50].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            let book = populated_book(100);

            b.iter(|| {
                black_box(book.snapshot(depth));
            });
        });
    }

    group.finish();
}

fn bench_snapshot_serialize(c: &mut Criterion) {
    let book = populated_book(100);
    let snapshot = book.snapshot(10);

    c.bench_function("snapshot_serialize", |b| {
        b.iter(|| {
            black_box(serde_json::to_string(black_box(&snapshot)).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_apply_update,
    bench_best_bid,
    bench_snapshot,
    bench_snapshot_serialize
);
criterion_main!(benches);
