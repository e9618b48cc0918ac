use auction_engine::{EngineConfig, MatchingEngine, Order, OrderBook};
use criterion::Criterion;
use std::hint::black_box;

pub fn benchmark_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("Basic OrderBook Operations");

    // Benchmark for creating a new order book
    group.bench_function("create_order_book", |b| {
        b.iter(|| {
            let _order_book = black_box(OrderBook::new());
        })
    });

    // Benchmark for creating an engine without starting its thread
    group.bench_function("create_engine", |b| {
        b.iter(|| {
            let _engine = black_box(MatchingEngine::new(EngineConfig::default()));
        })
    });

    // Benchmark for creating and adding a single order
    group.bench_function("add_single_order", |b| {
        b.iter(|| {
            let order_book = OrderBook::new();
            black_box(order_book.add_order(Order::buy(1, 100.0, 10)));
        })
    });

    group.finish();
}
