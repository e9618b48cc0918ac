use auction_engine::{Order, OrderBook};
use criterion::{BenchmarkId, Criterion};
use pricelevel::Side;
use std::hint::black_box;

/// Register all benchmarks for adding orders to an order book
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Add Orders");

    // Orders spread over 100 distinct levels
    group.bench_function("add_orders_distinct_levels", |b| {
        b.iter(|| {
            let order_book = OrderBook::new();
            for i in 0..100 {
                black_box(order_book.add_order(Order::new(
                    i,
                    Side::Buy,
                    1000.0 + i as f64,
                    10,
                    i,
                )));
            }
        })
    });

    // All orders queued behind each other at one price
    group.bench_function("add_orders_single_level", |b| {
        b.iter(|| {
            let order_book = OrderBook::new();
            for i in 0..100 {
                black_box(order_book.add_order(Order::new(i, Side::Sell, 1000.0, 10, i)));
            }
        })
    });

    // Parametrized benchmark with different order counts
    for order_count in [10u64, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("order_count_scaling", order_count),
            order_count,
            |b, &order_count| {
                b.iter(|| {
                    let order_book = OrderBook::new();
                    for i in 0..order_count {
                        black_box(order_book.add_order(Order::new(
                            i,
                            Side::Buy,
                            900.0 + (i % 50) as f64,
                            10,
                            i,
                        )));
                    }
                })
            },
        );
    }

    group.finish();
}
