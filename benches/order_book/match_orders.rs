use auction_engine::{Order, OrderBook, RemainderPolicy};
use criterion::{BenchmarkId, Criterion};
use pricelevel::Side;
use std::hint::black_box;

/// Register all benchmarks for matching orders in an order book
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Match Orders");
    group.sample_size(100); // Adjust sample size for more consistent results

    // A single crossing pair
    group.bench_function("match_single_pair", |b| {
        b.iter(|| {
            let order_book = OrderBook::new();
            order_book.add_order(Order::new(1, Side::Buy, 100.0, 10, 0));
            order_book.add_order(Order::new(2, Side::Sell, 100.0, 10, 0));
            black_box(order_book.match_order())
        })
    });

    // Attempt on a book that does not cross
    group.bench_function("match_no_cross", |b| {
        let order_book = setup_resting_book(100, RemainderPolicy::Requeue);
        b.iter(|| black_box(order_book.match_order()))
    });

    // Drain a crossed book with both remainder policies
    for policy in [RemainderPolicy::Requeue, RemainderPolicy::Discard] {
        for order_count in [10u64, 100, 500].iter() {
            group.bench_with_input(
                BenchmarkId::new(format!("drain_crossed_book_{policy:?}"), order_count),
                order_count,
                |b, &order_count| {
                    b.iter(|| {
                        let order_book = setup_crossed_book(order_count, policy);
                        while let Some(matched) = order_book.match_order() {
                            black_box(matched);
                        }
                    })
                },
            );
        }
    }

    group.finish();
}

// Bids below 1000, asks above: nothing crosses
fn setup_resting_book(order_count: u64, policy: RemainderPolicy) -> OrderBook {
    let order_book = OrderBook::with_policy(policy);
    for i in 0..order_count {
        let offset = (i % 10) as f64;
        order_book.add_order(Order::new(i, Side::Buy, 990.0 - offset, 10, i));
        order_book.add_order(Order::new(i + order_count, Side::Sell, 1010.0 + offset, 10, i));
    }
    order_book
}

// Buys above sells with uneven quantities so partial fills occur
fn setup_crossed_book(order_count: u64, policy: RemainderPolicy) -> OrderBook {
    let order_book = OrderBook::with_policy(policy);
    for i in 0..order_count {
        let offset = (i % 10) as f64;
        order_book.add_order(Order::new(i, Side::Buy, 1010.0 - offset, 5 + i % 7, i));
        order_book.add_order(Order::new(
            i + order_count,
            Side::Sell,
            990.0 + offset,
            3 + i % 5,
            i,
        ));
    }
    order_book
}
