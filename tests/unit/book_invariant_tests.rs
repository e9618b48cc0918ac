//! Invariant checks for the order book driven by a deterministic pseudo-random
//! order flow.

use auction_engine::{Order, OrderBook, Price, RemainderPolicy};
use pricelevel::Side;
use std::collections::BTreeMap;

/// Small linear congruential generator so runs are reproducible
struct OrderFlow {
    state: u64,
    next_id: u64,
}

impl OrderFlow {
    fn new(seed: u64) -> Self {
        Self {
            state: seed,
            next_id: 1,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 33
    }

    fn next_order(&mut self) -> Order {
        let side = if self.next_u64() % 2 == 0 {
            Side::Buy
        } else {
            Side::Sell
        };
        // Prices on a half-tick grid between 95.0 and 105.0
        let price = 95.0 + (self.next_u64() % 21) as f64 * 0.5;
        let quantity = 1 + self.next_u64() % 20;
        let id = self.next_id;
        self.next_id += 1;
        Order::new(id, side, price, quantity, id)
    }
}

fn level_lengths(book: &OrderBook, side: Side) -> BTreeMap<Price, usize> {
    let (bids, asks) = book.volume_by_price();
    let prices = match side {
        Side::Buy => bids,
        Side::Sell => asks,
    };
    prices
        .keys()
        .map(|price| (*price, book.orders_at_price(*price, side).len()))
        .collect()
}

#[test]
fn test_match_always_uses_best_prices() {
    let book = OrderBook::with_policy(RemainderPolicy::Discard);
    let mut flow = OrderFlow::new(7);

    for _ in 0..500 {
        book.add_order(flow.next_order());

        let best_bid = book.best_bid();
        let best_ask = book.best_ask();
        if let Some(matched) = book.match_order() {
            assert_eq!(Some(matched.buy.price()), best_bid);
            assert_eq!(Some(matched.sell.price()), best_ask);
            assert!(matched.buy.price() >= matched.sell.price());
        }
    }
}

#[test]
fn test_book_never_rests_crossed_after_draining() {
    let book = OrderBook::new();
    let mut flow = OrderFlow::new(42);

    for _ in 0..500 {
        book.add_order(flow.next_order());
        while book.match_order().is_some() {}

        assert!(!book.is_crossed());
        if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
            assert!(bid < ask);
        }
    }
}

#[test]
fn test_discard_bucket_lengths_shrink_by_one() {
    let book = OrderBook::with_policy(RemainderPolicy::Discard);
    let mut flow = OrderFlow::new(99);

    for _ in 0..300 {
        book.add_order(flow.next_order());
        let bids_before = level_lengths(&book, Side::Buy);
        let asks_before = level_lengths(&book, Side::Sell);

        let Some(matched) = book.match_order() else {
            // No cross: nothing changes
            assert_eq!(level_lengths(&book, Side::Buy), bids_before);
            assert_eq!(level_lengths(&book, Side::Sell), asks_before);
            continue;
        };

        let bids_after = level_lengths(&book, Side::Buy);
        let asks_after = level_lengths(&book, Side::Sell);
        let bid_price = matched.buy.price();
        let ask_price = matched.sell.price();

        let expected_bid = bids_before[&bid_price] - 1;
        let expected_ask = asks_before[&ask_price] - 1;
        assert_eq!(bids_after.get(&bid_price).copied().unwrap_or(0), expected_bid);
        assert_eq!(asks_after.get(&ask_price).copied().unwrap_or(0), expected_ask);
        // Level present iff its queue is non-empty
        assert_eq!(bids_after.contains_key(&bid_price), expected_bid > 0);
        assert_eq!(asks_after.contains_key(&ask_price), expected_ask > 0);
    }
}

#[test]
fn test_requeue_conserves_quantity() {
    let book = OrderBook::with_policy(RemainderPolicy::Requeue);
    let mut flow = OrderFlow::new(2024);
    let mut submitted = 0;
    let mut matched_quantity = 0;

    for _ in 0..1_000 {
        let order = flow.next_order();
        submitted += order.quantity();
        book.add_order(order);
        while let Some(matched) = book.match_order() {
            matched_quantity += matched.quantity();
        }
    }

    let resting = book.total_quantity(Side::Buy) + book.total_quantity(Side::Sell);
    assert_eq!(resting + 2 * matched_quantity, submitted);
}

#[test]
fn test_requeued_remainder_keeps_time_priority() {
    let book = OrderBook::new();
    book.add_order(Order::new(1, Side::Sell, 10.0, 9, 0));
    book.add_order(Order::new(2, Side::Sell, 10.0, 9, 0));

    // Three small buys nibble at the first sell only
    for id in 3..6 {
        book.add_order(Order::new(id, Side::Buy, 10.0, 3, 0));
        let matched = book.match_order().expect("Expected a match");
        assert_eq!(matched.sell.id(), 1);
    }

    book.add_order(Order::new(6, Side::Buy, 10.0, 3, 0));
    let matched = book.match_order().expect("Expected a match");
    assert_eq!(matched.sell.id(), 2);
}
