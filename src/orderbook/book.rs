//! Core OrderBook implementation holding both sides behind a single lock

use super::matching::RemainderPolicy;
use super::order::{Order, Price};
use super::private::{BookSides, PriceQueue, level_quantity};
use super::snapshot::{OrderBookSnapshot, PriceLevelSummary};
use crate::utils::current_time_millis;
use parking_lot::Mutex;
use pricelevel::Side;
use std::collections::BTreeMap;
use tracing::trace;

/// The OrderBook keeps resting buy and sell orders grouped by price.
///
/// Both sides live behind one mutex. Every insertion, every match attempt and
/// every read takes that lock for the duration of the call and releases it
/// before returning, so the best bid and best ask are always observed
/// together.
pub struct OrderBook {
    /// Bid and ask levels plus the arrival sequence counter
    pub(super) sides: Mutex<BookSides>,

    /// What happens to the unfilled part of the larger order in a match
    remainder_policy: RemainderPolicy,
}

impl OrderBook {
    /// Create an empty order book with the default remainder policy
    pub fn new() -> Self {
        Self::with_policy(RemainderPolicy::default())
    }

    /// Create an empty order book with the given remainder policy
    pub fn with_policy(remainder_policy: RemainderPolicy) -> Self {
        Self {
            sides: Mutex::new(BookSides::default()),
            remainder_policy,
        }
    }

    /// The remainder policy applied by [`OrderBook::match_order`]
    pub fn remainder_policy(&self) -> RemainderPolicy {
        self.remainder_policy
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Option<Price> {
        self.sides.lock().best_bid()
    }

    /// Get the best ask price, if any
    pub fn best_ask(&self) -> Option<Price> {
        self.sides.lock().best_ask()
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<f64> {
        let sides = self.sides.lock();
        match (sides.best_bid(), sides.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.value() - bid.value()),
            _ => None,
        }
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        let sides = self.sides.lock();
        match (sides.best_bid(), sides.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.value() + ask.value()) / 2.0),
            _ => None,
        }
    }

    /// Whether the best bid is at or above the best ask
    pub fn is_crossed(&self) -> bool {
        self.sides.lock().is_crossed()
    }

    /// Number of resting orders on both sides
    pub fn order_count(&self) -> usize {
        self.sides.lock().order_count()
    }

    /// True when neither side holds an order
    pub fn is_empty(&self) -> bool {
        let sides = self.sides.lock();
        sides.bids.is_empty() && sides.asks.is_empty()
    }

    /// Number of distinct price levels on one side
    pub fn price_level_count(&self, side: Side) -> usize {
        self.sides.lock().side(side).len()
    }

    /// Orders resting at a price, oldest first
    pub fn orders_at_price(&self, price: impl Into<Price>, side: Side) -> Vec<Order> {
        let price = price.into();
        trace!("Getting orders at price {} for side {}", price, side);
        self.sides
            .lock()
            .side(side)
            .get(&price)
            .map(|queue| queue.iter().map(|resting| resting.order).collect())
            .unwrap_or_default()
    }

    /// Sum of resting quantity on one side
    pub fn total_quantity(&self, side: Side) -> u64 {
        self.sides.lock().total_quantity(side)
    }

    /// Get the total volume at each price level, bids first
    pub fn volume_by_price(&self) -> (BTreeMap<Price, u64>, BTreeMap<Price, u64>) {
        let sides = self.sides.lock();
        let volumes = |levels: &BTreeMap<Price, PriceQueue>| -> BTreeMap<Price, u64> {
            levels
                .iter()
                .map(|(price, queue)| (*price, level_quantity(queue)))
                .collect()
        };
        (volumes(&sides.bids), volumes(&sides.asks))
    }

    /// Create a snapshot of up to `depth` levels per side, best prices first
    pub fn create_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        let sides = self.sides.lock();
        let summarize = |(price, queue): (&Price, &PriceQueue)| PriceLevelSummary {
            price: *price,
            order_count: queue.len(),
            total_quantity: level_quantity(queue),
        };

        OrderBookSnapshot {
            timestamp: current_time_millis(),
            bids: sides.bids.iter().rev().take(depth).map(summarize).collect(),
            asks: sides.asks.iter().take(depth).map(summarize).collect(),
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
