//! Lock-protected state of the order book and its internal helpers

use super::order::{Order, Price};
use pricelevel::Side;
use std::collections::{BTreeMap, VecDeque};

/// An order held in a price level, stamped with its arrival sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct RestingOrder {
    pub(super) order: Order,
    pub(super) sequence: u64,
}

/// FIFO queue of resting orders at a single price
pub(super) type PriceQueue = VecDeque<RestingOrder>;

/// Both sides of the book. Only ever accessed through the book's mutex.
#[derive(Debug, Default)]
pub(super) struct BookSides {
    /// Buy orders, best price is the largest key
    pub(super) bids: BTreeMap<Price, PriceQueue>,

    /// Sell orders, best price is the smallest key
    pub(super) asks: BTreeMap<Price, PriceQueue>,

    /// Sequence handed to the next inserted order
    next_sequence: u64,
}

impl BookSides {
    pub(super) fn side(&self, side: Side) -> &BTreeMap<Price, PriceQueue> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(super) fn side_mut(&mut self, side: Side) -> &mut BTreeMap<Price, PriceQueue> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub(super) fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    pub(super) fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Whether the best bid reaches the best ask
    pub(super) fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    /// Append an order to the back of its price level
    pub(super) fn push_back(&mut self, order: Order) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.side_mut(order.side())
            .entry(order.price())
            .or_default()
            .push_back(RestingOrder { order, sequence });
        sequence
    }

    /// Put an order back at the front of its price level, keeping its sequence
    pub(super) fn push_front(&mut self, resting: RestingOrder) {
        self.side_mut(resting.order.side())
            .entry(resting.order.price())
            .or_default()
            .push_front(resting);
    }

    /// Remove the oldest order at `price`, dropping the level once it is empty
    pub(super) fn pop_front(&mut self, side: Side, price: Price) -> Option<RestingOrder> {
        let levels = self.side_mut(side);
        let queue = levels.get_mut(&price)?;
        let resting = queue.pop_front();
        if queue.is_empty() {
            levels.remove(&price);
        }
        resting
    }

    pub(super) fn order_count(&self) -> usize {
        self.bids
            .values()
            .chain(self.asks.values())
            .map(VecDeque::len)
            .sum()
    }

    pub(super) fn total_quantity(&self, side: Side) -> u64 {
        self.side(side)
            .values()
            .flat_map(|queue| queue.iter())
            .map(|resting| resting.order.quantity())
            .sum()
    }
}

pub(super) fn level_quantity(queue: &PriceQueue) -> u64 {
    queue.iter().map(|resting| resting.order.quantity()).sum()
}
