//! Contains the one-shot matching step of the order book.

use super::book::OrderBook;
use super::order::Order;
use super::private::RestingOrder;
use pricelevel::Side;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// What the book does with the unfilled part of the larger order in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Put the remainder back at the front of its original price level,
    /// keeping its place in time priority
    #[default]
    Requeue,

    /// Drop the remainder; both matched orders leave the book in full
    Discard,
}

/// The pair of orders removed from the book by a successful match.
///
/// `buy` and `sell` are the orders as they rested, with their full resting
/// quantities. `residual` is the unfilled part of the larger one, if the
/// quantities differ; depending on the book's [`RemainderPolicy`] it is
/// either resting again or gone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedOrders {
    /// Oldest order at the best bid
    pub buy: Order,

    /// Oldest order at the best ask
    pub sell: Order,

    /// Arrival sequence of the buy order
    pub buy_sequence: u64,

    /// Arrival sequence of the sell order
    pub sell_sequence: u64,

    /// Unfilled part of the larger order
    pub residual: Option<Order>,
}

impl MatchedOrders {
    /// Quantity exchanged between the two orders
    pub fn quantity(&self) -> u64 {
        self.buy.quantity().min(self.sell.quantity())
    }

    /// The order that reached the book first
    pub fn maker(&self) -> &Order {
        if self.buy_sequence < self.sell_sequence {
            &self.buy
        } else {
            &self.sell
        }
    }

    /// The order that completed the cross
    pub fn taker(&self) -> &Order {
        if self.buy_sequence < self.sell_sequence {
            &self.sell
        } else {
            &self.buy
        }
    }
}

impl OrderBook {
    /// Attempt a single match between the best bid and the best ask.
    ///
    /// Returns `None` without touching the book when either side is empty or
    /// the best bid is below the best ask. Otherwise the oldest order of each
    /// best level is removed, emptied levels are dropped and the remainder
    /// policy is applied, all under one acquisition of the book lock.
    pub fn match_order(&self) -> Option<MatchedOrders> {
        let mut sides = self.sides.lock();

        let (bid_price, ask_price) = match (sides.best_bid(), sides.best_ask()) {
            (Some(bid), Some(ask)) if bid >= ask => (bid, ask),
            (bid, ask) => {
                trace!("No match: best bid {:?}, best ask {:?}", bid, ask);
                return None;
            }
        };

        // Levels only exist while non-empty, so both pops succeed.
        let buy = sides.pop_front(Side::Buy, bid_price)?;
        let sell = sides.pop_front(Side::Sell, ask_price)?;

        let unfilled = match buy.order.quantity().cmp(&sell.order.quantity()) {
            Ordering::Greater => Some((buy, buy.order.quantity() - sell.order.quantity())),
            Ordering::Less => Some((sell, sell.order.quantity() - buy.order.quantity())),
            Ordering::Equal => None,
        };

        let residual = unfilled.map(|(resting, remaining)| {
            let remainder = RestingOrder {
                order: resting.order.with_quantity(remaining),
                sequence: resting.sequence,
            };
            match self.remainder_policy() {
                RemainderPolicy::Requeue => {
                    sides.push_front(remainder);
                    debug!(
                        "Requeued remainder of order {}: {} @ {}",
                        remainder.order.id(),
                        remaining,
                        remainder.order.price()
                    );
                }
                RemainderPolicy::Discard => {
                    debug!(
                        "Discarded remainder of order {}: {} @ {}",
                        remainder.order.id(),
                        remaining,
                        remainder.order.price()
                    );
                }
            }
            remainder.order
        });

        trace!(
            "Matched buy {} @ {} with sell {} @ {}",
            buy.order.id(),
            bid_price,
            sell.order.id(),
            ask_price
        );

        Some(MatchedOrders {
            buy: buy.order,
            sell: sell.order,
            buy_sequence: buy.sequence,
            sell_sequence: sell.sequence,
            residual,
        })
    }
}
