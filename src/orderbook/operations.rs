//! Order book operations: inserting resting orders

use super::book::OrderBook;
use super::order::Order;
use tracing::trace;

impl OrderBook {
    /// Add an order to the back of the queue at its side and exact price.
    ///
    /// The order is not validated and duplicate ids are kept as separate
    /// entries. Returns `true` when the book is crossed after the insertion,
    /// i.e. a following [`OrderBook::match_order`] will produce a match.
    pub fn add_order(&self, order: Order) -> bool {
        let mut sides = self.sides.lock();
        let sequence = sides.push_back(order);
        let crossed = sides.is_crossed();
        trace!(
            "Added order {} {} {} @ {} (seq {}), crossed: {}",
            order.id(),
            order.side(),
            order.quantity(),
            order.price(),
            sequence,
            crossed
        );
        crossed
    }
}
