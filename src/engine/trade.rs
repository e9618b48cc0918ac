//! Executed trades and the listener they are reported to

use crate::orderbook::Price;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Callback invoked once for every executed trade.
///
/// It runs on the matching thread, after the book lock has been released.
pub type TradeListener = Arc<dyn Fn(&Trade) + Send + Sync>;

/// A completed match between one buy order and one sell order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique identifier of the trade
    pub trade_id: Uuid,

    /// Id of the buy order
    pub buy_order_id: u64,

    /// Id of the sell order
    pub sell_order_id: u64,

    /// Executed quantity, the smaller of the two order quantities
    pub quantity: u64,

    /// Execution price
    pub price: Price,

    /// Execution time in milliseconds since epoch
    pub timestamp: u64,
}

impl Trade {
    /// Notional value of the trade
    pub fn notional(&self) -> f64 {
        self.price.value() * self.quantity as f64
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade executed: Buy Order ID {} matched with Sell Order ID {} for quantity {} at price {}",
            self.buy_order_id, self.sell_order_id, self.quantity, self.price
        )
    }
}
