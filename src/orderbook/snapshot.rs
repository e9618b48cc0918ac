//! Order book snapshot for market data

use super::error::OrderBookError;
use super::order::Price;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Aggregate view of one price level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevelSummary {
    /// Price of the level
    pub price: Price,

    /// Number of orders resting at this price
    pub order_count: usize,

    /// Sum of the resting quantities
    pub total_quantity: u64,
}

/// A snapshot of the order book state at a specific point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid levels, highest price first
    pub bids: Vec<PriceLevelSummary>,

    /// Ask levels, lowest price first
    pub asks: Vec<PriceLevelSummary>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and quantity
    pub fn best_bid(&self) -> Option<(Price, u64)> {
        let bid = self
            .bids
            .first()
            .map(|level| (level.price, level.total_quantity));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price and quantity
    pub fn best_ask(&self) -> Option<(Price, u64)> {
        let ask = self
            .asks
            .first()
            .map(|level| (level.price, level.total_quantity));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some((bid.value() + ask.value()) / 2.0),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask.value() - bid.value()),
            _ => None,
        }
    }

    /// Calculate the total volume on the bid side
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.iter().map(|level| level.total_quantity).sum()
    }

    /// Calculate the total volume on the ask side
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.iter().map(|level| level.total_quantity).sum()
    }

    /// Serialize the snapshot to JSON
    pub fn to_json(&self) -> Result<String, OrderBookError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot previously produced by [`OrderBookSnapshot::to_json`]
    pub fn from_json(json: &str) -> Result<Self, OrderBookError> {
        Ok(serde_json::from_str(json)?)
    }
}
