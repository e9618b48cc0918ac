//! Order value type and the price key used by the book.

use super::error::OrderBookError;
use crate::utils::current_time_millis;
use pricelevel::Side;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Limit price of an order.
///
/// Wraps an `f64` and orders it with [`f64::total_cmp`], so prices can key the
/// book's `BTreeMap`s directly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Wrap a raw price
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw price value
    pub const fn value(self) -> f64 {
        self.0
    }

    /// A price is tradable when it is finite and strictly positive
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Price {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable buy or sell limit order.
///
/// The `timestamp` is carried for the record only; time priority inside a
/// price level comes from the order in which the book received the order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: u64,
    side: Side,
    price: Price,
    quantity: u64,
    timestamp: u64,
}

impl Order {
    /// Create an order from all of its fields
    pub fn new(id: u64, side: Side, price: impl Into<Price>, quantity: u64, timestamp: u64) -> Self {
        Self {
            id,
            side,
            price: price.into(),
            quantity,
            timestamp,
        }
    }

    /// Create a buy order stamped with the current time
    pub fn buy(id: u64, price: impl Into<Price>, quantity: u64) -> Self {
        Self::new(id, Side::Buy, price, quantity, current_time_millis())
    }

    /// Create a sell order stamped with the current time
    pub fn sell(id: u64, price: impl Into<Price>, quantity: u64) -> Self {
        Self::new(id, Side::Sell, price, quantity, current_time_millis())
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Check the order fields before it is accepted by the engine.
    ///
    /// The book itself never calls this; it rests whatever it is given.
    pub fn validate(&self) -> Result<(), OrderBookError> {
        if !self.price.is_valid() {
            return Err(OrderBookError::InvalidPrice {
                order_id: self.id,
                price: self.price.value(),
            });
        }
        if self.quantity == 0 {
            return Err(OrderBookError::InvalidQuantity { order_id: self.id });
        }
        Ok(())
    }

    /// Copy of this order carrying a different quantity
    pub(crate) fn with_quantity(&self, quantity: u64) -> Self {
        Self { quantity, ..*self }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order#{} {} {} @ {} (ts={})",
            self.id, self.side, self.quantity, self.price, self.timestamp
        )
    }
}
