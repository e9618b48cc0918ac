//! OrderBook implementation: price-ordered resting orders and the one-shot match.

pub mod book;
mod error;
mod operations;
pub mod order;
mod private;
mod snapshot;

pub mod matching;

pub use book::OrderBook;
pub use error::OrderBookError;
pub use matching::{MatchedOrders, RemainderPolicy};
pub use order::{Order, Price};
pub use snapshot::{OrderBookSnapshot, PriceLevelSummary};
