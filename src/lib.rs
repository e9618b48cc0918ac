//! # Continuous Double-Auction Matching Engine
//!
//! A small, thread-safe limit order book with a background matching thread. Buy and
//! sell orders rest in price-ordered levels; whenever the best bid reaches the best
//! ask the engine removes the oldest order at each best level and reports a trade.
//!
//! ## Key Features
//!
//! - **Price-Time Priority**: The highest bid and the lowest ask are always matched
//!   first; inside a price level orders leave strictly in arrival order.
//!
//! - **Single Coarse Lock**: Both sides of the book sit behind one mutex, so every
//!   match decision sees a consistent best bid and best ask.
//!
//! - **Wake-On-Insert Matching**: The matching thread sleeps on a condition variable
//!   and is woken only by insertions that cross the book. A fixed-interval polling
//!   mode is available for testing.
//!
//! - **Explicit Lifecycle**: `start`, `stop`, `join` and `shutdown` on the engine; the
//!   matching thread never outlives its engine.
//!
//! - **Pluggable Trade Reporting**: Trades go to a `TradeListener` callback, or to
//!   `tracing` when none is configured.
//!
//! - **Configurable Remainder Handling**: The unfilled part of the larger order in a
//!   match is either put back at the front of its level or dropped.
//!
//! ## Example
//!
//! ```
//! use auction_engine::{EngineConfig, MatchingEngine, Order};
//!
//! let engine = MatchingEngine::new(EngineConfig::default());
//! engine.receive_order(Order::buy(1, 100.5, 10)).unwrap();
//! engine.receive_order(Order::sell(2, 100.5, 5)).unwrap();
//! engine.receive_order(Order::sell(3, 100.0, 5)).unwrap();
//!
//! let trade = engine.match_once().unwrap();
//! assert_eq!((trade.buy_order_id, trade.sell_order_id), (1, 3));
//! assert_eq!(trade.quantity, 5);
//! assert_eq!(trade.price.value(), 100.0);
//! ```
//!
//! ## Design Decisions
//!
//! - Orders are validated at the engine boundary (positive, finite price and a
//!   non-zero quantity). The `OrderBook` itself accepts anything.
//! - "No match" is `None`, never an error and never a sentinel id.
//! - By default the remainder of a partial fill is requeued at the front of its
//!   level; `RemainderPolicy::Discard` drops it instead.
//! - By default trades execute at the sell order's price;
//!   `TradePricing::MakerPrice` uses the price of the order that rested first.
//!
//! ## Status
//! Single instrument, no cancellation or amendment, no persistence.

pub mod engine;
pub mod orderbook;

mod utils;

pub use engine::{
    EngineConfig, EngineError, MatchingEngine, MatchingMode, Trade, TradeListener, TradePricing,
};
pub use orderbook::{
    MatchedOrders, Order, OrderBook, OrderBookError, OrderBookSnapshot, Price, PriceLevelSummary,
    RemainderPolicy,
};
pub use utils::current_time_millis;
