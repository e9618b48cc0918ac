//! Matching engine: submission, the background matching thread and trade reporting.

mod config;
mod error;
mod matching_engine;
mod trade;

pub use config::{EngineConfig, MatchingMode, TradePricing};
pub use error::EngineError;
pub use matching_engine::MatchingEngine;
pub use trade::{Trade, TradeListener};
