//! Matching engine configuration

use super::error::EngineError;
use crate::orderbook::RemainderPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the matching thread finds out there is work to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// Sleep until an insertion crosses the book; the idle interval is only a
    /// fallback timeout
    #[default]
    Notify,

    /// One match attempt, then a fixed idle interval, forever
    Poll,
}

/// Which order's price a trade executes at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradePricing {
    /// Always the sell order's price
    #[default]
    SellPrice,

    /// The price of whichever order rested in the book first
    MakerPrice,
}

/// Settings for a [`MatchingEngine`](super::MatchingEngine).
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides:
///
/// ```
/// use auction_engine::{EngineConfig, MatchingMode};
///
/// let config = EngineConfig::from_json(r#"{ "matching_mode": "poll", "idle_interval_ms": 5 }"#).unwrap();
/// assert_eq!(config.matching_mode, MatchingMode::Poll);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wake-on-insert or fixed-interval polling
    pub matching_mode: MatchingMode,

    /// Delay between polls, or the fallback wake-up in notify mode
    #[serde(rename = "idle_interval_ms", with = "duration_millis")]
    pub idle_interval: Duration,

    /// Handling of the unfilled part of the larger order in a match
    pub remainder_policy: RemainderPolicy,

    /// Trade price rule
    pub trade_pricing: TradePricing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            matching_mode: MatchingMode::default(),
            idle_interval: Duration::from_millis(1),
            remainder_policy: RemainderPolicy::default(),
            trade_pricing: TradePricing::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|err| EngineError::InvalidConfig {
            message: err.to_string(),
        })
    }

    pub fn with_matching_mode(mut self, matching_mode: MatchingMode) -> Self {
        self.matching_mode = matching_mode;
        self
    }

    pub fn with_idle_interval(mut self, idle_interval: Duration) -> Self {
        self.idle_interval = idle_interval;
        self
    }

    pub fn with_remainder_policy(mut self, remainder_policy: RemainderPolicy) -> Self {
        self.remainder_policy = remainder_policy;
        self
    }

    pub fn with_trade_pricing(mut self, trade_pricing: TradePricing) -> Self {
        self.trade_pricing = trade_pricing;
        self
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
