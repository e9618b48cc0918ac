//! The matching engine: order submission plus the background matching thread.

use super::config::{EngineConfig, MatchingMode, TradePricing};
use super::error::EngineError;
use super::trade::{Trade, TradeListener};
use crate::orderbook::{
    MatchedOrders, Order, OrderBook, OrderBookError, OrderBookSnapshot, Price, RemainderPolicy,
};
use crate::utils::current_time_millis;
use parking_lot::{Condvar, Mutex};
use pricelevel::{Side, UuidGenerator};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

/// State shared between the engine handle and its matching thread
struct EngineShared {
    book: OrderBook,
    config: EngineConfig,
    listener: Option<TradeListener>,

    /// Generator for unique trade IDs
    trade_id_generator: UuidGenerator,

    /// Cleared to ask the matching thread to exit
    running: AtomicBool,

    /// Set when the matching thread should skip its next idle wait
    wake_pending: Mutex<bool>,
    wake_signal: Condvar,

    trade_count: AtomicU64,
    matched_quantity: AtomicU64,
    discarded_quantity: AtomicU64,
    submitted_quantity: AtomicU64,
}

/// Clears the running flag when the matching thread exits, including by unwinding
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl EngineShared {
    fn process_orders(&self) {
        let _running = RunningGuard(&self.running);
        debug!(
            "Matching thread started in {:?} mode",
            self.config.matching_mode
        );
        while self.running.load(Ordering::Acquire) {
            match self.config.matching_mode {
                MatchingMode::Poll => {
                    self.match_once();
                }
                MatchingMode::Notify => {
                    while self.running.load(Ordering::Acquire) && self.match_once().is_some() {}
                }
            }
            self.idle_wait();
        }
        debug!("Matching thread stopped");
    }

    /// Block for at most the idle interval, returning early on a wake-up
    fn idle_wait(&self) {
        let mut pending = self.wake_pending.lock();
        if !*pending && self.running.load(Ordering::Acquire) {
            let _ = self
                .wake_signal
                .wait_for(&mut pending, self.config.idle_interval);
        }
        *pending = false;
    }

    fn wake(&self) {
        let mut pending = self.wake_pending.lock();
        *pending = true;
        self.wake_signal.notify_all();
    }

    fn match_once(&self) -> Option<Trade> {
        let matched = self.book.match_order()?;
        Some(self.execute_trade(&matched))
    }

    fn execute_trade(&self, matched: &MatchedOrders) -> Trade {
        let price = match self.config.trade_pricing {
            TradePricing::SellPrice => matched.sell.price(),
            TradePricing::MakerPrice => matched.maker().price(),
        };
        let trade = Trade {
            trade_id: self.trade_id_generator.next(),
            buy_order_id: matched.buy.id(),
            sell_order_id: matched.sell.id(),
            quantity: matched.quantity(),
            price,
            timestamp: current_time_millis(),
        };

        self.trade_count.fetch_add(1, Ordering::Relaxed);
        self.matched_quantity
            .fetch_add(trade.quantity, Ordering::Relaxed);
        if let Some(residual) = matched.residual {
            if self.book.remainder_policy() == RemainderPolicy::Discard {
                self.discarded_quantity
                    .fetch_add(residual.quantity(), Ordering::Relaxed);
            }
        }

        match &self.listener {
            Some(listener) => listener(&trade),
            None => info!("{}", trade),
        }
        trade
    }
}

/// A continuous double-auction matching engine.
///
/// Orders handed to [`MatchingEngine::receive_order`] rest in the engine's
/// [`OrderBook`]. Once [`MatchingEngine::start`] has been called a dedicated
/// thread repeatedly matches the best bid against the best ask and reports
/// every trade to the configured [`TradeListener`]. The thread runs until
/// [`MatchingEngine::stop`] and is reclaimed by [`MatchingEngine::join`];
/// dropping the engine does both.
pub struct MatchingEngine {
    shared: Arc<EngineShared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl MatchingEngine {
    /// Create an engine that logs trades through `tracing`
    pub fn new(config: EngineConfig) -> Self {
        Self::build(config, None)
    }

    /// Create an engine that reports trades to `listener`
    pub fn with_listener(config: EngineConfig, listener: TradeListener) -> Self {
        Self::build(config, Some(listener))
    }

    fn build(config: EngineConfig, listener: Option<TradeListener>) -> Self {
        // Create a unique namespace for this engine's trade IDs
        let namespace = Uuid::new_v4();

        Self {
            shared: Arc::new(EngineShared {
                book: OrderBook::with_policy(config.remainder_policy),
                config,
                listener,
                trade_id_generator: UuidGenerator::new(namespace),
                running: AtomicBool::new(false),
                wake_pending: Mutex::new(false),
                wake_signal: Condvar::new(),
                trade_count: AtomicU64::new(0),
                matched_quantity: AtomicU64::new(0),
                discarded_quantity: AtomicU64::new(0),
                submitted_quantity: AtomicU64::new(0),
            }),
            worker: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    /// Validate an order and place it in the book.
    ///
    /// In notify mode the matching thread is woken when the insertion leaves
    /// the book crossed.
    pub fn receive_order(&self, order: Order) -> Result<(), OrderBookError> {
        order.validate()?;
        self.shared
            .submitted_quantity
            .fetch_add(order.quantity(), Ordering::Relaxed);
        let crossed = self.shared.book.add_order(order);
        if crossed && self.shared.config.matching_mode == MatchingMode::Notify {
            self.shared.wake();
        }
        Ok(())
    }

    /// Build an order from its fields and submit it
    pub fn submit(
        &self,
        id: u64,
        side: Side,
        price: impl Into<Price>,
        quantity: u64,
        timestamp: u64,
    ) -> Result<(), OrderBookError> {
        self.receive_order(Order::new(id, side, price, quantity, timestamp))
    }

    /// Spawn the matching thread.
    ///
    /// A previous thread that was stopped, or that died, is joined first. If
    /// it died from a panic this returns [`EngineError::WorkerPanicked`] and the
    /// next call starts a fresh thread.
    pub fn start(&self) -> Result<(), EngineError> {
        let mut worker = self.worker.lock();
        if let Some(previous) = worker.take() {
            if self.shared.running.load(Ordering::Acquire) && !previous.is_finished() {
                *worker = Some(previous);
                return Err(EngineError::AlreadyRunning);
            }
            // Stopped or dead but never joined: reclaim it before restarting.
            previous.join().map_err(|_| {
                warn!("Matching thread panicked");
                EngineError::WorkerPanicked
            })?;
        }

        self.shared.running.store(true, Ordering::Release);
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name("matching-engine".to_string())
            .spawn(move || shared.process_orders())
            .map_err(|err| {
                self.shared.running.store(false, Ordering::Release);
                EngineError::WorkerSpawn {
                    message: err.to_string(),
                }
            })?;

        *worker = Some(handle);
        debug!("Matching engine started");
        Ok(())
    }

    /// Ask the matching thread to exit after its current iteration
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::Release);
        self.shared.wake();
        debug!("Matching engine stop requested");
    }

    /// Wait for the matching thread to exit.
    ///
    /// Blocks until [`MatchingEngine::stop`] is called from elsewhere unless
    /// the thread has already ended. Returns immediately when no thread was
    /// started.
    pub fn join(&self) -> Result<(), EngineError> {
        let handle = self.worker.lock().take();
        let Some(handle) = handle else {
            return Ok(());
        };
        let result = handle.join();
        self.shared.running.store(false, Ordering::Release);
        result.map_err(|_| {
            warn!("Matching thread panicked");
            EngineError::WorkerPanicked
        })
    }

    /// Stop the matching thread and wait for it
    pub fn shutdown(&self) -> Result<(), EngineError> {
        self.stop();
        self.join()
    }

    /// Whether the matching thread is alive and has not been asked to stop
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Run a single match attempt on the calling thread
    pub fn match_once(&self) -> Option<Trade> {
        let trade = self.shared.match_once();
        trace!("match_once: {:?}", trade);
        trade
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.shared.book.best_bid()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.shared.book.best_ask()
    }

    /// Number of orders resting in the book
    pub fn resting_order_count(&self) -> usize {
        self.shared.book.order_count()
    }

    /// Quantity resting on one side of the book
    pub fn resting_quantity(&self, side: Side) -> u64 {
        self.shared.book.total_quantity(side)
    }

    /// Snapshot of up to `depth` levels per side
    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        self.shared.book.create_snapshot(depth)
    }

    /// Number of trades executed so far
    pub fn trade_count(&self) -> u64 {
        self.shared.trade_count.load(Ordering::Relaxed)
    }

    /// Sum of executed trade quantities
    pub fn matched_quantity(&self) -> u64 {
        self.shared.matched_quantity.load(Ordering::Relaxed)
    }

    /// Quantity dropped under [`RemainderPolicy::Discard`]
    pub fn discarded_quantity(&self) -> u64 {
        self.shared.discarded_quantity.load(Ordering::Relaxed)
    }

    /// Sum of quantities of every accepted order
    pub fn submitted_quantity(&self) -> u64 {
        self.shared.submitted_quantity.load(Ordering::Relaxed)
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Drop for MatchingEngine {
    fn drop(&mut self) {
        if self.worker.get_mut().is_some() {
            let _ = self.shutdown();
        }
    }
}
