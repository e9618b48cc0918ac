use auction_engine::{EngineConfig, MatchingEngine, Order, Trade, TradeListener};
use pricelevel::{Side, setup_logger};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    // Print every trade the way a console sink would
    let listener: TradeListener = Arc::new(|trade: &Trade| println!("{trade}"));
    let engine = MatchingEngine::with_listener(EngineConfig::default(), listener);
    engine.start()?;

    engine.receive_order(Order::new(1, Side::Buy, 100.5, 10, 1628908800000))?;
    engine.receive_order(Order::new(2, Side::Sell, 100.5, 5, 1628908801000))?;
    engine.receive_order(Order::new(3, Side::Sell, 100.0, 5, 1628908802000))?;

    // Give the matching thread a moment, then tear it down
    thread::sleep(Duration::from_millis(50));
    engine.shutdown()?;

    info!("Trades executed: {}", engine.trade_count());
    info!("Resting orders: {}", engine.resting_order_count());
    info!("Snapshot: {}", engine.snapshot(10).to_json()?);
    Ok(())
}
