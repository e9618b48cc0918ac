use auction_engine::{EngineConfig, MatchingEngine, MatchingMode, RemainderPolicy, Trade};
use pricelevel::{Side, setup_logger};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

// Number of submitting threads
const THREAD_COUNT: u64 = 8;
// Orders submitted by each thread
const ORDERS_PER_THREAD: u64 = 50_000;

fn main() {
    setup_logger();
    info!("Multi-threaded MatchingEngine Test");
    info!("----------------------------------");
    info!("Submitters: {}", THREAD_COUNT);
    info!("Orders per submitter: {}", ORDERS_PER_THREAD);

    for (mode, policy) in [
        (MatchingMode::Notify, RemainderPolicy::Requeue),
        (MatchingMode::Notify, RemainderPolicy::Discard),
        (MatchingMode::Poll, RemainderPolicy::Requeue),
    ] {
        run_test(
            EngineConfig::default()
                .with_matching_mode(mode)
                .with_remainder_policy(policy),
        );
    }
}

fn run_test(config: EngineConfig) {
    info!(
        "\nRunning with {:?} matching, {:?} remainders",
        config.matching_mode, config.remainder_policy
    );

    let reported = Arc::new(AtomicU64::new(0));
    let sink = Arc::clone(&reported);
    let engine = Arc::new(MatchingEngine::with_listener(
        config,
        Arc::new(move |trade: &Trade| {
            sink.fetch_add(trade.quantity, Ordering::Relaxed);
        }),
    ));
    if let Err(err) = engine.start() {
        warn!("Could not start engine: {}", err);
        return;
    }

    // Synchronization barrier to ensure all threads start at the same time
    let barrier = Arc::new(Barrier::new(THREAD_COUNT as usize + 1)); // +1 for main thread
    let mut handles = Vec::with_capacity(THREAD_COUNT as usize);

    for thread_id in 0..THREAD_COUNT {
        let thread_engine = Arc::clone(&engine);
        let thread_barrier = Arc::clone(&barrier);

        handles.push(thread::spawn(move || {
            thread_barrier.wait();
            let mut submitted = 0;
            for i in 0..ORDERS_PER_THREAD {
                let id = thread_id * ORDERS_PER_THREAD + i;
                let side = if (i + thread_id) % 2 == 0 {
                    Side::Buy
                } else {
                    Side::Sell
                };
                // Ten levels either side of 100.0
                let price = 95.0 + (id % 21) as f64 * 0.5;
                let quantity = 1 + id % 10;
                if thread_engine.submit(id, side, price, quantity, id).is_ok() {
                    submitted += quantity;
                }
            }
            submitted
        }));
    }

    let start_time = Instant::now();
    barrier.wait();

    let mut submitted = 0;
    for (i, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(quantity) => submitted += quantity,
            Err(_) => warn!("Thread {} panicked", i),
        }
    }
    let submit_elapsed = start_time.elapsed();

    // Let the matcher finish what is crossable, then stop it
    thread::sleep(Duration::from_millis(200));
    if let Err(err) = engine.shutdown() {
        warn!("Shutdown failed: {}", err);
    }

    let resting = engine.resting_quantity(Side::Buy) + engine.resting_quantity(Side::Sell);
    let matched = engine.matched_quantity();
    let discarded = engine.discarded_quantity();
    let total_orders = THREAD_COUNT * ORDERS_PER_THREAD;

    info!("Submission finished in {:?}", submit_elapsed);
    info!(
        "Orders per second: {:.2}",
        total_orders as f64 / submit_elapsed.as_secs_f64()
    );
    info!("Trades: {}", engine.trade_count());
    info!("Matched quantity: {} (reported {})", matched, reported.load(Ordering::Relaxed));
    info!("Discarded quantity: {}", discarded);
    info!("Resting quantity: {}", resting);
    info!("Best bid: {:?}, best ask: {:?}", engine.best_bid(), engine.best_ask());

    let accounted = resting + 2 * matched + discarded;
    if accounted == submitted {
        info!("Quantity conserved: {}", submitted);
    } else {
        warn!("Quantity mismatch: submitted {}, accounted {}", submitted, accounted);
    }
}
