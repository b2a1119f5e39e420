//! Reporter loop tests under paused tokio time.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use echopulse_core::RequestCounter;
use echopulse_server::reporter::ThroughputReporter;

#[tokio::test(start_paused = true)]
async fn first_tick_reports_rate_over_one_interval() {
    let counter = Arc::new(RequestCounter::new());
    for _ in 0..10 {
        counter.increment();
    }

    let handle = ThroughputReporter::new(Arc::clone(&counter), Duration::from_secs(1)).spawn();
    let mut samples = handle.samples();

    samples.changed().await.unwrap();
    let tick = samples.borrow_and_update().unwrap();

    assert_eq!(tick.total, 10);
    assert!((tick.rate - 10.0).abs() < 1e-6, "rate = {}", tick.rate);
    assert!((tick.elapsed_secs - 1.0).abs() < 1e-6);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn rate_covers_only_the_last_interval() {
    let counter = Arc::new(RequestCounter::new());
    for _ in 0..10 {
        counter.increment();
    }

    let handle = ThroughputReporter::new(Arc::clone(&counter), Duration::from_secs(1)).spawn();
    let mut samples = handle.samples();

    samples.changed().await.unwrap();
    for _ in 0..30 {
        counter.increment();
    }

    samples.changed().await.unwrap();
    let tick = samples.borrow_and_update().unwrap();

    assert_eq!(tick.total, 40);
    assert!((tick.rate - 30.0).abs() < 1e-6, "rate = {}", tick.rate);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn emits_one_sample_per_interval() {
    let counter = Arc::new(RequestCounter::new());
    let handle = ThroughputReporter::new(Arc::clone(&counter), Duration::from_secs(1)).spawn();
    let mut samples = handle.samples();

    for i in 1..=3u64 {
        counter.increment();
        samples.changed().await.unwrap();
        let tick = samples.borrow_and_update().unwrap();
        assert_eq!(tick.total, i);
        assert!((tick.elapsed_secs - 1.0).abs() < 1e-6);
    }

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_loop_promptly() {
    let counter = Arc::new(RequestCounter::new());
    let handle = ThroughputReporter::new(counter, Duration::from_secs(3600)).spawn();

    // Must return without waiting out the interval.
    tokio::time::timeout(Duration::from_secs(1), handle.shutdown())
        .await
        .expect("shutdown should not wait for the next tick");
}
