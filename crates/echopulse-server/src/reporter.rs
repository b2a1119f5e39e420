//! Periodic throughput sampling and logging.
//!
//! One long-lived task wakes once per interval, snapshots the request
//! counter, and logs requests/sec since the previous tick. The latest sample
//! is also published on a `watch` channel so other components (and tests)
//! can observe it without parsing log output.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use echopulse_core::{RequestCounter, ThroughputTick, ThroughputWindow};

/// Background task that samples the request counter once per interval.
pub struct ThroughputReporter {
    counter: Arc<RequestCounter>,
    interval: Duration,
}

/// Control handle for a spawned reporter.
pub struct ReporterHandle {
    shutdown_tx: watch::Sender<bool>,
    sample_rx: watch::Receiver<Option<ThroughputTick>>,
    task: JoinHandle<()>,
}

impl ThroughputReporter {
    pub fn new(counter: Arc<RequestCounter>, interval: Duration) -> Self {
        Self { counter, interval }
    }

    /// Spawn the reporting loop. It runs until the handle signals shutdown.
    pub fn spawn(self) -> ReporterHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (sample_tx, sample_rx) = watch::channel(None);
        let task = tokio::spawn(self.run(shutdown_rx, sample_tx));
        ReporterHandle {
            shutdown_tx,
            sample_rx,
            task,
        }
    }

    async fn run(
        self,
        mut shutdown: watch::Receiver<bool>,
        samples: watch::Sender<Option<ThroughputTick>>,
    ) {
        let mut window = ThroughputWindow::new();
        let mut last = Instant::now();

        let mut tick = time::interval(self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // An interval's first tick completes immediately; consume it so every
        // loop iteration measures a full interval.
        tick.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,

                now = tick.tick() => {
                    let elapsed = now.duration_since(last).as_secs_f64();
                    last = now;

                    let count = self.counter.snapshot();
                    if let Some(sample) = window.advance(count, elapsed) {
                        tracing::info!(
                            "{} total requests ({:.2}/sec). last log {:.2}s ago.",
                            sample.total,
                            sample.rate,
                            sample.elapsed_secs
                        );
                        let _ = samples.send(Some(sample));
                    }
                }
            }
        }
    }
}

impl ReporterHandle {
    /// Subscribe to emitted samples. Holds `None` until the first tick.
    pub fn samples(&self) -> watch::Receiver<Option<ThroughputTick>> {
        self.sample_rx.clone()
    }

    /// Stop scheduling further ticks and wait for the loop to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}
