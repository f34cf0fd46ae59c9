//! Periodic tick driver

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tempo_engine::TickEngine;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Handle to a running tick loop
///
/// The loop runs until [`TickDriver::stop`] is awaited. Dropping the handle
/// without stopping aborts the task.
pub struct TickDriver {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
    period: Duration,
}

impl TickDriver {
    /// Spawn the tick loop on the current tokio runtime
    pub fn start(engine: TickEngine, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let ticks = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&ticks);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            // Late ticks are dropped; each tick measures its own gap anyway
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let report = engine.tick();
                        counter.fetch_add(1, Ordering::Relaxed);
                        if !report.elapsed.is_empty() {
                            tracing::debug!(timers = ?report.elapsed, "timers elapsed");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        tracing::info!(period_ms = period.as_millis() as u64, "tick driver started");
        TickDriver {
            shutdown,
            task: Some(task),
            ticks,
            period,
        }
    }

    /// Completed ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Signal the loop and wait for it to finish
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("tick driver ended abnormally: {}", e);
            }
        }
        tracing::info!(ticks = self.ticks(), "tick driver stopped");
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for TickDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickDriver")
            .field("period", &self.period)
            .field("ticks", &self.ticks())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::{EventLog, ManualClock};
    use tempo_engine::{TimerContext, TimerRegistry};
    use tempo_state::MemoryStore;

    #[tokio::test]
    async fn test_driver_ticks_until_stopped() {
        let store = Arc::new(MemoryStore::new());
        let events = Arc::new(EventLog::new());
        let clock = Arc::new(ManualClock::new(0));
        let ctx = TimerContext::new(store.clone(), events.clone(), clock.clone());
        let registry = TimerRegistry::new(ctx.clone());

        registry.create_timer("t", "incrementing", 100).unwrap();
        registry.resume_timer("t").unwrap();
        clock.advance(500);

        let driver = TickDriver::start(TickEngine::new(ctx), Duration::from_millis(5));
        assert!(driver.is_running());
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(driver.ticks() > 0);
        assert_eq!(store.get("t").map(|t| t.value), Some(500));
        assert_eq!(events.count("timerElapsed"), 1);

        driver.stop().await;

        clock.advance(500);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.get("t").map(|t| t.value), Some(500));
    }

    #[tokio::test]
    async fn test_zero_period_is_clamped() {
        let ctx = TimerContext::new(
            Arc::new(MemoryStore::new()),
            Arc::new(EventLog::new()),
            Arc::new(ManualClock::new(0)),
        );
        let driver = TickDriver::start(TickEngine::new(ctx), Duration::ZERO);
        assert_eq!(driver.period(), Duration::from_millis(1));
        driver.stop().await;
    }
}
