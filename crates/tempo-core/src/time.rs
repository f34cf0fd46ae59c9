//! Wall clocks for Tempo
//!
//! Timer timestamps are milliseconds since the Unix epoch. The tick engine
//! and the registry never call the OS clock directly; they go through a
//! [`Clock`] so that tests can drive time by hand.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
pub type EpochMillis = i64;

/// Source of "now"
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> EpochMillis;
}

/// Operating system wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> EpochMillis {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_millis() as EpochMillis,
            // Clock set before 1970
            Err(before) => -(before.duration().as_millis() as EpochMillis),
        }
    }
}

/// Hand-driven clock
///
/// May be moved backwards to reproduce clock skew.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: EpochMillis) -> Self {
        ManualClock {
            now: AtomicI64::new(start),
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, now: EpochMillis) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Move the clock by `delta_ms` (negative moves it back)
    /// Returns the new instant
    pub fn advance(&self, delta_ms: i64) -> EpochMillis {
        self.now.fetch_add(delta_ms, Ordering::SeqCst) + delta_ms
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> EpochMillis {
        self.now.load(Ordering::SeqCst)
    }
}
