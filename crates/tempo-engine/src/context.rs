//! Shared collaborators for the registry and the tick engine

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tempo_core::{Clock, NotificationSink, RuleBook, SystemClock};
use tempo_state::TimerStore;

/// Everything the registry and tick engine need from the outside
///
/// Cloning is cheap; clones share the same store, sink, clock, rules and
/// gate.
#[derive(Clone)]
pub struct TimerContext {
    pub store: Arc<dyn TimerStore>,
    pub sink: Arc<dyn NotificationSink>,
    pub clock: Arc<dyn Clock>,
    pub rules: Arc<RuleBook>,
    /// Serializes read-modify-write cycles against the store
    gate: Arc<Mutex<()>>,
}

impl TimerContext {
    /// Context with the built-in rule book
    pub fn new(
        store: Arc<dyn TimerStore>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        TimerContext {
            store,
            sink,
            clock,
            rules: Arc::new(RuleBook::standard()),
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Context on the system wall clock
    pub fn with_system_clock(store: Arc<dyn TimerStore>, sink: Arc<dyn NotificationSink>) -> Self {
        Self::new(store, sink, Arc::new(SystemClock))
    }

    /// Replace the rule book
    pub fn with_rules(mut self, rules: RuleBook) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    /// Hold while reading a snapshot and writing back the timers derived
    /// from it, so a tick never writes over a concurrent command
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock()
    }
}

impl std::fmt::Debug for TimerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerContext")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
