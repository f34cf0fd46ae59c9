//! Timer Simulator - registry and tick engine on a hand-driven clock
//!
//! Every tick first moves the manual clock by the tick period, so a run is
//! fully reproducible and independent of the host's wall clock.

use std::sync::Arc;

use tempo_core::{Clock, EpochMillis, EventLog, ManualClock, RuleBook, Timer, TimerEvent};
use tempo_engine::{TickEngine, TickReport, TimerContext, TimerRegistry};
use tempo_state::MemoryStore;

/// Default simulated tick period (ms)
pub const SIM_TICK_PERIOD: i64 = 96;

/// Default simulated start instant (2023-11-14T22:13:20Z)
pub const SIM_EPOCH: EpochMillis = 1_700_000_000_000;

/// Simulated timer host
pub struct TimerSimulator {
    registry: TimerRegistry,
    engine: TickEngine,
    store: Arc<MemoryStore>,
    events: Arc<EventLog>,
    clock: Arc<ManualClock>,
    tick_period: i64,
    ticks: u64,
}

impl TimerSimulator {
    pub fn new() -> Self {
        Self::with_rules(RuleBook::standard())
    }

    pub fn with_rules(rules: RuleBook) -> Self {
        let store = Arc::new(MemoryStore::new());
        let events = Arc::new(EventLog::new());
        let clock = Arc::new(ManualClock::new(SIM_EPOCH));
        let ctx = TimerContext::new(store.clone(), events.clone(), clock.clone()).with_rules(rules);

        TimerSimulator {
            registry: TimerRegistry::new(ctx.clone()),
            engine: TickEngine::new(ctx),
            store,
            events,
            clock,
            tick_period: SIM_TICK_PERIOD,
            ticks: 0,
        }
    }

    /// Change the clock advance applied before each tick
    pub fn with_tick_period(mut self, period_ms: i64) -> Self {
        self.tick_period = period_ms;
        self
    }

    pub fn registry(&self) -> &TimerRegistry {
        &self.registry
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn now(&self) -> EpochMillis {
        self.clock.now_millis()
    }

    /// Move the clock without ticking
    pub fn advance_clock(&self, delta_ms: i64) -> EpochMillis {
        self.clock.advance(delta_ms)
    }

    /// Advance the clock by one period and tick
    pub fn tick(&mut self) -> TickReport {
        self.tick_by(self.tick_period)
    }

    /// Advance the clock by `gap_ms` (possibly negative) and tick
    pub fn tick_by(&mut self, gap_ms: i64) -> TickReport {
        self.clock.advance(gap_ms);
        self.ticks += 1;
        self.engine.tick()
    }

    /// Tick until at least `duration_ms` of simulated time has passed
    pub fn run_for(&mut self, duration_ms: i64) -> Vec<TickReport> {
        let mut reports = Vec::new();
        let mut simulated = 0;
        while simulated < duration_ms {
            reports.push(self.tick());
            simulated += self.tick_period.max(1);
        }
        reports
    }

    /// Tick until `name` is elapsed; returns the number of ticks taken
    pub fn run_until_elapsed(&mut self, name: &str, max_ticks: u64) -> Option<u64> {
        for n in 1..=max_ticks {
            self.tick();
            if self.timer(name)?.elapsed {
                return Some(n);
            }
        }
        None
    }

    /// Total ticks run
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn timer(&self, name: &str) -> Option<Timer> {
        self.store.get(name)
    }

    /// Number of elapsed notifications raised for `name`
    pub fn elapsed_notifications(&self, name: &str) -> usize {
        self.events
            .events()
            .iter()
            .filter(|e| matches!(e, TimerEvent::TimerElapsed(t) if t.name == name))
            .count()
    }
}

impl Default for TimerSimulator {
    fn default() -> Self {
        Self::new()
    }
}
