//! Tick Engine - advances running timers and detects elapse

use tempo_core::TimerEvent;

use crate::TimerContext;

/// Outcome of a single tick
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Timers in the snapshot
    pub scanned: u32,
    /// Running timers that were advanced and written back
    pub advanced: u32,
    /// Timers skipped because they are paused
    pub paused: u32,
    /// Running timers skipped because their kind has no rules
    pub unregistered: u32,
    /// Timers that crossed into elapsed on this tick
    pub elapsed: Vec<String>,
}

/// Tick Engine - stateless between ticks
#[derive(Clone, Debug)]
pub struct TickEngine {
    ctx: TimerContext,
}

impl TickEngine {
    pub fn new(ctx: TimerContext) -> Self {
        TickEngine { ctx }
    }

    /// Advance every running timer to "now"
    ///
    /// A timer whose kind has no rules is logged and left untouched; the
    /// rest of the tick carries on. Elapsed notifications are raised once
    /// every write of the tick has landed and the gate is released.
    pub fn tick(&self) -> TickReport {
        let mut report = TickReport::default();
        let mut crossed = Vec::new();

        {
            let _gate = self.ctx.lock();
            let snapshot = self.ctx.store.read_all();
            let now = self.ctx.clock.now_millis();

            for timer in snapshot.into_values() {
                report.scanned += 1;

                if !timer.running {
                    report.paused += 1;
                    continue;
                }

                let Some(rules) = self.ctx.rules.get(timer.kind) else {
                    tracing::warn!(timer = %timer.name, kind = %timer.kind, "unrecognized timer type, skipping");
                    report.unregistered += 1;
                    continue;
                };

                let updated = rules.update(&timer, now);
                self.ctx.store.apply_setter(updated.clone());
                report.advanced += 1;

                // Edge-triggered: only the false -> true transition notifies
                if updated.elapsed && !timer.elapsed {
                    crossed.push(updated);
                }
            }
        }

        for timer in crossed {
            tracing::debug!(timer = %timer.name, value = timer.value, "elapsed");
            report.elapsed.push(timer.name.clone());
            self.ctx.sink.emit(TimerEvent::TimerElapsed(timer));
        }

        tracing::trace!(
            scanned = report.scanned,
            advanced = report.advanced,
            elapsed = report.elapsed.len(),
            "tick"
        );
        report
    }
}
