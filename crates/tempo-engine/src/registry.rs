//! Timer registry - operator-invoked lifecycle operations
//!
//! Every operation reads the store exactly once, computes the new record in
//! full, then issues a single write and at most one notification, both with
//! the post-mutation record. Notifications go out after the gate is
//! released, so a sink may call back into the registry.

use serde::Serialize;
use tempo_core::{
    DurationInput, TempoError, TempoResult, Timer, TimerEvent, TimerKind, TimerRules,
};

use crate::TimerContext;

/// Confirmation returned by `delete_timer`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// Lifecycle operations over the timer store
#[derive(Clone, Debug)]
pub struct TimerRegistry {
    ctx: TimerContext,
}

impl TimerRegistry {
    pub fn new(ctx: TimerContext) -> Self {
        TimerRegistry { ctx }
    }

    pub fn context(&self) -> &TimerContext {
        &self.ctx
    }

    /// Create a paused, freshly reset timer
    ///
    /// Checked in order: name is free, duration resolves, type is known.
    pub fn create_timer(
        &self,
        name: &str,
        kind: &str,
        duration: impl Into<DurationInput>,
    ) -> TempoResult<Timer> {
        self.create_timer_from(name, kind, Ok(duration.into()))
    }

    /// Like [`create_timer`](Self::create_timer), for a duration whose
    /// conversion may already have failed
    ///
    /// A conversion error is only reported once the name is known to be
    /// free, so a duplicate name always wins over a bad duration.
    pub fn create_timer_from(
        &self,
        name: &str,
        kind: &str,
        duration: TempoResult<DurationInput>,
    ) -> TempoResult<Timer> {
        let timer = {
            let _gate = self.ctx.lock();

            if self.ctx.store.read_all().contains_key(name) {
                return Err(TempoError::DuplicateTimer(name.to_string()));
            }

            let duration = duration?.resolve()?;
            let kind: TimerKind = kind.parse()?;
            let rules = self.rules_for(kind)?;

            let timer = rules.reset(&Timer::new(name, kind, duration, self.ctx.clock.now_millis()));
            self.ctx.store.apply_setter(timer.clone());
            timer
        };

        tracing::debug!(timer = %name, kind = %timer.kind, duration = timer.duration, "created");
        self.ctx.sink.emit(TimerEvent::TimerCreated(timer.clone()));
        Ok(timer)
    }

    /// Remove a timer entirely
    pub fn delete_timer(&self, name: &str) -> TempoResult<Deleted> {
        {
            let _gate = self.ctx.lock();
            self.lookup(name)?;
            self.ctx.store.apply_delete(name);
        }

        tracing::debug!(timer = %name, "deleted");
        self.ctx.sink.emit(TimerEvent::TimerDeleted {
            name: name.to_string(),
        });
        Ok(Deleted { deleted: true })
    }

    /// Restore the fresh value; the timer runs afterwards unless `pause`
    ///
    /// `timestamp` is whatever the reset rule leaves, so an unpaused reset
    /// measures its first tick from the old timestamp.
    pub fn reset_timer(&self, name: &str, pause: bool) -> TempoResult<Timer> {
        let fresh = {
            let _gate = self.ctx.lock();
            let timer = self.lookup(name)?;
            let rules = self.rules_for(timer.kind)?;

            let fresh = rules.reset(&timer).with_running(!pause);
            self.ctx.store.apply_setter(fresh.clone());
            fresh
        };

        tracing::debug!(timer = %name, pause, "reset");
        self.ctx.sink.emit(TimerEvent::TimerReset(fresh.clone()));
        Ok(fresh)
    }

    /// Stop a running timer; `Ok(None)` if it was already paused
    pub fn pause_timer(&self, name: &str) -> TempoResult<Option<Timer>> {
        let paused = {
            let _gate = self.ctx.lock();
            self.pause_locked(self.lookup(name)?)
        };
        Ok(paused.map(|t| self.announce(t)))
    }

    /// Start a paused timer from "now"; `Ok(None)` if it was already running
    pub fn resume_timer(&self, name: &str) -> TempoResult<Option<Timer>> {
        let resumed = {
            let _gate = self.ctx.lock();
            self.resume_locked(self.lookup(name)?)
        };
        Ok(resumed.map(|t| self.announce(t)))
    }

    /// Pause if running, resume otherwise
    pub fn toggle_timer(&self, name: &str) -> TempoResult<Option<Timer>> {
        let toggled = {
            let _gate = self.ctx.lock();
            let timer = self.lookup(name)?;
            if timer.running {
                self.pause_locked(timer)
            } else {
                self.resume_locked(timer)
            }
        };
        Ok(toggled.map(|t| self.announce(t)))
    }

    /// Get a single timer
    pub fn get_timer(&self, name: &str) -> TempoResult<Timer> {
        self.lookup(name)
    }

    /// All timers, sorted by name
    pub fn list_timers(&self) -> Vec<Timer> {
        let mut timers: Vec<Timer> = self.ctx.store.read_all().into_values().collect();
        timers.sort_by(|a, b| a.name.cmp(&b.name));
        timers
    }

    fn pause_locked(&self, timer: Timer) -> Option<Timer> {
        if !timer.running {
            tracing::warn!(timer = %timer.name, "pause ignored: timer already paused");
            return None;
        }

        // Value is not brought up to date here; only ticks advance it
        let paused = timer.with_running(false);
        self.ctx.store.apply_setter(paused.clone());
        Some(paused)
    }

    fn resume_locked(&self, timer: Timer) -> Option<Timer> {
        if timer.running {
            tracing::warn!(timer = %timer.name, "resume ignored: timer already running");
            return None;
        }

        let resumed = Timer {
            running: true,
            timestamp: self.ctx.clock.now_millis(),
            ..timer
        };
        self.ctx.store.apply_setter(resumed.clone());
        Some(resumed)
    }

    /// Notify a pause or resume once the gate is released
    fn announce(&self, timer: Timer) -> Timer {
        let event = if timer.running {
            tracing::debug!(timer = %timer.name, value = timer.value, "resumed");
            TimerEvent::TimerResumed(timer.clone())
        } else {
            tracing::debug!(timer = %timer.name, value = timer.value, "paused");
            TimerEvent::TimerPaused(timer.clone())
        };
        self.ctx.sink.emit(event);
        timer
    }

    fn lookup(&self, name: &str) -> TempoResult<Timer> {
        self.ctx
            .store
            .read_all()
            .remove(name)
            .ok_or_else(|| TempoError::TimerNotFound(name.to_string()))
    }

    fn rules_for(&self, kind: TimerKind) -> TempoResult<&TimerRules> {
        self.ctx
            .rules
            .get(kind)
            .ok_or_else(|| TempoError::UnknownTimerType(kind.to_string()))
    }
}
