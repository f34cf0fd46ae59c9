//! Timer notifications
//!
//! Every mutation that changes a timer raises at most one event, carrying
//! the record as it stands after the mutation.

use parking_lot::Mutex;
use serde::Serialize;

use crate::Timer;

/// Notification raised by the registry or the tick engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum TimerEvent {
    TimerCreated(Timer),
    TimerDeleted { name: String },
    TimerReset(Timer),
    TimerPaused(Timer),
    TimerResumed(Timer),
    TimerElapsed(Timer),
}

impl TimerEvent {
    /// Event name as seen by hosts
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::TimerCreated(_) => "timerCreated",
            TimerEvent::TimerDeleted { .. } => "timerDeleted",
            TimerEvent::TimerReset(_) => "timerReset",
            TimerEvent::TimerPaused(_) => "timerPaused",
            TimerEvent::TimerResumed(_) => "timerResumed",
            TimerEvent::TimerElapsed(_) => "timerElapsed",
        }
    }

    /// Name of the timer the event is about
    pub fn timer_name(&self) -> &str {
        match self {
            TimerEvent::TimerDeleted { name } => name,
            TimerEvent::TimerCreated(t)
            | TimerEvent::TimerReset(t)
            | TimerEvent::TimerPaused(t)
            | TimerEvent::TimerResumed(t)
            | TimerEvent::TimerElapsed(t) => &t.name,
        }
    }
}

/// Receiver of timer notifications
pub trait NotificationSink: Send + Sync {
    fn emit(&self, event: TimerEvent);
}

/// Sink that drops everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn emit(&self, _event: TimerEvent) {}
}

/// In-memory recorder
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<TimerEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<TimerEvent> {
        self.events.lock().clone()
    }

    /// Take and clear the recorded events
    pub fn drain(&self) -> Vec<TimerEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of recorded events with the given name
    pub fn count(&self, name: &str) -> usize {
        self.events.lock().iter().filter(|e| e.name() == name).count()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl NotificationSink for EventLog {
    fn emit(&self, event: TimerEvent) {
        self.events.lock().push(event);
    }
}
