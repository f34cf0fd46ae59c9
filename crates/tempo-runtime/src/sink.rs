//! Notification sinks for hosted timers

use tempo_core::{NotificationSink, TimerEvent};
use tokio::sync::broadcast;

/// Default capacity of the notification channel
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Fans timer events out to any number of subscribers
///
/// Slow subscribers lag and lose the oldest events rather than stalling
/// ticks. Emitting with nobody subscribed is not an error.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    sender: broadcast::Sender<TimerEvent>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<TimerEvent>) {
        let (sender, receiver) = broadcast::channel(capacity.max(1));
        (ChannelSink { sender }, receiver)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.sender.subscribe()
    }
}

impl NotificationSink for ChannelSink {
    fn emit(&self, event: TimerEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("timer event dropped: no subscribers");
        }
    }
}

/// Writes every event to the log at info level
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn emit(&self, event: TimerEvent) {
        tracing::info!(event = event.name(), timer = event.timer_name(), "timer event");
    }
}
