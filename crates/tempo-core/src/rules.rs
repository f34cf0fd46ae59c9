//! Per-variant timer arithmetic
//!
//! Each [`TimerKind`] maps to a [`TimerRules`] entry in a [`RuleBook`].
//! The registry and the tick engine only ever talk to the book, so a new
//! variant is one more entry here and nothing else.

use std::collections::HashMap;

use crate::{EpochMillis, Timer, TimerKind};

/// Arithmetic for one timer variant
#[derive(Clone, Copy, Debug)]
pub struct TimerRules {
    /// New value after `gap` milliseconds have passed
    pub step: fn(value: i64, gap: i64) -> i64,
    /// Fresh value for a timer of the given duration
    pub reset_value: fn(duration: i64) -> i64,
    /// Whether `value` has crossed the variant's threshold
    pub is_elapsed: fn(value: i64, duration: i64) -> bool,
}

impl TimerRules {
    /// Advance a timer to `now`
    ///
    /// `gap` is not clamped: a clock that went backwards produces a
    /// negative gap and the value moves the other way.
    pub fn update(&self, timer: &Timer, now: EpochMillis) -> Timer {
        let gap = now.saturating_sub(timer.timestamp);
        let value = (self.step)(timer.value, gap);
        Timer {
            value,
            timestamp: now,
            elapsed: (self.is_elapsed)(value, timer.duration),
            ..timer.clone()
        }
    }

    /// Restore the fresh value and clear `elapsed`
    ///
    /// `timestamp` and `running` are left as they were.
    pub fn reset(&self, timer: &Timer) -> Timer {
        Timer {
            value: (self.reset_value)(timer.duration),
            elapsed: false,
            ..timer.clone()
        }
    }

    /// Counts up from zero; elapsed strictly past the duration
    pub const INCREMENTING: TimerRules = TimerRules {
        step: count_up,
        reset_value: from_zero,
        is_elapsed: past_duration,
    };

    /// Counts down from the duration; elapsed strictly below zero
    pub const DECREMENTING: TimerRules = TimerRules {
        step: count_down,
        reset_value: from_duration,
        is_elapsed: below_zero,
    };
}

fn count_up(value: i64, gap: i64) -> i64 {
    value.saturating_add(gap)
}

fn count_down(value: i64, gap: i64) -> i64 {
    value.saturating_sub(gap)
}

fn from_zero(_duration: i64) -> i64 {
    0
}

fn from_duration(duration: i64) -> i64 {
    duration
}

fn past_duration(value: i64, duration: i64) -> bool {
    value > duration
}

fn below_zero(value: i64, _duration: i64) -> bool {
    value < 0
}

/// Table of registered variants
#[derive(Clone, Debug, Default)]
pub struct RuleBook {
    rules: HashMap<TimerKind, TimerRules>,
}

impl RuleBook {
    /// Empty book; every kind is unregistered
    pub fn empty() -> Self {
        RuleBook::default()
    }

    /// Book with the built-in variants
    pub fn standard() -> Self {
        RuleBook::empty()
            .with_rules(TimerKind::Incrementing, TimerRules::INCREMENTING)
            .with_rules(TimerKind::Decrementing, TimerRules::DECREMENTING)
    }

    /// Register (or replace) the rules for a kind
    pub fn with_rules(mut self, kind: TimerKind, rules: TimerRules) -> Self {
        self.rules.insert(kind, rules);
        self
    }

    pub fn get(&self, kind: TimerKind) -> Option<&TimerRules> {
        self.rules.get(&kind)
    }

    pub fn contains(&self, kind: TimerKind) -> bool {
        self.rules.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running(kind: TimerKind, value: i64, duration: i64, timestamp: EpochMillis) -> Timer {
        Timer {
            value,
            running: true,
            ..Timer::new("t", kind, duration, timestamp)
        }
    }

    #[test]
    fn test_incrementing_update() {
        let timer = running(TimerKind::Incrementing, 400, 1_000, 10_000);
        let next = TimerRules::INCREMENTING.update(&timer, 10_600);

        assert_eq!(next.value, 1_000);
        assert_eq!(next.timestamp, 10_600);
        // Exactly at the duration is not yet past it
        assert!(!next.elapsed);

        let next = TimerRules::INCREMENTING.update(&next, 10_601);
        assert_eq!(next.value, 1_001);
        assert!(next.elapsed);
    }

    #[test]
    fn test_decrementing_update() {
        let timer = running(TimerKind::Decrementing, 500, 1_000, 0);
        let next = TimerRules::DECREMENTING.update(&timer, 500);

        assert_eq!(next.value, 0);
        assert!(!next.elapsed);

        let next = TimerRules::DECREMENTING.update(&next, 501);
        assert_eq!(next.value, -1);
        assert!(next.elapsed);
    }

    #[test]
    fn test_negative_gap_passes_through() {
        let timer = running(TimerKind::Incrementing, 2_000, 1_000, 5_000);
        let next = TimerRules::INCREMENTING.update(&timer, 4_000);

        assert_eq!(next.value, 1_000);
        assert_eq!(next.timestamp, 4_000);
        assert!(!next.elapsed);
    }

    #[test]
    fn test_reset_keeps_timestamp_and_running() {
        let timer = Timer {
            elapsed: true,
            ..running(TimerKind::Decrementing, -50, 3_000, 77)
        };
        let fresh = TimerRules::DECREMENTING.reset(&timer);

        assert_eq!(fresh.value, 3_000);
        assert!(!fresh.elapsed);
        assert!(fresh.running);
        assert_eq!(fresh.timestamp, 77);

        let fresh = TimerRules::INCREMENTING.reset(&Timer {
            kind: TimerKind::Incrementing,
            ..timer
        });
        assert_eq!(fresh.value, 0);
    }

    #[test]
    fn test_rule_book_registration() {
        let book = RuleBook::standard();
        assert!(book.contains(TimerKind::Incrementing));
        assert!(book.contains(TimerKind::Decrementing));

        let partial = RuleBook::empty().with_rules(TimerKind::Incrementing, TimerRules::INCREMENTING);
        assert!(partial.get(TimerKind::Decrementing).is_none());
    }

    proptest! {
        #[test]
        fn prop_update_moves_value_by_gap(
            value in -1_000_000_000i64..1_000_000_000,
            duration in 0i64..1_000_000_000,
            timestamp in 0i64..1_000_000_000_000,
            gap in -100_000i64..100_000,
        ) {
            let now = timestamp + gap;

            let up = TimerRules::INCREMENTING
                .update(&running(TimerKind::Incrementing, value, duration, timestamp), now);
            prop_assert_eq!(up.value, value + gap);
            prop_assert_eq!(up.timestamp, now);
            prop_assert_eq!(up.elapsed, up.value > duration);

            let down = TimerRules::DECREMENTING
                .update(&running(TimerKind::Decrementing, value, duration, timestamp), now);
            prop_assert_eq!(down.value, value - gap);
            prop_assert_eq!(down.timestamp, now);
            prop_assert_eq!(down.elapsed, down.value < 0);
        }
    }
}
