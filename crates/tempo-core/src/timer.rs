//! Timer record and variant tags

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{EpochMillis, TempoError};

/// Timer variant - selects the update and reset arithmetic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    /// Counts up from zero; elapsed once past its duration
    Incrementing,
    /// Counts down from its duration; elapsed once below zero
    Decrementing,
}

impl TimerKind {
    pub const ALL: [TimerKind; 2] = [TimerKind::Incrementing, TimerKind::Decrementing];

    pub fn as_str(self) -> &'static str {
        match self {
            TimerKind::Incrementing => "incrementing",
            TimerKind::Decrementing => "decrementing",
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerKind {
    type Err = TempoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TempoError::UnknownTimerType(s.to_string()))
    }
}

/// A named timer
///
/// `value` is accurate as of `timestamp`; it only moves when the tick
/// engine advances a running timer or when a reset rule is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TimerKind,
    pub running: bool,
    /// Result of the last elapsed evaluation, kept to detect the transition
    pub elapsed: bool,
    pub timestamp: EpochMillis,
    /// Milliseconds; negative once a decrementing timer overruns
    pub value: i64,
    /// Target in milliseconds, fixed at creation
    pub duration: i64,
}

impl Timer {
    /// Bare record before any reset rule is applied
    pub fn new(name: impl Into<String>, kind: TimerKind, duration: i64, now: EpochMillis) -> Self {
        Timer {
            name: name.into(),
            kind,
            running: false,
            elapsed: false,
            timestamp: now,
            value: 0,
            duration,
        }
    }

    /// Copy with `running` set
    pub fn with_running(&self, running: bool) -> Self {
        Timer {
            running,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("incrementing".parse::<TimerKind>(), Ok(TimerKind::Incrementing));
        assert_eq!(" Decrementing ".parse::<TimerKind>(), Ok(TimerKind::Decrementing));
        assert_eq!(
            "sideways".parse::<TimerKind>(),
            Err(TempoError::UnknownTimerType("sideways".into()))
        );
    }

    #[test]
    fn test_timer_json_shape() {
        let timer = Timer::new("tea", TimerKind::Decrementing, 180_000, 1_700_000_000_000);
        let json = serde_json::to_value(&timer).unwrap();

        assert_eq!(json["name"], "tea");
        assert_eq!(json["type"], "decrementing");
        assert_eq!(json["running"], false);
        assert_eq!(json["duration"], 180_000);

        let back: Timer = serde_json::from_value(json).unwrap();
        assert_eq!(back, timer);
    }
}
