//! Timer store - the single mutation channel

use std::collections::HashMap;

use parking_lot::RwLock;
use tempo_core::Timer;

/// Snapshot of every timer, keyed by name
pub type TimerMap = HashMap<String, Timer>;

/// Where timer records live
///
/// Implementations must apply each call atomically and, for the same
/// timer name, in the order the calls were made. Updates to different
/// names may land in any order.
pub trait TimerStore: Send + Sync {
    /// Point-in-time copy of all timers
    fn read_all(&self) -> TimerMap;

    /// Insert or replace the record stored under `timer.name`
    fn apply_setter(&self, timer: Timer);

    /// Remove a record; absent names are ignored
    fn apply_delete(&self, name: &str);
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    timers: RwLock<TimerMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Store pre-seeded with records, e.g. restored from elsewhere
    pub fn with_timers(timers: impl IntoIterator<Item = Timer>) -> Self {
        let map = timers.into_iter().map(|t| (t.name.clone(), t)).collect();
        MemoryStore {
            timers: RwLock::new(map),
        }
    }

    /// Get a single record
    pub fn get(&self, name: &str) -> Option<Timer> {
        self.timers.read().get(name).cloned()
    }

    /// Get number of records
    pub fn len(&self) -> usize {
        self.timers.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.timers.read().is_empty()
    }
}

impl TimerStore for MemoryStore {
    fn read_all(&self) -> TimerMap {
        self.timers.read().clone()
    }

    fn apply_setter(&self, timer: Timer) {
        tracing::trace!(timer = %timer.name, value = timer.value, running = timer.running, "set");
        self.timers.write().insert(timer.name.clone(), timer);
    }

    fn apply_delete(&self, name: &str) {
        if self.timers.write().remove(name).is_none() {
            tracing::debug!(timer = %name, "delete of absent timer ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::TimerKind;

    #[test]
    fn test_memory_store_basic() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.apply_setter(Timer::new("a", TimerKind::Incrementing, 1_000, 0));
        store.apply_setter(Timer::new("b", TimerKind::Decrementing, 2_000, 0));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("b").map(|t| t.duration), Some(2_000));

        store.apply_delete("a");
        assert!(store.get("a").is_none());
        assert_eq!(store.len(), 1);

        // Absent delete is a no-op
        store.apply_delete("a");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_last_writer_wins() {
        let store = MemoryStore::new();
        let timer = Timer::new("a", TimerKind::Incrementing, 1_000, 0);

        store.apply_setter(Timer {
            value: 10,
            ..timer.clone()
        });
        store.apply_setter(Timer { value: 20, ..timer });

        assert_eq!(store.get("a").map(|t| t.value), Some(20));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = MemoryStore::with_timers([Timer::new("a", TimerKind::Incrementing, 5, 0)]);
        let snapshot = store.read_all();

        store.apply_delete("a");

        assert!(snapshot.contains_key("a"));
        assert!(store.is_empty());
    }
}
