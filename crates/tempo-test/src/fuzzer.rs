//! Timer Fuzzer - randomized command and tick interleavings
//!
//! Checks, after every step:
//! - `elapsed` agrees with the variant's threshold for the stored value
//! - paused timers are never moved by a tick
//! - running timers move by exactly the time since their timestamp
//! - elapsed notifications match false -> true transitions one for one

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempo_core::{RuleBook, Timer, TimerEvent, TimerKind};
use tempo_state::{MemoryStore, TimerStore};

use crate::TimerSimulator;

/// Fuzzer configuration
#[derive(Clone, Debug)]
pub struct FuzzerConfig {
    /// Number of distinct timer names in play
    pub name_count: usize,
    /// Number of steps (command or tick)
    pub step_count: usize,
    /// Probability that a step is a tick rather than a command
    pub tick_prob: f64,
    /// Largest forward gap per tick (ms)
    pub max_gap_ms: i64,
    /// Probability that a tick's gap is negative
    pub skew_prob: f64,
    /// Random seed
    pub seed: u64,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        FuzzerConfig {
            name_count: 6,
            step_count: 2_000,
            tick_prob: 0.5,
            max_gap_ms: 400,
            skew_prob: 0.05,
            seed: 42,
        }
    }
}

/// Outcome of a fuzz run
#[derive(Clone, Debug, Default)]
pub struct FuzzReport {
    pub commands: usize,
    /// Commands rejected with an error (missing or duplicate names)
    pub rejected: usize,
    pub ticks: usize,
    pub elapsed_notifications: usize,
    pub violations: Vec<String>,
}

impl FuzzReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Seeded fuzzer over a [`TimerSimulator`]
pub struct TimerFuzzer {
    config: FuzzerConfig,
    rng: StdRng,
    sim: TimerSimulator,
    report: FuzzReport,
}

impl TimerFuzzer {
    pub fn new(config: FuzzerConfig) -> Self {
        TimerFuzzer {
            rng: StdRng::seed_from_u64(config.seed),
            sim: TimerSimulator::with_rules(RuleBook::standard()),
            config,
            report: FuzzReport::default(),
        }
    }

    pub fn run(mut self) -> FuzzReport {
        for step in 0..self.config.step_count {
            if self.rng.gen_bool(self.config.tick_prob) {
                self.step_tick(step);
            } else {
                self.step_command();
            }
            self.check_thresholds(step);
        }
        self.report
    }

    fn step_command(&mut self) {
        let name = format!("t{}", self.rng.gen_range(0..self.config.name_count.max(1)));
        let registry = self.sim.registry();
        self.report.commands += 1;

        let ok = match self.rng.gen_range(0..7) {
            0 => {
                let kind = if self.rng.gen_bool(0.5) {
                    TimerKind::Incrementing
                } else {
                    TimerKind::Decrementing
                };
                let duration = self.rng.gen_range(0..2_000i64);
                registry.create_timer(&name, kind.as_str(), duration).is_ok()
            }
            1 => registry.delete_timer(&name).is_ok(),
            2 => registry.reset_timer(&name, self.rng.gen_bool(0.5)).is_ok(),
            3 => registry.pause_timer(&name).is_ok(),
            4 => registry.resume_timer(&name).is_ok(),
            _ => registry.toggle_timer(&name).is_ok(),
        };
        if !ok {
            self.report.rejected += 1;
        }
    }

    fn step_tick(&mut self, step: usize) {
        let mut gap = self.rng.gen_range(0..=self.config.max_gap_ms);
        if self.rng.gen_bool(self.config.skew_prob) {
            gap = -gap;
        }

        let before = sorted(self.sim.store());
        let seen = self.sim.events().len();
        self.sim.tick_by(gap);
        self.report.ticks += 1;

        let after = sorted(self.sim.store());
        let now = self.sim.now();
        let mut crossed = 0;

        for (name, old) in &before {
            let Some(new) = after.get(name) else {
                self.violation(step, format!("{} vanished during a tick", name));
                continue;
            };
            if !old.running {
                if new != old {
                    self.violation(step, format!("paused timer {} changed on tick", name));
                }
                continue;
            }

            // An unpaused reset leaves an older timestamp, so the step is
            // measured from the record rather than the previous tick
            let delta = now - old.timestamp;
            let expected = match old.kind {
                TimerKind::Incrementing => old.value + delta,
                TimerKind::Decrementing => old.value - delta,
            };
            if new.value != expected {
                self.violation(
                    step,
                    format!("{} moved to {} instead of {}", name, new.value, expected),
                );
            }
            if new.timestamp != now {
                self.violation(step, format!("{} timestamp not advanced to {}", name, now));
            }
            if new.elapsed && !old.elapsed {
                crossed += 1;
            }
        }

        let raised = self.sim.events().events()[seen..]
            .iter()
            .filter(|e| matches!(e, TimerEvent::TimerElapsed(_)))
            .count();
        self.report.elapsed_notifications += raised;
        if raised != crossed {
            self.violation(
                step,
                format!("{} elapsed notifications for {} transitions", raised, crossed),
            );
        }
    }

    fn check_thresholds(&mut self, step: usize) {
        let broken: Vec<String> = sorted(self.sim.store())
            .into_values()
            .filter(|t| t.elapsed != crossed_threshold(t))
            .map(|t| t.name)
            .collect();
        for name in broken {
            self.violation(step, format!("{} has stale elapsed flag", name));
        }
    }

    fn violation(&mut self, step: usize, message: String) {
        self.report.violations.push(format!("step {}: {}", step, message));
    }
}

fn crossed_threshold(timer: &Timer) -> bool {
    match timer.kind {
        TimerKind::Incrementing => timer.value > timer.duration,
        TimerKind::Decrementing => timer.value < 0,
    }
}

fn sorted(store: &MemoryStore) -> BTreeMap<String, Timer> {
    store.read_all().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_default_seed() {
        let report = TimerFuzzer::new(FuzzerConfig::default()).run();

        assert!(report.is_clean(), "{:#?}", report.violations);
        assert!(report.ticks > 0);
        assert!(report.commands > 0);
        assert!(report.elapsed_notifications > 0);
    }

    #[test]
    fn test_fuzz_many_seeds_with_heavy_skew() {
        for seed in 0..20 {
            let report = TimerFuzzer::new(FuzzerConfig {
                step_count: 500,
                skew_prob: 0.3,
                seed,
                ..FuzzerConfig::default()
            })
            .run();
            assert!(report.is_clean(), "seed {}: {:#?}", seed, report.violations);
        }
    }
}
