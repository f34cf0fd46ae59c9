//! Tempo Test Harness - Simulation and fuzzing for the timer core
//!
//! This crate provides:
//! - A simulator driving registry and tick engine on a manual clock
//! - A seeded fuzzer interleaving operator commands, ticks and clock skew
//! - End-to-end timer scenarios

pub mod fuzzer;
pub mod scenarios;
pub mod simulator;

pub use fuzzer::*;
pub use simulator::*;
