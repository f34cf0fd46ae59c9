//! Tempo State - Timer persistence boundary
//!
//! This crate implements the store the registry and tick engine write
//! through:
//! - Point-in-time snapshots of all timers
//! - Atomic per-timer set and delete, applied in submission order
//! - An in-process store backed by a lock-guarded map

pub mod store;

pub use store::*;
