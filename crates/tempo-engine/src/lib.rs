//! Tempo Engine - Timer lifecycle and tick-driven advancement
//!
//! This crate implements the two halves of the timer core:
//! - Registry: create, delete, reset, pause, resume, toggle
//! - Tick engine: advance running timers and raise elapsed notifications
//!
//! Both write through the same store, under the same context gate, so the
//! visible state is always a total order of whole-timer updates.

pub mod context;
pub mod engine;
pub mod registry;

pub use context::*;
pub use engine::*;
pub use registry::*;
