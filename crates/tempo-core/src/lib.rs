//! Tempo Core - Fundamental types for named, tick-driven timers
//!
//! This crate defines the pieces every other Tempo crate builds on:
//! - The timer record and its variant tags
//! - The rule book mapping each variant to its update/reset arithmetic
//! - Wall clocks (system and manual)
//! - Duration input resolution
//! - Notification events and sinks
//! - The error taxonomy

pub mod duration;
pub mod error;
pub mod event;
pub mod rules;
pub mod time;
pub mod timer;

pub use duration::*;
pub use error::*;
pub use event::*;
pub use rules::*;
pub use time::*;
pub use timer::*;
