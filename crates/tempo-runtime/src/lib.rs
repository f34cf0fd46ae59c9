//! Tempo Runtime - Hosting the timer core
//!
//! This crate wires the registry and tick engine into a running process:
//! 1. Configuration (tick interval, logging)
//! 2. Tracing subscriber setup
//! 3. Periodic tick driver with explicit start/stop
//! 4. Named command surface mapped onto registry operations
//! 5. Notification fan-out over a broadcast channel
//! 6. A service facade tying the above together

pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod service;
pub mod sink;

pub use command::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use logging::*;
pub use service::*;
pub use sink::*;
