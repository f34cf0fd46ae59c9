//! End-to-end timer scenarios
//!
//! Operator commands and ticks interleaved the way a host would issue them,
//! checked against the notifications and records they should produce.
