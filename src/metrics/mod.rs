//! Metrics for the swiss-room service
//!
//! Counters and timings for standings, pairings and match recording.

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer};
