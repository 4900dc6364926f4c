//! Match store boundary
//!
//! This module provides the store interface the ranking and pairing logic
//! consumes, the administrative registry used to set tournaments up, and
//! an in-memory implementation with JSON file persistence.

pub mod memory;
pub mod storage;

// Re-export commonly used types
pub use memory::{InMemoryMatchStore, DEFAULT_MAX_PLAYERS};
pub use storage::{MatchStore, MockMatchStore, TournamentRegistry};
