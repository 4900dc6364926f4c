//! Swiss Room - Swiss-system tournament standings and pairings
//!
//! This crate ranks the players of a Swiss-system tournament from recorded
//! match outcomes and pairs rank-adjacent players for the next round,
//! giving the top seed a bye when the player count is odd. Storage sits
//! behind the [`MatchStore`] trait; an in-memory store is included.

pub mod config;
pub mod error;
pub mod metrics;
pub mod pairing;
pub mod service;
pub mod standings;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, TournamentError};
pub use types::*;

// Re-export key components
pub use pairing::PairingGenerator;
pub use service::SwissTournament;
pub use standings::StandingsCalculator;
pub use store::{InMemoryMatchStore, MatchStore, TournamentRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
