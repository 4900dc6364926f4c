//! Error types for the tournament service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application. Callers that need to branch on a specific failure
//! recover the typed variant with `downcast_ref::<TournamentError>()`.

use crate::types::{PlayerId, TournamentId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific tournament scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TournamentError {
    #[error("Match store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Tournament not found: {tournament_id}")]
    InvalidTournament { tournament_id: TournamentId },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },

    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Tournament {tournament_id} roster is full ({limit} players)")]
    RosterFull {
        tournament_id: TournamentId,
        limit: usize,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl TournamentError {
    /// Find the typed tournament error behind an `anyhow::Error`, if any
    pub fn find(error: &anyhow::Error) -> Option<&TournamentError> {
        error.downcast_ref::<TournamentError>()
    }
}
