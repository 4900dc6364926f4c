//! Utility functions for the tournament service

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Whether a player count leaves someone without an opponent
pub fn needs_bye(player_count: usize) -> bool {
    player_count % 2 == 1
}

/// Number of pairings a round produces for the given player count, bye included
pub fn pairing_count(player_count: usize) -> usize {
    player_count.div_ceil(2)
}
