//! Common types used throughout the tournament service

use crate::error::{Result, TournamentError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for registered players
pub type PlayerId = u64;

/// Unique identifier for tournaments
pub type TournamentId = u64;

/// Unique identifier for recorded matches
pub type MatchId = Uuid;

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Tournament metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A recorded match outcome. There are no draws: exactly one of the two
/// participants is the winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub player_one: PlayerId,
    pub player_two: PlayerId,
    pub winner: PlayerId,
    pub recorded_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a record for `winner` beating `loser`.
    ///
    /// Fails with [`TournamentError::InvalidMatch`] when both ids are the same.
    pub fn new(tournament_id: TournamentId, winner: PlayerId, loser: PlayerId) -> Result<Self> {
        if winner == loser {
            return Err(TournamentError::InvalidMatch {
                reason: format!("player {} cannot play against themselves", winner),
            }
            .into());
        }

        Ok(Self {
            id: crate::utils::generate_match_id(),
            tournament_id,
            player_one: winner,
            player_two: loser,
            winner,
            recorded_at: crate::utils::current_timestamp(),
        })
    }

    /// Whether the given player took part in this match
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player_one == player_id || self.player_two == player_id
    }

    /// The other participant, if `player_id` played in this match
    pub fn opponent_of(&self, player_id: PlayerId) -> Option<PlayerId> {
        if self.player_one == player_id {
            Some(self.player_two)
        } else if self.player_two == player_id {
            Some(self.player_one)
        } else {
            None
        }
    }

    pub fn loser(&self) -> PlayerId {
        if self.winner == self.player_one {
            self.player_two
        } else {
            self.player_one
        }
    }
}

/// One row of the standings table. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u64,
    pub matches: u64,
    /// Sum of the opponent's win total over every match this player played
    pub opponent_wins: u64,
}

impl StandingEntry {
    pub fn losses(&self) -> u64 {
        self.matches - self.wins
    }
}

/// One side of a pairing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub player_id: PlayerId,
    pub name: String,
}

impl From<&StandingEntry> for Seat {
    fn from(entry: &StandingEntry) -> Self {
        Self {
            player_id: entry.player_id,
            name: entry.name.clone(),
        }
    }
}

/// A next-round matchup. Both seats hold the same player for a bye.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub first: Seat,
    pub second: Seat,
}

impl Pairing {
    pub fn new(first: Seat, second: Seat) -> Self {
        Self { first, second }
    }

    pub fn bye(seat: Seat) -> Self {
        Self {
            first: seat.clone(),
            second: seat,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.first.player_id == self.second.player_id
    }

    /// Ids of the players seated in this pairing; a bye yields one id
    pub fn player_ids(&self) -> Vec<PlayerId> {
        if self.is_bye() {
            vec![self.first.player_id]
        } else {
            vec![self.first.player_id, self.second.player_id]
        }
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_bye() {
            write!(f, "{} ({}) - BYE", self.first.name, self.first.player_id)
        } else {
            write!(
                f,
                "{} ({}) vs {} ({})",
                self.first.name, self.first.player_id, self.second.name, self.second.player_id
            )
        }
    }
}

/// Everything the standings calculation reads from the store in one go
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub players: Vec<Player>,
    pub matches: Vec<MatchRecord>,
}
