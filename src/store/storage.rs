//! Match store interface
//!
//! This module defines the narrow interface the standings and pairing logic
//! reads from and writes to, the administrative registry interface used to
//! set tournaments up, and a mock store for testing.

use crate::error::{Result, TournamentError};
use crate::types::{
    MatchRecord, Player, PlayerId, Tournament, TournamentId, TournamentSnapshot,
};
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for the store that holds rosters and recorded matches
pub trait MatchStore: Send + Sync {
    /// Players enrolled in a tournament
    ///
    /// Fails with `InvalidTournament` for an unknown tournament rather than
    /// returning an empty list.
    fn list_enrolled_players(&self, tournament_id: TournamentId) -> Result<Vec<Player>>;

    /// Every match recorded for a tournament, in recording order
    fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<MatchRecord>>;

    /// Append one match outcome
    fn append_match(
        &self,
        tournament_id: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchRecord>;

    /// Players and matches of a tournament in a single read.
    ///
    /// Implementations that can serve both lists from one consistent state
    /// should override this.
    fn snapshot(&self, tournament_id: TournamentId) -> Result<TournamentSnapshot> {
        Ok(TournamentSnapshot {
            players: self.list_enrolled_players(tournament_id)?,
            matches: self.list_matches(tournament_id)?,
        })
    }
}

/// Administrative operations on the same store. The ranking and pairing
/// logic never calls these.
pub trait TournamentRegistry: Send + Sync {
    /// Create a tournament and enrol the given, already registered, players
    fn create_tournament(&self, name: &str, players: &[PlayerId]) -> Result<TournamentId>;

    /// Register a new player (names need not be unique)
    fn register_player(&self, name: &str) -> Result<PlayerId>;

    /// Add a player to a tournament; enrolling twice is a no-op
    fn enroll_player(&self, player_id: PlayerId, tournament_id: TournamentId) -> Result<()>;

    /// Number of players enrolled in a tournament
    fn count_players(&self, tournament_id: TournamentId) -> Result<usize>;

    /// Remove all match records of a tournament, returning how many were removed
    fn delete_matches(&self, tournament_id: TournamentId) -> Result<usize>;

    /// Remove a tournament's roster and the records of its players,
    /// returning how many players were removed
    fn delete_players(&self, tournament_id: TournamentId) -> Result<usize>;

    /// Tournament metadata
    fn get_tournament(&self, tournament_id: TournamentId) -> Result<Option<Tournament>>;
}

/// Mock match store for testing
///
/// Holds preset rosters and matches, records append calls, and can be
/// switched into a failing mode to simulate an unreachable store.
#[derive(Debug, Default)]
pub struct MockMatchStore {
    rosters: RwLock<HashMap<TournamentId, Vec<Player>>>,
    matches: RwLock<HashMap<TournamentId, Vec<MatchRecord>>>,
    append_calls: RwLock<Vec<(TournamentId, PlayerId, PlayerId)>>,
    read_calls: RwLock<usize>,
    unavailable: RwLock<bool>,
}

impl MockMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a tournament roster (for testing)
    pub fn preset_roster(&self, tournament_id: TournamentId, players: Vec<Player>) {
        if let Ok(mut rosters) = self.rosters.write() {
            rosters.insert(tournament_id, players);
        }
        if let Ok(mut matches) = self.matches.write() {
            matches.entry(tournament_id).or_default();
        }
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut flag) = self.unavailable.write() {
            *flag = unavailable;
        }
    }

    /// Get all append calls made (for testing)
    pub fn get_append_calls(&self) -> Vec<(TournamentId, PlayerId, PlayerId)> {
        self.append_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of read operations served (for testing)
    pub fn read_count(&self) -> usize {
        self.read_calls.read().map(|count| *count).unwrap_or(0)
    }

    fn check_available(&self) -> Result<()> {
        let unavailable = self.unavailable.read().map(|flag| *flag).unwrap_or(true);
        if unavailable {
            return Err(TournamentError::StoreUnavailable {
                message: "mock store is offline".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn count_read(&self) {
        if let Ok(mut count) = self.read_calls.write() {
            *count += 1;
        }
    }
}

impl MatchStore for MockMatchStore {
    fn list_enrolled_players(&self, tournament_id: TournamentId) -> Result<Vec<Player>> {
        self.check_available()?;
        self.count_read();

        let rosters = self
            .rosters
            .read()
            .map_err(|_| TournamentError::StoreUnavailable {
                message: "Failed to acquire roster read lock".to_string(),
            })?;

        rosters
            .get(&tournament_id)
            .cloned()
            .ok_or_else(|| TournamentError::InvalidTournament { tournament_id }.into())
    }

    fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<MatchRecord>> {
        self.check_available()?;
        self.count_read();

        let matches = self
            .matches
            .read()
            .map_err(|_| TournamentError::StoreUnavailable {
                message: "Failed to acquire match read lock".to_string(),
            })?;

        matches
            .get(&tournament_id)
            .cloned()
            .ok_or_else(|| TournamentError::InvalidTournament { tournament_id }.into())
    }

    fn append_match(
        &self,
        tournament_id: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchRecord> {
        // Record the call for testing, even when the store is offline
        if let Ok(mut calls) = self.append_calls.write() {
            calls.push((tournament_id, winner, loser));
        }

        self.check_available()?;

        let mut matches = self
            .matches
            .write()
            .map_err(|_| TournamentError::StoreUnavailable {
                message: "Failed to acquire match write lock".to_string(),
            })?;

        let log = matches
            .get_mut(&tournament_id)
            .ok_or(TournamentError::InvalidTournament { tournament_id })?;

        let record = MatchRecord::new(tournament_id, winner, loser)?;
        log.push(record.clone());
        Ok(record)
    }
}
