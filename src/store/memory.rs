//! In-memory match store
//!
//! Keeps players, tournaments, rosters and match logs behind a single lock,
//! so a snapshot always sees players and matches from the same state. The
//! whole store can be written to and read back from a JSON file.

use crate::error::{Result, TournamentError};
use crate::store::storage::{MatchStore, TournamentRegistry};
use crate::types::{
    MatchRecord, Player, PlayerId, Tournament, TournamentId, TournamentSnapshot,
};
use crate::utils::current_timestamp;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Default per-tournament roster limit
pub const DEFAULT_MAX_PLAYERS: usize = 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TournamentRecord {
    tournament: Tournament,
    roster: BTreeSet<PlayerId>,
    matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    last_player_id: PlayerId,
    last_tournament_id: TournamentId,
    players: BTreeMap<PlayerId, Player>,
    tournaments: BTreeMap<TournamentId, TournamentRecord>,
}

impl StoreState {
    fn tournament(&self, tournament_id: TournamentId) -> Result<&TournamentRecord> {
        self.tournaments
            .get(&tournament_id)
            .ok_or_else(|| TournamentError::InvalidTournament { tournament_id }.into())
    }

    fn tournament_mut(&mut self, tournament_id: TournamentId) -> Result<&mut TournamentRecord> {
        self.tournaments
            .get_mut(&tournament_id)
            .ok_or_else(|| TournamentError::InvalidTournament { tournament_id }.into())
    }

    fn roster_players(&self, record: &TournamentRecord) -> Vec<Player> {
        record
            .roster
            .iter()
            .filter_map(|player_id| self.players.get(player_id).cloned())
            .collect()
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    PathBuf::from(temp)
}

/// In-memory match store implementation
#[derive(Debug)]
pub struct InMemoryMatchStore {
    state: RwLock<StoreState>,
    max_players_per_tournament: usize,
}

impl InMemoryMatchStore {
    /// Create an empty store with the given roster limit
    pub fn new(max_players_per_tournament: usize) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            max_players_per_tournament,
        }
    }

    /// Load a store previously written with [`InMemoryMatchStore::save`].
    /// A missing file yields an empty store.
    pub fn load(path: &Path, max_players_per_tournament: usize) -> Result<Self> {
        if !path.exists() {
            debug!("No store file at {}, starting empty", path.display());
            return Ok(Self::new(max_players_per_tournament));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            TournamentError::StoreUnavailable {
                message: format!("Failed to read {}: {}", path.display(), e),
            }
        })?;
        let state: StoreState =
            serde_json::from_str(&contents).map_err(|e| TournamentError::StoreUnavailable {
                message: format!("Failed to parse {}: {}", path.display(), e),
            })?;

        debug!(
            "Loaded {} players and {} tournaments from {}",
            state.players.len(),
            state.tournaments.len(),
            path.display()
        );

        Ok(Self {
            state: RwLock::new(state),
            max_players_per_tournament,
        })
    }

    /// Write the whole store to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let state = self.read_state()?;
        let json =
            serde_json::to_string_pretty(&*state).map_err(|e| TournamentError::StoreUnavailable {
                message: format!("Failed to serialize store: {}", e),
            })?;
        drop(state);

        // Write beside the target, then rename over it
        let temp_path = temp_path_for(path);
        std::fs::write(&temp_path, json).map_err(|e| TournamentError::StoreUnavailable {
            message: format!("Failed to write {}: {}", temp_path.display(), e),
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| TournamentError::StoreUnavailable {
            message: format!("Failed to replace {}: {}", path.display(), e),
        })?;
        Ok(())
    }

    pub fn max_players_per_tournament(&self) -> usize {
        self.max_players_per_tournament
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| {
            TournamentError::StoreUnavailable {
                message: "Failed to acquire store read lock".to_string(),
            }
            .into()
        })
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| {
            TournamentError::StoreUnavailable {
                message: "Failed to acquire store write lock".to_string(),
            }
            .into()
        })
    }

    fn enroll_locked(
        &self,
        state: &mut StoreState,
        player_id: PlayerId,
        tournament_id: TournamentId,
    ) -> Result<()> {
        if !state.players.contains_key(&player_id) {
            return Err(TournamentError::PlayerNotFound { player_id }.into());
        }

        let limit = self.max_players_per_tournament;
        let record = state.tournament_mut(tournament_id)?;
        if record.roster.contains(&player_id) {
            return Ok(());
        }
        if record.roster.len() >= limit {
            return Err(TournamentError::RosterFull {
                tournament_id,
                limit,
            }
            .into());
        }

        record.roster.insert(player_id);
        Ok(())
    }
}

impl Default for InMemoryMatchStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PLAYERS)
    }
}

impl MatchStore for InMemoryMatchStore {
    fn list_enrolled_players(&self, tournament_id: TournamentId) -> Result<Vec<Player>> {
        let state = self.read_state()?;
        let record = state.tournament(tournament_id)?;
        Ok(state.roster_players(record))
    }

    fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<MatchRecord>> {
        let state = self.read_state()?;
        Ok(state.tournament(tournament_id)?.matches.clone())
    }

    fn append_match(
        &self,
        tournament_id: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchRecord> {
        let mut state = self.write_state()?;
        let record = state.tournament_mut(tournament_id)?;

        let entry = MatchRecord::new(tournament_id, winner, loser)?;
        record.matches.push(entry.clone());
        Ok(entry)
    }

    fn snapshot(&self, tournament_id: TournamentId) -> Result<TournamentSnapshot> {
        let state = self.read_state()?;
        let record = state.tournament(tournament_id)?;

        Ok(TournamentSnapshot {
            players: state.roster_players(record),
            matches: record.matches.clone(),
        })
    }
}

impl TournamentRegistry for InMemoryMatchStore {
    fn create_tournament(&self, name: &str, players: &[PlayerId]) -> Result<TournamentId> {
        let mut state = self.write_state()?;

        if let Some(player_id) = players.iter().find(|id| !state.players.contains_key(*id)) {
            return Err(TournamentError::PlayerNotFound {
                player_id: *player_id,
            }
            .into());
        }

        let roster: BTreeSet<PlayerId> = players.iter().copied().collect();
        let tournament_id = state.last_tournament_id + 1;
        if roster.len() > self.max_players_per_tournament {
            return Err(TournamentError::RosterFull {
                tournament_id,
                limit: self.max_players_per_tournament,
            }
            .into());
        }

        state.last_tournament_id = tournament_id;
        state.tournaments.insert(
            tournament_id,
            TournamentRecord {
                tournament: Tournament {
                    id: tournament_id,
                    name: name.to_string(),
                    created_at: current_timestamp(),
                },
                roster,
                matches: Vec::new(),
            },
        );

        info!(
            "Created tournament {} '{}' with {} players",
            tournament_id,
            name,
            players.len()
        );
        Ok(tournament_id)
    }

    fn register_player(&self, name: &str) -> Result<PlayerId> {
        let mut state = self.write_state()?;
        let player_id = state.last_player_id + 1;
        state.last_player_id = player_id;
        state.players.insert(player_id, Player::new(player_id, name));

        debug!("Registered player {} '{}'", player_id, name);
        Ok(player_id)
    }

    fn enroll_player(&self, player_id: PlayerId, tournament_id: TournamentId) -> Result<()> {
        let mut state = self.write_state()?;
        self.enroll_locked(&mut state, player_id, tournament_id)
    }

    fn count_players(&self, tournament_id: TournamentId) -> Result<usize> {
        let state = self.read_state()?;
        Ok(state.tournament(tournament_id)?.roster.len())
    }

    fn delete_matches(&self, tournament_id: TournamentId) -> Result<usize> {
        let mut state = self.write_state()?;
        let record = state.tournament_mut(tournament_id)?;
        let removed = record.matches.len();
        record.matches.clear();

        info!("Deleted {} matches from tournament {}", removed, tournament_id);
        Ok(removed)
    }

    fn delete_players(&self, tournament_id: TournamentId) -> Result<usize> {
        let mut state = self.write_state()?;
        let roster = std::mem::take(&mut state.tournament_mut(tournament_id)?.roster);

        for player_id in &roster {
            state.players.remove(player_id);
        }
        for record in state.tournaments.values_mut() {
            record.roster.retain(|player_id| !roster.contains(player_id));
        }

        info!(
            "Deleted {} players from tournament {}",
            roster.len(),
            tournament_id
        );
        Ok(roster.len())
    }

    fn get_tournament(&self, tournament_id: TournamentId) -> Result<Option<Tournament>> {
        let state = self.read_state()?;
        Ok(state
            .tournaments
            .get(&tournament_id)
            .map(|record| record.tournament.clone()))
    }
}
