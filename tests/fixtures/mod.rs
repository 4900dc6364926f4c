//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use swiss_room::store::{InMemoryMatchStore, TournamentRegistry};
use swiss_room::types::{Pairing, PlayerId, StandingEntry, TournamentId};
use swiss_room::SwissTournament;

/// A store with one tournament holding `names`, and a facade over it
pub struct TestTournament {
    pub store: Arc<InMemoryMatchStore>,
    pub service: SwissTournament,
    pub tournament_id: TournamentId,
    pub players: Vec<PlayerId>,
}

impl TestTournament {
    pub fn new(names: &[&str]) -> Self {
        let store = Arc::new(InMemoryMatchStore::default());
        let players: Vec<PlayerId> = names
            .iter()
            .map(|name| store.register_player(name).expect("register player"))
            .collect();
        let tournament_id = store
            .create_tournament("Integration Open", &players)
            .expect("create tournament");
        let service = SwissTournament::new(store.clone());

        Self {
            store,
            service,
            tournament_id,
            players,
        }
    }

    /// A tournament with `count` players named "Player 1".."Player N"
    pub fn with_players(count: usize) -> Self {
        let names: Vec<String> = (1..=count).map(|i| format!("Player {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        Self::new(&refs)
    }

    pub fn report(&self, winner: PlayerId, loser: PlayerId) {
        self.service
            .record_match(self.tournament_id, winner, loser)
            .expect("record match");
    }

    pub fn standings(&self) -> Vec<StandingEntry> {
        self.service
            .compute_standings(self.tournament_id)
            .expect("compute standings")
    }

    pub fn pairings(&self) -> Vec<Pairing> {
        self.service
            .generate_pairings(self.tournament_id)
            .expect("generate pairings")
    }

    /// Play a full round: the first seat of every two-player pairing wins
    pub fn play_round_top_seat_wins(&self) -> Vec<Pairing> {
        let pairings = self.pairings();
        for pairing in pairings.iter().filter(|p| !p.is_bye()) {
            self.report(pairing.first.player_id, pairing.second.player_id);
        }
        pairings
    }
}

/// Assert every enrolled player sits in exactly one pairing
pub fn assert_complete(pairings: &[Pairing], enrolled: &[PlayerId]) {
    let mut seen = HashSet::new();
    for pairing in pairings {
        for player_id in pairing.player_ids() {
            assert!(seen.insert(player_id), "player {} paired twice", player_id);
        }
    }
    let expected: HashSet<PlayerId> = enrolled.iter().copied().collect();
    assert_eq!(seen, expected);
}

/// Assert two-player pairings only join neighbours in `standings`
pub fn assert_adjacent(pairings: &[Pairing], standings: &[StandingEntry]) {
    let rank = |player_id: PlayerId| {
        standings
            .iter()
            .position(|entry| entry.player_id == player_id)
            .expect("paired player is in the standings")
    };

    for pairing in pairings.iter().filter(|p| !p.is_bye()) {
        let first = rank(pairing.first.player_id);
        let second = rank(pairing.second.player_id);
        assert_eq!(first.abs_diff(second), 1, "{} is not rank-adjacent", pairing);
    }
}
