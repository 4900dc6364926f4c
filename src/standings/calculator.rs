//! Standings calculator
//!
//! Turns a roster and a match log into a ranked table. Ranking is by wins,
//! then by opponent wins (for every match played, the opponent's total win
//! count is added, so an opponent faced twice counts twice), then by the
//! configured final tie-break.

use crate::config::standings::{FinalTieBreak, StandingsConfig};
use crate::types::{MatchRecord, Player, PlayerId, StandingEntry};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    wins: u64,
    matches: u64,
    opponent_wins: u64,
}

/// Computes ranked standings from recorded matches
#[derive(Debug, Clone, Default)]
pub struct StandingsCalculator {
    config: StandingsConfig,
}

impl StandingsCalculator {
    pub fn new(config: StandingsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StandingsConfig {
        &self.config
    }

    /// Rank every player in `players` using the outcomes in `matches`.
    ///
    /// The result has exactly one entry per player, including players
    /// without matches. Matches may involve players outside the roster;
    /// their wins still count towards their opponents' tie-break.
    pub fn rank(&self, players: &[Player], matches: &[MatchRecord]) -> Vec<StandingEntry> {
        let tallies = tally_matches(matches);

        let mut entries: Vec<StandingEntry> = players
            .iter()
            .map(|player| {
                let tally = tallies.get(&player.id).copied().unwrap_or_default();
                StandingEntry {
                    player_id: player.id,
                    name: player.name.clone(),
                    wins: tally.wins,
                    matches: tally.matches,
                    opponent_wins: tally.opponent_wins,
                }
            })
            .collect();

        entries.sort_by(|a, b| self.compare(a, b));

        debug!(
            "Ranked {} players from {} matches",
            entries.len(),
            matches.len()
        );
        entries
    }

    /// Ordering of two standing entries; `Less` means `a` ranks higher
    pub fn compare(&self, a: &StandingEntry, b: &StandingEntry) -> Ordering {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.opponent_wins.cmp(&a.opponent_wins))
            .then_with(|| match self.config.final_tie_break {
                FinalTieBreak::PlayerId => a.player_id.cmp(&b.player_id),
                FinalTieBreak::Name => a
                    .name
                    .cmp(&b.name)
                    .then_with(|| a.player_id.cmp(&b.player_id)),
            })
    }
}

fn tally_matches(matches: &[MatchRecord]) -> HashMap<PlayerId, Tally> {
    let mut tallies: HashMap<PlayerId, Tally> = HashMap::new();

    let valid: Vec<&MatchRecord> = matches
        .iter()
        .filter(|record| {
            let ok = record.player_one != record.player_two && record.involves(record.winner);
            if !ok {
                warn!("Ignoring malformed match record {}", record.id);
            }
            ok
        })
        .collect();

    for record in &valid {
        tallies.entry(record.winner).or_default().wins += 1;
        tallies.entry(record.player_one).or_default().matches += 1;
        tallies.entry(record.player_two).or_default().matches += 1;
    }

    // Second pass: opponent totals need every win counted first
    for record in &valid {
        let one_wins = tallies.get(&record.player_one).map_or(0, |t| t.wins);
        let two_wins = tallies.get(&record.player_two).map_or(0, |t| t.wins);

        let one = tallies.entry(record.player_one).or_default();
        one.opponent_wins = one.opponent_wins.saturating_add(two_wins);
        let two = tallies.entry(record.player_two).or_default();
        two.opponent_wins = two.opponent_wins.saturating_add(one_wins);
    }

    tallies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(count: u64) -> Vec<Player> {
        (1..=count)
            .map(|id| Player::new(id, format!("Player {}", id)))
            .collect()
    }

    fn beat(winner: PlayerId, loser: PlayerId) -> MatchRecord {
        MatchRecord::new(1, winner, loser).unwrap()
    }

    fn ids(entries: &[StandingEntry]) -> Vec<PlayerId> {
        entries.iter().map(|entry| entry.player_id).collect()
    }

    #[test]
    fn test_no_players() {
        let calculator = StandingsCalculator::default();
        assert!(calculator.rank(&[], &[beat(1, 2)]).is_empty());
    }

    #[test]
    fn test_no_matches_orders_by_id() {
        let calculator = StandingsCalculator::default();
        let standings = calculator.rank(&players(4), &[]);

        assert_eq!(ids(&standings), vec![1, 2, 3, 4]);
        assert!(standings
            .iter()
            .all(|entry| entry.wins == 0 && entry.matches == 0 && entry.opponent_wins == 0));
    }

    #[test]
    fn test_winner_ranks_first() {
        let calculator = StandingsCalculator::default();
        let standings = calculator.rank(&players(2), &[beat(2, 1)]);

        assert_eq!(ids(&standings), vec![2, 1]);
        assert_eq!(standings[0].wins, 1);
        assert_eq!(standings[0].matches, 1);
        assert_eq!(standings[1].wins, 0);
        assert_eq!(standings[1].matches, 1);
        assert_eq!(standings[1].losses(), 1);
    }

    #[test]
    fn test_opponent_wins_break_ties() {
        // 1 beats 2, 2 beats 3 => 2 has a win too.
        // 4 beats 5 => 5 never wins.
        // 1 and 4 both have one win; 1's opponent (2) has one win, 4's has none.
        let calculator = StandingsCalculator::default();
        let standings = calculator.rank(&players(5), &[beat(1, 2), beat(2, 3), beat(4, 5)]);

        let by_id: HashMap<PlayerId, &StandingEntry> =
            standings.iter().map(|e| (e.player_id, e)).collect();
        assert_eq!(by_id[&1].opponent_wins, 1);
        assert_eq!(by_id[&2].opponent_wins, 1);
        assert_eq!(by_id[&3].opponent_wins, 1);
        assert_eq!(by_id[&4].opponent_wins, 0);
        assert_eq!(by_id[&5].opponent_wins, 1);

        assert_eq!(ids(&standings), vec![1, 2, 4, 3, 5]);
    }

    #[test]
    fn test_repeat_opponent_counts_per_match() {
        // 1 beats 2 twice, 2 beats 3 once: 2 has 1 win.
        let calculator = StandingsCalculator::default();
        let standings = calculator.rank(&players(3), &[beat(1, 2), beat(1, 2), beat(2, 3)]);

        let first = &standings[0];
        assert_eq!(first.player_id, 1);
        assert_eq!(first.wins, 2);
        assert_eq!(first.opponent_wins, 2);
    }

    #[test]
    fn test_unenrolled_opponent_contributes_wins() {
        // 99 is not on the roster but beat 3 and lost to 1.
        let calculator = StandingsCalculator::default();
        let standings = calculator.rank(&players(3), &[beat(99, 3), beat(1, 99), beat(2, 3)]);

        assert_eq!(standings.len(), 3);
        assert_eq!(ids(&standings), vec![1, 2, 3]);
        assert_eq!(standings[0].opponent_wins, 1);
        assert_eq!(standings[1].opponent_wins, 0);
    }

    #[test]
    fn test_name_tie_break() {
        let calculator = StandingsCalculator::new(StandingsConfig {
            final_tie_break: FinalTieBreak::Name,
        });
        let roster = vec![
            Player::new(1, "Zoe"),
            Player::new(2, "Adam"),
            Player::new(3, "Adam"),
        ];

        let standings = calculator.rank(&roster, &[]);
        assert_eq!(ids(&standings), vec![2, 3, 1]);
    }

    #[test]
    fn test_malformed_record_is_ignored() {
        let mut record = beat(1, 2);
        record.winner = 3;

        let calculator = StandingsCalculator::default();
        let standings = calculator.rank(&players(3), &[record]);
        assert!(standings.iter().all(|entry| entry.matches == 0));
    }

    #[test]
    fn test_long_rivalry_does_not_overflow() {
        // 66,000 wins against one opponent: opponent wins would pass u32::MAX
        let matches: Vec<MatchRecord> = (0..66_000).map(|_| beat(1, 2)).collect();

        let calculator = StandingsCalculator::default();
        let standings = calculator.rank(&players(2), &matches);

        assert_eq!(ids(&standings), vec![1, 2]);
        assert_eq!(standings[0].wins, 66_000);
        assert_eq!(standings[1].opponent_wins, 66_000 * 66_000);
        assert_eq!(standings[0].opponent_wins, 0);
    }

    #[test]
    fn test_rank_is_deterministic() {
        let calculator = StandingsCalculator::default();
        let matches = vec![beat(3, 1), beat(4, 2), beat(3, 4), beat(1, 2)];

        let first = calculator.rank(&players(4), &matches);
        let second = calculator.rank(&players(4), &matches);
        assert_eq!(first, second);
    }
}
