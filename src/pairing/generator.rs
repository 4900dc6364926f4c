//! Swiss pairing generator
//!
//! Pairs rank-adjacent players for the next round. The ranking is walked
//! from the bottom up in steps of two, so with an odd player count the one
//! player left over is the top seed, who gets a bye.

use crate::types::{Pairing, Seat, StandingEntry};
use crate::utils::{needs_bye, pairing_count};
use tracing::debug;

/// Builds next-round pairings from ranked standings
#[derive(Debug, Clone, Copy, Default)]
pub struct PairingGenerator;

impl PairingGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Pair the players in `standings`, which must already be ranked
    /// (index 0 is first place).
    ///
    /// Pairings come out bottom table first. In a two-player pairing the
    /// higher-ranked player holds the first seat; a bye repeats the same
    /// player in both seats.
    pub fn pair(&self, standings: &[StandingEntry]) -> Vec<Pairing> {
        let mut pairings = Vec::with_capacity(pairing_count(standings.len()));

        for chunk in standings.rchunks(2) {
            let higher = Seat::from(&chunk[0]);
            let pairing = match chunk.get(1) {
                Some(lower) => Pairing::new(higher, Seat::from(lower)),
                None => Pairing::bye(higher),
            };
            pairings.push(pairing);
        }

        debug!(
            "Generated {} pairings for {} players (bye: {})",
            pairings.len(),
            standings.len(),
            needs_bye(standings.len())
        );
        pairings
    }
}
