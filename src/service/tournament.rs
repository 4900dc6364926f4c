//! Tournament service facade
//!
//! `SwissTournament` owns a handle to the match store and wires the
//! standings calculator and pairing generator together. It holds no state
//! of its own between calls: every request reads the store once and
//! recomputes from scratch.

use crate::config::standings::StandingsConfig;
use crate::error::{Result, TournamentError};
use crate::metrics::MetricsCollector;
use crate::pairing::PairingGenerator;
use crate::standings::StandingsCalculator;
use crate::store::MatchStore;
use crate::types::{MatchRecord, Pairing, PlayerId, StandingEntry, TournamentId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Standings, pairings and match recording for Swiss-system tournaments
#[derive(Clone)]
pub struct SwissTournament {
    store: Arc<dyn MatchStore>,
    calculator: StandingsCalculator,
    generator: PairingGenerator,
    metrics: Option<Arc<MetricsCollector>>,
}

impl SwissTournament {
    /// Create a facade over `store` with default standings settings
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self::with_config(store, StandingsConfig::default())
    }

    pub fn with_config(store: Arc<dyn MatchStore>, config: StandingsConfig) -> Self {
        Self {
            store,
            calculator: StandingsCalculator::new(config),
            generator: PairingGenerator::new(),
            metrics: None,
        }
    }

    /// Record counters and timings into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Ranked standings for a tournament, first place first.
    ///
    /// Store failures are returned unchanged.
    pub fn compute_standings(&self, tournament_id: TournamentId) -> Result<Vec<StandingEntry>> {
        let timer = self.metrics.as_ref().map(|metrics| metrics.start_timer());

        let snapshot = self
            .store
            .snapshot(tournament_id)
            .inspect_err(|e| self.store_failed("snapshot", tournament_id, e))?;

        let standings = self.calculator.rank(&snapshot.players, &snapshot.matches);

        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_standings(timer.stop());
        }

        debug!(
            "Computed standings for tournament {}: {} players, {} matches",
            tournament_id,
            standings.len(),
            snapshot.matches.len()
        );
        Ok(standings)
    }

    /// Pairings for the next round of a tournament
    pub fn generate_pairings(&self, tournament_id: TournamentId) -> Result<Vec<Pairing>> {
        let standings = self.compute_standings(tournament_id)?;
        let pairings = self.generator.pair(&standings);

        let byes = pairings.iter().filter(|pairing| pairing.is_bye()).count();
        if let Some(metrics) = &self.metrics {
            metrics.record_round(pairings.len() - byes, byes);
        }

        info!(
            "Generated {} pairings for tournament {} ({} bye)",
            pairings.len(),
            tournament_id,
            byes
        );
        Ok(pairings)
    }

    /// Record that `winner` beat `loser`.
    ///
    /// No check is made that the two were paired this round.
    pub fn record_match(
        &self,
        tournament_id: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchRecord> {
        let record = self
            .store
            .append_match(tournament_id, winner, loser)
            .inspect_err(|e| self.store_failed("append_match", tournament_id, e))?;

        if let Some(metrics) = &self.metrics {
            metrics.record_match();
        }

        info!(
            "Recorded match {} in tournament {}: {} beat {}",
            record.id,
            tournament_id,
            record.winner,
            record.loser()
        );
        Ok(record)
    }

    fn store_failed(&self, operation: &str, tournament_id: TournamentId, error: &anyhow::Error) {
        if !matches!(
            TournamentError::find(error),
            Some(TournamentError::StoreUnavailable { .. })
        ) {
            debug!(
                "Match store {} rejected request for tournament {}: {}",
                operation, tournament_id, error
            );
            return;
        }

        warn!(
            "Match store {} failed for tournament {}: {}",
            operation, tournament_id, error
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_store_error(operation);
        }
    }
}

impl std::fmt::Debug for SwissTournament {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwissTournament")
            .field("calculator", &self.calculator)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
