//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the swiss-room service using
//! Prometheus metrics on a private registry.

use anyhow::{Context, Result};
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the tournament service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Standings tables computed
    pub standings_computed_total: IntCounter,

    /// Pairings emitted, labelled `pair` or `bye`
    pub pairings_emitted_total: IntCounterVec,

    /// Match outcomes appended to the store
    pub matches_recorded_total: IntCounter,

    /// Store failures by operation
    pub store_errors_total: IntCounterVec,

    /// Time spent reading the store and ranking players
    pub standings_duration: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let standings_computed_total = IntCounter::new(
            "swiss_room_standings_computed_total",
            "Total standings tables computed",
        )?;
        registry.register(Box::new(standings_computed_total.clone()))?;

        let pairings_emitted_total = IntCounterVec::new(
            Opts::new(
                "swiss_room_pairings_emitted_total",
                "Total pairings emitted by kind",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(pairings_emitted_total.clone()))?;

        let matches_recorded_total = IntCounter::new(
            "swiss_room_matches_recorded_total",
            "Total match outcomes recorded",
        )?;
        registry.register(Box::new(matches_recorded_total.clone()))?;

        let store_errors_total = IntCounterVec::new(
            Opts::new("swiss_room_store_errors_total", "Total match store errors"),
            &["operation"],
        )?;
        registry.register(Box::new(store_errors_total.clone()))?;

        let standings_duration = Histogram::with_opts(
            HistogramOpts::new(
                "swiss_room_standings_duration_seconds",
                "Standings computation duration",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        )?;
        registry.register(Box::new(standings_duration.clone()))?;

        Ok(Self {
            registry,
            standings_computed_total,
            pairings_emitted_total,
            matches_recorded_total,
            store_errors_total,
            standings_duration,
        })
    }

    /// Record a standings computation
    pub fn record_standings(&self, duration: Duration) {
        self.standings_computed_total.inc();
        self.standings_duration.observe(duration.as_secs_f64());
    }

    /// Record one generated round
    pub fn record_round(&self, pairs: usize, byes: usize) {
        self.pairings_emitted_total
            .with_label_values(&["pair"])
            .inc_by(pairs as u64);
        self.pairings_emitted_total
            .with_label_values(&["bye"])
            .inc_by(byes as u64);
    }

    pub fn record_match(&self) {
        self.matches_recorded_total.inc();
    }

    /// Record a failed store call
    pub fn record_store_error(&self, operation: &str) {
        self.store_errors_total
            .with_label_values(&[operation])
            .inc();
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output is not UTF-8")
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl std::fmt::Debug for MetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsCollector")
            .field("standings_computed", &self.standings_computed_total.get())
            .field("matches_recorded", &self.matches_recorded_total.get())
            .finish()
    }
}
