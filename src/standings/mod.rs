//! Standings calculation
//!
//! This module ranks the players of a tournament from its recorded matches.

pub mod calculator;

pub use calculator::StandingsCalculator;
