//! Service layer for the swiss-room tournament service
//!
//! This module provides the facade that ties the match store, standings
//! calculator and pairing generator together.

pub mod tournament;

pub use tournament::SwissTournament;
