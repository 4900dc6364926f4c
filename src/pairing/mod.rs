//! Next-round pairing
//!
//! This module turns ranked standings into Swiss pairings, including the
//! bye for an odd player count.

pub mod generator;

pub use generator::PairingGenerator;
