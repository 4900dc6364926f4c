//! Standings configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordering applied to players still tied after wins and opponent wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalTieBreak {
    /// Lowest player id first
    #[default]
    PlayerId,
    /// Alphabetical by name, then lowest player id
    Name,
}

impl std::fmt::Display for FinalTieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinalTieBreak::PlayerId => write!(f, "player_id"),
            FinalTieBreak::Name => write!(f, "name"),
        }
    }
}

impl FromStr for FinalTieBreak {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "player_id" | "player-id" | "id" => Ok(FinalTieBreak::PlayerId),
            "name" => Ok(FinalTieBreak::Name),
            other => Err(format!("Unknown tie-break '{}'", other)),
        }
    }
}

/// Standings calculation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsConfig {
    #[serde(default)]
    pub final_tie_break: FinalTieBreak,
}
