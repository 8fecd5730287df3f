//! Team and season identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in seeding, games, and lookups).
pub type TeamId = Uuid;

/// Unique identifier for a season. Each season owns at most one bracket.
pub type SeasonId = Uuid;

/// A team as supplied by the season's roster records.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Final regular-season ranking (1 = best). None if unranked.
    pub ranking: Option<u32>,
    pub eligible: bool,
}

impl Team {
    /// Create an eligible, unranked team with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ranking: None,
            eligible: true,
        }
    }

    pub fn ranked(name: impl Into<String>, ranking: u32) -> Self {
        Self {
            ranking: Some(ranking),
            ..Self::new(name)
        }
    }
}
