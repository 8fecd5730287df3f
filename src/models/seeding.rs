//! Seed drafts (editable) and committed seed assignments (validated, immutable).

use crate::models::bracket::BracketError;
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of teams in the playoff field.
pub const SEED_COUNT: usize = 12;

/// Seed slots while editing. Index 0 = seed 1. Empty slots are allowed until commit.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedDraft {
    pub seeds: [Option<TeamId>; SEED_COUNT],
}

impl SeedDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate seeds in pool order (best first). Extra teams are ignored, missing seeds stay empty.
    pub fn from_ranked(pool: &[Team]) -> Self {
        let mut draft = Self::new();
        for (slot, team) in draft.seeds.iter_mut().zip(pool) {
            *slot = Some(team.id);
        }
        draft
    }

    /// Put `team` at `seed` (1-based). `None` clears the slot.
    pub fn set(&mut self, seed: usize, team: Option<TeamId>) -> Result<(), BracketError> {
        if !(1..=SEED_COUNT).contains(&seed) {
            return Err(BracketError::SeedOutOfRange(seed));
        }
        self.seeds[seed - 1] = team;
        Ok(())
    }

    /// Validate the draft. Every slot must be filled with a distinct team.
    pub fn commit(&self) -> Result<SeedAssignment, BracketError> {
        let mut seeds = [TeamId::nil(); SEED_COUNT];
        for (i, slot) in self.seeds.iter().enumerate() {
            seeds[i] = slot.ok_or(BracketError::IncompleteSeeding)?;
        }
        let distinct: HashSet<_> = seeds.iter().collect();
        if distinct.len() < SEED_COUNT {
            return Err(BracketError::DuplicateSeed);
        }
        Ok(SeedAssignment { seeds })
    }
}

/// A complete, duplicate-free mapping of 12 teams to seeds 1-12.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeedDraft")]
pub struct SeedAssignment {
    seeds: [TeamId; SEED_COUNT],
}

impl SeedAssignment {
    /// Team holding `seed` (1-based). None outside 1..=12.
    pub fn team(&self, seed: usize) -> Option<TeamId> {
        seed.checked_sub(1).and_then(|i| self.seeds.get(i)).copied()
    }

    /// Seed (1-based) of `team`, if seeded.
    pub fn seed_of(&self, team: TeamId) -> Option<usize> {
        self.seeds.iter().position(|&t| t == team).map(|i| i + 1)
    }

    /// Teams in seed order.
    pub fn teams(&self) -> &[TeamId; SEED_COUNT] {
        &self.seeds
    }
}

impl TryFrom<SeedDraft> for SeedAssignment {
    type Error = BracketError;

    fn try_from(draft: SeedDraft) -> Result<Self, Self::Error> {
        draft.commit()
    }
}
