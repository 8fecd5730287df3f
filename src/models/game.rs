//! Game, Round, and Slot for the playoff bracket.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// Which side of a game a team occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Home,
    Away,
}

/// Playoff round, ordered from first to last.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    FirstRound,
    Quarterfinals,
    Semifinals,
    Championship,
}

impl Round {
    /// All rounds in play order.
    pub const ALL: [Round; 4] = [
        Round::FirstRound,
        Round::Quarterfinals,
        Round::Semifinals,
        Round::Championship,
    ];

    /// Number of games played in this round.
    pub fn game_count(self) -> usize {
        match self {
            Round::FirstRound | Round::Quarterfinals => 4,
            Round::Semifinals => 2,
            Round::Championship => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Round::FirstRound => "First Round",
            Round::Quarterfinals => "Quarterfinals",
            Round::Semifinals => "Semifinals",
            Round::Championship => "Championship",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Round::FirstRound => "first_round",
            Round::Quarterfinals => "quarterfinals",
            Round::Semifinals => "semifinals",
            Round::Championship => "championship",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Round {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Round::ALL
            .into_iter()
            .find(|r| r.key() == s)
            .ok_or_else(|| format!("unknown round '{}'", s))
    }
}

/// A single playoff game. Slots fill from seeding or advancement; scores from results.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub round: Round,
    /// 0-based position within the round.
    pub position: usize,
    pub home: Option<TeamId>,
    pub away: Option<TeamId>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// Supplementary metadata only; never affects the winner.
    pub overtime: bool,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Create an empty game (no teams, no result).
    pub fn new(round: Round, position: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            position,
            home: None,
            away: None,
            home_score: None,
            away_score: None,
            overtime: false,
            recorded_at: None,
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<TeamId> {
        match slot {
            Slot::Home => self.home,
            Slot::Away => self.away,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<TeamId> {
        match slot {
            Slot::Home => &mut self.home,
            Slot::Away => &mut self.away,
        }
    }

    /// (home, away) identities, used for snapshot comparison.
    pub fn participants(&self) -> (Option<TeamId>, Option<TeamId>) {
        (self.home, self.away)
    }

    pub fn has_team(&self, team: TeamId) -> bool {
        self.home == Some(team) || self.away == Some(team)
    }

    pub fn has_result(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    /// Winner from the recorded scores. None if unplayed, incomplete, or tied.
    pub fn winner(&self) -> Option<TeamId> {
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) if h > a => self.home,
            (Some(h), Some(a)) if a > h => self.away,
            _ => None,
        }
    }

    /// Drop the recorded result, keeping participants.
    pub fn clear_result(&mut self) {
        self.home_score = None;
        self.away_score = None;
        self.overtime = false;
        self.recorded_at = None;
    }
}
