//! Persistence collaborators: the `BracketStore` trait and an in-memory implementation.
//!
//! The store is the authoritative copy of every season's bracket. The engine only ever
//! mutates a freshly loaded copy and writes the per-game differences back.

use crate::logic::resolve_team_pool;
use crate::models::{Bracket, Game, GameId, SeasonId, SeedAssignment, Team, TeamId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Failures reported by a store. Surfaced to callers unchanged; never retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    SeasonNotFound(SeasonId),
    /// Season exists but has no bracket records.
    BracketNotFound(SeasonId),
    GameNotFound(GameId),
    /// `create_bracket` called for a season that already has one.
    BracketExists(SeasonId),
    /// Remote side failed or could not be reached.
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::SeasonNotFound(id) => write!(f, "Season {} not found", id),
            StoreError::BracketNotFound(id) => write!(f, "Season {} has no bracket", id),
            StoreError::GameNotFound(id) => write!(f, "Game {} not found", id),
            StoreError::BracketExists(id) => write!(f, "Season {} already has a bracket", id),
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Request/response access to season, team, and bracket records.
pub trait BracketStore {
    /// Eligible teams for the season, best ranking first.
    fn list_eligible_teams(&self, season: SeasonId) -> Result<Vec<Team>, StoreError>;

    /// The season's bracket, or None if it was never seeded.
    fn load_bracket(&self, season: SeasonId) -> Result<Option<Bracket>, StoreError>;

    /// First write of a freshly built bracket (all 11 game records).
    fn create_bracket(&mut self, bracket: &Bracket) -> Result<(), StoreError>;

    fn save_seeding(&mut self, season: SeasonId, seeding: &SeedAssignment) -> Result<(), StoreError>;

    /// Store (or clear, with `None` scores) a game's result.
    fn save_game_result(
        &mut self,
        game: GameId,
        home_score: Option<u32>,
        away_score: Option<u32>,
        overtime: bool,
    ) -> Result<(), StoreError>;

    fn save_game_participants(
        &mut self,
        game: GameId,
        home: Option<TeamId>,
        away: Option<TeamId>,
    ) -> Result<(), StoreError>;
}

/// One season's records.
#[derive(Clone, Debug, Serialize)]
pub struct SeasonRecord {
    pub id: SeasonId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub teams: Vec<Team>,
    pub bracket: Option<Bracket>,
}

/// Store backed by a map of seasons. Used by the web binary and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    seasons: HashMap<SeasonId, SeasonRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty season and return its id.
    pub fn create_season(&mut self, name: impl Into<String>) -> SeasonId {
        let id = Uuid::new_v4();
        self.seasons.insert(
            id,
            SeasonRecord {
                id,
                name: name.into(),
                created_at: Utc::now(),
                teams: Vec::new(),
                bracket: None,
            },
        );
        id
    }

    pub fn season(&self, id: SeasonId) -> Option<&SeasonRecord> {
        self.seasons.get(&id)
    }

    pub fn add_team(&mut self, season: SeasonId, team: Team) -> Result<(), StoreError> {
        self.season_mut(season)?.teams.push(team);
        Ok(())
    }

    fn season_mut(&mut self, id: SeasonId) -> Result<&mut SeasonRecord, StoreError> {
        self.seasons.get_mut(&id).ok_or(StoreError::SeasonNotFound(id))
    }

    fn game_mut(&mut self, id: GameId) -> Result<&mut Game, StoreError> {
        self.seasons
            .values_mut()
            .filter_map(|s| s.bracket.as_mut())
            .find_map(|b| b.game_by_id_mut(id))
            .ok_or(StoreError::GameNotFound(id))
    }
}

impl BracketStore for InMemoryStore {
    fn list_eligible_teams(&self, season: SeasonId) -> Result<Vec<Team>, StoreError> {
        let record = self
            .seasons
            .get(&season)
            .ok_or(StoreError::SeasonNotFound(season))?;
        Ok(resolve_team_pool(record.teams.clone()))
    }

    fn load_bracket(&self, season: SeasonId) -> Result<Option<Bracket>, StoreError> {
        self.seasons
            .get(&season)
            .map(|s| s.bracket.clone())
            .ok_or(StoreError::SeasonNotFound(season))
    }

    fn create_bracket(&mut self, bracket: &Bracket) -> Result<(), StoreError> {
        let record = self.season_mut(bracket.season_id)?;
        if record.bracket.is_some() {
            return Err(StoreError::BracketExists(bracket.season_id));
        }
        record.bracket = Some(bracket.clone());
        Ok(())
    }

    fn save_seeding(&mut self, season: SeasonId, seeding: &SeedAssignment) -> Result<(), StoreError> {
        let record = self.season_mut(season)?;
        let bracket = record
            .bracket
            .as_mut()
            .ok_or(StoreError::BracketNotFound(season))?;
        bracket.seeding = seeding.clone();
        Ok(())
    }

    fn save_game_result(
        &mut self,
        game: GameId,
        home_score: Option<u32>,
        away_score: Option<u32>,
        overtime: bool,
    ) -> Result<(), StoreError> {
        let g = self.game_mut(game)?;
        g.home_score = home_score;
        g.away_score = away_score;
        g.overtime = overtime;
        g.recorded_at = match (home_score, away_score) {
            (Some(_), Some(_)) => Some(Utc::now()),
            _ => None,
        };
        Ok(())
    }

    fn save_game_participants(
        &mut self,
        game: GameId,
        home: Option<TeamId>,
        away: Option<TeamId>,
    ) -> Result<(), StoreError> {
        let g = self.game_mut(game)?;
        g.home = home;
        g.away = away;
        Ok(())
    }
}
