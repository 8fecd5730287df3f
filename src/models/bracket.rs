//! Bracket and BracketError.

use crate::models::game::{Game, GameId, Round, Slot};
use crate::models::seeding::SeedAssignment;
use crate::models::team::{SeasonId, TeamId};
use crate::store::StoreError;
use serde::{Deserialize, Serialize};

/// Errors that can occur during bracket operations. None of them leaves the bracket half-mutated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// At least one seed slot is empty.
    IncompleteSeeding,
    /// The same team was placed at more than one seed.
    DuplicateSeed,
    /// Seed number outside 1..=12.
    SeedOutOfRange(usize),
    /// A seeded team is not in the season's eligible pool.
    UnknownTeam(TeamId),
    /// The season has no bracket yet.
    NotSeeded,
    GameNotFound(GameId),
    /// Home or away slot is still empty.
    MissingParticipants,
    /// Score absent, negative, or not an integer.
    InvalidScore,
    /// Equal scores; playoff games cannot end in a tie.
    TiedScore,
    /// The team does not play in this game.
    NotAParticipant { game: GameId, team: TeamId },
    /// Advancement target slot already holds a different team.
    SlotConflict {
        game: GameId,
        slot: Slot,
        occupant: TeamId,
        incoming: TeamId,
    },
    /// A team would appear twice in the same round.
    DuplicateTeamInRound { round: Round, team: TeamId },
    /// Dependent results and advancements were cleared because participants changed.
    StaleParticipantState { invalidated: Vec<GameId> },
    /// Team pool CSV could not be read.
    TeamImport(String),
    /// Persistence failure, passed through unchanged.
    Store(StoreError),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::IncompleteSeeding => write!(f, "All 12 seeds must be assigned"),
            BracketError::DuplicateSeed => write!(f, "A team is assigned to more than one seed"),
            BracketError::SeedOutOfRange(seed) => write!(f, "Seed {} is out of range (1-12)", seed),
            BracketError::UnknownTeam(_) => write!(f, "Team is not in the eligible pool"),
            BracketError::NotSeeded => write!(f, "Bracket has not been seeded"),
            BracketError::GameNotFound(_) => write!(f, "Game not found"),
            BracketError::MissingParticipants => write!(f, "Both teams must be set before recording a result"),
            BracketError::InvalidScore => write!(f, "Scores must be non-negative whole numbers"),
            BracketError::TiedScore => write!(f, "Playoff games cannot end in a tie"),
            BracketError::NotAParticipant { .. } => write!(f, "Team does not play in this game"),
            BracketError::SlotConflict { slot, .. } => {
                write!(f, "Next game's {:?} slot already holds a different team", slot)
            }
            BracketError::DuplicateTeamInRound { round, .. } => {
                write!(f, "Team already plays in the {}", round.label())
            }
            BracketError::StaleParticipantState { invalidated } => {
                write!(f, "Cleared results for {} game(s) whose teams changed", invalidated.len())
            }
            BracketError::TeamImport(msg) => write!(f, "Could not import teams: {}", msg),
            BracketError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BracketError {}

impl From<StoreError> for BracketError {
    fn from(e: StoreError) -> Self {
        BracketError::Store(e)
    }
}

/// Full playoff bracket for one season: the seeding it was built from and its 11 games.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub season_id: SeasonId,
    pub seeding: SeedAssignment,
    /// Sorted by (round, position).
    pub games: Vec<Game>,
}

impl Bracket {
    pub fn game(&self, round: Round, position: usize) -> Option<&Game> {
        self.games
            .iter()
            .find(|g| g.round == round && g.position == position)
    }

    pub fn game_mut(&mut self, round: Round, position: usize) -> Option<&mut Game> {
        self.games
            .iter_mut()
            .find(|g| g.round == round && g.position == position)
    }

    pub fn game_by_id(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn game_by_id_mut(&mut self, id: GameId) -> Option<&mut Game> {
        self.games.iter_mut().find(|g| g.id == id)
    }

    /// Games of one round, in position order.
    pub fn games_in_round(&self, round: Round) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(move |g| g.round == round)
    }

    /// (seed, team) pairs, seed 1 first.
    pub fn teams_by_seed(&self) -> Vec<(usize, TeamId)> {
        self.seeding
            .teams()
            .iter()
            .enumerate()
            .map(|(i, &team)| (i + 1, team))
            .collect()
    }

    /// Winner of the Championship game, once recorded.
    pub fn champion(&self) -> Option<TeamId> {
        self.game(Round::Championship, 0).and_then(Game::winner)
    }

    /// True once the Championship has a recorded winner.
    pub fn is_complete(&self) -> bool {
        self.champion().is_some()
    }

    /// Whether `team` plays in any game of `round` other than `except`.
    pub fn team_in_round_elsewhere(&self, round: Round, team: TeamId, except: GameId) -> bool {
        self.games_in_round(round)
            .any(|g| g.id != except && g.has_team(team))
    }
}
