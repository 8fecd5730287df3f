//! Data structures for the playoff bracket: teams, seeding, games, bracket.

mod bracket;
mod game;
mod seeding;
mod team;

pub use bracket::{Bracket, BracketError};
pub use game::{Game, GameId, Round, Slot};
pub use seeding::{SeedAssignment, SeedDraft, SEED_COUNT};
pub use team::{SeasonId, Team, TeamId};
