//! Playoff bracket engine: library with models, bracket logic, and store collaborators.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advancement_edge, apply_seeding, assign_participants, build, commit_seeding, feeder_of,
    invalidated_games, load_seeded, propagate, read_teams_csv, reassign_participants,
    record_result, resolve_team_pool, run_consistency_check, submit_result, validate_score,
    Advancement, AdvancementEdge, MutationOutcome, FIRST_ROUND_PAIRINGS, QUARTERFINAL_BYES,
};
pub use models::{
    Bracket, BracketError, Game, GameId, Round, SeasonId, SeedAssignment, SeedDraft, Slot, Team,
    TeamId, SEED_COUNT,
};
pub use store::{BracketStore, InMemoryStore, SeasonRecord, StoreError};
