//! Bracket business logic: team pool, building, results, advancement, consistency.

mod advancement;
mod builder;
mod consistency;
mod results;
mod session;
mod team_pool;

pub use advancement::{advancement_edge, feeder_of, propagate, Advancement, AdvancementEdge};
pub use builder::{apply_seeding, build, FIRST_ROUND_PAIRINGS, QUARTERFINAL_BYES};
pub use consistency::{assign_participants, invalidated_games, run_consistency_check};
pub use results::{record_result, validate_score};
pub use session::{
    commit_seeding, load_seeded, reassign_participants, submit_result, MutationOutcome,
};
pub use team_pool::{read_teams_csv, resolve_team_pool};
