//! Store-backed transactions: load fresh state, mutate locally, check consistency,
//! write back the per-game changes, and re-fetch the authoritative bracket.
//!
//! Each function takes the store mutably, so two mutations can never interleave on the
//! same bracket. Store failures are returned unchanged and never retried.

use crate::logic::advancement::propagate;
use crate::logic::builder::{apply_seeding, build};
use crate::logic::consistency::{assign_participants, invalidated_games, run_consistency_check};
use crate::logic::results::record_result;
use crate::models::{Bracket, BracketError, Game, GameId, SeasonId, SeedDraft, TeamId};
use crate::store::BracketStore;

/// Authoritative bracket after a mutation, plus the games the consistency check corrected.
#[derive(Clone, Debug)]
pub struct MutationOutcome {
    pub bracket: Bracket,
    pub invalidated: Vec<GameId>,
}

impl MutationOutcome {
    /// `StaleParticipantState` if dependent results were cleared, so the caller can tell the user.
    pub fn stale_state(&self) -> Option<BracketError> {
        if self.invalidated.is_empty() {
            None
        } else {
            Some(BracketError::StaleParticipantState {
                invalidated: self.invalidated.clone(),
            })
        }
    }
}

/// Load the season's bracket, failing with `NotSeeded` if there is none.
pub fn load_seeded<S: BracketStore>(store: &S, season: SeasonId) -> Result<Bracket, BracketError> {
    store.load_bracket(season)?.ok_or(BracketError::NotSeeded)
}

/// Commit a seed draft. Builds the bracket on first seeding; otherwise reseeds in place
/// and clears whatever depended on teams that moved.
pub fn commit_seeding<S: BracketStore>(
    store: &mut S,
    season: SeasonId,
    draft: &SeedDraft,
) -> Result<MutationOutcome, BracketError> {
    let seeding = draft.commit()?;
    let pool = store.list_eligible_teams(season)?;
    if let Some(&unknown) = seeding
        .teams()
        .iter()
        .find(|&&id| !pool.iter().any(|t| t.id == id))
    {
        return Err(BracketError::UnknownTeam(unknown));
    }

    let invalidated = match store.load_bracket(season)? {
        None => {
            let bracket = build(season, &seeding);
            store.create_bracket(&bracket)?;
            log::info!("Seeded new bracket for season {}", season);
            Vec::new()
        }
        Some(previous) => {
            let mut current = previous.clone();
            apply_seeding(&mut current, &seeding);
            let invalidated = invalidated_games(run_consistency_check(&previous, &mut current))?;
            store.save_seeding(season, &seeding)?;
            persist_changes(store, &previous, &current)?;
            log::info!(
                "Reseeded season {} ({} game(s) invalidated)",
                season,
                invalidated.len()
            );
            invalidated
        }
    };
    refetch(store, season, invalidated)
}

/// Record a game result and advance the winner.
///
/// If an edited score flips the winner, the consistency check first clears the loser's
/// old downstream slot (and anything decided from it), then the new winner advances.
pub fn submit_result<S: BracketStore>(
    store: &mut S,
    season: SeasonId,
    game_id: GameId,
    home_score: Option<i64>,
    away_score: Option<i64>,
    overtime: bool,
) -> Result<MutationOutcome, BracketError> {
    let previous = load_seeded(store, season)?;
    let mut current = previous.clone();
    let game = current
        .game_by_id_mut(game_id)
        .ok_or(BracketError::GameNotFound(game_id))?;
    let winner = record_result(game, home_score, away_score, overtime)?;

    let invalidated = invalidated_games(run_consistency_check(&previous, &mut current))?;
    propagate(&mut current, game_id, winner)?;
    persist_changes(store, &previous, &current)?;
    log::info!("Recorded result for game {} in season {}", game_id, season);
    refetch(store, season, invalidated)
}

/// Manually set a game's participants, clearing results that relied on the old ones.
pub fn reassign_participants<S: BracketStore>(
    store: &mut S,
    season: SeasonId,
    game_id: GameId,
    home: Option<TeamId>,
    away: Option<TeamId>,
) -> Result<MutationOutcome, BracketError> {
    let previous = load_seeded(store, season)?;
    let mut current = previous.clone();
    assign_participants(&mut current, game_id, home, away)?;

    let invalidated = invalidated_games(run_consistency_check(&previous, &mut current))?;
    persist_changes(store, &previous, &current)?;
    log::info!("Reassigned participants of game {} in season {}", game_id, season);
    refetch(store, season, invalidated)
}

/// Write every game that differs between the snapshots.
///
/// Writes that only vacate slots or void scores go first; new scores and newly filled slots
/// follow. There is no rollback, so a store failure partway leaves the earlier writes in
/// place, but the store is then missing data rather than holding a team advanced from a
/// result it never saved.
fn persist_changes<S: BracketStore>(
    store: &mut S,
    previous: &Bracket,
    current: &Bracket,
) -> Result<(), BracketError> {
    let changed: Vec<(&Game, &Game)> = current
        .games
        .iter()
        .filter_map(|game| previous.game_by_id(game.id).map(|before| (before, game)))
        .collect();

    for vacating in [true, false] {
        for &(before, game) in &changed {
            let participants_changed = before.participants() != game.participants();
            if participants_changed && only_vacates(before, game) == vacating {
                store.save_game_participants(game.id, game.home, game.away)?;
            }
            let result_changed = (before.home_score, before.away_score, before.overtime)
                != (game.home_score, game.away_score, game.overtime);
            if result_changed && game.has_result() != vacating {
                store.save_game_result(game.id, game.home_score, game.away_score, game.overtime)?;
            }
        }
    }
    Ok(())
}

/// True if every slot of `game` is either empty or unchanged from `before`.
fn only_vacates(before: &Game, game: &Game) -> bool {
    [(before.home, game.home), (before.away, game.away)]
        .iter()
        .all(|(was, now)| now.is_none() || now == was)
}

fn refetch<S: BracketStore>(
    store: &S,
    season: SeasonId,
    invalidated: Vec<GameId>,
) -> Result<MutationOutcome, BracketError> {
    Ok(MutationOutcome {
        bracket: load_seeded(store, season)?,
        invalidated,
    })
}
