//! Consistency check between two bracket snapshots, and manual participant changes.

use crate::logic::advancement::advancement_edge;
use crate::models::{Bracket, BracketError, GameId, Round, TeamId};

/// Clear results and advanced slots in `current` that depended on teams which changed
/// since `previous`.
///
/// Rounds are walked in order. A game whose participants differ from the snapshot loses
/// its score. If its winner changed as well, the team it had advanced downstream is
/// removed, which in turn shows up as a participant change one round later. A downstream
/// slot holding any other team did not come from this game and is left for `propagate`
/// to report as a conflict.
///
/// Returns `StaleParticipantState` listing every game the check had to correct. The
/// corrections are already applied to `current` when that error is returned.
pub fn run_consistency_check(
    previous: &Bracket,
    current: &mut Bracket,
) -> Result<(), BracketError> {
    let mut invalidated: Vec<GameId> = Vec::new();

    for round in Round::ALL {
        for position in 0..round.game_count() {
            let Some(before) = previous.game(round, position) else {
                continue;
            };
            let Some(game) = current.game_mut(round, position) else {
                continue;
            };
            let participants_changed = before.participants() != game.participants();
            if participants_changed && game.has_result() {
                log::warn!(
                    "Clearing {} game {} result: participants changed",
                    round.label(),
                    position
                );
                game.clear_result();
                if !invalidated.contains(&game.id) {
                    invalidated.push(game.id);
                }
            }
            let winner = game.winner();
            let Some(advanced) = before.winner() else {
                continue;
            };
            if winner == Some(advanced) {
                continue;
            }

            let Some(to) = advancement_edge(round, position) else {
                continue;
            };
            let Some(next) = current.game_mut(to.round, to.position) else {
                continue;
            };
            let next_id = next.id;
            let slot = next.slot_mut(to.slot);
            if *slot == Some(advanced) {
                log::warn!(
                    "Clearing {:?} slot of {} game {}: advanced team no longer won",
                    to.slot,
                    to.round.label(),
                    to.position
                );
                *slot = None;
                if !invalidated.contains(&next_id) {
                    invalidated.push(next_id);
                }
            }
        }
    }

    if invalidated.is_empty() {
        Ok(())
    } else {
        Err(BracketError::StaleParticipantState { invalidated })
    }
}

/// Manually set both slots of a game. A team may appear only once per round.
/// Run the consistency check afterwards.
pub fn assign_participants(
    bracket: &mut Bracket,
    game_id: GameId,
    home: Option<TeamId>,
    away: Option<TeamId>,
) -> Result<(), BracketError> {
    let round = bracket
        .game_by_id(game_id)
        .ok_or(BracketError::GameNotFound(game_id))?
        .round;
    if let (Some(h), Some(a)) = (home, away) {
        if h == a {
            return Err(BracketError::DuplicateTeamInRound { round, team: h });
        }
    }
    for team in [home, away].into_iter().flatten() {
        if bracket.team_in_round_elsewhere(round, team, game_id) {
            return Err(BracketError::DuplicateTeamInRound { round, team });
        }
    }

    let game = bracket
        .game_by_id_mut(game_id)
        .ok_or(BracketError::GameNotFound(game_id))?;
    game.home = home;
    game.away = away;
    Ok(())
}

/// Fold a consistency check result into the list of corrected games.
/// Any other error is passed through.
pub fn invalidated_games(check: Result<(), BracketError>) -> Result<Vec<GameId>, BracketError> {
    match check {
        Ok(()) => Ok(Vec::new()),
        Err(BracketError::StaleParticipantState { invalidated }) => Ok(invalidated),
        Err(e) => Err(e),
    }
}
