//! Recording game results and deciding winners.

use crate::models::{BracketError, Game, TeamId};
use chrono::Utc;
use std::cmp::Ordering;

/// A raw score must be present, non-negative, and fit in u32.
pub fn validate_score(raw: Option<i64>) -> Result<u32, BracketError> {
    raw.and_then(|s| u32::try_from(s).ok())
        .ok_or(BracketError::InvalidScore)
}

/// Validate and store a result on `game`, returning the winner to advance.
///
/// Checks run before anything is written, so a rejected result leaves any previously
/// recorded score in place. `overtime` is stored as-is and never affects the winner.
pub fn record_result(
    game: &mut Game,
    home_score: Option<i64>,
    away_score: Option<i64>,
    overtime: bool,
) -> Result<TeamId, BracketError> {
    let (home, away) = match (game.home, game.away) {
        (Some(h), Some(a)) => (h, a),
        _ => return Err(BracketError::MissingParticipants),
    };
    let home_score = validate_score(home_score)?;
    let away_score = validate_score(away_score)?;
    let winner = match home_score.cmp(&away_score) {
        Ordering::Greater => home,
        Ordering::Less => away,
        Ordering::Equal => return Err(BracketError::TiedScore),
    };

    game.home_score = Some(home_score);
    game.away_score = Some(away_score);
    game.overtime = overtime;
    game.recorded_at = Some(Utc::now());
    log::debug!(
        "{} game {}: {}-{}{}",
        game.round.label(),
        game.position,
        home_score,
        away_score,
        if overtime { " (OT)" } else { "" }
    );
    Ok(winner)
}
