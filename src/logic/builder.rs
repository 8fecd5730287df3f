//! Bracket construction from a seed assignment.

use crate::models::{Bracket, Game, Round, SeasonId, SeedAssignment};

/// First round pairings as (home seed, away seed), by position.
pub const FIRST_ROUND_PAIRINGS: [(usize, usize); 4] = [(5, 12), (6, 11), (7, 10), (8, 9)];

/// Bye seed holding the home slot of each quarterfinal, by position.
pub const QUARTERFINAL_BYES: [usize; 4] = [1, 2, 3, 4];

/// Build the 11-game bracket. First round is fully populated, quarterfinals get their
/// bye team at home, and everything else starts empty.
pub fn build(season_id: SeasonId, seeding: &SeedAssignment) -> Bracket {
    let games = Round::ALL
        .iter()
        .flat_map(|&round| (0..round.game_count()).map(move |pos| Game::new(round, pos)))
        .collect();
    let mut bracket = Bracket {
        season_id,
        seeding: seeding.clone(),
        games,
    };
    place_seeds(&mut bracket, seeding);
    log::debug!("Built bracket for season {} ({} games)", season_id, bracket.games.len());
    bracket
}

/// Reseed an existing bracket in place. Only seeded slots are rewritten and game ids
/// are kept; run the consistency check afterwards to clear what depended on old teams.
pub fn apply_seeding(bracket: &mut Bracket, seeding: &SeedAssignment) {
    bracket.seeding = seeding.clone();
    place_seeds(bracket, seeding);
}

fn place_seeds(bracket: &mut Bracket, seeding: &SeedAssignment) {
    for (pos, &(home_seed, away_seed)) in FIRST_ROUND_PAIRINGS.iter().enumerate() {
        if let Some(game) = bracket.game_mut(Round::FirstRound, pos) {
            game.home = seeding.team(home_seed);
            game.away = seeding.team(away_seed);
        }
    }
    for (pos, &seed) in QUARTERFINAL_BYES.iter().enumerate() {
        if let Some(game) = bracket.game_mut(Round::Quarterfinals, pos) {
            game.home = seeding.team(seed);
        }
    }
}
