//! Integration tests for result recording and winner advancement.

use playoff_bracket_web::{
    advancement_edge, assign_participants, build, feeder_of, propagate, record_result,
    Advancement, Bracket, BracketError, Round, SeedDraft, Slot, Team, TeamId,
};
use uuid::Uuid;

fn seeded_bracket() -> Bracket {
    let teams: Vec<Team> = (1..=12).map(|r| Team::ranked(format!("T{r}"), r)).collect();
    build(Uuid::new_v4(), &SeedDraft::from_ranked(&teams).commit().unwrap())
}

fn seed(bracket: &Bracket, seed: usize) -> TeamId {
    bracket.seeding.team(seed).unwrap()
}

/// Record a result at (round, pos) and advance the winner.
fn play(bracket: &mut Bracket, round: Round, pos: usize, home: i64, away: i64) -> TeamId {
    let game = bracket.game_mut(round, pos).unwrap();
    let id = game.id;
    let winner = record_result(game, Some(home), Some(away), false).unwrap();
    propagate(bracket, id, winner).unwrap();
    winner
}

#[test]
fn record_requires_both_participants() {
    let mut bracket = seeded_bracket();
    let qf = bracket.game_mut(Round::Quarterfinals, 0).unwrap();
    assert_eq!(
        record_result(qf, Some(3), Some(1), false),
        Err(BracketError::MissingParticipants)
    );
    assert!(!qf.has_result());
}

#[test]
fn record_rejects_negative_or_missing_scores() {
    let mut bracket = seeded_bracket();
    let game = bracket.game_mut(Round::FirstRound, 0).unwrap();
    assert_eq!(record_result(game, Some(-1), Some(3), false), Err(BracketError::InvalidScore));
    assert_eq!(record_result(game, Some(2), None, false), Err(BracketError::InvalidScore));
    assert_eq!(
        record_result(game, Some(i64::from(u32::MAX) + 1), Some(0), false),
        Err(BracketError::InvalidScore)
    );
    assert!(!game.has_result());
}

#[test]
fn tie_is_rejected_and_prior_scores_survive() {
    let mut bracket = seeded_bracket();
    let game = bracket.game_mut(Round::FirstRound, 1).unwrap();
    record_result(game, Some(21), Some(14), false).unwrap();
    assert_eq!(record_result(game, Some(17), Some(17), true), Err(BracketError::TiedScore));
    assert_eq!((game.home_score, game.away_score), (Some(21), Some(14)));
    assert!(!game.overtime);
}

#[test]
fn higher_score_wins_regardless_of_overtime() {
    let mut bracket = seeded_bracket();
    let home = seed(&bracket, 8);
    let away = seed(&bracket, 9);
    let game = bracket.game_mut(Round::FirstRound, 3).unwrap();
    assert_eq!(record_result(game, Some(20), Some(23), true), Ok(away));
    assert!(game.overtime);
    assert!(game.recorded_at.is_some());
    assert_eq!(record_result(game, Some(0), Some(0), false), Err(BracketError::TiedScore));
    assert_eq!(record_result(game, Some(30), Some(3), false), Ok(home));
}

#[test]
fn first_round_winner_lands_in_quarterfinal_away_slot() {
    let mut bracket = seeded_bracket();
    let winner = play(&mut bracket, Round::FirstRound, 0, 28, 7);
    assert_eq!(winner, seed(&bracket, 5));
    let qf3 = bracket.game(Round::Quarterfinals, 3).unwrap();
    assert_eq!(qf3.home, Some(seed(&bracket, 4)));
    assert_eq!(qf3.away, Some(winner));

    let expected = [(1, 2), (2, 1), (3, 0)];
    for (fr, qf) in expected {
        let w = play(&mut bracket, Round::FirstRound, fr, 10, 3);
        assert_eq!(bracket.game(Round::Quarterfinals, qf).unwrap().away, Some(w));
    }
}

#[test]
fn propagate_twice_is_a_no_op() {
    let mut bracket = seeded_bracket();
    let game = bracket.game_mut(Round::FirstRound, 2).unwrap();
    let id = game.id;
    let winner = record_result(game, Some(14), Some(10), false).unwrap();
    let first = propagate(&mut bracket, id, winner).unwrap();
    let second = propagate(&mut bracket, id, winner).unwrap();
    let qf1 = bracket.game(Round::Quarterfinals, 1).unwrap();
    assert_eq!(
        first,
        Advancement::Placed {
            game: qf1.id,
            slot: Slot::Away
        }
    );
    assert_eq!(
        second,
        Advancement::AlreadyPlaced {
            game: qf1.id,
            slot: Slot::Away
        }
    );
    assert_eq!(qf1.away, Some(winner));
}

#[test]
fn propagate_refuses_to_overwrite_a_different_team() {
    let mut bracket = seeded_bracket();
    play(&mut bracket, Round::FirstRound, 0, 10, 0);
    let fr0 = bracket.game(Round::FirstRound, 0).unwrap().id;
    let loser = seed(&bracket, 12);
    let occupant = seed(&bracket, 5);
    let err = propagate(&mut bracket, fr0, loser).unwrap_err();
    assert!(matches!(
        err,
        BracketError::SlotConflict { slot: Slot::Away, occupant: o, incoming: i, .. }
            if o == occupant && i == loser
    ));
    assert_eq!(bracket.game(Round::Quarterfinals, 3).unwrap().away, Some(occupant));
}

#[test]
fn propagate_rejects_team_not_in_game() {
    let mut bracket = seeded_bracket();
    let fr0 = bracket.game(Round::FirstRound, 0).unwrap().id;
    let outsider = seed(&bracket, 1);
    assert!(matches!(
        propagate(&mut bracket, fr0, outsider),
        Err(BracketError::NotAParticipant { .. })
    ));
    assert!(matches!(
        propagate(&mut bracket, Uuid::new_v4(), outsider),
        Err(BracketError::GameNotFound(_))
    ));
}

#[test]
fn propagate_rejects_winner_already_in_next_round() {
    let mut bracket = seeded_bracket();
    let seed1 = seed(&bracket, 1);
    let sf1 = bracket.game(Round::Semifinals, 1).unwrap().id;
    assign_participants(&mut bracket, sf1, None, Some(seed1)).unwrap();
    play(&mut bracket, Round::FirstRound, 3, 10, 3);

    let qf0 = bracket.game_mut(Round::Quarterfinals, 0).unwrap();
    let id = qf0.id;
    let winner = record_result(qf0, Some(10), Some(3), false).unwrap();
    assert_eq!(winner, seed1);
    assert_eq!(
        propagate(&mut bracket, id, winner),
        Err(BracketError::DuplicateTeamInRound {
            round: Round::Semifinals,
            team: seed1
        })
    );
    assert_eq!(bracket.game(Round::Semifinals, 0).unwrap().home, None);
}

#[test]
fn championship_winner_completes_the_bracket() {
    let mut bracket = seeded_bracket();
    for pos in 0..4 {
        play(&mut bracket, Round::FirstRound, pos, 7, 3);
    }
    for pos in 0..4 {
        play(&mut bracket, Round::Quarterfinals, pos, 7, 3);
    }
    play(&mut bracket, Round::Semifinals, 0, 7, 3);
    assert!(bracket.game(Round::Championship, 0).unwrap().away.is_none());
    play(&mut bracket, Round::Semifinals, 1, 3, 7);

    let title = bracket.game_mut(Round::Championship, 0).unwrap();
    let id = title.id;
    let champion = record_result(title, Some(24), Some(21), true).unwrap();
    assert_eq!(propagate(&mut bracket, id, champion), Ok(Advancement::Final));
    assert!(bracket.is_complete());
    assert_eq!(bracket.champion(), Some(seed(&bracket, 1)));
}

#[test]
fn adjacency_table_matches_bracket_topology() {
    let cases = [
        ((Round::FirstRound, 0), (Round::Quarterfinals, 3, Slot::Away)),
        ((Round::FirstRound, 3), (Round::Quarterfinals, 0, Slot::Away)),
        ((Round::Quarterfinals, 0), (Round::Semifinals, 0, Slot::Home)),
        ((Round::Quarterfinals, 2), (Round::Semifinals, 0, Slot::Away)),
        ((Round::Quarterfinals, 1), (Round::Semifinals, 1, Slot::Home)),
        ((Round::Quarterfinals, 3), (Round::Semifinals, 1, Slot::Away)),
        ((Round::Semifinals, 1), (Round::Championship, 0, Slot::Away)),
    ];
    for ((round, pos), (next_round, next_pos, slot)) in cases {
        let edge = advancement_edge(round, pos).unwrap();
        assert_eq!((edge.round, edge.position, edge.slot), (next_round, next_pos, slot));
        assert_eq!(feeder_of(next_round, next_pos, slot), Some((round, pos)));
    }
    assert_eq!(advancement_edge(Round::Championship, 0), None);
    assert_eq!(feeder_of(Round::Quarterfinals, 0, Slot::Home), None);
}
