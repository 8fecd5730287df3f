//! Advancement: moving a decided winner into its slot in the next round.
//!
//! The adjacency is a fixed table. Seed 1 meets the 8/9 winner, and the semifinals pair
//! the 1 and 3 sides against each other (2 and 4 likewise), so no team can face an
//! opponent it already eliminated.

use crate::models::{Bracket, BracketError, GameId, Round, Slot, TeamId};

/// Where the winner of a game goes next.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdvancementEdge {
    pub round: Round,
    pub position: usize,
    pub slot: Slot,
}

const fn edge(round: Round, position: usize, slot: Slot) -> AdvancementEdge {
    AdvancementEdge {
        round,
        position,
        slot,
    }
}

/// (round, position) of a game -> destination of its winner. Championship has no entry.
const ADVANCEMENT_TABLE: [((Round, usize), AdvancementEdge); 10] = [
    ((Round::FirstRound, 0), edge(Round::Quarterfinals, 3, Slot::Away)),
    ((Round::FirstRound, 1), edge(Round::Quarterfinals, 2, Slot::Away)),
    ((Round::FirstRound, 2), edge(Round::Quarterfinals, 1, Slot::Away)),
    ((Round::FirstRound, 3), edge(Round::Quarterfinals, 0, Slot::Away)),
    ((Round::Quarterfinals, 0), edge(Round::Semifinals, 0, Slot::Home)),
    ((Round::Quarterfinals, 1), edge(Round::Semifinals, 1, Slot::Home)),
    ((Round::Quarterfinals, 2), edge(Round::Semifinals, 0, Slot::Away)),
    ((Round::Quarterfinals, 3), edge(Round::Semifinals, 1, Slot::Away)),
    ((Round::Semifinals, 0), edge(Round::Championship, 0, Slot::Home)),
    ((Round::Semifinals, 1), edge(Round::Championship, 0, Slot::Away)),
];

pub fn advancement_edge(round: Round, position: usize) -> Option<AdvancementEdge> {
    ADVANCEMENT_TABLE
        .iter()
        .find(|(from, _)| *from == (round, position))
        .map(|&(_, to)| to)
}

/// Game whose winner fills `slot` of (round, position). None for seeded slots.
pub fn feeder_of(round: Round, position: usize, slot: Slot) -> Option<(Round, usize)> {
    ADVANCEMENT_TABLE
        .iter()
        .find(|(_, to)| *to == edge(round, position, slot))
        .map(|&(from, _)| from)
}

/// What `propagate` did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Advancement {
    /// Winner written into an empty slot.
    Placed { game: GameId, slot: Slot },
    /// Slot already held this winner; nothing changed.
    AlreadyPlaced { game: GameId, slot: Slot },
    /// Championship winner; the bracket is complete.
    Final,
}

/// Place `winner` of `game_id` into its downstream slot.
///
/// Only fills an empty slot. A slot held by a different team is a `SlotConflict`; clearing
/// it is the consistency check's job, never ordinary advancement. A winner already playing
/// somewhere in the next round is `DuplicateTeamInRound`. On error the bracket is unchanged.
pub fn propagate(
    bracket: &mut Bracket,
    game_id: GameId,
    winner: TeamId,
) -> Result<Advancement, BracketError> {
    let game = bracket
        .game_by_id(game_id)
        .ok_or(BracketError::GameNotFound(game_id))?;
    if !game.has_team(winner) {
        return Err(BracketError::NotAParticipant {
            game: game_id,
            team: winner,
        });
    }
    let Some(to) = advancement_edge(game.round, game.position) else {
        log::info!("Champion decided in game {}", game_id);
        return Ok(Advancement::Final);
    };
    let next = bracket
        .game(to.round, to.position)
        .ok_or(BracketError::GameNotFound(game_id))?;
    let next_id = next.id;
    match next.slot(to.slot) {
        Some(occupant) if occupant == winner => {
            return Ok(Advancement::AlreadyPlaced {
                game: next_id,
                slot: to.slot,
            })
        }
        Some(occupant) => {
            return Err(BracketError::SlotConflict {
                game: next_id,
                slot: to.slot,
                occupant,
                incoming: winner,
            })
        }
        None => {}
    }
    // The slot is empty, so any appearance in the round is a second one.
    if bracket.games_in_round(to.round).any(|g| g.has_team(winner)) {
        return Err(BracketError::DuplicateTeamInRound {
            round: to.round,
            team: winner,
        });
    }

    let next = bracket
        .game_by_id_mut(next_id)
        .ok_or(BracketError::GameNotFound(next_id))?;
    *next.slot_mut(to.slot) = Some(winner);
    log::debug!(
        "Advanced {} to {} game {} ({:?})",
        winner,
        to.round.label(),
        to.position,
        to.slot
    );
    Ok(Advancement::Placed {
        game: next_id,
        slot: to.slot,
    })
}
