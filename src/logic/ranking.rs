//! Results: readiness checks, ranking by total, tie detection, movement.

use crate::models::{MatchState, PlayerIndex, NUM_PLAYERS, NUM_SETS};
use serde::Serialize;
use std::cmp::Reverse;

/// Who moves up and down when the extremes of the ranking are strict.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Movement {
    pub move_up: PlayerIndex,
    pub stay: [PlayerIndex; 2],
    pub move_down: PlayerIndex,
}

/// Outcome of the results view.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Standings {
    /// A name is missing or some set lacks a complete team.
    NotReady,
    /// Top or bottom is shared; a tiebreaker is needed before anyone moves.
    Tied {
        ranked: [PlayerIndex; NUM_PLAYERS],
        /// Players sharing the top total (empty if no winner tie).
        winner_tie: Vec<PlayerIndex>,
        /// Players sharing the bottom total (empty if no loser tie).
        loser_tie: Vec<PlayerIndex>,
    },
    Decided {
        ranked: [PlayerIndex; NUM_PLAYERS],
        movement: Movement,
    },
}

/// True iff every set has exactly two players flagged.
pub fn teams_valid(state: &MatchState) -> bool {
    (0..NUM_SETS).all(|s| state.team_members(s).len() == 2)
}

/// True iff every player has a non-empty name.
pub fn names_complete(state: &MatchState) -> bool {
    state.players.iter().all(|p| !p.name.is_empty())
}

/// Player indices by total, highest first. Equal totals keep index order.
pub fn rank_players(state: &MatchState) -> [PlayerIndex; NUM_PLAYERS] {
    let mut ranked: [PlayerIndex; NUM_PLAYERS] = std::array::from_fn(|i| i);
    ranked.sort_by_key(|&i| Reverse(state.players[i].total));
    ranked
}

pub fn compute_standings(state: &MatchState) -> Standings {
    if !names_complete(state) || !teams_valid(state) {
        return Standings::NotReady;
    }

    let ranked = rank_players(state);
    let total = |rank: usize| state.players[ranked[rank]].total;
    let sharing = |value: i64| -> Vec<PlayerIndex> {
        ranked
            .iter()
            .copied()
            .filter(|&i| state.players[i].total == value)
            .collect()
    };

    let winner_tie = if total(0) == total(1) {
        sharing(total(0))
    } else {
        Vec::new()
    };
    let loser_tie = if total(2) == total(3) {
        sharing(total(3))
    } else {
        Vec::new()
    };

    if winner_tie.is_empty() && loser_tie.is_empty() {
        Standings::Decided {
            ranked,
            movement: Movement {
                move_up: ranked[0],
                stay: [ranked[1], ranked[2]],
                move_down: ranked[3],
            },
        }
    } else {
        Standings::Tied {
            ranked,
            winner_tie,
            loser_tie,
        }
    }
}
