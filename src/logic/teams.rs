//! Team assignment: the two-per-set limit and the no-repeated-pairing rule.

use crate::logic::scores::{propagate_set, refresh_totals};
use crate::models::{check_player, check_set, MatchError, MatchState, PlayerIndex, SetIndex};

/// Check or uncheck a player's team flag for a set.
///
/// Checking fails with `TeamLimitExceeded` when two other players are already flagged, and
/// with `DuplicateTeamCombination` when the resulting pair already formed a team in another
/// set. A rejected edit returns the error and leaves `state` as it was.
pub fn update_team(
    state: &MatchState,
    player_index: PlayerIndex,
    set_index: SetIndex,
    is_checked: bool,
) -> Result<MatchState, MatchError> {
    check_player(player_index)?;
    check_set(set_index)?;
    let mut next = state.clone();

    if is_checked {
        let others: Vec<PlayerIndex> = state
            .team_members(set_index)
            .into_iter()
            .filter(|&i| i != player_index)
            .collect();

        match others.as_slice() {
            [] => next.team_history.record_single(set_index, player_index),
            &[partner] => {
                let history = &state.team_history;
                if let Some(used_in) = history.set_using_pair(set_index, player_index, partner) {
                    return Err(MatchError::DuplicateTeamCombination {
                        first: player_index.min(partner),
                        second: player_index.max(partner),
                        set: used_in,
                    });
                }
                next.team_history.record_pair(set_index, player_index, partner);
            }
            _ => return Err(MatchError::TeamLimitExceeded),
        }
        next.players[player_index].set_mut(set_index).team = true;
    } else {
        next.players[player_index].set_mut(set_index).team = false;
        next.team_history.remove(set_index, player_index);
    }

    propagate_set(&mut next.players, set_index);
    refresh_totals(&mut next.players);
    Ok(next)
}
