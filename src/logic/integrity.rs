//! Initial state and repair/upgrade of externally supplied state.

use crate::logic::scores::refresh_totals;
use crate::models::{
    now_millis, MatchError, MatchState, Player, PlayerIndex, TeamHistory, APP_VERSION,
    NUM_PLAYERS, NUM_SETS,
};
use serde::Deserialize;
use serde_json::Value;

/// Stored or imported state before validation. Every field may be missing in older formats.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    players: Option<Vec<Player>>,
    team_history: Option<Vec<Vec<PlayerIndex>>>,
    version: Option<String>,
    last_updated: Option<i64>,
}

/// A fresh match: four unnamed players, zeroed sets, no teams, current version and time.
pub fn create_initial_state() -> MatchState {
    MatchState::new()
}

/// Discard all results.
pub fn reset_state() -> MatchState {
    create_initial_state()
}

/// Validate a loosely typed candidate and fill in what older formats lack.
///
/// Fails with `InvalidStructure` unless there are exactly four well-formed players.
/// Missing version and timestamp are filled with the current ones. Missing team
/// history is rebuilt from the team flags: a set with exactly two flagged players
/// gets that pair, any other set stays empty. Sums and totals are recomputed from
/// won/lost so stale derived values never enter the engine.
///
/// A present team history must agree with the team flags, and no completed pair
/// may appear in more than one set.
pub fn ensure_data_integrity(candidate: Value) -> Result<MatchState, MatchError> {
    let candidate: Candidate = serde_json::from_value(candidate)
        .map_err(|e| MatchError::InvalidStructure(e.to_string()))?;

    let players = candidate
        .players
        .ok_or_else(|| MatchError::InvalidStructure("missing players".to_string()))?;
    let count = players.len();
    let mut players: [Player; NUM_PLAYERS] = players.try_into().map_err(|_| {
        MatchError::InvalidStructure(format!("expected {} players, found {}", NUM_PLAYERS, count))
    })?;

    for player in players.iter_mut() {
        for score in player.sets.iter_mut() {
            score.refresh_sum();
        }
    }
    refresh_totals(&mut players);

    let team_history = match candidate.team_history {
        Some(entries) => {
            let history = validate_team_history(entries)?;
            check_history_matches_flags(&history, &players)?;
            history
        }
        None => rebuild_team_history(&players),
    };
    check_no_repeated_pairs(&team_history)?;

    Ok(MatchState {
        players,
        team_history,
        version: candidate
            .version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| APP_VERSION.to_string()),
        last_updated: candidate
            .last_updated
            .filter(|&t| t > 0)
            .unwrap_or_else(now_millis),
    })
}

fn validate_team_history(entries: Vec<Vec<PlayerIndex>>) -> Result<TeamHistory, MatchError> {
    let count = entries.len();
    let mut entries: [Vec<PlayerIndex>; NUM_SETS] = entries.try_into().map_err(|_| {
        MatchError::InvalidStructure(format!(
            "expected {} team history entries, found {}",
            NUM_SETS, count
        ))
    })?;

    for (set_index, entry) in entries.iter_mut().enumerate() {
        if entry.len() > 2 {
            return Err(MatchError::InvalidStructure(format!(
                "set {} has {} team members",
                set_index + 1,
                entry.len()
            )));
        }
        if let Some(&bad) = entry.iter().find(|&&p| p >= NUM_PLAYERS) {
            return Err(MatchError::InvalidStructure(format!(
                "set {} names unknown player {}",
                set_index + 1,
                bad
            )));
        }
        if entry.len() == 2 && entry[0] == entry[1] {
            return Err(MatchError::InvalidStructure(format!(
                "set {} pairs player {} with itself",
                set_index + 1,
                entry[0]
            )));
        }
        entry.sort_unstable();
    }
    Ok(TeamHistory(entries))
}

fn flagged(players: &[Player; NUM_PLAYERS], set_index: usize) -> Vec<PlayerIndex> {
    (0..NUM_PLAYERS)
        .filter(|&i| players[i].on_team(set_index))
        .collect()
}

fn check_history_matches_flags(
    history: &TeamHistory,
    players: &[Player; NUM_PLAYERS],
) -> Result<(), MatchError> {
    for set_index in 0..NUM_SETS {
        let members = flagged(players, set_index);
        let entry = history.entry(set_index);
        let consistent = match (members.len(), entry) {
            (2, _) => entry == members.as_slice(),
            (_, [single]) => members.contains(single),
            (_, []) => true,
            _ => false,
        };
        if !consistent {
            return Err(MatchError::InvalidStructure(format!(
                "set {} team history {:?} does not match team flags {:?}",
                set_index + 1,
                entry,
                members
            )));
        }
    }
    Ok(())
}

fn check_no_repeated_pairs(history: &TeamHistory) -> Result<(), MatchError> {
    for set_index in 0..NUM_SETS {
        if let Some((a, b)) = history.completed_pair(set_index) {
            if let Some(other) = history.set_using_pair(set_index, a, b) {
                return Err(MatchError::InvalidStructure(format!(
                    "players {} and {} are a team in sets {} and {}",
                    a + 1,
                    b + 1,
                    set_index + 1,
                    other + 1
                )));
            }
        }
    }
    Ok(())
}

fn rebuild_team_history(players: &[Player; NUM_PLAYERS]) -> TeamHistory {
    let mut history = TeamHistory::default();
    for set_index in 0..NUM_SETS {
        if let &[a, b] = flagged(players, set_index).as_slice() {
            history.record_pair(set_index, a, b);
        }
    }
    history
}
