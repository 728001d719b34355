//! Name and score edits, team propagation, totals.

use crate::models::{
    check_player, check_set, MatchError, MatchState, Player, PlayerIndex, ScoreField, SetIndex,
    NUM_PLAYERS, REFERENCE_PLAYER,
};

/// Escape `< > & " ' /` to HTML entities and trim surrounding whitespace.
///
/// Each character is escaped once. Names saved by the old web app may still carry
/// double-escaped entities such as `&amp;lt;`; they are kept as stored.
pub fn sanitize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Parse a typed score: leading digits only, anything else (empty, negative, garbage) is 0.
pub fn parse_score(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Replace a player's name with the sanitized input. Nothing else changes.
pub fn update_name(
    state: &MatchState,
    player_index: PlayerIndex,
    raw_name: &str,
) -> Result<MatchState, MatchError> {
    check_player(player_index)?;
    let mut next = state.clone();
    next.players[player_index].name = sanitize_name(raw_name);
    Ok(next)
}

/// Enter the reference player's won or lost count for a set, then derive everyone else's.
pub fn update_score(
    state: &MatchState,
    set_index: SetIndex,
    field: ScoreField,
    raw_value: &str,
) -> Result<MatchState, MatchError> {
    check_set(set_index)?;
    let value = parse_score(raw_value);
    let mut next = state.clone();

    let score = next.players[REFERENCE_PLAYER].set_mut(set_index);
    match field {
        ScoreField::Won => score.won = value,
        ScoreField::Lost => score.lost = value,
    }
    score.refresh_sum();

    propagate_set(&mut next.players, set_index);
    refresh_totals(&mut next.players);
    Ok(next)
}

/// Derive the non-reference players' scores for one set from the team flags.
pub fn calculate_set_scores(
    players: &[Player; NUM_PLAYERS],
    set_index: SetIndex,
) -> Result<[Player; NUM_PLAYERS], MatchError> {
    check_set(set_index)?;
    let mut next = players.clone();
    propagate_set(&mut next, set_index);
    Ok(next)
}

/// Every player's total set to the sum of their per-set sums.
pub fn recalculate_totals(players: &[Player; NUM_PLAYERS]) -> [Player; NUM_PLAYERS] {
    let mut next = players.clone();
    refresh_totals(&mut next);
    next
}

/// With exactly two flagged players, the reference player's side copies its result and the
/// other side gets it reversed. Otherwise the derived results are zeroed.
pub(crate) fn propagate_set(players: &mut [Player; NUM_PLAYERS], set_index: SetIndex) {
    let team_count = players.iter().filter(|p| p.on_team(set_index)).count();
    let reference = players[REFERENCE_PLAYER].set(set_index).clone();

    for (i, player) in players.iter_mut().enumerate() {
        if i == REFERENCE_PLAYER {
            continue;
        }
        let score = player.set_mut(set_index);
        if team_count != 2 {
            score.clear_result();
        } else if score.team == reference.team {
            score.set_result(reference.won, reference.lost);
        } else {
            score.set_result(reference.lost, reference.won);
        }
    }
}

pub(crate) fn refresh_totals(players: &mut [Player]) {
    for p in players.iter_mut() {
        p.refresh_total();
    }
}
