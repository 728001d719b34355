//! Integration tests for results: readiness, ties, movement, and exports.

use chrono::NaiveDate;
use padel_match_tracker::{
    compute_standings, create_initial_state, export_file_name, export_scoreboard_csv,
    export_state, import_state, names_complete, rank_players, reset_state, teams_valid,
    update_name, update_score, update_team, MatchState, Movement, ScoreField, Standings,
    APP_VERSION,
};

fn named_match() -> MatchState {
    let mut state = create_initial_state();
    for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
        state = update_name(&state, i, name).unwrap();
    }
    state
}

/// Teams per set (A is the reference player) and A's won/lost for each set.
fn play(teams: [(usize, usize); 3], results: [(u32, u32); 3]) -> MatchState {
    let mut state = named_match();
    for (set, (a, b)) in teams.iter().enumerate() {
        state = update_team(&state, *a, set, true).unwrap();
        state = update_team(&state, *b, set, true).unwrap();
    }
    for (set, (won, lost)) in results.iter().enumerate() {
        state = update_score(&state, set, ScoreField::Won, &won.to_string()).unwrap();
        state = update_score(&state, set, ScoreField::Lost, &lost.to_string()).unwrap();
    }
    state
}

fn totals(state: &MatchState) -> Vec<i64> {
    state.players.iter().map(|p| p.total).collect()
}

#[test]
fn not_ready_without_names_or_teams() {
    let state = create_initial_state();
    assert!(!names_complete(&state));
    assert_eq!(compute_standings(&state), Standings::NotReady);

    let state = named_match();
    assert!(names_complete(&state));
    assert!(!teams_valid(&state));
    assert_eq!(compute_standings(&state), Standings::NotReady);

    let mut state = play([(0, 1), (0, 2), (0, 3)], [(6, 4), (6, 4), (6, 4)]);
    assert!(teams_valid(&state));
    state = update_name(&state, 3, "   ").unwrap();
    assert_eq!(compute_standings(&state), Standings::NotReady);
}

#[test]
fn strict_ranking_produces_movement() {
    // A+B win 6-2, A+C win 6-5, A+D lose 2-6.
    let state = play([(0, 1), (0, 2), (0, 3)], [(6, 2), (6, 5), (2, 6)]);
    assert_eq!(totals(&state), vec![1, 7, 1, -9]);
    assert_eq!(
        compute_standings(&state),
        Standings::Decided {
            ranked: [1, 0, 2, 3],
            movement: Movement {
                move_up: 1,
                stay: [0, 2],
                move_down: 3,
            },
        }
    );
}

#[test]
fn shared_top_and_bottom_are_both_reported() {
    // A+B win set 0 by 2, set 1 drawn, set 2 unplayed.
    let state = play([(0, 1), (0, 2), (0, 3)], [(6, 4), (3, 3), (0, 0)]);
    assert_eq!(totals(&state), vec![2, 2, -2, -2]);

    match compute_standings(&state) {
        Standings::Tied {
            ranked,
            winner_tie,
            loser_tie,
        } => {
            assert_eq!(ranked, [0, 1, 2, 3]);
            assert_eq!(winner_tie, vec![0, 1]);
            assert_eq!(loser_tie, vec![2, 3]);
        }
        other => panic!("expected tie, got {:?}", other),
    }
}

#[test]
fn winner_tie_blocks_movement() {
    let mut state = play([(0, 1), (0, 2), (0, 3)], [(6, 4), (6, 4), (4, 5)]);
    for (player, total) in [4, 4, 2, 0].into_iter().enumerate() {
        state.players[player].total = total;
    }
    assert_eq!(
        compute_standings(&state),
        Standings::Tied {
            ranked: [0, 1, 2, 3],
            winner_tie: vec![0, 1],
            loser_tie: vec![],
        }
    );
}

#[test]
fn winner_tie_only() {
    let mut state = play([(0, 1), (0, 2), (0, 3)], [(6, 4), (6, 4), (4, 5)]);
    // A 2+2-1 = 3, B 2-2+1 = 1, C -2+2+1 = 1, D -2-2-1 = -5
    assert_eq!(totals(&state), vec![3, 1, 1, -5]);
    assert!(matches!(compute_standings(&state), Standings::Decided { .. }));

    state.players[1].total = 3;
    match compute_standings(&state) {
        Standings::Tied {
            winner_tie,
            loser_tie,
            ..
        } => {
            assert_eq!(winner_tie, vec![0, 1]);
            assert!(loser_tie.is_empty());
        }
        other => panic!("expected winner tie, got {:?}", other),
    }
}

#[test]
fn equal_totals_rank_by_player_order() {
    let mut state = named_match();
    state.players[0].total = 1;
    state.players[1].total = 5;
    state.players[2].total = 1;
    state.players[3].total = 5;
    assert_eq!(rank_players(&state), [1, 3, 0, 2]);
}

#[test]
fn reset_discards_results() {
    let state = play([(0, 1), (0, 2), (0, 3)], [(6, 2), (6, 5), (2, 6)]);
    let fresh = reset_state();
    assert!(fresh.players.iter().all(|p| p.name.is_empty() && p.total == 0));
    assert!(!teams_valid(&fresh));
    assert_ne!(fresh.players, state.players);
}

#[test]
fn export_then_import_restores_the_match() {
    let mut state = play([(0, 1), (0, 2), (0, 3)], [(6, 2), (6, 5), (2, 6)]);
    state.version = "0.9.0".to_string();
    let text = export_state(&state).unwrap();
    assert!(text.contains("\"teamHistory\""));

    let restored = import_state(&text).unwrap();
    assert_eq!(restored.players, state.players);
    assert_eq!(restored.team_history, state.team_history);
    assert_eq!(restored.version, APP_VERSION);
    assert!(restored.last_updated >= state.last_updated);
}

#[test]
fn export_file_name_carries_the_date() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    assert_eq!(export_file_name(date), "paddle-match-results-2024-05-01.json");
}

#[test]
fn scoreboard_csv_lists_players_by_rank() {
    let state = play([(0, 1), (0, 2), (0, 3)], [(6, 2), (6, 5), (2, 6)]);
    let csv = export_scoreboard_csv(&state).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "rank,name,set_1,set_2,set_3,total");
    assert_eq!(lines[1], "1,B,4,-1,4,7");
    assert_eq!(lines.len(), 5);
}
