//! Padel match tracker: library with the match model and the score/team engine.

pub mod logic;
pub mod models;

pub use logic::{
    calculate_set_scores, compute_standings, create_initial_state, ensure_data_integrity,
    export_file_name, export_scoreboard_csv, export_state, import_state, names_complete,
    parse_score, rank_players, recalculate_totals, reset_state, sanitize_name, teams_valid,
    update_name, update_score, update_team, Movement, Standings,
};
pub use models::{
    MatchError, MatchState, Player, PlayerIndex, ScoreField, SetIndex, SetScore, TeamHistory,
    APP_VERSION, MAX_NAME_LEN, NUM_PLAYERS, NUM_SETS, REFERENCE_PLAYER,
};
