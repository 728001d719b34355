//! Match engine: score derivation, team assignment, integrity checks, results.

mod integrity;
mod ranking;
mod scores;
mod teams;
mod transfer;

pub use integrity::{create_initial_state, ensure_data_integrity, reset_state};
pub use ranking::{compute_standings, names_complete, rank_players, teams_valid, Movement, Standings};
pub use scores::{
    calculate_set_scores, parse_score, recalculate_totals, sanitize_name, update_name, update_score,
};
pub use teams::update_team;
pub use transfer::{export_file_name, export_scoreboard_csv, export_state, import_state};
