//! Backup and restore: JSON import/export and a CSV scoreboard.

use crate::logic::integrity::ensure_data_integrity;
use crate::logic::ranking::rank_players;
use crate::models::{MatchError, MatchState, APP_VERSION, NUM_SETS};
use chrono::NaiveDate;

/// Restore a match from exported JSON text.
///
/// The result is stamped with the current version and time, as a freshly restored match.
pub fn import_state(json: &str) -> Result<MatchState, MatchError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| MatchError::InvalidStructure(e.to_string()))?;
    let mut state = ensure_data_integrity(value)?;
    state.version = APP_VERSION.to_string();
    state.touch();
    Ok(state)
}

/// Pretty-printed JSON backup of the match.
pub fn export_state(state: &MatchState) -> Result<String, MatchError> {
    serde_json::to_string_pretty(state).map_err(|e| MatchError::Serialization(e.to_string()))
}

/// Default backup file name for a given day, e.g. `paddle-match-results-2024-05-01.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("paddle-match-results-{}.json", date.format("%Y-%m-%d"))
}

/// Results table as CSV: rank, name, each set's sum, total. Rows in ranking order.
pub fn export_scoreboard_csv(state: &MatchState) -> Result<String, MatchError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["rank".to_string(), "name".to_string()];
    header.extend((1..=NUM_SETS).map(|n| format!("set_{}", n)));
    header.push("total".to_string());
    writer
        .write_record(&header)
        .map_err(|e| MatchError::Serialization(e.to_string()))?;

    for (rank, &i) in rank_players(state).iter().enumerate() {
        let player = &state.players[i];
        let mut row = vec![(rank + 1).to_string(), player.name.clone()];
        row.extend(player.sets.iter().map(|s| s.sum.to_string()));
        row.push(player.total.to_string());
        writer
            .write_record(&row)
            .map_err(|e| MatchError::Serialization(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MatchError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| MatchError::Serialization(e.to_string()))
}
