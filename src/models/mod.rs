//! Data structures for the match tracker: players, set scores, team history, match state.

mod match_state;
mod player;

pub use match_state::{now_millis, MatchError, MatchState, TeamHistory};
pub(crate) use match_state::{check_player, check_set};
pub use player::{Player, PlayerIndex, ScoreField, SetIndex, SetScore, REFERENCE_PLAYER};

/// Format version written into every state.
pub const APP_VERSION: &str = "1.0.0";
pub const NUM_PLAYERS: usize = 4;
pub const NUM_SETS: usize = 3;
/// Longest name the input boundary accepts.
pub const MAX_NAME_LEN: usize = 20;
