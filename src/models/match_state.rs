//! MatchState, TeamHistory and MatchError.

use crate::models::player::{Player, PlayerIndex, SetIndex};
use crate::models::{APP_VERSION, NUM_PLAYERS, NUM_SETS};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Errors that can occur during match operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// Supplied state (storage or import) does not have the expected shape.
    InvalidStructure(String),
    /// A set already has two players marked as team members.
    TeamLimitExceeded,
    /// This pairing was already used as a team in another set.
    DuplicateTeamCombination {
        first: PlayerIndex,
        second: PlayerIndex,
        set: SetIndex,
    },
    /// Player index outside 0..NUM_PLAYERS.
    PlayerOutOfRange(usize),
    /// Set index outside 0..NUM_SETS.
    SetOutOfRange(usize),
    /// The state could not be written out.
    Serialization(String),
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::InvalidStructure(reason) => write!(f, "Invalid data structure: {}", reason),
            MatchError::TeamLimitExceeded => write!(f, "A set can only have 2 team members"),
            MatchError::DuplicateTeamCombination { first, second, set } => write!(
                f,
                "Players {} and {} were already a team in set {}",
                first + 1,
                second + 1,
                set + 1
            ),
            MatchError::PlayerOutOfRange(i) => write!(f, "No player at position {}", i),
            MatchError::SetOutOfRange(i) => write!(f, "No set at position {}", i),
            MatchError::Serialization(reason) => write!(f, "Could not serialize match: {}", reason),
        }
    }
}

impl std::error::Error for MatchError {}

/// Per-set record of which players form the flagged team.
///
/// An entry holds two indices once the team is complete, one while it is
/// being assigned, and none before. Completed entries are kept sorted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamHistory(pub [Vec<PlayerIndex>; NUM_SETS]);

impl TeamHistory {
    /// Indices recorded for a set: none, one while assigning, or the completed pair.
    pub fn entry(&self, set_index: SetIndex) -> &[PlayerIndex] {
        &self.0[set_index]
    }

    /// The pair for this set, if both slots are filled.
    pub fn completed_pair(&self, set_index: SetIndex) -> Option<(PlayerIndex, PlayerIndex)> {
        match self.0[set_index].as_slice() {
            &[a, b] => Some((a.min(b), a.max(b))),
            _ => None,
        }
    }

    /// First set other than `set_index` whose completed pair matches `{a, b}` in any order.
    pub fn set_using_pair(
        &self,
        set_index: SetIndex,
        a: PlayerIndex,
        b: PlayerIndex,
    ) -> Option<SetIndex> {
        let wanted = (a.min(b), a.max(b));
        (0..NUM_SETS)
            .filter(|&s| s != set_index)
            .find(|&s| self.completed_pair(s) == Some(wanted))
    }

    /// Record a completed pair, stored in ascending order.
    pub fn record_pair(&mut self, set_index: SetIndex, a: PlayerIndex, b: PlayerIndex) {
        self.0[set_index] = vec![a.min(b), a.max(b)];
    }

    /// Record the first member of a team still being assigned.
    pub fn record_single(&mut self, set_index: SetIndex, player_index: PlayerIndex) {
        self.0[set_index] = vec![player_index];
    }

    /// Drop a player from a set's entry, leaving any partner as a single member.
    pub fn remove(&mut self, set_index: SetIndex, player_index: PlayerIndex) {
        self.0[set_index].retain(|&p| p != player_index);
    }
}

/// Full match state: players, team history and metadata.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub players: [Player; NUM_PLAYERS],
    pub team_history: TeamHistory,
    pub version: String,
    /// Epoch milliseconds of the last save.
    pub last_updated: i64,
}

impl MatchState {
    /// Fresh match: unnamed players, zeroed sets, no team assignments.
    pub fn new() -> Self {
        Self {
            players: Default::default(),
            team_history: TeamHistory::default(),
            version: APP_VERSION.to_string(),
            last_updated: now_millis(),
        }
    }

    pub fn player(&self, player_index: PlayerIndex) -> Result<&Player, MatchError> {
        self.players
            .get(player_index)
            .ok_or(MatchError::PlayerOutOfRange(player_index))
    }

    /// Players flagged as team members in a set, in index order.
    pub fn team_members(&self, set_index: SetIndex) -> Vec<PlayerIndex> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.on_team(set_index))
            .map(|(i, _)| i)
            .collect()
    }

    /// Refresh `last_updated` to now (done by whoever saves the state).
    pub fn touch(&mut self) {
        self.last_updated = now_millis();
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// `PlayerOutOfRange` unless the index names one of the four players.
pub(crate) fn check_player(player_index: PlayerIndex) -> Result<(), MatchError> {
    if player_index < NUM_PLAYERS {
        Ok(())
    } else {
        Err(MatchError::PlayerOutOfRange(player_index))
    }
}

/// `SetOutOfRange` unless the index names one of the sets.
pub(crate) fn check_set(set_index: SetIndex) -> Result<(), MatchError> {
    if set_index < NUM_SETS {
        Ok(())
    } else {
        Err(MatchError::SetOutOfRange(set_index))
    }
}
