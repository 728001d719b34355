//! Player and SetScore data structures.

use crate::models::NUM_SETS;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Position of a player in the match (0..NUM_PLAYERS).
pub type PlayerIndex = usize;

/// Position of a set in the match (0..NUM_SETS).
pub type SetIndex = usize;

/// The player whose score entry drives every other player's scores.
pub const REFERENCE_PLAYER: PlayerIndex = 0;

/// Which half of a set result is being entered.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    Won,
    Lost,
}

/// One player's result within one set.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub won: u32,
    pub lost: u32,
    /// Always `won - lost`; kept in the struct because the stored format carries it.
    #[serde(default)]
    pub sum: i64,
    /// For the reference player: on the flagged side. For others: holds a team slot.
    #[serde(default)]
    pub team: bool,
}

impl SetScore {
    /// Set won/lost and derive the sum from them.
    pub fn set_result(&mut self, won: u32, lost: u32) {
        self.won = won;
        self.lost = lost;
        self.refresh_sum();
    }

    /// Zero the result, keeping the team flag.
    pub fn clear_result(&mut self) {
        self.set_result(0, 0);
    }

    pub fn refresh_sum(&mut self) {
        self.sum = i64::from(self.won) - i64::from(self.lost);
    }
}

/// A player in the match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Sanitized display name (HTML metacharacters escaped).
    #[serde(default)]
    pub name: String,
    pub sets: [SetScore; NUM_SETS],
    /// Sum of `sets[..].sum`.
    #[serde(default)]
    pub total: i64,
}

impl Player {
    /// Create an unnamed player with every set zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, set_index: SetIndex) -> &SetScore {
        &self.sets[set_index]
    }

    pub fn set_mut(&mut self, set_index: SetIndex) -> &mut SetScore {
        &mut self.sets[set_index]
    }

    /// Whether this player is flagged as a team member in the given set.
    pub fn on_team(&self, set_index: SetIndex) -> bool {
        self.sets[set_index].team
    }

    /// Recompute `total` from the per-set sums.
    pub fn refresh_total(&mut self) {
        self.total = self.sets.iter().map(|s| s.sum).sum();
    }
}
