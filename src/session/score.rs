//! Combo-multiplied scoring.

use serde::{Deserialize, Serialize};

use crate::events::DestroyedPiece;

use super::hooks::{GameHooks, GameOutcome};

/// Points per destroyed piece, before the combo multiplier.
const BASE_POINTS: u64 = 10;

/// Flat bonus per destroyed piece.
const BONUS_POINTS: u64 = 1;

/// Running score with a combo multiplier.
///
/// The multiplier starts at 1, grows by one for every consumed move and
/// every destruction batch, and drops back to 1 when the board settles or
/// a swap is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
    combo: u64,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self { score: 0, combo: 1 }
    }
}

impl ScoreTracker {
    /// Create a tracker at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total points so far.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current multiplier.
    #[must_use]
    pub fn combo(&self) -> u64 {
        self.combo
    }

    /// Bump the multiplier.
    pub fn increase_combo(&mut self) {
        self.combo += 1;
    }

    /// Drop the multiplier back to 1.
    pub fn reset_combo(&mut self) {
        self.combo = 1;
    }

    /// Score a batch of `count` destroyed pieces.
    pub fn register_batch(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.increase_combo();
        let count = count as u64;
        self.score += (count * BASE_POINTS + count * BONUS_POINTS) * self.combo;
    }
}

impl GameHooks for ScoreTracker {
    fn on_move_consumed(&mut self) {
        self.increase_combo();
    }

    fn on_swap_rejected(&mut self) {
        self.reset_combo();
    }

    fn on_pieces_destroyed(&mut self, pieces: &[DestroyedPiece]) {
        self.register_batch(pieces.len());
    }

    fn on_board_settled(&mut self) -> Option<GameOutcome> {
        self.reset_combo();
        None
    }
}
