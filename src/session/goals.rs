//! Level goals and the default level tracker.
//!
//! A level is a move budget plus per-color destruction targets. Counters
//! clamp at their targets. The outcome is decided when the board settles:
//! all goals met wins (even on the last move), otherwise an exhausted move
//! budget loses.
//!
//! ```
//! use match3_core::core::Color;
//! use match3_core::session::{ColorGoal, LevelConfig, LevelGoals};
//!
//! let config = LevelConfig::new(30).with_goal(ColorGoal::new(Color::new(2), 15));
//! let goals = LevelGoals::new(&config);
//!
//! assert_eq!(goals.moves_left(), 30);
//! assert_eq!(goals.unmet_colors(), vec![Color::new(2)]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::Color;
use crate::events::DestroyedPiece;

use super::hooks::{GameHooks, GameOutcome};
use super::score::ScoreTracker;

/// Destroy `target` pieces of `color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorGoal {
    pub color: Color,
    pub target: u32,
}

impl ColorGoal {
    /// Create a goal.
    #[must_use]
    pub const fn new(color: Color, target: u32) -> Self {
        Self { color, target }
    }
}

/// Static description of a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Moves available.
    pub move_limit: u32,
    /// Color objectives, in hint priority order.
    pub goals: Vec<ColorGoal>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            move_limit: 220,
            goals: vec![
                ColorGoal::new(Color::new(5), 100),
                ColorGoal::new(Color::new(1), 100),
            ],
        }
    }
}

impl LevelConfig {
    /// A level with the given move budget and no goals.
    #[must_use]
    pub fn new(move_limit: u32) -> Self {
        Self {
            move_limit,
            goals: Vec::new(),
        }
    }

    /// Add a color objective (builder pattern).
    #[must_use]
    pub fn with_goal(mut self, goal: ColorGoal) -> Self {
        self.goals.push(goal);
        self
    }
}

/// Progress toward a level's goals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGoals {
    goals: Vec<ColorGoal>,
    counts: Vec<u32>,
    moves_left: u32,
}

impl LevelGoals {
    /// Fresh progress for a level.
    #[must_use]
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            goals: config.goals.clone(),
            counts: vec![0; config.goals.len()],
            moves_left: config.move_limit,
        }
    }

    /// Moves remaining.
    #[must_use]
    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Destroyed count toward the goal for `color`, if there is one.
    #[must_use]
    pub fn progress(&self, color: Color) -> Option<u32> {
        self.goals
            .iter()
            .position(|g| g.color == color)
            .map(|i| self.counts[i])
    }

    /// Whether every goal is met.
    #[must_use]
    pub fn all_met(&self) -> bool {
        self.goals
            .iter()
            .zip(&self.counts)
            .all(|(goal, &count)| count >= goal.target)
    }

    /// Colors whose goal is still open, in goal order.
    #[must_use]
    pub fn unmet_colors(&self) -> Vec<Color> {
        self.goals
            .iter()
            .zip(&self.counts)
            .filter(|(goal, count)| **count < goal.target)
            .map(|(goal, _)| goal.color)
            .collect()
    }

    /// Spend one move. Saturates at zero.
    pub fn register_move(&mut self) {
        self.moves_left = self.moves_left.saturating_sub(1);
    }

    /// Count a destroyed piece toward its color's goal.
    pub fn register_destroyed(&mut self, color: Color) {
        for (goal, count) in self.goals.iter().zip(self.counts.iter_mut()) {
            if goal.color == color {
                *count = (*count + 1).min(goal.target);
            }
        }
    }

    /// Outcome if the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.all_met() {
            Some(GameOutcome::Won)
        } else if self.moves_left == 0 {
            Some(GameOutcome::Lost)
        } else {
            None
        }
    }
}

impl GameHooks for LevelGoals {
    fn on_move_consumed(&mut self) {
        self.register_move();
    }

    fn on_pieces_destroyed(&mut self, pieces: &[DestroyedPiece]) {
        for piece in pieces {
            self.register_destroyed(piece.color);
        }
    }

    fn preferred_target_colors(&self) -> Vec<Color> {
        self.unmet_colors()
    }

    fn on_board_settled(&mut self) -> Option<GameOutcome> {
        self.outcome()
    }
}

/// Score and goals together: the standard level collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTracker {
    pub score: ScoreTracker,
    pub goals: LevelGoals,
}

impl LevelTracker {
    /// Tracker for the given level.
    #[must_use]
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            score: ScoreTracker::new(),
            goals: LevelGoals::new(config),
        }
    }
}

impl Default for LevelTracker {
    fn default() -> Self {
        Self::new(&LevelConfig::default())
    }
}

impl GameHooks for LevelTracker {
    fn on_move_consumed(&mut self) {
        self.score.on_move_consumed();
        self.goals.on_move_consumed();
    }

    fn on_swap_rejected(&mut self) {
        self.score.on_swap_rejected();
    }

    fn on_pieces_destroyed(&mut self, pieces: &[DestroyedPiece]) {
        self.score.on_pieces_destroyed(pieces);
        self.goals.on_pieces_destroyed(pieces);
    }

    fn preferred_target_colors(&self) -> Vec<Color> {
        self.goals.preferred_target_colors()
    }

    fn on_board_settled(&mut self) -> Option<GameOutcome> {
        self.score.on_board_settled();
        let outcome = self.goals.on_board_settled();
        if let Some(outcome) = outcome {
            info!(?outcome, score = self.score.score(), "level finished");
        }
        outcome
    }
}
