//! Collaborator hooks.
//!
//! A session reports moves, destructions and settling to a [`GameHooks`]
//! implementation and asks it which colors planes should prefer. Every
//! method has a default, so collaborators implement only what they need.
//!
//! ## Implementation Notes
//!
//! - `on_pieces_destroyed`: called once per wave with the full batch, in
//!   destruction order; never called with an empty batch
//! - `preferred_target_colors`: read once per wave; order matters for a
//!   tapped disco ball, which clears the first hinted color still present
//! - `on_board_settled`: returning an outcome ends the game

use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::events::DestroyedPiece;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every goal was met.
    Won,
    /// The move budget ran out first.
    Lost,
}

/// Callbacks from the session to score, goal and UI collaborators.
pub trait GameHooks {
    /// A player action was committed and spent a move.
    fn on_move_consumed(&mut self) {}

    /// A plain swap produced no match and was reverted.
    fn on_swap_rejected(&mut self) {}

    /// Pieces left the board in one wave.
    fn on_pieces_destroyed(&mut self, _pieces: &[DestroyedPiece]) {}

    /// Colors planes should target first. Empty means no preference.
    fn preferred_target_colors(&self) -> Vec<Color> {
        Vec::new()
    }

    /// The cascade finished. Return an outcome to end the game.
    fn on_board_settled(&mut self) -> Option<GameOutcome> {
        None
    }
}

/// Hooks that ignore everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl GameHooks for NoHooks {}

impl<H: GameHooks + ?Sized> GameHooks for &mut H {
    fn on_move_consumed(&mut self) {
        (**self).on_move_consumed();
    }

    fn on_swap_rejected(&mut self) {
        (**self).on_swap_rejected();
    }

    fn on_pieces_destroyed(&mut self, pieces: &[DestroyedPiece]) {
        (**self).on_pieces_destroyed(pieces);
    }

    fn preferred_target_colors(&self) -> Vec<Color> {
        (**self).preferred_target_colors()
    }

    fn on_board_settled(&mut self) -> Option<GameOutcome> {
        (**self).on_board_settled()
    }
}
