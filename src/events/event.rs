//! Board events.
//!
//! The engine never animates anything. Every state change is reported as
//! a `BoardEvent`, in the order it happened, and the presentation layer
//! schedules its own visuals from that stream.

use serde::{Deserialize, Serialize};

use crate::core::{Color, Piece, PieceId, Pos, SpecialKind};

/// One discrete change to the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// A new piece appeared (initial fill or refill).
    Spawned { id: PieceId, pos: Pos, color: Color },

    /// A piece fell to a new cell during collapse.
    Moved { id: PieceId, from: Pos, to: Pos },

    /// A player swap was committed.
    SwapAccepted { a: Pos, b: Pos },

    /// A player swap was refused; the board is unchanged.
    SwapRejected { a: Pos, b: Pos },

    /// A special was tapped and will resolve in the next wave.
    ActivationAccepted { pos: Pos },

    /// A piece became (or was converted into) a special.
    Promoted { id: PieceId, pos: Pos, kind: SpecialKind },

    /// A piece left the board for good.
    Destroyed { id: PieceId, pos: Pos, color: Color, special: SpecialKind },

    /// A plane detached from `from` and is flying toward `target`.
    ///
    /// `target` is `None` when no candidate existed; the plane fizzles.
    PlaneLaunched { id: PieceId, from: Pos, target: Option<Pos> },

    /// A plane reached its destination.
    PlaneLanded { id: PieceId, at: Option<Pos> },

    /// The cascade finished and the board accepts input again.
    Settled,
}

/// A destroyed piece as reported to score and goal trackers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyedPiece {
    pub id: PieceId,
    pub color: Color,
    pub special: SpecialKind,
}

impl DestroyedPiece {
    /// Whether the destroyed piece was a special.
    #[must_use]
    pub fn was_special(&self) -> bool {
        self.special.is_special()
    }
}

impl From<&Piece> for DestroyedPiece {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id,
            color: piece.color,
            special: piece.special,
        }
    }
}
