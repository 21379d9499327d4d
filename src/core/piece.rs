//! Pieces: the units that occupy board cells.
//!
//! Every piece has a stable [`PieceId`] for the lifetime of the board, a
//! palette [`Color`], and a [`SpecialKind`]. Specials keep the color of the
//! piece they were promoted from, which matters for disco combos and plane
//! targeting.

use serde::{Deserialize, Serialize};

use super::Pos;

/// Unique identifier for a piece.
///
/// Allocated by the grid in spawn order and never reused, so per-action
/// bookkeeping (launched planes, reserved targets) can refer to pieces
/// across collapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// Palette index of a piece.
///
/// The engine doesn't interpret colors beyond equality - the presentation
/// layer maps them to sprites and level goals map them to objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color(pub u8);

impl Color {
    /// Create a new color.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw palette index.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color({})", self.0)
    }
}

/// What a piece does when activated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    /// A plain colored piece.
    #[default]
    None,
    /// Clears its 3x3 neighborhood.
    Bomb,
    /// Clears its row.
    RocketHorizontal,
    /// Clears its column.
    RocketVertical,
    /// Clears every normal piece of one color.
    DiscoBall,
    /// Flies to a target and destroys it.
    Plane,
}

impl SpecialKind {
    /// True for anything but [`SpecialKind::None`].
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, SpecialKind::None)
    }

    /// True for either rocket orientation.
    #[must_use]
    pub const fn is_rocket(self) -> bool {
        matches!(self, SpecialKind::RocketHorizontal | SpecialKind::RocketVertical)
    }

    /// Rocket kind for the given orientation.
    #[must_use]
    pub const fn rocket(horizontal: bool) -> Self {
        if horizontal {
            SpecialKind::RocketHorizontal
        } else {
            SpecialKind::RocketVertical
        }
    }
}

/// A piece and its per-wave removal mark.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub special: SpecialKind,
    /// Authoritative only while the piece is on the grid.
    pub pos: Pos,
    /// Marked for removal in the current wave.
    pub marked: bool,
}

impl Piece {
    /// Create a normal piece.
    #[must_use]
    pub fn new(id: PieceId, color: Color, pos: Pos) -> Self {
        Self {
            id,
            color,
            special: SpecialKind::None,
            pos,
            marked: false,
        }
    }

    /// Set the special kind (builder pattern).
    #[must_use]
    pub fn with_special(mut self, special: SpecialKind) -> Self {
        self.special = special;
        self
    }

    /// Whether this piece is special.
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.special.is_special()
    }

    /// Whether this piece can take part in a line or square match.
    ///
    /// Specials are never absorbed into plain runs.
    #[must_use]
    pub fn is_matchable(&self) -> bool {
        !self.is_special()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_kind_flags() {
        assert!(!SpecialKind::None.is_special());
        assert!(SpecialKind::Bomb.is_special());
        assert!(SpecialKind::RocketVertical.is_rocket());
        assert!(!SpecialKind::Plane.is_rocket());
        assert_eq!(SpecialKind::rocket(true), SpecialKind::RocketHorizontal);
        assert_eq!(SpecialKind::rocket(false), SpecialKind::RocketVertical);
    }

    #[test]
    fn test_matchable() {
        let piece = Piece::new(PieceId(1), Color::new(2), Pos::new(0, 0));
        assert!(piece.is_matchable());

        let special = piece.with_special(SpecialKind::Bomb);
        assert!(!special.is_matchable());
    }

    #[test]
    fn test_piece_serde() {
        let piece = Piece::new(PieceId(7), Color::new(3), Pos::new(1, 2))
            .with_special(SpecialKind::DiscoBall);
        let json = serde_json::to_string(&piece).unwrap();
        let back: Piece = serde_json::from_str(&json).unwrap();
        assert_eq!(piece, back);
    }
}
