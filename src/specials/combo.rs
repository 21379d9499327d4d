//! Special swaps.
//!
//! When a swap involves at least one special, the pair is classified into
//! a [`ComboKind`] by a priority-ordered table and resolved as a unit. The
//! swap position is the cell piece A occupies after the swap.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PieceId, Pos, SpecialKind};

use super::area;
use super::targeting::TargetPolicy;
use super::wave::{Impact, Wave};

/// How a swapped pair resolves, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComboKind {
    /// Clears the whole board.
    DiscoDisco,
    /// Converts pieces of the plane's color into planes and launches them.
    DiscoPlane,
    /// Converts pieces of the partner's color into its kind (rocket or bomb).
    DiscoSpecial,
    /// Clears every normal piece of the partner's color.
    DiscoNormal,
    /// Two planes, two unique targets.
    PlanePlane,
    /// The plane lands as a row or column clear.
    PlaneRocket,
    /// The plane lands as a 3x3 blast.
    PlaneBomb,
    /// Three rows and three columns.
    RocketRocket,
    /// A 5x5 blast.
    BombBomb,
    /// Three rows and three columns.
    BombRocket,
    /// Each special activates on its own.
    Single,
}

impl ComboKind {
    /// Classify a swapped pair. The table is symmetric in A and B.
    #[must_use]
    pub fn classify(a: SpecialKind, b: SpecialKind) -> Self {
        use SpecialKind::{Bomb, DiscoBall, Plane};

        let either = |k: SpecialKind| a == k || b == k;
        let both = |k: SpecialKind| a == k && b == k;

        if both(DiscoBall) {
            ComboKind::DiscoDisco
        } else if either(DiscoBall) && either(Plane) {
            ComboKind::DiscoPlane
        } else if either(DiscoBall) && (a.is_rocket() || b.is_rocket() || either(Bomb)) {
            ComboKind::DiscoSpecial
        } else if either(DiscoBall) {
            ComboKind::DiscoNormal
        } else if both(Plane) {
            ComboKind::PlanePlane
        } else if either(Plane) && (a.is_rocket() || b.is_rocket()) {
            ComboKind::PlaneRocket
        } else if either(Plane) && either(Bomb) {
            ComboKind::PlaneBomb
        } else if a.is_rocket() && b.is_rocket() {
            ComboKind::RocketRocket
        } else if both(Bomb) {
            ComboKind::BombBomb
        } else if either(Bomb) && (a.is_rocket() || b.is_rocket()) {
            ComboKind::BombRocket
        } else {
            ComboKind::Single
        }
    }
}

struct Pair {
    id: PieceId,
    pos: Pos,
    kind: SpecialKind,
}

impl Wave<'_> {
    fn pair_member(&self, id: PieceId) -> Option<Pair> {
        let pos = self.grid.find(id)?;
        let kind = self.grid.get(pos)?.special;
        Some(Pair { id, pos, kind })
    }

    /// Resolve a committed special swap of pieces `a` and `b`.
    ///
    /// Returns the combo that fired, or `None` if either piece is gone.
    pub fn resolve_swap(&mut self, a: PieceId, b: PieceId) -> Option<ComboKind> {
        let first = self.pair_member(a)?;
        let second = self.pair_member(b)?;
        let combo = ComboKind::classify(first.kind, second.kind);
        debug!(?combo, a = %first.pos, b = %second.pos, "special swap");

        // The partner of the disco / plane, whichever side it is on
        let (disco, other) = if first.kind == SpecialKind::DiscoBall {
            (&first, &second)
        } else {
            (&second, &first)
        };
        let (plane, partner) = if first.kind == SpecialKind::Plane {
            (&first, &second)
        } else {
            (&second, &first)
        };
        let center = first.pos;

        match combo {
            ComboKind::DiscoDisco => {
                self.action.discos_consumed.insert(first.id);
                self.action.discos_consumed.insert(second.id);
                let cells: Vec<Pos> = self.grid.positions().collect();
                self.mark_all(cells);
            }
            ComboKind::DiscoPlane => {
                // The swapped plane goes down with the disco instead of flying
                self.action.discos_consumed.insert(disco.id);
                self.action.planes_launched.insert(plane.id);
                self.disco_plane(plane.pos);
                self.mark(disco.pos);
                self.mark(plane.pos);
            }
            ComboKind::DiscoSpecial => {
                self.action.discos_consumed.insert(disco.id);
                self.disco_transform(other.pos, other.kind);
                self.mark(disco.pos);
                self.mark(other.pos);
            }
            ComboKind::DiscoNormal => {
                self.action.discos_consumed.insert(disco.id);
                if let Some(color) = self.grid.get(other.pos).map(|p| p.color) {
                    self.mark_normals_of(color);
                }
                self.mark(disco.pos);
                self.mark(other.pos);
            }
            ComboKind::PlanePlane => {
                self.action.planes_launched.insert(first.id);
                self.action.planes_launched.insert(second.id);
                self.launch_plane(first.pos, TargetPolicy::Unique, Impact::Single);
                self.launch_plane(second.pos, TargetPolicy::Unique, Impact::Single);
            }
            ComboKind::PlaneRocket => {
                self.launch_plane(plane.pos, TargetPolicy::Shared, Impact::Line);
                self.mark(partner.pos);
            }
            ComboKind::PlaneBomb => {
                self.launch_plane(plane.pos, TargetPolicy::Shared, Impact::Blast);
                self.mark(partner.pos);
            }
            ComboKind::RocketRocket | ComboKind::BombRocket => {
                let cells = area::thick_cross(self.grid, center);
                self.mark_all(cells);
                self.mark(first.pos);
                self.mark(second.pos);
            }
            ComboKind::BombBomb => {
                let cells = area::square(self.grid, center, 2);
                self.mark_all(cells);
                self.mark(first.pos);
                self.mark(second.pos);
            }
            ComboKind::Single => {
                for member in [&first, &second] {
                    if member.kind.is_special() {
                        self.activate_single(member.id, TargetPolicy::Shared);
                    }
                }
            }
        }

        Some(combo)
    }

    /// Turn up to `plane_flight_cap` normal pieces of the plane's color into
    /// planes, register them all as launched, then fly each to a unique
    /// target.
    fn disco_plane(&mut self, plane_pos: Pos) {
        let Some(color) = self.grid.get(plane_pos).map(|p| p.color) else {
            return;
        };

        let recruits: Vec<Pos> = self
            .grid
            .pieces()
            .filter(|p| !p.is_special() && p.color == color)
            .map(|p| p.pos)
            .take(self.config.plane_flight_cap)
            .collect();

        let mut fleet = Vec::with_capacity(recruits.len());
        for pos in recruits {
            if let Some(id) = self.convert(pos, SpecialKind::Plane) {
                self.action.planes_launched.insert(id);
                fleet.push((id, pos));
            }
        }

        for (id, pos) in fleet {
            // A plane caught in an earlier plus is already in the air
            if self.grid.holds(pos, id) {
                self.launch_plane(pos, TargetPolicy::Unique, Impact::Single);
            }
        }
    }

    /// Turn every non-disco piece of the partner's color into the partner's
    /// kind, then mark all of that color.
    fn disco_transform(&mut self, partner_pos: Pos, kind: SpecialKind) {
        let Some(color) = self.grid.get(partner_pos).map(|p| p.color) else {
            return;
        };

        let members: Vec<(Pos, SpecialKind)> = self
            .grid
            .pieces()
            .filter(|p| p.color == color && p.special != SpecialKind::DiscoBall)
            .map(|p| (p.pos, p.special))
            .collect();

        for (pos, current) in members {
            let new_kind = if kind.is_rocket() {
                SpecialKind::rocket(self.rng.coin())
            } else {
                kind
            };
            if new_kind != current {
                self.convert(pos, new_kind);
            }
        }

        let colored: Vec<Pos> = self
            .grid
            .pieces()
            .filter(|p| p.color == color)
            .map(|p| p.pos)
            .collect();
        self.mark_all(colored);
    }
}
