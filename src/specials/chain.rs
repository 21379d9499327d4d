//! Chain reactions.
//!
//! Specials hit by other specials activate breadth-first. The activation
//! queue is drained first; when it runs dry one plane lands (which may
//! enqueue more), and the chain ends when both queues are empty.

use tracing::trace;

use crate::core::{Color, PieceId, Pos, SpecialKind};

use super::area;
use super::targeting::TargetPolicy;
use super::wave::{Impact, Wave};

impl Wave<'_> {
    /// Resolve every pending activation and flight.
    pub fn drain_chain(&mut self) {
        loop {
            while let Some((id, pos)) = self.queue.pop_front() {
                if !self.visited.insert(id) {
                    continue;
                }
                if !self.grid.holds(pos, id) {
                    continue;
                }
                trace!(piece = %id, %pos, "chain activation");
                self.detonate(pos, TargetPolicy::Unique, None);
            }

            if !self.land_next_flight() {
                break;
            }
        }
    }

    /// Apply the single-piece effect of the special at `pos`.
    ///
    /// `plane_policy` governs the target of a plane; `disco_color` fixes the
    /// color a disco ball clears, otherwise the random color search runs.
    pub(super) fn detonate(&mut self, pos: Pos, plane_policy: TargetPolicy, disco_color: Option<Color>) {
        let Some((id, kind)) = self.grid.get(pos).map(|p| (p.id, p.special)) else {
            return;
        };

        match kind {
            SpecialKind::None => {}
            SpecialKind::Plane => {
                if !self.action.planes_launched.contains(&id) {
                    self.launch_plane(pos, plane_policy, Impact::Single);
                }
            }
            SpecialKind::RocketHorizontal => {
                let cells = area::row(self.grid, pos.y);
                self.mark_all(cells);
            }
            SpecialKind::RocketVertical => {
                let cells = area::column(self.grid, pos.x);
                self.mark_all(cells);
            }
            SpecialKind::Bomb => {
                let cells = area::square(self.grid, pos, 1);
                self.mark_all(cells);
            }
            SpecialKind::DiscoBall => {
                self.mark(pos);
                let color = match disco_color {
                    Some(color) => color,
                    None => self.search_disco_color(),
                };
                self.mark_normals_of(color);
                self.enqueue_marked_specials();
            }
        }
    }

    /// Draw a palette color, redrawing up to `disco_color_attempts` times
    /// while it is absent from the board's normal pieces. On exhaustion the
    /// last draw is used, which may clear nothing.
    fn search_disco_color(&mut self) -> Color {
        let palette = self.config.palette();
        let mut color = self.rng.color(palette);

        for _ in 0..self.config.disco_color_attempts {
            if self.grid.has_normal_of_color(color) {
                break;
            }
            color = self.rng.color(palette);
        }

        trace!(%color, "disco color chosen");
        color
    }

    /// Mark every normal piece of `color`.
    pub(super) fn mark_normals_of(&mut self, color: Color) {
        let cells: Vec<Pos> = self
            .grid
            .pieces()
            .filter(|p| !p.is_special() && p.color == color)
            .map(|p| p.pos)
            .collect();
        self.mark_all(cells);
    }

    /// Activate one special outside the chain (a tap, or a special swapped
    /// with a normal piece). The piece can't activate again this wave.
    pub fn activate_single(&mut self, id: PieceId, policy: TargetPolicy) {
        let Some(pos) = self.grid.find(id) else {
            return;
        };
        self.visited.insert(id);
        self.mark(pos);
        self.detonate(pos, policy, None);
    }

    /// Activate a tapped disco ball.
    ///
    /// The first preferred color still present on the board wins; otherwise
    /// a random color among the normal pieces is cleared. The disco is
    /// consumed and never re-enters the chain.
    pub fn activate_tapped_disco(&mut self, id: PieceId) {
        let Some(pos) = self.grid.find(id) else {
            return;
        };
        self.action.discos_consumed.insert(id);

        let hinted = self
            .preferred
            .iter()
            .copied()
            .find(|&c| self.grid.has_normal_of_color(c));

        let color = match hinted {
            Some(color) => Some(color),
            None => {
                let mut present: Vec<Color> = self
                    .grid
                    .pieces()
                    .filter(|p| !p.is_special())
                    .map(|p| p.color)
                    .collect();
                present.sort_unstable();
                present.dedup();
                self.rng.choose(&present).copied()
            }
        };

        self.mark(pos);
        if let Some(color) = color {
            self.detonate(pos, TargetPolicy::Shared, Some(color));
        }
    }
}
