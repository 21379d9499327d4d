//! Plane launches, targeting and landings.
//!
//! A launch has three steps:
//!
//! 1. The launch plus hits the plane's cell and its four neighbors. Normal
//!    pieces there die immediately, specials are marked into the chain, and
//!    planes that haven't flown yet take off themselves.
//! 2. The plane detaches from the grid.
//! 3. A target is picked and the flight is queued. Flights land only once
//!    the activation queue is empty.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Color, PieceId, Pos, SpecialKind};
use crate::events::BoardEvent;

use super::area;
use super::wave::{Flight, Impact, Wave};

/// Whether a plane's target must differ from every other plane's target in
/// the same action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPolicy {
    /// Skip reserved targets and reserve the pick.
    Unique,
    /// Ignore reservations.
    Shared,
}

impl Wave<'_> {
    /// Choose a plane target.
    ///
    /// Candidates are unmarked pieces that are not launched planes (and not
    /// reserved, under [`TargetPolicy::Unique`]). Pieces of a preferred
    /// color are chosen first when any exist.
    pub fn pick_target(&mut self, policy: TargetPolicy) -> Option<Pos> {
        let candidates: Vec<(PieceId, Pos, Color)> = self
            .grid
            .pieces()
            .filter(|p| !p.marked)
            .filter(|p| !self.action.planes_launched.contains(&p.id))
            .filter(|p| policy == TargetPolicy::Shared || !self.action.reserved_targets.contains(&p.id))
            .map(|p| (p.id, p.pos, p.color))
            .collect();

        let hinted: Vec<_> = candidates
            .iter()
            .copied()
            .filter(|(_, _, color)| self.preferred.contains(color))
            .collect();
        let pool = if hinted.is_empty() { candidates } else { hinted };

        let &(id, pos, _) = self.rng.choose(&pool)?;
        if policy == TargetPolicy::Unique {
            self.action.reserved_targets.insert(id);
        }
        Some(pos)
    }

    /// Launch the plane at `from`.
    ///
    /// The caller is responsible for checking (or deliberately pre-setting)
    /// the launched set; this always registers the plane and takes off.
    pub(crate) fn launch_plane(&mut self, from: Pos, policy: TargetPolicy, impact: Impact) {
        let Some(plane_id) = self.grid.get(from).filter(|p| p.special == SpecialKind::Plane).map(|p| p.id) else {
            return;
        };
        self.action.planes_launched.insert(plane_id);
        self.visited.insert(plane_id);

        for cell in from.plus().into_iter().skip(1) {
            self.launch_plus_hit(cell);
        }

        let Some(plane) = self.grid.take(from) else {
            return;
        };
        let target = self.pick_target(policy);

        trace!(plane = %plane.id, %from, ?target, "plane launched");
        self.events.push(BoardEvent::PlaneLaunched {
            id: plane.id,
            from,
            target,
        });
        self.flights.push_back(Flight {
            plane,
            from,
            target,
            impact,
        });
    }

    fn launch_plus_hit(&mut self, cell: Pos) {
        let Some((id, special)) = self
            .grid
            .get(cell)
            .map(|p| (p.id, p.special))
        else {
            return;
        };

        match special {
            SpecialKind::None => self.destroy_now(cell),
            SpecialKind::Plane => {
                if !self.action.planes_launched.contains(&id) {
                    self.launch_plane(cell, TargetPolicy::Unique, Impact::Single);
                }
            }
            _ => self.mark(cell),
        }
    }

    /// Land the next plane in the air. Returns `false` when none is flying.
    pub(crate) fn land_next_flight(&mut self) -> bool {
        let Some(flight) = self.flights.pop_front() else {
            return false;
        };

        trace!(plane = %flight.plane.id, target = ?flight.target, "plane landed");
        self.events.push(BoardEvent::PlaneLanded {
            id: flight.plane.id,
            at: flight.target,
        });

        if let Some(target) = flight.target {
            self.mark(target);
            match flight.impact {
                Impact::Single => {}
                Impact::Line => {
                    let cells = if self.rng.coin() {
                        area::row(self.grid, target.y)
                    } else {
                        area::column(self.grid, target.x)
                    };
                    self.mark_all(cells);
                }
                Impact::Blast => {
                    let cells = area::square(self.grid, target, 1);
                    self.mark_all(cells);
                }
            }
        }

        let resting = flight.target.unwrap_or(flight.from);
        self.record_destroyed(&flight.plane, resting);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;
    use crate::core::{BoardConfig, GameRng};
    use crate::specials::ActionState;

    fn launches(events: &[BoardEvent]) -> Vec<Option<Pos>> {
        events
            .iter()
            .filter_map(|e| match e {
                BoardEvent::PlaneLaunched { target, .. } => Some(*target),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_launch_plus_destroys_neighbors() {
        let mut grid = Grid::parse(&[
            "0 1 2",
            "3 4P 0",
            "1 2 3",
        ]).unwrap();
        let mut rng = GameRng::new(11);
        let config = BoardConfig::default();
        let mut action = ActionState::default();
        let mut events = Vec::new();

        let mut wave = Wave::new(&mut grid, &mut rng, &config, &mut action, &[], &mut events);
        wave.launch_plane(Pos::new(1, 1), TargetPolicy::Unique, Impact::Single);
        let batch = wave.finish();

        // 4 neighbors, the plane itself, and its target
        assert_eq!(batch.len(), 6);
        assert_eq!(grid.occupied_count(), 3);
        assert!(grid.get(Pos::new(1, 1)).is_none());
        assert_eq!(launches(&events).len(), 1);
    }

    #[test]
    fn test_plane_in_plus_launches_instead_of_dying() {
        let mut grid = Grid::parse(&[
            "0 1 2 3",
            "3 4P 0P 1",
            "1 2 3 0",
        ]).unwrap();
        let mut rng = GameRng::new(5);
        let config = BoardConfig::default();
        let mut action = ActionState::default();
        let mut events = Vec::new();

        let mut wave = Wave::new(&mut grid, &mut rng, &config, &mut action, &[], &mut events);
        wave.launch_plane(Pos::new(1, 1), TargetPolicy::Unique, Impact::Single);
        wave.finish();

        let targets = launches(&events);
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(Option::is_some));
        assert_ne!(targets[0], targets[1]);
        assert_eq!(action.planes_launched.len(), 2);
    }

    #[test]
    fn test_preferred_color_wins() {
        let mut grid = Grid::parse(&[
            "0 1 0 1 0",
            "1 0 1 0 1",
            "0 1 0 5 0",
        ]).unwrap();
        let mut rng = GameRng::new(8);
        let config = BoardConfig::default();
        let mut action = ActionState::default();
        let mut events = Vec::new();
        let preferred = [Color::new(5)];

        let mut wave = Wave::new(&mut grid, &mut rng, &config, &mut action, &preferred, &mut events);
        assert_eq!(wave.pick_target(TargetPolicy::Unique), Some(Pos::new(3, 0)));

        // Reserved now; unique picks fall back to the full pool
        let next = wave.pick_target(TargetPolicy::Unique);
        assert!(next.is_some());
        assert_ne!(next, Some(Pos::new(3, 0)));

        assert_eq!(wave.pick_target(TargetPolicy::Shared), Some(Pos::new(3, 0)));
    }

    #[test]
    fn test_no_candidate_fizzles() {
        let mut grid = Grid::parse(&["1P"]).unwrap();
        let mut rng = GameRng::new(1);
        let config = BoardConfig::default();
        let mut action = ActionState::default();
        let mut events = Vec::new();

        let mut wave = Wave::new(&mut grid, &mut rng, &config, &mut action, &[], &mut events);
        wave.launch_plane(Pos::new(0, 0), TargetPolicy::Shared, Impact::Single);
        let batch = wave.finish();

        assert_eq!(batch.len(), 1);
        assert!(batch[0].was_special());
        assert!(events.contains(&BoardEvent::PlaneLanded { id: batch[0].id, at: None }));
    }
}
