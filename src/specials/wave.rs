//! Per-wave resolution context.
//!
//! A [`Wave`] borrows everything one removal wave touches: the grid, the
//! session RNG, the action-scoped reservation sets and the event sink. It
//! owns the state that must not outlive the wave:
//!
//! - the visited set (each special activates at most once per wave)
//! - the activation queue (FIFO, breadth-first)
//! - the flight queue (planes in the air, landed when activations run dry)
//! - pieces destroyed outside the final marked sweep
//!
//! Combos, the chain engine and plane targeting are all `impl Wave` blocks
//! in sibling modules, so they share these helpers.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::board::Grid;
use crate::core::{BoardConfig, Color, GameRng, Piece, PieceId, Pos, SpecialKind};
use crate::events::{BoardEvent, DestroyedPiece};
use crate::matching::MoveContext;

/// Bookkeeping scoped to one player action (swap or tap) and every wave
/// it cascades into.
#[derive(Clone, Debug, Default)]
pub struct ActionState {
    /// The pieces the player moved; host tie-break for promotions.
    pub context: MoveContext,
    /// Planes that already took off; none launches twice.
    pub planes_launched: FxHashSet<PieceId>,
    /// Pieces already chosen as a unique plane target.
    pub reserved_targets: FxHashSet<PieceId>,
    /// Disco balls spent by the swap itself; never enqueued by the chain.
    pub discos_consumed: FxHashSet<PieceId>,
}

impl ActionState {
    /// Fresh state for a new action.
    #[must_use]
    pub fn begin(context: MoveContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Forget everything, including the move context.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// What a landing plane does beyond hitting its target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Impact {
    /// Only the target cell.
    Single,
    /// Plane+Rocket: the target's row or column, picked at random.
    Line,
    /// Plane+Bomb: the 3x3 around the target.
    Blast,
}

/// A plane in the air.
#[derive(Clone, Debug)]
pub(crate) struct Flight {
    pub plane: Piece,
    pub from: Pos,
    pub target: Option<Pos>,
    pub impact: Impact,
}

/// Mutable context for one removal wave.
pub struct Wave<'a> {
    pub(super) grid: &'a mut Grid,
    pub(super) rng: &'a mut GameRng,
    pub(super) config: &'a BoardConfig,
    pub(super) action: &'a mut ActionState,
    pub(super) preferred: &'a [Color],
    pub(super) events: &'a mut Vec<BoardEvent>,
    pub(super) visited: FxHashSet<PieceId>,
    pub(super) queue: VecDeque<(PieceId, Pos)>,
    pub(super) flights: VecDeque<Flight>,
    destroyed: Vec<DestroyedPiece>,
}

impl<'a> Wave<'a> {
    /// Open a wave over the given session state.
    ///
    /// `preferred` is the plane-targeting color hint for this wave.
    pub fn new(
        grid: &'a mut Grid,
        rng: &'a mut GameRng,
        config: &'a BoardConfig,
        action: &'a mut ActionState,
        preferred: &'a [Color],
        events: &'a mut Vec<BoardEvent>,
    ) -> Self {
        Self {
            grid,
            rng,
            config,
            action,
            preferred,
            events,
            visited: FxHashSet::default(),
            queue: VecDeque::new(),
            flights: VecDeque::new(),
            destroyed: Vec::new(),
        }
    }

    /// Read access to the board mid-wave.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Mark the piece at `pos` for removal, enqueueing it if special.
    pub fn mark(&mut self, pos: Pos) {
        let Some(piece) = self.grid.get_mut(pos) else {
            return;
        };
        piece.marked = true;

        if piece.is_special() {
            let id = piece.id;
            self.enqueue(id, pos);
        }
    }

    /// Mark every cell in `cells`.
    pub fn mark_all(&mut self, cells: impl IntoIterator<Item = Pos>) {
        for pos in cells {
            self.mark(pos);
        }
    }

    /// Queue a special for activation, unless it already activated this
    /// wave or is a disco the swap consumed.
    pub fn enqueue(&mut self, id: PieceId, pos: Pos) {
        if self.visited.contains(&id) || self.action.discos_consumed.contains(&id) {
            return;
        }
        trace!(piece = %id, %pos, "special enqueued");
        self.queue.push_back((id, pos));
    }

    /// Enqueue every marked special on the board.
    pub fn enqueue_marked_specials(&mut self) {
        let specials: Vec<(PieceId, Pos)> = self
            .grid
            .pieces()
            .filter(|p| p.marked && p.is_special())
            .map(|p| (p.id, p.pos))
            .collect();

        for (id, pos) in specials {
            self.enqueue(id, pos);
        }
    }

    /// Remove the piece at `pos` right now, outside the marked sweep.
    pub fn destroy_now(&mut self, pos: Pos) {
        if let Some(piece) = self.grid.take(pos) {
            self.record_destroyed(&piece, pos);
        }
    }

    /// Report a piece that has left the board.
    pub(super) fn record_destroyed(&mut self, piece: &Piece, pos: Pos) {
        self.events.push(BoardEvent::Destroyed {
            id: piece.id,
            pos,
            color: piece.color,
            special: piece.special,
        });
        self.destroyed.push(DestroyedPiece::from(piece));
    }

    /// Turn the piece at `pos` into a special, keeping its color.
    pub(super) fn convert(&mut self, pos: Pos, kind: SpecialKind) -> Option<PieceId> {
        let piece = self.grid.get_mut(pos)?;
        piece.special = kind;
        let id = piece.id;
        self.events.push(BoardEvent::Promoted { id, pos, kind });
        Some(id)
    }

    /// Run the chain to completion, then remove every marked piece.
    ///
    /// Returns the wave's destruction batch: immediate destructions (plane
    /// plus hits, landed planes) in the order they happened, followed by the
    /// marked sweep in column-major order.
    pub fn finish(mut self) -> Vec<DestroyedPiece> {
        self.enqueue_marked_specials();
        self.drain_chain();

        for pos in self.grid.marked_positions() {
            if let Some(piece) = self.grid.take(pos) {
                self.record_destroyed(&piece, pos);
            }
        }

        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        grid: Grid,
        rng: GameRng,
        config: BoardConfig,
        action: ActionState,
        events: Vec<BoardEvent>,
    }

    impl Fixture {
        fn new(rows: &[&str]) -> Self {
            Self {
                grid: Grid::parse(rows).unwrap(),
                rng: GameRng::new(3),
                config: BoardConfig::default(),
                action: ActionState::default(),
                events: Vec::new(),
            }
        }

        fn wave(&mut self) -> Wave<'_> {
            Wave::new(
                &mut self.grid,
                &mut self.rng,
                &self.config,
                &mut self.action,
                &[],
                &mut self.events,
            )
        }
    }

    #[test]
    fn test_mark_enqueues_specials_once() {
        let mut fx = Fixture::new(&["0 1B 2"]);
        let mut wave = fx.wave();

        wave.mark(Pos::new(1, 0));
        wave.mark(Pos::new(0, 0));
        assert_eq!(wave.queue.len(), 1);

        wave.visited.insert(wave.queue[0].0);
        wave.mark(Pos::new(1, 0));
        assert_eq!(wave.queue.len(), 1);
    }

    #[test]
    fn test_consumed_disco_not_enqueued() {
        let mut fx = Fixture::new(&["0 1D 2"]);
        let disco = fx.grid.get(Pos::new(1, 0)).unwrap().id;
        fx.action.discos_consumed.insert(disco);

        let mut wave = fx.wave();
        wave.mark(Pos::new(1, 0));
        assert!(wave.queue.is_empty());
        assert!(wave.grid().get(Pos::new(1, 0)).unwrap().marked);
    }

    #[test]
    fn test_finish_orders_immediate_before_sweep() {
        let mut fx = Fixture::new(&["0 1 2 3"]);
        let ids: Vec<_> = fx.grid.pieces().map(|p| p.id).collect();

        let mut wave = fx.wave();
        wave.mark(Pos::new(0, 0));
        wave.destroy_now(Pos::new(3, 0));
        wave.mark(Pos::new(1, 0));
        let batch = wave.finish();

        let order: Vec<_> = batch.iter().map(|d| d.id).collect();
        assert_eq!(order, vec![ids[3], ids[0], ids[1]]);
        assert_eq!(fx.grid.occupied_count(), 1);
        assert_eq!(fx.events.len(), 3);
    }

    #[test]
    fn test_removed_piece_reported_once() {
        let mut fx = Fixture::new(&["0 1B 2"]);

        let mut wave = fx.wave();
        wave.destroy_now(Pos::new(0, 0));
        wave.destroy_now(Pos::new(0, 0));
        wave.mark(Pos::new(0, 0));
        assert!(wave.queue.is_empty());

        // A bomb hit twice is still one activation and one removal
        wave.mark(Pos::new(1, 0));
        wave.mark(Pos::new(1, 0));
        let batch = wave.finish();

        let mut ids: Vec<_> = batch.iter().map(|d| d.id).collect();
        let reported = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), reported);
        assert_eq!(reported, 3);
        assert_eq!(fx.grid.occupied_count(), 0);
    }

    #[test]
    fn test_action_state_clear() {
        let mut state = ActionState::begin(MoveContext::tap(PieceId(1)));
        state.planes_launched.insert(PieceId(2));
        state.clear();

        assert_eq!(state.context, MoveContext::default());
        assert!(state.planes_launched.is_empty());
    }
}
