//! The board session and its move state machine.
//!
//! ```text
//! Idle ─swap─▶ Swapping ─special─▶ SpecialResolving ─step─▶ Cascading
//!                 │                                          ▲  │
//!                 ├─match───────▶ MatchResolving ─step───────┘  │ step (no match)
//!                 └─no match───▶ Idle (rejected)                ▼
//! Idle ─tap───────────────────▶ SpecialResolving             Idle (settled)
//! ```
//!
//! Requests validate and commit a player action; [`Session::step`] then
//! runs exactly one wave. The caller may animate between steps using the
//! events of each [`WaveReport`]. Nothing is ever resolved mid-wave from
//! outside.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::board::{collapse_and_refill, Grid};
use crate::core::{BoardConfig, ConfigError, GameRng, GameRngState, Piece, PieceId, Pos, SpecialKind};
use crate::events::{BoardEvent, DestroyedPiece};
use crate::matching::{scan, MoveContext};
use crate::specials::{promote_matches, ActionState, TargetPolicy, Wave};

use super::hooks::{GameHooks, GameOutcome, NoHooks};

/// Where the board is in its move cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardPhase {
    /// Accepting input.
    #[default]
    Idle,
    /// A swap is being validated.
    Swapping,
    /// A special swap or tap waits for its wave.
    SpecialResolving,
    /// A matching swap waits for its first wave.
    MatchResolving,
    /// Refilled board waits for the next scan.
    Cascading,
}

/// Why a player action was refused. The board is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("the board is still resolving")]
    Busy,
    #[error("the game is over")]
    GameOver,
    #[error("position is off the board")]
    OutOfBounds,
    #[error("cell is empty")]
    EmptyCell,
    #[error("cells are not orthogonally adjacent")]
    NotAdjacent,
    #[error("swap produces no match")]
    NoMatch,
    #[error("piece is not special")]
    NotSpecial,
}

/// Result of a player request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The action was committed and a move consumed.
    Accepted,
    /// The action was refused.
    Rejected(RejectReason),
}

impl ActionOutcome {
    /// Check if the action was committed.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, ActionOutcome::Accepted)
    }
}

/// Everything one [`Session::step`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaveReport {
    /// Phase the wave ran in.
    pub phase: BoardPhase,
    /// Events in order, including any buffered since the last step.
    pub events: Vec<BoardEvent>,
    /// The destruction batch handed to the hooks.
    pub destroyed: Vec<DestroyedPiece>,
    /// True if this step found no match and returned the board to idle.
    pub settled: bool,
    /// Set when settling ended the game.
    pub outcome: Option<GameOutcome>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingAction {
    Swap { a: PieceId, b: PieceId },
    Tap(PieceId),
}

/// One board and everything needed to play it.
pub struct Session<H: GameHooks = NoHooks> {
    config: BoardConfig,
    grid: Grid,
    rng: GameRng,
    hooks: H,
    phase: BoardPhase,
    action: ActionState,
    pending: Option<PendingAction>,
    events: Vec<BoardEvent>,
    outcome: Option<GameOutcome>,
}

impl<H: GameHooks> Session<H> {
    /// Create a session with a freshly generated, match-free board.
    ///
    /// The initial `Spawned` events are available from
    /// [`Session::take_events`] or the first step's report.
    pub fn new(config: BoardConfig, seed: u64, hooks: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        let mut session = Self::assemble(config, grid, seed, hooks);
        session.fill_initial();
        Ok(session)
    }

    /// Create a session over a prepared board.
    ///
    /// The board's dimensions replace those in `config`. The board is used
    /// as is, matches included; they resolve on the first swap's cascade.
    pub fn from_grid(mut config: BoardConfig, grid: Grid, seed: u64, hooks: H) -> Result<Self, ConfigError> {
        config.width = grid.width();
        config.height = grid.height();
        config.validate()?;
        Ok(Self::assemble(config, grid, seed, hooks))
    }

    fn assemble(config: BoardConfig, grid: Grid, seed: u64, hooks: H) -> Self {
        Self {
            config,
            grid,
            rng: GameRng::new(seed),
            hooks,
            phase: BoardPhase::Idle,
            action: ActionState::default(),
            pending: None,
            events: Vec::new(),
            outcome: None,
        }
    }

    /// Fill every cell, then re-roll matched cells until no match remains.
    fn fill_initial(&mut self) {
        let palette = self.config.palette();
        let positions: Vec<Pos> = self.grid.positions().collect();
        for pos in positions {
            let color = self.rng.color(palette);
            self.grid.spawn(pos, color);
        }

        let mut rerolls = 0;
        loop {
            let found = scan(&mut self.grid);
            if found.is_empty() {
                break;
            }
            rerolls += 1;
            for pos in found.marked {
                let color = self.rng.color(palette);
                if let Some(piece) = self.grid.get_mut(pos) {
                    piece.color = color;
                    piece.special = SpecialKind::None;
                    piece.marked = false;
                }
            }
        }
        debug!(rerolls, "initial board generated");

        for piece in self.grid.pieces() {
            self.events.push(BoardEvent::Spawned {
                id: piece.id,
                pos: piece.pos,
                color: piece.color,
            });
        }
    }

    /// The board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The board configuration.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    /// Whether the hooks have ended the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// How the game ended, if it has.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// The collaborator hooks.
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable access to the collaborator hooks.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Capture the RNG position for checkpointing.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Drain events buffered since the last step.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    fn check_ready(&self) -> Result<(), RejectReason> {
        if self.outcome.is_some() {
            return Err(RejectReason::GameOver);
        }
        if self.phase != BoardPhase::Idle {
            return Err(RejectReason::Busy);
        }
        Ok(())
    }

    fn occupied(&self, pos: Pos) -> Result<&Piece, RejectReason> {
        if !self.grid.contains(pos) {
            return Err(RejectReason::OutOfBounds);
        }
        self.grid.get(pos).ok_or(RejectReason::EmptyCell)
    }

    fn commit(&mut self, context: MoveContext, pending: Option<PendingAction>, phase: BoardPhase) {
        self.action = ActionState::begin(context);
        self.pending = pending;
        self.phase = phase;
        self.hooks.on_move_consumed();
    }

    /// Swap the piece at `a` (the one the player dragged) with its
    /// neighbor at `b`.
    ///
    /// Swaps involving a special always commit. Plain swaps commit only if
    /// they produce a match; otherwise the pieces are swapped back.
    #[instrument(skip(self))]
    pub fn request_swap(&mut self, a: Pos, b: Pos) -> ActionOutcome {
        match self.try_swap(a, b) {
            Ok(()) => {
                debug!(phase = ?self.phase, "swap accepted");
                self.events.push(BoardEvent::SwapAccepted { a, b });
                ActionOutcome::Accepted
            }
            Err(reason) => {
                debug!(%reason, "swap rejected");
                self.events.push(BoardEvent::SwapRejected { a, b });
                ActionOutcome::Rejected(reason)
            }
        }
    }

    fn try_swap(&mut self, a: Pos, b: Pos) -> Result<(), RejectReason> {
        self.check_ready()?;
        let first = self.occupied(a)?;
        let (a_id, a_special) = (first.id, first.is_special());
        let second = self.occupied(b)?;
        let (b_id, b_special) = (second.id, second.is_special());
        if !a.is_adjacent(b) {
            return Err(RejectReason::NotAdjacent);
        }

        self.phase = BoardPhase::Swapping;
        self.grid.swap(a, b);
        let context = MoveContext::swap(a_id, b_id);

        if a_special || b_special {
            self.commit(
                context,
                Some(PendingAction::Swap { a: a_id, b: b_id }),
                BoardPhase::SpecialResolving,
            );
            return Ok(());
        }

        if scan(&mut self.grid).is_empty() {
            self.grid.swap(a, b);
            self.phase = BoardPhase::Idle;
            self.hooks.on_swap_rejected();
            return Err(RejectReason::NoMatch);
        }

        self.commit(context, None, BoardPhase::MatchResolving);
        Ok(())
    }

    /// Tap a special to activate it on its own.
    #[instrument(skip(self))]
    pub fn request_activation(&mut self, pos: Pos) -> ActionOutcome {
        let checked = self.check_ready().and_then(|()| {
            let piece = self.occupied(pos)?;
            if piece.is_special() {
                Ok(piece.id)
            } else {
                Err(RejectReason::NotSpecial)
            }
        });

        match checked {
            Ok(id) => {
                self.commit(MoveContext::tap(id), Some(PendingAction::Tap(id)), BoardPhase::SpecialResolving);
                debug!("activation accepted");
                self.events.push(BoardEvent::ActivationAccepted { pos });
                ActionOutcome::Accepted
            }
            Err(reason) => {
                debug!(%reason, "activation rejected");
                ActionOutcome::Rejected(reason)
            }
        }
    }

    /// Run one wave. Returns `None` when the board is idle.
    #[instrument(skip(self))]
    pub fn step(&mut self) -> Option<WaveReport> {
        let phase = self.phase;
        if matches!(phase, BoardPhase::Idle | BoardPhase::Swapping) {
            return None;
        }

        let mut report = WaveReport {
            phase,
            events: self.take_events(),
            ..WaveReport::default()
        };

        match phase {
            BoardPhase::Idle | BoardPhase::Swapping => {}
            BoardPhase::SpecialResolving => {
                let pending = self.pending.take();
                self.resolve_wave(&mut report, |wave| match pending {
                    Some(PendingAction::Swap { a, b }) => {
                        wave.resolve_swap(a, b);
                    }
                    Some(PendingAction::Tap(id)) => {
                        let is_disco = wave
                            .grid()
                            .find(id)
                            .and_then(|pos| wave.grid().get(pos))
                            .is_some_and(|p| p.special == SpecialKind::DiscoBall);
                        if is_disco {
                            wave.activate_tapped_disco(id);
                        } else {
                            wave.activate_single(id, TargetPolicy::Shared);
                        }
                    }
                    None => {}
                });
            }
            BoardPhase::MatchResolving | BoardPhase::Cascading => {
                if scan(&mut self.grid).is_empty() {
                    self.settle(&mut report);
                    return Some(report);
                }
                promote_matches(&mut self.grid, &self.action.context, &mut report.events);
                self.resolve_wave(&mut report, |_| {});
            }
        }

        debug!(destroyed = report.destroyed.len(), "wave resolved");
        Some(report)
    }

    /// Open a wave, let `start` seed it, run the chain, remove the marked
    /// pieces and refill.
    fn resolve_wave(&mut self, report: &mut WaveReport, start: impl FnOnce(&mut Wave<'_>)) {
        let preferred = self.hooks.preferred_target_colors();

        let destroyed = {
            let mut wave = Wave::new(
                &mut self.grid,
                &mut self.rng,
                &self.config,
                &mut self.action,
                &preferred,
                &mut report.events,
            );
            start(&mut wave);
            wave.finish()
        };

        if !destroyed.is_empty() {
            self.hooks.on_pieces_destroyed(&destroyed);
        }
        collapse_and_refill(&mut self.grid, &mut self.rng, self.config.palette(), &mut report.events);

        report.destroyed = destroyed;
        self.phase = BoardPhase::Cascading;
    }

    fn settle(&mut self, report: &mut WaveReport) {
        self.phase = BoardPhase::Idle;
        self.action.clear();
        self.pending = None;
        report.events.push(BoardEvent::Settled);
        report.settled = true;

        let outcome = self.hooks.on_board_settled();
        if outcome.is_some() {
            self.outcome = outcome;
        }
        report.outcome = outcome;
        debug!(?outcome, "board settled");
    }

    /// Step until the board is idle, collecting every report.
    pub fn run_until_idle(&mut self) -> Vec<WaveReport> {
        let mut reports = Vec::new();
        while let Some(report) = self.step() {
            reports.push(report);
        }
        reports
    }
}
