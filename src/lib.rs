//! # match3-core
//!
//! A deterministic rule engine for match-three puzzle boards with special
//! pieces, combos and chain reactions.
//!
//! ## Design Principles
//!
//! 1. **Logic Only**: The engine never animates. Every change is reported
//!    as a `BoardEvent` and the caller schedules its own visuals.
//!
//! 2. **Stepwise**: A player action is validated up front; the caller then
//!    drives the cascade one wave at a time with `Session::step`.
//!
//! 3. **Deterministic**: All randomness comes from one seeded `GameRng`.
//!    The same seed and the same actions replay the same game.
//!
//! ## Architecture
//!
//! - **Persistent Grid**: O(1) cloning via `im-rs`, so snapshots for
//!   rollback or rendering are cheap.
//!
//! - **Scoped Bookkeeping**: Visited sets and queues live for one wave,
//!   plane reservations for one player action. Nothing is global.
//!
//! ## Modules
//!
//! - `core`: Positions, pieces, RNG, configuration
//! - `board`: Grid store, text layouts, collapse and refill
//! - `matching`: Line and square scanning, shape classification
//! - `specials`: Special creation, combos, chain reactions, planes
//! - `events`: Board events and destruction reports
//! - `session`: The move state machine and collaborator hooks
//!
//! ## Example
//!
//! ```
//! use match3_core::{BoardConfig, NoHooks, Pos, Session};
//!
//! let mut session = Session::new(BoardConfig::default(), 42, NoHooks).unwrap();
//! let outcome = session.request_swap(Pos::new(0, 0), Pos::new(1, 0));
//!
//! if outcome.is_accepted() {
//!     for report in session.run_until_idle() {
//!         println!("{} events", report.events.len());
//!     }
//! }
//! ```

pub mod core;
pub mod board;
pub mod matching;
pub mod specials;
pub mod events;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Pos, Color, PieceId, SpecialKind, Piece,
    GameRng, GameRngState,
    BoardConfig, ConfigError,
};

pub use crate::board::{Grid, LayoutError, CollapseReport, collapse_and_refill};

pub use crate::matching::{scan, ScanResult, MatchLine, MoveContext, Orientation};

pub use crate::specials::{ActionState, ComboKind, TargetPolicy, Wave, promote_matches};

pub use crate::events::{BoardEvent, DestroyedPiece};

pub use crate::session::{
    Session, BoardPhase, ActionOutcome, RejectReason, WaveReport,
    GameHooks, NoHooks, GameOutcome,
    ScoreTracker, LevelGoals, LevelConfig, ColorGoal, LevelTracker,
};
