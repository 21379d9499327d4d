//! Sessions: the move state machine and its collaborators.
//!
//! - `Session`: owns one board, validates player actions, runs waves
//! - `GameHooks`: callbacks into score, goal and UI code
//! - `ScoreTracker`, `LevelGoals`, `LevelTracker`: stock collaborators

mod goals;
mod hooks;
mod orchestrator;
mod score;

pub use goals::{ColorGoal, LevelConfig, LevelGoals, LevelTracker};
pub use hooks::{GameHooks, GameOutcome, NoHooks};
pub use orchestrator::{ActionOutcome, BoardPhase, RejectReason, Session, WaveReport};
pub use score::ScoreTracker;
