//! Events emitted for the presentation layer and collaborators.
//!
//! - `BoardEvent`: every discrete change, in order
//! - `DestroyedPiece`: what score and goal trackers are told about

mod event;

pub use event::{BoardEvent, DestroyedPiece};
