//! Core value types: positions, pieces, RNG, configuration.
//!
//! Everything here is plain data with no board logic, shared by every
//! other module.

pub mod pos;
pub mod piece;
pub mod rng;
pub mod config;

pub use pos::Pos;
pub use piece::{Color, Piece, PieceId, SpecialKind};
pub use rng::{GameRng, GameRngState};
pub use config::{BoardConfig, ConfigError};
