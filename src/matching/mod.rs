//! Match detection and shape classification.
//!
//! - `scan`: marks every line and square match on the board
//! - Shape queries over the marks: straight lines, L/T bomb hosts, square
//!   plane hosts, and line host selection

mod scanner;
mod shapes;

pub use scanner::{scan, ScanResult};
pub use shapes::{
    choose_line_host, find_bomb_host, find_square_host, matched_lines, MatchLine, MoveContext,
    Orientation,
};
