//! Board storage and gravity.
//!
//! - `Grid`: the grid store - cells, pieces, bounds-checked access
//! - Layout parsing for hand-built boards
//! - `collapse_and_refill`: per-column gravity plus refill

mod grid;
mod layout;
mod collapse;

pub use grid::Grid;
pub use layout::LayoutError;
pub use collapse::{collapse_and_refill, CollapseReport};
