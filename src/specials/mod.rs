//! Special pieces: creation, combos, chains and planes.
//!
//! ## Structure
//!
//! - `area`: cell sets for every area of effect
//! - `promote_matches`: turns matched shapes into specials
//! - `Wave`: per-wave resolution context; combos (`resolve_swap`), the
//!   chain engine and plane targeting are implemented on it
//! - `ActionState`: reservations that live for a whole player action
//!
//! ## Resolution order
//!
//! Marking a special enqueues it (at most once per wave). The activation
//! queue drains breadth-first; planes in flight land one at a time once it
//! is empty; the marked sweep runs last.

pub mod area;
mod chain;
mod combo;
mod factory;
mod targeting;
mod wave;

pub use combo::ComboKind;
pub use factory::promote_matches;
pub use targeting::TargetPolicy;
pub use wave::{ActionState, Wave};
