//! Game-state contract.
//!
//! Games implement [`GameState`] to define:
//! - Legal moves in a fixed enumeration order
//! - How moves modify the position, and how to take them back
//! - The mover-relative score and the position key
//!
//! The search calls into `GameState` but never interprets game-specific
//! concepts directly.

pub mod state;

pub use state::{AppliedMove, GameState, Moves};
