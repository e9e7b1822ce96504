//! Core types: scores, players, deterministic RNG, Zobrist keys.
//!
//! This module is game-agnostic. Games build their position state out of
//! these pieces and expose it to the search through
//! [`GameState`](crate::rules::GameState).

pub mod player;
pub mod rng;
pub mod score;
pub mod zobrist;

pub use player::Player;
pub use rng::GameRng;
pub use score::{is_win_score, Score, DRAW_SCORE, SCORE_INFINITY};
pub use zobrist::ZobristKeys;
