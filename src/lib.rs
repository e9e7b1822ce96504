//! # rust-negamax
//!
//! A generic two-player, zero-sum, perfect-information search engine.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The search knows nothing about boards or pieces.
//!    Games implement the [`GameState`] contract and the engine is generic
//!    over it, resolved statically.
//!
//! 2. **Apply/Undo, Never Copy**: The engine owns one mutable state. Every
//!    move is applied through a scoped guard and reversed on every exit path.
//!
//! 3. **Mover's Perspective**: Scores are always reported for the side to
//!    move (negamax); `±WIN_SCORE` marks a decided position.
//!
//! ## Architecture
//!
//! - **Fail-Soft Alpha-Beta**: Depth-bounded negamax whose out-of-window
//!   results are still meaningful bounds.
//!
//! - **Transposition Table**: Optional fixed-capacity table keyed by the
//!   Zobrist position key, with full-key verification and an explicit
//!   replacement policy.
//!
//! ## Modules
//!
//! - `core`: Scores, players, deterministic RNG, Zobrist keys
//! - `rules`: The game-state contract and the scoped apply/undo guard
//! - `search`: Alpha-beta engine, transposition table, configuration
//! - `games`: Reference game implementations (Connect Four)

pub mod core;
pub mod rules;
pub mod search;
pub mod games;

// Re-export commonly used types
pub use crate::core::{GameRng, Player, Score, ZobristKeys, DRAW_SCORE, SCORE_INFINITY};

pub use crate::rules::{AppliedMove, GameState, Moves};

pub use crate::search::{
    AlphaBetaSearch, Bound, ReplacementPolicy, SearchConfig, SearchError, SearchStats,
    TableConfig, TableEntry, TranspositionTable, MAX_TABLE_EXPONENT,
};
