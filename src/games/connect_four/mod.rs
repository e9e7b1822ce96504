//! Connect Four for exercising the search.
//!
//! A reference game implementing [`GameState`](crate::rules::GameState):
//! - 7 columns, 6 rows, stones drop to the lowest free cell
//! - Player One moves first; four in a row in any direction wins
//! - Columns are enumerated left to right, skipping full ones
//! - Zobrist keys are generated per board from an explicit seed
//!
//! The heuristic sums fixed window values: 1 for two stones of one colour,
//! 10 for three. Whether the run has open ends does not matter, unlike the
//! classic weighting that doubles runs open on both sides. The score stays a
//! pure function of the stones on the board, so every move order reaching a
//! position scores it the same.

mod board;

pub use board::{Board, BoardError, Column, COLUMNS, DEFAULT_SEED, ROWS, WIN_SCORE};
