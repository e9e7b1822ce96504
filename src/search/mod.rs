//! Alpha-beta search for rust-negamax.
//!
//! ## Overview
//!
//! Depth-bounded negamax with fail-soft alpha-beta pruning over any
//! [`GameState`](crate::rules::GameState). Key features:
//!
//! - **In-Place Search**: One owned state, moves applied and reversed
//! - **Transposition Table**: Optional, fixed capacity, full-key verified
//! - **Explicit Replacement**: Always-overwrite or depth-preferred
//! - **Deterministic**: Ties resolve to the first enumerated move
//!
//! ## Usage
//!
//! ```rust
//! use rust_negamax::games::connect_four::{Board, Column};
//! use rust_negamax::search::AlphaBetaSearch;
//!
//! let mut search = AlphaBetaSearch::new(Board::new());
//! search.enable_transposition_table(16, 0).unwrap();
//!
//! let best: Column = search.best_move(6).unwrap();
//! println!("Best column: {best}, score {}", search.last_score());
//!
//! // Playing the move is up to the caller
//! search.state_mut().play(best.0).unwrap();
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use rust_negamax::games::connect_four::Board;
//! use rust_negamax::search::{AlphaBetaSearch, ReplacementPolicy, SearchConfig};
//!
//! let config = SearchConfig::default()
//!     .with_depth(4)
//!     .with_table(12, ReplacementPolicy::Always);
//! let mut search = AlphaBetaSearch::with_config(Board::new(), config).unwrap();
//! assert!(search.search().is_some());
//! ```

pub mod config;
pub mod error;
pub mod negamax;
pub mod stats;
pub mod table;

// Re-export main types
pub use config::{SearchConfig, TableConfig};
pub use error::SearchError;
pub use negamax::AlphaBetaSearch;
pub use stats::SearchStats;
pub use table::{Bound, ReplacementPolicy, TableEntry, TranspositionTable, MAX_TABLE_EXPONENT};
