//! Negamax search with alpha-beta pruning.
//!
//! Fail-soft negamax over a single owned game state. Every candidate move is
//! applied through a scoped guard, searched, and reversed before the next one
//! is tried, so the state is never copied. An optional transposition table
//! short-circuits positions reached again through a different move order.

use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::score::{Score, DRAW_SCORE, SCORE_INFINITY};
use crate::rules::GameState;

use super::config::{SearchConfig, TableConfig};
use super::error::SearchError;
use super::stats::SearchStats;
use super::table::{Bound, ReplacementPolicy, TableEntry, TranspositionTable};

/// Depth-bounded alpha-beta search engine.
///
/// Generic over the game type and resolved statically. Owns the game state,
/// the optional transposition table and the statistics of the last search.
pub struct AlphaBetaSearch<G: GameState> {
    /// The position being searched.
    state: G,

    /// Search configuration.
    config: SearchConfig,

    /// Memoized subtree results, if enabled.
    table: Option<TranspositionTable<G::Move>>,

    /// Score of the move returned by the last `best_move`.
    last_score: Score,

    /// Statistics of the last `best_move`.
    stats: SearchStats,
}

impl<G: GameState> AlphaBetaSearch<G> {
    /// Create an engine owning `state`, without a transposition table.
    pub fn new(state: G) -> Self {
        Self {
            state,
            config: SearchConfig::default(),
            table: None,
            last_score: DRAW_SCORE,
            stats: SearchStats::default(),
        }
    }

    /// Create an engine from a validated configuration.
    pub fn with_config(state: G, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;

        let mut search = Self::new(state);
        if let Some(table) = config.table {
            search.enable_table(table)?;
        }
        search.config = config;
        Ok(search)
    }

    /// Allocate a table of `2^size_exponent` slots and use it from now on.
    ///
    /// `replacement_param` selects the overwrite rule, see
    /// [`ReplacementPolicy::from_param`]: negative always overwrites, `n >= 0`
    /// keeps a stored result unless the new one is at most `n` plies
    /// shallower.
    pub fn enable_transposition_table(
        &mut self,
        size_exponent: u8,
        replacement_param: i32,
    ) -> Result<(), SearchError> {
        self.enable_table(TableConfig {
            size_exponent,
            replacement: ReplacementPolicy::from_param(replacement_param),
        })
    }

    /// Allocate a table described by `table` and use it from now on.
    ///
    /// Replaces any existing table.
    pub fn enable_table(&mut self, table: TableConfig) -> Result<(), SearchError> {
        let allocated = TranspositionTable::new(table.size_exponent, table.replacement)?;
        debug!(
            slots = allocated.capacity(),
            replacement = ?table.replacement,
            "transposition table enabled"
        );
        self.table = Some(allocated);
        self.config.table = Some(table);
        Ok(())
    }

    /// Drop the table; later searches run plain alpha-beta.
    pub fn disable_transposition_table(&mut self) {
        if self.table.take().is_some() {
            debug!("transposition table disabled");
        }
        self.config.table = None;
    }

    /// Forget every cached result, keeping the allocation.
    pub fn clear_transposition_table(&mut self) {
        if let Some(table) = self.table.as_mut() {
            table.clear();
            trace!("transposition table cleared");
        }
    }

    /// Run [`best_move`](Self::best_move) at the configured depth.
    pub fn search(&mut self) -> Option<G::Move> {
        self.best_move(self.config.depth)
    }

    /// Find the best move for the side to move, searching `depth` plies.
    ///
    /// Returns `None` only if the position has no legal move; in that case
    /// `last_score` is left unchanged. The state is identical before and after
    /// the call; playing the returned move is up to the caller.
    ///
    /// Among moves of equal score the first one enumerated is returned.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is 0.
    pub fn best_move(&mut self, depth: u8) -> Option<G::Move> {
        assert!(depth >= 1, "search depth must be at least 1");

        let start = Instant::now();
        self.stats.reset();

        if !self.state.has_moves_left() {
            return None;
        }

        let mut negamax = Negamax {
            table: self.table.as_mut(),
            stats: &mut self.stats,
        };
        let (score, best) =
            negamax.search(&mut self.state, depth, -SCORE_INFINITY, SCORE_INFINITY);

        // A terminal root or a bare table hit may come back without a move.
        let best = best.or_else(|| self.state.first_move());

        self.last_score = score;
        self.stats.time_us = start.elapsed().as_micros() as u64;

        debug!(
            depth,
            score,
            best_move = ?best,
            nodes = self.stats.nodes,
            table_hits = self.stats.table_hits,
            time_us = self.stats.time_us,
            "search finished"
        );

        best
    }

    /// Score of the move returned by the last `best_move`, from the mover's
    /// perspective. `0` before the first search.
    #[must_use]
    pub fn last_score(&self) -> Score {
        self.last_score
    }

    /// Follow the table's best moves from the current position.
    ///
    /// Stops after `max_len` moves, at a table miss, at a decided position or
    /// when a position repeats.
    /// The state is left unchanged. Empty without a table.
    pub fn principal_variation(&mut self, max_len: usize) -> Vec<G::Move> {
        let mut line = Vec::new();
        if let Some(table) = self.table.as_ref() {
            let mut visited = SmallVec::new();
            collect_line(table, &mut self.state, max_len, &mut line, &mut visited);
        }
        line
    }

    /// Get search statistics of the last `best_move`.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get the transposition table, if enabled.
    #[must_use]
    pub fn transposition_table(&self) -> Option<&TranspositionTable<G::Move>> {
        self.table.as_ref()
    }

    /// Get the game state.
    #[must_use]
    pub fn state(&self) -> &G {
        &self.state
    }

    /// Get the game state for playing moves between searches.
    pub fn state_mut(&mut self) -> &mut G {
        &mut self.state
    }

    /// Give the game state back.
    pub fn into_state(self) -> G {
        self.state
    }
}

/// Borrowed search context for one `best_move` call.
struct Negamax<'a, M> {
    table: Option<&'a mut TranspositionTable<M>>,
    stats: &'a mut SearchStats,
}

impl<M: Copy> Negamax<'_, M> {
    /// Fail-soft negamax. Returns the score from the mover's perspective and
    /// the move that produced it (`None` at leaves and on table answers
    /// without a stored move).
    fn search<G>(
        &mut self,
        state: &mut G,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
    ) -> (Score, Option<M>)
    where
        G: GameState<Move = M>,
    {
        self.stats.nodes += 1;

        if state.is_terminal() {
            self.stats.leaves += 1;
            return (state.score(), None);
        }
        if !state.has_moves_left() {
            self.stats.leaves += 1;
            return (DRAW_SCORE, None);
        }
        if depth == 0 {
            self.stats.leaves += 1;
            return (state.score(), None);
        }

        let key = state.position_key();
        let alpha_original = alpha;

        if let Some(table) = self.table.as_deref() {
            self.stats.table_probes += 1;
            if let Some(entry) = table.probe(key).filter(|entry| entry.depth >= depth).copied() {
                self.stats.table_hits += 1;
                match entry.bound {
                    Bound::Exact => {
                        self.stats.table_cutoffs += 1;
                        return (entry.score, entry.best_move);
                    }
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    self.stats.table_cutoffs += 1;
                    return (entry.score, entry.best_move);
                }
            }
        }

        let mut best_score = -SCORE_INFINITY;
        let mut best_move = None;
        let mut next = state.first_move();

        while let Some(mv) = next {
            let score = {
                let mut child = state.apply_scoped(mv);
                -self.search(&mut *child, depth - 1, -beta, -alpha).0
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if best_score > alpha {
                alpha = best_score;
            }
            // Nothing beats a forced win.
            if alpha >= beta || best_score >= G::WIN_SCORE {
                self.stats.cutoffs += 1;
                break;
            }

            next = state.next_move(mv);
        }

        if let Some(table) = self.table.as_deref_mut() {
            let bound = if best_score <= alpha_original {
                Bound::Upper
            } else if best_score >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            table.store(TableEntry {
                key,
                score: best_score,
                depth,
                bound,
                best_move,
            });
        }

        (best_score, best_move)
    }
}

fn collect_line<G: GameState>(
    table: &TranspositionTable<G::Move>,
    state: &mut G,
    remaining: usize,
    line: &mut Vec<G::Move>,
    visited: &mut SmallVec<[u64; 32]>,
) {
    let key = state.position_key();
    if remaining == 0 || state.is_terminal() || visited.contains(&key) {
        return;
    }
    visited.push(key);

    let Some(mv) = table.probe(key).and_then(|entry| entry.best_move) else {
        return;
    };
    if !state.moves().any(|legal| legal == mv) {
        return;
    }

    line.push(mv);
    let mut child = state.apply_scoped(mv);
    collect_line(table, &mut *child, remaining - 1, line, visited);
}
