//! Game-state contract consumed by the search.
//!
//! Games implement `GameState` to expose their position to the engine:
//! - A fixed, deterministic move enumeration order
//! - In-place move application with exact undo
//! - A mover-relative score with reserved forced-win sentinels
//! - An incrementally maintained 64-bit position key

use std::fmt::Debug;

use smallvec::SmallVec;

use crate::core::score::{is_win_score, Score};

/// Game-state contract.
///
/// The engine owns one value implementing this trait and mutates it in place
/// during search, pairing every [`apply_move`](Self::apply_move) with the
/// matching [`reverse_move`](Self::reverse_move). It never clones the state.
///
/// ## Implementation Notes
///
/// - `first_move`/`next_move`: must visit every legal move exactly once, in
///   the same order every time for the same position
/// - `apply_move`: plays the move for the side to move, flips the turn and
///   updates the score and position key
/// - `reverse_move`: restores the state bit for bit, key included
/// - `score`: from the perspective of the side to move; `±WIN_SCORE` only for
///   decided positions
pub trait GameState {
    /// One legal transition. "No move" is expressed as `None`.
    type Move: Copy + Eq + Debug;

    /// Data returned by `apply_move` that is needed to reverse it.
    type Undo;

    /// Magnitude of a forced-win score. Must be below
    /// [`SCORE_INFINITY`](crate::core::SCORE_INFINITY).
    const WIN_SCORE: Score;

    /// First legal move in enumeration order, or `None` if there is none.
    fn first_move(&self) -> Option<Self::Move>;

    /// Legal move following `current` in enumeration order, or `None` when
    /// enumeration is exhausted.
    fn next_move(&self, current: Self::Move) -> Option<Self::Move>;

    /// Play `mv` for the side to move.
    fn apply_move(&mut self, mv: Self::Move) -> Self::Undo;

    /// Undo the matching `apply_move`.
    fn reverse_move(&mut self, mv: Self::Move, undo: Self::Undo);

    /// Heuristic or terminal score from the mover's perspective.
    fn score(&self) -> Score;

    /// Zobrist key of the current position.
    fn position_key(&self) -> u64;

    // === Convenience Methods ===

    /// True iff the position is a forced win for either side.
    fn is_terminal(&self) -> bool {
        is_win_score(self.score(), Self::WIN_SCORE)
    }

    /// True iff at least one legal move remains.
    ///
    /// A full board without a winner has no moves left but is not terminal.
    fn has_moves_left(&self) -> bool {
        self.first_move().is_some()
    }

    /// Iterate over the legal moves in enumeration order.
    fn moves(&self) -> Moves<'_, Self>
    where
        Self: Sized,
    {
        Moves::new(self)
    }

    /// Collect the legal moves in enumeration order.
    fn legal_moves(&self) -> SmallVec<[Self::Move; 16]>
    where
        Self: Sized,
    {
        self.moves().collect()
    }

    /// Apply `mv` and return a guard that reverses it when dropped.
    fn apply_scoped(&mut self, mv: Self::Move) -> AppliedMove<'_, Self>
    where
        Self: Sized,
    {
        AppliedMove::new(self, mv)
    }
}

/// Iterator chaining `first_move` and `next_move` until exhaustion.
pub struct Moves<'a, G: GameState> {
    state: &'a G,
    last: Option<G::Move>,
    started: bool,
}

impl<'a, G: GameState> Moves<'a, G> {
    fn new(state: &'a G) -> Self {
        Self {
            state,
            last: None,
            started: false,
        }
    }
}

impl<G: GameState> Iterator for Moves<'_, G> {
    type Item = G::Move;

    fn next(&mut self) -> Option<G::Move> {
        let next = if self.started {
            self.last.and_then(|mv| self.state.next_move(mv))
        } else {
            self.started = true;
            self.state.first_move()
        };
        self.last = next;
        next
    }
}

impl<G: GameState> std::iter::FusedIterator for Moves<'_, G> {}

/// A move applied to a borrowed state, reversed when the guard drops.
///
/// Dereferences to the state so it can be searched while the move is on.
/// The reverse runs on every exit path of the scope holding the guard,
/// including early returns after a cutoff.
pub struct AppliedMove<'a, G: GameState> {
    state: &'a mut G,
    mv: G::Move,
    undo: Option<G::Undo>,
}

impl<'a, G: GameState> AppliedMove<'a, G> {
    /// Apply `mv` to `state`.
    pub fn new(state: &'a mut G, mv: G::Move) -> Self {
        let undo = state.apply_move(mv);
        Self {
            state,
            mv,
            undo: Some(undo),
        }
    }

    /// The move held by this guard.
    #[must_use]
    pub fn applied(&self) -> G::Move {
        self.mv
    }
}

impl<G: GameState> std::ops::Deref for AppliedMove<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.state
    }
}

impl<G: GameState> std::ops::DerefMut for AppliedMove<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.state
    }
}

impl<G: GameState> Drop for AppliedMove<'_, G> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.state.reverse_move(self.mv, undo);
        }
    }
}
