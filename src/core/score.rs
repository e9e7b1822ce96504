//! Search scores.
//!
//! Scores are plain signed integers, always from the perspective of the
//! player to move. Each game reserves `±WIN_SCORE` (see
//! [`GameState::WIN_SCORE`](crate::rules::GameState::WIN_SCORE)) for forced
//! wins; every other value is heuristic.

/// Signed evaluation from the mover's point of view.
pub type Score = i32;

/// Bound of the root search window.
///
/// Strictly larger than any game's `WIN_SCORE` and safe to negate.
pub const SCORE_INFINITY: Score = i32::MAX / 2;

/// Score of a position with no legal moves and no winner.
pub const DRAW_SCORE: Score = 0;

/// Check whether `score` is one of the forced-win sentinels `±win_score`.
#[inline]
#[must_use]
pub const fn is_win_score(score: Score, win_score: Score) -> bool {
    score == win_score || score == -win_score
}
