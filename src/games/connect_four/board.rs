//! Connect Four board implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GameRng, Player, Score, ZobristKeys};
use crate::rules::GameState;

/// Board width.
pub const COLUMNS: usize = 7;

/// Board height.
pub const ROWS: usize = 6;

/// Score of a decided game.
pub const WIN_SCORE: Score = 1000;

/// Seed used by [`Board::new`].
pub const DEFAULT_SEED: u64 = 0x5EED_C4C4;

const CELLS: usize = COLUMNS * ROWS;

/// Directions of the lines through a cell: horizontal, vertical, both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Value of a window holding two stones of one colour and nothing else.
const TWO_IN_WINDOW: Score = 1;

/// Value of a window holding three stones of one colour and nothing else.
const THREE_IN_WINDOW: Score = 10;

/// Four cells in a line, as `(column, row)`.
type Window = [(usize, usize); 4];

/// Drop a stone into a column (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column(pub u8);

impl Column {
    /// Get the column index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("column {0} does not exist (expected 0-{max})", max = COLUMNS - 1)]
    NoSuchColumn(u8),

    #[error("column {0} is full")]
    ColumnFull(u8),

    #[error("the game is already decided")]
    GameOver,
}

/// Connect Four position.
///
/// The heuristic is kept incrementally from player One's view as the sum over
/// all four-cell windows: a window holding only one colour is worth 1 with two
/// stones and 10 with three. Four in a row freezes it at `±WIN_SCORE`.
#[derive(Clone, Debug)]
pub struct Board {
    /// `cells[column][row]`, row 0 at the bottom.
    cells: [[Option<Player>; ROWS]; COLUMNS],

    /// Stones per column.
    heights: [u8; COLUMNS],

    /// Side to move.
    to_move: Player,

    /// Heuristic from player One's view, or `±WIN_SCORE` once decided.
    one_score: Score,

    /// Zobrist key of the occupied cells.
    key: u64,

    /// Key constants owned by this board.
    zobrist: ZobristKeys,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with keys from [`DEFAULT_SEED`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create an empty board with keys generated from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cells: [[None; ROWS]; COLUMNS],
            heights: [0; COLUMNS],
            to_move: Player::One,
            one_score: 0,
            key: 0,
            zobrist: ZobristKeys::new(CELLS, &GameRng::new(seed)),
        }
    }

    /// Create a board by playing `columns` in order from an empty board.
    ///
    /// ```
    /// use rust_negamax::games::connect_four::Board;
    ///
    /// let board = Board::from_moves(&[3, 3, 4]).unwrap();
    /// assert_eq!(board.column_height(3), 2);
    /// assert!(Board::from_moves(&[9]).is_err());
    /// ```
    pub fn from_moves(columns: &[u8]) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for &column in columns {
            board.play(column)?;
        }
        Ok(board)
    }

    /// Validate and play a move for the side to move.
    pub fn play(&mut self, column: u8) -> Result<(), BoardError> {
        if self.winner().is_some() {
            return Err(BoardError::GameOver);
        }
        if column as usize >= COLUMNS {
            return Err(BoardError::NoSuchColumn(column));
        }
        if self.heights[column as usize] as usize >= ROWS {
            return Err(BoardError::ColumnFull(column));
        }
        self.apply_move(Column(column));
        Ok(())
    }

    /// Side to move.
    #[must_use]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Player who completed four in a row, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self.one_score {
            WIN_SCORE => Some(Player::One),
            s if s == -WIN_SCORE => Some(Player::Two),
            _ => None,
        }
    }

    /// True iff every column is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h as usize >= ROWS)
    }

    /// Stones in `column`.
    #[must_use]
    pub fn column_height(&self, column: usize) -> usize {
        self.heights[column] as usize
    }

    /// Stone at `(column, row)`, row 0 at the bottom.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<Player> {
        self.cells[column][row]
    }

    /// Stones on the board.
    #[must_use]
    pub fn stones(&self) -> usize {
        self.heights.iter().map(|&h| h as usize).sum()
    }

    /// Heuristic from player One's view.
    #[must_use]
    pub fn one_score(&self) -> Score {
        self.one_score
    }

    fn is_open(&self, column: usize) -> bool {
        (self.heights[column] as usize) < ROWS
    }

    fn cell_index(column: usize, row: usize) -> usize {
        column * ROWS + row
    }

    /// All windows containing `(column, row)`.
    fn windows_through(column: usize, row: usize) -> impl Iterator<Item = Window> {
        DIRECTIONS.into_iter().flat_map(move |(dx, dy)| {
            (0..4isize).filter_map(move |back| {
                let start_col = column as isize - back * dx;
                let start_row = row as isize - back * dy;
                let mut window = [(0, 0); 4];
                for (step, cell) in window.iter_mut().enumerate() {
                    let c = start_col + step as isize * dx;
                    let r = start_row + step as isize * dy;
                    if !(0..COLUMNS as isize).contains(&c) || !(0..ROWS as isize).contains(&r) {
                        return None;
                    }
                    *cell = (c as usize, r as usize);
                }
                Some(window)
            })
        })
    }

    /// Stones of `(One, Two)` in `window`.
    fn window_counts(&self, window: &Window) -> (usize, usize) {
        window
            .iter()
            .fold((0, 0), |(one, two), &(c, r)| match self.cells[c][r] {
                Some(Player::One) => (one + 1, two),
                Some(Player::Two) => (one, two + 1),
                None => (one, two),
            })
    }

    fn window_value(counts: (usize, usize)) -> Score {
        let (stones, sign) = match counts {
            (n, 0) => (n, 1),
            (0, n) => (n, -1),
            _ => return 0,
        };
        match stones {
            2 => TWO_IN_WINDOW * sign,
            3 => THREE_IN_WINDOW * sign,
            _ => 0,
        }
    }
}

impl GameState for Board {
    type Move = Column;
    /// Heuristic before the move.
    type Undo = Score;
    const WIN_SCORE: Score = WIN_SCORE;

    fn first_move(&self) -> Option<Column> {
        (0..COLUMNS).find(|&c| self.is_open(c)).map(|c| Column(c as u8))
    }

    fn next_move(&self, current: Column) -> Option<Column> {
        (current.index() + 1..COLUMNS)
            .find(|&c| self.is_open(c))
            .map(|c| Column(c as u8))
    }

    fn apply_move(&mut self, mv: Column) -> Score {
        let undo = self.one_score;
        let column = mv.index();
        let row = self.heights[column] as usize;
        let player = self.to_move;
        debug_assert!(row < ROWS, "column {column} is full");

        if self.winner().is_none() {
            let before: Score = Self::windows_through(column, row)
                .map(|w| Self::window_value(self.window_counts(&w)))
                .sum();

            self.cells[column][row] = Some(player);

            let mut after = 0;
            let mut four = false;
            for window in Self::windows_through(column, row) {
                let counts = self.window_counts(&window);
                four |= counts.0 == 4 || counts.1 == 4;
                after += Self::window_value(counts);
            }

            self.one_score = if four {
                WIN_SCORE * player.sign()
            } else {
                self.one_score + after - before
            };
        } else {
            self.cells[column][row] = Some(player);
        }

        self.zobrist.toggle(&mut self.key, Self::cell_index(column, row), player);
        self.heights[column] += 1;
        self.to_move = player.opponent();
        undo
    }

    fn reverse_move(&mut self, mv: Column, undo: Score) {
        let column = mv.index();
        self.heights[column] -= 1;
        let row = self.heights[column] as usize;
        let player = self.to_move.opponent();

        self.cells[column][row] = None;
        self.zobrist.toggle(&mut self.key, Self::cell_index(column, row), player);
        self.to_move = player;
        self.one_score = undo;
    }

    fn score(&self) -> Score {
        self.one_score * self.to_move.sign()
    }

    fn position_key(&self) -> u64 {
        self.key
    }

    fn has_moves_left(&self) -> bool {
        !self.is_full()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "=".repeat(4 * COLUMNS + 1);
        let separator = "-".repeat(4 * COLUMNS + 1);

        write!(f, "|")?;
        for column in 0..COLUMNS {
            write!(f, " {column} |")?;
        }
        writeln!(f)?;
        writeln!(f, "{rule}")?;

        for row in (0..ROWS).rev() {
            write!(f, "|")?;
            for column in 0..COLUMNS {
                let stone = match self.cells[column][row] {
                    Some(Player::One) => 'X',
                    Some(Player::Two) => 'O',
                    None => ' ',
                };
                write!(f, " {stone} |")?;
            }
            writeln!(f)?;
            writeln!(f, "{separator}")?;
        }

        write!(f, "|")?;
        for height in self.heights {
            write!(f, "[{height}]|")?;
        }
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Score: {}", self.one_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Heuristic recomputed from scratch over every window on the board.
    fn full_heuristic(board: &Board) -> Score {
        let mut windows = Vec::new();
        for column in 0..COLUMNS {
            for row in 0..ROWS {
                windows.extend(Board::windows_through(column, row));
            }
        }
        windows.sort_unstable();
        windows.dedup();
        windows
            .iter()
            .map(|w| Board::window_value(board.window_counts(w)))
            .sum()
    }

    #[test]
    fn test_window_count() {
        let mut windows = Vec::new();
        for column in 0..COLUMNS {
            for row in 0..ROWS {
                windows.extend(Board::windows_through(column, row));
            }
        }
        windows.sort_unstable();
        windows.dedup();
        // 24 horizontal, 21 vertical, 12 per diagonal direction
        assert_eq!(windows.len(), 69);
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert_eq!(board.to_move(), Player::One);
        assert_eq!(board.score(), 0);
        assert_eq!(board.position_key(), 0);
        assert_eq!(board.winner(), None);
        assert_eq!(board.legal_moves().len(), COLUMNS);
        assert_eq!(board.first_move(), Some(Column(0)));
    }

    #[test]
    fn test_incremental_matches_full_heuristic() {
        let board = Board::from_moves(&[3, 3, 4, 2, 5, 4, 1, 1, 2, 6, 0]).unwrap();
        assert_eq!(board.one_score(), full_heuristic(&board));
    }

    #[test]
    fn test_two_and_three_in_a_row() {
        // X on 3 and 4 of the bottom row, O stacked twice on column 0
        let board = Board::from_moves(&[3, 0, 4, 0]).unwrap();
        assert_eq!(board.one_score(), 3 - 1);
        assert_eq!(board.score(), 2);

        let board = Board::from_moves(&[3, 0, 4, 0, 5]).unwrap();
        assert_eq!(board.one_score(), 10 + 10 + 1 - 1);
        assert_eq!(board.one_score(), full_heuristic(&board));
        assert_eq!(board.to_move(), Player::Two);
        assert_eq!(board.score(), -20);
    }

    #[test]
    fn test_run_against_edge_scores_like_open_run() {
        // X on 0 and 1 of the bottom row: one window, closed on the left
        let board = Board::from_moves(&[0, 6, 1]).unwrap();
        assert_eq!(board.one_score(), TWO_IN_WINDOW);

        // X on 2 and 3: three windows, each worth the same
        let board = Board::from_moves(&[2, 6, 3]).unwrap();
        assert_eq!(board.one_score(), 3 * TWO_IN_WINDOW);
        assert_eq!(Board::window_value((3, 0)), THREE_IN_WINDOW);
        assert_eq!(Board::window_value((0, 3)), -THREE_IN_WINDOW);
    }

    #[test]
    fn test_vertical_win() {
        let board = Board::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert_eq!(board.winner(), Some(Player::One));
        assert_eq!(board.one_score(), WIN_SCORE);
        // Loser to move sees the loss
        assert_eq!(board.score(), -WIN_SCORE);
        assert!(board.is_terminal());
    }

    #[test]
    fn test_diagonal_win_for_two() {
        // O builds a rising diagonal from (1,0) to (4,3)
        let board = Board::from_moves(&[0, 1, 2, 2, 3, 3, 4, 3, 4, 4, 6, 4]).unwrap();
        assert_eq!(board.winner(), Some(Player::Two));
        assert_eq!(board.score(), -WIN_SCORE);
    }

    #[test]
    fn test_play_rejects_bad_moves() {
        let mut board = Board::new();
        assert_eq!(board.play(7), Err(BoardError::NoSuchColumn(7)));

        for _ in 0..ROWS {
            board.play(2).unwrap();
        }
        assert_eq!(board.play(2), Err(BoardError::ColumnFull(2)));
        assert_eq!(board.next_move(Column(1)), Some(Column(3)));

        let mut won = Board::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert_eq!(won.play(5), Err(BoardError::GameOver));
    }

    #[test]
    fn test_apply_reverse_round_trip() {
        let mut board = Board::from_moves(&[3, 2, 3, 4]).unwrap();
        let key = board.position_key();
        let score = board.score();
        let moves = board.legal_moves();

        for mv in moves.clone() {
            let undo = board.apply_move(mv);
            assert_ne!(board.position_key(), key);
            board.reverse_move(mv, undo);

            assert_eq!(board.position_key(), key);
            assert_eq!(board.score(), score);
            assert_eq!(board.legal_moves(), moves);
        }
    }

    #[test]
    fn test_key_is_order_independent() {
        let a = Board::from_moves(&[0, 1, 2, 3]).unwrap();
        let b = Board::from_moves(&[2, 3, 0, 1]).unwrap();
        let c = Board::from_moves(&[1, 0, 3, 2]).unwrap();

        assert_eq!(a.position_key(), b.position_key());
        assert_eq!(a.one_score(), b.one_score());
        // Same cells, colours swapped
        assert_ne!(a.position_key(), c.position_key());
    }

    #[test]
    fn test_seed_changes_keys() {
        let mut a = Board::with_seed(1);
        let mut b = Board::with_seed(2);
        a.apply_move(Column(3));
        b.apply_move(Column(3));
        assert_ne!(a.position_key(), b.position_key());
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let mut board = Board::new();
        // Column pairs in an order that never lines up four
        let order = [0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, 4, 5,
            4, 5, 4, 5, 5, 4, 5, 4, 5, 4, 6, 6, 6, 6, 6, 6];
        for column in order {
            board.play(column).unwrap();
        }
        assert!(board.is_full());
        assert!(!board.has_moves_left());
        assert_eq!(board.first_move(), None);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_display() {
        let board = Board::from_moves(&[3, 4]).unwrap();
        let text = board.to_string();
        assert!(text.starts_with("| 0 | 1 | 2 | 3 | 4 | 5 | 6 |"));
        assert!(text.contains("|   |   |   | X | O |   |   |"));
        assert!(text.contains("|[0]|[0]|[0]|[1]|[1]|[0]|[0]|"));
        assert!(text.ends_with("Score: 0\n"));
    }
}
