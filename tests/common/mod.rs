//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use rust_negamax::core::{GameRng, Player, Score};
use rust_negamax::games::connect_four::{Board, Column};
use rust_negamax::rules::GameState;

/// Play `plies` random moves from an empty board, never completing four in a
/// row. Stops early if every remaining move would decide the game.
pub fn random_position(seed: u64, plies: usize) -> Board {
    let mut rng = GameRng::new(seed);
    let mut board = Board::new();

    for _ in 0..plies {
        let quiet: Vec<Column> = board
            .moves()
            .filter(|&mv| {
                let mut probe = board.clone();
                probe.apply_move(mv);
                probe.winner().is_none()
            })
            .collect();

        let Some(&mv) = rng.choose(&quiet) else {
            break;
        };
        board.apply_move(mv);
    }

    board
}

/// Everything a search must leave untouched.
pub fn snapshot(board: &Board) -> (u64, Score, Vec<Column>, String) {
    (
        board.position_key(),
        board.score(),
        board.moves().collect(),
        board.to_string(),
    )
}

/// Uniform game tree with explicit values at `height`, from player One's
/// view. Deeper nodes keep the value of their ancestor at `height`.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeGame {
    branching: u8,
    height: usize,
    leaves: Vec<Score>,
    path: Vec<u8>,
    to_move: Player,
}

impl TreeGame {
    /// Build a tree whose root is played by `first`.
    pub fn new(branching: u8, leaves: Vec<Score>, first: Player) -> Self {
        let mut height = 0;
        let mut count = 1;
        while count < leaves.len() {
            count *= branching as usize;
            height += 1;
        }
        assert_eq!(count, leaves.len(), "leaf count must be a power of branching");

        Self {
            branching,
            height,
            leaves,
            path: Vec::new(),
            to_move: first,
        }
    }

    /// Random tree with `branching^height` values in `-range..range`.
    pub fn random(seed: u64, branching: u8, height: u32, range: i32, first: Player) -> Self {
        let mut rng = GameRng::new(seed);
        let leaves = (0..(branching as usize).pow(height))
            .map(|_| rng.gen_range(-range..range))
            .collect();
        Self::new(branching, leaves, first)
    }

    /// Same tree with the other side to move first and every value negated.
    pub fn mirrored(&self) -> Self {
        Self::new(
            self.branching,
            self.leaves.iter().map(|v| -v).collect(),
            self.to_move.opponent(),
        )
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    fn one_view(&self) -> Score {
        if self.path.len() < self.height {
            return 0;
        }
        let index = self
            .path
            .iter()
            .take(self.height)
            .fold(0, |acc, &mv| acc * self.branching as usize + mv as usize);
        self.leaves[index]
    }
}

impl GameState for TreeGame {
    type Move = u8;
    type Undo = ();
    const WIN_SCORE: Score = 1000;

    fn first_move(&self) -> Option<u8> {
        (self.branching > 0).then_some(0)
    }

    fn next_move(&self, current: u8) -> Option<u8> {
        (current + 1 < self.branching).then_some(current + 1)
    }

    fn apply_move(&mut self, mv: u8) {
        self.path.push(mv);
        self.to_move = self.to_move.opponent();
    }

    fn reverse_move(&mut self, _mv: u8, _undo: ()) {
        self.path.pop();
        self.to_move = self.to_move.opponent();
    }

    fn score(&self) -> Score {
        self.one_view() * self.to_move.sign()
    }

    fn position_key(&self) -> u64 {
        self.path.iter().fold(0xcbf29ce484222325, |hash, &mv| {
            (hash ^ (u64::from(mv) + 1)).wrapping_mul(0x100000001b3)
        })
    }
}
