//! Zobrist keys for incremental position hashing.
//!
//! A position key is the XOR of one random constant per occupied cell and
//! occupying player. XOR is its own inverse, so the same call updates the
//! key on apply and restores it on undo, and the key does not depend on the
//! order in which cells were filled.

use super::player::Player;
use super::rng::GameRng;

/// Per-cell, per-player random constants owned by one game instance.
#[derive(Clone, Debug)]
pub struct ZobristKeys {
    keys: Vec<[u64; 2]>,
}

impl ZobristKeys {
    /// Generate keys for `cells` cells from the `"zobrist"` stream of `rng`.
    #[must_use]
    pub fn new(cells: usize, rng: &GameRng) -> Self {
        let mut stream = rng.for_context("zobrist");
        let keys = (0..cells)
            .map(|_| [stream.gen_u64(), stream.gen_u64()])
            .collect();
        Self { keys }
    }

    /// Number of cells covered.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.keys.len()
    }

    /// Key contribution of `player` occupying `cell`.
    #[inline]
    #[must_use]
    pub fn key(&self, cell: usize, player: Player) -> u64 {
        self.keys[cell][player.index()]
    }

    /// Toggle the contribution of `player` on `cell` in `hash`.
    #[inline]
    pub fn toggle(&self, hash: &mut u64, cell: usize, player: Player) {
        *hash ^= self.key(cell, player);
    }
}
