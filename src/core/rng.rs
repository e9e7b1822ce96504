//! Deterministic random number generation.
//!
//! Every game instance owns the randomness it needs (Zobrist keys, random
//! playouts in tests) instead of relying on process-wide random state.
//!
//! ```
//! use rust_negamax::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut again = GameRng::new(42);
//! assert_eq!(rng.gen_u64(), again.gen_u64());
//!
//! // Independent stream for a named purpose
//! let mut keys = rng.for_context("zobrist");
//! let _ = keys.gen_u64();
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic RNG backed by ChaCha8.
///
/// Same seed produces an identical sequence on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        Self::new(context_seed(self.seed, context))
    }

    /// Generate a uniformly distributed 64-bit value.
    pub fn gen_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

/// FNV-1a over the seed and context bytes, finished with a splitmix64 step.
fn context_seed(seed: u64, context: &str) -> u64 {
    let hash = seed
        .to_le_bytes()
        .iter()
        .chain(context.as_bytes())
        .fold(FNV_OFFSET, |hash, &byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        });

    let mut z = hash.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
