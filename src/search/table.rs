//! Fixed-capacity transposition table.
//!
//! Maps a 64-bit position key to the cached result of a finished subtree.
//! The slot is chosen from the low bits of the key; every entry keeps the
//! full key and a probe with a different key is a miss, so unrelated
//! positions sharing a slot never produce false hits.
//!
//! ## Replacement
//!
//! Capacity is fixed and nothing is ever deleted: a store either overwrites
//! the slot or is dropped, as decided by [`ReplacementPolicy`].

use serde::{Deserialize, Serialize};

use crate::core::score::Score;

use super::error::SearchError;

/// Largest accepted size exponent (`2^28` slots).
pub const MAX_TABLE_EXPONENT: u8 = 28;

/// How a stored score relates to the true value of the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    /// The score is the value.
    Exact,
    /// The value is at least the score (beta cutoff).
    Lower,
    /// The value is at most the score (no move raised alpha).
    Upper,
}

/// Cached outcome of one searched position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableEntry<M> {
    /// Full position key, compared on probe.
    pub key: u64,
    /// Score from the perspective of the side to move.
    pub score: Score,
    /// Remaining depth the score was computed with.
    pub depth: u8,
    /// Bound classification of `score`.
    pub bound: Bound,
    /// Move that produced `score`.
    pub best_move: Option<M>,
}

/// Policy deciding whether a store overwrites an occupied slot.
///
/// Empty slots are always written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacementPolicy {
    /// Every store overwrites the slot.
    Always,
    /// Overwrite only if `new.depth + tolerance >= old.depth`.
    ///
    /// A tolerance of 0 keeps the deeper of the two results.
    DepthPreferred { tolerance: u8 },
}

impl Default for ReplacementPolicy {
    fn default() -> Self {
        ReplacementPolicy::DepthPreferred { tolerance: 0 }
    }
}

impl ReplacementPolicy {
    /// Map the integer replacement parameter to a policy.
    ///
    /// Negative values select [`Always`](Self::Always); `n >= 0` selects
    /// depth-preferred replacement with a tolerance of `n` plies (saturated
    /// at 255).
    ///
    /// ```
    /// use rust_negamax::search::ReplacementPolicy;
    ///
    /// assert_eq!(ReplacementPolicy::from_param(-1), ReplacementPolicy::Always);
    /// assert_eq!(
    ///     ReplacementPolicy::from_param(0),
    ///     ReplacementPolicy::DepthPreferred { tolerance: 0 }
    /// );
    /// ```
    #[must_use]
    pub fn from_param(param: i32) -> Self {
        if param < 0 {
            ReplacementPolicy::Always
        } else {
            let tolerance = u8::try_from(param).unwrap_or(u8::MAX);
            ReplacementPolicy::DepthPreferred { tolerance }
        }
    }

    /// Decide whether `new` may overwrite `old`.
    #[inline]
    #[must_use]
    pub fn should_replace<M>(self, old: &TableEntry<M>, new: &TableEntry<M>) -> bool {
        match self {
            ReplacementPolicy::Always => true,
            ReplacementPolicy::DepthPreferred { tolerance } => {
                u16::from(new.depth) + u16::from(tolerance) >= u16::from(old.depth)
            }
        }
    }
}

/// Fixed-capacity hash table of search results.
#[derive(Clone, Debug)]
pub struct TranspositionTable<M> {
    slots: Vec<Option<TableEntry<M>>>,
    mask: usize,
    policy: ReplacementPolicy,
    occupied: usize,
}

impl<M: Copy> TranspositionTable<M> {
    /// Allocate a table of `2^size_exponent` empty slots.
    pub fn new(size_exponent: u8, policy: ReplacementPolicy) -> Result<Self, SearchError> {
        if size_exponent > MAX_TABLE_EXPONENT {
            return Err(SearchError::TableTooLarge {
                exponent: size_exponent,
                max: MAX_TABLE_EXPONENT,
            });
        }

        let capacity = 1usize << size_exponent;
        let slots = std::iter::repeat_with(|| None).take(capacity).collect();

        Ok(Self {
            slots,
            mask: capacity - 1,
            policy,
            occupied: 0,
        })
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding an entry.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Replacement policy in use.
    #[must_use]
    pub fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Look up `key`. A slot holding another key is a miss.
    #[inline]
    #[must_use]
    pub fn probe(&self, key: u64) -> Option<&TableEntry<M>> {
        self.slots[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }

    /// Store `entry` subject to the replacement policy.
    ///
    /// Returns whether the entry was written.
    #[inline]
    pub fn store(&mut self, entry: TableEntry<M>) -> bool {
        let index = self.index(entry.key);
        let replace = match &self.slots[index] {
            Some(old) => self.policy.should_replace(old, &entry),
            None => {
                self.occupied += 1;
                true
            }
        };

        if replace {
            self.slots[index] = Some(entry);
        }
        replace
    }

    /// Empty every slot, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.occupied = 0;
    }
}
