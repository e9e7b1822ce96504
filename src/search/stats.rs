//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one `best_move` call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes visited (every recursive call, root included).
    pub nodes: u64,

    /// Nodes answered by the static score (depth 0, terminal, no moves).
    pub leaves: u64,

    /// Sibling enumerations stopped by a beta cutoff or a forced win.
    pub cutoffs: u64,

    /// Table probes.
    pub table_probes: u64,

    /// Probes that found an entry for the same key and enough depth.
    pub table_hits: u64,

    /// Hits that answered the node without searching it.
    pub table_cutoffs: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate nodes per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of probes that were hits.
    #[must_use]
    pub fn table_hit_rate(&self) -> f64 {
        if self.table_probes == 0 {
            0.0
        } else {
            self.table_hits as f64 / self.table_probes as f64
        }
    }
}
