//! Search configuration parameters.

use serde::{Deserialize, Serialize};

use super::error::SearchError;
use super::table::{ReplacementPolicy, MAX_TABLE_EXPONENT};

/// Transposition table parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// The table holds `2^size_exponent` slots.
    pub size_exponent: u8,

    /// Overwrite rule for occupied slots.
    pub replacement: ReplacementPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            size_exponent: 19,
            replacement: ReplacementPolicy::default(),
        }
    }
}

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Depth in plies used by `AlphaBetaSearch::search`.
    pub depth: u8,

    /// Transposition table, if any.
    /// `None` runs plain alpha-beta without memoization.
    pub table: Option<TableConfig>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 8,
            table: None,
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with a transposition table.
    pub fn with_table(mut self, size_exponent: u8, replacement: ReplacementPolicy) -> Self {
        self.table = Some(TableConfig {
            size_exponent,
            replacement,
        });
        self
    }

    /// Create a new config without a transposition table.
    pub fn without_table(mut self) -> Self {
        self.table = None;
        self
    }

    /// Check the parameters before any allocation happens.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        if let Some(table) = &self.table {
            if table.size_exponent > MAX_TABLE_EXPONENT {
                return Err(SearchError::TableTooLarge {
                    exponent: table.size_exponent,
                    max: MAX_TABLE_EXPONENT,
                });
            }
        }
        Ok(())
    }
}
