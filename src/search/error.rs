//! Search configuration errors.

use thiserror::Error;

/// Errors raised while configuring a search.
///
/// Searching itself never fails; only configuration is validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Requested table would have more than `2^max` slots.
    #[error("transposition table exponent {exponent} exceeds the maximum of {max}")]
    TableTooLarge { exponent: u8, max: u8 },

    /// Configured default depth is zero.
    #[error("search depth must be at least 1")]
    ZeroDepth,
}
