//! Two-player side identification.
//!
//! ## Player
//!
//! Type-safe identifier for the two sides of a zero-sum game. Player One
//! moves first. Scores kept "from player One's view" are converted to the
//! mover's view with [`Player::sign`].

use serde::{Deserialize, Serialize};

use super::score::Score;

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The side that moves first.
    One,
    /// The side that moves second.
    Two,
}

impl Player {
    /// Get the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Get the raw player index (0 for One, 1 for Two).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Perspective factor: `+1` for One, `-1` for Two.
    ///
    /// ```
    /// use rust_negamax::core::Player;
    ///
    /// let one_view = 42;
    /// assert_eq!(one_view * Player::One.sign(), 42);
    /// assert_eq!(one_view * Player::Two.sign(), -42);
    /// ```
    #[must_use]
    pub const fn sign(self) -> Score {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// Iterate over both players in turn order.
    pub fn both() -> impl Iterator<Item = Player> {
        [Player::One, Player::Two].into_iter()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for player in Player::both() {
            assert_ne!(player.opponent(), player);
            assert_eq!(player.opponent().opponent(), player);
        }
    }

    #[test]
    fn test_index_and_sign() {
        assert_eq!(Player::One.index(), 0);
        assert_eq!(Player::Two.index(), 1);
        assert_eq!(Player::One.sign() + Player::Two.sign(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Player::One.to_string(), "Player 1");
        assert_eq!(Player::Two.to_string(), "Player 2");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Player::Two).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Player::Two);
    }
}
