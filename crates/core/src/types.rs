//! Player and outcome types shared by games and the search engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a two-player game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Ai,
}

impl Player {
    /// Get the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Ai,
            Player::Ai => Player::Human,
        }
    }

    /// Numeric mark used when a board is rendered as integers.
    ///
    /// Human is `1`, Ai is `-1`; empty cells render as `0`.
    pub fn mark(self) -> i8 {
        match self {
            Player::Human => 1,
            Player::Ai => -1,
        }
    }

    /// Single-character symbol: Human plays `X`, Ai plays `O`.
    pub fn symbol(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Ai => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Ai => write!(f, "ai"),
        }
    }
}

/// Result of a finished (or unfinished) game: the winner, if there is one.
///
/// `None` covers both "still in progress" and "draw"; callers combine it with
/// [`crate::Game::is_terminal`] to tell them apart.
pub type Outcome = Option<Player>;
