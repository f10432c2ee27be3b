use thiserror::Error;

/// Errors raised at the game-state boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move: cell ({row}, {col}) is already occupied")]
    InvalidMove { row: usize, col: usize },

    #[error("Move ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("Invalid board size: {0}")]
    InvalidBoardSize(usize),

    #[error("Invalid cell value {0}: expected -1, 0 or 1")]
    InvalidCell(i8),
}

/// Convenience Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
