//! Tic-tac-toe on an N×N board.
//!
//! The classic game is 3×3; larger boards keep the same rule that a player
//! must fill a whole row, column or diagonal. Tic-tac-toe is small enough that
//! a rollout always reaches a terminal position within `N * N` plies, which
//! keeps every simulation bounded.

use serde::{Deserialize, Serialize};
use std::fmt;
use uct_core::{Game, GameError, Outcome, Player, Result};

/// Default side length.
pub const DEFAULT_SIZE: usize = 3;

/// Contents of a single board cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Player),
}

impl Cell {
    /// Numeric value of the cell: `0` when empty, otherwise the player's mark.
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Taken(player) => player.mark(),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A board cell coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Square tic-tac-toe board.
///
/// Cells are stored row-major:
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Errors
    /// Returns `GameError::InvalidBoardSize` for a zero side length.
    pub fn empty(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidBoardSize(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Build a board from numeric rows (`0` empty, `1` human, `-1` ai).
    ///
    /// # Errors
    /// - `GameError::InvalidBoardSize` if the rows do not form a non-empty square
    /// - `GameError::InvalidCell` for a value other than `-1`, `0` or `1`
    pub fn from_rows(rows: &[&[i8]]) -> Result<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return Err(GameError::InvalidBoardSize(size));
        }

        let mut cells = Vec::with_capacity(size * size);
        for &value in rows.iter().flat_map(|row| row.iter()) {
            let cell = match value {
                0 => Cell::Empty,
                1 => Cell::Taken(Player::Human),
                -1 => Cell::Taken(Player::Ai),
                other => return Err(GameError::InvalidCell(other)),
            };
            cells.push(cell);
        }
        Ok(Self { size, cells })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the cell at (row, col), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Numeric rendering of the board, one `Vec` per row.
    pub fn to_values(&self) -> Vec<Vec<i8>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.value()).collect())
            .collect()
    }

    /// Positions whose cell differs between two boards of the same size.
    pub fn diff(&self, other: &Board) -> Vec<Move> {
        self.cells
            .iter()
            .zip(&other.cells)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| Move::new(i / self.size, i % self.size))
            .collect()
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    fn line_owner(&self, cells: impl Iterator<Item = Cell>) -> Outcome {
        let mut owner = None;
        for cell in cells {
            match (cell, owner) {
                (Cell::Empty, _) => return None,
                (Cell::Taken(p), None) => owner = Some(p),
                (Cell::Taken(p), Some(o)) if p != o => return None,
                _ => {}
            }
        }
        owner
    }

    /// Check for a complete line.
    ///
    /// Lines are checked in the order row 0, column 0, row 1, column 1, ...,
    /// then the main diagonal and the anti-diagonal; the first complete line
    /// decides the winner.
    fn check_winner(&self) -> Outcome {
        let n = self.size;
        for i in 0..n {
            let row = self.line_owner((0..n).map(|c| self.cells[i * n + c]));
            if row.is_some() {
                return row;
            }
            let col = self.line_owner((0..n).map(|r| self.cells[r * n + i]));
            if col.is_some() {
                return col;
            }
        }

        let diagonal = self.line_owner((0..n).map(|i| self.cells[i * n + i]));
        if diagonal.is_some() {
            return diagonal;
        }
        self.line_owner((0..n).map(|i| self.cells[i * n + (n - 1 - i)]))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Taken(p) => p.symbol().to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Tic-tac-toe game implementation.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    size: usize,
}

impl TicTacToe {
    /// Create a game on a `size`×`size` board.
    ///
    /// # Errors
    /// Returns `GameError::InvalidBoardSize` for a zero side length.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidBoardSize(size));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE }
    }
}

impl Game for TicTacToe {
    type State = Board;
    type Move = Move;

    fn initial_state(&self) -> Self::State {
        Board {
            size: self.size,
            cells: vec![Cell::Empty; self.size * self.size],
        }
    }

    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move> {
        state
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| Move::new(i / state.size, i % state.size))
            .collect()
    }

    fn winner(&self, state: &Self::State) -> Outcome {
        state.check_winner()
    }

    fn apply(&self, state: &Self::State, mv: Self::Move, player: Player) -> Result<Self::State> {
        let cell = state.get(mv.row, mv.col).ok_or(GameError::OutOfBounds {
            row: mv.row,
            col: mv.col,
            size: state.size,
        })?;
        if !cell.is_empty() {
            return Err(GameError::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }

        let mut next = state.clone();
        next.cells[mv.row * state.size + mv.col] = Cell::Taken(player);
        Ok(next)
    }
}
