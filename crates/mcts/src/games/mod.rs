//! Game implementations searchable by the engine.

pub mod tictactoe;

pub use tictactoe::{Board, Cell, Move, TicTacToe};
