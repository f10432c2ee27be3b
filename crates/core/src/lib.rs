//! UCT Core - Game abstractions and common types
//!
//! This crate provides the `Game` trait that any two-player, turn-based,
//! perfect-information game implements to be searchable by the UCT engine.
//!
//! # Types
//!
//! - [`Game`] - Trait for game implementations
//! - [`Player`] - One of the two sides
//! - [`Outcome`] - Winner of a position, if any

mod error;
mod game;
mod types;

pub use error::{GameError, Result};
pub use game::Game;
pub use types::{Outcome, Player};
