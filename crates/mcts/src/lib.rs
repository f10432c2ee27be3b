//! Monte Carlo Tree Search with UCT selection.
//!
//! This crate provides a generic MCTS implementation that can be used with
//! any game implementing the `uct_core::Game` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation
//! - **UCT Selection**: `wins / visits + 2 * sqrt(N / visits)`, unvisited first
//! - **Batch Expansion**: A node gets all of its children on its first visit
//! - **Random Rollouts**: Uniformly random playouts to a terminal state
//! - **Injected Randomness**: Any `rand::Rng`, so seeded runs are reproducible
//! - **Bounded Search**: Optional node cap and cooperative cancellation
//!
//! # Example
//!
//! ```
//! use uct_mcts::{Mcts, MctsConfig, games::TicTacToe};
//! use uct_core::{Game, Player};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = TicTacToe::default();
//! let state = game.initial_state();
//!
//! let config = MctsConfig::with_iterations(1000);
//! let mut mcts = Mcts::new(config, ChaCha8Rng::seed_from_u64(42));
//!
//! let result = mcts.search(&game, &state, Player::Ai).expect("non-terminal root");
//! println!("Best move: {}", result.best_move);
//! print!("{}", result.state);
//! ```

pub mod config;
mod error;
pub mod games;
mod node;
pub mod search;
mod tree;

pub use config::{FinalSelection, MctsConfig, RewardAttribution};
pub use error::SearchError;
pub use node::{Node, NodeId, NodeStats};
pub use search::{ChildStats, Mcts, Search, SearchResult, EXPLORATION};
pub use tree::Tree;
