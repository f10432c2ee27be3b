//! MCTS configuration parameters.
//!
//! These parameters control the behavior of the Monte Carlo Tree Search algorithm.
//! Defaults reproduce the reference engine: 10000 iterations, wins credited to
//! the player to move at a node, and the final move picked with UCT.

use serde::{Deserialize, Serialize};

/// Which player a rollout win is credited to at each node on the way up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardAttribution {
    /// Credit a node when the rollout winner is the player to move there.
    ///
    /// This is the reference behavior. Since a parent picks the child with the
    /// best score, it effectively prefers moves after which the opponent wins.
    #[default]
    PlayerToMove,

    /// Credit a node when the rollout winner is the player who moved into it,
    /// so a child's win rate is measured from its parent's point of view.
    PlayerWhoMoved,
}

/// How the move is chosen among the root's children once the search ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalSelection {
    /// Reuse the exploration-aware UCT score (reference behavior).
    #[default]
    Uct,

    /// Pick the most visited child; earliest child wins ties.
    MostVisited,
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per search.
    pub iterations: usize,

    /// Reward crediting convention used during backpropagation.
    pub reward: RewardAttribution,

    /// Policy for the final move choice.
    pub final_selection: FinalSelection,

    /// Stop iterating once the tree holds this many nodes.
    /// `None` lets the tree grow without bound.
    pub max_nodes: Option<usize>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            reward: RewardAttribution::PlayerToMove,
            final_selection: FinalSelection::Uct,
            max_nodes: None,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Create a config using the standard conventions: wins credited to the
    /// player who moved, and the most visited child as the final move.
    pub fn corrected(iterations: usize) -> Self {
        Self {
            iterations,
            reward: RewardAttribution::PlayerWhoMoved,
            final_selection: FinalSelection::MostVisited,
            ..Default::default()
        }
    }

    /// Cap the number of nodes the tree may hold.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }
}
