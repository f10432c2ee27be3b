//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler memory management.

use uct_core::Player;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Parents are stored as indices too, so upward walks need no
/// reference-counted back pointers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Statistics for a single MCTS node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Number of simulations backpropagated through this node.
    pub visits: u64,

    /// Number of those simulations credited as a win at this node.
    pub wins: u64,
}

impl NodeStats {
    /// Fraction of visits credited as wins.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }

    /// UCT score of a child with these stats under a parent visited
    /// `parent_visits` times:
    ///
    /// `wins / visits + c * sqrt(parent_visits / visits)`
    ///
    /// Unvisited nodes score `f64::INFINITY`.
    pub fn uct_score(&self, parent_visits: u64, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        self.win_rate() + exploration * (parent_visits as f64 / visits).sqrt()
    }
}

/// A node in the MCTS tree.
///
/// Each node represents a game state together with the player to move there.
#[derive(Clone, Debug)]
pub struct Node<S, M> {
    /// Game state at this node.
    pub state: S,

    /// Player whose turn it is at this node.
    pub player_to_move: Player,

    /// Move that led to this node (None for root).
    pub mv: Option<M>,

    /// Parent node (None for root).
    pub parent: Option<NodeId>,

    /// Children in legal-move order; empty until the node is expanded.
    pub children: Vec<NodeId>,

    /// Visit and win counters.
    pub stats: NodeStats,
}

impl<S, M> Node<S, M> {
    /// Create the root node.
    pub fn root(state: S, player_to_move: Player) -> Self {
        Self {
            state,
            player_to_move,
            mv: None,
            parent: None,
            children: Vec::new(),
            stats: NodeStats::default(),
        }
    }

    /// Create an unexpanded child reached from `parent` by `mv`.
    pub fn child(state: S, player_to_move: Player, mv: M, parent: NodeId) -> Self {
        Self {
            state,
            player_to_move,
            mv: Some(mv),
            parent: Some(parent),
            children: Vec::new(),
            stats: NodeStats::default(),
        }
    }

    /// Whether children have been generated.
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }
}
