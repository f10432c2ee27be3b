//! Arena-allocated MCTS tree.
//!
//! Nodes live in a `Vec<Node>` and refer to each other by index. Parent
//! links are plain indices, so dropping the tree frees every node at once.

use crate::error::SearchError;
use crate::node::{Node, NodeId};
use crate::search::EXPLORATION;
use tracing::trace;
use uct_core::{Game, Player};

/// Arena-allocated MCTS tree.
///
/// Nodes are stored in a contiguous vector and referenced by index.
/// Nodes are only ever appended, so a `NodeId` stays valid for the
/// lifetime of the tree.
#[derive(Debug)]
pub struct Tree<G: Game> {
    nodes: Vec<Node<G::State, G::Move>>,
}

impl<G: Game> Tree<G> {
    /// Create a tree containing only the root.
    pub fn new(initial_state: G::State, player_to_move: Player) -> Self {
        Self {
            nodes: vec![Node::root(initial_state, player_to_move)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &Node<G::State, G::Move> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<G::State, G::Move> {
        &mut self.nodes[id.0]
    }

    /// Get the root node.
    pub fn root(&self) -> &Node<G::State, G::Move> {
        self.get(NodeId::ROOT)
    }

    /// Parent of a node (None for root).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    /// Children of a node, in legal-move order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Walk from `id` up to the root, both inclusive.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&current| self.parent(current))
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true, the root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether every legal move of the node has a child.
    pub fn is_fully_expanded(&self, game: &G, id: NodeId) -> bool {
        let node = self.get(id);
        node.children.len() == game.legal_moves(&node.state).len()
    }

    /// Whether the node's state is terminal.
    pub fn is_terminal(&self, game: &G, id: NodeId) -> bool {
        game.is_terminal(&self.get(id).state)
    }

    /// Create one child per legal move of `id`, all at once.
    ///
    /// Children are appended in legal-move order; each holds the parent's state
    /// with the move applied for the parent's player to move, and passes the
    /// turn to the opponent. Returns the new children.
    ///
    /// # Errors
    /// - `SearchError::AlreadyExpanded` if the node already has children
    /// - `SearchError::Game` if the game rejects one of its own legal moves
    pub fn expand_all_children(&mut self, game: &G, id: NodeId) -> Result<&[NodeId], SearchError> {
        if self.get(id).is_expanded() {
            return Err(SearchError::AlreadyExpanded(id));
        }

        let player = self.get(id).player_to_move;
        let children = game
            .legal_moves(&self.get(id).state)
            .into_iter()
            .map(|mv| {
                let state = game.apply(&self.get(id).state, mv, player)?;
                Ok(Node::child(state, player.opponent(), mv, id))
            })
            .collect::<Result<Vec<_>, SearchError>>()?;

        let first = self.nodes.len();
        self.nodes.extend(children);
        let ids: Vec<NodeId> = (first..self.nodes.len()).map(NodeId).collect();
        trace!(node = id.0, children = ids.len(), "expanded node");

        let node = self.get_mut(id);
        node.children = ids;
        Ok(&node.children)
    }

    /// Select the child of `id` with the highest UCT score.
    ///
    /// The first unvisited child is returned immediately. Otherwise each child
    /// scores `wins / visits + EXPLORATION * sqrt(N / visits)` with `N` the
    /// parent's current visits; the first child with the strictly greatest
    /// score wins.
    ///
    /// # Errors
    /// Returns `SearchError::EmptyTree` if the node has no children.
    pub fn best_child(&self, id: NodeId) -> Result<NodeId, SearchError> {
        let node = self.get(id);
        let parent_visits = node.stats.visits;

        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for &child_id in &node.children {
            let stats = self.get(child_id).stats;
            if stats.visits == 0 {
                return Ok(child_id);
            }
            let score = stats.uct_score(parent_visits, EXPLORATION);
            if score > best_score {
                best_score = score;
                best = Some(child_id);
            }
        }

        best.ok_or(SearchError::EmptyTree(id))
    }

    /// Select the child of `id` with the most visits; the first child wins ties.
    ///
    /// # Errors
    /// Returns `SearchError::EmptyTree` if the node has no children.
    pub fn most_visited_child(&self, id: NodeId) -> Result<NodeId, SearchError> {
        let mut best: Option<(NodeId, u64)> = None;
        for &child_id in self.children(id) {
            let visits = self.get(child_id).stats.visits;
            if best.map_or(true, |(_, most)| visits > most) {
                best = Some((child_id, visits));
            }
        }
        best.map(|(child_id, _)| child_id)
            .ok_or(SearchError::EmptyTree(id))
    }
}
