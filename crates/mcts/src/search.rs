//! Monte Carlo Tree Search implementation.
//!
//! Implements the core MCTS loop with UCT selection and random rollouts:
//! 1. Selection: descend with UCT until a terminal or unexpanded node
//! 2. Expansion: create every child of that node at once, pick one at random
//! 3. Simulation: play uniformly random moves until the game ends
//! 4. Backpropagation: update visits and wins from the leaf up to the root

use crate::{
    config::{FinalSelection, MctsConfig, RewardAttribution},
    error::SearchError,
    node::NodeId,
    tree::Tree,
};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use uct_core::{Game, Outcome, Player};

/// UCT exploration constant.
pub const EXPLORATION: f64 = 2.0;

/// Visit statistics for one root child.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildStats<M> {
    pub mv: M,
    pub visits: u64,
    pub wins: u64,
}

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult<G: Game> {
    /// Move leading to the chosen root child.
    pub best_move: G::Move,

    /// State of the chosen root child (the board after the move).
    pub state: G::State,

    /// Statistics for every root child, in legal-move order.
    pub children: Vec<ChildStats<G::Move>>,

    /// Iterations actually run. Lower than configured when the search was
    /// cancelled or hit the node cap.
    pub iterations: usize,

    /// Number of nodes in the tree when the search ended.
    pub nodes: usize,
}

impl<G: Game> SearchResult<G> {
    /// Get the chosen move.
    pub fn best(&self) -> G::Move {
        self.best_move
    }

    /// Total visits over all root children.
    pub fn total_visits(&self) -> u64 {
        self.children.iter().map(|c| c.visits).sum()
    }
}

/// One search in progress: the tree plus the collaborators the four phases
/// need.
///
/// `Mcts::search` drives this to completion; the phases are public so they
/// can be stepped and inspected individually.
pub struct Search<'a, G: Game, R: Rng> {
    game: &'a G,
    rng: &'a mut R,
    reward: RewardAttribution,
    tree: Tree<G>,
    iterations: usize,
}

impl<'a, G, R> Search<'a, G, R>
where
    G: Game,
    R: Rng,
{
    /// Start a search from `state` with `player` to move.
    pub fn new(
        game: &'a G,
        state: G::State,
        player: Player,
        reward: RewardAttribution,
        rng: &'a mut R,
    ) -> Self {
        Self {
            game,
            rng,
            reward,
            tree: Tree::new(state, player),
            iterations: 0,
        }
    }

    /// Get the search tree.
    pub fn tree(&self) -> &Tree<G> {
        &self.tree
    }

    /// Number of completed iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run one select -> simulate -> backpropagate iteration.
    pub fn run_iteration(&mut self) -> Result<(), SearchError> {
        let leaf = self.select()?;
        let result = self.simulate(leaf)?;
        self.backpropagate(leaf, result);
        self.iterations += 1;
        Ok(())
    }

    /// Walk down from the root to the node this iteration simulates from.
    ///
    /// Stops at the first terminal node, or at the first node that is not
    /// fully expanded, which is expanded and replaced by one of its new
    /// children. Fully expanded nodes are descended through with UCT.
    pub fn select(&mut self) -> Result<NodeId, SearchError> {
        let mut current = NodeId::ROOT;
        loop {
            if self.tree.is_terminal(self.game, current) {
                return Ok(current);
            }
            if !self.tree.is_fully_expanded(self.game, current) {
                return self.expand(current);
            }
            current = self.tree.best_child(current)?;
        }
    }

    /// Expand `id` and return one of its new children chosen uniformly at
    /// random.
    ///
    /// # Errors
    /// - `SearchError::AlreadyExpanded` if `id` already has children
    /// - `SearchError::EmptyTree` if `id` has no legal moves
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId, SearchError> {
        let children = self.tree.expand_all_children(self.game, id)?;
        if children.is_empty() {
            return Err(SearchError::EmptyTree(id));
        }
        let idx = self.rng.gen_range(0..children.len());
        Ok(children[idx])
    }

    /// Play uniformly random moves from `id` until the game ends.
    ///
    /// Returns the winner, or `None` for a draw. The tree is not modified.
    pub fn simulate(&mut self, id: NodeId) -> Result<Outcome, SearchError> {
        let node = self.tree.get(id);
        let mut state = node.state.clone();
        let mut player = node.player_to_move;

        loop {
            if let Some(winner) = self.game.winner(&state) {
                return Ok(Some(winner));
            }

            let moves = self.game.legal_moves(&state);
            if moves.is_empty() {
                return Ok(None);
            }

            let mv = moves[self.rng.gen_range(0..moves.len())];
            state = self.game.apply(&state, mv, player)?;
            player = player.opponent();
        }
    }

    /// Record a rollout result on `id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, id: NodeId, result: Outcome) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.tree.get_mut(node_id);
            node.stats.visits += 1;
            if credited(self.reward, node.player_to_move, result) {
                node.stats.wins += 1;
            }
            current = node.parent;
        }
    }

    /// Collect root children statistics and the chosen child into a result.
    fn finish(self, selection: FinalSelection) -> Result<SearchResult<G>, SearchError> {
        let chosen = match selection {
            FinalSelection::Uct => self.tree.best_child(NodeId::ROOT)?,
            FinalSelection::MostVisited => self.tree.most_visited_child(NodeId::ROOT)?,
        };

        let children = self
            .tree
            .children(NodeId::ROOT)
            .iter()
            .filter_map(|&id| {
                let node = self.tree.get(id);
                node.mv.map(|mv| ChildStats {
                    mv,
                    visits: node.stats.visits,
                    wins: node.stats.wins,
                })
            })
            .collect();

        let node = self.tree.get(chosen);
        let best_move = node.mv.ok_or(SearchError::EmptyTree(NodeId::ROOT))?;

        Ok(SearchResult {
            best_move,
            state: node.state.clone(),
            children,
            iterations: self.iterations,
            nodes: self.tree.len(),
        })
    }
}

/// Whether a node whose player to move is `player` earns a win for `result`.
fn credited(reward: RewardAttribution, player: Player, result: Outcome) -> bool {
    match (reward, result) {
        (_, None) => false,
        (RewardAttribution::PlayerToMove, Some(winner)) => winner == player,
        (RewardAttribution::PlayerWhoMoved, Some(winner)) => winner == player.opponent(),
    }
}

/// Monte Carlo Tree Search with UCT selection.
///
/// Owns the configuration and the random source. Each call to
/// [`Mcts::search`] builds a fresh tree and drops it before returning.
pub struct Mcts<R: Rng> {
    config: MctsConfig,
    rng: R,
}

impl<R: Rng> Mcts<R> {
    /// Create a new MCTS instance.
    pub fn new(config: MctsConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Get the configuration.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run MCTS from `state` with `player` to move.
    ///
    /// # Errors
    /// Returns `SearchError::EmptyTree` when `state` is terminal or the root
    /// was never expanded (zero iterations).
    pub fn search<G: Game>(
        &mut self,
        game: &G,
        state: &G::State,
        player: Player,
    ) -> Result<SearchResult<G>, SearchError> {
        self.run(game, state, player, None)
    }

    /// Like [`Mcts::search`], but stops early once `cancel` is set.
    ///
    /// The flag is checked between iterations; a rollout in progress always
    /// completes.
    pub fn search_cancellable<G: Game>(
        &mut self,
        game: &G,
        state: &G::State,
        player: Player,
        cancel: &AtomicBool,
    ) -> Result<SearchResult<G>, SearchError> {
        self.run(game, state, player, Some(cancel))
    }

    fn run<G: Game>(
        &mut self,
        game: &G,
        state: &G::State,
        player: Player,
        cancel: Option<&AtomicBool>,
    ) -> Result<SearchResult<G>, SearchError> {
        if game.is_terminal(state) {
            return Err(SearchError::EmptyTree(NodeId::ROOT));
        }

        let mut search = Search::new(
            game,
            state.clone(),
            player,
            self.config.reward,
            &mut self.rng,
        );

        for _ in 0..self.config.iterations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                info!(iterations = search.iterations(), "search cancelled");
                break;
            }

            search.run_iteration()?;

            if let Some(max_nodes) = self.config.max_nodes {
                if search.tree().len() >= max_nodes {
                    warn!(
                        iterations = search.iterations(),
                        nodes = search.tree().len(),
                        max_nodes,
                        "node limit reached, stopping search early"
                    );
                    break;
                }
            }
        }

        let result = search.finish(self.config.final_selection)?;
        debug!(
            iterations = result.iterations,
            nodes = result.nodes,
            best_move = ?result.best_move,
            "search finished"
        );
        Ok(result)
    }
}
