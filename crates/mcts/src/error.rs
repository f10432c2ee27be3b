use crate::node::NodeId;
use thiserror::Error;
use uct_core::GameError;

/// Errors that can occur during MCTS search.
///
/// Every variant is a broken calling contract rather than an expected runtime
/// event; nothing in the engine retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Node {0:?} has already been expanded")]
    AlreadyExpanded(NodeId),

    #[error("Node {0:?} has no children to choose from")]
    EmptyTree(NodeId),

    #[error("Game error: {0}")]
    Game(#[from] GameError),
}
