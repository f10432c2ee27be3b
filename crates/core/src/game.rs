use crate::{Outcome, Player, Result};
use std::fmt::Debug;
use std::hash::Hash;

/// A game abstraction for tree search.
///
/// This trait defines the interface that any game must implement to be
/// searchable by the engine: enumerable moves, a deterministic terminal test
/// and a deterministic transition. The side to move is not part of the state;
/// the search tracks it and passes it to [`Game::apply`].
pub trait Game: Clone + Send + Sync {
    /// The game state (e.g., a tic-tac-toe board)
    type State: Clone + Debug + Send;

    /// A game move (e.g., a board cell)
    type Move: Clone + Copy + Debug + Send + Eq + Hash;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns all legal moves from the given state, in a stable order.
    ///
    /// Must be empty iff no move can be made. A position that already has a
    /// winner may still report moves; terminality is decided by
    /// [`Game::is_terminal`].
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Returns the winner of the position, or `None` if nobody has won
    /// (including drawn positions).
    fn winner(&self, state: &Self::State) -> Outcome;

    /// Applies a move for `player`, returning a new state (immutable operation).
    ///
    /// # Errors
    /// Returns an error if the move is not playable in `state`.
    fn apply(&self, state: &Self::State, mv: Self::Move, player: Player) -> Result<Self::State>;

    /// Returns true if the game has ended: somebody won or no moves remain.
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.winner(state).is_some() || self.legal_moves(state).is_empty()
    }
}
