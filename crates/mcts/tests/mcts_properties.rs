//! Property-based tests for the MCTS implementation.
//!
//! Properties checked over random seeds, iteration counts and positions:
//! - root visits equal the number of completed iterations
//! - batch expansion creates exactly one child per legal move
//! - an unvisited child is always preferred by UCT
//! - identical seeds give identical searches
//! - winner detection agrees with a brute-force line scan

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uct_core::{Game, Player};
use uct_mcts::{
    games::{Board, Cell, TicTacToe},
    Mcts, MctsConfig, NodeId, NodeStats, RewardAttribution, Search, Tree,
};

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Generate a random seed
fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Generate a random number of iterations (1-300 for fast tests)
fn arb_iterations() -> impl Strategy<Value = usize> {
    1usize..300
}

fn arb_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::Human), Just(Player::Ai)]
}

fn arb_reward() -> impl Strategy<Value = RewardAttribution> {
    prop_oneof![
        Just(RewardAttribution::PlayerToMove),
        Just(RewardAttribution::PlayerWhoMoved)
    ]
}

/// Generate a reachable 3x3 position by playing random moves, returning it
/// with the player to move.
fn arb_position() -> impl Strategy<Value = (Board, Player)> {
    (0usize..9, arb_seed(), arb_player()).prop_map(|(num_moves, seed, first)| {
        let game = TicTacToe::default();
        let mut state = game.initial_state();
        let mut player = first;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..num_moves {
            if game.is_terminal(&state) {
                break;
            }
            let moves = game.legal_moves(&state);
            let idx = rand::Rng::gen_range(&mut rng, 0..moves.len());
            state = game.apply(&state, moves[idx], player).unwrap();
            player = player.opponent();
        }

        (state, player)
    })
}

/// Generate an arbitrary 3x3 board, reachable or not.
fn arb_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(-1i8..=1, 9).prop_map(|values| {
        let rows: Vec<&[i8]> = values.chunks(3).collect();
        Board::from_rows(&rows).unwrap()
    })
}

fn line_winner(board: &Board) -> Option<Player> {
    let lines: [[(usize, usize); 3]; 8] = [
        [(0, 0), (0, 1), (0, 2)],
        [(0, 0), (1, 0), (2, 0)],
        [(1, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1)],
        [(2, 0), (2, 1), (2, 2)],
        [(0, 2), (1, 2), (2, 2)],
        [(0, 0), (1, 1), (2, 2)],
        [(0, 2), (1, 1), (2, 0)],
    ];
    for line in lines {
        let cells: Vec<Cell> = line.iter().map(|&(r, c)| board.get(r, c).unwrap()).collect();
        if let Cell::Taken(player) = cells[0] {
            if cells.iter().all(|&c| c == Cell::Taken(player)) {
                return Some(player);
            }
        }
    }
    None
}

// =============================================================================
// Game state properties
// =============================================================================

proptest! {
    /// Winner matches the first complete line in row/column then diagonal order
    #[test]
    fn prop_winner_matches_line_scan(board in arb_board()) {
        let game = TicTacToe::default();
        prop_assert_eq!(game.winner(&board), line_winner(&board));
    }

    /// Legal moves are exactly the empty cells
    #[test]
    fn prop_legal_moves_are_empty_cells(board in arb_board()) {
        let game = TicTacToe::default();
        let moves = game.legal_moves(&board);

        let empty = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .filter(|&(r, c)| board.get(r, c) == Some(Cell::Empty))
            .count();
        prop_assert_eq!(moves.len(), empty);
        for mv in moves {
            prop_assert_eq!(board.get(mv.row, mv.col), Some(Cell::Empty));
        }
    }

    /// Terminal iff somebody won or the board is full
    #[test]
    fn prop_terminal_classification(board in arb_board()) {
        let game = TicTacToe::default();
        let full = game.legal_moves(&board).is_empty();
        prop_assert_eq!(game.is_terminal(&board), game.winner(&board).is_some() || full);
    }
}

// =============================================================================
// Tree properties
// =============================================================================

proptest! {
    /// Expansion creates one child per legal move, each one ply away
    #[test]
    fn prop_expansion_complete((state, player) in arb_position()) {
        let game = TicTacToe::default();
        let mut tree: Tree<TicTacToe> = Tree::new(state.clone(), player);

        let children = tree.expand_all_children(&game, NodeId::ROOT).unwrap().to_vec();

        prop_assert_eq!(children.len(), game.legal_moves(&state).len());
        prop_assert!(tree.is_fully_expanded(&game, NodeId::ROOT));
        for child in children {
            let node = tree.get(child);
            let changed = state.diff(&node.state);
            prop_assert_eq!(changed.len(), 1);
            let mv = changed[0];
            prop_assert_eq!(Some(mv), node.mv);
            prop_assert_eq!(node.state.get(mv.row, mv.col), Some(Cell::Taken(player)));
            prop_assert_eq!(node.player_to_move, player.opponent());
        }
    }

    /// An unvisited child wins UCT selection regardless of the others' stats
    #[test]
    fn prop_unvisited_child_selected(
        visits in prop::collection::vec(1u64..1000, 9),
        unvisited in 0usize..9,
        parent_visits in 1u64..100_000,
    ) {
        let game = TicTacToe::default();
        let mut tree: Tree<TicTacToe> = Tree::new(game.initial_state(), Player::Ai);
        let children = tree.expand_all_children(&game, NodeId::ROOT).unwrap().to_vec();

        tree.get_mut(NodeId::ROOT).stats.visits = parent_visits;
        for (i, &child) in children.iter().enumerate() {
            let v = if i == unvisited { 0 } else { visits[i] };
            tree.get_mut(child).stats = NodeStats { visits: v, wins: v };
        }

        prop_assert_eq!(tree.best_child(NodeId::ROOT).unwrap(), children[unvisited]);
    }
}

// =============================================================================
// Search properties
// =============================================================================

proptest! {
    /// Root visits equal completed iterations
    #[test]
    fn prop_visit_conservation(
        seed in arb_seed(),
        iterations in arb_iterations(),
        (state, player) in arb_position(),
        reward in arb_reward(),
    ) {
        let game = TicTacToe::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut search = Search::new(&game, state, player, reward, &mut rng);

        for _ in 0..iterations {
            search.run_iteration().unwrap();
        }

        prop_assert_eq!(search.tree().root().stats.visits as usize, iterations);
        prop_assert_eq!(search.iterations(), iterations);
    }

    /// Parent visits are at least the sum of its children's visits
    #[test]
    fn prop_parent_visits_cover_children(
        seed in arb_seed(),
        iterations in arb_iterations(),
    ) {
        let game = TicTacToe::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut search = Search::new(
            &game,
            game.initial_state(),
            Player::Ai,
            RewardAttribution::PlayerToMove,
            &mut rng,
        );
        for _ in 0..iterations {
            search.run_iteration().unwrap();
        }

        let tree = search.tree();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = tree.get(id);
            let child_sum: u64 = node.children.iter().map(|&c| tree.get(c).stats.visits).sum();
            prop_assert!(node.stats.visits >= child_sum);
            prop_assert!(node.stats.wins <= node.stats.visits);
            stack.extend(node.children.iter().copied());
        }
    }

    /// Same seed should produce identical results
    #[test]
    fn prop_deterministic(
        seed in arb_seed(),
        iterations in arb_iterations(),
        (state, player) in arb_position(),
    ) {
        let game = TicTacToe::default();
        if game.is_terminal(&state) {
            return Ok(());
        }

        let run = || {
            let mut mcts = Mcts::new(
                MctsConfig::with_iterations(iterations),
                ChaCha8Rng::seed_from_u64(seed),
            );
            mcts.search(&game, &state, player).unwrap()
        };

        let result1 = run();
        let result2 = run();

        prop_assert_eq!(result1.best_move, result2.best_move);
        prop_assert_eq!(result1.children, result2.children);
        prop_assert_eq!(result1.state, result2.state);
    }

    /// The chosen state is a single-ply successor of the searched state
    #[test]
    fn prop_result_is_successor(
        seed in arb_seed(),
        iterations in arb_iterations(),
        (state, player) in arb_position(),
    ) {
        let game = TicTacToe::default();
        if game.is_terminal(&state) {
            return Ok(());
        }

        let mut mcts = Mcts::new(
            MctsConfig::with_iterations(iterations),
            ChaCha8Rng::seed_from_u64(seed),
        );
        let result = mcts.search(&game, &state, player).unwrap();

        prop_assert_eq!(state.diff(&result.state), vec![result.best_move]);
        prop_assert_eq!(
            result.state.get(result.best_move.row, result.best_move.col),
            Some(Cell::Taken(player))
        );
        prop_assert_eq!(result.total_visits(), iterations as u64);
    }
}
