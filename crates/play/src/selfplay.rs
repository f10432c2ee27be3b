//! Complete games between the engine and an opponent.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;
use uct_core::{Game, Player};
use uct_mcts::{
    games::{Move, TicTacToe},
    Mcts, MctsConfig,
};

/// Who plays against the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Opponent {
    /// Uniformly random legal moves.
    Random,
    /// A second engine using the reference settings.
    Mcts,
}

/// A finished game. The engine always plays `Player::Ai`.
#[derive(Serialize, Debug)]
pub struct GameRecord {
    pub game: usize,
    pub seed: u64,
    pub first: Player,
    pub moves: Vec<Move>,
    pub winner: Option<Player>,
    pub board: Vec<Vec<i8>>,
}

/// Tally of finished games from the engine's point of view.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub engine_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = Summary::default();
        for record in records {
            match record.winner {
                Some(Player::Ai) => summary.engine_wins += 1,
                Some(Player::Human) => summary.opponent_wins += 1,
                None => summary.draws += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.engine_wins + self.opponent_wins + self.draws
    }
}

/// Settings shared by every game of a self-play run.
#[derive(Clone, Debug)]
pub struct SelfPlay {
    pub game: TicTacToe,
    pub engine: MctsConfig,
    pub opponent: Opponent,
    pub opponent_iterations: usize,
    pub seed: u64,
}

impl SelfPlay {
    /// Play `games` games in parallel. The engine moves first in even games.
    pub fn run(&self, games: usize) -> Result<Vec<GameRecord>> {
        (0..games)
            .into_par_iter()
            .map(|i| {
                let first = if i % 2 == 0 { Player::Ai } else { Player::Human };
                let seed = self.seed.wrapping_add(i as u64 * 1000);
                self.play_game(i, seed, first)
                    .with_context(|| format!("Game {} (seed {}) failed", i, seed))
            })
            .collect()
    }

    /// Play one game to the end.
    pub fn play_game(&self, index: usize, seed: u64, first: Player) -> Result<GameRecord> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut engine = Mcts::new(
            self.engine.clone(),
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        );
        let mut opponent = Mcts::new(
            MctsConfig::with_iterations(self.opponent_iterations),
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(2)),
        );

        let mut state = self.game.initial_state();
        let mut player = first;
        let mut moves = Vec::new();

        while !self.game.is_terminal(&state) {
            let mv = match (player, self.opponent) {
                (Player::Ai, _) => engine.search(&self.game, &state, player)?.best_move,
                (Player::Human, Opponent::Mcts) => {
                    opponent.search(&self.game, &state, player)?.best_move
                }
                (Player::Human, Opponent::Random) => {
                    let legal = self.game.legal_moves(&state);
                    legal[rng.gen_range(0..legal.len())]
                }
            };

            state = self.game.apply(&state, mv, player)?;
            moves.push(mv);
            player = player.opponent();
        }

        let winner = self.game.winner(&state);
        debug!(game = index, seed, plies = moves.len(), ?winner, "game finished");

        Ok(GameRecord {
            game: index,
            seed,
            first,
            moves,
            winner,
            board: state.to_values(),
        })
    }
}
