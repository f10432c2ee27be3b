//! Command-line driver for the UCT tic-tac-toe engine.
//!
//! `move` reproduces the classic run: an empty board, the AI to move, ten
//! thousand iterations, and the resulting board printed row by row.
//! `selfplay` plays whole games against a random or engine opponent.

mod selfplay;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use selfplay::{Opponent, SelfPlay, Summary};
use std::time::Instant;
use tracing::info;
use uct_core::{Game, Player};
use uct_mcts::{
    games::{Board, TicTacToe},
    FinalSelection, Mcts, MctsConfig, RewardAttribution, SearchResult,
};

/// UCT tic-tac-toe engine.
#[derive(Parser)]
#[command(name = "uct-play")]
#[command(about = "Pick tic-tac-toe moves with Monte Carlo Tree Search")]
struct Cli {
    /// Log level, used when RUST_LOG is not set.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose one move from an empty board and print the resulting board.
    Move {
        #[command(flatten)]
        engine: EngineArgs,

        /// Player to move on the empty board.
        #[arg(long, value_enum, default_value = "ai")]
        first: Side,

        /// Print X/O/. instead of 1/-1/0.
        #[arg(long)]
        symbols: bool,

        /// Print per-move visit statistics to stderr.
        #[arg(long)]
        stats: bool,
    },

    /// Play complete games against an opponent and report the results.
    Selfplay {
        #[command(flatten)]
        engine: EngineArgs,

        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Opponent type.
        #[arg(long, value_enum, default_value = "random")]
        opponent: Opponent,

        /// Iterations per move for an engine opponent.
        #[arg(long, default_value = "1000")]
        opponent_iterations: usize,

        /// Print each game as a JSON line.
        #[arg(long)]
        json: bool,
    },
}

/// Search settings shared by all subcommands.
#[derive(Args, Clone, Debug)]
struct EngineArgs {
    /// Board side length.
    #[arg(long, default_value = "3")]
    size: usize,

    /// Iterations per search.
    #[arg(short, long, default_value = "10000")]
    iterations: usize,

    /// Random seed for reproducibility (entropy when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Which player a rollout win is credited to.
    #[arg(long, value_enum, default_value = "to-move")]
    reward: Reward,

    /// How the final move is chosen among the root's children.
    #[arg(long = "final", value_enum, default_value = "uct")]
    final_selection: Final,

    /// Stop a search once the tree holds this many nodes.
    #[arg(long)]
    max_nodes: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Human,
    Ai,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Reward {
    /// Credit the player to move at each node.
    ToMove,
    /// Credit the player who moved into each node.
    Mover,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Final {
    /// Reuse the UCT score.
    Uct,
    /// Most visited child.
    Visits,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Player::Human,
            Side::Ai => Player::Ai,
        }
    }
}

impl EngineArgs {
    fn config(&self) -> MctsConfig {
        MctsConfig {
            iterations: self.iterations,
            reward: match self.reward {
                Reward::ToMove => RewardAttribution::PlayerToMove,
                Reward::Mover => RewardAttribution::PlayerWhoMoved,
            },
            final_selection: match self.final_selection {
                Final::Uct => FinalSelection::Uct,
                Final::Visits => FinalSelection::MostVisited,
            },
            max_nodes: self.max_nodes,
        }
    }

    fn game(&self) -> Result<TicTacToe> {
        TicTacToe::new(self.size)
            .with_context(|| format!("Cannot play on a board of size {}", self.size))
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Render a board as rows of space-separated cell values.
fn render_values(board: &Board) -> String {
    board
        .to_values()
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .map(|line| line + "\n")
        .collect()
}

fn print_stats(result: &SearchResult<TicTacToe>) {
    eprintln!(
        "{} iterations, {} nodes, chosen move {}",
        result.iterations, result.nodes, result.best_move
    );
    for child in &result.children {
        let rate = if child.visits == 0 {
            0.0
        } else {
            child.wins as f64 / child.visits as f64
        };
        eprintln!(
            "  {}: visits {:>6}  wins {:>6}  rate {:.3}",
            child.mv, child.visits, child.wins, rate
        );
    }
}

/// Run the move command.
fn cmd_move(engine: EngineArgs, first: Side, symbols: bool, stats: bool) -> Result<()> {
    let game = engine.game()?;
    let config = engine.config();
    info!(?config, size = game.size(), "searching first move");

    let start = Instant::now();
    let mut mcts = Mcts::new(config, engine.rng());
    let result = mcts
        .search(&game, &game.initial_state(), first.into())
        .context("Search failed")?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "search complete");

    if stats {
        print_stats(&result);
    }
    if symbols {
        print!("{}", result.state);
    } else {
        print!("{}", render_values(&result.state));
    }
    Ok(())
}

/// Run the selfplay command.
fn cmd_selfplay(
    engine: EngineArgs,
    games: usize,
    opponent: Opponent,
    opponent_iterations: usize,
    json: bool,
) -> Result<()> {
    let seed = engine.seed.unwrap_or_else(rand::random);
    let runner = SelfPlay {
        game: engine.game()?,
        engine: engine.config(),
        opponent,
        opponent_iterations,
        seed,
    };

    println!(
        "Playing {} games: engine ({} iterations) vs {:?}",
        games, engine.iterations, opponent
    );
    println!("Seed: {}", seed);

    let start = Instant::now();
    let records = runner.run(games)?;
    let elapsed = start.elapsed();

    if json {
        for record in &records {
            println!("{}", serde_json::to_string(record).context("Failed to serialize game")?);
        }
    }

    let summary = Summary::from_records(&records);
    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    println!(
        "Engine wins: {}, Opponent wins: {}, Draws: {} ({} games)",
        summary.engine_wins,
        summary.opponent_wins,
        summary.draws,
        summary.total()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Move {
            engine,
            first,
            symbols,
            stats,
        } => cmd_move(engine, first, symbols, stats),

        Commands::Selfplay {
            engine,
            games,
            opponent,
            opponent_iterations,
            json,
        } => cmd_selfplay(engine, games, opponent, opponent_iterations, json),
    }
}
