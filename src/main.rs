//! Gotcha: a Monte Carlo Go engine.
//!
//! ## Usage
//!
//! - `gotcha` - Start the GTP server (the default)
//! - `gotcha gtp --nodes 50000 --log` - GTP server with a bigger search
//! - `gotcha perft --size 3 --depth 4` - Legal-move-tree counts
//! - `gotcha demo` - Search an empty board once and show the result

use clap::{Parser, Subcommand};

use gotcha::board::Board;
use gotcha::gtp::GtpEngine;
use gotcha::mcts::Mcts;
use gotcha::parse::vertex_string;
use gotcha::tile::MAX_BOARD_SIZE;

/// Gotcha: a Monte Carlo Go engine
#[derive(Parser)]
#[command(name = "gotcha")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        /// Search-tree node budget per move
        #[arg(long, default_value_t = 10_000)]
        nodes: usize,
        /// Print search statistics to stderr
        #[arg(long)]
        log: bool,
    },
    /// Count legal move sequences to a fixed depth
    Perft {
        /// Board side length
        #[arg(long, default_value_t = 3)]
        size: u16,
        /// Maximum depth to count to
        #[arg(long, default_value_t = 4)]
        depth: u8,
    },
    /// Run one search on an empty board and show the result
    Demo,
}

fn main() {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Gtp {
        nodes: 10_000,
        log: false,
    }) {
        Commands::Gtp { nodes, log } => {
            let mut engine = GtpEngine::new();
            engine.set_max_nodes(nodes);
            engine.set_logging(log);
            engine.run();
        }
        Commands::Perft { size, depth } => {
            if size < 1 || size > MAX_BOARD_SIZE {
                eprintln!("board size must be between 1 and {MAX_BOARD_SIZE}");
                std::process::exit(1);
            }
            let mut board = Board::new(size);
            for d in 0..=depth {
                println!("depth {d}: {} nodes", board.run_perft(d));
            }
        }
        Commands::Demo => {
            let mut mcts = Mcts::new(Board::new(9));
            mcts.set_logging(true);

            let best = mcts.search();
            println!("best move: {}", vertex_string(best, mcts.board.size()));
            mcts.board.make_move(best);
            println!("{}", mcts.board);
        }
    }
}
