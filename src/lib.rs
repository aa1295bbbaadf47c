//! Gotcha: a Monte Carlo Go engine.
//!
//! An incremental board/group engine (intrusive stone lists, exact liberty
//! counts, positional superko via 128-bit Zobrist hashing) driving a UCT
//! Monte Carlo tree search, fronted by the Go Text Protocol.
//!
//! ## Modules
//!
//! - [`tile`] - Colours, results, coordinates and adjacency
//! - [`link`] - Intrusive linked lists over the shared tile array
//! - [`zobrist`] - Position hashing for superko detection
//! - [`board`] - Groups, placement, capture, scoring, history and legality
//! - [`tree`] - The per-search node arena
//! - [`mcts`] - UCT selection, random rollouts, backpropagation
//! - [`timer`] - Main-time and byo-yomi move budgeting
//! - [`parse`] - GTP vertex and colour parsing
//! - [`gtp`] - The GTP v2 command loop
//!
//! ## Example
//!
//! ```
//! use gotcha::board::Board;
//! use gotcha::mcts::Mcts;
//! use gotcha::parse::vertex_string;
//!
//! let mut mcts = Mcts::new(Board::new(9));
//! mcts.set_max_nodes(100);
//! let best = mcts.search();
//! println!("best move: {}", vertex_string(best, 9));
//! ```

pub mod board;
pub mod gtp;
pub mod link;
pub mod mcts;
pub mod parse;
pub mod tile;
pub mod timer;
pub mod tree;
pub mod zobrist;
