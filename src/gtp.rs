//! Go Text Protocol (GTP) implementation.
//!
//! GTP version 2: line-oriented commands with optional numeric ids, `=`
//! responses on success and `?` on failure, each terminated by a blank line.
//! This is the surface graphical frontends like GoGui or Sabaki drive.
//!
//! ## Example
//!
//! ```ignore
//! use gotcha::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! engine.run();
//! ```

use std::io::{self, BufRead, Write};

use crate::board::Board;
use crate::mcts::Mcts;
use crate::parse::{parse_colour, parse_vertex, vertex_string};
use crate::tile::{Colour, MAX_BOARD_SIZE};
use crate::timer::Timer;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "get_komi",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "perft",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "stones",
    "time_settings",
    "undo",
    "version",
];

const DEFAULT_BOARD_SIZE: u16 = 9;

/// GTP engine state: the searcher (which owns the live board) plus the
/// configured board size for rebuilds.
pub struct GtpEngine {
    searcher: Mcts,
    size: u16,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Create a new GTP engine with default settings.
    pub fn new() -> Self {
        Self {
            searcher: Mcts::new(Board::new(DEFAULT_BOARD_SIZE)),
            size: DEFAULT_BOARD_SIZE,
        }
    }

    /// Cap the search tree at `max_nodes` nodes per move.
    pub fn set_max_nodes(&mut self, max_nodes: usize) {
        self.searcher.set_max_nodes(max_nodes);
    }

    /// Print search statistics to stderr after every `genmove`.
    pub fn set_logging(&mut self, logging: bool) {
        self.searcher.set_logging(logging);
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse optional command ID
            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(stdout, "{prefix}{id_str} {message}\n").unwrap();
            stdout.flush().unwrap();

            if command == "quit" {
                break;
            }
        }
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let mut chars = trimmed.char_indices();

        if let Some((_, c)) = chars.next() {
            if c.is_ascii_digit() {
                let end = chars
                    .find(|(_, c)| !c.is_ascii_digit())
                    .map(|(i, _)| i)
                    .unwrap_or(trimmed.len());

                if let Ok(id) = trimmed[..end].parse::<u32>() {
                    return (Some(id), trimmed[end..].trim());
                }
            }
        }

        (None, trimmed)
    }

    /// Rebuild the board at the current size, preserving komi and time
    /// settings.
    fn rebuild_board(&mut self) {
        let komi = self.searcher.board.komi();
        self.searcher.board = Board::new(self.size);
        self.searcher.board.set_komi(komi);
        self.searcher.timer.reset();
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "gotcha".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<u16>() {
                    Ok(size) if size >= 1 && size <= MAX_BOARD_SIZE => {
                        self.size = size;
                        self.rebuild_board();
                        (true, String::new())
                    }
                    Ok(_) => (false, "unacceptable size".to_string()),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.rebuild_board();
                (true, String::new())
            }

            "komi" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<f32>() {
                    Ok(komi) => {
                        self.searcher.board.set_komi(komi);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "get_komi" => (true, self.searcher.board.komi().to_string()),

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let colour = match parse_colour(args[0]) {
                    Ok(c) => c,
                    Err(e) => return (false, e.to_string()),
                };
                let tile = match parse_vertex(args[1], self.size) {
                    Ok(t) => t,
                    Err(e) => return (false, e.to_string()),
                };

                self.searcher.board.set_stm(colour);
                if self.searcher.board.try_make_move(tile) {
                    (true, String::new())
                } else {
                    (false, "illegal move".to_string())
                }
            }

            "genmove" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let colour = match parse_colour(args[0]) {
                    Ok(c) => c,
                    Err(e) => return (false, e.to_string()),
                };

                self.searcher.board.set_stm(colour);
                let tile = self.searcher.search();
                self.searcher.board.make_move(tile);
                (true, vertex_string(tile, self.size))
            }

            "undo" => {
                if self.searcher.board.moves_played() == 0 {
                    (false, "cannot undo".to_string())
                } else {
                    self.searcher.board.undo_move();
                    (true, String::new())
                }
            }

            "showboard" => (true, format!("\n{}", self.searcher.board)),

            "stones" => {
                let board = &self.searcher.board;
                (
                    true,
                    format!(
                        "black {} white {}",
                        board.state.stone_count(Colour::Black),
                        board.state.stone_count(Colour::White),
                    ),
                )
            }

            "final_score" => {
                let score = self.searcher.board.score();
                if score > 0.0 {
                    (true, format!("B+{score}"))
                } else if score < 0.0 {
                    (true, format!("W+{}", -score))
                } else {
                    (true, "0".to_string())
                }
            }

            "time_settings" => {
                if args.len() < 3 {
                    return (false, "missing arguments".to_string());
                }
                let parsed: Result<Vec<u32>, _> =
                    args[..3].iter().map(|a| a.parse::<u32>()).collect();
                match parsed {
                    Ok(t) => {
                        self.searcher.timer = Timer::new(t[0], t[1], t[2]);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid time settings".to_string()),
                }
            }

            "perft" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<u8>() {
                    Ok(depth) => {
                        let nodes = self.searcher.board.run_perft(depth);
                        (true, nodes.to_string())
                    }
                    Err(_) => (false, "invalid depth".to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
