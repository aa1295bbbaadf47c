//! Search-tree arena for the Monte Carlo search.
//!
//! Nodes live in one flat `Vec` and refer to each other by index, so the tree
//! is cheap to drop and rebuild. The arena is cleared at the start of every
//! search and only ever grows while that search runs.

use crate::board::Board;
use crate::tile::{GameState, Tile};

/// One slot in a node's legal-move list. `child` is filled in when the slot
/// is expanded.
#[derive(Debug, Clone, Copy)]
pub struct MoveInfo {
    pub tile: Tile,
    pub child: Option<u32>,
}

/// One search-tree node.
///
/// `state` is the game result from the perspective of the player to move at
/// this node, frozen when the node is built. The legal-move list is frozen
/// too: slots `[0, left_to_explore)` are the still-unexplored partition, and
/// expansion swaps a sampled slot to the end of that partition and shrinks
/// it, so explored slots accumulate at the back.
#[derive(Debug, Clone)]
pub struct Node {
    pub state: GameState,
    pub legal: Vec<MoveInfo>,
    pub left_to_explore: u16,
    pub visits: u32,
    pub wins: u32,
}

impl Node {
    /// Build a node for the board's current position. Probes every empty
    /// tile plus the pass through `try_make_move`, undoing each probe, so
    /// the board comes back untouched. A decided board gets no move list.
    pub fn from_board(board: &mut Board) -> Node {
        let state = board.game_state();

        let legal: Vec<MoveInfo> = if state == GameState::Ongoing {
            board
                .legal_moves()
                .into_iter()
                .map(|tile| MoveInfo { tile, child: None })
                .collect()
        } else {
            Vec::new()
        };

        Node {
            state,
            left_to_explore: legal.len() as u16,
            legal,
            visits: 0,
            wins: 0,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state != GameState::Ongoing
    }

    /// Fraction of visits that were wins for the player who moved into this
    /// node.
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.visits as f64
    }
}

/// Flat node arena, root at index [`SearchTree::ROOT`].
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    pub playouts: u64,
}

impl SearchTree {
    pub const ROOT: u32 = 0;

    pub fn new() -> SearchTree {
        SearchTree {
            nodes: Vec::new(),
            playouts: 0,
        }
    }

    /// Drop the previous search and seed a fresh root from the live board.
    pub fn clear(&mut self, board: &mut Board) {
        self.nodes.clear();
        self.playouts = 0;
        self.nodes.push(Node::from_board(board));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node: Node) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn node(&self, id: u32) -> &Node {
        &self.nodes[id as usize]
    }

    #[inline]
    pub fn node_mut(&mut self, id: u32) -> &mut Node {
        &mut self.nodes[id as usize]
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zobrist::Zobrist;

    #[test]
    fn fresh_root_lists_every_move() {
        let mut board = Board::new(3);
        let node = Node::from_board(&mut board);

        assert!(!node.is_terminal());
        // 9 placements plus the pass
        assert_eq!(node.legal.len(), 10);
        assert_eq!(node.left_to_explore, 10);
        assert!(node.legal.iter().all(|info| info.child.is_none()));
    }

    #[test]
    fn probing_leaves_the_board_untouched() {
        let mut board = Board::new(3);
        let hash = board.state.hash();
        let moves = board.moves_played();

        let _ = Node::from_board(&mut board);

        assert_eq!(board.state.hash(), hash);
        assert_eq!(board.moves_played(), moves);
        assert_eq!(board.state.hash(), Zobrist::ZERO);
    }

    #[test]
    fn decided_board_gives_a_terminal_node() {
        let mut board = Board::new(3);
        board.make_move(Tile::NONE);
        board.make_move(Tile::NONE);

        let node = Node::from_board(&mut board);
        assert!(node.is_terminal());
        assert!(node.legal.is_empty());
        assert_eq!(node.left_to_explore, 0);
    }

    #[test]
    fn clear_reseeds_the_root() {
        let mut board = Board::new(3);
        let mut tree = SearchTree::new();
        tree.clear(&mut board);
        assert_eq!(tree.len(), 1);

        let extra = Node::from_board(&mut board);
        let id = tree.push(extra);
        assert_eq!(id, 1);
        assert_eq!(tree.len(), 2);

        tree.playouts = 42;
        tree.clear(&mut board);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.playouts, 0);
    }
}
