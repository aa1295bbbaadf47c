//! Board representation and move execution.
//!
//! [`BoardState`] is one snapshot of a position: the shared tile array, the
//! empty list, the group arena, stone counts and the Zobrist hash. It knows
//! how to place a stone (with merge, capture and suicide resolution), kill a
//! group, and score itself. [`Board`] wraps a state with a full-snapshot undo
//! stack plus side-to-move and komi bookkeeping, and is the transactional
//! legality gate: a rejected suicide or superko attempt leaves it exactly as
//! found.

use std::collections::VecDeque;
use std::fmt;

use crate::link::{LinkHead, LinkNode};
use crate::tile::{Colour, GameState, MAX_BOARD_AREA, MAX_BOARD_SIZE, Tile, Vec4};
use crate::zobrist::Zobrist;

/// A maximal chain of connected same-coloured stones.
///
/// `liberties` is kept exact: it always equals the number of distinct empty
/// tiles orthogonally adjacent to the group, and can be re-derived by brute
/// force at any point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub colour: Colour,
    pub stones: LinkHead,
    pub liberties: u16,
    pub hash: Zobrist,
}

impl Group {
    fn new(tile: Tile, colour: Colour) -> Group {
        Group {
            colour,
            stones: LinkHead::single(tile),
            liberties: 0,
            hash: Zobrist::hash_for(tile, colour),
        }
    }

    /// Absorb `other`'s stones and hash contribution. Liberties are settled
    /// by the caller once every merge is done.
    fn join(&mut self, other: &mut Group, nodes: &mut [LinkNode]) {
        self.stones.join(&mut other.stones, nodes);
        self.hash ^= other.hash;
    }
}

/// One full position snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    size: u16,
    tiles: Vec<LinkNode>,
    empty: LinkHead,
    groups: Vec<Group>,
    stones: [u16; 2],
    passes: u16,
    hash: Zobrist,
}

impl BoardState {
    pub fn new(size: u16) -> BoardState {
        assert!(
            size >= 1 && size <= MAX_BOARD_SIZE,
            "board size {size} out of range"
        );
        let area = size as usize * size as usize;

        let mut tiles = vec![LinkNode::detached(); area];
        for i in 0..area {
            if i > 0 {
                tiles[i].prev = Tile::new(i as u16 - 1);
            }
            if i < area - 1 {
                tiles[i].next = Tile::new(i as u16 + 1);
            }
        }

        BoardState {
            size,
            tiles,
            empty: LinkHead::full(area as u32),
            groups: Vec::new(),
            stones: [0, 0],
            passes: 0,
            hash: Zobrist::ZERO,
        }
    }

    #[inline]
    pub fn size(&self) -> u16 {
        self.size
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.size as usize * self.size as usize
    }

    #[inline]
    pub fn hash(&self) -> Zobrist {
        self.hash
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.passes >= 2
    }

    #[inline]
    pub fn empty_count(&self) -> u32 {
        self.empty.len()
    }

    #[inline]
    pub fn stone_count(&self, colour: Colour) -> u16 {
        self.stones[colour.index()]
    }

    /// The group arena slot occupied at `tile`, if any. Dead groups never
    /// show up here: their tiles are relabelled when the stones are spliced
    /// back into the empty list.
    #[inline]
    pub fn group_id_at(&self, tile: Tile) -> Option<u16> {
        self.tiles[tile.index()].group
    }

    #[inline]
    pub fn colour_at(&self, tile: Tile) -> Option<Colour> {
        self.group_id_at(tile)
            .map(|id| self.groups[id as usize].colour)
    }

    #[inline]
    pub fn group(&self, id: u16) -> &Group {
        &self.groups[id as usize]
    }

    /// Walk the empty list.
    pub fn empty_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.empty.iter(&self.tiles)
    }

    pub fn pass_move(&mut self) {
        self.passes += 1;
    }

    /// Place a stone of `colour` on `tile`, resolving merges and captures.
    /// Returns true when the move was suicide: the placed group ended with no
    /// liberties and has already been removed again.
    ///
    /// Captures resolve before the suicide check, so filling an enemy group's
    /// last liberty is never suicide.
    pub fn place_stone(&mut self, tile: Tile, colour: Colour) -> bool {
        self.passes = 0;

        self.empty.remove(tile, &mut self.tiles);
        self.hash ^= Zobrist::hash_for(tile, colour);
        self.stones[colour.index()] += 1;

        let group_id = self.groups.len() as u16;
        self.tiles[tile.index()] = LinkNode::new(group_id);
        self.groups.push(Group::new(tile, colour));

        let mut adj_enemies: Vec4<u16> = Vec4::new();

        for adj in tile.adjacent(self.size).iter() {
            let Some(adj_id) = self.tiles[adj.index()].group else {
                continue;
            };
            if self.groups[adj_id as usize].colour != colour {
                // an enemy group loses exactly one liberty: the placed tile
                if !adj_enemies.contains(adj_id) {
                    self.groups[adj_id as usize].liberties -= 1;
                    adj_enemies.push(adj_id);
                }
            } else if adj_id != group_id {
                let (rest, new) = self.groups.split_at_mut(group_id as usize);
                new[0].join(&mut rest[adj_id as usize], &mut self.tiles);
            }
        }

        // Incremental merge arithmetic would over-count liberties the merged
        // chains shared, so the combined count is re-derived exactly.
        self.groups[group_id as usize].liberties = self.count_liberties(group_id);

        for adj_id in adj_enemies.iter() {
            if self.groups[adj_id as usize].liberties == 0 {
                self.kill_group(adj_id);
            }
        }

        let was_suicide = self.groups[group_id as usize].liberties == 0;
        if was_suicide {
            self.kill_group(group_id);
        }

        was_suicide
    }

    /// Remove a whole group from the board: each freed tile grants one
    /// liberty to every adjacent group, the stones are spliced back into the
    /// empty list, and the group's hash contribution is XORed out. The arena
    /// slot stays behind unreferenced.
    pub fn kill_group(&mut self, id: u16) {
        let dying_colour = self.groups[id as usize].colour;
        let dying_len = self.groups[id as usize].stones.len();
        self.hash ^= self.groups[id as usize].hash;
        self.stones[dying_colour.index()] -= dying_len as u16;

        let mut tile = self.groups[id as usize].stones.first;
        while !tile.is_none() {
            let mut credited: Vec4<u16> = Vec4::new();
            for adj in tile.adjacent(self.size).iter() {
                let Some(adj_id) = self.tiles[adj.index()].group else {
                    // a dying group has no liberties left, so every
                    // neighbour of its stones must be occupied
                    unreachable!("capture sweep hit an empty neighbour");
                };
                if !credited.contains(adj_id) {
                    self.groups[adj_id as usize].liberties += 1;
                    credited.push(adj_id);
                }
            }
            tile = self.tiles[tile.index()].next;
        }

        let dying = &mut self.groups[id as usize];
        self.empty.join(&mut dying.stones, &mut self.tiles);
    }

    /// Exact liberty count for a group: distinct empty tiles orthogonally
    /// adjacent to any of its stones.
    fn count_liberties(&self, id: u16) -> u16 {
        let mut seen = [false; MAX_BOARD_AREA as usize];
        let mut count = 0;
        for stone in self.groups[id as usize].stones.iter(&self.tiles) {
            for adj in stone.adjacent(self.size).iter() {
                if self.tiles[adj.index()].group.is_none() && !seen[adj.index()] {
                    seen[adj.index()] = true;
                    count += 1;
                }
            }
        }
        count
    }

    /// Tag every empty tile with the colours that reach it: seed each empty
    /// tile from its adjacent groups, then flood the tags through empty
    /// neighbours with an OR-merge until nothing changes.
    pub fn territory(&self) -> Vec<Territory> {
        let mut territory = vec![Territory::Neither; self.area()];
        let mut todo = VecDeque::new();

        for tile in self.empty.iter(&self.tiles) {
            let mut reach_black = false;
            let mut reach_white = false;

            for adj in tile.adjacent(self.size).iter() {
                if let Some(id) = self.tiles[adj.index()].group {
                    match self.groups[id as usize].colour {
                        Colour::Black => reach_black = true,
                        Colour::White => reach_white = true,
                    }
                }
            }

            if reach_black || reach_white {
                territory[tile.index()] = Territory::from_reach(reach_black, reach_white);
                todo.push_back(tile);
            }
        }

        while let Some(curr) = todo.pop_front() {
            let curr_tag = territory[curr.index()];
            for adj in curr.adjacent(self.size).iter() {
                if self.tiles[adj.index()].group.is_some() {
                    continue;
                }
                let old = territory[adj.index()];
                let merged = old.merge(curr_tag);
                if merged != old {
                    territory[adj.index()] = merged;
                    todo.push_back(adj);
                }
            }
        }

        territory
    }

    /// Net score for Black under area scoring: stones plus single-colour
    /// territory, minus the White total and komi. A playout heuristic, not a
    /// rules-exact Chinese or Japanese score.
    pub fn score(&self, komi: f32) -> f32 {
        let mut black = self.stones[0] as f32;
        let mut white = self.stones[1] as f32;

        let territory = self.territory();
        for tile in self.empty.iter(&self.tiles) {
            match territory[tile.index()] {
                Territory::Black => black += 1.0,
                Territory::White => white += 1.0,
                _ => {}
            }
        }

        black - white - komi
    }

    /// Result from Black's perspective. Ongoing until two consecutive
    /// passes; ties go to White.
    pub fn game_state(&self, komi: f32) -> GameState {
        if !self.is_game_over() {
            return GameState::Ongoing;
        }
        if self.score(komi) > 0.0 {
            GameState::Win
        } else {
            GameState::Loss
        }
    }

    /// True when every orthogonal neighbour of `tile` is a stone of `colour`
    /// and the diagonals do not give the eye away: one enemy diagonal is
    /// tolerated in the centre, none at the edge. The simulation move filter
    /// uses this to avoid filling own eyes.
    pub fn is_own_eye(&self, tile: Tile, colour: Colour) -> bool {
        for adj in tile.adjacent(self.size).iter() {
            if self.colour_at(adj) != Some(colour) {
                return false;
            }
        }

        let diagonals = tile.diagonal(self.size);
        let mut enemy = 0;
        for diag in diagonals.iter() {
            if self.colour_at(diag) == Some(colour.flip()) {
                enemy += 1;
            }
        }

        let tolerance = if diagonals.len() == 4 { 1 } else { 0 };
        enemy <= tolerance
    }
}

/// Ownership tag for an empty tile during territory scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Territory {
    Neither = 0,
    Black = 1,
    White = 2,
    Both = 3,
}

impl Territory {
    fn from_reach(black: bool, white: bool) -> Territory {
        Territory::from_bits(black as u8 | (white as u8) << 1)
    }

    /// Bitwise OR of the reachable-colour sets; `Both` absorbs everything.
    fn merge(self, other: Territory) -> Territory {
        Territory::from_bits(self as u8 | other as u8)
    }

    fn from_bits(bits: u8) -> Territory {
        match bits {
            0 => Territory::Neither,
            1 => Territory::Black,
            2 => Territory::White,
            _ => Territory::Both,
        }
    }
}

/// A position plus its history: the move-legality gate that both the
/// protocol layer and the search drive.
#[derive(Debug, Clone)]
pub struct Board {
    pub state: BoardState,
    history: Vec<BoardState>,
    stm: Colour,
    komi: f32,
}

impl Board {
    pub fn new(size: u16) -> Board {
        Board {
            state: BoardState::new(size),
            history: Vec::new(),
            stm: Colour::Black,
            komi: 0.5,
        }
    }

    #[inline]
    pub fn size(&self) -> u16 {
        self.state.size()
    }

    #[inline]
    pub fn side_to_move(&self) -> Colour {
        self.stm
    }

    pub fn set_stm(&mut self, colour: Colour) {
        self.stm = colour;
    }

    #[inline]
    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.komi = komi;
    }

    #[inline]
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Unconditional commit, used once legality is known. No repetition
    /// scan.
    pub fn make_move(&mut self, tile: Tile) {
        self.history.push(self.state.clone());
        let moving = self.stm;
        self.stm = self.stm.flip();

        if tile.is_none() {
            self.state.pass_move();
        } else {
            self.state.place_stone(tile, moving);
        }
    }

    /// Attempt a move; an occupied target is rejected outright, and on
    /// suicide or positional superko the board is restored to its
    /// pre-attempt state before `false` comes back. Passing is always
    /// legal.
    pub fn try_make_move(&mut self, tile: Tile) -> bool {
        // occupied tiles are never legal; reject before touching any state
        if !tile.is_none() && self.state.group_id_at(tile).is_some() {
            return false;
        }

        self.history.push(self.state.clone());
        let moving = self.stm;
        self.stm = self.stm.flip();

        if tile.is_none() {
            self.state.pass_move();
            return true;
        }

        if self.state.place_stone(tile, moving) {
            self.undo_move();
            return false;
        }

        // positional superko: no earlier position may be recreated
        for prior in &self.history {
            if prior.hash() == self.state.hash() {
                self.undo_move();
                return false;
            }
        }

        true
    }

    pub fn undo_move(&mut self) {
        self.stm = self.stm.flip();
        self.state = self.history.pop().expect("no move to undo");
    }

    /// Result from the current side-to-move's perspective.
    pub fn game_state(&self) -> GameState {
        let black = self.state.game_state(self.komi);
        match self.stm {
            Colour::Black => black,
            Colour::White => black.flip(),
        }
    }

    /// Net score for Black, komi included.
    pub fn score(&self) -> f32 {
        self.state.score(self.komi)
    }

    /// Every legal move in the current position: the legal subset of the
    /// empty list plus the synthetic pass, verified by replay.
    pub fn legal_moves(&mut self) -> Vec<Tile> {
        let mut candidates: Vec<Tile> = self.state.empty_tiles().collect();
        candidates.push(Tile::NONE);

        let mut moves = Vec::with_capacity(candidates.len());
        for tile in candidates {
            if self.try_make_move(tile) {
                self.undo_move();
                moves.push(tile);
            }
        }
        moves
    }

    /// Exhaustive legal-move-tree leaf count, for correctness testing.
    pub fn run_perft(&mut self, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }
        if self.state.is_game_over() {
            return 0;
        }

        let mut candidates: Vec<Tile> = self.state.empty_tiles().collect();
        candidates.push(Tile::NONE);

        let mut count = 0;
        for tile in candidates {
            if !self.try_make_move(tile) {
                continue;
            }
            count += self.run_perft(depth - 1);
            self.undo_move();
        }
        count
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for y in (0..size).rev() {
            write!(f, "{:2} ", y + 1)?;
            for x in 0..size {
                let stone = match self.state.colour_at(Tile::from_xy(x, y, size)) {
                    Some(Colour::Black) => 'o',
                    Some(Colour::White) => 'x',
                    None => '.',
                };
                write!(f, "{stone} ")?;
            }
            writeln!(f)?;
        }

        write!(f, "   ")?;
        for x in 0..size {
            let mut column = x as u8;
            if column > 7 {
                column += 1;
            }
            write!(f, "{} ", (b'a' + column) as char)?;
        }
        writeln!(f)?;

        writeln!(f, "score: {} (komi {})", self.score(), self.komi)?;
        let side = match self.stm {
            Colour::Black => "black",
            Colour::White => "white",
        };
        writeln!(f, "stm: {side}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn place(board: &mut Board, colour: Colour, x: u16, y: u16) {
        board.set_stm(colour);
        let tile = Tile::from_xy(x, y, board.size());
        assert!(board.try_make_move(tile), "setup move ({x},{y}) was illegal");
    }

    /// Independent liberty recount by full-board scan.
    fn recount_liberties(state: &BoardState, id: u16) -> u16 {
        let size = state.size();
        let mut libs = HashSet::new();
        for idx in 0..state.area() {
            let tile = Tile::new(idx as u16);
            if state.group_id_at(tile) != Some(id) {
                continue;
            }
            for adj in tile.adjacent(size).iter() {
                if state.group_id_at(adj).is_none() {
                    libs.insert(adj.index());
                }
            }
        }
        libs.len() as u16
    }

    /// Stone-sum and exact-liberty invariants over every live group.
    fn check_invariants(state: &BoardState) {
        let mut live = HashSet::new();
        for idx in 0..state.area() {
            if let Some(id) = state.group_id_at(Tile::new(idx as u16)) {
                live.insert(id);
            }
        }

        let mut total = state.empty_count();
        for &id in &live {
            let group = state.group(id);
            total += group.stones.len();
            assert_eq!(
                group.liberties,
                recount_liberties(state, id),
                "stale liberty count for group {id}"
            );
        }
        assert_eq!(total as usize, state.area(), "tiles lost or duplicated");
    }

    #[test]
    fn fresh_board() {
        let state = BoardState::new(5);
        assert_eq!(state.empty_count(), 25);
        assert_eq!(state.stone_count(Colour::Black), 0);
        assert_eq!(state.hash(), Zobrist::ZERO);
        assert!(!state.is_game_over());
        check_invariants(&state);
    }

    #[test]
    fn single_stone_liberties() {
        let mut board = Board::new(5);
        place(&mut board, Colour::Black, 2, 2);
        let id = board.state.group_id_at(Tile::from_xy(2, 2, 5)).unwrap();
        assert_eq!(board.state.group(id).liberties, 4);

        place(&mut board, Colour::White, 0, 0);
        let id = board.state.group_id_at(Tile::from_xy(0, 0, 5)).unwrap();
        assert_eq!(board.state.group(id).liberties, 2);
        check_invariants(&board.state);
    }

    #[test]
    fn merge_keeps_liberties_exact() {
        // The placed stone and the chain it joins share a liberty at (1,0);
        // the combined count must stay a distinct-tile count.
        let mut board = Board::new(5);
        place(&mut board, Colour::Black, 2, 0);
        place(&mut board, Colour::Black, 2, 1);
        place(&mut board, Colour::Black, 1, 1);

        let id = board.state.group_id_at(Tile::from_xy(1, 1, 5)).unwrap();
        assert_eq!(board.state.group(id).stones.len(), 3);
        assert_eq!(board.state.group(id).liberties, 6);
        check_invariants(&board.state);
    }

    #[test]
    fn merge_two_chains_through_one_stone() {
        let mut board = Board::new(5);
        place(&mut board, Colour::Black, 0, 2);
        place(&mut board, Colour::Black, 2, 2);
        place(&mut board, Colour::Black, 1, 2);

        let id = board.state.group_id_at(Tile::from_xy(1, 2, 5)).unwrap();
        assert_eq!(board.state.group(id).stones.len(), 3);
        check_invariants(&board.state);
    }

    #[test]
    fn enemy_liberty_decrement_is_per_group() {
        // A bent white chain touches the placed black stone on three sides;
        // it must lose exactly one liberty, the placed tile itself.
        let mut board = Board::new(5);
        place(&mut board, Colour::White, 1, 0);
        place(&mut board, Colour::White, 0, 0);
        place(&mut board, Colour::White, 0, 1);
        place(&mut board, Colour::White, 0, 2);
        place(&mut board, Colour::White, 1, 2);

        let white = board.state.group_id_at(Tile::from_xy(0, 1, 5)).unwrap();
        let before = board.state.group(white).liberties;

        place(&mut board, Colour::Black, 1, 1);
        let after = board.state.group(white).liberties;
        assert_eq!(after, before - 1);
        check_invariants(&board.state);
    }

    #[test]
    fn capture_on_three_by_three() {
        // White in the corner, Black everywhere except the far corner; the
        // final black move fills White's last liberty and captures it.
        let mut board = Board::new(3);
        place(&mut board, Colour::White, 0, 0);
        for (x, y) in [(2, 0), (1, 1), (2, 1), (0, 2), (1, 2), (0, 1)] {
            place(&mut board, Colour::Black, x, y);
        }
        assert_eq!(board.state.stone_count(Colour::White), 1);

        place(&mut board, Colour::Black, 1, 0);

        assert_eq!(board.state.stone_count(Colour::White), 0);
        assert_eq!(board.state.stone_count(Colour::Black), 7);
        // the freed corner is back on the empty list
        assert_eq!(board.state.group_id_at(Tile::from_xy(0, 0, 3)), None);
        assert_eq!(board.state.empty_count(), 2);

        // one big black group breathing at the freed corner and at (2,2)
        let id = board.state.group_id_at(Tile::from_xy(1, 1, 3)).unwrap();
        assert_eq!(board.state.group(id).stones.len(), 7);
        assert_eq!(board.state.group(id).liberties, 2);
        check_invariants(&board.state);
    }

    #[test]
    fn filling_last_liberty_of_enemy_is_legal() {
        // The capturing stone itself has no liberties until the capture
        // resolves; the move must still be legal.
        let mut board = Board::new(3);
        place(&mut board, Colour::White, 0, 0);
        place(&mut board, Colour::Black, 1, 0);
        board.set_stm(Colour::Black);
        assert!(board.try_make_move(Tile::from_xy(0, 1, 3)));
        assert_eq!(board.state.stone_count(Colour::White), 0);
        check_invariants(&board.state);
    }

    #[test]
    fn suicide_rejected_and_board_untouched() {
        let mut board = Board::new(3);
        place(&mut board, Colour::Black, 0, 1);
        place(&mut board, Colour::Black, 1, 0);

        let snapshot = board.state.clone();
        let history_len = board.moves_played();

        board.set_stm(Colour::White);
        assert!(!board.try_make_move(Tile::from_xy(0, 0, 3)));

        assert_eq!(board.state, snapshot);
        assert_eq!(board.moves_played(), history_len);
        assert_eq!(board.side_to_move(), Colour::White);
    }

    #[test]
    fn occupied_tile_rejected() {
        // either colour, same tile: rejected with no state touched at all
        let mut board = Board::new(3);
        place(&mut board, Colour::Black, 1, 1);

        let snapshot = board.state.clone();
        board.set_stm(Colour::White);
        assert!(!board.try_make_move(Tile::from_xy(1, 1, 3)));
        board.set_stm(Colour::Black);
        assert!(!board.try_make_move(Tile::from_xy(1, 1, 3)));

        assert_eq!(board.state, snapshot);
        assert_eq!(board.moves_played(), 1);
        check_invariants(&board.state);
    }

    #[test]
    fn multi_stone_suicide_rejected() {
        // White already has a doomed stone at (0,0); connecting to it at
        // (0,1) would leave a two-stone group with no liberties.
        let mut board = Board::new(3);
        place(&mut board, Colour::White, 0, 0);
        place(&mut board, Colour::Black, 1, 0);
        place(&mut board, Colour::Black, 1, 1);
        place(&mut board, Colour::Black, 0, 2);

        let snapshot = board.state.clone();
        board.set_stm(Colour::White);
        assert!(!board.try_make_move(Tile::from_xy(0, 1, 3)));
        assert_eq!(board.state, snapshot);
    }

    #[test]
    fn superko_rejected() {
        // Classic ko on 5x5: Black takes the ko stone, White may not take
        // straight back because that recreates an earlier position.
        let mut board = Board::new(5);
        place(&mut board, Colour::Black, 1, 2);
        place(&mut board, Colour::Black, 2, 1);
        place(&mut board, Colour::Black, 2, 3);
        place(&mut board, Colour::White, 3, 1);
        place(&mut board, Colour::White, 3, 3);
        place(&mut board, Colour::White, 4, 2);
        place(&mut board, Colour::White, 2, 2);

        // Black captures the ko stone at (2,2) by playing (3,2)
        place(&mut board, Colour::Black, 3, 2);
        assert_eq!(board.state.group_id_at(Tile::from_xy(2, 2, 5)), None);

        let snapshot = board.state.clone();
        board.set_stm(Colour::White);
        assert!(!board.try_make_move(Tile::from_xy(2, 2, 5)));
        assert_eq!(board.state, snapshot);
        check_invariants(&board.state);
    }

    #[test]
    fn hash_is_move_order_independent() {
        let mut a = BoardState::new(9);
        a.place_stone(Tile::from_xy(2, 2, 9), Colour::Black);
        a.place_stone(Tile::from_xy(6, 6, 9), Colour::White);

        let mut b = BoardState::new(9);
        b.place_stone(Tile::from_xy(6, 6, 9), Colour::White);
        b.place_stone(Tile::from_xy(2, 2, 9), Colour::Black);

        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.hash(), Zobrist::ZERO);
    }

    #[test]
    fn undo_restores_state_exactly() {
        let mut board = Board::new(3);
        place(&mut board, Colour::White, 0, 0);
        place(&mut board, Colour::Black, 1, 0);

        let snapshot = board.state.clone();
        board.set_stm(Colour::Black);
        // a capturing move, then undo
        assert!(board.try_make_move(Tile::from_xy(0, 1, 3)));
        board.undo_move();

        assert_eq!(board.state, snapshot);
        check_invariants(&board.state);
    }

    #[test]
    fn pass_twice_ends_game() {
        let mut board = Board::new(5);
        assert_eq!(board.game_state(), GameState::Ongoing);

        assert!(board.try_make_move(Tile::NONE));
        assert_eq!(board.game_state(), GameState::Ongoing);

        assert!(board.try_make_move(Tile::NONE));
        assert!(board.state.is_game_over());
        // an empty board scores -komi, a White win; Black is back on move
        assert_eq!(board.game_state(), GameState::Loss);
        board.set_stm(Colour::White);
        assert_eq!(board.game_state(), GameState::Win);
    }

    #[test]
    fn placing_a_stone_resets_passes() {
        let mut board = Board::new(5);
        assert!(board.try_make_move(Tile::NONE));
        place(&mut board, Colour::White, 2, 2);
        assert!(board.try_make_move(Tile::NONE));
        assert!(!board.state.is_game_over());
    }

    #[test]
    fn territory_tags() {
        // Black wall across the middle row of a 3x3 board: the rows above
        // and below both reach only Black until White appears.
        let mut board = Board::new(3);
        for x in 0..3 {
            place(&mut board, Colour::Black, x, 1);
        }
        let territory = board.state.territory();
        for x in 0..3u16 {
            assert_eq!(territory[Tile::from_xy(x, 0, 3).index()], Territory::Black);
            assert_eq!(territory[Tile::from_xy(x, 2, 3).index()], Territory::Black);
        }

        place(&mut board, Colour::White, 1, 0);
        let territory = board.state.territory();
        assert_eq!(territory[Tile::from_xy(0, 0, 3).index()], Territory::Both);
        assert_eq!(territory[Tile::from_xy(2, 0, 3).index()], Territory::Both);
        assert_eq!(territory[Tile::from_xy(1, 2, 3).index()], Territory::Black);
    }

    #[test]
    fn score_counts_stones_and_territory() {
        let mut board = Board::new(3);
        board.set_komi(0.5);
        for x in 0..3 {
            place(&mut board, Colour::Black, x, 1);
        }
        // 3 stones + 6 territory - 0.5 komi
        assert_eq!(board.score(), 8.5);
    }

    #[test]
    fn eye_detection() {
        let mut board = Board::new(5);
        // diamond around (2,2); the diagonals stay open for White
        for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            place(&mut board, Colour::Black, x, y);
        }
        assert!(board.state.is_own_eye(Tile::from_xy(2, 2, 5), Colour::Black));
        assert!(!board.state.is_own_eye(Tile::from_xy(2, 2, 5), Colour::White));
        assert!(!board.state.is_own_eye(Tile::from_xy(0, 0, 5), Colour::Black));

        // one enemy diagonal is tolerated in the centre, two are not
        place(&mut board, Colour::White, 1, 1);
        assert!(board.state.is_own_eye(Tile::from_xy(2, 2, 5), Colour::Black));
        place(&mut board, Colour::White, 3, 3);
        assert!(!board.state.is_own_eye(Tile::from_xy(2, 2, 5), Colour::Black));
    }

    #[test]
    fn corner_eye_tolerates_no_enemy_diagonal() {
        let mut board = Board::new(5);
        place(&mut board, Colour::Black, 1, 0);
        place(&mut board, Colour::Black, 0, 1);
        assert!(board.state.is_own_eye(Tile::from_xy(0, 0, 5), Colour::Black));

        place(&mut board, Colour::White, 1, 1);
        assert!(!board.state.is_own_eye(Tile::from_xy(0, 0, 5), Colour::Black));
    }

    #[test]
    fn legal_moves_include_pass() {
        let mut board = Board::new(3);
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 10);
        assert!(moves.contains(&Tile::NONE));
    }

    #[test]
    fn invariants_hold_through_a_messy_sequence() {
        let mut board = Board::new(5);
        let moves = [
            (Colour::Black, 2, 2),
            (Colour::White, 2, 3),
            (Colour::Black, 3, 3),
            (Colour::White, 1, 2),
            (Colour::Black, 1, 3),
            (Colour::White, 2, 1),
            (Colour::Black, 2, 4),
            (Colour::White, 1, 1),
            (Colour::Black, 3, 2),
            (Colour::White, 0, 3),
        ];
        for (colour, x, y) in moves {
            place(&mut board, colour, x, y);
            check_invariants(&board.state);
        }
    }
}
