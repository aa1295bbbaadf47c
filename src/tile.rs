//! Core value types: stone colours, game results, and board coordinates.
//!
//! A [`Tile`] is an index into the flat `size * size` tile array, or the
//! sentinel [`Tile::NONE`] which doubles as the pass move. Adjacency is
//! computed on demand from the board size, so the same tile type works for
//! every board from 1x1 up to [`MAX_BOARD_SIZE`].

/// Largest supported board side length. The Zobrist key table is sized for
/// this, so larger boards are rejected before any allocation happens.
pub const MAX_BOARD_SIZE: u16 = 25;

/// Largest supported board area.
pub const MAX_BOARD_AREA: u16 = MAX_BOARD_SIZE * MAX_BOARD_SIZE;

/// Stone colour. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Black = 0,
    White = 1,
}

impl Colour {
    /// The opposing colour.
    #[inline]
    pub fn flip(self) -> Colour {
        match self {
            Colour::Black => Colour::White,
            Colour::White => Colour::Black,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Game result from the perspective of some side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Win,
    Loss,
}

impl GameState {
    /// The same result seen from the other side.
    #[inline]
    pub fn flip(self) -> GameState {
        match self {
            GameState::Ongoing => GameState::Ongoing,
            GameState::Win => GameState::Loss,
            GameState::Loss => GameState::Win,
        }
    }
}

/// A point on the board, or [`Tile::NONE`] for "no tile" / pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile(u16);

impl Tile {
    /// Sentinel value: no tile, also used as the pass move and as the list
    /// terminator inside the intrusive linked lists.
    pub const NONE: Tile = Tile(1024);

    #[inline]
    pub fn new(index: u16) -> Tile {
        Tile(index)
    }

    #[inline]
    pub fn from_xy(x: u16, y: u16, size: u16) -> Tile {
        Tile(size * y + x)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == Tile::NONE.0
    }

    /// Up to 4 orthogonal neighbours, edge tiles get fewer. No wraparound.
    pub fn adjacent(self, size: u16) -> Vec4<Tile> {
        let mut adj = Vec4::new();
        let idx = self.0;
        let file = idx % size;
        let rank = idx / size;
        let limit = size - 1;

        if file > 0 {
            adj.push(Tile(idx - 1));
        }
        if file < limit {
            adj.push(Tile(idx + 1));
        }
        if rank > 0 {
            adj.push(Tile(idx - size));
        }
        if rank < limit {
            adj.push(Tile(idx + size));
        }

        adj
    }

    /// Up to 4 diagonal neighbours. Only the simulation eye filter uses these.
    pub fn diagonal(self, size: u16) -> Vec4<Tile> {
        let mut adj = Vec4::new();
        let idx = self.0;
        let file = idx % size;
        let rank = idx / size;
        let limit = size - 1;

        if file > 0 && rank > 0 {
            adj.push(Tile(idx - size - 1));
        }
        if file < limit && rank < limit {
            adj.push(Tile(idx + size + 1));
        }
        if file > 0 && rank < limit {
            adj.push(Tile(idx + size - 1));
        }
        if file < limit && rank > 0 {
            adj.push(Tile(idx - size + 1));
        }

        adj
    }
}

/// Fixed-capacity scratch buffer for a tile's neighbourhood: at most four
/// neighbours, at most four adjacent group ids. Stack-only, no allocation.
#[derive(Debug, Clone, Copy)]
pub struct Vec4<T: Copy + PartialEq + Default> {
    elements: [T; 4],
    len: u8,
}

impl<T: Copy + PartialEq + Default> Vec4<T> {
    pub fn new() -> Self {
        Vec4 {
            elements: [T::default(); 4],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, element: T) {
        self.elements[self.len as usize] = element;
        self.len += 1;
    }

    #[inline]
    pub fn contains(&self, element: T) -> bool {
        self.elements[..self.len as usize].contains(&element)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.elements[..self.len as usize].iter().copied()
    }
}

impl<T: Copy + PartialEq + Default> Default for Vec4<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::NONE
    }
}
