//! Intrusive doubly-linked lists over the shared tile array.
//!
//! One `Vec<LinkNode>` (one node per tile) backs every list on the board: the
//! shared empty list and each group's stone list. A tile belongs to exactly
//! one list at a time; [`LinkNode::group`] records which. Heads and nodes hold
//! tile indices instead of references, so the whole structure is `Clone` and
//! snapshot-friendly.

use crate::tile::Tile;

/// Per-tile list record. `group` is `None` while the tile sits on the empty
/// list, `Some(id)` while it belongs to that group's stone list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkNode {
    pub prev: Tile,
    pub next: Tile,
    pub group: Option<u16>,
}

impl LinkNode {
    pub fn new(group: u16) -> LinkNode {
        LinkNode {
            prev: Tile::NONE,
            next: Tile::NONE,
            group: Some(group),
        }
    }

    pub fn detached() -> LinkNode {
        LinkNode {
            prev: Tile::NONE,
            next: Tile::NONE,
            group: None,
        }
    }
}

/// Head of one list over the shared node array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkHead {
    pub first: Tile,
    pub last: Tile,
    len: u32,
}

impl LinkHead {
    pub fn empty() -> LinkHead {
        LinkHead {
            first: Tile::NONE,
            last: Tile::NONE,
            len: 0,
        }
    }

    /// A list holding the single tile `tile`.
    pub fn single(tile: Tile) -> LinkHead {
        LinkHead {
            first: tile,
            last: tile,
            len: 1,
        }
    }

    /// A list holding every tile in `0..len`, in index order. The caller must
    /// have chained the nodes to match (see `BoardState::new`).
    pub fn full(len: u32) -> LinkHead {
        if len == 0 {
            LinkHead::empty()
        } else {
            LinkHead {
                first: Tile::new(0),
                last: Tile::new(len as u16 - 1),
                len,
            }
        }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Unlink a single tile in O(1). The node is reset to detached.
    pub fn remove(&mut self, tile: Tile, nodes: &mut [LinkNode]) {
        let index = tile.index();
        let prev = nodes[index].prev;
        let next = nodes[index].next;
        nodes[index] = LinkNode::detached();

        if prev.is_none() {
            self.first = next;
        } else {
            nodes[prev.index()].next = next;
        }

        if next.is_none() {
            self.last = prev;
        } else {
            nodes[next.index()].prev = prev;
        }

        self.len -= 1;
    }

    /// Splice `other` in at the front of this list, rewriting every spliced
    /// tile's owner to this list's identity (the owner of `first`, or empty
    /// when the list has no tiles). O(len of `other`): this is the one linear
    /// list operation and dominates group-merge cost. `other` is left empty.
    pub fn join(&mut self, other: &mut LinkHead, nodes: &mut [LinkNode]) {
        let owner = if self.first.is_none() {
            None
        } else {
            nodes[self.first.index()].group
        };

        let mut tile = other.first;
        while !tile.is_none() {
            nodes[tile.index()].group = owner;
            tile = nodes[tile.index()].next;
        }

        if !other.last.is_none() {
            nodes[other.last.index()].next = self.first;
        }
        if !self.first.is_none() {
            nodes[self.first.index()].prev = other.last;
        }

        self.len += other.len;
        if !other.first.is_none() {
            self.first = other.first;
        }
        if self.last.is_none() {
            self.last = other.last;
        }

        *other = LinkHead::empty();
    }

    /// Walk the list front to back.
    pub fn iter<'a>(&self, nodes: &'a [LinkNode]) -> LinkIter<'a> {
        LinkIter {
            nodes,
            next: self.first,
        }
    }
}

pub struct LinkIter<'a> {
    nodes: &'a [LinkNode],
    next: Tile,
}

impl Iterator for LinkIter<'_> {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next.is_none() {
            return None;
        }
        let tile = self.next;
        self.next = self.nodes[tile.index()].next;
        Some(tile)
    }
}
