//! Position fingerprinting with 128-bit Zobrist keys.
//!
//! Every (tile, colour) pair gets a pseudorandom key; a position's hash is the
//! XOR of the keys of its occupied points. The key table is process-wide,
//! lazily initialised, and seeded from a fixed constant: determinism across
//! runs is a requirement (superko detection and tests rely on it), so the keys
//! are generated by a pair of plain xorshift streams rather than anything
//! cryptographic. 128 bits keep the collision chance negligible for the
//! full-history superko scan.

use std::sync::LazyLock;

use crate::tile::{Colour, MAX_BOARD_AREA, Tile};

const HASH_COUNT: usize = 2 * MAX_BOARD_AREA as usize;

const SEED_UPPER: u64 = 0xD06C659954EC904A;
const SEED_LOWER: u64 = 0xA0B2342C523532E2;

static HASHES: LazyLock<[Zobrist; HASH_COUNT]> = LazyLock::new(|| {
    let mut table = [Zobrist::ZERO; HASH_COUNT];
    let mut rng = Zobrist {
        upper: SEED_UPPER,
        lower: SEED_LOWER,
    };
    for key in &mut table {
        *key = rng.randomise();
    }
    table
});

/// A 128-bit position hash, XOR-combinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Zobrist {
    upper: u64,
    lower: u64,
}

impl Zobrist {
    pub const ZERO: Zobrist = Zobrist { upper: 0, lower: 0 };

    /// Key for one stone. Black keys occupy the first half of the table,
    /// White the second.
    #[inline]
    pub fn hash_for(tile: Tile, colour: Colour) -> Zobrist {
        let half = MAX_BOARD_AREA as usize * colour.index();
        HASHES[half + tile.index()]
    }

    /// One step of the two parallel xorshift streams, returning the new value.
    fn randomise(&mut self) -> Zobrist {
        self.upper ^= self.upper << 13;
        self.lower ^= self.lower << 13;
        self.upper ^= self.upper >> 7;
        self.lower ^= self.lower >> 7;
        self.upper ^= self.upper << 17;
        self.lower ^= self.lower << 17;
        *self
    }
}

impl std::ops::BitXorAssign for Zobrist {
    fn bitxor_assign(&mut self, rhs: Zobrist) {
        self.upper ^= rhs.upper;
        self.lower ^= rhs.lower;
    }
}

impl std::fmt::Display for Zobrist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.upper, self.lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_lookups() {
        let a = Zobrist::hash_for(Tile::new(17), Colour::Black);
        let b = Zobrist::hash_for(Tile::new(17), Colour::Black);
        assert_eq!(a, b);
    }

    #[test]
    fn keys_distinct() {
        // not a full uniqueness proof, just a sanity sweep over a 9x9 board
        let mut seen = std::collections::HashSet::new();
        for colour in [Colour::Black, Colour::White] {
            for idx in 0..81 {
                let key = Zobrist::hash_for(Tile::new(idx), colour);
                assert!(seen.insert(format!("{key}")), "duplicate key at {idx}");
            }
        }
    }

    #[test]
    fn xor_is_involutive() {
        let key = Zobrist::hash_for(Tile::new(3), Colour::White);
        let mut hash = Zobrist::ZERO;
        hash ^= key;
        assert_ne!(hash, Zobrist::ZERO);
        hash ^= key;
        assert_eq!(hash, Zobrist::ZERO);
    }
}
