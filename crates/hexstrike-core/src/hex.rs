//! Hex geometry: cube coordinates, directions and distance.
//!
//! Boards use flat-top hexes laid out in columns ("odd-q" offset), so the
//! primary axial coordinate `q` is the column and two hexes with equal `q`
//! are vertically aligned.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

/// The six neighbour offsets, indexed by direction `0..6`.
///
/// Order: south-east, north-east, north, north-west, south-west, south.
pub const DIRECTIONS: [Hex; 6] = [
    Hex::from_cube(1, 0, -1),
    Hex::from_cube(1, -1, 0),
    Hex::from_cube(0, -1, 1),
    Hex::from_cube(-1, 0, 1),
    Hex::from_cube(-1, 1, 0),
    Hex::from_cube(0, 1, -1),
];

/// A hex cell in cube coordinates. Invariant: `q + r + s == 0`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hex {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Hex {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { q: 0, r: 0, s: 0 };

    /// Create a hex from axial coordinates; `s` is derived.
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Create a hex from a full cube triple.
    #[inline]
    pub const fn from_cube(q: i32, r: i32, s: i32) -> Self {
        debug_assert!(q + r + s == 0);
        Self { q, r, s }
    }

    /// Convert an odd-q offset position (column, row) to cube coordinates.
    #[inline]
    pub const fn from_offset(col: i32, row: i32) -> Self {
        Self::new(col, row - (col - (col & 1)) / 2)
    }

    /// Convert back to an odd-q offset position (column, row).
    #[inline]
    pub const fn to_offset(self) -> (i32, i32) {
        (self.q, self.r + (self.q - (self.q & 1)) / 2)
    }

    /// Hex distance: the number of single steps between `self` and `other`
    /// on an unobstructed grid.
    #[inline]
    pub fn distance(self, other: Hex) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s - other.s).unsigned_abs();
        dq.max(dr).max(ds)
    }

    /// The adjacent hex in direction `dir` (taken modulo 6).
    #[inline]
    pub fn neighbor(self, dir: usize) -> Hex {
        self + DIRECTIONS[dir % 6]
    }

    /// All six neighbours, in direction order.
    #[inline]
    pub fn neighbors(self) -> [Hex; 6] {
        [
            self.neighbor(0),
            self.neighbor(1),
            self.neighbor(2),
            self.neighbor(3),
            self.neighbor(4),
            self.neighbor(5),
        ]
    }

    /// Canonical string form, `"q,r,s"`. Used as a set and cache key.
    pub fn key(self) -> String {
        self.to_string()
    }
}

// --- trait impls for Hex ---

impl Hash for Hex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // s is implied by q and r.
        self.q.hash(state);
        self.r.hash(state);
    }
}

impl PartialOrd for Hex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.q.cmp(&other.q).then(self.r.cmp(&other.r))
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.q, self.r, self.s)
    }
}

impl Add for Hex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_cube(self.q + rhs.q, self.r + rhs.r, self.s + rhs.s)
    }
}

impl Sub for Hex {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_cube(self.q - rhs.q, self.r - rhs.r, self.s - rhs.s)
    }
}

impl Mul<i32> for Hex {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::from_cube(self.q * rhs, self.r * rhs, self.s * rhs)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let h = Hex::new(-2, 7);
        let json = serde_json::to_string(&h).unwrap();
        let back: Hex = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
