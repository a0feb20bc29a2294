//! Choosing between two equally distant targets.
//!
//! The rules, in order:
//!
//! 1. a target in the source's column (same `q`) beats one that is not;
//! 2. if both or neither are in the column and both lie in the same
//!    diagonal row, the lower hex id wins;
//! 3. otherwise the smaller obstacle-ignoring distance wins, and the lower
//!    hex id settles what is left.
//!
//! The same comparison serves the running best of the melee search and the
//! candidate lists of the ranged one.

use std::cmp::Ordering;

use hexstrike_core::{GridPreset, Hex, Tile};

/// Whether `target` is in the same column as `source`.
pub fn is_vertically_aligned(source: Hex, target: Hex) -> bool {
    source.q == target.q
}

/// Order two candidates for a unit at `source`: `Less` means `a` is
/// preferred.
pub fn compare_candidates(source: Hex, a: &Tile, b: &Tile, preset: &GridPreset) -> Ordering {
    let a_aligned = is_vertically_aligned(source, a.hex);
    let b_aligned = is_vertically_aligned(source, b.hex);
    if a_aligned != b_aligned {
        return if a_aligned {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }
    if preset.diagonal_row(a.id) == preset.diagonal_row(b.id) {
        return a.id.cmp(&b.id);
    }
    source
        .distance(a.hex)
        .cmp(&source.distance(b.hex))
        .then(a.id.cmp(&b.id))
}

/// The preferred of the current `best` and a tied `candidate`.
pub fn prefer_candidate(source: Hex, best: Tile, candidate: Tile, preset: &GridPreset) -> Tile {
    match compare_candidates(source, &candidate, &best, preset) {
        Ordering::Less => candidate,
        _ => best,
    }
}
