use hexstrike_core::{Hex, HexGrid};

use crate::astar::find_path;
use crate::cache::SearchCache;
use crate::keys::distance_key;

/// Sentinel movement distance meaning "unreachable".
pub const UNREACHABLE: u32 = u32::MAX;

/// Movement needed to bring a target within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceResult {
    /// Steps to move, or [`UNREACHABLE`].
    pub movement_distance: u32,
    pub can_reach: bool,
    /// Obstacle-ignoring hex distance between the two hexes.
    pub direct_distance: u32,
}

impl DistanceResult {
    /// The target is already within range.
    pub const fn in_range(direct_distance: u32) -> Self {
        Self {
            movement_distance: 0,
            can_reach: true,
            direct_distance,
        }
    }

    /// No path leads to the target.
    pub const fn unreachable(direct_distance: u32) -> Self {
        Self {
            movement_distance: UNREACHABLE,
            can_reach: false,
            direct_distance,
        }
    }
}

/// Movement needed for a unit at `start` with attack `range` to reach
/// `goal`.
///
/// If `goal` is already within `range` the answer is 0 and no search runs.
/// Otherwise the A* path to `goal` is shortened by `range`. Results are
/// memoized under `(start, goal, range)` when a cache is given.
pub fn calculate_effective_distance<G: HexGrid + ?Sized>(
    start: Hex,
    goal: Hex,
    range: u32,
    grid: &G,
    cache: Option<&mut SearchCache>,
) -> DistanceResult {
    effective_distance_keyed(start, goal, range, grid, cache, distance_key)
}

/// [`calculate_effective_distance`] memoized under the key `key` builds.
///
/// Callers that search a modified grid pass their own key builder so their
/// entries never collide with plain queries.
pub(crate) fn effective_distance_keyed<G: HexGrid + ?Sized>(
    start: Hex,
    goal: Hex,
    range: u32,
    grid: &G,
    cache: Option<&mut SearchCache>,
    key: fn(Hex, Hex, u32) -> String,
) -> DistanceResult {
    let direct = start.distance(goal);
    if direct <= range {
        return DistanceResult::in_range(direct);
    }

    let Some(cache) = cache else {
        return effective_distance(start, goal, range, direct, grid);
    };
    let key = key(start, goal, range);
    if let Some(result) = cache.distances.get(&key) {
        log::trace!("distance cache hit: {key}");
        return result;
    }
    let result = effective_distance(start, goal, range, direct, grid);
    cache.distances.set(key, result);
    result
}

fn effective_distance<G: HexGrid + ?Sized>(
    start: Hex,
    goal: Hex,
    range: u32,
    direct: u32,
    grid: &G,
) -> DistanceResult {
    match find_path(start, goal, grid) {
        Some(path) => {
            let steps = path.len() as u32 - 1;
            DistanceResult {
                movement_distance: steps.saturating_sub(range),
                can_reach: true,
                direct_distance: direct,
            }
        }
        None => DistanceResult::unreachable(direct),
    }
}
