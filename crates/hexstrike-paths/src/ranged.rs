use std::collections::HashSet;

use hexstrike_core::{Hex, HexGrid};

use crate::distance::UNREACHABLE;

/// Minimal movement for a ranged unit, with every target it ties on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedDistanceResult {
    /// Steps to move, or [`UNREACHABLE`].
    pub movement_distance: u32,
    pub can_reach: bool,
    /// Targets within range after `movement_distance` steps, in discovery
    /// order and without duplicates.
    pub reachable_targets: Vec<Hex>,
}

impl RangedDistanceResult {
    fn unreachable() -> Self {
        Self {
            movement_distance: UNREACHABLE,
            can_reach: false,
            reachable_targets: Vec::new(),
        }
    }
}

/// Breadth-first search outward from `start` for the first movement layer
/// from which any of `targets` is within `range`.
///
/// Layer 0 is `start` itself. Each later layer is made of the traversable,
/// not yet visited neighbours of the previous one. Search gives up after
/// `max_layers` layers.
pub fn calculate_ranged_movement_distance<G: HexGrid + ?Sized>(
    start: Hex,
    targets: &[Hex],
    range: u32,
    grid: &G,
    max_layers: u32,
) -> RangedDistanceResult {
    if targets.is_empty() {
        return RangedDistanceResult::unreachable();
    }

    let in_range_of = |from: Hex, found: &mut Vec<Hex>| {
        for &t in targets {
            if from.distance(t) <= range && !found.contains(&t) {
                found.push(t);
            }
        }
    };

    let mut found = Vec::new();
    in_range_of(start, &mut found);
    if !found.is_empty() {
        return RangedDistanceResult {
            movement_distance: 0,
            can_reach: true,
            reachable_targets: found,
        };
    }

    let mut visited: HashSet<Hex> = HashSet::from([start]);
    let mut frontier = vec![start];
    let mut next = Vec::new();

    for layer in 0..max_layers {
        next.clear();
        for &current in &frontier {
            for neighbor in current.neighbors() {
                if visited.contains(&neighbor) {
                    continue;
                }
                let Some(tile) = grid.tile(neighbor) else {
                    continue;
                };
                if !grid.is_traversable(&tile) {
                    continue;
                }
                visited.insert(neighbor);
                next.push(neighbor);
                in_range_of(neighbor, &mut found);
            }
        }
        if !found.is_empty() {
            log::trace!(
                "ranged search from {start}: {} target(s) after {} step(s)",
                found.len(),
                layer + 1
            );
            return RangedDistanceResult {
                movement_distance: layer + 1,
                can_reach: true,
                reachable_targets: found,
            };
        }
        std::mem::swap(&mut frontier, &mut next);
    }

    log::trace!("ranged search from {start}: nothing within {max_layers} layers");
    RangedDistanceResult::unreachable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_SEARCH_LAYERS;
    use hexstrike_core::{Board, GridFn, GridPreset, HexId, Tile};
    use std::cell::Cell;

    #[test]
    fn target_in_range_from_start() {
        let b = Board::new(GridPreset::new("5x5", 5, 5));
        let start = Hex::from_offset(0, 0);
        let near = Hex::from_offset(2, 0);
        let also_near = Hex::from_offset(0, 2);
        let far = Hex::from_offset(4, 4);
        let r = calculate_ranged_movement_distance(start, &[far, near, also_near], 2, &b, 20);
        assert_eq!(r.movement_distance, 0);
        assert!(r.can_reach);
        assert_eq!(r.reachable_targets, vec![near, also_near]);
    }

    #[test]
    fn one_layer_of_movement() {
        let b = Board::new(GridPreset::new("5x5", 5, 5));
        let start = Hex::from_offset(0, 0);
        let target = Hex::from_offset(0, 3);
        let r = calculate_ranged_movement_distance(start, &[target], 2, &b, 20);
        assert_eq!(r.movement_distance, 1);
        assert_eq!(r.reachable_targets, vec![target]);
    }

    #[test]
    fn ties_are_kept_and_deduplicated() {
        let b = Board::new(GridPreset::new("7x7", 7, 7));
        let start = Hex::from_offset(3, 3);
        let north = Hex::from_offset(3, 0);
        let south = Hex::from_offset(3, 6);
        let r = calculate_ranged_movement_distance(start, &[north, south, north], 2, &b, 20);
        assert_eq!(r.movement_distance, 1);
        assert_eq!(r.reachable_targets.len(), 2);
        assert!(r.reachable_targets.contains(&north));
        assert!(r.reachable_targets.contains(&south));
    }

    #[test]
    fn walls_lengthen_the_approach() {
        let b = Board::from_ascii(
            "wall",
            "
            . . . . .
            # # # # .
            . . . . .
            . . . . .
            ",
        )
        .unwrap();
        let start = Hex::from_offset(0, 0);
        let target = Hex::from_offset(0, 3);
        let open = Board::new(GridPreset::new("open", 5, 4));
        let short = calculate_ranged_movement_distance(start, &[target], 2, &open, 20);
        let long = calculate_ranged_movement_distance(start, &[target], 2, &b, 20);
        assert!(long.can_reach);
        assert!(long.movement_distance > short.movement_distance);
    }

    #[test]
    fn no_targets() {
        let b = Board::new(GridPreset::new("3x3", 3, 3));
        let r = calculate_ranged_movement_distance(Hex::ZERO, &[], 2, &b, 20);
        assert!(!r.can_reach);
        assert_eq!(r.movement_distance, UNREACHABLE);
    }

    #[test]
    fn enclosed_target_exhausts_the_layer_cap() {
        // An unbounded plane walled off around the target; lookups are
        // counted.
        let target = Hex::new(10, 0);
        let lookups = Cell::new(0u32);
        let grid = GridFn::new(
            |h: Hex| {
                lookups.set(lookups.get() + 1);
                Some(Tile::new(h, HexId(0)))
            },
            |t: &Tile| t.hex.distance(target) > 3,
        );
        let r = calculate_ranged_movement_distance(
            Hex::ZERO,
            &[target],
            2,
            &grid,
            DEFAULT_MAX_SEARCH_LAYERS,
        );
        assert!(!r.can_reach);
        assert_eq!(r.movement_distance, UNREACHABLE);
        assert!(r.reachable_targets.is_empty());
        // Layer 20 was expanded: hexes 20 steps out were looked up.
        let ring_20 = 6 * 20;
        assert!(lookups.get() >= ring_20);
    }

    #[test]
    fn reachable_at_the_last_layer() {
        let grid = GridFn::new(
            |h: Hex| Some(Tile::new(h, HexId(0))),
            |_: &Tile| true,
        );
        let target = Hex::new(21, 0);
        let r = calculate_ranged_movement_distance(Hex::ZERO, &[target], 1, &grid, 20);
        assert_eq!(r.movement_distance, 20);
        let r = calculate_ranged_movement_distance(Hex::ZERO, &[target], 1, &grid, 19);
        assert!(!r.can_reach);
    }
}
