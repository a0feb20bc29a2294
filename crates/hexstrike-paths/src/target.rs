use hexstrike_core::{GridPreset, Hex, HexGrid, HexId, Tile};

use crate::cache::SearchCache;
use crate::config::SearchConfig;
use crate::distance::effective_distance_keyed;
use crate::keys::melee_distance_key;
use crate::ranged::calculate_ranged_movement_distance;
use crate::tiebreak::prefer_candidate;

/// The target chosen for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetResult {
    pub hex_id: HexId,
    pub hex: Hex,
    /// Movement the unit needs before it can strike.
    pub distance: u32,
}

/// A grid that lets searches step onto one extra hex, the target's own.
///
/// Melee units need a path that ends on an occupied cell.
struct TargetPassable<'a, G: ?Sized> {
    inner: &'a G,
    target: Hex,
}

impl<G: HexGrid + ?Sized> HexGrid for TargetPassable<'_, G> {
    fn tile(&self, hex: Hex) -> Option<Tile> {
        self.inner.tile(hex)
    }

    fn is_traversable(&self, tile: &Tile) -> bool {
        tile.hex == self.target || self.inner.is_traversable(tile)
    }
}

/// Pick the single best target among `targets` for the unit on `source`.
///
/// Units with a range above 1 use the layered ranged search and choose among
/// every target that becomes reachable on the same layer. Melee units measure
/// each target on its own and keep the nearest. Ties are settled by
/// [`prefer_candidate`]. Returns `None` if `targets` is empty or nothing can
/// be reached.
pub fn find_closest_target<G: HexGrid + ?Sized>(
    source: &Tile,
    targets: &[Tile],
    source_range: u32,
    grid: &G,
    preset: &GridPreset,
    config: &SearchConfig,
    cache: Option<&mut SearchCache>,
) -> Option<TargetResult> {
    if targets.is_empty() {
        return None;
    }
    let result = if source_range > 1 {
        closest_ranged(source, targets, source_range, grid, preset, config)
    } else {
        closest_melee(source, targets, source_range, grid, preset, cache)
    };
    match &result {
        Some(r) => log::debug!(
            "closest target for {}: {} at movement {}",
            source.id,
            r.hex_id,
            r.distance
        ),
        None => log::debug!("closest target for {}: none reachable", source.id),
    }
    result
}

fn closest_ranged<G: HexGrid + ?Sized>(
    source: &Tile,
    targets: &[Tile],
    range: u32,
    grid: &G,
    preset: &GridPreset,
    config: &SearchConfig,
) -> Option<TargetResult> {
    let hexes: Vec<Hex> = targets.iter().map(|t| t.hex).collect();
    let ranged = calculate_ranged_movement_distance(
        source.hex,
        &hexes,
        range,
        grid,
        config.max_search_layers,
    );
    if !ranged.can_reach {
        return None;
    }
    let best = ranged
        .reachable_targets
        .iter()
        .filter_map(|h| targets.iter().find(|t| t.hex == *h).copied())
        .reduce(|best, candidate| prefer_candidate(source.hex, best, candidate, preset))?;
    Some(TargetResult {
        hex_id: best.id,
        hex: best.hex,
        distance: ranged.movement_distance,
    })
}

fn closest_melee<G: HexGrid + ?Sized>(
    source: &Tile,
    targets: &[Tile],
    range: u32,
    grid: &G,
    preset: &GridPreset,
    mut cache: Option<&mut SearchCache>,
) -> Option<TargetResult> {
    let mut best: Option<(Tile, u32)> = None;
    for target in targets {
        if target.hex == source.hex {
            continue;
        }
        let passable = TargetPassable {
            inner: grid,
            target: target.hex,
        };
        let d = effective_distance_keyed(
            source.hex,
            target.hex,
            range,
            &passable,
            cache.as_deref_mut(),
            melee_distance_key,
        );
        if !d.can_reach {
            continue;
        }
        best = match best {
            None => Some((*target, d.movement_distance)),
            Some((_, best_d)) if d.movement_distance < best_d => {
                Some((*target, d.movement_distance))
            }
            Some((tile, best_d)) if d.movement_distance == best_d => Some((
                prefer_candidate(source.hex, tile, *target, preset),
                best_d,
            )),
            keep => keep,
        };
    }
    best.map(|(tile, distance)| TargetResult {
        hex_id: tile.id,
        hex: tile.hex,
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexstrike_core::{Board, CharacterId, Team};

    fn board_5x5() -> Board {
        Board::new(GridPreset::new("5x5", 5, 5))
    }

    fn place(b: &mut Board, id: u32, team: Team) -> Tile {
        b.place(HexId(id), team, Some(CharacterId(id)));
        b.tile_by_id(HexId(id)).unwrap()
    }

    #[test]
    fn melee_ally_finds_enemy_across_open_board() {
        let mut b = board_5x5();
        let ally = place(&mut b, 1, Team::Ally);
        let enemy = place(&mut b, 13, Team::Enemy);
        let config = SearchConfig::default();
        let r = find_closest_target(&ally, &[enemy], 1, &b, b.preset(), &config, None).unwrap();
        assert_eq!(r.hex_id, HexId(13));
        assert_eq!(r.hex, enemy.hex);
        assert_eq!(r.distance, 2);
    }

    #[test]
    fn aligned_enemy_wins_a_tie() {
        let mut b = board_5x5();
        // Hex 13 is the board centre; 11 is two hexes up its column and 2
        // is two hexes away in the first column.
        let ally = place(&mut b, 13, Team::Ally);
        let unaligned = place(&mut b, 2, Team::Enemy);
        let aligned = place(&mut b, 11, Team::Enemy);
        assert_eq!(ally.hex.distance(unaligned.hex), 2);
        assert_eq!(ally.hex.distance(aligned.hex), 2);
        let config = SearchConfig::default();

        for targets in [[unaligned, aligned], [aligned, unaligned]] {
            let melee =
                find_closest_target(&ally, &targets, 1, &b, b.preset(), &config, None).unwrap();
            assert_eq!(melee.hex_id, HexId(11));
            assert_eq!(melee.distance, 1);

            let ranged =
                find_closest_target(&ally, &targets, 2, &b, b.preset(), &config, None).unwrap();
            assert_eq!(ranged.hex_id, HexId(11));
            assert_eq!(ranged.distance, 0);
        }
    }

    #[test]
    fn nearer_target_beats_aligned_one() {
        let mut b = board_5x5();
        let ally = place(&mut b, 1, Team::Ally);
        let far_aligned = place(&mut b, 5, Team::Enemy);
        let near = place(&mut b, 7, Team::Enemy);
        let config = SearchConfig::default();
        let r = find_closest_target(&ally, &[far_aligned, near], 1, &b, b.preset(), &config, None)
            .unwrap();
        assert_eq!(r.hex_id, HexId(7));
    }

    #[test]
    fn no_targets() {
        let mut b = board_5x5();
        let ally = place(&mut b, 1, Team::Ally);
        let config = SearchConfig::default();
        assert_eq!(
            find_closest_target(&ally, &[], 1, &b, b.preset(), &config, None),
            None
        );
        assert_eq!(
            find_closest_target(&ally, &[], 3, &b, b.preset(), &config, None),
            None
        );
    }

    #[test]
    fn enclosed_enemy_is_skipped() {
        let mut b = Board::from_ascii(
            "enclosed",
            "
            A1 . . . .
            .  . # # #
            .  . # E2 #
            .  . # # #
            .  . . . E3
            ",
        )
        .unwrap();
        let ally = b.tile_by_id(HexId(1)).unwrap();
        let enclosed = b.tile_by_id(b.preset().id_of(Hex::from_offset(3, 2)).unwrap()).unwrap();
        let open = b.tile_by_id(b.preset().id_of(Hex::from_offset(4, 4)).unwrap()).unwrap();
        assert_eq!(enclosed.team, Some(Team::Enemy));
        assert_eq!(open.team, Some(Team::Enemy));
        let config = SearchConfig::default();

        let alone = find_closest_target(&ally, &[enclosed], 1, &b, b.preset(), &config, None);
        assert_eq!(alone, None);
        let r = find_closest_target(&ally, &[enclosed, open], 1, &b, b.preset(), &config, None)
            .unwrap();
        assert_eq!(r.hex_id, open.id);

        // Opening the wall makes it reachable again.
        let wall = b.preset().id_of(Hex::from_offset(2, 2)).unwrap();
        b.clear(wall);
        let r = find_closest_target(&ally, &[enclosed], 1, &b, b.preset(), &config, None);
        assert!(r.is_some());
    }

    #[test]
    fn melee_entries_stay_apart_from_direct_distances() {
        let mut b = board_5x5();
        let ally = place(&mut b, 1, Team::Ally);
        let enemy = place(&mut b, 13, Team::Enemy);
        let config = SearchConfig::default();
        let mut cache = SearchCache::new();

        let direct = crate::distance::calculate_effective_distance(
            ally.hex,
            enemy.hex,
            1,
            &b,
            Some(&mut cache),
        );
        assert!(!direct.can_reach);
        let r = find_closest_target(&ally, &[enemy], 1, &b, b.preset(), &config, Some(&mut cache));
        assert_eq!(r.map(|r| r.distance), Some(2));
        let again = crate::distance::calculate_effective_distance(
            ally.hex,
            enemy.hex,
            1,
            &b,
            Some(&mut cache),
        );
        assert_eq!(again, direct);
        assert_eq!(cache.stats().distance_cache_size, 2);
    }

    #[test]
    fn repeated_and_cached_queries_agree() {
        let mut b = board_5x5();
        b.set_state(HexId(8), hexstrike_core::TileState::Blocked);
        b.set_state(HexId(12), hexstrike_core::TileState::Blocked);
        let ally = place(&mut b, 1, Team::Ally);
        let targets = [
            place(&mut b, 15, Team::Enemy),
            place(&mut b, 21, Team::Enemy),
            place(&mut b, 19, Team::Enemy),
        ];
        let config = SearchConfig::default();
        let mut cache = SearchCache::new();
        for range in [1, 2, 3] {
            let plain = find_closest_target(&ally, &targets, range, &b, b.preset(), &config, None);
            for _ in 0..3 {
                let cached = find_closest_target(
                    &ally,
                    &targets,
                    range,
                    &b,
                    b.preset(),
                    &config,
                    Some(&mut cache),
                );
                assert_eq!(plain, cached);
            }
        }
        assert!(cache.stats().hits > 0);
    }
}
