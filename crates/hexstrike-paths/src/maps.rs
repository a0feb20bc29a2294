//! Closest-target maps for a whole board.
//!
//! For every unit on one side these record the opposing unit it should go
//! for. A map is recomputed only when the set of occupied positions, teams
//! or ranges changes; otherwise it comes from the cache.

use std::collections::{BTreeMap, HashMap};

use hexstrike_core::{CharacterId, GridPreset, HexGrid, HexId, OccupiedTiles, Team, Tile};

use crate::cache::SearchCache;
use crate::config::SearchConfig;
use crate::keys::{range_of, target_map_key};
use crate::memo::MemoCache;
use crate::target::find_closest_target;

/// The target picked for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetInfo {
    pub target: HexId,
    /// Side of the target.
    pub team: Team,
    /// Movement needed before striking.
    pub distance: u32,
}

/// Source hex id to chosen target.
pub type TargetMap = BTreeMap<HexId, TargetInfo>;

/// Map every ally to its closest enemy.
///
/// `grid` defaults to [`OccupiedTiles`] over `tiles`. Units whose occupant has
/// no entry in `ranges` are treated as melee.
pub fn closest_enemy_map(
    tiles: &[Tile],
    ranges: &HashMap<CharacterId, u32>,
    preset: &GridPreset,
    config: &SearchConfig,
    grid: Option<&dyn HexGrid>,
    cache: Option<&mut SearchCache>,
) -> TargetMap {
    closest_map(Team::Ally, tiles, ranges, preset, config, grid, cache)
}

/// Map every enemy to its closest ally.
///
/// See [`closest_enemy_map`].
pub fn closest_ally_map(
    tiles: &[Tile],
    ranges: &HashMap<CharacterId, u32>,
    preset: &GridPreset,
    config: &SearchConfig,
    grid: Option<&dyn HexGrid>,
    cache: Option<&mut SearchCache>,
) -> TargetMap {
    closest_map(Team::Enemy, tiles, ranges, preset, config, grid, cache)
}

fn closest_map(
    side: Team,
    tiles: &[Tile],
    ranges: &HashMap<CharacterId, u32>,
    preset: &GridPreset,
    config: &SearchConfig,
    grid: Option<&dyn HexGrid>,
    mut cache: Option<&mut SearchCache>,
) -> TargetMap {
    let target_team = side.opponent();
    let key = cache
        .is_some()
        .then(|| target_map_key(target_team, grid.is_some(), preset, tiles, ranges));
    if let (Some(cache), Some(key)) = (cache.as_deref_mut(), &key) {
        if let Some(map) = maps_for(cache, target_team).get(key) {
            log::trace!("target map cache hit: {key}");
            return map;
        }
    }

    let default_grid = OccupiedTiles(tiles);
    let grid: &dyn HexGrid = match grid {
        Some(grid) => grid,
        None => &default_grid,
    };

    let sources: Vec<Tile> = tiles
        .iter()
        .filter(|t| t.team == Some(side))
        .copied()
        .collect();
    let targets: Vec<Tile> = tiles
        .iter()
        .filter(|t| t.team == Some(target_team))
        .copied()
        .collect();

    let mut map = TargetMap::new();
    for source in &sources {
        let range = range_of(source, ranges);
        let found = find_closest_target(
            source,
            &targets,
            range,
            grid,
            preset,
            config,
            cache.as_deref_mut(),
        );
        if let Some(found) = found {
            map.insert(
                source.id,
                TargetInfo {
                    target: found.hex_id,
                    team: target_team,
                    distance: found.distance,
                },
            );
        }
    }
    log::debug!(
        "closest {target_team} map: {} of {} {side} unit(s) have a target",
        map.len(),
        sources.len()
    );

    if let (Some(cache), Some(key)) = (cache, key) {
        maps_for(cache, target_team).set(key, map.clone());
    }
    map
}

fn maps_for(cache: &mut SearchCache, target_team: Team) -> &mut MemoCache<String, TargetMap> {
    match target_team {
        Team::Enemy => &mut cache.enemy_maps,
        Team::Ally => &mut cache.ally_maps,
    }
}
