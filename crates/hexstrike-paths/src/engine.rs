use std::collections::HashMap;

use hexstrike_core::{CharacterId, GridPreset, Hex, HexGrid, Tile};

use crate::astar::find_path_cached;
use crate::cache::{CacheKind, CacheStats, SearchCache};
use crate::config::{ConfigError, SearchConfig};
use crate::distance::{DistanceResult, calculate_effective_distance};
use crate::maps::{TargetMap, closest_ally_map, closest_enemy_map};
use crate::ranged::{RangedDistanceResult, calculate_ranged_movement_distance};
use crate::target::{TargetResult, find_closest_target};

/// Owns a board preset, search limits and a [`SearchCache`], and answers
/// every query against them.
///
/// The engine is single-threaded; share it behind a `Mutex` when several
/// threads need it. The cache must be cleared whenever obstacles on the board
/// change.
pub struct TargetingEngine {
    preset: GridPreset,
    config: SearchConfig,
    cache: SearchCache,
    caching_enabled: bool,
}

impl Default for TargetingEngine {
    fn default() -> Self {
        Self {
            preset: GridPreset::standard(),
            config: SearchConfig::default(),
            cache: SearchCache::new(),
            caching_enabled: true,
        }
    }
}

impl TargetingEngine {
    /// Create an engine after checking `config` against `preset`.
    pub fn new(preset: GridPreset, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate(&preset)?;
        log::debug!(
            "targeting engine for {} ({}x{}), layer cap {}",
            preset.name,
            preset.columns,
            preset.rows,
            config.max_search_layers
        );
        let cache = SearchCache::with_config(&config);
        Ok(Self {
            preset,
            config,
            cache,
            caching_enabled: true,
        })
    }

    pub fn preset(&self) -> &GridPreset {
        &self.preset
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn caching_enabled(&self) -> bool {
        self.caching_enabled
    }

    /// Turn memoization on or off. Disabling does not drop cached entries.
    pub fn set_caching_enabled(&mut self, enabled: bool) {
        self.caching_enabled = enabled;
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn clear_cache_kind(&mut self, kind: CacheKind) {
        self.cache.clear_specific(kind);
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Shortest path from `start` to `goal`. See [`crate::find_path`].
    pub fn find_path<G: HexGrid + ?Sized>(
        &mut self,
        start: Hex,
        goal: Hex,
        grid: &G,
    ) -> Option<Vec<Hex>> {
        let cache = self.caching_enabled.then_some(&mut self.cache);
        find_path_cached(start, goal, grid, cache)
    }

    pub fn effective_distance<G: HexGrid + ?Sized>(
        &mut self,
        start: Hex,
        goal: Hex,
        range: u32,
        grid: &G,
    ) -> DistanceResult {
        let cache = self.caching_enabled.then_some(&mut self.cache);
        calculate_effective_distance(start, goal, range, grid, cache)
    }

    /// Ranged search capped at the configured number of layers.
    pub fn ranged_movement_distance<G: HexGrid + ?Sized>(
        &self,
        start: Hex,
        targets: &[Hex],
        range: u32,
        grid: &G,
    ) -> RangedDistanceResult {
        calculate_ranged_movement_distance(
            start,
            targets,
            range,
            grid,
            self.config.max_search_layers,
        )
    }

    pub fn closest_target<G: HexGrid + ?Sized>(
        &mut self,
        source: &Tile,
        targets: &[Tile],
        range: u32,
        grid: &G,
    ) -> Option<TargetResult> {
        let cache = self.caching_enabled.then_some(&mut self.cache);
        find_closest_target(source, targets, range, grid, &self.preset, &self.config, cache)
    }

    pub fn closest_enemy_map(
        &mut self,
        tiles: &[Tile],
        ranges: &HashMap<CharacterId, u32>,
        grid: Option<&dyn HexGrid>,
    ) -> TargetMap {
        let cache = self.caching_enabled.then_some(&mut self.cache);
        closest_enemy_map(tiles, ranges, &self.preset, &self.config, grid, cache)
    }

    pub fn closest_ally_map(
        &mut self,
        tiles: &[Tile],
        ranges: &HashMap<CharacterId, u32>,
        grid: Option<&dyn HexGrid>,
    ) -> TargetMap {
        let cache = self.caching_enabled.then_some(&mut self.cache);
        closest_ally_map(tiles, ranges, &self.preset, &self.config, grid, cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexstrike_core::{Board, HexId, Team};
    use std::sync::Mutex;

    fn engine_for(board: &Board) -> TargetingEngine {
        TargetingEngine::new(board.preset().clone(), SearchConfig::default()).unwrap()
    }

    #[test]
    fn default_engine_uses_the_standard_board() {
        let e = TargetingEngine::default();
        assert_eq!(e.preset(), &GridPreset::standard());
        assert!(e.caching_enabled());
        assert!(e.config().validate(e.preset()).is_ok());
    }

    #[test]
    fn rejects_a_short_layer_cap() {
        let config = SearchConfig {
            max_search_layers: 3,
            ..SearchConfig::default()
        };
        let err = TargetingEngine::new(GridPreset::standard(), config).err();
        assert!(matches!(
            err,
            Some(ConfigError::LayerCapBelowDiameter { cap: 3, .. })
        ));
    }

    #[test]
    fn queries_fill_the_cache_only_when_enabled() {
        let mut b = Board::new(GridPreset::new("5x5", 5, 5));
        b.place(HexId(1), Team::Ally, Some(CharacterId(1)));
        b.place(HexId(13), Team::Enemy, Some(CharacterId(2)));
        let tiles = b.occupied_tiles();
        let mut e = engine_for(&b);

        e.set_caching_enabled(false);
        let uncached = e.closest_enemy_map(&tiles, &HashMap::new(), Some(&b));
        assert_eq!(e.stats(), CacheStats::default());

        e.set_caching_enabled(true);
        let cached = e.closest_enemy_map(&tiles, &HashMap::new(), Some(&b));
        assert_eq!(uncached, cached);
        assert_eq!(cached[&HexId(1)].target, HexId(13));
        assert_eq!(cached[&HexId(1)].distance, 2);
        let stats = e.stats();
        assert_eq!(stats.enemy_map_cache_size, 1);
        assert_eq!(stats.distance_cache_size, 1);

        e.clear_cache_kind(CacheKind::ClosestEnemyMap);
        assert_eq!(e.stats().enemy_map_cache_size, 0);
        assert_eq!(e.stats().distance_cache_size, 1);
        e.clear_cache();
        assert_eq!(e.stats().distance_cache_size, 0);
    }

    #[test]
    fn melee_and_direct_distances_do_not_share_entries() {
        let mut b = Board::new(GridPreset::new("5x5", 5, 5));
        b.place(HexId(1), Team::Ally, Some(CharacterId(1)));
        b.place(HexId(13), Team::Enemy, Some(CharacterId(2)));
        let ally = b.tile_by_id(HexId(1)).unwrap();
        let enemy = b.tile_by_id(HexId(13)).unwrap();

        // The occupied goal blocks a direct search but not a melee one.
        let mut plain = engine_for(&b);
        plain.set_caching_enabled(false);
        let direct = plain.effective_distance(ally.hex, enemy.hex, 1, &b);
        let melee = plain.closest_target(&ally, &[enemy], 1, &b);
        assert!(!direct.can_reach);
        assert_eq!(melee.map(|r| (r.hex_id, r.distance)), Some((HexId(13), 2)));

        // Melee first, then direct.
        let mut e = engine_for(&b);
        assert_eq!(e.closest_target(&ally, &[enemy], 1, &b), melee);
        assert_eq!(e.effective_distance(ally.hex, enemy.hex, 1, &b), direct);
        assert_eq!(e.closest_target(&ally, &[enemy], 1, &b), melee);
        assert_eq!(e.effective_distance(ally.hex, enemy.hex, 1, &b), direct);
        assert_eq!(e.stats().distance_cache_size, 2);

        // Direct first, then melee.
        let mut e = engine_for(&b);
        assert_eq!(e.effective_distance(ally.hex, enemy.hex, 1, &b), direct);
        assert_eq!(e.closest_target(&ally, &[enemy], 1, &b), melee);
        assert_eq!(e.effective_distance(ally.hex, enemy.hex, 1, &b), direct);
        assert_eq!(e.closest_target(&ally, &[enemy], 1, &b), melee);
        assert!(e.stats().hits >= 2);

        // Turning the cache off again still agrees.
        e.set_caching_enabled(false);
        assert_eq!(e.effective_distance(ally.hex, enemy.hex, 1, &b), direct);
        assert_eq!(e.closest_target(&ally, &[enemy], 1, &b), melee);
    }

    #[test]
    fn path_and_distance_queries() {
        let b = Board::new(GridPreset::new("5x5", 5, 5));
        let mut e = engine_for(&b);
        let start = Hex::from_offset(0, 0);
        let goal = Hex::from_offset(2, 2);
        let path = e.find_path(start, goal, &b).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(e.find_path(start, goal, &b), Some(path));
        assert_eq!(e.effective_distance(start, goal, 1, &b).movement_distance, 2);
        let r = e.ranged_movement_distance(start, &[goal], 2, &b);
        assert_eq!(r.movement_distance, 1);
        let stats = e.stats();
        assert_eq!(stats.path_cache_size, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn engine_can_be_shared() {
        let b = Board::new(GridPreset::new("3x3", 3, 3));
        let shared = std::sync::Arc::new(Mutex::new(engine_for(&b)));
        let worker = {
            let shared = shared.clone();
            std::thread::spawn(move || {
                let b = Board::new(GridPreset::new("3x3", 3, 3));
                let mut e = shared.lock().unwrap();
                e.find_path(Hex::ZERO, Hex::from_offset(2, 2), &b)
            })
        };
        let path = worker.join().unwrap();
        assert!(path.is_some());
        assert_eq!(shared.lock().unwrap().stats().path_cache_size, 1);
    }
}
