use hexstrike_core::Hex;

use crate::config::SearchConfig;
use crate::distance::DistanceResult;
use crate::maps::TargetMap;
use crate::memo::MemoCache;

/// Selects one of the caches held by a [`SearchCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CacheKind {
    Path,
    Distance,
    ClosestEnemyMap,
    ClosestAllyMap,
}

/// Entry counts and lookup totals of a [`SearchCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    pub path_cache_size: usize,
    pub distance_cache_size: usize,
    pub enemy_map_cache_size: usize,
    pub ally_map_cache_size: usize,
    pub hits: u64,
    pub misses: u64,
}

/// The memoization layer: one bounded cache per kind of result.
///
/// Entries live until evicted by capacity pressure or cleared explicitly.
/// Callers are responsible for clearing the cache when the board's
/// obstacles change, since keys only capture the query inputs.
pub struct SearchCache {
    pub(crate) paths: MemoCache<String, Option<Vec<Hex>>>,
    pub(crate) distances: MemoCache<String, DistanceResult>,
    pub(crate) enemy_maps: MemoCache<String, TargetMap>,
    pub(crate) ally_maps: MemoCache<String, TargetMap>,
}

impl SearchCache {
    /// Create a cache with the default capacities.
    pub fn new() -> Self {
        Self::with_config(&SearchConfig::default())
    }

    /// Create a cache sized by `config`.
    pub fn with_config(config: &SearchConfig) -> Self {
        Self {
            paths: MemoCache::new(config.path_cache_capacity),
            distances: MemoCache::new(config.distance_cache_capacity),
            enemy_maps: MemoCache::new(config.target_map_cache_capacity),
            ally_maps: MemoCache::new(config.target_map_cache_capacity),
        }
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.distances.clear();
        self.enemy_maps.clear();
        self.ally_maps.clear();
        log::debug!("search cache cleared");
    }

    /// Drop the entries of one cache.
    pub fn clear_specific(&mut self, kind: CacheKind) {
        match kind {
            CacheKind::Path => self.paths.clear(),
            CacheKind::Distance => self.distances.clear(),
            CacheKind::ClosestEnemyMap => self.enemy_maps.clear(),
            CacheKind::ClosestAllyMap => self.ally_maps.clear(),
        }
        log::debug!("search cache cleared: {kind:?}");
    }

    /// Current entry counts and lookup totals.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            path_cache_size: self.paths.len(),
            distance_cache_size: self.distances.len(),
            enemy_map_cache_size: self.enemy_maps.len(),
            ally_map_cache_size: self.ally_maps.len(),
            hits: self.paths.hits()
                + self.distances.hits()
                + self.enemy_maps.hits()
                + self.ally_maps.hits(),
            misses: self.paths.misses()
                + self.distances.misses()
                + self.enemy_maps.misses()
                + self.ally_maps.misses(),
        }
    }

    /// The raw path cache.
    pub fn paths(&mut self) -> &mut MemoCache<String, Option<Vec<Hex>>> {
        &mut self.paths
    }

    /// The effective-distance cache.
    pub fn distances(&mut self) -> &mut MemoCache<String, DistanceResult> {
        &mut self.distances
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new()
    }
}
