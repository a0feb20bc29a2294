//! Pathfinding and target acquisition for hex-grid tactics games.
//!
//! This crate provides the search layer on top of `hexstrike-core`:
//!
//! - **A\*** shortest paths ([`find_path`], [`find_path_distance`])
//! - **Effective distance**: movement needed to bring a target into range
//!   ([`calculate_effective_distance`])
//! - **Layered BFS** for ranged units ([`calculate_ranged_movement_distance`])
//! - **Target acquisition** with a deterministic tie-break policy
//!   ([`find_closest_target`], [`closest_enemy_map`], [`closest_ally_map`])
//!
//! Expensive results are memoized in a [`SearchCache`], an owned value that
//! callers thread through explicitly (`None` disables caching). The
//! [`TargetingEngine`] bundles a cache with its configuration and board
//! preset for callers that want a single handle.
//!
//! All operations are synchronous and single-threaded. A cache has no
//! internal locking; wrap it (or the engine) in a `Mutex` to share it.

mod astar;
mod cache;
mod config;
mod distance;
mod engine;
mod keys;
mod maps;
mod memo;
mod queue;
mod ranged;
mod target;
mod tiebreak;

pub use astar::{PathNode, find_path, find_path_cached, find_path_distance};
pub use cache::{CacheKind, CacheStats, SearchCache};
pub use config::{ConfigError, DEFAULT_MAX_SEARCH_LAYERS, SearchConfig};
pub use distance::{DistanceResult, UNREACHABLE, calculate_effective_distance};
pub use engine::TargetingEngine;
pub use keys::{distance_key, melee_distance_key, path_key, target_map_key};
pub use maps::{TargetInfo, TargetMap, closest_ally_map, closest_enemy_map};
pub use memo::MemoCache;
pub use queue::PriorityQueue;
pub use ranged::{RangedDistanceResult, calculate_ranged_movement_distance};
pub use target::{TargetResult, find_closest_target};
pub use tiebreak::{compare_candidates, is_vertically_aligned, prefer_candidate};
