use std::fmt;

use hexstrike_core::GridPreset;

/// Default number of movement layers the ranged search explores before
/// giving up.
pub const DEFAULT_MAX_SEARCH_LAYERS: u32 = 20;

/// Search limits and cache sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Hard cap on ranged BFS layers.
    pub max_search_layers: u32,
    pub path_cache_capacity: usize,
    pub distance_cache_capacity: usize,
    /// Capacity of each of the closest-enemy and closest-ally map caches.
    pub target_map_cache_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_search_layers: DEFAULT_MAX_SEARCH_LAYERS,
            path_cache_capacity: 500,
            distance_cache_capacity: 500,
            target_map_cache_capacity: 100,
        }
    }
}

impl SearchConfig {
    /// Check the configuration against a board preset.
    ///
    /// The layer cap must cover the preset's diameter, otherwise targets on
    /// the far side of an open board would be reported unreachable.
    pub fn validate(&self, preset: &GridPreset) -> Result<(), ConfigError> {
        if self.max_search_layers == 0 {
            return Err(ConfigError::ZeroLayerCap);
        }
        for (cache, capacity) in [
            ("path", self.path_cache_capacity),
            ("distance", self.distance_cache_capacity),
            ("target map", self.target_map_cache_capacity),
        ] {
            if capacity == 0 {
                return Err(ConfigError::ZeroCapacity { cache });
            }
        }
        let diameter = preset.diameter();
        if self.max_search_layers < diameter {
            return Err(ConfigError::LayerCapBelowDiameter {
                cap: self.max_search_layers,
                diameter,
                preset: preset.name.clone(),
            });
        }
        Ok(())
    }
}

/// Errors reported by [`SearchConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroLayerCap,
    ZeroCapacity {
        cache: &'static str,
    },
    LayerCapBelowDiameter {
        cap: u32,
        diameter: u32,
        preset: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLayerCap => write!(f, "search config: layer cap must be positive"),
            Self::ZeroCapacity { cache } => {
                write!(f, "search config: {cache} cache capacity must be positive")
            }
            Self::LayerCapBelowDiameter {
                cap,
                diameter,
                preset,
            } => write!(
                f,
                "search config: layer cap {cap} is below the diameter {diameter} of preset {preset:?}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let cfg: SearchConfig = serde_json::from_str(r#"{"max_search_layers": 32}"#).unwrap();
        assert_eq!(cfg.max_search_layers, 32);
        assert_eq!(cfg.distance_cache_capacity, 500);
    }
}
