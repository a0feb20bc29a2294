//! Cache key builders.
//!
//! Keys are plain strings derived only from the inputs that influence a
//! result. Board keys sort their entries first, so two calls describing the
//! same configuration produce the same key whatever order the tiles came in.

use std::collections::HashMap;

use hexstrike_core::{CharacterId, GridPreset, Hex, Team, Tile};

/// Range assumed for occupants without a known range.
pub(crate) const DEFAULT_RANGE: u32 = 1;

/// The attack range of the unit standing on `tile`.
pub(crate) fn range_of(tile: &Tile, ranges: &HashMap<CharacterId, u32>) -> u32 {
    tile.occupant
        .and_then(|c| ranges.get(&c).copied())
        .unwrap_or(DEFAULT_RANGE)
}

/// Key for a raw path between two hexes.
pub fn path_key(start: Hex, goal: Hex) -> String {
    format!("{start}|{goal}")
}

/// Key for an effective-distance query.
pub fn distance_key(start: Hex, goal: Hex, range: u32) -> String {
    format!("{start}|{goal}|{range}")
}

/// Key for a melee effective-distance query, where the goal's own cell is
/// passable.
pub fn melee_distance_key(start: Hex, goal: Hex, range: u32) -> String {
    format!("melee|{start}|{goal}|{range}")
}

/// Key for an aggregate closest-target map.
///
/// `target_team` is the side being searched for; the key covers whether the
/// caller supplied its own grid, the preset and every occupied tile's id,
/// team and range.
pub fn target_map_key(
    target_team: Team,
    supplied_grid: bool,
    preset: &GridPreset,
    tiles: &[Tile],
    ranges: &HashMap<CharacterId, u32>,
) -> String {
    let mut entries: Vec<(u32, Team, u32)> = tiles
        .iter()
        .filter_map(|t| t.team.map(|team| (t.id.value(), team, range_of(t, ranges))))
        .collect();
    entries.sort_unstable();
    entries.dedup();

    let lookup = if supplied_grid { "grid" } else { "occupied" };
    let units: Vec<String> = entries
        .iter()
        .map(|(id, team, range)| format!("{id}:{team}:{range}"))
        .collect();
    format!(
        "{target_team}|{lookup}|{}:{}x{}|{}",
        preset.name,
        preset.columns,
        preset.rows,
        units.join(";")
    )
}
