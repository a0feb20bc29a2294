//! An in-memory board of tiles.
//!
//! [`Board`] is the simplest [`HexGrid`] implementation: every hex of a
//! [`GridPreset`] gets a tile, and tiles can be blocked or occupied by id.

use std::collections::HashMap;

use crate::grid::HexGrid;
use crate::hex::Hex;
use crate::preset::{GridPreset, HexId};
use crate::tile::{CharacterId, Team, Tile, TileState};

#[derive(Debug, Clone)]
pub struct Board {
    preset: GridPreset,
    tiles: HashMap<Hex, Tile>,
}

impl Board {
    /// Create a board with every hex of `preset` in the default state.
    pub fn new(preset: GridPreset) -> Self {
        let tiles = preset
            .iter()
            .map(|(id, hex)| (hex, Tile::new(hex, id)))
            .collect();
        Self { preset, tiles }
    }

    /// The board's preset.
    pub fn preset(&self) -> &GridPreset {
        &self.preset
    }

    /// The tile with identifier `id`.
    pub fn tile_by_id(&self, id: HexId) -> Option<Tile> {
        self.preset.hex(id).and_then(|h| self.tiles.get(&h).copied())
    }

    /// Set the state of the tile with identifier `id`.
    ///
    /// Returns `false` if no such tile exists.
    pub fn set_state(&mut self, id: HexId, state: TileState) -> bool {
        self.update(id, |t| {
            t.state = state;
            t.team = state.team();
            if !state.is_occupied() {
                t.occupant = None;
            }
        })
    }

    /// Put a unit of `team` on the tile with identifier `id`.
    ///
    /// Returns `false` if no such tile exists.
    pub fn place(&mut self, id: HexId, team: Team, occupant: Option<CharacterId>) -> bool {
        self.update(id, |t| *t = t.occupied(team, occupant))
    }

    /// Reset the tile with identifier `id` to the default state.
    pub fn clear(&mut self, id: HexId) -> bool {
        self.update(id, |t| *t = Tile::new(t.hex, t.id))
    }

    /// All occupied tiles, in id order.
    pub fn occupied_tiles(&self) -> Vec<Tile> {
        let mut tiles: Vec<Tile> = self
            .tiles
            .values()
            .filter(|t| t.state.is_occupied())
            .copied()
            .collect();
        tiles.sort_by_key(|t| t.id);
        tiles
    }

    /// Iterate over all tiles in id order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.preset
            .iter()
            .filter_map(|(_, hex)| self.tiles.get(&hex).copied())
    }

    fn update(&mut self, id: HexId, f: impl FnOnce(&mut Tile)) -> bool {
        let Some(hex) = self.preset.hex(id) else {
            return false;
        };
        match self.tiles.get_mut(&hex) {
            Some(t) => {
                f(t);
                true
            }
            None => false,
        }
    }
}

impl HexGrid for Board {
    fn tile(&self, hex: Hex) -> Option<Tile> {
        self.tiles.get(&hex).copied()
    }
}
