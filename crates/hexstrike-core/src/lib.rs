//! **hexstrike-core**: hex-grid geometry and board model.
//!
//! This crate provides the foundational types used across the *hexstrike*
//! workspace: cube-coordinate hexes, board presets that issue stable hex
//! identifiers, tile records, the [`HexGrid`] lookup trait consumed by the
//! search algorithms, and a small in-memory [`Board`] with an ASCII loader.

pub mod ascii;
pub mod board;
pub mod grid;
pub mod hex;
pub mod preset;
pub mod tile;

pub use ascii::BoardError;
pub use board::Board;
pub use grid::{GridFn, HexGrid, OccupiedTiles};
pub use hex::{DIRECTIONS, Hex};
pub use preset::{GridPreset, HexId};
pub use tile::{CharacterId, Team, Tile, TileState};
