//! Tile records: occupancy state, team and occupant of a board hex.

use std::fmt;

use crate::hex::Hex;
use crate::preset::HexId;

/// Which side a unit or tile belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Ally,
    Enemy,
}

impl Team {
    /// The opposing side.
    pub const fn opponent(self) -> Team {
        match self {
            Team::Ally => Team::Enemy,
            Team::Enemy => Team::Ally,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Ally => f.write_str("ally"),
            Team::Enemy => f.write_str("enemy"),
        }
    }
}

/// Occupancy / traversability state of a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    #[default]
    Default,
    Blocked,
    BreakableBlocked,
    AvailableAlly,
    OccupiedAlly,
    AvailableEnemy,
    OccupiedEnemy,
}

impl TileState {
    /// Default traversability: empty tiles are passable, obstacles and
    /// occupied tiles are not.
    pub const fn is_traversable(self) -> bool {
        matches!(
            self,
            TileState::Default | TileState::AvailableAlly | TileState::AvailableEnemy
        )
    }

    /// Whether a unit stands on the tile.
    pub const fn is_occupied(self) -> bool {
        matches!(self, TileState::OccupiedAlly | TileState::OccupiedEnemy)
    }

    /// The team a state is reserved for, if any.
    pub const fn team(self) -> Option<Team> {
        match self {
            TileState::AvailableAlly | TileState::OccupiedAlly => Some(Team::Ally),
            TileState::AvailableEnemy | TileState::OccupiedEnemy => Some(Team::Enemy),
            _ => None,
        }
    }

    /// The occupied state for a team.
    pub const fn occupied_by(team: Team) -> TileState {
        match team {
            Team::Ally => TileState::OccupiedAlly,
            Team::Enemy => TileState::OccupiedEnemy,
        }
    }
}

/// Identity of the character standing on a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A board tile as seen by the search algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub hex: Hex,
    pub id: HexId,
    pub state: TileState,
    pub team: Option<Team>,
    pub occupant: Option<CharacterId>,
}

impl Tile {
    /// An empty tile in the default state.
    pub const fn new(hex: Hex, id: HexId) -> Self {
        Self {
            hex,
            id,
            state: TileState::Default,
            team: None,
            occupant: None,
        }
    }

    /// Return a copy with the given state.
    pub fn with_state(mut self, state: TileState) -> Self {
        self.state = state;
        self
    }

    /// Return a copy occupied by `occupant` of `team`.
    pub fn occupied(mut self, team: Team, occupant: Option<CharacterId>) -> Self {
        self.state = TileState::occupied_by(team);
        self.team = Some(team);
        self.occupant = occupant;
        self
    }
}
