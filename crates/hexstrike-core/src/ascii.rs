//! Boards described as text.
//!
//! One line per board row, one whitespace-separated token per column:
//!
//! | Token | Tile |
//! |---|---|
//! | `.` | default (empty) |
//! | `#` | blocked |
//! | `%` | breakable obstacle |
//! | `a` / `e` | available to allies / enemies |
//! | `A<n>` / `E<n>` | occupied by ally / enemy character `n` (`n` optional) |
//!
//! Rows are laid out in odd-q offset order, so line 3 token 2 is the hex at
//! column 2, row 3.

use std::fmt;

use crate::board::Board;
use crate::preset::{GridPreset, HexId};
use crate::tile::{CharacterId, Team, TileState};

impl Board {
    /// Parse a board from its text form. The preset is sized to the text.
    pub fn from_ascii(name: &str, s: &str) -> Result<Board, BoardError> {
        let s = s.trim();
        let lines: Vec<Vec<&str>> = s
            .lines()
            .map(|l| l.split_whitespace().collect())
            .collect();
        let width = lines.first().map_or(0, |l| l.len());
        if width == 0 {
            return Err(BoardError::Empty);
        }
        if lines.iter().any(|l| l.len() != width) {
            return Err(BoardError::InconsistentSize(s.to_string()));
        }

        let preset = GridPreset::new(name, width as u32, lines.len() as u32);
        let rows = preset.rows;
        let mut board = Board::new(preset);
        for (row, line) in lines.iter().enumerate() {
            for (col, token) in line.iter().enumerate() {
                let id = HexId(col as u32 * rows + row as u32 + 1);
                match parse_token(token) {
                    Some(Cell::State(state)) => {
                        board.set_state(id, state);
                    }
                    Some(Cell::Unit(team, occupant)) => {
                        board.place(id, team, occupant);
                    }
                    None => {
                        return Err(BoardError::InvalidToken {
                            token: token.to_string(),
                            col,
                            row,
                        });
                    }
                }
            }
        }
        Ok(board)
    }

    /// Render the board back to its text form.
    pub fn to_ascii(&self) -> String {
        let preset = self.preset();
        let mut out = String::new();
        for row in 0..preset.rows {
            let tokens: Vec<String> = (0..preset.columns)
                .map(|col| {
                    self.tile_by_id(HexId(col * preset.rows + row + 1))
                        .map_or_else(|| ".".to_string(), |t| token_for(t.state, t.occupant))
                })
                .collect();
            out.push_str(&tokens.join(" "));
            if row + 1 < preset.rows {
                out.push('\n');
            }
        }
        out
    }
}

enum Cell {
    State(TileState),
    Unit(Team, Option<CharacterId>),
}

fn parse_token(token: &str) -> Option<Cell> {
    let cell = match token {
        "." => Cell::State(TileState::Default),
        "#" => Cell::State(TileState::Blocked),
        "%" => Cell::State(TileState::BreakableBlocked),
        "a" => Cell::State(TileState::AvailableAlly),
        "e" => Cell::State(TileState::AvailableEnemy),
        _ => {
            let team = match token.chars().next()? {
                'A' => Team::Ally,
                'E' => Team::Enemy,
                _ => return None,
            };
            let digits = &token[1..];
            let occupant = if digits.is_empty() {
                None
            } else {
                Some(CharacterId(digits.parse().ok()?))
            };
            Cell::Unit(team, occupant)
        }
    };
    Some(cell)
}

fn token_for(state: TileState, occupant: Option<CharacterId>) -> String {
    let unit = |prefix: char| match occupant {
        Some(c) => format!("{prefix}{c}"),
        None => prefix.to_string(),
    };
    match state {
        TileState::Default => ".".to_string(),
        TileState::Blocked => "#".to_string(),
        TileState::BreakableBlocked => "%".to_string(),
        TileState::AvailableAlly => "a".to_string(),
        TileState::AvailableEnemy => "e".to_string(),
        TileState::OccupiedAlly => unit('A'),
        TileState::OccupiedEnemy => unit('E'),
    }
}

/// Errors that can occur when parsing a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The text contains no tokens.
    Empty,
    /// Rows have different numbers of tokens.
    InconsistentSize(String),
    /// A token is not part of the board alphabet.
    InvalidToken { token: String, col: usize, row: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "board: no tiles"),
            Self::InconsistentSize(s) => write!(f, "board: inconsistent row width:\n{s}"),
            Self::InvalidToken { token, col, row } => {
                write!(f, "board contains invalid token \u{201c}{token}\u{201d} at ({col}, {row})")
            }
        }
    }
}

impl std::error::Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::HexGrid;
    use crate::hex::Hex;

    const ARENA: &str = "
        A1 .  #
        .  %  E2
        a  e  E
    ";

    #[test]
    fn parse_and_size() {
        let b = Board::from_ascii("arena", ARENA).unwrap();
        assert_eq!(b.preset().columns, 3);
        assert_eq!(b.preset().rows, 3);
        assert_eq!(b.preset().name, "arena");
    }

    #[test]
    fn tokens_map_to_tiles() {
        let b = Board::from_ascii("arena", ARENA).unwrap();
        let at = |col, row| b.tile(Hex::from_offset(col, row)).unwrap();

        assert_eq!(at(0, 0).state, TileState::OccupiedAlly);
        assert_eq!(at(0, 0).occupant, Some(CharacterId(1)));
        assert_eq!(at(0, 0).id, HexId(1));
        assert_eq!(at(2, 0).state, TileState::Blocked);
        assert_eq!(at(2, 0).id, HexId(7));
        assert_eq!(at(1, 1).state, TileState::BreakableBlocked);
        assert_eq!(at(2, 1).occupant, Some(CharacterId(2)));
        assert_eq!(at(0, 2).state, TileState::AvailableAlly);
        assert_eq!(at(1, 2).state, TileState::AvailableEnemy);
        assert_eq!(at(2, 2).state, TileState::OccupiedEnemy);
        assert_eq!(at(2, 2).occupant, None);
    }

    #[test]
    fn ascii_round_trip() {
        let b = Board::from_ascii("arena", ARENA).unwrap();
        assert_eq!(b.to_ascii(), "A1 . #\n. % E2\na e E");
    }

    #[test]
    fn inconsistent_size_error() {
        let err = Board::from_ascii("bad", ". .\n. . .").unwrap_err();
        assert!(matches!(err, BoardError::InconsistentSize(_)));
    }

    #[test]
    fn invalid_token_error() {
        let err = Board::from_ascii("bad", ". X\n. .").unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidToken {
                token: "X".to_string(),
                col: 1,
                row: 0
            }
        );
        assert!(Board::from_ascii("bad", "A1x").is_err());
    }

    #[test]
    fn empty_error() {
        assert_eq!(Board::from_ascii("empty", "  \n ").unwrap_err(), BoardError::Empty);
    }
}
