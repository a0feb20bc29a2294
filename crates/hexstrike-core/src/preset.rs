//! Board presets and stable hex identifiers.

use std::fmt;

use crate::hex::Hex;

/// Stable integer identifier of a board hex.
///
/// Identifiers are issued column-major starting at 1, so on a preset with
/// `rows` rows the hex at (column, row) has id `column * rows + row + 1`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexId(pub u32);

impl HexId {
    /// Get the underlying integer value.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for HexId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sizes of the consecutive-id groups used as tie-break "diagonal rows".
///
/// The table covers the first 45 identifiers; identifiers beyond it repeat
/// the same cycle.
pub const DIAGONAL_ROW_SIZES: [u32; 15] = [2, 3, 2, 3, 4, 3, 4, 3, 4, 3, 4, 3, 2, 3, 2];

/// Inclusive id ranges of the fixed diagonal-row table, with their row.
const DIAGONAL_ROWS: [(u32, u32, u32); 15] = [
    (1, 2, 1),
    (3, 5, 2),
    (6, 7, 3),
    (8, 10, 4),
    (11, 14, 5),
    (15, 17, 6),
    (18, 21, 7),
    (22, 24, 8),
    (25, 28, 9),
    (29, 31, 10),
    (32, 35, 11),
    (36, 38, 12),
    (39, 40, 13),
    (41, 43, 14),
    (44, 45, 15),
];

/// Shape of the active board: a rectangle of flat-top hexes in odd-q
/// offset layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPreset {
    pub name: String,
    pub columns: u32,
    pub rows: u32,
}

impl GridPreset {
    /// Create a preset with the given name and dimensions.
    pub fn new(name: impl Into<String>, columns: u32, rows: u32) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// The standard 5x9 battle board (45 hexes).
    pub fn standard() -> Self {
        Self::new("standard", 5, 9)
    }

    /// Number of hexes on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Whether the board has no hexes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `hex` lies on the board.
    pub fn contains(&self, hex: Hex) -> bool {
        let (col, row) = hex.to_offset();
        col >= 0 && row >= 0 && (col as u32) < self.columns && (row as u32) < self.rows
    }

    /// The identifier of `hex`, or `None` if it is off the board.
    pub fn id_of(&self, hex: Hex) -> Option<HexId> {
        if !self.contains(hex) {
            return None;
        }
        let (col, row) = hex.to_offset();
        Some(HexId(col as u32 * self.rows + row as u32 + 1))
    }

    /// The hex with identifier `id`, or `None` if no such hex exists.
    pub fn hex(&self, id: HexId) -> Option<Hex> {
        if id.0 == 0 || id.0 as usize > self.len() {
            return None;
        }
        let idx = id.0 - 1;
        Some(Hex::from_offset(
            (idx / self.rows) as i32,
            (idx % self.rows) as i32,
        ))
    }

    /// Iterate over every board hex in id order.
    pub fn iter(&self) -> impl Iterator<Item = (HexId, Hex)> + '_ {
        (1..=self.len() as u32).filter_map(move |id| self.hex(HexId(id)).map(|h| (HexId(id), h)))
    }

    /// The largest hex distance between two board hexes.
    ///
    /// Only perimeter hexes are compared; the farthest pair of a rectangle
    /// always lies on its border.
    pub fn diameter(&self) -> u32 {
        let border: Vec<Hex> = self
            .iter()
            .map(|(_, h)| h)
            .filter(|h| {
                let (col, row) = h.to_offset();
                col == 0
                    || row == 0
                    || col as u32 + 1 == self.columns
                    || row as u32 + 1 == self.rows
            })
            .collect();
        let mut max = 0;
        for (i, &a) in border.iter().enumerate() {
            for &b in &border[i + 1..] {
                max = max.max(a.distance(b));
            }
        }
        max
    }

    /// The tie-break "diagonal row" of a hex identifier.
    ///
    /// Uses the fixed table for the first 45 identifiers and continues its
    /// row-size cycle beyond that. Identifier 0 maps to row 0.
    // TODO: derive rows from this preset's column/row geometry instead of the
    // fixed table once non-standard boards need distinct groupings.
    pub fn diagonal_row(&self, id: HexId) -> u32 {
        diagonal_row(id)
    }
}

impl Default for GridPreset {
    fn default() -> Self {
        Self::standard()
    }
}

/// Look up the diagonal row of `id` in the fixed table, falling back to the
/// periodic row-size cycle for identifiers past its end.
pub fn diagonal_row(id: HexId) -> u32 {
    let id = id.0;
    if id == 0 {
        return 0;
    }
    if let Some(&(_, _, row)) = DIAGONAL_ROWS
        .iter()
        .find(|&&(first, last, _)| (first..=last).contains(&id))
    {
        return row;
    }

    let period: u32 = DIAGONAL_ROW_SIZES.iter().sum();
    let table_rows = DIAGONAL_ROW_SIZES.len() as u32;
    let offset = id - 1;
    let cycle = offset / period;
    let mut within = offset % period;
    let mut row = cycle * table_rows + 1;
    for size in DIAGONAL_ROW_SIZES {
        if within < size {
            break;
        }
        within -= size;
        row += 1;
    }
    row
}
