use crate::hex::Hex;
use crate::tile::Tile;

/// Tile lookup interface consumed by the search algorithms.
///
/// Out-of-range hexes return `None`. Implementors only need [`tile`];
/// [`is_traversable`] defaults to the tile state's own rule.
///
/// [`tile`]: HexGrid::tile
/// [`is_traversable`]: HexGrid::is_traversable
pub trait HexGrid {
    /// The tile at `hex`, or `None` if there is no tile there.
    fn tile(&self, hex: Hex) -> Option<Tile>;

    /// Whether a search may expand through `tile`.
    fn is_traversable(&self, tile: &Tile) -> bool {
        tile.state.is_traversable()
    }
}

impl<G: HexGrid + ?Sized> HexGrid for &G {
    fn tile(&self, hex: Hex) -> Option<Tile> {
        (**self).tile(hex)
    }

    fn is_traversable(&self, tile: &Tile) -> bool {
        (**self).is_traversable(tile)
    }
}

/// A [`HexGrid`] built from a lookup closure and a traversability predicate.
pub struct GridFn<L, P> {
    lookup: L,
    traversable: P,
}

impl<L, P> GridFn<L, P>
where
    L: Fn(Hex) -> Option<Tile>,
    P: Fn(&Tile) -> bool,
{
    pub fn new(lookup: L, traversable: P) -> Self {
        Self {
            lookup,
            traversable,
        }
    }
}

impl<L, P> HexGrid for GridFn<L, P>
where
    L: Fn(Hex) -> Option<Tile>,
    P: Fn(&Tile) -> bool,
{
    fn tile(&self, hex: Hex) -> Option<Tile> {
        (self.lookup)(hex)
    }

    fn is_traversable(&self, tile: &Tile) -> bool {
        (self.traversable)(tile)
    }
}

/// A lookup that only knows the occupied tiles it was given.
///
/// Every hex not in the list is absent, so searches through it can only
/// step across hexes that appear in the slice. This is only a complete
/// picture when the caller guarantees the slice covers every relevant tile.
#[derive(Clone, Copy, Debug)]
pub struct OccupiedTiles<'a>(pub &'a [Tile]);

impl HexGrid for OccupiedTiles<'_> {
    fn tile(&self, hex: Hex) -> Option<Tile> {
        self.0.iter().find(|t| t.hex == hex).copied()
    }
}
