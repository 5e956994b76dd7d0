//! Where a unit can be.

use std::fmt;

use windward_core::{TileId, UnitId};

/// A unit's position in the world.
///
/// `OnCarrier` is the only indirect case: the unit's effective tile is the
/// carrier's tile, resolved by [`World::unit_tile`][crate::World::unit_tile].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Location {
    /// On a map tile (possibly inside the colony occupying it).
    Tile(TileId),
    /// In the European port, off-map.
    Europe,
    /// Aboard another unit's cargo hold.
    OnCarrier(UnitId),
}

impl Location {
    /// The tile, when the location is a tile directly.
    #[inline]
    pub fn tile(self) -> Option<TileId> {
        match self {
            Location::Tile(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn is_europe(self) -> bool {
        matches!(self, Location::Europe)
    }

    /// The carrier, when aboard one.
    #[inline]
    pub fn carrier(self) -> Option<UnitId> {
        match self {
            Location::OnCarrier(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Tile(t) => write!(f, "tile {}", t.0),
            Location::Europe => write!(f, "Europe"),
            Location::OnCarrier(c) => write!(f, "aboard {c}"),
        }
    }
}
