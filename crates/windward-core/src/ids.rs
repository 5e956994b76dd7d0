//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can key `BTreeMap`s (the arena and
//! the turn driver both rely on ordered iteration for determinism) without
//! ceremony.  The inner integer is `pub` for construction in tests and
//! loaders; runtime code should treat IDs as opaque.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// `true` unless this is the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier of one simulation unit.  The AI layer keys its agent arena
    /// by this, so a unit and its AI wrapper always share an identity.
    pub struct UnitId(u32);
}

typed_id! {
    /// Identifier of an owning player (strategic controller).
    pub struct PlayerId(u16);
}

typed_id! {
    /// Index of a map tile (row-major into the grid).
    pub struct TileId(u32);
}

typed_id! {
    /// Identifier of a colony.
    pub struct ColonyId(u16);
}

typed_id! {
    /// Identifier of a higher-level goal grouping several agents.
    pub struct GoalId(u32);
}

typed_id! {
    /// Identifier of a wish (a colony's standing request for a unit or goods).
    pub struct WishId(u32);
}
