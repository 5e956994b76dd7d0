//! `windward-world` — the authoritative world model the AI core acts against.
//!
//! The AI layer never mutates world state directly.  It reads freely, and
//! requests changes through the [`ActionServer`] trait, whose one in-process
//! implementation ([`LocalServer`]) applies each request synchronously:
//! success means the world already reflects the change, failure means no
//! state changed at all.
//!
//! # What lives here
//!
//! | Module        | Contents                                          |
//! |---------------|---------------------------------------------------|
//! | [`map`]       | `WorldMap`, `Tile`, `Direction`                   |
//! | [`location`]  | `Location` (tile / Europe / aboard a carrier)     |
//! | [`goods`]     | `GoodsKind`, per-player `Market` (prices, boycotts, gold) |
//! | [`equipment`] | `EquipmentKind`, `Role`, role derivation          |
//! | [`unit`]      | `Unit`, `UnitKind` (capacity, space, naval/native) |
//! | [`colony`]    | `Colony` and its buildable-equipment set          |
//! | [`world`]     | `World` aggregate and cross-object queries        |
//! | [`server`]    | `ActionServer` trait, `LocalServer`               |

pub mod colony;
pub mod error;
pub mod equipment;
pub mod goods;
pub mod location;
pub mod map;
pub mod server;
pub mod unit;
pub mod world;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use colony::Colony;
pub use error::{WorldError, WorldResult};
pub use equipment::{EquipmentKind, Role};
pub use goods::{GoodsKind, Market};
pub use location::Location;
pub use map::{Direction, Tile, WorldMap};
pub use server::{ActionServer, LocalServer};
pub use unit::{Unit, UnitKind};
pub use world::World;
