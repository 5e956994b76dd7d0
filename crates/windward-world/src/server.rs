//! The synchronous action-request seam between AI and world.
//!
//! All requests are authoritative: `true` means the world already reflects
//! the change, `false` means nothing changed and the caller may retry next
//! turn.  The AI core treats every `false` as a transient failure, never as
//! an error.

use log::trace;
use windward_core::UnitId;

use crate::equipment::EquipmentKind;
use crate::location::Location;
use crate::map::Direction;
use crate::world::World;

// ── ActionServer ──────────────────────────────────────────────────────────────

/// The external collaborator that actually executes unit actions.
///
/// Implementations must be all-or-nothing per call.  [`LocalServer`] is the
/// in-process implementation; a networked game would put its message
/// exchange behind this same trait.
pub trait ActionServer {
    /// Move one step in `dir`.  Handles stepping ashore off a carrier.
    fn move_unit(&mut self, world: &mut World, unit: UnitId, dir: Direction) -> bool;

    /// Move directly to `dest`.  Only same-location, adjacent-tile, and
    /// water↔Europe transitions are honored; anything farther fails.
    fn move_to(&mut self, world: &mut World, unit: UnitId, dest: Location) -> bool;

    /// Acquire one equipment item (colony build or European purchase).
    fn equip(&mut self, world: &mut World, unit: UnitId, kind: EquipmentKind) -> bool;

    /// Load `unit` aboard `carrier`, stepping in `dir` first when given.
    fn embark(
        &mut self,
        world: &mut World,
        carrier: UnitId,
        unit: UnitId,
        dir: Option<Direction>,
    ) -> bool;

    /// Unload `unit` onto its carrier's (docked) tile, or ashore in Europe.
    fn disembark(&mut self, world: &mut World, unit: UnitId) -> bool;
}

// ── LocalServer ───────────────────────────────────────────────────────────────

/// In-process [`ActionServer`].  Also the server all tests run against.
#[derive(Default)]
pub struct LocalServer;

impl LocalServer {
    pub fn new() -> Self {
        Self
    }

    /// Terrain admissibility for one unit kind on one tile.  Naval units may
    /// enter land tiles only to dock at a colony.
    fn can_enter(world: &World, unit: UnitId, tile: windward_core::TileId) -> bool {
        let Some(u) = world.unit(unit) else {
            return false;
        };
        if u.kind.is_naval() {
            world.map.is_water(tile) || world.colony_at(tile).is_some()
        } else {
            world.map.is_land(tile)
        }
    }
}

impl ActionServer for LocalServer {
    fn move_unit(&mut self, world: &mut World, unit: UnitId, dir: Direction) -> bool {
        // The tile the step starts from: the unit's own, or its carrier's.
        let Some(from) = world.unit_tile(unit) else {
            return false;
        };
        let Some(to) = world.map.neighbor(from, dir) else {
            return false;
        };
        if !Self::can_enter(world, unit, to) {
            return false;
        }
        if let Some(u) = world.unit_mut(unit) {
            u.location = Location::Tile(to);
            trace!("{unit} moved to tile {}", to.0);
            true
        } else {
            false
        }
    }

    fn move_to(&mut self, world: &mut World, unit: UnitId, dest: Location) -> bool {
        let Some(u) = world.unit(unit) else {
            return false;
        };
        let current = u.location;
        let naval = u.kind.is_naval();
        if current == dest {
            return true;
        }
        let ok = match (current, dest) {
            // Sailing for Europe from open water.
            (Location::Tile(t), Location::Europe) => naval && world.map.is_water(t),
            // Arriving from the high seas onto open water.
            (Location::Europe, Location::Tile(t)) => naval && world.map.is_water(t),
            (Location::Tile(from), Location::Tile(to)) => {
                world.map.adjacent(from, to) && Self::can_enter(world, unit, to)
            }
            _ => false,
        };
        if !ok {
            return false;
        }
        if let Some(u) = world.unit_mut(unit) {
            u.location = dest;
            trace!("{unit} moved to {dest}");
            true
        } else {
            false
        }
    }

    fn equip(&mut self, world: &mut World, unit: UnitId, kind: EquipmentKind) -> bool {
        let Some(u) = world.unit(unit) else {
            return false;
        };
        if !u.can_equip_with(kind) {
            return false;
        }
        let owner = u.owner;
        match u.location {
            Location::Europe => {
                // Purchase the required goods at market prices.
                let Some(market) = world.market(owner) else {
                    return false;
                };
                let cost: u32 = kind
                    .required_goods()
                    .iter()
                    .map(|&(g, amount)| market.bid_price(g, amount))
                    .sum();
                let Some(market) = world.market_mut(owner) else {
                    return false;
                };
                if !market.spend(cost) {
                    return false;
                }
            }
            Location::Tile(t) => {
                let Some(colony) = world.colony_at(t) else {
                    return false;
                };
                if !colony.can_build(kind) {
                    return false;
                }
            }
            Location::OnCarrier(_) => return false,
        }
        if let Some(u) = world.unit_mut(unit) {
            u.equipment.push(kind);
            trace!("{unit} equipped with {kind:?}");
            true
        } else {
            false
        }
    }

    fn embark(
        &mut self,
        world: &mut World,
        carrier: UnitId,
        unit: UnitId,
        dir: Option<Direction>,
    ) -> bool {
        let (Some(c), Some(u)) = (world.unit(carrier), world.unit(unit)) else {
            return false;
        };
        if !c.could_carry(u) || world.space_available(carrier) < u.kind.space_taken() {
            return false;
        }
        let co_located = match (u.location, c.location) {
            (Location::Europe, Location::Europe) => true,
            (Location::Tile(a), Location::Tile(b)) => {
                a == b
                    || match dir {
                        Some(d) => world.map.neighbor(a, d) == Some(b),
                        None => false,
                    }
            }
            _ => false,
        };
        if !co_located {
            return false;
        }
        if let Some(u) = world.unit_mut(unit) {
            u.location = Location::OnCarrier(carrier);
            trace!("{unit} embarked on {carrier}");
            true
        } else {
            false
        }
    }

    fn disembark(&mut self, world: &mut World, unit: UnitId) -> bool {
        let Some(u) = world.unit(unit) else {
            return false;
        };
        let Some(carrier) = u.location.carrier() else {
            return false;
        };
        // Dockside unload: the carrier must be on a land tile, or in Europe.
        let landing = match world.unit(carrier).map(|c| c.location) {
            Some(Location::Europe) => Location::Europe,
            Some(Location::Tile(t)) if world.map.is_land(t) => Location::Tile(t),
            _ => return false,
        };
        if let Some(u) = world.unit_mut(unit) {
            u.location = landing;
            trace!("{unit} disembarked at {landing}");
            true
        } else {
            false
        }
    }
}
