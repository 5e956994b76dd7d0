//! The `World` aggregate: map, units, colonies, markets.
//!
//! Every collection that feeds deterministic simulation order is a
//! `BTreeMap` so iteration order is the ID order, never hash order.

use std::collections::BTreeMap;

use log::debug;
use windward_core::{ColonyId, PlayerId, TileId, UnitId};

use crate::colony::Colony;
use crate::error::{WorldError, WorldResult};
use crate::goods::Market;
use crate::location::Location;
use crate::map::WorldMap;
use crate::unit::Unit;

pub struct World {
    pub map: WorldMap,
    units: BTreeMap<UnitId, Unit>,
    colonies: BTreeMap<ColonyId, Colony>,
    markets: BTreeMap<PlayerId, Market>,
    /// Colonies whose worker assignments should be recomputed because a unit
    /// arrived or left this turn.  Drained by the colony layer.
    rearrange_requests: Vec<ColonyId>,
}

impl World {
    pub fn new(map: WorldMap) -> Self {
        Self {
            map,
            units: BTreeMap::new(),
            colonies: BTreeMap::new(),
            markets: BTreeMap::new(),
            rearrange_requests: Vec::new(),
        }
    }

    // ── Units ─────────────────────────────────────────────────────────────

    pub fn add_unit(&mut self, unit: Unit) -> UnitId {
        let id = unit.id;
        self.units.insert(id, unit);
        id
    }

    /// The unit, unless unknown or disposed.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id).filter(|u| !u.disposed)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id).filter(|u| !u.disposed)
    }

    /// Like [`unit`][World::unit], but reports why the lookup failed.
    pub fn unit_checked(&self, id: UnitId) -> WorldResult<&Unit> {
        match self.units.get(&id) {
            Some(u) if !u.disposed => Ok(u),
            Some(_) => Err(WorldError::UnitDisposed(id)),
            None => Err(WorldError::UnitNotFound(id)),
        }
    }

    /// `true` if the unit exists and has been disposed (dangling-reference
    /// probe for integrity checking).
    pub fn unit_is_disposed(&self, id: UnitId) -> bool {
        self.units.get(&id).map(|u| u.disposed).unwrap_or(false)
    }

    /// Mark a unit disposed.  The entry stays so stale references are
    /// observable rather than silently recycled.
    pub fn dispose_unit(&mut self, id: UnitId) {
        if let Some(unit) = self.units.get_mut(&id) {
            unit.disposed = true;
        }
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units
            .iter()
            .filter(|(_, u)| !u.disposed)
            .map(|(&id, _)| id)
    }

    /// The tile a unit is effectively on, looking through one level of
    /// carrier indirection.
    pub fn unit_tile(&self, id: UnitId) -> Option<TileId> {
        match self.unit(id)?.location {
            Location::Tile(t) => Some(t),
            Location::Europe => None,
            Location::OnCarrier(c) => self.unit(c)?.location.tile(),
        }
    }

    /// Units currently aboard `carrier`, in ID order.
    pub fn units_aboard(&self, carrier: UnitId) -> Vec<UnitId> {
        self.units
            .values()
            .filter(|u| !u.disposed && u.location == Location::OnCarrier(carrier))
            .map(|u| u.id)
            .collect()
    }

    /// Free cargo slots on `carrier` right now.
    pub fn space_available(&self, carrier: UnitId) -> u32 {
        let Some(unit) = self.unit(carrier) else {
            return 0;
        };
        let used: u32 = self
            .units_aboard(carrier)
            .iter()
            .filter_map(|&id| self.unit(id))
            .map(|u| u.kind.space_taken())
            .sum();
        unit.kind.capacity().saturating_sub(used)
    }

    // ── Colonies ──────────────────────────────────────────────────────────

    pub fn add_colony(&mut self, colony: Colony) -> ColonyId {
        let id = colony.id;
        if let Some(tile) = self.map.tile_mut(colony.tile) {
            tile.colony = Some(id);
        }
        self.colonies.insert(id, colony);
        id
    }

    pub fn colony(&self, id: ColonyId) -> Option<&Colony> {
        self.colonies.get(&id)
    }

    pub fn colony_at(&self, tile: TileId) -> Option<&Colony> {
        let id = self.map.tile(tile)?.colony?;
        self.colony(id)
    }

    /// Ask `colony` to rearrange workers after a unit arrived or left.
    pub fn notify_rearrange(&mut self, colony: ColonyId) {
        debug!("colony {colony}: rearrange workers requested");
        self.rearrange_requests.push(colony);
    }

    /// Drain pending rearrangement requests (the colony layer's job).
    pub fn drain_rearrange_requests(&mut self) -> Vec<ColonyId> {
        std::mem::take(&mut self.rearrange_requests)
    }

    // ── Markets ───────────────────────────────────────────────────────────

    pub fn add_market(&mut self, market: Market) {
        self.markets.insert(market.owner, market);
    }

    pub fn market(&self, player: PlayerId) -> Option<&Market> {
        self.markets.get(&player)
    }

    pub fn market_mut(&mut self, player: PlayerId) -> Option<&mut Market> {
        self.markets.get_mut(&player)
    }
}
