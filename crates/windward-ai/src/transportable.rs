//! The `Transportable` capability contract.
//!
//! Anything that can be queued on a carrier's manifest exposes this
//! surface.  [`AiUnit`] is the one implementor today; cargo lots would be
//! the next.

use windward_core::UnitId;
use windward_world::{Location, World};

use crate::agent::AiUnit;

/// Capability contract for objects a carrier can schedule.
pub trait Transportable {
    /// Cargo space the payload occupies aboard a carrier.
    fn space_taken(&self, world: &World) -> u32;

    /// Where the payload currently is.  `None` once the payload is gone
    /// from the world.
    fn transport_source(&self, world: &World) -> Option<Location>;

    /// Where the payload wants to go.  Delegates to the bound mission;
    /// `None` when there is no mission or the mission is stationary.
    fn transport_destination(&self, world: &World) -> Option<Location>;

    /// Mission base priority plus accrued dynamic priority.
    fn transport_priority(&self) -> u32;

    /// Accrue one point of dynamic priority for an unserved turn.
    fn increase_transport_priority(&mut self);

    /// The unit that actually gets carried.
    fn payload(&self) -> UnitId;

    /// The currently claimed carrier, if any.
    fn carrier(&self) -> Option<UnitId>;

    /// `true` if `carrier` could physically take the payload aboard,
    /// ignoring its current load.
    fn carriable_by(&self, world: &World, carrier: UnitId) -> bool;
}

impl Transportable for AiUnit {
    fn space_taken(&self, world: &World) -> u32 {
        world
            .unit(self.unit())
            .map(|u| u.kind.space_taken())
            .unwrap_or(0)
    }

    fn transport_source(&self, world: &World) -> Option<Location> {
        world.unit(self.unit()).map(|u| u.location)
    }

    fn transport_destination(&self, world: &World) -> Option<Location> {
        if world.unit(self.unit()).is_none() {
            return None;
        }
        self.mission()?.transport_destination(world)
    }

    fn transport_priority(&self) -> u32 {
        AiUnit::transport_priority(self)
    }

    fn increase_transport_priority(&mut self) {
        if self.has_mission() {
            self.dynamic_priority += 1;
        }
    }

    fn payload(&self) -> UnitId {
        self.unit()
    }

    fn carrier(&self) -> Option<UnitId> {
        self.transport()
    }

    fn carriable_by(&self, world: &World, carrier: UnitId) -> bool {
        match (world.unit(carrier), world.unit(self.unit())) {
            (Some(c), Some(u)) => c.could_carry(u),
            _ => false,
        }
    }
}
