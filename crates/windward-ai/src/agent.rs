//! `AiUnit` — AI state for a single simulation unit.
//!
//! Fields are private on purpose: the mission binding and the carrier
//! reference may only change through [`AiUnitStore`][crate::AiUnitStore]'s
//! choke-point operations, which keep both ends of the transport-claim
//! relation consistent and make every mission change attributable.

use windward_core::{GoalId, UnitId};

use crate::mission::Mission;

/// AI wrapper bound 1:1 to one simulation unit.
pub struct AiUnit {
    /// The bound unit.  Immutable once created; the arena is keyed by it.
    unit: UnitId,
    /// The mission this agent has been assigned, if any.
    pub(crate) mission: Option<Mission>,
    /// Optional higher-level goal grouping (non-owning).
    pub goal: Option<GoalId>,
    /// The dynamic part of the transport priority.  Meaningful only while a
    /// mission is bound; forced to 0 whenever the mission changes.
    pub(crate) dynamic_priority: u32,
    /// The carrier this agent has claimed, if any (non-owning).
    pub(crate) transport: Option<UnitId>,
}

impl AiUnit {
    pub(crate) fn new(unit: UnitId) -> Self {
        Self {
            unit,
            mission: None,
            goal: None,
            dynamic_priority: 0,
            transport: None,
        }
    }

    /// The bound unit's identifier.
    #[inline]
    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    pub fn has_mission(&self) -> bool {
        self.mission.is_some()
    }

    /// The carrier this agent is scheduled on, or `None` if unscheduled.
    #[inline]
    pub fn transport(&self) -> Option<UnitId> {
        self.transport
    }

    #[inline]
    pub fn dynamic_priority(&self) -> u32 {
        self.dynamic_priority
    }

    /// Mission base priority plus the accrued dynamic priority.
    /// Zero while no mission is bound.
    pub fn transport_priority(&self) -> u32 {
        match &self.mission {
            Some(m) => m.base_transport_priority() + self.dynamic_priority,
            None => 0,
        }
    }
}
