//! Units: the things agents are bound to and carriers carry.

use windward_core::{PlayerId, UnitId};

use crate::equipment::{EquipmentKind, Role};
use crate::location::Location;

// ── UnitKind ──────────────────────────────────────────────────────────────────

/// Static per-kind attributes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UnitKind {
    FreeColonist,
    ExpertPioneer,
    Brave,
    TreasureTrain,
    WagonTrain,
    Caravel,
    Galleon,
}

impl UnitKind {
    /// Cargo slots this kind offers as a carrier.  Zero means "not a carrier".
    pub fn capacity(self) -> u32 {
        match self {
            UnitKind::Caravel => 2,
            UnitKind::Galleon => 6,
            UnitKind::WagonTrain => 2,
            _ => 0,
        }
    }

    /// Cargo slots this kind occupies when carried.
    pub fn space_taken(self) -> u32 {
        match self {
            UnitKind::TreasureTrain => 6,
            _ => 1,
        }
    }

    pub fn is_naval(self) -> bool {
        matches!(self, UnitKind::Caravel | UnitKind::Galleon)
    }

    pub fn is_native(self) -> bool {
        matches!(self, UnitKind::Brave)
    }

    /// Carriers and treasure trains never take equipment.
    pub fn can_equip(self) -> bool {
        matches!(
            self,
            UnitKind::FreeColonist | UnitKind::ExpertPioneer | UnitKind::Brave
        )
    }
}

// ── Unit ──────────────────────────────────────────────────────────────────────

/// One simulation unit.
///
/// A disposed unit keeps its arena entry (so integrity checking can observe
/// the dangling reference) but refuses all further use.
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    pub kind: UnitKind,
    pub location: Location,
    pub equipment: Vec<EquipmentKind>,
    pub disposed: bool,
}

impl Unit {
    pub fn new(id: UnitId, owner: PlayerId, kind: UnitKind, location: Location) -> Self {
        Self {
            id,
            owner,
            kind,
            location,
            equipment: Vec::new(),
            disposed: false,
        }
    }

    /// The role the current equipment set grants.
    pub fn role(&self) -> Role {
        Role::of(&self.equipment)
    }

    /// Faction and kind eligibility for one equipment item.
    pub fn can_equip_with(&self, kind: EquipmentKind) -> bool {
        self.kind.can_equip()
            && (!self.kind.is_native() || kind.available_to_natives())
            && !self.equipment.contains(&kind)
    }

    /// Whether this unit could ever carry `other` (ignores current load).
    pub fn could_carry(&self, other: &Unit) -> bool {
        self.kind.capacity() >= other.kind.space_taken()
            && !other.kind.is_naval()
            && self.id != other.id
    }
}
