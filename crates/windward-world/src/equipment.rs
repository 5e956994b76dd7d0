//! Equipment kinds and the roles they add up to.
//!
//! A role is not stored; it is derived from the exact equipment a unit
//! holds.  Equipping is item-by-item and may stop partway (boycott, gold),
//! so a unit asked to become a dragoon can legitimately end up a scout.

use crate::goods::GoodsKind;

// ── EquipmentKind ─────────────────────────────────────────────────────────────

/// One equippable item set.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum EquipmentKind {
    Horses,
    Muskets,
    Tools,
}

impl EquipmentKind {
    /// Goods consumed to produce one of this equipment.
    pub fn required_goods(self) -> &'static [(GoodsKind, u32)] {
        match self {
            EquipmentKind::Horses => &[(GoodsKind::Horses, 50)],
            EquipmentKind::Muskets => &[(GoodsKind::Muskets, 50)],
            EquipmentKind::Tools => &[(GoodsKind::Tools, 20)],
        }
    }

    /// Faction restriction: tools are a colonial technology.
    pub fn available_to_natives(self) -> bool {
        !matches!(self, EquipmentKind::Tools)
    }
}

// ── Role ──────────────────────────────────────────────────────────────────────

/// The effective role a unit's equipment set grants.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Role {
    Plain,
    Scout,
    Soldier,
    Dragoon,
    Pioneer,
}

impl Role {
    /// Equipment required for this role, in acquisition order.
    ///
    /// Order matters: `equip_for_role` tries each item in turn and skips
    /// blocked ones, so the order here decides what a partial outcome looks
    /// like.
    pub fn equipment(self) -> &'static [EquipmentKind] {
        match self {
            Role::Plain => &[],
            Role::Scout => &[EquipmentKind::Horses],
            Role::Soldier => &[EquipmentKind::Muskets],
            Role::Dragoon => &[EquipmentKind::Muskets, EquipmentKind::Horses],
            Role::Pioneer => &[EquipmentKind::Tools],
        }
    }

    /// Derive the role granted by an equipment set.
    pub fn of(equipment: &[EquipmentKind]) -> Role {
        let has = |k| equipment.contains(&k);
        match (has(EquipmentKind::Muskets), has(EquipmentKind::Horses)) {
            (true, true) => Role::Dragoon,
            (true, false) => Role::Soldier,
            (false, true) => Role::Scout,
            (false, false) if has(EquipmentKind::Tools) => Role::Pioneer,
            _ => Role::Plain,
        }
    }
}
