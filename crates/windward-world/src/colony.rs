//! Colonies: settlement anchors for equipment building and work assignment.

use windward_core::{ColonyId, PlayerId, TileId};

use crate::equipment::EquipmentKind;

/// One colony.
///
/// The colony's internal economy is out of scope; the AI core only needs to
/// know what equipment it can produce and to notify it when a unit's
/// location change should trigger a worker rearrangement.
pub struct Colony {
    pub id: ColonyId,
    pub owner: PlayerId,
    pub tile: TileId,
    /// Equipment kinds this colony can build from local stores.
    pub buildable: Vec<EquipmentKind>,
}

impl Colony {
    pub fn new(id: ColonyId, owner: PlayerId, tile: TileId) -> Self {
        Self {
            id,
            owner,
            tile,
            buildable: Vec::new(),
        }
    }

    pub fn can_build(&self, kind: EquipmentKind) -> bool {
        self.buildable.contains(&kind)
    }
}
