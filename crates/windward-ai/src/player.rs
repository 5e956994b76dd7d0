//! Per-owner AI context: deterministic randomness, transportable tracking,
//! and wishes.
//!
//! Wish fulfillment is the one place the owning controller ends a mission
//! itself, and it goes through the store's abort choke point like every
//! other termination so the agent's priority and claim state are reset.

use std::collections::BTreeMap;

use log::debug;
use rustc_hash::FxHashMap;
use windward_core::{OwnerRng, PlayerId, TileId, UnitId, WishId};
use windward_world::Location;

use crate::mission::Mission;
use crate::store::AiUnitStore;

// ── Wish ──────────────────────────────────────────────────────────────────────

/// A standing request by the owner for a unit at a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wish {
    pub id: WishId,
    pub destination: TileId,
    /// The unit pledged to fulfil this wish, once one is.
    pub transportable: Option<UnitId>,
}

// ── AiPlayer ──────────────────────────────────────────────────────────────────

/// The strategic-controller context for one AI player.
pub struct AiPlayer {
    player: PlayerId,
    /// Source of all randomness on this owner's behalf.
    pub rng: OwnerRng,
    /// Last known location of each transportable this owner tracks.
    tracked: FxHashMap<UnitId, Location>,
    wishes: BTreeMap<WishId, Wish>,
}

impl AiPlayer {
    pub fn new(player: PlayerId, global_seed: u64) -> Self {
        Self {
            player,
            rng: OwnerRng::new(global_seed, player),
            tracked: FxHashMap::default(),
            wishes: BTreeMap::new(),
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    // ── Transportable tracking ────────────────────────────────────────────

    /// Start (or refresh) tracking `unit` at `location`.
    pub fn track_transportable(&mut self, unit: UnitId, location: Location) {
        self.tracked.insert(unit, location);
    }

    pub fn stop_tracking(&mut self, unit: UnitId) {
        self.tracked.remove(&unit);
    }

    pub fn tracked_location(&self, unit: UnitId) -> Option<Location> {
        self.tracked.get(&unit).copied()
    }

    /// Claim `unit` away from whatever previously tracked it at `old`.
    /// Fails (non-fatally) when the tracked location no longer matches,
    /// meaning some other actor moved it first.
    pub fn claim_transportable(&mut self, unit: UnitId, old: Location) -> bool {
        match self.tracked.get(&unit) {
            Some(&loc) if loc == old => {
                self.tracked.remove(&unit);
                true
            }
            _ => false,
        }
    }

    // ── Wishes ────────────────────────────────────────────────────────────

    pub fn add_wish(&mut self, wish: Wish) {
        self.wishes.insert(wish.id, wish);
    }

    pub fn wish(&self, id: WishId) -> Option<&Wish> {
        self.wishes.get(&id)
    }

    pub fn wishes(&self) -> impl Iterator<Item = &Wish> {
        self.wishes.values()
    }

    /// Mark `id` fulfilled: drop the wish and, when the pledged unit is
    /// still bound to the realization mission for this very wish, end that
    /// mission through the standard abort path.  A unit the owner has since
    /// reassigned keeps its new mission untouched.
    pub fn complete_wish(&mut self, agents: &mut AiUnitStore, id: WishId) {
        let Some(wish) = self.wishes.remove(&id) else {
            return;
        };
        debug!("player {} wish {id} completed", self.player);
        let Some(unit) = wish.transportable else {
            return;
        };
        let still_pledged = agents.get(unit).is_some_and(|a| {
            matches!(a.mission(), Some(Mission::WishRealization { wish: w, .. }) if *w == id)
        });
        if still_pledged {
            agents.abort_mission(unit, "wish-completed");
        }
    }
}
