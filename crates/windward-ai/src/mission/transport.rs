//! The carrier-side half of the transport-claim relation.
//!
//! A [`CargoManifest`] lives inside a [`Mission::Transport`] and records,
//! per carrier, who has claimed a cargo slot.  The agent-side half is the
//! claimant's carrier reference; both halves only change together through
//! the store's claim/release choke points, except inside [`CargoManifest::step`]
//! where the carrier's own mission is detached and the manifest edits its
//! own lists directly after routing the agent side through the store.
//!
//! # Admission
//!
//! Interested claimants wait in `waiting` in first-registered order.  Each
//! turn the manifest admits from `waiting` in descending live transport
//! priority, ties broken by registration order, for as long as the carrier
//! has unreserved capacity.
//!
//! [`Mission::Transport`]: crate::Mission::Transport

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use windward_core::UnitId;
use windward_world::{ActionServer, Location, World};

use crate::ai_main::AiMain;
use crate::mission::StepOutcome;

// ── ManifestEntry ─────────────────────────────────────────────────────────────

/// One admitted claimant.  `priority` is the snapshot taken at admission
/// (or the last retarget), not a live value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub unit: UnitId,
    pub priority: u32,
}

// ── CargoManifest ─────────────────────────────────────────────────────────────

/// Per-carrier transport schedule: admitted claimants plus the waiting list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CargoManifest {
    entries: Vec<ManifestEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    waiting: Vec<UnitId>,
}

impl CargoManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn waiting(&self) -> &[UnitId] {
        &self.waiting
    }

    /// `true` if `unit` holds an admitted slot.
    pub fn contains(&self, unit: UnitId) -> bool {
        self.entries.iter().any(|e| e.unit == unit)
    }

    /// Register interest.  Idempotent; first registration fixes the
    /// tie-break order among equal priorities.
    pub fn register_waiting(&mut self, unit: UnitId) {
        if !self.contains(unit) && !self.waiting.contains(&unit) {
            self.waiting.push(unit);
        }
    }

    /// Install an admitted entry directly.  Used by the store's claim choke
    /// point; admission from the waiting list goes through [`step`].
    ///
    /// [`step`]: CargoManifest::step
    pub(crate) fn queue_transportable(&mut self, unit: UnitId, priority: u32) {
        self.waiting.retain(|&w| w != unit);
        if !self.contains(unit) {
            self.entries.push(ManifestEntry { unit, priority });
        }
    }

    /// Drop `unit` from both lists.  Manifest-local: the agent-side carrier
    /// reference is the caller's problem.
    pub(crate) fn remove_transportable(&mut self, unit: UnitId, reason: &str) -> bool {
        let had = self.contains(unit) || self.waiting.contains(&unit);
        self.entries.retain(|e| e.unit != unit);
        self.waiting.retain(|&w| w != unit);
        if had {
            debug!("manifest dropped {unit}: {reason}");
        }
        had
    }

    /// Refresh the cached priority snapshot for `unit` without touching its
    /// slot.  Called when the claimant's mission or destination changed.
    pub(crate) fn retarget_transportable(&mut self, unit: UnitId, priority: u32) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.unit == unit) {
            e.priority = priority;
        }
    }

    // ── Per-turn work ─────────────────────────────────────────────────────

    /// One turn of carrier duty: prune stale slots, admit from the waiting
    /// list, load/unload co-located claimants, and move toward the first
    /// admitted claimant's pickup or destination.
    pub(crate) fn step(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        main: &mut AiMain,
        carrier: UnitId,
    ) -> StepOutcome {
        self.prune(world, main, carrier);
        self.admit(world, main, carrier);
        self.service(world, server, main, carrier);
        self.navigate(world, server, main, carrier);
        StepOutcome::Continue
    }

    /// Drop entries whose claimant no longer exists, no longer claims this
    /// carrier, or no longer wants to go anywhere.  These are self-healed
    /// leftovers, hence the warnings.
    fn prune(&mut self, world: &World, main: &mut AiMain, carrier: UnitId) {
        let stale: Vec<UnitId> = self
            .entries
            .iter()
            .map(|e| e.unit)
            .filter(|&u| !Self::claim_live(world, main, carrier, u))
            .collect();
        for unit in stale {
            warn!("{carrier} manifest held stale entry for {unit}, dropping");
            // The carrier's mission is detached right now, so this only
            // clears the agent-side reference.
            main.agents.release_transport(unit, "stale-entry");
            self.remove_transportable(unit, "stale-entry");
        }
        self.waiting.retain(|&u| {
            main.agents
                .get(u)
                .and_then(|a| a.mission())
                .and_then(|m| m.transport_destination(world))
                .is_some()
                && world.unit(u).is_some()
        });
    }

    fn claim_live(world: &World, main: &AiMain, carrier: UnitId, unit: UnitId) -> bool {
        let Some(agent) = main.agents.get(unit) else {
            return false;
        };
        agent.transport() == Some(carrier)
            && world.unit(unit).is_some()
            && agent
                .mission()
                .and_then(|m| m.transport_destination(world))
                .is_some()
    }

    /// Admit waiting claimants in descending live priority (registration
    /// order among ties) while unreserved capacity remains.
    fn admit(&mut self, world: &World, main: &mut AiMain, carrier: UnitId) {
        let capacity = match world.unit(carrier) {
            Some(c) => c.kind.capacity(),
            None => return,
        };
        let mut reserved: u32 = self
            .entries
            .iter()
            .filter_map(|e| world.unit(e.unit))
            .map(|u| u.kind.space_taken())
            .sum();

        let mut ranked: Vec<UnitId> = self.waiting.clone();
        ranked.sort_by_key(|&u| std::cmp::Reverse(main.agents.transport_priority(u)));

        for unit in ranked {
            let Some(space) = world.unit(unit).map(|u| u.kind.space_taken()) else {
                continue;
            };
            if reserved + space > capacity {
                continue;
            }
            reserved += space;
            // The claim call only sets the agent-side reference; manifest
            // membership is this mission's own responsibility.
            main.agents.claim_transport(unit, carrier, "admitted-for-transport");
            let priority = main.agents.transport_priority(unit);
            self.queue_transportable(unit, priority);
        }
    }

    /// Load claimants standing next to the carrier; unload the ones whose
    /// destination the carrier has reached.
    fn service(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        main: &mut AiMain,
        carrier: UnitId,
    ) {
        let admitted: Vec<UnitId> = self.entries.iter().map(|e| e.unit).collect();
        for unit in admitted {
            let Some(dest) = main
                .agents
                .get(unit)
                .and_then(|a| a.mission())
                .and_then(|m| m.transport_destination(world))
            else {
                continue;
            };
            let aboard =
                world.unit(unit).map(|u| u.location) == Some(Location::OnCarrier(carrier));
            if aboard {
                if self.try_deliver(world, server, main, carrier, unit, dest) {
                    self.remove_transportable(unit, "delivered");
                }
            } else {
                self.try_collect(world, server, main, carrier, unit);
            }
        }
    }

    /// Unload `unit` if the carrier has reached (or stands beside) `dest`.
    fn try_deliver(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        main: &mut AiMain,
        carrier: UnitId,
        unit: UnitId,
        dest: Location,
    ) -> bool {
        let carrier_loc = match world.unit(carrier) {
            Some(c) => c.location,
            None => return false,
        };
        match dest {
            Location::Europe => {
                carrier_loc == Location::Europe
                    && main.agents.leave_transport(world, server, unit, None)
            }
            Location::Tile(target) => {
                let Location::Tile(at) = carrier_loc else {
                    return false;
                };
                if at == target {
                    main.agents.leave_transport(world, server, unit, None)
                } else if let Some(dir) = world.map.direction_to(at, target) {
                    world.map.is_land(target)
                        && main.agents.leave_transport(world, server, unit, Some(dir))
                } else {
                    false
                }
            }
            Location::OnCarrier(_) => false,
        }
    }

    /// Embark `unit` if it stands on or beside the carrier's tile (or both
    /// are in Europe).
    fn try_collect(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        main: &mut AiMain,
        carrier: UnitId,
        unit: UnitId,
    ) {
        let (Some(u), Some(c)) = (world.unit(unit), world.unit(carrier)) else {
            return;
        };
        let dir = match (u.location, c.location) {
            (Location::Europe, Location::Europe) => None,
            (Location::Tile(a), Location::Tile(b)) if a == b => None,
            (Location::Tile(a), Location::Tile(b)) => match world.map.direction_to(a, b) {
                Some(d) => Some(d),
                None => return,
            },
            _ => return,
        };
        main.join_transport(world, server, unit, carrier, dir);
    }

    /// Move one step toward the first admitted claimant's pickup point, or
    /// its destination once that claimant is aboard.  Best-effort; a blocked
    /// step waits for next turn.
    fn navigate(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        main: &AiMain,
        carrier: UnitId,
    ) {
        let Some(head) = self.entries.first().map(|e| e.unit) else {
            return;
        };
        let aboard =
            world.unit(head).map(|u| u.location) == Some(Location::OnCarrier(carrier));
        let goal = if aboard {
            main.agents
                .get(head)
                .and_then(|a| a.mission())
                .and_then(|m| m.transport_destination(world))
        } else {
            world.unit(head).map(|u| u.location)
        };
        let carrier_loc = match world.unit(carrier) {
            Some(c) => c.location,
            None => return,
        };
        match (carrier_loc, goal) {
            (Location::Tile(_), Some(Location::Europe)) => {
                server.move_to(world, carrier, Location::Europe);
            }
            (Location::Tile(at), Some(Location::Tile(target))) => {
                if let Some(dir) = world.map.direction_toward(at, target) {
                    server.move_unit(world, carrier, dir);
                }
            }
            // Returning from the high seas: make landfall on the nearest
            // water tile next to the target.
            (Location::Europe, Some(Location::Tile(target))) => {
                let landfall = std::iter::once(target)
                    .chain(world.map.neighbors(target))
                    .find(|&t| world.map.is_water(t));
                if let Some(t) = landfall {
                    server.move_to(world, carrier, Location::Tile(t));
                }
            }
            _ => {}
        }
    }
}
