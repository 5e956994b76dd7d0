//! The agent arena and the claim/release choke points.
//!
//! All cross-agent relations (mission binding, transport claims) are held
//! as plain identifiers and mutated only through methods here, so the
//! bidirectional claim invariant — an agent's carrier reference matches the
//! carrier manifest's membership — can be enforced in exactly two places.
//!
//! # Why a `BTreeMap`
//!
//! Iteration order is part of the simulation: the per-turn driver visits
//! agents in ascending unit ID so replays from a fixed seed are
//! bit-identical.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use windward_core::UnitId;
use windward_world::{ActionServer, Direction, Location, Role, World};

use crate::agent::AiUnit;
use crate::mission::Mission;

/// Arena of all live [`AiUnit`]s, keyed by their bound unit.
#[derive(Default)]
pub struct AiUnitStore {
    agents: BTreeMap<UnitId, AiUnit>,
}

impl AiUnitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an agent for `unit`.  Returns `false` (and leaves the
    /// existing agent untouched) if one is already registered.
    pub fn add(&mut self, unit: UnitId) -> bool {
        if self.agents.contains_key(&unit) {
            return false;
        }
        self.agents.insert(unit, AiUnit::new(unit));
        true
    }

    pub fn get(&self, unit: UnitId) -> Option<&AiUnit> {
        self.agents.get(&unit)
    }

    pub(crate) fn get_mut(&mut self, unit: UnitId) -> Option<&mut AiUnit> {
        self.agents.get_mut(&unit)
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.agents.contains_key(&unit)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// All registered unit IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.agents.keys().copied()
    }

    /// Remove the agent outright.  Callers wanting orderly teardown go
    /// through `AiMain::dispose_agent` instead.
    pub(crate) fn remove(&mut self, unit: UnitId) -> Option<AiUnit> {
        self.agents.remove(&unit)
    }

    // ── Mission binding ───────────────────────────────────────────────────

    /// Bind `mission` to `unit`'s agent.
    ///
    /// No-op when the new mission equals the current one.  A different
    /// current mission is first aborted with reason `"replaced"`; either
    /// way the dynamic priority restarts at 0.  Unbinding is not expressible
    /// here: that is [`abort_mission`]'s job, so every unbind has a reason.
    ///
    /// [`abort_mission`]: AiUnitStore::abort_mission
    pub fn bind_mission(&mut self, unit: UnitId, mission: Mission) {
        let Some(agent) = self.agents.get(&unit) else {
            warn!("bind_mission for unknown agent {unit}");
            return;
        };
        match &agent.mission {
            Some(current) if *current == mission => return,
            Some(current) => {
                if !current.is_one_time() {
                    info!("{unit} replacing mission {} with {}", current.tag(), mission.tag());
                }
                self.abort_mission(unit, "replaced");
            }
            None => debug!("{unit} assigned mission {}", mission.tag()),
        }
        if let Some(agent) = self.agents.get_mut(&unit) {
            agent.mission = Some(mission);
            agent.dynamic_priority = 0;
        }
    }

    /// Abort `unit`'s mission with a diagnostic `reason`.  Idempotent: with
    /// no mission bound this does nothing at all.
    ///
    /// Releases the agent's own transport claim, and if the dying mission
    /// managed a cargo manifest, releases every claimant scheduled on it.
    pub fn abort_mission(&mut self, unit: UnitId, reason: &str) {
        let Some(agent) = self.agents.get_mut(&unit) else {
            return;
        };
        if agent.mission.is_none() {
            return;
        }
        self.release_transport(unit, reason);
        let Some(mission) = self.agents.get_mut(&unit).and_then(|a| a.mission.take()) else {
            return;
        };
        if !mission.is_one_time() {
            debug!("{unit} aborted mission {}: {reason}", mission.tag());
        }
        if let Some(manifest) = mission.cargo() {
            let claimants: Vec<UnitId> = manifest
                .entries()
                .iter()
                .map(|e| e.unit)
                .chain(manifest.waiting().iter().copied())
                .collect();
            for claimant in claimants {
                if let Some(a) = self.agents.get_mut(&claimant) {
                    if a.transport == Some(unit) {
                        a.transport = None;
                        debug!("{claimant} released from disbanding carrier {unit}");
                    }
                }
            }
        }
        if let Some(agent) = self.agents.get_mut(&unit) {
            agent.dynamic_priority = 0;
        }
    }

    // ── Transport claims ──────────────────────────────────────────────────

    /// Set `unit`'s carrier reference to `carrier`.
    ///
    /// Logs only on an actual change, and releases any previous claim
    /// first.  Deliberately does not touch `carrier`'s manifest: membership
    /// there is the carrier mission's own responsibility.
    pub fn claim_transport(&mut self, unit: UnitId, carrier: UnitId, reason: &str) {
        let prior = match self.agents.get(&unit) {
            Some(a) => a.transport,
            None => {
                warn!("claim_transport for unknown agent {unit}");
                return;
            }
        };
        if prior == Some(carrier) {
            return;
        }
        if prior.is_some() {
            self.release_transport(unit, reason);
        }
        if let Some(agent) = self.agents.get_mut(&unit) {
            agent.transport = Some(carrier);
            debug!("{unit} claimed carrier {carrier}: {reason}");
        }
    }

    /// Clear `unit`'s carrier reference, removing it from the carrier's
    /// manifest when the carrier's mission manages one.  The reference is
    /// cleared even when no manifest is found, so a dangling claim can
    /// always be repaired by calling this.
    pub fn release_transport(&mut self, unit: UnitId, reason: &str) {
        let Some(carrier) = self.agents.get(&unit).and_then(|a| a.transport) else {
            return;
        };
        if let Some(manifest) = self
            .agents
            .get_mut(&carrier)
            .and_then(|c| c.mission.as_mut())
            .and_then(|m| m.cargo_mut())
        {
            manifest.remove_transportable(unit, reason);
        }
        if let Some(agent) = self.agents.get_mut(&unit) {
            agent.transport = None;
            debug!("{unit} released carrier {carrier}: {reason}");
        }
    }

    /// Refresh `unit`'s cached priority on its carrier's manifest without
    /// removing it.  Called after the agent's situation changed (it
    /// boarded, was retargeted).  No-op when unclaimed.
    pub fn retarget(&mut self, unit: UnitId) {
        let priority = self.transport_priority(unit);
        let Some(carrier) = self.agents.get(&unit).and_then(|a| a.transport) else {
            return;
        };
        if let Some(manifest) = self
            .agents
            .get_mut(&carrier)
            .and_then(|c| c.mission.as_mut())
            .and_then(|m| m.cargo_mut())
        {
            manifest.retarget_transportable(unit, priority);
        }
    }

    // ── Scheduling priority ───────────────────────────────────────────────

    /// Accrue one point of dynamic priority.  No-op without a mission, so
    /// an idle agent can never outrank one that actually wants to travel.
    pub fn bump_priority(&mut self, unit: UnitId) {
        if let Some(agent) = self.agents.get_mut(&unit) {
            if agent.mission.is_some() {
                agent.dynamic_priority += 1;
            }
        }
    }

    /// Live transport priority of `unit`, 0 for unknown or mission-less
    /// agents.
    pub fn transport_priority(&self, unit: UnitId) -> u32 {
        self.agents
            .get(&unit)
            .map(|a| a.transport_priority())
            .unwrap_or(0)
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Request one step in `dir`.  True only when the unit actually changed
    /// tile, not merely when the server accepted the request.
    pub fn move_direction(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        unit: UnitId,
        dir: Direction,
    ) -> bool {
        let start = world.unit_tile(unit);
        server.move_unit(world, unit, dir) && world.unit_tile(unit) != start
    }

    /// One step along a precomputed path.  When the step takes a carried
    /// unit ashore it disembarks through [`leave_transport`], so the
    /// transport claim is released as part of the move; every other step is
    /// a plain directed move.
    ///
    /// [`leave_transport`]: AiUnitStore::leave_transport
    pub fn step_path(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        unit: UnitId,
        dir: Direction,
    ) -> bool {
        let aboard = world
            .unit(unit)
            .is_some_and(|u| u.location.carrier().is_some());
        let ashore = world
            .unit_tile(unit)
            .and_then(|t| world.map.neighbor(t, dir))
            .is_some_and(|t| world.map.is_land(t));
        if aboard && ashore {
            self.leave_transport(world, server, unit, Some(dir))
        } else {
            self.move_direction(world, server, unit, dir)
        }
    }

    /// Sail for the new world: the high-seas transition onto the map's
    /// entry tile.
    pub fn move_to_americas(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        unit: UnitId,
    ) -> bool {
        let Some(entry) = world.map.entry_tile() else {
            return false;
        };
        server.move_to(world, unit, Location::Tile(entry))
    }

    /// Sail for Europe from open water.
    pub fn move_to_europe(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        unit: UnitId,
    ) -> bool {
        server.move_to(world, unit, Location::Europe)
    }

    // ── Boarding and landing ──────────────────────────────────────────────

    /// Step `unit` off its carrier: ashore in `dir` when given, onto the
    /// dock tile (or into Europe) otherwise.
    ///
    /// On success notifies a colony on the landing tile that its work
    /// assignments may need rearranging, and releases the transport claim.
    pub fn leave_transport(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        unit: UnitId,
        dir: Option<Direction>,
    ) -> bool {
        let ok = match dir {
            Some(d) => server.move_unit(world, unit, d),
            None => server.disembark(world, unit),
        };
        if !ok {
            return false;
        }
        notify_colony_at(world, unit);
        self.release_transport(unit, "disembarked");
        true
    }

    // ── Equipment ─────────────────────────────────────────────────────────

    /// Re-equip `unit` toward `role`, item by item, best-effort.
    ///
    /// Per required item: skip it when the unit is ineligible for that item;
    /// skip it when purchase is blocked by a boycott (an embargoed item is
    /// never substituted or minted for); when merely unaffordable, mint the
    /// funds if `may_mint`, else skip.  Returns whether the unit ended up in
    /// exactly the requested role, which can be `false` even after partial
    /// success.
    pub fn equip_for_role(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        unit: UnitId,
        role: Role,
        may_mint: bool,
    ) -> bool {
        for &kind in role.equipment() {
            let Some(u) = world.unit(unit) else {
                return false;
            };
            if u.equipment.contains(&kind) {
                continue;
            }
            if !u.can_equip_with(kind) {
                debug!("{unit} ineligible for {kind:?}, skipping");
                continue;
            }
            if u.location.is_europe() {
                let owner = u.owner;
                let Some(market) = world.market(owner) else {
                    continue;
                };
                let embargoed = kind
                    .required_goods()
                    .iter()
                    .any(|&(g, _)| market.arrears(g) > 0);
                if embargoed {
                    debug!("{unit} purchase of {kind:?} blocked by boycott, skipping");
                    continue;
                }
                let cost: u32 = kind
                    .required_goods()
                    .iter()
                    .map(|&(g, amount)| market.bid_price(g, amount))
                    .sum();
                if !market.has_gold(cost) {
                    if !may_mint {
                        debug!("{unit} cannot afford {kind:?}, skipping");
                        continue;
                    }
                    if let Some(market) = world.market_mut(owner) {
                        market.mint(cost, "equip-for-role");
                    }
                }
            }
            server.equip(world, unit, kind);
        }
        world.unit(unit).map(|u| u.role()) == Some(role)
    }
}

/// Fire a rearrange notification at the colony on `unit`'s tile, if any.
fn notify_colony_at(world: &mut World, unit: UnitId) {
    let colony = world
        .unit(unit)
        .and_then(|u| u.location.tile())
        .and_then(|t| world.colony_at(t))
        .map(|c| c.id);
    if let Some(id) = colony {
        world.notify_rearrange(id);
    }
}
