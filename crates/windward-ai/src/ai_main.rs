//! `AiMain` — the AI layer's root object: the agent arena plus per-owner
//! contexts, and the operations that need both at once.
//!
//! Everything here is single-threaded and deterministic: agents are visited
//! in ascending unit ID, owners in ascending player ID, and all randomness
//! comes from the owners' seeded RNGs.

use std::collections::BTreeMap;

use log::{debug, warn};
use windward_core::{PlayerId, UnitId, WishId};
use windward_world::{ActionServer, Direction, World};

use crate::mission::StepOutcome;
use crate::player::AiPlayer;
use crate::store::AiUnitStore;

/// Root AI state for one game.
pub struct AiMain {
    pub agents: AiUnitStore,
    pub players: BTreeMap<PlayerId, AiPlayer>,
    global_seed: u64,
}

impl AiMain {
    pub fn new(global_seed: u64) -> Self {
        Self {
            agents: AiUnitStore::new(),
            players: BTreeMap::new(),
            global_seed,
        }
    }

    /// Register an AI player, seeding its RNG from the global seed.
    pub fn add_player(&mut self, player: PlayerId) -> &mut AiPlayer {
        let seed = self.global_seed;
        self.players
            .entry(player)
            .or_insert_with(|| AiPlayer::new(player, seed))
    }

    pub fn player(&self, player: PlayerId) -> Option<&AiPlayer> {
        self.players.get(&player)
    }

    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut AiPlayer> {
        self.players.get_mut(&player)
    }

    /// The owner context for `unit`'s agent.
    pub fn player_for(&self, world: &World, unit: UnitId) -> Option<&AiPlayer> {
        let owner = world.unit(unit)?.owner;
        self.players.get(&owner)
    }

    // ── Mission stepping ──────────────────────────────────────────────────

    /// Run one turn-step of `unit`'s mission.
    ///
    /// No-op without a bound, currently-valid mission.  An invalid mission
    /// stays bound untouched for the owning controller to replace; this
    /// call never aborts it.  A step reporting completion is funneled
    /// through the abort choke point with the mission's own reason.
    pub fn run_mission(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        unit: UnitId,
    ) {
        let valid = match self.agents.get(unit).and_then(|a| a.mission()) {
            Some(m) => m.is_valid(world, unit),
            None => return,
        };
        if !valid {
            debug!("{unit} mission invalid, awaiting reassignment");
            return;
        }
        // Detach the mission while it runs so it can mutate other agents
        // through `self` without aliasing itself.
        let Some(mut mission) = self.agents.get_mut(unit).and_then(|a| a.mission.take()) else {
            return;
        };
        let outcome = mission.step(world, server, self, unit);
        if let Some(agent) = self.agents.get_mut(unit) {
            if agent.mission.is_none() {
                agent.mission = Some(mission);
            }
        }
        if let StepOutcome::Complete(reason) = outcome {
            self.agents.abort_mission(unit, reason);
        }
    }

    // ── Boarding ──────────────────────────────────────────────────────────

    /// Put `unit` aboard `carrier`, stepping in `dir` first when given.
    ///
    /// Fails fast when the carrier has no agent.  On success, notifies a
    /// colony at the departure tile, retargets the boarded unit on the
    /// carrier's manifest, and claims the unit away from its previous
    /// tracker (a failed claim is logged, not fatal).
    pub fn join_transport(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        unit: UnitId,
        carrier: UnitId,
        dir: Option<Direction>,
    ) -> bool {
        if !self.agents.contains(carrier) {
            warn!("join_transport: carrier {carrier} has no agent");
            return false;
        }
        let old = match world.unit(unit) {
            Some(u) => u.location,
            None => return false,
        };
        if !server.embark(world, carrier, unit, dir) {
            return false;
        }
        if let Some(colony) = old.tile().and_then(|t| world.colony_at(t)).map(|c| c.id) {
            world.notify_rearrange(colony);
        }
        self.agents.retarget(unit);
        let owner = world.unit(unit).map(|u| u.owner);
        if let Some(player) = owner.and_then(|o| self.players.get_mut(&o)) {
            if !player.claim_transportable(unit, old) {
                warn!("{unit} boarded {carrier} but could not be claimed from its previous tracker");
            }
        }
        true
    }

    // ── Transport demand ──────────────────────────────────────────────────

    /// Register every unserved same-owner transportable on each carrier's
    /// waiting list.  Visits carriers and candidates in ascending unit ID.
    pub fn enqueue_transport_requests(&mut self, world: &World) {
        let carriers: Vec<UnitId> = self
            .agents
            .ids()
            .filter(|&id| {
                self.agents
                    .get(id)
                    .and_then(|a| a.mission())
                    .and_then(|m| m.cargo())
                    .is_some()
            })
            .collect();
        for carrier in carriers {
            let Some(owner) = world.unit(carrier).map(|c| c.owner) else {
                continue;
            };
            let candidates: Vec<UnitId> = self
                .agents
                .ids()
                .filter(|&id| id != carrier)
                .filter(|&id| self.wants_transport(world, id, carrier, owner))
                .collect();
            let Some(manifest) = self
                .agents
                .get_mut(carrier)
                .and_then(|a| a.mission.as_mut())
                .and_then(|m| m.cargo_mut())
            else {
                continue;
            };
            for unit in candidates {
                manifest.register_waiting(unit);
            }
        }
    }

    /// `true` if `unit` should be queued on `carrier`'s waiting list.
    fn wants_transport(
        &self,
        world: &World,
        unit: UnitId,
        carrier: UnitId,
        owner: PlayerId,
    ) -> bool {
        let Some(agent) = self.agents.get(unit) else {
            return false;
        };
        if agent.transport().is_some() {
            return false;
        }
        let Some(u) = world.unit(unit) else {
            return false;
        };
        if u.owner != owner {
            return false;
        }
        let carriable = world
            .unit(carrier)
            .map(|c| c.could_carry(u))
            .unwrap_or(false);
        carriable
            && agent
                .mission()
                .and_then(|m| m.transport_destination(world))
                .is_some()
    }

    /// Accrue one point of dynamic priority for every transportable whose
    /// request went unserved this turn.
    pub fn accrue_priorities(&mut self, world: &World) {
        let unserved: Vec<UnitId> = self
            .agents
            .ids()
            .filter(|&id| {
                let Some(agent) = self.agents.get(id) else {
                    return false;
                };
                agent.transport().is_none()
                    && agent
                        .mission()
                        .and_then(|m| m.transport_destination(world))
                        .is_some()
            })
            .collect();
        for unit in unserved {
            self.agents.bump_priority(unit);
        }
    }

    // ── Wishes ────────────────────────────────────────────────────────────

    /// Mark `player`'s wish fulfilled, ending the pledged unit's mission
    /// through the standard abort path.
    pub fn complete_wish(&mut self, player: PlayerId, wish: WishId) {
        if let Some(p) = self.players.get_mut(&player) {
            p.complete_wish(&mut self.agents, wish);
        }
    }

    // ── Disposal ──────────────────────────────────────────────────────────

    /// Tear down `unit`'s agent: release its claim, abort its mission, stop
    /// tracking it, and remove it from the arena.  Safe to call for a unit
    /// that is already gone.
    pub fn dispose_agent(&mut self, unit: UnitId) {
        self.agents.release_transport(unit, "disposing");
        self.agents.abort_mission(unit, "unit-disposed");
        for player in self.players.values_mut() {
            player.stop_tracking(unit);
        }
        self.agents.remove(unit);
    }
}
