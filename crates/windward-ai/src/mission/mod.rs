//! The `Mission` enum — polymorphic per-agent behavior.
//!
//! # Lifecycle
//!
//! A mission is bound to exactly one agent at construction and never moves.
//! It is *Active* until a world-state change makes [`invalid_reason`]
//! return `Some` (*Invalid* — still bound, never auto-disposed), and it is
//! disposed only through `abort_mission`/`bind_mission` on the store, never
//! by nulling the binding directly.  Funnelling every termination through
//! one operation means every mission change carries a reason, so runaway
//! reassignment ("mission thrashing") is diagnosable from the logs.
//!
//! # Decision logic
//!
//! What a mission *decides* is out of scope here; `step` implementations are
//! deliberately thin (request one move toward the target, or nothing).  The
//! one exception is [`Mission::Transport`], which carries the carrier-side
//! [`CargoManifest`] and does real per-turn work.
//!
//! [`invalid_reason`]: Mission::invalid_reason

pub mod transport;

use serde::{Deserialize, Serialize};
use windward_core::{ColonyId, TileId, UnitId, WishId};
use windward_world::{ActionServer, Location, World};

use crate::ai_main::AiMain;
use crate::registry;
use transport::CargoManifest;

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// What one turn-step of a mission concluded.
///
/// A mission never aborts itself from inside `step`; it reports `Complete`
/// and the caller funnels that through the abort choke point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Keep the mission bound; try again next turn.
    Continue,
    /// The mission is finished (or pointless); abort it with this reason.
    Complete(&'static str),
}

// ── Mission ───────────────────────────────────────────────────────────────────

/// The closed set of mission kinds.
///
/// Serialized with an internal `kind` discriminator whose values are the
/// canonical tags in [`registry`]; reconstruction goes through
/// [`registry::decode`] so legacy aliases resolve and unknown tags fail
/// hard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Mission {
    /// Found a colony on the target tile.
    #[serde(rename = "buildColonyMission")]
    BuildColony { target: TileId },

    /// Haul a treasure train to Europe for cash-in.
    #[serde(rename = "cashInTreasureMission")]
    CashInTreasure,

    /// Garrison the given colony.
    #[serde(rename = "defendSettlementMission")]
    DefendSettlement { colony: ColonyId },

    /// Sit out the turn at a settlement.  One-time: not persisted and not
    /// worth logging when replaced.
    #[serde(rename = "idleAtSettlementMission")]
    IdleAtSettlement,

    /// Carry a goodwill gift to the target foreign colony.
    #[serde(rename = "indianBringGiftMission")]
    IndianBringGift { colony: ColonyId },

    /// Press a tribute demand at the target foreign colony.
    #[serde(rename = "indianDemandMission")]
    IndianDemand { colony: ColonyId },

    /// Establish a religious presence at the target settlement.
    #[serde(rename = "missionaryMission")]
    Missionary { settlement: ColonyId },

    /// Improve the target tile.
    #[serde(rename = "pioneeringMission")]
    Pioneering { target: TileId },

    /// Cruise for hostile shipping.
    #[serde(rename = "privateerMission")]
    Privateer,

    /// Reconnoiter the target tile.
    #[serde(rename = "scoutingMission")]
    Scouting { target: TileId },

    /// Hunt down the target unit.
    #[serde(rename = "seekAndDestroyMission")]
    SeekAndDestroy { target: UnitId },

    /// Run this carrier's cargo manifest.
    #[serde(rename = "transportMission")]
    Transport(CargoManifest),

    /// Drift randomly, attacking whatever it runs into.  One-time.
    #[serde(rename = "unitWanderHostileMission")]
    UnitWanderHostile,

    /// Drift randomly.  One-time.
    #[serde(rename = "wanderMission")]
    Wander,

    /// Deliver the bound unit to the tile a wish asked for.
    #[serde(rename = "wishRealizationMission")]
    WishRealization { wish: WishId, target: TileId },

    /// Join the workforce of the given colony.
    #[serde(rename = "workInsideColonyMission")]
    WorkInsideColony { colony: ColonyId },
}

impl Mission {
    /// The canonical discriminator tag this mission persists under.
    pub fn tag(&self) -> &'static str {
        match self {
            Mission::BuildColony { .. } => registry::BUILD_COLONY,
            Mission::CashInTreasure => registry::CASH_IN_TREASURE,
            Mission::DefendSettlement { .. } => registry::DEFEND_SETTLEMENT,
            Mission::IdleAtSettlement => registry::IDLE_AT_SETTLEMENT,
            Mission::IndianBringGift { .. } => registry::INDIAN_BRING_GIFT,
            Mission::IndianDemand { .. } => registry::INDIAN_DEMAND,
            Mission::Missionary { .. } => registry::MISSIONARY,
            Mission::Pioneering { .. } => registry::PIONEERING,
            Mission::Privateer => registry::PRIVATEER,
            Mission::Scouting { .. } => registry::SCOUTING,
            Mission::SeekAndDestroy { .. } => registry::SEEK_AND_DESTROY,
            Mission::Transport(_) => registry::TRANSPORT,
            Mission::UnitWanderHostile => registry::UNIT_WANDER_HOSTILE,
            Mission::Wander => registry::WANDER,
            Mission::WishRealization { .. } => registry::WISH_REALIZATION,
            Mission::WorkInsideColony { .. } => registry::WORK_INSIDE_COLONY,
        }
    }

    /// One-time missions fire once and are neither persisted nor logged as
    /// thrashing when replaced.
    pub fn is_one_time(&self) -> bool {
        matches!(
            self,
            Mission::IdleAtSettlement | Mission::UnitWanderHostile | Mission::Wander
        )
    }

    /// Base transport priority, before the agent's dynamic accrual.
    pub fn base_transport_priority(&self) -> u32 {
        match self {
            Mission::CashInTreasure => 110,
            Mission::BuildColony { .. } => 100,
            Mission::DefendSettlement { .. } => 90,
            Mission::WishRealization { .. } => 80,
            Mission::WorkInsideColony { .. } => 70,
            Mission::Pioneering { .. } => 60,
            Mission::Scouting { .. } => 50,
            Mission::SeekAndDestroy { .. } => 40,
            // Self-propelled or aimless; never rides a carrier.
            Mission::IndianBringGift { .. }
            | Mission::IndianDemand { .. }
            | Mission::Missionary { .. }
            | Mission::Privateer
            | Mission::Transport(_)
            | Mission::IdleAtSettlement
            | Mission::UnitWanderHostile
            | Mission::Wander => 0,
        }
    }

    /// Where the bound agent wants to be carried, if anywhere.
    pub fn transport_destination(&self, world: &World) -> Option<Location> {
        match self {
            Mission::BuildColony { target }
            | Mission::Pioneering { target }
            | Mission::Scouting { target }
            | Mission::WishRealization { target, .. } => Some(Location::Tile(*target)),
            Mission::DefendSettlement { colony } | Mission::WorkInsideColony { colony } => {
                world.colony(*colony).map(|c| Location::Tile(c.tile))
            }
            Mission::SeekAndDestroy { target } => {
                world.unit_tile(*target).map(Location::Tile)
            }
            Mission::CashInTreasure => Some(Location::Europe),
            // Move under their own power; a carrier never schedules them.
            Mission::IndianBringGift { .. }
            | Mission::IndianDemand { .. }
            | Mission::Missionary { .. }
            | Mission::Privateer
            | Mission::Transport(_)
            | Mission::IdleAtSettlement
            | Mission::UnitWanderHostile
            | Mission::Wander => None,
        }
    }

    /// `None` while the mission is still achievable; otherwise a diagnostic
    /// reason.  A failing check does not dispose the mission — the owning
    /// controller decides what to replace it with.
    pub fn invalid_reason(&self, world: &World, unit: UnitId) -> Option<&'static str> {
        let Some(u) = world.unit(unit) else {
            return Some("unit-disposed");
        };
        match self {
            Mission::BuildColony { target } => {
                let Some(tile) = world.map.tile(*target) else {
                    return Some("target-not-land");
                };
                if !tile.land {
                    Some("target-not-land")
                } else if tile.colony.is_some() {
                    Some("target-occupied")
                } else {
                    None
                }
            }
            Mission::CashInTreasure => {
                (u.kind != windward_world::UnitKind::TreasureTrain).then_some("no-treasure")
            }
            Mission::DefendSettlement { colony } | Mission::WorkInsideColony { colony } => {
                match world.colony(*colony) {
                    Some(c) if c.owner == u.owner => None,
                    _ => Some("colony-lost"),
                }
            }
            Mission::Pioneering { target } | Mission::Scouting { target } => {
                if world.map.is_land(*target) {
                    None
                } else {
                    Some("target-not-land")
                }
            }
            Mission::SeekAndDestroy { target } => match world.unit(*target) {
                Some(t) if t.owner != u.owner => None,
                _ => Some("target-gone"),
            },
            Mission::IndianBringGift { colony }
            | Mission::IndianDemand { colony }
            | Mission::Missionary { settlement: colony } => match world.colony(*colony) {
                Some(c) if c.owner != u.owner => None,
                _ => Some("settlement-lost"),
            },
            Mission::Privateer => (!u.kind.is_naval()).then_some("not-naval"),
            Mission::Transport(_) => {
                (u.kind.capacity() == 0).then_some("not-a-carrier")
            }
            Mission::IdleAtSettlement
            | Mission::UnitWanderHostile
            | Mission::Wander
            | Mission::WishRealization { .. } => None,
        }
    }

    pub fn is_valid(&self, world: &World, unit: UnitId) -> bool {
        self.invalid_reason(world, unit).is_none()
    }

    // ── Cargo-management capability ───────────────────────────────────────

    /// The cargo manifest, when this mission manages one.
    ///
    /// This is the capability query call sites use instead of inspecting the
    /// variant: "does this mission manage a manifest?"
    pub fn cargo(&self) -> Option<&CargoManifest> {
        match self {
            Mission::Transport(m) => Some(m),
            _ => None,
        }
    }

    pub fn cargo_mut(&mut self) -> Option<&mut CargoManifest> {
        match self {
            Mission::Transport(m) => Some(m),
            _ => None,
        }
    }

    // ── Per-turn behavior ─────────────────────────────────────────────────

    /// Perform one turn-step for the bound agent `unit`.
    ///
    /// Called only by `AiMain::run_mission`, which has already confirmed
    /// validity and temporarily detached this mission from its agent.  A
    /// failed action request means "this turn's attempt did nothing" and the
    /// mission simply continues.
    pub(crate) fn step(
        &mut self,
        world: &mut World,
        server: &mut dyn ActionServer,
        main: &mut AiMain,
        unit: UnitId,
    ) -> StepOutcome {
        match self {
            Mission::Transport(manifest) => manifest.step(world, server, main, unit),

            // Stationary missions: being there is the whole job.
            Mission::IdleAtSettlement => StepOutcome::Continue,
            Mission::DefendSettlement { .. } | Mission::WorkInsideColony { .. } => {
                self.step_travel(world, server, main, unit, StepOutcome::Continue)
            }

            Mission::Privateer | Mission::UnitWanderHostile | Mission::Wander => {
                let owner = world.unit(unit).map(|u| u.owner);
                let dir = owner
                    .and_then(|o| main.players.get_mut(&o))
                    .and_then(|p| p.rng.choose(&windward_world::Direction::ALL).copied());
                if let Some(dir) = dir {
                    server.move_unit(world, unit, dir);
                }
                StepOutcome::Continue
            }

            // Walking errands at a foreign settlement; the errand itself is
            // the embedding application's business once the unit is there.
            Mission::IndianBringGift { colony }
            | Mission::IndianDemand { colony }
            | Mission::Missionary { settlement: colony } => {
                let Some(target) = world.colony(*colony).map(|c| c.tile) else {
                    return StepOutcome::Continue;
                };
                if world.unit_tile(unit) == Some(target) {
                    return StepOutcome::Complete("target-reached");
                }
                server.move_to(world, unit, Location::Tile(target));
                StepOutcome::Continue
            }

            // Travel missions: arriving completes them.
            Mission::BuildColony { .. }
            | Mission::CashInTreasure
            | Mission::Pioneering { .. }
            | Mission::Scouting { .. }
            | Mission::SeekAndDestroy { .. }
            | Mission::WishRealization { .. } => {
                self.step_travel(world, server, main, unit, StepOutcome::Complete("target-reached"))
            }
        }
    }

    /// Shared travel behavior: while awaiting pickup do nothing, otherwise
    /// request one step toward the destination; `on_arrival` decides whether
    /// reaching it ends the mission.
    fn step_travel(
        &self,
        world: &mut World,
        server: &mut dyn ActionServer,
        main: &AiMain,
        unit: UnitId,
        on_arrival: StepOutcome,
    ) -> StepOutcome {
        let Some(dest) = self.transport_destination(world) else {
            return StepOutcome::Continue;
        };
        let arrived = match dest {
            Location::Tile(t) => world.unit_tile(unit) == Some(t),
            _ => world.unit(unit).map(|u| u.location) == Some(dest),
        };
        if arrived {
            return on_arrival;
        }
        // Aboard a carrier the carrier's manifest does the moving.
        let aboard = main
            .agents
            .get(unit)
            .and_then(|a| a.transport())
            .is_some();
        if !aboard {
            server.move_to(world, unit, dest);
        }
        StepOutcome::Continue
    }
}
