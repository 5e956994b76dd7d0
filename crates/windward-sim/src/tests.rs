//! Unit tests for the turn driver and the integrity sweep.

use windward_ai::{AiMain, CargoManifest, Mission};
use windward_core::{PlayerId, TileId, Turn, UnitId};
use windward_world::{LocalServer, Location, Unit, UnitKind, World, WorldMap};

use crate::{NoopObserver, Sim, SimConfig, SimError, SimObserver, integrity};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 4x4 map: west half land, east half water.
fn coastal_world() -> World {
    let mut map = WorldMap::water(4, 4);
    for y in 0..4 {
        for x in 0..2 {
            if let Some(tile) = map.tile_mut(TileId(y * 4 + x)) {
                tile.land = true;
            }
        }
    }
    World::new(map)
}

fn spawn(world: &mut World, id: u32, kind: UnitKind, loc: Location) -> UnitId {
    world.add_unit(Unit::new(UnitId(id), PlayerId(0), kind, loc))
}

fn ai_with_agents(units: &[UnitId]) -> AiMain {
    let mut ai = AiMain::new(7);
    ai.add_player(PlayerId(0));
    for &u in units {
        assert!(ai.agents.add(u));
    }
    ai
}

#[derive(Default)]
struct Recorder {
    turns: usize,
    stepped: Vec<usize>,
    unhealthy: Vec<UnitId>,
    ended_at: Option<Turn>,
}

impl SimObserver for Recorder {
    fn on_turn_end(&mut self, _turn: Turn, stepped: usize) {
        self.turns += 1;
        self.stepped.push(stepped);
    }

    fn on_unhealthy_agent(&mut self, _turn: Turn, unit: UnitId) {
        self.unhealthy.push(unit);
    }

    fn on_sim_end(&mut self, final_turn: Turn) {
        self.ended_at = Some(final_turn);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

mod config {
    use super::*;

    #[test]
    fn zero_integrity_interval_is_rejected() {
        let config = SimConfig {
            integrity_interval: 0,
            ..SimConfig::default()
        };
        let result = Sim::new(config, coastal_world(), ai_with_agents(&[]), LocalServer::new());
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Turn loop ─────────────────────────────────────────────────────────────────

mod turn_loop {
    use super::*;

    #[test]
    fn runs_the_configured_number_of_turns() {
        let config = SimConfig {
            total_turns: 5,
            ..SimConfig::default()
        };
        let mut sim =
            Sim::new(config, coastal_world(), ai_with_agents(&[]), LocalServer::new())
                .expect("sim");
        let mut recorder = Recorder::default();
        sim.run(&mut recorder).expect("run");
        assert_eq!(recorder.turns, 5);
        assert_eq!(recorder.ended_at, Some(Turn(5)));
    }

    #[test]
    fn transport_scenario_end_to_end() {
        let mut world = coastal_world();
        let carrier = spawn(&mut world, 1, UnitKind::Caravel, Location::Tile(TileId(2)));
        let u = spawn(&mut world, 2, UnitKind::FreeColonist, Location::Tile(TileId(1)));
        let mut ai = ai_with_agents(&[carrier, u]);
        ai.agents.bind_mission(carrier, Mission::Transport(CargoManifest::new()));
        ai.agents.bind_mission(u, Mission::Scouting { target: TileId(5) });
        if let Some(p) = ai.player_mut(PlayerId(0)) {
            p.track_transportable(u, Location::Tile(TileId(1)));
        }

        let config = SimConfig {
            total_turns: 4,
            ..SimConfig::default()
        };
        let mut sim = Sim::new(config, world, ai, LocalServer::new()).expect("sim");
        sim.run(&mut NoopObserver).expect("run");

        // Collected, ferried one tile, delivered, and the travel mission
        // completed on arrival.
        assert_eq!(
            sim.world.unit(u).map(|x| x.location),
            Some(Location::Tile(TileId(5)))
        );
        assert!(sim.ai.agents.get(u).is_some_and(|a| !a.has_mission()));
        assert_eq!(sim.ai.agents.get(u).and_then(|a| a.transport()), None);
    }

    #[test]
    fn stepped_count_skips_invalid_and_missionless_agents() {
        let mut world = coastal_world();
        let live = spawn(&mut world, 1, UnitKind::FreeColonist, Location::Tile(TileId(0)));
        let broken = spawn(&mut world, 2, UnitKind::FreeColonist, Location::Tile(TileId(4)));
        let idle = spawn(&mut world, 3, UnitKind::FreeColonist, Location::Tile(TileId(8)));
        let mut ai = ai_with_agents(&[live, broken, idle]);
        ai.agents.bind_mission(live, Mission::Scouting { target: TileId(1) });
        ai.agents.bind_mission(broken, Mission::Scouting { target: TileId(3) }); // water

        let config = SimConfig {
            total_turns: 1,
            ..SimConfig::default()
        };
        let mut sim = Sim::new(config, world, ai, LocalServer::new()).expect("sim");
        let mut recorder = Recorder::default();
        sim.run(&mut recorder).expect("run");
        assert_eq!(recorder.stepped, vec![1]);
    }
}

// ── Integrity ─────────────────────────────────────────────────────────────────

mod sweep {
    use super::*;

    #[test]
    fn flags_agents_bound_to_disposed_units() {
        let mut world = coastal_world();
        let u = spawn(&mut world, 1, UnitKind::FreeColonist, Location::Tile(TileId(0)));
        let ai = ai_with_agents(&[u]);
        world.dispose_unit(u);
        assert_eq!(integrity::unhealthy_agents(&world, &ai), vec![u]);
    }

    #[test]
    fn sweep_reports_through_the_observer() {
        let mut world = coastal_world();
        let u = spawn(&mut world, 1, UnitKind::FreeColonist, Location::Tile(TileId(0)));
        let ai = ai_with_agents(&[u]);
        world.dispose_unit(u);

        let config = SimConfig {
            total_turns: 1,
            integrity_interval: 1,
            ..SimConfig::default()
        };
        let mut sim = Sim::new(config, world, ai, LocalServer::new()).expect("sim");
        let mut recorder = Recorder::default();
        sim.run(&mut recorder).expect("run");
        assert_eq!(recorder.unhealthy, vec![u]);
    }

    #[test]
    fn healthy_claims_pass_the_drift_check() {
        let mut world = coastal_world();
        let carrier = spawn(&mut world, 1, UnitKind::Caravel, Location::Tile(TileId(2)));
        let u = spawn(&mut world, 2, UnitKind::FreeColonist, Location::Tile(TileId(1)));
        let mut ai = ai_with_agents(&[carrier, u]);
        ai.agents.bind_mission(carrier, Mission::Transport(CargoManifest::new()));
        ai.agents.bind_mission(u, Mission::Scouting { target: TileId(5) });
        ai.enqueue_transport_requests(&world);
        let mut server = LocalServer::new();
        ai.run_mission(&mut world, &mut server, carrier);
        assert!(integrity::unbacked_claims(&ai).is_empty());
    }

    #[test]
    fn dangling_claims_are_reported() {
        let mut world = coastal_world();
        let carrier = spawn(&mut world, 1, UnitKind::Caravel, Location::Tile(TileId(2)));
        let u = spawn(&mut world, 2, UnitKind::FreeColonist, Location::Tile(TileId(1)));
        let mut ai = ai_with_agents(&[carrier, u]);
        ai.agents.bind_mission(u, Mission::Scouting { target: TileId(5) });
        // No transport mission on the carrier: the claim has no backing slot.
        ai.agents.claim_transport(u, carrier, "test");
        assert_eq!(integrity::unbacked_claims(&ai), vec![(u, carrier)]);
    }
}
