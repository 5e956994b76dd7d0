//! The `Sim` struct and its turn loop.

use log::trace;
use windward_ai::AiMain;
use windward_core::{Turn, UnitId};
use windward_world::{ActionServer, World};

use crate::{SimConfig, SimError, SimObserver, SimResult, integrity};

/// The per-turn driver.
///
/// Owns the world, the AI state, and the action server, and steps them in a
/// fixed deterministic order.  See the crate docs for the phase breakdown.
pub struct Sim<S: ActionServer> {
    pub config: SimConfig,
    pub turn: Turn,
    pub world: World,
    pub ai: AiMain,
    pub server: S,
}

impl<S: ActionServer> Sim<S> {
    pub fn new(config: SimConfig, world: World, ai: AiMain, server: S) -> SimResult<Self> {
        if config.integrity_interval == 0 {
            return Err(SimError::Config(
                "integrity_interval must be at least 1".into(),
            ));
        }
        Ok(Self {
            config,
            turn: Turn::ZERO,
            world,
            ai,
            server,
        })
    }

    /// Drive `config.total_turns` turns.
    pub fn run(&mut self, observer: &mut dyn SimObserver) -> SimResult<()> {
        for _ in 0..self.config.total_turns {
            self.step_turn(observer);
        }
        observer.on_sim_end(self.turn);
        Ok(())
    }

    /// Run one turn.  Public so an embedding application can interleave its
    /// own world changes between turns.
    pub fn step_turn(&mut self, observer: &mut dyn SimObserver) {
        observer.on_turn_start(self.turn);

        self.ai.enqueue_transport_requests(&self.world);

        let mut stepped = 0usize;
        for unit in self.visiting_order() {
            let runnable = self
                .ai
                .agents
                .get(unit)
                .and_then(|a| a.mission())
                .is_some_and(|m| m.is_valid(&self.world, unit));
            if runnable {
                stepped += 1;
            }
            self.ai.run_mission(&mut self.world, &mut self.server, unit);
        }

        self.ai.accrue_priorities(&self.world);

        if self.turn.0 % self.config.integrity_interval == 0 {
            for unit in integrity::unhealthy_agents(&self.world, &self.ai) {
                observer.on_unhealthy_agent(self.turn, unit);
            }
        }

        trace!("{} complete, {stepped} missions stepped", self.turn);
        observer.on_turn_end(self.turn, stepped);
        self.turn = self.turn.next();
    }

    /// Agents in ascending (owner, unit) order.  Ownerless agents (their
    /// unit is gone) sort last and are skipped by the validity check.
    fn visiting_order(&self) -> Vec<UnitId> {
        let mut order: Vec<(u16, UnitId)> = self
            .ai
            .agents
            .ids()
            .map(|id| {
                let owner = self
                    .world
                    .unit(id)
                    .map(|u| u.owner.0)
                    .unwrap_or(u16::MAX);
                (owner, id)
            })
            .collect();
        order.sort();
        order.into_iter().map(|(_, id)| id).collect()
    }
}
