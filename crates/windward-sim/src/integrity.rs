//! Periodic consistency checks over the live agent set.
//!
//! The sweep reports, never repairs: a flagged agent stays registered until
//! its owner decides to discard it, so a transient world-state glitch cannot
//! cascade into mass disposal.

use log::warn;
use windward_ai::AiMain;
use windward_core::UnitId;
use windward_world::World;

/// Agents whose bound unit has been disposed of (or never existed), in
/// ascending unit ID.
pub fn unhealthy_agents(world: &World, ai: &AiMain) -> Vec<UnitId> {
    let mut flagged = Vec::new();
    for id in ai.agents.ids() {
        if let Err(err) = world.unit_checked(id) {
            warn!("integrity: agent {id} is unhealthy: {err}");
            flagged.push(id);
        }
    }
    flagged
}

/// Claims whose carrier has no matching manifest slot, as
/// `(claimant, carrier)` pairs.  Logged for diagnosis; the claim/release
/// choke points are supposed to make this unreachable.
pub fn unbacked_claims(ai: &AiMain) -> Vec<(UnitId, UnitId)> {
    let mut drifted = Vec::new();
    for id in ai.agents.ids() {
        let Some(carrier) = ai.agents.get(id).and_then(|a| a.transport()) else {
            continue;
        };
        let backed = ai
            .agents
            .get(carrier)
            .and_then(|c| c.mission())
            .and_then(|m| m.cargo())
            .map(|man| man.contains(id) || man.waiting().contains(&id))
            .unwrap_or(false);
        if !backed {
            warn!("integrity: {id} claims carrier {carrier} with no manifest slot");
            drifted.push((id, carrier));
        }
    }
    drifted
}
