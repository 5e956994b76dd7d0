//! Save and restore of agent state as tagged records.
//!
//! # Format rules
//!
//! - A mission that fails its validity check at save time is aborted first
//!   (with its own invalidity reason) and never written: saves contain no
//!   dead missions.
//! - One-time missions are not worth persisting and are omitted.
//! - The carrier reference is written only when it resolves to a live agent
//!   bound to a live unit; a dangling reference is omitted with a warning.
//! - Loading is strict about structure (unknown units, duplicate records,
//!   unknown mission tags are hard errors) but self-heals relational drift:
//!   after all records are in, both directions of the claim invariant are
//!   reconciled with warnings.

use log::warn;
use serde::{Deserialize, Serialize};
use windward_core::UnitId;
use windward_world::World;

use crate::error::{AiError, AiResult};
use crate::registry;
use crate::store::AiUnitStore;

// ── AiUnitRecord ──────────────────────────────────────────────────────────────

/// One agent's persisted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiUnitRecord {
    pub unit: UnitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<UnitId>,
    /// Tagged mission sub-record, absent for one-time or missing missions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<serde_json::Value>,
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Serialize all agents to records, aborting invalid missions first.
pub fn save_agents(store: &mut AiUnitStore, world: &World) -> AiResult<Vec<AiUnitRecord>> {
    // Invalid missions die now, through the standard path, so the save
    // never contains one.
    let ids: Vec<UnitId> = store.ids().collect();
    for &id in &ids {
        let reason = store
            .get(id)
            .and_then(|a| a.mission())
            .and_then(|m| m.invalid_reason(world, id));
        if let Some(reason) = reason {
            store.abort_mission(id, reason);
        }
    }

    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(agent) = store.get(id) else {
            continue;
        };
        let transport = match agent.transport() {
            Some(c) if store.contains(c) && world.unit(c).is_some() => Some(c),
            Some(c) => {
                warn!("{id} carrier reference {c} does not resolve, omitting from save");
                None
            }
            None => None,
        };
        let mission = match agent.mission() {
            Some(m) if !m.is_one_time() => Some(registry::encode(m)?),
            _ => None,
        };
        records.push(AiUnitRecord {
            unit: id,
            transport,
            mission,
        });
    }
    Ok(records)
}

/// Serialize agents straight to a JSON document.
pub fn save_to_json(store: &mut AiUnitStore, world: &World) -> AiResult<String> {
    let records = save_agents(store, world)?;
    Ok(serde_json::to_string_pretty(&records)?)
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Rebuild the agent arena from records.
///
/// Structural corruption fails the whole load; relational drift between the
/// two halves of the claim invariant is reconciled afterwards.
pub fn load_agents(records: Vec<AiUnitRecord>, world: &World) -> AiResult<AiUnitStore> {
    let mut store = AiUnitStore::new();
    for record in records {
        if world.unit(record.unit).is_none() {
            return Err(AiError::UnresolvedUnit(record.unit));
        }
        if !store.add(record.unit) {
            return Err(AiError::DuplicateAgent(record.unit));
        }
        if let Some(value) = record.mission {
            let mission = registry::decode(value)?;
            store.bind_mission(record.unit, mission);
        }
        if let Some(carrier) = record.transport {
            store.claim_transport(record.unit, carrier, "restored-from-save");
        }
    }
    reconcile(&mut store, world);
    Ok(store)
}

/// Rebuild the agent arena from a JSON document.
pub fn load_from_json(json: &str, world: &World) -> AiResult<AiUnitStore> {
    let records: Vec<AiUnitRecord> = serde_json::from_str(json)?;
    load_agents(records, world)
}

/// Repair both directions of the claim invariant after a load.
///
/// Agent-side: a carrier reference whose carrier has no manifest slot for
/// the agent is released.  Carrier-side: a manifest slot whose claimant does
/// not point back is dropped.
fn reconcile(store: &mut AiUnitStore, world: &World) {
    let ids: Vec<UnitId> = store.ids().collect();

    for &id in &ids {
        let Some(carrier) = store.get(id).and_then(|a| a.transport()) else {
            continue;
        };
        let backed = world.unit(carrier).is_some()
            && store
                .get(carrier)
                .and_then(|c| c.mission())
                .and_then(|m| m.cargo())
                .map(|man| man.contains(id))
                .unwrap_or(false);
        if !backed {
            warn!("{id} claims carrier {carrier} with no matching manifest slot, releasing");
            store.release_transport(id, "reconcile-unbacked-claim");
        }
    }

    for &carrier in &ids {
        let Some(manifest) = store.get(carrier).and_then(|a| a.mission()).and_then(|m| m.cargo())
        else {
            continue;
        };
        // Waiting-list membership is interest, not a claim; only admitted
        // slots must be backed by a claim.
        let orphans: Vec<UnitId> = manifest
            .entries()
            .iter()
            .map(|e| e.unit)
            .filter(|&u| store.get(u).and_then(|a| a.transport()) != Some(carrier))
            .collect();
        if orphans.is_empty() {
            continue;
        }
        let Some(manifest) = store
            .get_mut(carrier)
            .and_then(|a| a.mission.as_mut())
            .and_then(|m| m.cargo_mut())
        else {
            continue;
        };
        for unit in orphans {
            warn!("{carrier} manifest slot for {unit} has no matching claim, dropping");
            manifest.remove_transportable(unit, "reconcile-orphan-slot");
        }
    }
}
